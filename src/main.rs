//! galaxy - categorized, size-ranked snapshots of a downloads folder.
//!
//! Usage:
//!   galaxy [PATH]              Serve manifests over HTTP (default: ~/Downloads)
//!   galaxy scan [PATH]         Print a per-folder summary
//!   galaxy export [PATH]       Write the manifest as JSON
//!   galaxy serve [PATH]        Serve manifests over HTTP
//!   galaxy --help              Show help

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Result};

use galaxy_core::{Manifest, ScanConfig, format_size};
use galaxy_scan::GalaxyScanner;
use galaxy_server::{DEFAULT_PORT, Router, ServerConfig};

#[derive(Parser)]
#[command(
    name = "galaxy",
    version,
    about = "Categorized snapshots of your downloads folder",
    long_about = "galaxy scans a folder (by default your Downloads), groups files by type \
                  and size, and serves the result as a JSON manifest.\n\n\
                  Running `galaxy [PATH]` starts the HTTP server; use subcommands for \
                  one-off scans."
)]
struct Cli {
    /// Folder to index (defaults to your Downloads folder)
    path: Option<PathBuf>,

    /// Load scan settings from a TOML file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    limits: Limits,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Overrides for the scan limits.
#[derive(Args, Clone, Default)]
struct Limits {
    /// Maximum folder depth below the root
    #[arg(short, long, global = true)]
    depth: Option<u32>,

    /// Maximum entries listed per folder
    #[arg(long, global = true)]
    cap: Option<usize>,

    /// Worker threads for folder scans (0 = auto)
    #[arg(short = 'j', long, global = true)]
    threads: Option<usize>,

    /// Include hidden files and folders
    #[arg(long, global = true)]
    hidden: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Scan once and print a summary
    Scan {
        /// Folder to scan
        path: Option<PathBuf>,
    },

    /// Scan once and write the manifest as JSON
    Export {
        /// Folder to scan
        path: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve manifests over HTTP
    Serve {
        /// Folder to index
        path: Option<PathBuf>,

        /// Port to listen on (defaults to $PORT, then 8000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Interface to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// HTML page served at /
        #[arg(long)]
        viewer: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let base = load_config(cli.config.as_deref())?;

    match cli.command {
        Some(Command::Scan { path }) => {
            let config = build_config(base, path.or(cli.path), &cli.limits);
            run_scan(&config)?;
        }
        Some(Command::Export { path, output }) => {
            let config = build_config(base, path.or(cli.path), &cli.limits);
            run_export(&config, output)?;
        }
        Some(Command::Serve {
            path,
            port,
            host,
            viewer,
        }) => {
            let config = build_config(base, path.or(cli.path), &cli.limits);
            run_serve(config, host, port, viewer)?;
        }
        None => {
            let config = build_config(base, cli.path, &cli.limits);
            run_serve(config, "127.0.0.1".to_string(), None, None)?;
        }
    }

    Ok(())
}

/// Set up the tracing subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Default log level for a `-v` count. Info is on so the startup lines show.
fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Read a TOML config file, or fall back to defaults.
fn load_config(path: Option<&Path>) -> Result<ScanConfig> {
    let Some(path) = path else {
        return Ok(ScanConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: ScanConfig = toml::from_str(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    Ok(config)
}

/// Apply command-line overrides on top of the loaded config.
fn build_config(mut config: ScanConfig, path: Option<PathBuf>, limits: &Limits) -> ScanConfig {
    if let Some(path) = path {
        config.root = path;
    }
    if let Some(depth) = limits.depth {
        config.max_depth = depth;
    }
    if let Some(cap) = limits.cap {
        config.per_folder_cap = cap;
    }
    if let Some(threads) = limits.threads {
        config.threads = threads;
    }
    if limits.hidden {
        config.include_hidden = true;
    }
    config
}

fn scan(config: &ScanConfig) -> Result<Manifest> {
    tracing::info!(root = %config.expanded_root().display(), "scanning");
    GalaxyScanner::new().scan(config).context("Scan failed")
}

/// Run a scan and print a per-folder summary.
fn run_scan(config: &ScanConfig) -> Result<()> {
    let manifest = scan(config)?;

    println!();
    println!("{}", "─".repeat(70));
    println!(" {} - {}", manifest.root_path, format_size(manifest.total_size()));
    println!(
        " {} files in {} folders, {} file types",
        manifest.stats.total_files, manifest.stats.folder_count, manifest.stats.file_types
    );
    println!(" Scanned in {}ms", manifest.scan_duration_ms);
    println!("{}", "─".repeat(70));
    println!();

    if !manifest.stats.categories.is_empty() {
        println!(" By type:");
        for (category, count) in &manifest.stats.categories {
            println!(
                "   {} {:<10} {:>6} files",
                category.icon(),
                category.label(),
                count
            );
        }
        println!();
    }

    for folder in &manifest.folders {
        println!(
            " 📁 {:<50} {:>10} {:>6} files",
            truncate(&folder.folder_path, 50),
            format_size(folder.total_size_bytes),
            folder.total_file_count
        );
        for entry in &folder.entries {
            println!(
                "    {} {:<48} {:>10}",
                entry.icon,
                truncate(&entry.name, 48),
                format_size(entry.size_bytes)
            );
        }
        if folder.is_truncated() {
            println!("    ... and {} more", folder.hidden_file_count);
        }
        println!();
    }

    if manifest.has_errors() {
        println!("{} folder(s) could not be read:", manifest.errors.len());
        for error in &manifest.errors {
            println!("   {}: {}", error.folder_path, error.reason);
        }
    }

    Ok(())
}

/// Run a scan and write the manifest as JSON.
fn run_export(config: &ScanConfig, output: Option<PathBuf>) -> Result<()> {
    let manifest = scan(config)?;
    let json = serde_json::to_string_pretty(&manifest)?;

    match output {
        Some(output_path) => {
            std::fs::write(&output_path, json)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            tracing::info!(path = %output_path.display(), "manifest exported");
        }
        None => {
            println!("{json}");
        }
    }

    Ok(())
}

/// Serve manifests over HTTP until interrupted.
fn run_serve(
    config: ScanConfig,
    host: String,
    port: Option<u16>,
    viewer: Option<PathBuf>,
) -> Result<()> {
    let root = config.expanded_root();
    if !root.is_dir() {
        color_eyre::eyre::bail!(
            "Folder does not exist or is not a directory: {}",
            root.display()
        );
    }

    let port = match port {
        Some(port) => port,
        None => match std::env::var("PORT") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("Invalid PORT {value:?}"))?,
            Err(_) => DEFAULT_PORT,
        },
    };
    let server_config = ServerConfig {
        host,
        port,
        ..ServerConfig::default()
    };

    tracing::info!(
        root = %root.display(),
        url = %format!("http://{}:{}/api/scan", server_config.host, server_config.port),
        "serving manifests"
    );

    let router = Router::new(config).with_viewer(viewer);
    galaxy_server::serve(router, &server_config).context("Server failed")?;
    Ok(())
}

/// Truncate a string to max characters.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 1).collect();
        format!("{head}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_config_overrides() {
        let limits = Limits {
            depth: Some(5),
            cap: Some(3),
            threads: None,
            hidden: true,
        };
        let config = build_config(ScanConfig::new("/a"), Some(PathBuf::from("/b")), &limits);

        assert_eq!(config.root, PathBuf::from("/b"));
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.per_folder_cap, 3);
        assert_eq!(config.threads, 0);
        assert!(config.include_hidden);
    }

    #[test]
    fn test_load_config_toml() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("galaxy.toml");
        std::fs::write(
            &path,
            "root = \"/srv/dl\"\nmax_depth = 4\nignore_patterns = [\"*.part\"]\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.root, PathBuf::from("/srv/dl"));
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.per_folder_cap, 20);
        assert_eq!(config.ignore_patterns, vec!["*.part".to_string()]);
    }

    #[test]
    fn test_log_level_shows_info_by_default() {
        assert_eq!(log_level(0), "info");
        assert_eq!(log_level(1), "debug");
        assert_eq!(log_level(5), "trace");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["galaxy", "scan", "/tmp", "--cap", "5"]).unwrap();
        assert_eq!(cli.limits.cap, Some(5));
        assert!(matches!(cli.command, Some(Command::Scan { path: Some(_) })));
    }
}
