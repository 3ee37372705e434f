//! File categories and the extension classifier.
//!
//! Classification is a pure lookup of the lower-cased extension in a static
//! table. Supporting a new extension means adding a row to
//! [`EXTENSION_TABLE`]; the lookup itself never changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

/// Display grouping for a scanned file.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Video,
    Audio,
    Image,
    Document,
    Installer,
    Archive,
    Data,
    Code,
    /// Unknown or missing extension.
    #[default]
    Other,
}

/// Extension to category table. Extensions are lower-case, without the dot.
pub const EXTENSION_TABLE: &[(&str, Category)] = &[
    // Video
    ("mp4", Category::Video),
    ("mov", Category::Video),
    ("avi", Category::Video),
    ("mkv", Category::Video),
    ("webm", Category::Video),
    ("m4v", Category::Video),
    // Audio
    ("mp3", Category::Audio),
    ("m4a", Category::Audio),
    ("wav", Category::Audio),
    ("flac", Category::Audio),
    ("aac", Category::Audio),
    ("ogg", Category::Audio),
    ("wma", Category::Audio),
    // Images
    ("jpg", Category::Image),
    ("jpeg", Category::Image),
    ("png", Category::Image),
    ("gif", Category::Image),
    ("webp", Category::Image),
    ("svg", Category::Image),
    ("bmp", Category::Image),
    ("heic", Category::Image),
    ("tiff", Category::Image),
    // Documents
    ("pdf", Category::Document),
    ("doc", Category::Document),
    ("docx", Category::Document),
    ("txt", Category::Document),
    ("rtf", Category::Document),
    ("odt", Category::Document),
    ("xls", Category::Document),
    ("xlsx", Category::Document),
    ("ppt", Category::Document),
    ("pptx", Category::Document),
    ("csv", Category::Document),
    // Archives
    ("zip", Category::Archive),
    ("rar", Category::Archive),
    ("7z", Category::Archive),
    ("tar", Category::Archive),
    ("gz", Category::Archive),
    ("bz2", Category::Archive),
    // Installers
    ("dmg", Category::Installer),
    ("pkg", Category::Installer),
    ("app", Category::Installer),
    ("exe", Category::Installer),
    ("msi", Category::Installer),
    // Structured data
    ("json", Category::Data),
    ("xml", Category::Data),
    ("yaml", Category::Data),
    ("yml", Category::Data),
    ("sql", Category::Data),
    ("db", Category::Data),
    // Source code
    ("py", Category::Code),
    ("js", Category::Code),
    ("ts", Category::Code),
    ("html", Category::Code),
    ("css", Category::Code),
    ("java", Category::Code),
    ("cpp", Category::Code),
    ("c", Category::Code),
    ("go", Category::Code),
    ("rs", Category::Code),
    ("rb", Category::Code),
];

/// Per-extension glyphs shown next to individual files.
const FILE_ICON_TABLE: &[(&str, &str)] = &[
    ("mp4", "🎥"),
    ("mov", "🎥"),
    ("avi", "🎥"),
    ("mp3", "🎙️"),
    ("m4a", "🎵"),
    ("wav", "🎵"),
    ("jpg", "📸"),
    ("jpeg", "📸"),
    ("png", "📱"),
    ("webp", "🌐"),
    ("gif", "🎞️"),
    ("pdf", "📄"),
    ("doc", "📝"),
    ("docx", "📝"),
    ("txt", "📝"),
    ("zip", "📦"),
    ("rar", "📦"),
    ("7z", "📦"),
    ("dmg", "💿"),
    ("pkg", "📀"),
    ("json", "📊"),
    ("xml", "📊"),
    ("py", "🐍"),
    ("js", "📜"),
    ("html", "🌐"),
    ("srt", "📝"),
    ("ics", "📅"),
    ("pkpass", "🎟️"),
];

/// Glyph used when an extension has no dedicated icon.
pub const DEFAULT_FILE_ICON: &str = "📄";

/// Folder glyphs keyed by the lower-cased folder name.
const FOLDER_ICON_TABLE: &[(&str, &str)] = &[
    ("video", "🎬"),
    ("music", "🎵"),
    ("images & screenshots", "🖼️"),
    ("ai & evals", "🤖"),
    ("forms & documents", "📋"),
    ("financial", "💰"),
    ("parenting & education podcasts", "👨‍👩‍👧"),
    ("installers & archives", "📦"),
    ("code projects", "💻"),
    ("manuals & reference", "📖"),
    ("misc", "✨"),
];

/// Name fragments that suggest a folder's category, checked in order.
const FOLDER_NAME_HINTS: &[(&[&str], Category)] = &[
    (&["video"], Category::Video),
    (&["music", "audio"], Category::Audio),
    (&["image", "screenshot", "photo"], Category::Image),
    (&["document", "form"], Category::Document),
    (&["install", "archive"], Category::Installer),
    (&["financial", "finance"], Category::Document),
    (&["ai", "eval"], Category::Document),
    (&["podcast", "parenting", "education"], Category::Audio),
    (&["code", "project"], Category::Archive),
    (&["manual", "reference"], Category::Document),
];

/// Glyph used for folders without a dedicated icon.
pub const DEFAULT_FOLDER_ICON: &str = "📁";

/// Glyph used for files sitting directly in the scan root.
pub const ROOT_FOLDER_ICON: &str = "📂";

impl Category {
    /// Accent color (CSS hex) used by the viewer for this category.
    pub fn color(self) -> &'static str {
        match self {
            Category::Video => "#ff6b6b",
            Category::Audio => "#feca57",
            Category::Image => "#48dbfb",
            Category::Document => "#1dd1a1",
            Category::Installer => "#5f27cd",
            Category::Archive => "#ff9ff3",
            Category::Data => "#54a0ff",
            Category::Code => "#00d2d3",
            Category::Other => "#c8d6e5",
        }
    }

    /// Glyph used for a group of files in this category.
    pub fn icon(self) -> &'static str {
        match self {
            Category::Video => "🎬",
            Category::Audio => "🎵",
            Category::Image => "🖼️",
            Category::Document => "📋",
            Category::Installer => "💿",
            Category::Archive => "📦",
            Category::Data => "📊",
            Category::Code => "💻",
            Category::Other => "✨",
        }
    }

    /// Lower-case label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// Extension of `file_name` without the leading dot, if it has a non-empty one.
///
/// Dotfiles such as `.bashrc` have no extension.
pub fn extension_of(file_name: &str) -> Option<&str> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
}

/// Map a file name to its category.
///
/// Matching is case-insensitive on the extension; anything not in
/// [`EXTENSION_TABLE`] is [`Category::Other`].
pub fn classify(file_name: &str) -> Category {
    extension_of(file_name)
        .and_then(|ext| {
            EXTENSION_TABLE
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(ext))
                .map(|(_, category)| *category)
        })
        .unwrap_or(Category::Other)
}

/// Per-file glyph for `file_name`.
pub fn file_icon(file_name: &str) -> &'static str {
    extension_of(file_name)
        .and_then(|ext| {
            FILE_ICON_TABLE
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(ext))
                .map(|(_, icon)| *icon)
        })
        .unwrap_or(DEFAULT_FILE_ICON)
}

/// Glyph for a folder, looked up by its exact name, case-insensitively.
pub fn folder_icon(folder_name: &str) -> &'static str {
    if folder_name == "." {
        return ROOT_FOLDER_ICON;
    }
    let lower = folder_name.to_lowercase();
    FOLDER_ICON_TABLE
        .iter()
        .find(|(known, _)| *known == lower)
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_FOLDER_ICON)
}

/// Best-guess category for a folder from fragments of its name.
///
/// This is a display hint only; the files inside are classified on their own.
pub fn folder_category(folder_name: &str) -> Category {
    let lower = folder_name.to_lowercase();
    FOLDER_NAME_HINTS
        .iter()
        .find(|(fragments, _)| fragments.iter().any(|f| lower.contains(f)))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_classify_known_extensions() {
        assert_eq!(classify("movie.mkv"), Category::Video);
        assert_eq!(classify("song.flac"), Category::Audio);
        assert_eq!(classify("shot.heic"), Category::Image);
        assert_eq!(classify("report.pdf"), Category::Document);
        assert_eq!(classify("setup.msi"), Category::Installer);
        assert_eq!(classify("backup.7z"), Category::Archive);
        assert_eq!(classify("dump.sql"), Category::Data);
        assert_eq!(classify("main.rs"), Category::Code);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("IMG_0001.JPG"), Category::Image);
        assert_eq!(classify("Installer.DmG"), Category::Installer);
    }

    #[test]
    fn test_classify_unknown_and_extensionless() {
        assert_eq!(classify("README"), Category::Other);
        assert_eq!(classify(".bashrc"), Category::Other);
        assert_eq!(classify("trailing."), Category::Other);
        assert_eq!(classify("weird.xyz"), Category::Other);
        assert_eq!(classify(""), Category::Other);
    }

    #[test]
    fn test_classify_uses_last_extension() {
        assert_eq!(classify("sources.tar.gz"), Category::Archive);
        assert_eq!(classify("notes.txt.json"), Category::Data);
    }

    #[test]
    fn test_table_has_no_duplicate_extensions() {
        for (i, (ext, _)) in EXTENSION_TABLE.iter().enumerate() {
            assert!(
                !EXTENSION_TABLE[i + 1..].iter().any(|(other, _)| other == ext),
                "duplicate extension {ext}"
            );
            assert_eq!(*ext, ext.to_lowercase());
        }
    }

    #[test]
    fn test_every_category_has_presentation() {
        for category in Category::iter() {
            assert!(category.color().starts_with('#'));
            assert!(!category.icon().is_empty());
            assert_eq!(category.label(), category.to_string());
        }
    }

    #[test]
    fn test_folder_icon() {
        assert_eq!(folder_icon("Video"), "🎬");
        assert_eq!(folder_icon("installers & archives"), "📦");
        assert_eq!(folder_icon("."), ROOT_FOLDER_ICON);
        assert_eq!(folder_icon("Videos from 2024"), DEFAULT_FOLDER_ICON);
    }

    #[test]
    fn test_folder_category_hints() {
        assert_eq!(folder_category("Home Videos"), Category::Video);
        assert_eq!(folder_category("Screenshots"), Category::Image);
        assert_eq!(folder_category("Tax Forms"), Category::Document);
        assert_eq!(folder_category("Installers & Archives"), Category::Installer);
        assert_eq!(folder_category("Parenting podcasts"), Category::Audio);
        assert_eq!(folder_category("Code Projects"), Category::Archive);
        assert_eq!(folder_category("."), Category::Other);
        assert_eq!(folder_category("misc"), Category::Other);
    }

    #[test]
    fn test_file_icon() {
        assert_eq!(file_icon("clip.MOV"), "🎥");
        assert_eq!(file_icon("event.ics"), "📅");
        assert_eq!(file_icon("unknown.bin"), DEFAULT_FILE_ICON);
        assert_eq!(file_icon("noext"), DEFAULT_FILE_ICON);
    }
}
