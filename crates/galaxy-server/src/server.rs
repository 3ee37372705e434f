//! Blocking HTTP server with a fixed pool of worker threads.

use std::sync::Arc;
use std::thread;

use tiny_http::Server;

use crate::error::ServerError;
use crate::router::Router;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8000;

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Number of request-handling threads.
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            workers: 4,
        }
    }
}

impl ServerConfig {
    /// `host:port` to bind.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Bind and serve until the listener fails.
///
/// Each worker takes requests off the shared listener and runs its own
/// scan, so concurrent reindex requests never wait on each other.
pub fn serve(router: Router, config: &ServerConfig) -> Result<(), ServerError> {
    let addr = config.addr();
    let server = Server::http(&addr).map_err(|e| ServerError::Bind {
        addr: addr.clone(),
        message: e.to_string(),
    })?;

    tracing::info!(
        %addr,
        root = %router.scan_config().root.display(),
        workers = config.workers.max(1),
        "serving manifests"
    );

    let server = Arc::new(server);
    let router = Arc::new(router);

    let mut handles = Vec::new();
    for i in 0..config.workers.max(1) {
        let server = Arc::clone(&server);
        let router = Arc::clone(&router);
        let handle = thread::Builder::new()
            .name(format!("galaxy-http-{i}"))
            .spawn(move || worker(&server, &router))?;
        handles.push(handle);
    }

    for handle in handles {
        if handle.join().is_err() {
            tracing::error!("HTTP worker panicked");
        }
    }
    Ok(())
}

fn worker(server: &Server, router: &Router) {
    loop {
        let request = match server.recv() {
            Ok(request) => request,
            Err(err) => {
                tracing::error!(error = %err, "listener failed");
                return;
            }
        };

        let reply = router.handle(request.method(), request.url());
        tracing::debug!(
            method = %request.method(),
            url = request.url(),
            status = reply.status,
            "request"
        );

        if let Err(err) = request.respond(reply.into_response()) {
            tracing::warn!(error = %err, "failed to send response");
        }
    }
}
