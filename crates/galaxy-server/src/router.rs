//! Request routing and response bodies.

use std::io::Cursor;
use std::path::PathBuf;

use serde::Serialize;
use tiny_http::{Header, Method, Response};

use galaxy_core::{ScanConfig, ScanError};
use galaxy_scan::GalaxyScanner;

/// Endpoints understood by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `GET /api/scan`
    Scan,
    /// `GET /api/reindex`, identical to a scan.
    Reindex,
    /// `GET /` or `GET /index.html`
    Index,
    /// Any other path.
    NotFound,
    /// A known path with a method other than GET.
    MethodNotAllowed,
}

impl Route {
    /// Match a request line. Query strings are ignored.
    pub fn resolve(method: &Method, url: &str) -> Self {
        let path = url.split('?').next().unwrap_or(url);
        let route = match path {
            "/api/scan" => Self::Scan,
            "/api/reindex" => Self::Reindex,
            "/" | "/index.html" => Self::Index,
            _ => return Self::NotFound,
        };
        if *method == Method::Get {
            route
        } else {
            Self::MethodNotAllowed
        }
    }
}

/// A response ready to be written to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl Reply {
    fn json(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: "application/json",
            body,
        }
    }

    fn error(status: u16, message: &str) -> Self {
        let body = serde_json::to_vec(&ErrorBody { error: message })
            .unwrap_or_else(|_| b"{\"error\":\"internal error\"}".to_vec());
        Self::json(status, body)
    }

    fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.into().into_bytes(),
        }
    }

    /// Body as UTF-8 text, lossily.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Convert into a tiny_http response with CORS enabled.
    pub fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let mut response = Response::from_data(self.body).with_status_code(self.status);
        for (name, value) in [
            ("Content-Type", self.content_type),
            ("Access-Control-Allow-Origin", "*"),
            ("Cache-Control", "no-store"),
        ] {
            if let Ok(header) = Header::from_bytes(name.as_bytes(), value.as_bytes()) {
                response = response.with_header(header);
            }
        }
        response
    }
}

/// Maps requests to fresh scans.
///
/// Every scan request re-reads the filesystem; nothing is cached between
/// requests.
pub struct Router {
    scanner: GalaxyScanner,
    scan_config: ScanConfig,
    viewer: Option<PathBuf>,
}

impl Router {
    /// Create a router scanning with `scan_config`.
    pub fn new(scan_config: ScanConfig) -> Self {
        Self {
            scanner: GalaxyScanner::new(),
            scan_config,
            viewer: None,
        }
    }

    /// Serve this HTML file at `/`.
    pub fn with_viewer(mut self, viewer: Option<PathBuf>) -> Self {
        self.viewer = viewer;
        self
    }

    /// The configuration used for every scan.
    pub fn scan_config(&self) -> &ScanConfig {
        &self.scan_config
    }

    /// Produce the reply for one request.
    pub fn handle(&self, method: &Method, url: &str) -> Reply {
        match Route::resolve(method, url) {
            Route::Scan | Route::Reindex => self.scan(),
            Route::Index => self.index(),
            Route::NotFound => Reply::error(404, "not found"),
            Route::MethodNotAllowed => Reply::error(405, "method not allowed"),
        }
    }

    fn scan(&self) -> Reply {
        let manifest = match self.scanner.scan(&self.scan_config) {
            Ok(manifest) => manifest,
            Err(err) => return scan_error_reply(&err),
        };
        match serde_json::to_vec(&manifest) {
            Ok(body) => Reply::json(200, body),
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize manifest");
                Reply::error(500, "failed to serialize manifest")
            }
        }
    }

    fn index(&self) -> Reply {
        let Some(viewer) = &self.viewer else {
            return Reply::text(200, INDEX_TEXT);
        };
        match std::fs::read(viewer) {
            Ok(body) => Reply {
                status: 200,
                content_type: "text/html; charset=utf-8",
                body,
            },
            Err(err) => {
                tracing::error!(
                    viewer = %viewer.display(),
                    error = %err,
                    "failed to read viewer page"
                );
                Reply::error(500, "viewer page unavailable")
            }
        }
    }
}

const INDEX_TEXT: &str = "Downloads Galaxy\n\n\
    GET /api/scan     manifest of the scanned folder\n\
    GET /api/reindex  same, re-read from disk\n";

fn scan_error_reply(err: &ScanError) -> Reply {
    tracing::error!(error = %err, "scan failed");
    let status = if err.is_root_not_found() { 404 } else { 500 };
    Reply::error(status, &err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_resolve() {
        assert_eq!(Route::resolve(&Method::Get, "/api/scan"), Route::Scan);
        assert_eq!(Route::resolve(&Method::Get, "/api/scan?t=123"), Route::Scan);
        assert_eq!(Route::resolve(&Method::Get, "/api/reindex"), Route::Reindex);
        assert_eq!(Route::resolve(&Method::Get, "/"), Route::Index);
        assert_eq!(Route::resolve(&Method::Get, "/index.html"), Route::Index);
        assert_eq!(Route::resolve(&Method::Get, "/etc/passwd"), Route::NotFound);
        assert_eq!(
            Route::resolve(&Method::Post, "/api/scan"),
            Route::MethodNotAllowed
        );
    }

    #[test]
    fn test_error_reply_is_json() {
        let reply = Reply::error(404, "not found");
        assert_eq!(reply.status, 404);
        assert_eq!(reply.content_type, "application/json");
        assert_eq!(reply.body_text(), r#"{"error":"not found"}"#);
    }
}
