//! HTTP transport for downloads-galaxy.
//!
//! A thin layer over [`galaxy_scan`]: `GET /api/scan` and `GET /api/reindex`
//! both run a fresh scan and return the manifest as JSON.

mod error;
mod router;
mod server;

pub use error::ServerError;
pub use router::{Reply, Route, Router};
pub use server::{DEFAULT_PORT, ServerConfig, serve};
