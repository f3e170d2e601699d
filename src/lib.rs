//! Local static file server for pre-built web assets.
//!
//! Serves a directory over HTTP/1.x and stamps every response with the
//! cross-origin isolation headers (`Cross-Origin-Opener-Policy`,
//! `Cross-Origin-Embedder-Policy`) and a `Cache-Control` header that disables
//! caching, so pages needing `SharedArrayBuffer` work straight from a build
//! directory.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use config::Config;
pub use error::ServeError;
pub use handler::DocumentRoot;
pub use server::Server;
