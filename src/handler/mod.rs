//! Request handler module
//!
//! Serves the document root and runs the response hook: every response gets
//! the isolation headers and an access log line before hyper writes it.

pub mod listing;
pub mod path;
pub mod static_files;

pub use path::DocumentRoot;

use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Main entry point for HTTP request handling
///
/// The request body is never read.
pub async fn handle_request<B>(
    req: Request<B>,
    root: Arc<DocumentRoot>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, _) = req.into_parts();
    let mut entry = AccessLogEntry::new(peer_addr.ip(), &parts.method, &parts.uri, parts.version);

    let mut response = static_files::serve(&parts, &root).await;
    http::apply_isolation_headers(&mut response);

    entry.status = response.status().as_u16();
    entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
    logger::log_access(&entry);

    Ok(response)
}
