//! Cross-origin isolation and cache-busting headers
//!
//! Every response leaves the server with these three headers, whatever its
//! status, method or path. They are set last, after the handler has built the
//! response, so they replace any value the handler chose.

use hyper::header::{HeaderName, HeaderValue, CACHE_CONTROL};
use hyper::Response;

#[allow(clippy::declare_interior_mutable_const)]
pub const CROSS_ORIGIN_OPENER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-opener-policy");
#[allow(clippy::declare_interior_mutable_const)]
pub const CROSS_ORIGIN_EMBEDDER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-embedder-policy");

/// The headers in the order they are written
#[allow(clippy::declare_interior_mutable_const)]
pub const ISOLATION_HEADERS: [(HeaderName, &str); 3] = [
    (CROSS_ORIGIN_OPENER_POLICY, "same-origin"),
    (CROSS_ORIGIN_EMBEDDER_POLICY, "require-corp"),
    (CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
];

/// Set the isolation headers on a finished response
pub fn apply<B>(response: &mut Response<B>) {
    let headers = response.headers_mut();
    for (name, value) in ISOLATION_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
}
