//! HTTP protocol layer module
//!
//! Header policy, content types, dates and response builders, decoupled from
//! how requests map onto the filesystem.

pub mod date;
pub mod isolation;
pub mod mime;
pub mod response;

// Re-export commonly used items
pub use isolation::apply as apply_isolation_headers;
pub use response::{
    build_error_response, build_file_response, build_html_response, build_not_modified_response,
    build_redirect_response,
};
