//! Request path to filesystem path translation
//!
//! A request path is decoded and split into segments; empty, `.` and `..`
//! segments never become path components, so the result always lies under
//! the document root.

use crate::error::ServeError;
use std::io;
use std::path::{Component, Path, PathBuf};

/// The directory requests are served from
#[derive(Debug, Clone)]
pub struct DocumentRoot {
    dir: PathBuf,
}

/// A request path mapped onto the document root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub path: PathBuf,
    /// The request path ended in `/`
    pub trailing_slash: bool,
}

impl DocumentRoot {
    /// Open an existing directory as the document root
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ServeError> {
        let path = path.as_ref();
        let dir = path
            .canonicalize()
            .map_err(|e| ServeError::document_root(path, e))?;
        if !dir.is_dir() {
            return Err(ServeError::document_root(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            ));
        }
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn resolve(&self, request_path: &str) -> ResolvedPath {
        let raw = strip_query(request_path);
        let trailing_slash = raw.trim_end().ends_with('/');

        let decoded = decode_path(raw);
        let mut segments: Vec<&str> = Vec::new();
        for segment in decoded.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                s if is_plain_segment(s) => segments.push(s),
                _ => {}
            }
        }

        let path = segments
            .iter()
            .fold(self.dir.clone(), |path, segment| path.join(segment));

        ResolvedPath {
            path,
            trailing_slash,
        }
    }
}

/// Drop the query string and fragment
fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or_default()
}

/// Reduce a leading run of `/` to a single one
pub fn collapse_leading_slashes(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

/// Percent-decode a request path; invalid UTF-8 is replaced
pub fn decode_path(path: &str) -> String {
    let raw = strip_query(path);
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}

/// One normal path component: no root, prefix or platform separator inside
fn is_plain_segment(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
