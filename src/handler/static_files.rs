//! Static file serving module
//!
//! Maps GET and HEAD requests onto the document root: files are sent with
//! an inferred Content-Type, directories redirect to their slash form and
//! then serve an index file or a listing.

use crate::handler::listing;
use crate::handler::path::{collapse_leading_slashes, decode_path, DocumentRoot};
use crate::http::{self, date, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{IF_MODIFIED_SINCE, IF_NONE_MATCH};
use hyper::http::request::Parts;
use hyper::{HeaderMap, Method, Response, StatusCode};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncReadExt;

const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Serve one request from the document root
pub async fn serve(parts: &Parts, root: &DocumentRoot) -> Response<Full<Bytes>> {
    let is_head = match parts.method {
        Method::GET => false,
        Method::HEAD => true,
        ref method => {
            return http::build_error_response(
                StatusCode::NOT_IMPLEMENTED,
                &format!("Unsupported method ('{method}')"),
                false,
            );
        }
    };

    // "//host" must not turn into a protocol-relative Location
    let request_path = collapse_leading_slashes(parts.uri.path());
    let request_path = request_path.as_str();
    let resolved = root.resolve(request_path);

    let Ok(metadata) = fs::metadata(&resolved.path).await else {
        return not_found(is_head);
    };

    let mut file_path = resolved.path;
    if metadata.is_dir() {
        if !resolved.trailing_slash {
            let location = match parts.uri.query() {
                Some(query) => format!("{request_path}/?{query}"),
                None => format!("{request_path}/"),
            };
            return http::build_redirect_response(&location);
        }
        match find_index(&file_path).await {
            Some(index) => file_path = index,
            None => return serve_listing(&file_path, request_path, is_head).await,
        }
    } else if resolved.trailing_slash {
        return not_found(is_head);
    }

    serve_file(&file_path, &parts.headers, is_head).await
}

async fn find_index(dir: &Path) -> Option<PathBuf> {
    for name in INDEX_FILES {
        let candidate = dir.join(name);
        if fs::metadata(&candidate).await.is_ok_and(|m| m.is_file()) {
            return Some(candidate);
        }
    }
    None
}

async fn serve_listing(dir: &Path, request_path: &str, is_head: bool) -> Response<Full<Bytes>> {
    match listing::read_entries(dir).await {
        Ok(entries) => {
            let page = listing::render(&decode_path(request_path), &entries);
            http::build_html_response(page, is_head)
        }
        Err(e) => {
            logger::log_warning(&format!(
                "Cannot list directory '{}': {e}",
                dir.display()
            ));
            http::build_error_response(
                StatusCode::NOT_FOUND,
                "No permission to list directory",
                is_head,
            )
        }
    }
}

async fn serve_file(path: &Path, headers: &HeaderMap, is_head: bool) -> Response<Full<Bytes>> {
    // Missing or unreadable files are a plain 404
    let Ok(mut file) = fs::File::open(path).await else {
        return not_found(is_head);
    };

    let modified = file.metadata().await.and_then(|m| m.modified()).ok();

    if let (Some(modified), Some(since)) = (modified, if_modified_since(headers)) {
        if date::not_modified_since(modified, since) {
            return http::build_not_modified_response();
        }
    }

    let mut data = Vec::new();
    if let Err(e) = file.read_to_end(&mut data).await {
        logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
        return not_found(is_head);
    }

    let last_modified = modified.map(date::format_http_date);
    http::build_file_response(
        Bytes::from(data),
        mime::guess(path),
        last_modified.as_deref(),
        is_head,
    )
}

/// `If-Modified-Since`, honored only when `If-None-Match` is absent
fn if_modified_since(headers: &HeaderMap) -> Option<&str> {
    if headers.contains_key(IF_NONE_MATCH) {
        return None;
    }
    headers.get(IF_MODIFIED_SINCE)?.to_str().ok()
}

fn not_found(is_head: bool) -> Response<Full<Bytes>> {
    http::build_error_response(StatusCode::NOT_FOUND, "File not found", is_head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE, LAST_MODIFIED, LOCATION};
    use hyper::Request;

    fn site() -> (tempfile::TempDir, DocumentRoot) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), b"<h1>home</h1>").unwrap();
        std::fs::write(dir.path().join("app.js"), b"console.log(1);").unwrap();
        std::fs::create_dir(dir.path().join("maps")).unwrap();
        std::fs::write(dir.path().join("maps").join("c1a0.bsp"), b"BSP").unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs").join("index.htm"), b"docs").unwrap();
        let root = DocumentRoot::open(dir.path()).unwrap();
        (dir, root)
    }

    fn parts(method: Method, uri: &str) -> Parts {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_serves_file_with_type_and_length() {
        let (_dir, root) = site();
        let response = serve(&parts(Method::GET, "/app.js"), &root).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/javascript");
        assert_eq!(response.headers()[CONTENT_LENGTH], "15");
        assert!(response.headers().contains_key(LAST_MODIFIED));
        assert_eq!(body_string(response).await, "console.log(1);");
    }

    #[tokio::test]
    async fn test_root_serves_index_html() {
        let (_dir, root) = site();
        let response = serve(&parts(Method::GET, "/"), &root).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "<h1>home</h1>");
    }

    #[tokio::test]
    async fn test_falls_back_to_index_htm() {
        let (_dir, root) = site();
        let response = serve(&parts(Method::GET, "/docs/"), &root).await;
        assert_eq!(body_string(response).await, "docs");
    }

    #[tokio::test]
    async fn test_directory_without_slash_redirects() {
        let (_dir, root) = site();
        let response = serve(&parts(Method::GET, "/maps?sort=1"), &root).await;
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[LOCATION], "/maps/?sort=1");
    }

    #[tokio::test]
    async fn test_leading_slashes_collapse_in_redirect() {
        let (dir, root) = site();
        std::fs::create_dir(dir.path().join("example.com")).unwrap();

        let response = serve(&parts(Method::GET, "//example.com"), &root).await;
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[LOCATION], "/example.com/");

        let response = serve(&parts(Method::GET, "///maps?x=1"), &root).await;
        assert_eq!(response.headers()[LOCATION], "/maps/?x=1");
    }

    #[tokio::test]
    async fn test_directory_without_index_is_listed() {
        let (_dir, root) = site();
        let response = serve(&parts(Method::GET, "/maps/"), &root).await;
        assert_eq!(response.status(), StatusCode::OK);
        let page = body_string(response).await;
        assert!(page.contains("Directory listing for /maps/"));
        assert!(page.contains("<a href=\"c1a0.bsp\">c1a0.bsp</a>"));
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let (_dir, root) = site();
        let response = serve(&parts(Method::GET, "/missing.js"), &root).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_file_with_trailing_slash_is_404() {
        let (_dir, root) = site();
        let response = serve(&parts(Method::GET, "/app.js/"), &root).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_head_has_length_but_no_body() {
        let (_dir, root) = site();
        let response = serve(&parts(Method::HEAD, "/index.html"), &root).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_LENGTH], "13");
        assert!(body_string(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_method_is_501() {
        let (_dir, root) = site();
        let response = serve(&parts(Method::POST, "/index.html"), &root).await;
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
        assert!(body_string(response)
            .await
            .contains("Unsupported method ('POST')"));
    }

    #[tokio::test]
    async fn test_if_modified_since() {
        let (_dir, root) = site();
        let first = serve(&parts(Method::GET, "/app.js"), &root).await;
        let last_modified = first.headers()[LAST_MODIFIED].to_str().unwrap().to_string();

        let mut cached = parts(Method::GET, "/app.js");
        cached
            .headers
            .insert(IF_MODIFIED_SINCE, last_modified.parse().unwrap());
        let response = serve(&cached, &root).await;
        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);

        cached
            .headers
            .insert(IF_NONE_MATCH, "\"abc\"".parse().unwrap());
        let response = serve(&cached, &root).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stale_if_modified_since_serves_file() {
        let (_dir, root) = site();
        let mut request = parts(Method::GET, "/app.js");
        request.headers.insert(
            IF_MODIFIED_SINCE,
            "Thu, 01 Jan 1970 00:00:00 GMT".parse().unwrap(),
        );
        let response = serve(&request, &root).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
