// Connection module
// Serves a single accepted TCP connection to completion

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;

use crate::handler::{self, DocumentRoot};
use crate::logger;

/// Serve one connection, returning once it is closed or times out.
///
/// Keep-alive is off, so a connection carries exactly one request and the
/// accept loop is never blocked by an idle client beyond `timeout`.
pub async fn serve_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    root: Arc<DocumentRoot>,
    timeout: Duration,
) {
    let io = TokioIo::new(stream);

    let mut builder = http1::Builder::new();
    builder.keep_alive(false).title_case_headers(true);

    let conn = builder.serve_connection(
        io,
        service_fn(move |req| handler::handle_request(req, Arc::clone(&root), peer_addr)),
    );

    match tokio::time::timeout(timeout, conn).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => logger::log_connection_error(&err),
        Err(_) => {
            logger::log_warning(&format!(
                "Connection from {peer_addr} timed out after {} seconds",
                timeout.as_secs()
            ));
        }
    }
}
