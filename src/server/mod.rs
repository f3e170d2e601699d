// Server module
// Binds the listener and runs the accept loop, one connection at a time

pub mod connection;
pub mod listener;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::error::ServeError;
use crate::handler::DocumentRoot;
use crate::logger;

pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    root: Arc<DocumentRoot>,
    timeout: Duration,
}

impl Server {
    /// Bind the configured address. Must be called from within a Tokio runtime.
    pub fn bind(config: &Config, root: DocumentRoot) -> Result<Self, ServeError> {
        let addr = config.socket_addr();
        let listener = listener::bind(addr)?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServeError::Bind { addr, source })?;

        Ok(Self {
            listener,
            local_addr,
            root: Arc::new(root),
            timeout: config.connection_timeout(),
        })
    }

    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until the process is killed
    pub async fn run(self) {
        self.accept_loop().await;
    }

    /// Serve until `shutdown` completes. A connection in flight is dropped.
    pub async fn run_until(self, shutdown: impl Future<Output = ()>) {
        tokio::select! {
            () = self.accept_loop() => {}
            () = shutdown => {}
        }
    }

    async fn accept_loop(&self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer_addr)) => {
                    connection::serve_connection(
                        stream,
                        peer_addr,
                        Arc::clone(&self.root),
                        self.timeout,
                    )
                    .await;
                }
                Err(e) => {
                    logger::log_error(&format!("Failed to accept connection: {e}"));
                }
            }
        }
    }
}
