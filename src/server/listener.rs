// Listener module
// Creates the TCP listener the accept loop runs on

use socket2::{Domain, Protocol, Socket, Type};
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::TcpListener;

use crate::error::ServeError;
use crate::logger;

/// Create a `TcpListener` bound to `addr`.
///
/// `SO_REUSEADDR` is set on Unix so a restart is not blocked by sockets in
/// `TIME_WAIT`; a port held by another listener still fails to bind. On the
/// IPv6 wildcard address the socket is dual-stack.
///
/// Must be called from within a Tokio runtime.
pub fn create_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;

    if addr.is_ipv6() && addr.ip().is_unspecified() {
        socket.set_only_v6(false)?;
    }

    #[cfg(unix)]
    socket.set_reuse_address(true)?;

    // Set non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

/// Bind `addr`, falling back to `0.0.0.0` when the IPv6 wildcard cannot be used
///
/// An address already in use is never retried.
pub fn bind(addr: SocketAddr) -> Result<TcpListener, ServeError> {
    match create_listener(addr) {
        Ok(listener) => Ok(listener),
        Err(e)
            if addr.is_ipv6()
                && addr.ip().is_unspecified()
                && e.kind() != std::io::ErrorKind::AddrInUse =>
        {
            let fallback = SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), addr.port());
            logger::log_warning(&format!(
                "Cannot listen on {addr} ({e}), falling back to {fallback}"
            ));
            create_listener(fallback).map_err(|source| ServeError::Bind {
                addr: fallback,
                source,
            })
        }
        Err(source) => Err(ServeError::Bind { addr, source }),
    }
}
