//! Logger module
//!
//! Provides logging utilities for the file server:
//! - Startup banner and shutdown notice (stdout)
//! - Access log, one line per request (stdout)
//! - Errors and warnings (stderr)

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;

fn write_info(message: &str) {
    println!("{message}");
}

fn write_error(message: &str) {
    eprintln!("{message}");
}

/// Announce the bound address, IPv6 hosts bracketed in the URL
pub fn log_server_start(addr: &SocketAddr) {
    write_info(&format!(
        "Serving HTTP on {} port {} (http://{addr}/) ...",
        addr.ip(),
        addr.port()
    ));
}

pub fn log_access(entry: &AccessLogEntry) {
    write_info(&entry.format());
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_shutdown() {
    write_info("\nKeyboard interrupt received, exiting.");
}
