//! Access log format module
//!
//! Lines follow the Common Log Format with a local timestamp:
//! `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`

use chrono::{DateTime, Local};
use hyper::{Method, Uri, Version};
use std::fmt::Write;
use std::net::IpAddr;

/// Access log entry for one request/response pair
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: IpAddr,
    /// Time the request was received
    pub time: DateTime<Local>,
    /// "METHOD /path HTTP/x.y"
    pub request_line: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: u64,
}

impl AccessLogEntry {
    /// Create an entry stamped with the current time; status and size are filled in later
    pub fn new(remote_addr: IpAddr, method: &Method, uri: &Uri, version: Version) -> Self {
        Self {
            remote_addr: remote_addr.to_canonical(),
            time: Local::now(),
            request_line: format!("{method} {uri} {version:?}"),
            status: 0,
            body_bytes: 0,
        }
    }

    pub fn format(&self) -> String {
        let body_bytes = if self.body_bytes == 0 {
            "-".to_string()
        } else {
            self.body_bytes.to_string()
        };

        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y %H:%M:%S"),
            escape_control(&self.request_line),
            self.status,
            body_bytes,
        )
    }
}

/// Escape control characters so a request line cannot forge extra log lines
fn escape_control(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_control() {
            let _ = write!(out, "\\x{:02x}", u32::from(c));
        } else {
            out.push(c);
        }
    }
    out
}
