//! Request inspection.
//!
//! # Responsibilities
//! - Determine the client address the lookup is keyed on
//! - Read the request ID set by the request-id middleware
//!
//! # Design Decisions
//! - Proxy headers are taken at face value; the first X-Forwarded-For hop wins
//! - The result is never empty but is not guaranteed to be a valid address

use std::net::IpAddr;

use axum::http::HeaderMap;

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const CLIENT_IP: &str = "client-ip";
pub const X_REQUEST_ID: &str = "x-request-id";

/// Address used when nothing else identifies the client.
pub const LOOPBACK_DEFAULT: &str = "127.0.0.1";

/// Resolve the client address with a fixed precedence:
/// first `X-Forwarded-For` entry, `Client-IP`, the peer address, loopback.
///
/// Blank values fall through to the next source, so the result is never empty.
pub fn client_address(headers: &HeaderMap, peer: Option<IpAddr>) -> String {
    let forwarded = non_empty(headers, X_FORWARDED_FOR)
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(first) = forwarded {
        return first.to_string();
    }

    if let Some(client_ip) = non_empty(headers, CLIENT_IP).map(str::trim).filter(|v| !v.is_empty()) {
        return client_ip.to_string();
    }

    match peer {
        Some(ip) => ip.to_string(),
        None => LOOPBACK_DEFAULT.to_string(),
    }
}

fn non_empty<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

/// Request ID assigned by the middleware, or "unknown".
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
