//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the redirect service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Range database location and read limits.
    pub database: DatabaseConfig,

    /// Destination URLs and the rules selecting them.
    pub catalog: CatalogConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Range database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path of the text database, relative to the working directory unless absolute.
    pub path: PathBuf,

    /// Upper bound for one lookup's read of the database, in milliseconds.
    /// 0 disables the bound.
    pub read_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("ipdata.txt"),
            read_timeout_ms: 5_000,
        }
    }
}

const GENERIC_URL: &str = "https://gh.dpik.top/https://github.com/kakaxi-1/IPTV/blob/main/iptv.txt";

/// Destination catalog.
///
/// Carriers are checked in order; the first whose substring occurs in the ISP
/// label wins.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Substring of the region label identifying the target area.
    pub area_marker: String,

    /// Carrier rules, in priority order.
    pub carriers: Vec<CarrierConfig>,

    /// Used when the area matched but no carrier did.
    pub area_fallback_url: String,

    /// Used when the area did not match.
    pub generic_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            area_marker: "–天津–".to_string(),
            carriers: vec![
                CarrierConfig::new(
                    "unicom",
                    "联通",
                    "https://gh.dpik.top/https://github.com/i320442/tv/blob/main/tjcu.txt",
                ),
                CarrierConfig::new(
                    "mobile",
                    "移动",
                    "https://gh.dpik.top/https://github.com/i320442/tv/blob/main/tjcm.txt",
                ),
                CarrierConfig::new(
                    "telecom",
                    "电信",
                    "https://gh.dpik.top/https://github.com/i320442/tv/blob/main/tjct.txt",
                ),
            ],
            area_fallback_url: GENERIC_URL.to_string(),
            generic_url: GENERIC_URL.to_string(),
        }
    }
}

/// One carrier rule.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CarrierConfig {
    /// Identifier for logging/metrics.
    pub label: String,

    /// Substring of the ISP label identifying the carrier.
    pub substring: String,

    /// Destination for this carrier.
    pub url: String,
}

impl CarrierConfig {
    pub fn new(label: impl Into<String>, substring: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            substring: substring.into(),
            url: url.into(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
