//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Log level comes from config; `RUST_LOG` overrides it when set

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Filter directives applied when `RUST_LOG` is not set.
pub fn default_directives(log_level: &str) -> String {
    format!("region_redirect={level},tower_http={level}", level = log_level)
}

/// Install the global tracing subscriber. Call once, from main.
pub fn init_logging(config: &ObservabilityConfig) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives("debug"), "region_redirect=debug,tower_http=debug");
        assert!(default_directives("warn").parse::<EnvFilter>().is_ok());
    }
}
