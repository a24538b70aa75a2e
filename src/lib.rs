//! Region-aware redirect service library.
//!
//! Resolves a client IPv4 address to a (region, ISP) pair using a flat text
//! range database, picks a destination URL from a configured catalog and
//! answers with an HTTP redirect.

pub mod config;
pub mod error;
pub mod geo;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ServerConfig;
pub use error::{LookupError, RedirectError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
