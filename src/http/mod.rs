//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (client address, request ID)
//!     → [geo lookup + routing policy pick the destination]
//!     → response.rs (validate URL, 302 or plain-text diagnostic)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{client_address, X_REQUEST_ID};
pub use response::{redirect, validate_destination};
pub use server::{AppState, HttpServer};
