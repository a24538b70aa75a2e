//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! LookupResult (region, isp)
//!     → policy.rs (area check, then carriers in priority order)
//!     → matcher.rs (substring conditions)
//!     → Return: Destination (carrier, area fallback or generic)
//!
//! Policy Compilation (at startup):
//!     CatalogConfig
//!     → Compile matchers, keep carrier order
//!     → Freeze as immutable RoutingPolicy
//! ```
//!
//! # Design Decisions
//! - Policy compiled at startup, immutable at runtime
//! - Deterministic: same lookup result always selects the same destination
//! - First matching carrier wins (ordered by configuration)

pub mod matcher;
pub mod policy;

pub use policy::{Destination, RoutingPolicy};
