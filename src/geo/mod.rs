//! IP range database subsystem.
//!
//! # Data Flow
//! ```text
//! client address text
//!     → address.rs (dotted decimal → AddressKey)
//!     → database.rs (open source, scan rows in file order)
//!     → record.rs (tokenize line, parse RangeRecord, inclusive range check)
//!     → Return: LookupResult (empty on miss)
//! ```

pub mod address;
pub mod database;
pub mod record;

pub use address::AddressKey;
pub use database::{lookup_file, RangeDatabase};
pub use record::{LookupResult, RangeRecord};
