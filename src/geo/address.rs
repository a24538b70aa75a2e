//! Integer keys for IPv4 addresses.
//!
//! An address is packed big-endian into a `u32`, so integer order matches the
//! octet-wise order of dotted-decimal addresses and ranges compare directly.

use std::fmt;
use std::net::Ipv4Addr;

/// 32-bit key of an IPv4 address, used for range comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddressKey(pub u32);

impl AddressKey {
    /// Parse a dotted-decimal address, ignoring surrounding whitespace.
    ///
    /// Returns `None` for anything that is not a strict four-octet IPv4 address.
    /// Callers treat a `None` query as matching no range.
    pub fn parse(text: &str) -> Option<Self> {
        text.trim().parse::<Ipv4Addr>().ok().map(Self::from)
    }
}

impl From<Ipv4Addr> for AddressKey {
    fn from(addr: Ipv4Addr) -> Self {
        Self(u32::from(addr))
    }
}

impl From<AddressKey> for u32 {
    fn from(key: AddressKey) -> Self {
        key.0
    }
}

impl From<AddressKey> for Ipv4Addr {
    fn from(key: AddressKey) -> Self {
        Ipv4Addr::from(key.0)
    }
}

impl fmt::Display for AddressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Ipv4Addr::from(*self))
    }
}
