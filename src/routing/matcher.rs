//! Lookup result matching logic.
//!
//! # Design Decisions
//! - Labels are opaque strings; matching is plain substring containment
//! - Matching is case-sensitive (labels are usually CJK text)
//! - No regex to keep evaluation a handful of `str::contains` calls

use crate::geo::LookupResult;

/// Trait for matching lookup results against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the lookup result matches this condition.
    fn matches(&self, result: &LookupResult) -> bool;
}

/// Matches a marker substring inside the region label.
#[derive(Debug, Clone)]
pub struct RegionMarker {
    marker: String,
}

impl RegionMarker {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl Matcher for RegionMarker {
    fn matches(&self, result: &LookupResult) -> bool {
        result.region.contains(self.marker.as_str())
    }
}

/// Matches a substring inside the ISP label.
#[derive(Debug, Clone)]
pub struct IspSubstring {
    substring: String,
}

impl IspSubstring {
    pub fn new(substring: impl Into<String>) -> Self {
        Self {
            substring: substring.into(),
        }
    }
}

impl Matcher for IspSubstring {
    fn matches(&self, result: &LookupResult) -> bool {
        result.isp.contains(self.substring.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_marker() {
        let matcher = RegionMarker::new("–天津–");

        assert!(matcher.matches(&LookupResult::new("中国–天津–天津–南开区", "")));
        // The marker needs both separators, not just the city name.
        assert!(!matcher.matches(&LookupResult::new("中国–天津", "联通")));
        assert!(!matcher.matches(&LookupResult::new("中国–北京–北京–海淀区", "联通")));
        assert!(!matcher.matches(&LookupResult::default()));
    }

    #[test]
    fn test_isp_substring() {
        let matcher = IspSubstring::new("联通");

        assert!(matcher.matches(&LookupResult::new("", "中国联通")));
        assert!(!matcher.matches(&LookupResult::new("联通", "电信")));
    }
}
