//! Range rows and the line tokenizer.

use crate::geo::address::AddressKey;

/// Minimum number of whitespace-separated fields in a usable row.
pub const MIN_FIELDS: usize = 4;

/// Region and ISP labels of a matched range.
///
/// Both fields are empty when no range matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupResult {
    pub region: String,
    pub isp: String,
}

impl LookupResult {
    pub fn new(region: impl Into<String>, isp: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            isp: isp.into(),
        }
    }

    /// True when no range matched.
    pub fn is_empty(&self) -> bool {
        self.region.is_empty() && self.isp.is_empty()
    }
}

/// One inclusive `[start, end]` range mapped to a region and ISP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRecord {
    pub start: AddressKey,
    pub end: AddressKey,
    pub region: String,
    pub isp: String,
}

/// Split a line on runs of ASCII whitespace.
///
/// Non-ASCII spaces such as U+3000 stay inside their field.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split(|c: char| c.is_ascii_whitespace())
        .filter(|t| !t.is_empty())
        .collect()
}

impl RangeRecord {
    /// Parse `<start> <end> <region> <isp> [ignored...]`.
    ///
    /// Returns `None` for blank lines, rows with fewer than four fields and rows
    /// whose endpoints are not IPv4 addresses. `start <= end` is not checked.
    pub fn parse_line(line: &str) -> Option<Self> {
        let fields = tokenize(line);
        if fields.len() < MIN_FIELDS {
            return None;
        }

        Some(Self {
            start: AddressKey::parse(fields[0])?,
            end: AddressKey::parse(fields[1])?,
            region: fields[2].to_string(),
            isp: fields[3].to_string(),
        })
    }

    /// Inclusive on both ends.
    pub fn contains(&self, key: AddressKey) -> bool {
        self.start <= key && key <= self.end
    }

    pub fn to_result(&self) -> LookupResult {
        LookupResult::new(self.region.clone(), self.isp.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_whitespace_runs() {
        assert_eq!(
            tokenize("1.0.0.0 \t 1.0.0.255   CN-A\tISP1\r"),
            vec!["1.0.0.0", "1.0.0.255", "CN-A", "ISP1"]
        );
        assert!(tokenize("   \t ").is_empty());
    }

    #[test]
    fn test_ideographic_space_kept_in_label() {
        let record = RangeRecord::parse_line("1.0.0.0 1.0.0.255 中国\u{3000}天津 联通").unwrap();
        assert_eq!(record.region, "中国\u{3000}天津");
        assert_eq!(record.isp, "联通");

        assert_eq!(tokenize("a\u{a0}b c"), vec!["a\u{a0}b", "c"]);
    }

    #[test]
    fn test_parse_line() {
        let record = RangeRecord::parse_line("1.0.0.0 1.0.0.255 CN-A ISP1").unwrap();
        assert_eq!(record.start, AddressKey(0x0100_0000));
        assert_eq!(record.end, AddressKey(0x0100_00FF));
        assert_eq!(record.region, "CN-A");
        assert_eq!(record.isp, "ISP1");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let record = RangeRecord::parse_line("1.0.0.0 1.0.0.255 CN-A ISP1 trailing note").unwrap();
        assert_eq!(record.to_result(), LookupResult::new("CN-A", "ISP1"));
    }

    #[test]
    fn test_malformed_rows_skipped() {
        assert_eq!(RangeRecord::parse_line(""), None);
        assert_eq!(RangeRecord::parse_line("1.0.0.0 1.0.0.255 CN-A"), None);
        assert_eq!(RangeRecord::parse_line("start end CN-A ISP1"), None);
        assert_eq!(RangeRecord::parse_line("1.0.0.0 1.0.0.300 CN-A ISP1"), None);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let record = RangeRecord::parse_line("1.0.0.0 1.0.0.255 CN-A ISP1").unwrap();
        assert!(record.contains(AddressKey::parse("1.0.0.0").unwrap()));
        assert!(record.contains(AddressKey::parse("1.0.0.255").unwrap()));
        assert!(!record.contains(AddressKey::parse("0.255.255.255").unwrap()));
        assert!(!record.contains(AddressKey::parse("1.0.1.0").unwrap()));
    }

    #[test]
    fn test_empty_result() {
        assert!(LookupResult::default().is_empty());
        assert!(!LookupResult::new("CN-A", "").is_empty());
    }
}
