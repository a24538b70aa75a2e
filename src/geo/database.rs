//! Line-oriented range database reader.
//!
//! # Design Decisions
//! - Read fresh on every lookup; nothing is cached between calls
//! - Linear scan in file order, first match wins even when a later row is narrower
//! - Only an unreadable source is an error; bad rows are skipped

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{GeoResult, LookupError};
use crate::geo::address::AddressKey;
use crate::geo::record::{LookupResult, RangeRecord};

/// Single-use handle over one database source.
pub struct RangeDatabase<R> {
    source_name: String,
    reader: R,
}

impl RangeDatabase<BufReader<File>> {
    /// Open a database file.
    pub fn open(path: &Path) -> GeoResult<Self> {
        let source_name = path.display().to_string();
        let file = File::open(path).map_err(|e| LookupError::unavailable(&source_name, e))?;
        Ok(Self::from_reader(source_name, BufReader::new(file)))
    }
}

impl<R: BufRead> RangeDatabase<R> {
    /// Wrap an already-open line source. `source_name` is used in diagnostics.
    pub fn from_reader(source_name: impl Into<String>, reader: R) -> Self {
        Self {
            source_name: source_name.into(),
            reader,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Iterate the well-formed rows in file order.
    pub fn records(self) -> Records<R> {
        Records {
            source_name: self.source_name,
            reader: self.reader,
            buf: Vec::new(),
            failed: false,
        }
    }

    /// Find the region and ISP of `address`.
    ///
    /// A miss, or a query that is not an IPv4 address, yields an empty result.
    pub fn lookup(self, address: &str) -> GeoResult<LookupResult> {
        let source_name = self.source_name.clone();
        let Some(key) = AddressKey::parse(address) else {
            tracing::debug!(address = %address, source = %source_name, "Unparseable query address, treated as miss");
            return Ok(LookupResult::default());
        };

        let mut scanned = 0usize;
        for record in self.records() {
            let record = record?;
            scanned += 1;
            if record.contains(key) {
                tracing::debug!(
                    address = %key,
                    start = %record.start,
                    end = %record.end,
                    region = %record.region,
                    isp = %record.isp,
                    scanned,
                    "Range matched"
                );
                return Ok(record.to_result());
            }
        }

        tracing::debug!(address = %key, scanned, source = %source_name, "No range matched");
        Ok(LookupResult::default())
    }
}

/// Open `path`, look up `address` and close the file again.
pub fn lookup_file(path: &Path, address: &str) -> GeoResult<LookupResult> {
    RangeDatabase::open(path)?.lookup(address)
}

/// Iterator over the usable rows of a database.
///
/// Lines are decoded lossily so a stray non-UTF-8 byte only affects its own row.
/// A line is buffered whole with no length cap, so a source without newlines is
/// read into memory in one piece.
/// After a read error the iterator yields that error once and then ends.
pub struct Records<R> {
    source_name: String,
    reader: R,
    buf: Vec<u8>,
    failed: bool,
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = GeoResult<RangeRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&self.buf);
                    if let Some(record) = RangeRecord::parse_line(&line) {
                        return Some(Ok(record));
                    }
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(LookupError::unavailable(&self.source_name, e)));
                }
            }
        }
    }
}
