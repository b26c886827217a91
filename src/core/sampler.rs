use crate::config::{IoMode, OrderMode, ReplacementMode};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Initial line buffer size. Longer lines grow the buffer instead of being cut.
pub const MAX_LINE_HINT: usize = 65_536;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Sequential,
    Mapped,
}

/// A newline-delimited file viewed as a stream of record start offsets.
///
/// A record is `lines_per_record()` consecutive lines. Both backends must
/// report the same boundaries for the same bytes:
///
/// * a final line without `\n` still counts as a line;
/// * a trailing group shorter than `lines_per_record()` is not a record.
pub trait RecordSource {
    fn backend(&self) -> Backend;

    fn lines_per_record(&self) -> usize;

    /// Start offset of the next complete record, or `None` at end of input.
    fn next_boundary(&mut self) -> Result<Option<u64>>;

    /// Prepares the second pass. `sorted` promises that the following
    /// `read_record` calls come in ascending offset order.
    fn begin_materialize(&mut self, sorted: bool) -> Result<()>;

    /// Appends the record starting at `offset` to `out`, always ending in
    /// `\n`. Returns the number of bytes taken from the source.
    fn read_record(&mut self, offset: u64, out: &mut Vec<u8>) -> Result<usize>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleReport {
    pub path: String,
    pub file_size: u64,
    pub records_seen: u64,
    pub requested: Option<usize>,
    pub selected: usize,
    pub lines_per_offset: usize,
    pub replacement: ReplacementMode,
    pub order: OrderMode,
    pub io_mode: IoMode,
    pub seed: Option<u32>,
}

impl SampleReport {
    /// Records missing from a without-replacement sample of fixed size.
    pub fn shortfall(&self) -> usize {
        match (self.replacement, self.requested) {
            (ReplacementMode::Without, Some(k)) => k.saturating_sub(self.selected),
            _ => 0,
        }
    }
}
