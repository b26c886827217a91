pub mod mapped;
pub mod sequential;

pub use mapped::MappedSource;
pub use sequential::SequentialSource;

use crate::core::RecordSource;
use crate::error::Result;

/// Drains every remaining boundary of `source`.
pub fn collect_boundaries<S: RecordSource + ?Sized>(source: &mut S) -> Result<Vec<u64>> {
    let mut offsets = Vec::new();
    while let Some(offset) = source.next_boundary()? {
        offsets.push(offset);
    }
    Ok(offsets)
}
