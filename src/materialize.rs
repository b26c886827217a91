use crate::core::RecordSource;
use crate::error::Result;

/// Re-reads each offset from `source` and hands the record bytes to `emit`.
///
/// `sorted` must only be set when `offsets` is ascending; the sequential
/// backend then rolls its cursor forward instead of seeking from the start.
pub fn for_each_record<S, F>(source: &mut S, offsets: &[u64], sorted: bool, mut emit: F) -> Result<u64>
where
    S: RecordSource + ?Sized,
    F: FnMut(&[u8]) -> Result<()>,
{
    source.begin_materialize(sorted)?;

    let mut record = Vec::new();
    let mut bytes = 0u64;
    for &offset in offsets {
        record.clear();
        source.read_record(offset, &mut record)?;
        bytes += record.len() as u64;
        emit(&record)?;
    }
    Ok(bytes)
}

pub fn collect_records<S>(source: &mut S, offsets: &[u64], sorted: bool) -> Result<Vec<Vec<u8>>>
where
    S: RecordSource + ?Sized,
{
    let mut records = Vec::with_capacity(offsets.len());
    for_each_record(source, offsets, sorted, |record| {
        records.push(record.to_vec());
        Ok(())
    })?;
    Ok(records)
}
