use crate::core::{Backend, InputFile, RecordSource};
use crate::error::{Result, SampleError};
use memchr::memchr;
use memmap2::Mmap;

/// Memory-mapped backend: newline search directly over the mapped bytes.
pub struct MappedSource<B = Mmap> {
    map: B,
    lines_per_record: usize,
    position: usize,
    group_start: usize,
    lines_in_group: usize,
}

impl MappedSource<Mmap> {
    pub fn open(input: &InputFile, lines_per_record: usize) -> Result<Self> {
        Ok(Self::new(input.mmap()?, lines_per_record))
    }
}

impl<B: AsRef<[u8]>> MappedSource<B> {
    pub fn new(map: B, lines_per_record: usize) -> Self {
        Self {
            map,
            lines_per_record: lines_per_record.max(1),
            position: 0,
            group_start: 0,
            lines_in_group: 0,
        }
    }
}

// 下一行的结束位置（含换行符）
fn line_end(bytes: &[u8], from: usize) -> usize {
    memchr(b'\n', &bytes[from..]).map_or(bytes.len(), |i| from + i + 1)
}

impl<B: AsRef<[u8]>> RecordSource for MappedSource<B> {
    fn backend(&self) -> Backend {
        Backend::Mapped
    }

    fn lines_per_record(&self) -> usize {
        self.lines_per_record
    }

    fn next_boundary(&mut self) -> Result<Option<u64>> {
        let bytes = self.map.as_ref();

        while self.position < bytes.len() {
            self.position = line_end(bytes, self.position);
            self.lines_in_group += 1;

            if self.lines_in_group == self.lines_per_record {
                let start = self.group_start;
                self.group_start = self.position;
                self.lines_in_group = 0;
                return Ok(Some(start as u64));
            }
        }
        Ok(None)
    }

    fn begin_materialize(&mut self, _sorted: bool) -> Result<()> {
        Ok(())
    }

    fn read_record(&mut self, offset: u64, out: &mut Vec<u8>) -> Result<usize> {
        let bytes = self.map.as_ref();
        let start = usize::try_from(offset)
            .ok()
            .filter(|&s| s <= bytes.len())
            .ok_or_else(|| {
                SampleError::FileAccess(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("offset {} is outside the mapped file", offset),
                ))
            })?;

        let mut end = start;
        for _ in 0..self.lines_per_record {
            if end >= bytes.len() {
                break;
            }
            end = line_end(bytes, end);
        }

        out.extend_from_slice(&bytes[start..end]);
        if end > start && bytes[end - 1] != b'\n' {
            out.push(b'\n');
        }
        Ok(end - start)
    }
}
