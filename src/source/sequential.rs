use crate::core::{Backend, InputFile, RecordSource, MAX_LINE_HINT};
use crate::error::{Result, SampleError};
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use tracing::trace;

/// Forward-cursor backend: one `read_until` per line.
pub struct SequentialSource<R> {
    reader: BufReader<R>,
    lines_per_record: usize,
    line: Vec<u8>,

    // 扫描状态
    position: u64,
    group_start: u64,
    lines_in_group: usize,

    // 输出状态
    sorted: bool,
    cursor: u64,
}

impl SequentialSource<File> {
    pub fn open(input: &InputFile, lines_per_record: usize) -> Result<Self> {
        Ok(Self::new(input.open()?, lines_per_record))
    }
}

impl<R: Read + Seek> SequentialSource<R> {
    pub fn new(inner: R, lines_per_record: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(MAX_LINE_HINT, inner),
            lines_per_record: lines_per_record.max(1),
            line: Vec::with_capacity(MAX_LINE_HINT),
            position: 0,
            group_start: 0,
            lines_in_group: 0,
            sorted: false,
            cursor: 0,
        }
    }

    fn seek_to(&mut self, offset: u64) -> Result<()> {
        // 有序时只向前滚动，保留缓冲区
        if self.sorted && offset >= self.cursor {
            let delta = i64::try_from(offset - self.cursor).map_err(|_| {
                SampleError::FileAccess(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "seek distance exceeds i64",
                ))
            })?;
            self.reader
                .seek_relative(delta)
                .map_err(SampleError::FileAccess)?;
        } else {
            self.reader
                .seek(SeekFrom::Start(offset))
                .map_err(SampleError::FileAccess)?;
        }
        self.cursor = offset;
        Ok(())
    }
}

impl<R: Read + Seek> RecordSource for SequentialSource<R> {
    fn backend(&self) -> Backend {
        Backend::Sequential
    }

    fn lines_per_record(&self) -> usize {
        self.lines_per_record
    }

    fn next_boundary(&mut self) -> Result<Option<u64>> {
        loop {
            self.line.clear();
            let n = self
                .reader
                .read_until(b'\n', &mut self.line)
                .map_err(SampleError::FileAccess)?;
            if n == 0 {
                return Ok(None);
            }

            self.position += n as u64;
            self.lines_in_group += 1;

            if self.lines_in_group == self.lines_per_record {
                let start = self.group_start;
                self.group_start = self.position;
                self.lines_in_group = 0;
                return Ok(Some(start));
            }
        }
    }

    fn begin_materialize(&mut self, sorted: bool) -> Result<()> {
        self.reader
            .seek(SeekFrom::Start(0))
            .map_err(SampleError::FileAccess)?;
        self.sorted = sorted;
        self.cursor = 0;
        trace!(sorted, "rewound sequential source");
        Ok(())
    }

    fn read_record(&mut self, offset: u64, out: &mut Vec<u8>) -> Result<usize> {
        self.seek_to(offset)?;

        let mut taken = 0;
        for _ in 0..self.lines_per_record {
            let n = self
                .reader
                .read_until(b'\n', out)
                .map_err(SampleError::FileAccess)?;
            if n == 0 {
                break;
            }
            taken += n;
        }
        self.cursor += taken as u64;

        if taken > 0 && out.last() != Some(&b'\n') {
            out.push(b'\n');
        }
        Ok(taken)
    }
}
