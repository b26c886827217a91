use crate::config::{IoMode, OrderMode, SamplerConfig};
use crate::core::{InputFile, MersenneTwister, RecordSource, SampleReport};
use crate::error::{Result, SampleError};
use crate::materialize;
use crate::sampling;
use crate::source::{MappedSource, SequentialSource};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, trace};

struct Selection {
    offsets: Vec<u64>,
    records_seen: u64,
}

/// Samples `path` and returns the selected records in output order.
pub fn run(config: &SamplerConfig, path: impl AsRef<Path>) -> Result<Vec<Vec<u8>>> {
    let mut records = Vec::new();
    execute(config, path.as_ref(), |record| {
        records.push(record.to_vec());
        Ok(())
    })?;
    Ok(records)
}

/// Samples `path` and streams the selected records to `out`.
pub fn run_to_writer<W: Write + ?Sized>(
    config: &SamplerConfig,
    path: impl AsRef<Path>,
    out: &mut W,
) -> Result<SampleReport> {
    let report = execute(config, path.as_ref(), |record| {
        out.write_all(record).map_err(SampleError::Output)
    })?;
    out.flush().map_err(SampleError::Output)?;
    Ok(report)
}

fn execute<F>(config: &SamplerConfig, path: &Path, mut emit: F) -> Result<SampleReport>
where
    F: FnMut(&[u8]) -> Result<()>,
{
    config.validate()?;
    let input = InputFile::new(path)?;

    let mut rng = match config.seed {
        Some(seed) => MersenneTwister::with_seed(seed),
        None => MersenneTwister::from_entropy(),
    };
    let seed = rng.seed_value();
    let lines = config.lines_per_offset;
    let sorted = config.order == OrderMode::Preserve;

    info!(
        path = %input.path().display(),
        size = input.size(),
        io_mode = %config.io_mode,
        seed = ?seed,
        "sampling"
    );

    let selection = match config.io_mode {
        IoMode::Sequential => {
            let mut source = SequentialSource::open(&input, lines)?;
            let selection = select(&mut source, config, &mut rng)?;
            materialize::for_each_record(&mut source, &selection.offsets, sorted, &mut emit)?;
            selection
        }
        IoMode::Mapped => {
            let mut source = MappedSource::open(&input, lines)?;
            let selection = select(&mut source, config, &mut rng)?;
            materialize::for_each_record(&mut source, &selection.offsets, sorted, &mut emit)?;
            selection
        }
        IoMode::Hybrid => {
            // 顺序扫描，映射输出；扫描句柄先释放
            let selection = {
                let mut scanner = SequentialSource::open(&input, lines)?;
                select(&mut scanner, config, &mut rng)?
            };
            let mut source = MappedSource::open(&input, lines)?;
            materialize::for_each_record(&mut source, &selection.offsets, sorted, &mut emit)?;
            selection
        }
    };

    let info = input.info();
    let report = SampleReport {
        path: info.path,
        file_size: info.size,
        records_seen: selection.records_seen,
        requested: config.sample_size,
        selected: selection.offsets.len(),
        lines_per_offset: lines,
        replacement: config.replacement,
        order: config.order,
        io_mode: config.io_mode,
        seed,
    };
    info!(
        records_seen = report.records_seen,
        selected = report.selected,
        "sample written"
    );
    Ok(report)
}

fn select<S: RecordSource + ?Sized>(
    source: &mut S,
    config: &SamplerConfig,
    rng: &mut MersenneTwister,
) -> Result<Selection> {
    debug!(backend = ?source.backend(), lines = source.lines_per_record(), "scanning");

    let outcome = sampling::sample(source, config, rng)?;
    trace!(offsets = ?outcome.reservoir.as_slice(), "reservoir before ordering");

    let mut offsets = outcome.reservoir.into_vec();
    sampling::order::apply(config.order, &mut offsets, rng);
    trace!(offsets = ?offsets, "reservoir after ordering");

    Ok(Selection {
        offsets,
        records_seen: outcome.records_seen,
    })
}
