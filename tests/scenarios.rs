use linesample::core::MersenneTwister;
use linesample::materialize::collect_records;
use linesample::sampling::{order, sample_fixed};
use linesample::source::{collect_boundaries, MappedSource, SequentialSource};
use linesample::{run, IoMode, OrderMode, ReplacementMode, SampleError, SamplerConfig};
use std::collections::HashSet;
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

fn fixture(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

fn config(k: Option<usize>, lines: usize, order: OrderMode, seed: u32) -> SamplerConfig {
    SamplerConfig::configure(k, lines, ReplacementMode::Without, order, Some(seed)).unwrap()
}

#[test]
fn five_letters_three_kept_in_file_order() {
    let file = fixture(b"a\nb\nc\nd\ne\n");
    let cfg = config(Some(3), 1, OrderMode::Preserve, 42);

    let first = run(&cfg, file.path()).unwrap();
    assert_eq!(first, vec![b"b\n".to_vec(), b"c\n".to_vec(), b"e\n".to_vec()]);

    for mode in [IoMode::Sequential, IoMode::Mapped, IoMode::Hybrid] {
        assert_eq!(run(&cfg.clone().with_io_mode(mode), file.path()).unwrap(), first);
    }
}

#[test]
fn two_line_records_are_emitted_as_one_block() {
    let file = fixture(b"one\ntwo\nthree\nfour\n");
    for seed in 1..20 {
        let records = run(&config(Some(1), 2, OrderMode::Preserve, seed), file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert!(
            records[0] == b"one\ntwo\n" || records[0] == b"three\nfour\n",
            "unexpected record {:?}",
            String::from_utf8_lossy(&records[0])
        );
    }
}

#[test]
fn oversampling_returns_each_record_once() {
    let file = fixture(b"x\ny\nz\n");
    let mut records = run(&config(Some(10), 1, OrderMode::Shuffle, 9), file.path()).unwrap();
    records.sort();
    assert_eq!(records, vec![b"x\n".to_vec(), b"y\n".to_vec(), b"z\n".to_vec()]);
}

#[test]
fn without_size_shuffles_whole_file() {
    let lines: Vec<String> = (0..500).map(|i| format!("row-{}\n", i)).collect();
    let file = fixture(lines.concat().as_bytes());

    let records = run(&config(None, 1, OrderMode::Shuffle, 77), file.path()).unwrap();
    assert_eq!(records.len(), 500);
    let got: HashSet<Vec<u8>> = records.iter().cloned().collect();
    let want: HashSet<Vec<u8>> = lines.iter().map(|l| l.as_bytes().to_vec()).collect();
    assert_eq!(got, want);
    let file_order: Vec<Vec<u8>> = lines.iter().map(|l| l.as_bytes().to_vec()).collect();
    assert_ne!(records, file_order);
}

#[test]
fn with_replacement_fills_every_requested_slot() {
    let file = fixture(b"p\nq\n");
    let cfg = SamplerConfig::configure(Some(9), 1, ReplacementMode::With, OrderMode::Preserve, Some(5))
        .unwrap();
    let records = run(&cfg, file.path()).unwrap();
    assert_eq!(records.len(), 9);
    assert!(records.iter().all(|r| r == b"p\n" || r == b"q\n"));
    assert!(records.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn trailing_unterminated_line_is_sampled_with_newline() {
    let file = fixture(b"first\nlast");
    let records = run(&config(None, 1, OrderMode::Preserve, 1), file.path()).unwrap();
    assert_eq!(records, vec![b"first\n".to_vec(), b"last\n".to_vec()]);
}

#[test]
fn lines_longer_than_buffer_hint_survive_intact() {
    let long = "L".repeat(200_000);
    let file = fixture(format!("short\n{}\nend\n", long).as_bytes());
    for mode in [IoMode::Sequential, IoMode::Mapped, IoMode::Hybrid] {
        let records = run(
            &config(None, 1, OrderMode::Preserve, 4).with_io_mode(mode),
            file.path(),
        )
        .unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].len(), 200_001);
    }
}

#[test]
fn empty_file_yields_nothing() {
    let file = fixture(b"");
    for mode in [IoMode::Sequential, IoMode::Mapped, IoMode::Hybrid] {
        let records = run(&config(Some(4), 1, OrderMode::Shuffle, 2).with_io_mode(mode), file.path())
            .unwrap();
        assert!(records.is_empty());
    }
}

#[test]
fn stdin_path_is_refused() {
    let err = run(&SamplerConfig::default(), "-").unwrap_err();
    assert!(matches!(err, SampleError::StdinUnsupported));
}

#[test]
fn sorted_records_match_source_bytes() {
    let data: Vec<u8> = (0..300)
        .map(|i| format!("{}:{}\n", i, "#".repeat(i % 17)))
        .collect::<String>()
        .into_bytes();
    let all = collect_boundaries(&mut MappedSource::new(&data[..], 3)).unwrap();

    let mut rng = MersenneTwister::with_seed(31337);
    let outcome = sample_fixed(&mut MappedSource::new(&data[..], 3), 25, &mut rng).unwrap();
    let mut offsets = outcome.reservoir.into_vec();
    order::sort(&mut offsets);

    let mut sequential = SequentialSource::new(Cursor::new(data.clone()), 3);
    let records = collect_records(&mut sequential, &offsets, true).unwrap();

    for (offset, record) in offsets.iter().zip(&records) {
        let idx = all.binary_search(offset).unwrap();
        let end = all.get(idx + 1).map_or(data.len(), |&o| o as usize);
        assert_eq!(&data[*offset as usize..end], record.as_slice());
    }
}

#[test]
fn inclusion_frequency_converges_to_k_over_r() {
    let records = 10usize;
    let k = 3usize;
    let trials = 4000u32;
    let data: Vec<u8> = (0..records).map(|i| format!("{}\n", i)).collect::<String>().into_bytes();

    let mut hits = vec![0u32; records];
    for trial in 1..=trials {
        // 种子打散到整个 32 位空间，且为奇数
        let seed = trial.wrapping_mul(2_654_435_761) | 1;
        let mut rng = MersenneTwister::with_seed(seed);
        let outcome = sample_fixed(&mut MappedSource::new(&data[..], 1), k, &mut rng).unwrap();
        for &offset in outcome.reservoir.as_slice() {
            // 单字符行，偏移量 = 2 * 行号
            hits[(offset / 2) as usize] += 1;
        }
    }

    let expected = k as f64 / records as f64;
    for (record, &count) in hits.iter().enumerate() {
        let freq = f64::from(count) / f64::from(trials);
        assert!(
            (freq - expected).abs() < 0.04,
            "record {} kept with frequency {}, expected {}",
            record,
            freq,
            expected
        );
    }
}
