use linesample::core::{MersenneTwister, RecordSource};
use linesample::materialize::collect_records;
use linesample::sampling::{order, sample};
use linesample::source::{collect_boundaries, MappedSource, SequentialSource};
use linesample::{OrderMode, ReplacementMode, SamplerConfig};
use proptest::prelude::*;
use std::collections::HashSet;
use std::io::Cursor;

fn text() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(vec![b'a', b'b', b'\n', b'\n', b' ']), 0..400)
}

fn draw<S: RecordSource>(source: &mut S, config: &SamplerConfig, seed: u32) -> Vec<Vec<u8>> {
    let mut rng = MersenneTwister::with_seed(seed);
    let outcome = sample(source, config, &mut rng).unwrap();
    let mut offsets = outcome.reservoir.into_vec();
    order::apply(config.order, &mut offsets, &mut rng);
    collect_records(source, &offsets, config.order == OrderMode::Preserve).unwrap()
}

proptest! {
    #[test]
    fn prop_backends_agree_on_boundaries(data in text(), lines in 1usize..5) {
        let mapped = collect_boundaries(&mut MappedSource::new(&data[..], lines)).unwrap();
        let sequential =
            collect_boundaries(&mut SequentialSource::new(Cursor::new(data.clone()), lines)).unwrap();
        prop_assert_eq!(mapped, sequential);
    }

    #[test]
    fn prop_backends_emit_same_sample(
        data in text(),
        lines in 1usize..4,
        k in prop::option::of(1usize..30),
        with in any::<bool>(),
        preserve in any::<bool>(),
        seed in 1u32..u32::MAX,
    ) {
        let config = SamplerConfig::configure(
            k,
            lines,
            if with { ReplacementMode::With } else { ReplacementMode::Without },
            if preserve { OrderMode::Preserve } else { OrderMode::Shuffle },
            Some(seed),
        )
        .unwrap();

        let mapped = draw(&mut MappedSource::new(&data[..], lines), &config, seed);
        let sequential = draw(&mut SequentialSource::new(Cursor::new(data.clone()), lines), &config, seed);
        prop_assert_eq!(mapped, sequential);
    }

    #[test]
    fn prop_fixed_sample_cardinality(data in text(), k in 1usize..40, seed in 1u32..u32::MAX) {
        let total = collect_boundaries(&mut MappedSource::new(&data[..], 1)).unwrap().len();
        let mut rng = MersenneTwister::with_seed(seed);
        let outcome = linesample::sampling::sample_fixed(&mut MappedSource::new(&data[..], 1), k, &mut rng).unwrap();

        let offsets = outcome.reservoir.as_slice();
        prop_assert_eq!(offsets.len(), k.min(total));
        let unique: HashSet<u64> = offsets.iter().copied().collect();
        prop_assert_eq!(unique.len(), offsets.len());
    }

    #[test]
    fn prop_shuffle_preserves_multiset(mut values in prop::collection::vec(any::<u64>(), 0..200), seed in 1u32..u32::MAX) {
        let mut expected = values.clone();
        expected.sort_unstable();
        let mut rng = MersenneTwister::with_seed(seed);
        order::shuffle(&mut values, &mut rng);
        values.sort_unstable();
        prop_assert_eq!(values, expected);
    }

    #[test]
    fn prop_same_seed_same_draws(seed in 1u32..u32::MAX, n in 1usize..2000) {
        let mut a = MersenneTwister::with_seed(seed);
        let mut b = MersenneTwister::with_seed(seed);
        for _ in 0..n {
            prop_assert_eq!(a.next_u32(), b.next_u32());
        }
    }
}
