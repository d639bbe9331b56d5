//! Bounded fills reconstruct exactly what one unbounded fill produces.

mod common;

use common::{assert_rows_eq, drain, drain_varying, fixture_config, generate_csv, temp_csv};
use proptest::prelude::*;

use tabfeed::data::io::{DataSource, StreamingLoader};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn memory_fills_match_single_fill(
        n_rows in 0usize..40,
        n_features in 1usize..4,
        header in any::<bool>(),
        capacities in prop::collection::vec(1usize..9, 1..5),
    ) {
        let fixture = generate_csv(n_rows, n_features, header);

        let mut whole = StreamingLoader::new(
            fixture_config(DataSource::memory(fixture.as_bytes()), n_features, header),
        ).unwrap();
        let once = drain(&mut whole, n_rows + 1);

        let mut pieces = StreamingLoader::new(
            fixture_config(DataSource::memory(fixture.as_bytes()), n_features, header),
        ).unwrap();
        let split = drain_varying(&mut pieces, &capacities);

        assert_rows_eq(&once, &fixture.rows, "single fill");
        assert_rows_eq(&split, &once, "bounded fills");
    }

    #[test]
    fn file_fills_match_single_fill(
        n_rows in 0usize..30,
        n_features in 1usize..4,
        header in any::<bool>(),
        capacity in 1usize..6,
        chunk_size in 1usize..24,
    ) {
        let fixture = generate_csv(n_rows, n_features, header);
        let file = temp_csv(fixture.as_bytes());

        let mut config = fixture_config(DataSource::file(file.path()), n_features, header);
        config.chunk_size = chunk_size;
        let mut loader = StreamingLoader::new(config).unwrap();
        let rows = drain(&mut loader, capacity);

        assert_rows_eq(&rows, &fixture.rows, "file fills");
        prop_assert_eq!(loader.position(), fixture.text.len() as u64);
        prop_assert!(loader.last_error().is_none());
    }

    #[test]
    fn unterminated_last_line_survives_any_split(
        n_rows in 1usize..20,
        capacity in 1usize..5,
        chunk_size in 1usize..16,
    ) {
        let fixture = generate_csv(n_rows, 2, false);
        let trimmed = fixture.text.trim_end_matches('\n');
        let file = temp_csv(trimmed.as_bytes());

        let mut config = fixture_config(DataSource::file(file.path()), 2, false);
        config.chunk_size = chunk_size;
        let mut loader = StreamingLoader::new(config).unwrap();

        assert_rows_eq(&drain(&mut loader, capacity), &fixture.rows, "unterminated");
    }
}

#[test]
fn capacity_one_loop_counts_every_record() {
    let fixture = generate_csv(25, 2, true);
    let mut loader = StreamingLoader::new(
        fixture_config(DataSource::memory(fixture.as_bytes()), 2, true),
    )
    .unwrap();

    let mut buffer = loader.record_buffer(1);
    let mut count = 0;
    while loader.fill(&mut buffer) == 1 {
        assert_eq!(buffer[0].label(), fixture.rows[count].0);
        count += 1;
    }
    assert_eq!(count, 25);
}

#[test]
fn position_advances_monotonically() {
    let fixture = generate_csv(10, 1, false);
    let mut loader = StreamingLoader::new(
        fixture_config(DataSource::memory(fixture.as_bytes()), 1, false),
    )
    .unwrap();

    let mut buffer = loader.record_buffer(3);
    let mut last = loader.position();
    while loader.fill(&mut buffer) > 0 {
        assert!(loader.position() > last);
        last = loader.position();
    }
    assert_eq!(last, fixture.text.len() as u64);
}
