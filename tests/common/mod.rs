//! Fixture helpers for integration tests.
//!
//! For assertion helpers, use `tabfeed::testing`.

#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

use tabfeed::data::io::{DataSource, SourceConfig};
use tabfeed::StreamingLoader;

#[allow(unused_imports)]
pub use tabfeed::testing::{assert_rows_eq, generate_csv, to_rows, CsvFixture, ExpectedRow};

/// Write `bytes` to a fresh temporary file.
pub fn temp_csv(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(bytes).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

/// Loader over a memory region.
pub fn memory_loader<'a>(
    data: &'a [u8],
    label: usize,
    features: &[usize],
    header: bool,
) -> StreamingLoader<'a> {
    let config = SourceConfig::builder()
        .source(DataSource::memory(data))
        .has_header(header)
        .label_column(label)
        .feature_columns(features.to_vec())
        .build()
        .expect("valid config");
    StreamingLoader::new(config).expect("open memory source")
}

/// Loader over a generated fixture: features first, label last.
pub fn fixture_config<'a>(source: DataSource<'a>, n_features: usize, header: bool) -> SourceConfig<'a> {
    SourceConfig::builder()
        .source(source)
        .has_header(header)
        .label_column(n_features)
        .feature_columns((0..n_features).collect::<Vec<_>>())
        .build()
        .expect("valid config")
}

/// Fill with `capacity`-sized buffers until a short fill.
pub fn drain(loader: &mut StreamingLoader<'_>, capacity: usize) -> Vec<ExpectedRow> {
    drain_varying(loader, &[capacity])
}

/// Fill with buffer sizes taken cyclically from `capacities` until a short fill.
pub fn drain_varying(loader: &mut StreamingLoader<'_>, capacities: &[usize]) -> Vec<ExpectedRow> {
    let mut rows = Vec::new();
    for &capacity in capacities.iter().cycle() {
        let mut buffer = loader.record_buffer(capacity);
        let n = loader.fill(&mut buffer);
        rows.extend(to_rows(&buffer[..n]));
        if n < capacity {
            break;
        }
    }
    rows
}
