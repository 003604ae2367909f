//! CSV ingestion, column type inference and summary statistics.
//!
//! The tokenizer is naive: every comma separates fields and
//! quotes carry no meaning, so quoted fields containing commas are split.

use crate::dataset::{Column, ColumnKind, ColumnStats, DatasetSnapshot, NumericStats, Row, SampleRow};
use crate::errors::ParseError;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Non-null values kept per column as samples.
pub const SAMPLE_VALUE_LIMIT: usize = 10;
/// Rows re-expanded into name -> value lookups.
pub const SAMPLE_ROW_LIMIT: usize = 5;
/// A first value longer than this (in characters) marks a column as free text.
pub const TEXT_LENGTH_THRESHOLD: usize = 100;

const NULL_MARKERS: [&str; 3] = ["", "NaN", "null"];
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Profile CSV text held in memory.
pub fn profile_csv(text: &str) -> Result<DatasetSnapshot, ParseError> {
    profile_bytes(text.as_bytes())
}

/// Profile raw file contents. Invalid UTF-8 is reported as a parse error.
pub fn profile_bytes(bytes: &[u8]) -> Result<DatasetSnapshot, ParseError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut lines = read_lines(bytes)?.into_iter();

    let header = lines.next().ok_or(ParseError::Empty)?;
    let rows: Vec<Row> = lines.map(Row::new).collect();

    let columns: Vec<Column> = header
        .iter()
        .enumerate()
        .map(|(index, name)| profile_column(name, index, &rows))
        .collect();

    let sample_rows = rows
        .iter()
        .take(SAMPLE_ROW_LIMIT)
        .map(|row| SampleRow::from_row(&header, row))
        .collect();

    debug!(
        rows = rows.len(),
        columns = columns.len(),
        "profiled dataset"
    );

    Ok(DatasetSnapshot {
        columns,
        row_count: rows.len(),
        sample_rows,
    })
}

/// Read and profile a file from disk.
pub async fn profile_file(path: impl AsRef<Path>) -> Result<DatasetSnapshot, ParseError> {
    let path = path.as_ref();
    info!("Profiling {}", path.display());
    let bytes = tokio::fs::read(path).await?;
    profile_bytes(&bytes)
}

/// A value counts toward statistics unless it is absent or one of the null markers.
pub fn is_non_null(value: &str) -> bool {
    !NULL_MARKERS.contains(&value)
}

/// Numeric predicate shared by type inference and the mean: Rust's `f64`
/// grammar on the trimmed value, finite results only.
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

fn read_lines(bytes: &[u8]) -> Result<Vec<Vec<String>>, ParseError> {
    // Default terminator: `\n`, `\r\n` and a lone `\r` all end a line.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(bytes);

    let mut lines = Vec::new();
    for record in reader.records() {
        let record = record?;
        let fields: Vec<String> = record.iter().map(|f| f.trim().to_string()).collect();
        // Whitespace-only lines come through as a single blank field.
        if fields.len() <= 1 && fields.iter().all(String::is_empty) {
            continue;
        }
        lines.push(fields);
    }
    Ok(lines)
}

fn profile_column(name: &str, index: usize, rows: &[Row]) -> Column {
    let non_null: Vec<&str> = rows
        .iter()
        .filter_map(|row| row.get(index))
        .filter(|value| is_non_null(value))
        .collect();

    let unique_count = non_null.iter().collect::<HashSet<_>>().len();
    let missing_count = rows.len() - non_null.len();

    Column {
        name: name.to_string(),
        kind: infer_kind(&non_null),
        sample_values: non_null
            .iter()
            .take(SAMPLE_VALUE_LIMIT)
            .map(|v| v.to_string())
            .collect(),
        stats: ColumnStats {
            unique_count,
            missing_count,
        },
    }
}

fn infer_kind(non_null: &[&str]) -> ColumnKind {
    let Some(first) = non_null.first() else {
        return ColumnKind::Unknown;
    };

    let numbers: Option<Vec<f64>> = non_null.iter().map(|v| parse_number(v)).collect();
    if let Some(stats) = numbers.as_deref().and_then(NumericStats::from_values) {
        return ColumnKind::Numeric(stats);
    }

    if first.chars().count() > TEXT_LENGTH_THRESHOLD {
        ColumnKind::Text
    } else {
        ColumnKind::Categorical
    }
}
