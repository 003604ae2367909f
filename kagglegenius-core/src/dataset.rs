//! Dataset snapshot types produced by the profiler

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Coarse column type tag, as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Categorical,
    Text,
    Unknown,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Categorical => "categorical",
            ColumnType::Text => "text",
            ColumnType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statistics only a numeric column carries.
///
/// The profiler always fills every field it can compute; summaries loaded from
/// elsewhere (the demo fixtures) may only carry a mean.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericStats {
    pub mean: f64,
    pub median: Option<f64>,
    /// Sample standard deviation; absent with fewer than two values.
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericStats {
    /// Returns `None` for an empty slice so a mean is never computed over zero values.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        let std = (values.len() > 1).then(|| {
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
            variance.sqrt()
        });

        Some(Self {
            mean,
            median: Some(median),
            std,
            min: sorted.first().copied(),
            max: sorted.last().copied(),
        })
    }
}

/// Inferred column type with its type-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnKind {
    Numeric(NumericStats),
    Categorical,
    Text,
    Unknown,
}

impl ColumnKind {
    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnKind::Numeric(_) => ColumnType::Numeric,
            ColumnKind::Categorical => ColumnType::Categorical,
            ColumnKind::Text => ColumnType::Text,
            ColumnKind::Unknown => ColumnType::Unknown,
        }
    }

    pub fn numeric_stats(&self) -> Option<&NumericStats> {
        match self {
            ColumnKind::Numeric(stats) => Some(stats),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnStats {
    pub unique_count: usize,
    pub missing_count: usize,
}

/// One named field across all rows of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ColumnRecord", try_from = "ColumnRecord")]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub sample_values: Vec<String>,
    pub stats: ColumnStats,
}

impl Column {
    pub fn column_type(&self) -> ColumnType {
        self.kind.column_type()
    }

    pub fn mean(&self) -> Option<f64> {
        self.kind.numeric_stats().map(|s| s.mean)
    }

    /// Share of rows missing a value, in percent. Zero for an empty dataset.
    pub fn missing_percent(&self, row_count: usize) -> f64 {
        if row_count == 0 {
            return 0.0;
        }
        self.stats.missing_count as f64 / row_count as f64 * 100.0
    }
}

/// Flat wire form of a column: `{ name, type, sampleValues, stats }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColumnRecord {
    name: String,
    #[serde(rename = "type")]
    column_type: ColumnType,
    #[serde(default)]
    sample_values: Vec<serde_json::Value>,
    #[serde(default)]
    stats: StatsRecord,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsRecord {
    #[serde(default)]
    unique_count: usize,
    #[serde(default)]
    missing_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    median: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    std: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
}

impl From<Column> for ColumnRecord {
    fn from(column: Column) -> Self {
        let column_type = column.column_type();
        let numeric = column.kind.numeric_stats();
        let stats = StatsRecord {
            unique_count: column.stats.unique_count,
            missing_count: column.stats.missing_count,
            mean: numeric.map(|s| s.mean),
            median: numeric.and_then(|s| s.median),
            std: numeric.and_then(|s| s.std),
            min: numeric.and_then(|s| s.min),
            max: numeric.and_then(|s| s.max),
        };

        Self {
            name: column.name,
            column_type,
            sample_values: column
                .sample_values
                .into_iter()
                .map(serde_json::Value::String)
                .collect(),
            stats,
        }
    }
}

impl TryFrom<ColumnRecord> for Column {
    type Error = String;

    fn try_from(record: ColumnRecord) -> Result<Self, Self::Error> {
        let kind = match record.column_type {
            ColumnType::Numeric => {
                let mean = record
                    .stats
                    .mean
                    .ok_or_else(|| format!("numeric column '{}' has no mean", record.name))?;
                ColumnKind::Numeric(NumericStats {
                    mean,
                    median: record.stats.median,
                    std: record.stats.std,
                    min: record.stats.min,
                    max: record.stats.max,
                })
            }
            ColumnType::Categorical => ColumnKind::Categorical,
            ColumnType::Text => ColumnKind::Text,
            ColumnType::Unknown => ColumnKind::Unknown,
        };

        // Fixture samples may be bare JSON numbers.
        let sample_values = record
            .sample_values
            .into_iter()
            .map(|v| match v {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect();

        Ok(Self {
            name: record.name,
            kind,
            sample_values,
            stats: ColumnStats {
                unique_count: record.stats.unique_count,
                missing_count: record.stats.missing_count,
            },
        })
    }
}

/// One data line: trimmed fields aligned positionally to the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    fields: Vec<String>,
}

impl Row {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// `None` when the line was shorter than the header.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A row re-expanded into a name -> value lookup, for display and prompt context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRow {
    fields: Vec<(String, Option<String>)>,
}

impl SampleRow {
    pub fn from_row(header: &[String], row: &Row) -> Self {
        let fields = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), row.get(i).map(str::to_string)))
            .collect();
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }
}

impl Serialize for SampleRow {
    // Header order; fields a short row lacks are omitted.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present: Vec<_> = self
            .fields
            .iter()
            .filter_map(|(n, v)| v.as_ref().map(|v| (n, v)))
            .collect();
        let mut map = serializer.serialize_map(Some(present.len()))?;
        for (name, value) in present {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// The complete profiling result for one uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSnapshot {
    pub columns: Vec<Column>,
    pub row_count: usize,
    pub sample_rows: Vec<SampleRow>,
}

impl DatasetSnapshot {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}
