//! Bundled demo datasets with pre-built reports, usable without network access.

use crate::dataset::Column;
use crate::errors::{GeniusError, Result};
use crate::report::Report;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoKind {
    Titanic,
    Housing,
    Fraud,
}

impl DemoKind {
    pub const ALL: [DemoKind; 3] = [DemoKind::Titanic, DemoKind::Housing, DemoKind::Fraud];

    pub fn as_str(&self) -> &'static str {
        match self {
            DemoKind::Titanic => "titanic",
            DemoKind::Housing => "housing",
            DemoKind::Fraud => "fraud",
        }
    }

    fn fixture(&self) -> &'static str {
        match self {
            DemoKind::Titanic => include_str!("../fixtures/titanic.json"),
            DemoKind::Housing => include_str!("../fixtures/housing.json"),
            DemoKind::Fraud => include_str!("../fixtures/fraud.json"),
        }
    }
}

impl std::str::FromStr for DemoKind {
    type Err = GeniusError;

    fn from_str(s: &str) -> Result<Self> {
        DemoKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GeniusError::UnknownDemo(s.to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoDataset {
    pub name: String,
    /// Short label such as "Classification" or "Imbalanced Tabular".
    pub category: String,
    pub row_count: usize,
    pub columns: Vec<Column>,
    pub report: Report,
}

pub fn load_demo(kind: DemoKind) -> Result<DemoDataset> {
    let dataset: DemoDataset = serde_json::from_str(kind.fixture())
        .map_err(crate::errors::AnalysisError::InvalidReport)?;
    Ok(dataset)
}
