//! Fixed-schema analysis report returned by the inference service.
//!
//! The content is model-generated; deserialization checks structure only.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemType {
    #[serde(alias = "Classification")]
    Classification,
    #[serde(alias = "Regression")]
    Regression,
    #[serde(alias = "Clustering")]
    Clustering,
    #[serde(alias = "time_series", alias = "timeseries", alias = "Time-Series")]
    TimeSeries,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ProblemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProblemType::Classification => "classification",
            ProblemType::Regression => "regression",
            ProblemType::Clustering => "clustering",
            ProblemType::TimeSeries => "time-series",
            ProblemType::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    #[serde(alias = "High", alias = "HIGH")]
    High,
    #[serde(alias = "Medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "Low", alias = "LOW")]
    Low,
    /// Any other label, or none at all. Sorts last.
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureStep {
    pub title: String,
    pub description: String,
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hyperparameter {
    pub param: String,
    pub range: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecommendation {
    pub model_name: String,
    pub suitability: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub hyperparameters: Vec<Hyperparameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRationale {
    pub recommended_metric: String,
    pub why: String,
    pub alternatives: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdaInsight {
    pub observation: String,
    pub importance: Importance,
}

/// One simulated epoch. Field names are snake_case on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingLog {
    #[serde(deserialize_with = "epoch_number")]
    pub epoch: u32,
    pub loss: f64,
    pub val_loss: f64,
    pub metric: f64,
    pub val_metric: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Residual {
    pub predicted: f64,
    pub actual: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedTraining {
    pub logs: Vec<TrainingLog>,
    pub final_metric_score: f64,
    pub feature_importance: Vec<FeatureImportance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confusion_matrix: Option<Vec<Vec<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residuals: Option<Vec<Residual>>,
}

/// The schema types epochs as NUMBER, so `3.0` arrives as often as `3`.
fn epoch_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 || value > u32::MAX as f64 {
        return Err(serde::de::Error::custom(format!("invalid epoch {}", value)));
    }
    Ok(value.round() as u32)
}

impl SimulatedTraining {
    /// Epoch with the highest validation metric.
    pub fn best_epoch(&self) -> Option<&TrainingLog> {
        self.logs
            .iter()
            .max_by(|a, b| a.val_metric.total_cmp(&b.val_metric))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Correlation {
    pub x: String,
    pub y: String,
    pub value: f64,
}

/// The model-generated ML strategy for one dataset snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub summary: String,
    pub problem_type: ProblemType,
    pub target_suggestion: String,
    pub feature_engineering: Vec<FeatureStep>,
    pub model_recommendations: Vec<ModelRecommendation>,
    pub metric_rationale: MetricRationale,
    pub eda_insights: Vec<EdaInsight>,
    pub baseline_notebook: String,
    pub simulated_training: SimulatedTraining,
    pub correlations: Vec<Correlation>,
}

impl Report {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Insights ordered high -> low, stable within a level.
    pub fn insights_by_importance(&self) -> Vec<&EdaInsight> {
        let mut insights: Vec<_> = self.eda_insights.iter().collect();
        insights.sort_by_key(|i| i.importance);
        insights
    }

    /// Feature importances ordered from most to least important.
    pub fn ranked_features(&self) -> Vec<&FeatureImportance> {
        let mut ranked: Vec<_> = self.simulated_training.feature_importance.iter().collect();
        ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        ranked
    }
}
