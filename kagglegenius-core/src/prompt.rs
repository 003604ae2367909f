//! Prompt text and response schema for the analysis request

use crate::dataset::{Column, SampleRow};
use crate::report::Report;
use serde_json::{json, Value};

const ANALYST_PERSONA: &str = "You are a world-class Kaggle Grandmaster AI assistant.";

/// Renders the analysis prompt around the dataset metadata.
pub fn analysis_prompt(
    columns: &[Column],
    row_count: usize,
    sample_rows: &[SampleRow],
) -> Result<String, serde_json::Error> {
    let columns_json = serde_json::to_string(columns)?;
    let samples_json = serde_json::to_string(sample_rows)?;

    Ok(format!(
        "{ANALYST_PERSONA}
Analyze the following dataset metadata and suggest the best ML strategy.

Dataset Metadata:
- Total Rows: {row_count}
- Columns: {columns_json}
- Sample Rows: {samples_json}

Provide a comprehensive report strictly in JSON format including:
1. summary: A concise dataset summary.
2. problemType: classification, regression, clustering, or time-series.
3. targetSuggestion: The recommended target column name.
4. featureEngineering: Array of objects with title, description, reasoning.
5. modelRecommendations: Array of objects with modelName, suitability, pros, cons, and hyperparameters (param, range, description).
6. metricRationale: Object with recommendedMetric, why, alternatives (array).
7. edaInsights: Array of objects with observation, importance (high, medium, low).
8. baselineNotebook: A full Python script using pandas, sklearn, and a boosting library.
9. simulatedTraining:
   - logs: Array of 10 objects (epoch 1-10) with loss, val_loss, metric, val_metric.
   - finalMetricScore: The best validation score achieved.
   - featureImportance: Array of top 8 objects (feature, importance value 0-1).
   - confusionMatrix: 2x2 normalized array (if classification).
   - residuals: Array of 20 objects with predicted and actual values (if regression).
10. correlations: Array of objects (x, y, value) showing relationships between important features.
"
    ))
}

/// System instruction for the follow-up chat opened after a successful analysis.
pub fn chat_instruction(report: &Report) -> String {
    format!(
        "You are a Kaggle Grandmaster assistant. You have already analyzed the user's dataset and provided a report.
Context of dataset: {}. Problem: {}.
Answer follow-up questions about feature engineering, model selection, or implementation details.",
        report.summary, report.problem_type
    )
}

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn number() -> Value {
    json!({ "type": "NUMBER" })
}

fn array_of(items: Value) -> Value {
    json!({ "type": "ARRAY", "items": items })
}

fn object(properties: Value, required: &[&str]) -> Value {
    let mut schema = json!({ "type": "OBJECT", "properties": properties });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    schema
}

/// Gemini response schema mirroring [`Report`].
pub fn report_schema() -> Value {
    let feature_step = object(
        json!({ "title": string(), "description": string(), "reasoning": string() }),
        &["title", "description", "reasoning"],
    );

    let hyperparameter = object(
        json!({ "param": string(), "range": string(), "description": string() }),
        &[],
    );

    let model_recommendation = object(
        json!({
            "modelName": string(),
            "suitability": string(),
            "pros": array_of(string()),
            "cons": array_of(string()),
            "hyperparameters": array_of(hyperparameter),
        }),
        &["modelName", "suitability", "pros", "cons", "hyperparameters"],
    );

    let metric_rationale = object(
        json!({
            "recommendedMetric": string(),
            "why": string(),
            "alternatives": array_of(string()),
        }),
        &["recommendedMetric", "why", "alternatives"],
    );

    let eda_insight = object(
        json!({
            "observation": string(),
            "importance": { "type": "STRING", "enum": ["high", "medium", "low"] },
        }),
        &[],
    );

    let training_log = object(
        json!({
            "epoch": number(),
            "loss": number(),
            "val_loss": number(),
            "metric": number(),
            "val_metric": number(),
        }),
        &[],
    );

    let simulated_training = object(
        json!({
            "logs": array_of(training_log),
            "finalMetricScore": number(),
            "featureImportance": array_of(object(
                json!({ "feature": string(), "importance": number() }),
                &[],
            )),
            "confusionMatrix": array_of(array_of(number())),
            "residuals": array_of(object(
                json!({ "predicted": number(), "actual": number() }),
                &[],
            )),
        }),
        &["logs", "finalMetricScore", "featureImportance"],
    );

    let correlation = object(
        json!({ "x": string(), "y": string(), "value": number() }),
        &[],
    );

    object(
        json!({
            "summary": string(),
            "problemType": string(),
            "targetSuggestion": string(),
            "featureEngineering": array_of(feature_step),
            "modelRecommendations": array_of(model_recommendation),
            "metricRationale": metric_rationale,
            "edaInsights": array_of(eda_insight),
            "baselineNotebook": string(),
            "simulatedTraining": simulated_training,
            "correlations": array_of(correlation),
        }),
        &[
            "summary",
            "problemType",
            "targetSuggestion",
            "featureEngineering",
            "modelRecommendations",
            "metricRationale",
            "edaInsights",
            "baselineNotebook",
            "simulatedTraining",
            "correlations",
        ],
    )
}
