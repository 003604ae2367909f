//! Plain-text rendering of snapshots and reports for the terminal

use kagglegenius_core::report::Importance;
use kagglegenius_core::{Column, DatasetSnapshot, Report};
use std::fmt;

const BAR_WIDTH: usize = 20;

/// Column table for a dataset of `row_count` rows.
pub struct ColumnsView<'a> {
    pub columns: &'a [Column],
    pub row_count: usize,
}

impl fmt::Display for ColumnsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<24} {:<12} {:>8} {:>14} {:>12}",
            "Column", "Type", "Unique", "Missing", "Mean"
        )?;
        for column in self.columns {
            let missing = format!(
                "{} ({:.1}%)",
                column.stats.missing_count,
                column.missing_percent(self.row_count)
            );
            let mean = column
                .mean()
                .map(|m| format!("{:.2}", m))
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                f,
                "{:<24} {:<12} {:>8} {:>14} {:>12}",
                column.name,
                column.column_type(),
                column.stats.unique_count,
                missing,
                mean
            )?;
        }
        Ok(())
    }
}

pub struct SnapshotView<'a>(pub &'a DatasetSnapshot);

impl fmt::Display for SnapshotView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        writeln!(f, "📊 Dataset Profile")?;
        writeln!(f, "==================")?;
        writeln!(f, "Rows: {}", snapshot.row_count)?;
        writeln!(f, "Columns: {}", snapshot.columns.len())?;
        writeln!(f)?;
        write!(
            f,
            "{}",
            ColumnsView {
                columns: &snapshot.columns,
                row_count: snapshot.row_count,
            }
        )?;

        if !snapshot.sample_rows.is_empty() {
            writeln!(f)?;
            writeln!(f, "Sample rows:")?;
            for row in &snapshot.sample_rows {
                let fields: Vec<String> = row
                    .iter()
                    .map(|(name, value)| format!("{}={}", name, value.unwrap_or("∅")))
                    .collect();
                writeln!(f, "  {}", fields.join(", "))?;
            }
        }
        Ok(())
    }
}

pub struct ReportView<'a>(pub &'a Report);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "🏆 Grandmaster Report")?;
        writeln!(f, "=====================")?;
        writeln!(f, "{}", report.summary)?;
        writeln!(f)?;
        writeln!(f, "Problem type: {}", report.problem_type)?;
        writeln!(f, "Target: {}", report.target_suggestion)?;

        let metric = &report.metric_rationale;
        writeln!(f)?;
        writeln!(f, "🎯 Metric: {}", metric.recommended_metric)?;
        writeln!(f, "   {}", metric.why)?;
        if !metric.alternatives.is_empty() {
            writeln!(f, "   Alternatives: {}", metric.alternatives.join(", "))?;
        }

        if !report.eda_insights.is_empty() {
            writeln!(f)?;
            writeln!(f, "🔍 EDA Insights:")?;
            for insight in report.insights_by_importance() {
                writeln!(f, "  [{}] {}", importance_label(insight.importance), insight.observation)?;
            }
        }

        if !report.feature_engineering.is_empty() {
            writeln!(f)?;
            writeln!(f, "🛠️  Feature Engineering:")?;
            for (i, step) in report.feature_engineering.iter().enumerate() {
                writeln!(f, "  {}. {}: {}", i + 1, step.title, step.description)?;
                writeln!(f, "     Why: {}", step.reasoning)?;
            }
        }

        if !report.model_recommendations.is_empty() {
            writeln!(f)?;
            writeln!(f, "🤖 Models:")?;
            for model in &report.model_recommendations {
                writeln!(f, "  • {} ({})", model.model_name, model.suitability)?;
                if !model.pros.is_empty() {
                    writeln!(f, "    + {}", model.pros.join("; "))?;
                }
                if !model.cons.is_empty() {
                    writeln!(f, "    - {}", model.cons.join("; "))?;
                }
                for hp in &model.hyperparameters {
                    writeln!(f, "    {} in {}: {}", hp.param, hp.range, hp.description)?;
                }
            }
        }

        let training = &report.simulated_training;
        writeln!(f)?;
        writeln!(f, "📈 Simulated Training:")?;
        writeln!(f, "  Final score: {:.4}", training.final_metric_score)?;
        if let Some(best) = training.best_epoch() {
            writeln!(
                f,
                "  Best epoch: {} (val_loss {:.4}, val_metric {:.4})",
                best.epoch, best.val_loss, best.val_metric
            )?;
        }
        for feature in report.ranked_features() {
            writeln!(
                f,
                "  {:<20} {} {:.2}",
                feature.feature,
                bar(feature.importance),
                feature.importance
            )?;
        }
        if let Some(matrix) = &training.confusion_matrix {
            writeln!(f, "  Confusion matrix:")?;
            for row in matrix {
                let cells: Vec<String> = row.iter().map(|v| format!("{:.2}", v)).collect();
                writeln!(f, "    [{}]", cells.join(", "))?;
            }
        }
        if let Some(residuals) = &training.residuals {
            writeln!(f, "  Residuals: {} points", residuals.len())?;
        }

        if !report.correlations.is_empty() {
            writeln!(f)?;
            writeln!(f, "🔗 Correlations:")?;
            for c in &report.correlations {
                writeln!(f, "  {} ~ {}: {:+.2}", c.x, c.y, c.value)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "📓 Baseline notebook:")?;
        writeln!(f, "{}", report.baseline_notebook)
    }
}

fn importance_label(importance: Importance) -> &'static str {
    match importance {
        Importance::High => "HIGH",
        Importance::Medium => "MED",
        Importance::Low => "LOW",
        Importance::Unknown => "---",
    }
}

fn bar(value: f64) -> String {
    let filled = (value.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
