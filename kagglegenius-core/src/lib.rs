//! KaggleGenius: CSV dataset profiling and LLM-backed ML strategy reports

pub mod analyst;
pub mod backend;
pub mod config;
pub mod dataset;
pub mod demo;
pub mod errors;
pub mod gemini;
pub mod profiler;
pub mod prompt;
pub mod report;
pub mod session;

// Re-exports
pub use analyst::Analyst;
pub use backend::{GenerateRequest, InferenceBackend, Turn, TurnRole};
pub use config::{load_config, ConfigOverrides, GeniusConfig};
pub use dataset::{Column, ColumnKind, ColumnStats, ColumnType, DatasetSnapshot, NumericStats, SampleRow};
pub use demo::{load_demo, DemoDataset, DemoKind};
pub use errors::{AnalysisError, BackendError, ChatError, GeniusError, ParseError, Result};
pub use gemini::GeminiClient;
pub use profiler::{profile_bytes, profile_csv, profile_file};
pub use report::{ProblemType, Report};
pub use session::{ChatMessage, ChatRole, Phase, Session};

/// Builds a session backed by the Gemini client described by `config`.
pub fn gemini_session(config: &GeniusConfig) -> Result<Session<GeminiClient>> {
    let client = GeminiClient::new(config).map_err(AnalysisError::from)?;
    Ok(Session::new(client))
}
