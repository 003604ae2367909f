//! Per-user session state: current dataset, report, chat transcript

use crate::analyst::Analyst;
use crate::backend::InferenceBackend;
use crate::dataset::DatasetSnapshot;
use crate::errors::{AnalysisError, ChatError, ParseError};
use crate::profiler;
use crate::report::Report;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

pub const GREETING: &str = "Hello! I've finished analyzing your dataset. You can ask me anything about the feature engineering steps, model choices, or the baseline code I generated.";
pub const CHAT_APOLOGY: &str = "Sorry, I had trouble processing that request.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }
}

/// Coarse processing state shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Parsing,
    Profiled,
    Analyzing,
    Completed,
    Failed(String),
}

pub struct Session<B> {
    id: Uuid,
    analyst: Analyst<B>,
    dataset: Option<DatasetSnapshot>,
    report: Option<Report>,
    transcript: Vec<ChatMessage>,
    phase: Phase,
}

impl<B: InferenceBackend> Session<B> {
    pub fn new(backend: B) -> Self {
        Self {
            id: Uuid::new_v4(),
            analyst: Analyst::new(backend),
            dataset: None,
            report: None,
            transcript: Vec::new(),
            phase: Phase::Idle,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn dataset(&self) -> Option<&DatasetSnapshot> {
        self.dataset.as_ref()
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn analyst(&self) -> &Analyst<B> {
        &self.analyst
    }

    /// Profiles CSV text and, on success, replaces the current dataset.
    pub fn load_csv(&mut self, text: &str) -> Result<&DatasetSnapshot, ParseError> {
        self.phase = Phase::Parsing;
        let result = profiler::profile_csv(text);
        self.install(result)
    }

    pub async fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&DatasetSnapshot, ParseError> {
        self.phase = Phase::Parsing;
        let result = profiler::profile_file(path)
            .instrument(info_span!("load_file", session = %self.id))
            .await;
        self.install(result)
    }

    fn install(
        &mut self,
        result: Result<DatasetSnapshot, ParseError>,
    ) -> Result<&DatasetSnapshot, ParseError> {
        match result {
            Ok(snapshot) => {
                info!(
                    session = %self.id,
                    rows = snapshot.row_count,
                    columns = snapshot.columns.len(),
                    "Dataset loaded"
                );
                // A new upload abandons the previous analysis and its chat.
                self.report = None;
                self.transcript.clear();
                self.analyst.reset();
                self.phase = Phase::Profiled;
                Ok(self.dataset.insert(snapshot))
            }
            Err(e) => {
                warn!(session = %self.id, "Failed to profile dataset: {}", e);
                self.phase = Phase::Failed(e.user_message().to_string());
                Err(e)
            }
        }
    }

    /// Requests a report for the current dataset.
    pub async fn analyze(&mut self) -> Result<&Report, AnalysisError> {
        let dataset = self.dataset.as_ref().ok_or(AnalysisError::NoDataset)?;
        self.phase = Phase::Analyzing;

        let span = info_span!("analyze", session = %self.id);
        let result = self
            .analyst
            .request_analysis(&dataset.columns, dataset.row_count, &dataset.sample_rows)
            .instrument(span)
            .await;

        match result {
            Ok(report) => {
                self.transcript = vec![ChatMessage::new(ChatRole::Assistant, GREETING)];
                self.phase = Phase::Completed;
                Ok(self.report.insert(report))
            }
            Err(e) => {
                self.report = None;
                self.transcript.clear();
                self.analyst.reset();
                self.phase = Phase::Failed(e.user_message().to_string());
                Err(e)
            }
        }
    }

    /// Asks a follow-up question and records the exchange in the transcript.
    pub async fn ask(&mut self, message: &str) -> Result<String, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if !self.analyst.has_chat_context() {
            return Err(ChatError::NoActiveAnalysis);
        }

        self.transcript.push(ChatMessage::new(ChatRole::User, message));

        let span = info_span!("ask", session = %self.id);
        match self.analyst.ask_follow_up(message).instrument(span).await {
            Ok(answer) => {
                self.transcript
                    .push(ChatMessage::new(ChatRole::Assistant, answer.clone()));
                Ok(answer)
            }
            Err(e) => {
                warn!(session = %self.id, "Follow-up request failed: {}", e);
                self.transcript
                    .push(ChatMessage::new(ChatRole::Assistant, CHAT_APOLOGY));
                Err(e)
            }
        }
    }

    /// Discards everything and returns to the idle state.
    pub fn reset(&mut self) {
        info!(session = %self.id, "Session reset");
        self.dataset = None;
        self.report = None;
        self.transcript.clear();
        self.analyst.reset();
        self.phase = Phase::Idle;
    }
}
