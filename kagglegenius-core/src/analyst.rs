//! Analysis orchestrator: one structured report request, then follow-up chat

use crate::backend::{GenerateRequest, InferenceBackend, Turn};
use crate::dataset::{Column, SampleRow};
use crate::errors::{AnalysisError, ChatError};
use crate::prompt;
use crate::report::Report;
use tracing::{info, warn};

/// Answer used when the model returns no text for a chat turn.
pub const EMPTY_ANSWER_FALLBACK: &str = "I'm sorry, I couldn't generate a response.";

/// Chat context opened by a successful analysis.
#[derive(Debug, Clone)]
struct ChatContext {
    instruction: String,
    history: Vec<Turn>,
}

pub struct Analyst<B> {
    backend: B,
    chat: Option<ChatContext>,
}

impl<B: InferenceBackend> Analyst<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            chat: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Requests a report for the given dataset metadata. Single attempt; a
    /// failure leaves any previous chat context in place.
    pub async fn request_analysis(
        &mut self,
        columns: &[Column],
        row_count: usize,
        sample_rows: &[SampleRow],
    ) -> Result<Report, AnalysisError> {
        let request = GenerateRequest {
            system_instruction: None,
            turns: vec![Turn::user(prompt::analysis_prompt(
                columns,
                row_count,
                sample_rows,
            )?)],
            response_schema: Some(prompt::report_schema()),
            thinking_budget: Some(0),
        };

        info!(columns = columns.len(), row_count, "Requesting dataset analysis");
        let text = self.backend.generate(&request).await?;

        let report = Report::from_json(&text).map_err(|e| {
            warn!("Failed to parse analysis response: {}", e);
            AnalysisError::InvalidReport(e)
        })?;

        self.chat = Some(ChatContext {
            instruction: prompt::chat_instruction(&report),
            history: Vec::new(),
        });

        info!(problem_type = %report.problem_type, "Analysis complete");
        Ok(report)
    }

    /// Sends a follow-up question in the context of the last successful analysis.
    pub async fn ask_follow_up(&mut self, message: &str) -> Result<String, ChatError> {
        let chat = self.chat.as_mut().ok_or(ChatError::NoActiveAnalysis)?;

        let mut turns = chat.history.clone();
        turns.push(Turn::user(message));

        let request = GenerateRequest {
            system_instruction: Some(chat.instruction.clone()),
            turns,
            response_schema: None,
            thinking_budget: None,
        };

        let text = self.backend.generate(&request).await?;
        let answer = if text.trim().is_empty() {
            EMPTY_ANSWER_FALLBACK.to_string()
        } else {
            text
        };

        chat.history.push(Turn::user(message));
        chat.history.push(Turn::model(answer.clone()));
        Ok(answer)
    }

    pub fn has_chat_context(&self) -> bool {
        self.chat.is_some()
    }

    /// Number of chat turns exchanged since the last analysis.
    pub fn chat_turns(&self) -> usize {
        self.chat.as_ref().map_or(0, |c| c.history.len())
    }

    pub fn reset(&mut self) {
        self.chat = None;
    }
}
