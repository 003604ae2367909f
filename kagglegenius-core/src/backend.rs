//! Seam between the orchestrator and a remote inference service

use crate::errors::BackendError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Model,
            text: text.into(),
        }
    }
}

/// One opaque request/response exchange with the model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateRequest {
    pub system_instruction: Option<String>,
    /// Conversation so far, oldest first; the last turn is the user's.
    pub turns: Vec<Turn>,
    /// When set, the model is asked for JSON matching this schema.
    pub response_schema: Option<serde_json::Value>,
    pub thinking_budget: Option<u32>,
}

#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Returns the model's text answer, possibly empty.
    async fn generate(&self, request: &GenerateRequest) -> Result<String, BackendError>;
}
