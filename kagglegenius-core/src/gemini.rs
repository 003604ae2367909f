//! Google Gemini `generateContent` client

use crate::backend::{GenerateRequest, InferenceBackend, Turn, TurnRole};
use crate::config::GeniusConfig;
use crate::errors::BackendError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &GeniusConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.trim().to_string(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    fn build_body<'a>(request: &'a GenerateRequest) -> GeminiRequest<'a> {
        let system_instruction = request.system_instruction.as_deref().map(|text| Content {
            role: None,
            parts: vec![Part { text }],
        });

        let contents = request.turns.iter().map(to_content).collect();

        let generation_config = if request.response_schema.is_some()
            || request.thinking_budget.is_some()
        {
            Some(GenerationConfig {
                response_mime_type: request
                    .response_schema
                    .as_ref()
                    .map(|_| "application/json"),
                response_schema: request.response_schema.as_ref(),
                thinking_config: request
                    .thinking_budget
                    .map(|thinking_budget| ThinkingConfig { thinking_budget }),
            })
        } else {
            None
        };

        GeminiRequest {
            system_instruction,
            contents,
            generation_config,
        }
    }
}

fn to_content(turn: &Turn) -> Content<'_> {
    let role = match turn.role {
        TurnRole::User => "user",
        TurnRole::Model => "model",
    };
    Content {
        role: Some(role),
        parts: vec![Part { text: &turn.text }],
    }
}

#[async_trait]
impl InferenceBackend for GeminiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, BackendError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(BackendError::MissingCredential)?;

        debug!(model = %self.model, turns = request.turns.len(), "Making Gemini API call");

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&Self::build_body(request))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status { status, body });
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| BackendError::MalformedResponse(e.to_string()))?;

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::MalformedResponse("no candidates in response".to_string()))?;

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        Ok(text)
    }
}
