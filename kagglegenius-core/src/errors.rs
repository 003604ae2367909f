//! Error types for KaggleGenius

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeniusError>;

/// Failure to turn an uploaded file into a dataset snapshot.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("empty file")]
    Empty,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ParseError::Empty => "The uploaded file is empty.",
            ParseError::Csv(_) | ParseError::Io(_) => {
                "Failed to parse file. Ensure it is a valid CSV."
            }
        }
    }
}

/// Failure talking to the remote inference service.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("missing API key for the inference service")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl BackendError {
    /// True when the user has to supply or fix a credential before retrying.
    pub fn is_credential_failure(&self) -> bool {
        match self {
            BackendError::MissingCredential => true,
            BackendError::Status { status, body } => {
                matches!(status, 401 | 403) || body.contains("API_KEY_INVALID")
            }
            _ => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("no dataset loaded")]
    NoDataset,

    #[error("inference backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("invalid report format: {0}")]
    InvalidReport(#[from] serde_json::Error),
}

impl AnalysisError {
    pub fn needs_reconfiguration(&self) -> bool {
        matches!(self, AnalysisError::Backend(e) if e.is_credential_failure())
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            AnalysisError::NoDataset => "Upload a dataset before requesting an analysis.",
            _ if self.needs_reconfiguration() => {
                "The API key is missing or invalid. Configure a valid key and try again."
            }
            AnalysisError::InvalidReport(_) => "Invalid response format from AI. Please try again.",
            AnalysisError::Backend(_) => "AI analysis failed. Please try again.",
        }
    }
}

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("analysis must be performed before chatting")]
    NoActiveAnalysis,

    #[error("message is empty")]
    EmptyMessage,

    #[error("inference backend error: {0}")]
    Backend(#[from] BackendError),
}

impl ChatError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ChatError::NoActiveAnalysis => "Run an analysis before asking follow-up questions.",
            ChatError::EmptyMessage => "Type a question first.",
            ChatError::Backend(_) => "Sorry, I had trouble processing that request.",
        }
    }
}

#[derive(Error, Debug)]
pub enum GeniusError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("chat error: {0}")]
    Chat(#[from] ChatError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Unknown demo dataset: {0}")]
    UnknownDemo(String),
}
