#![allow(dead_code)]

use async_trait::async_trait;
use kagglegenius_core::{load_demo, BackendError, DemoKind, GenerateRequest, InferenceBackend};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Backend that replays canned replies and records every request it sees.
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, BackendError>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Result<String, BackendError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceBackend for ScriptedBackend {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, BackendError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::MalformedResponse("no scripted reply".into())))
    }
}

pub fn report_json(kind: DemoKind) -> String {
    serde_json::to_string(&load_demo(kind).unwrap().report).unwrap()
}

pub const SMALL_CSV: &str = "a,b\n1,x\n2,y\n3,x\n";
