//! Chat Completions リクエスト（`{model, messages}`）

use crate::domain::ModelName;
use crate::error::Error;
use crate::msg::Message;
use serde::{Deserialize, Serialize};

/// 1 回の補完呼び出しで送るリクエスト本体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    model: ModelName,
    messages: Vec<Message>,
}

impl CompletionRequest {
    pub fn new(model: ModelName, messages: Vec<Message>) -> Self {
        Self { model, messages }
    }

    pub fn model(&self) -> &ModelName {
        &self.model
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// 送信用 JSON 文字列に変換
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self)
            .map_err(|e| Error::json(format!("Failed to serialize request: {}", e)))
    }
}
