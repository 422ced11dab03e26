//! Echoクライアントの実装
//!
//! 実際のエンドポイントは呼ばず、最後の user メッセージをそのまま返す
//! Chat Completions 形式の応答を組み立てる。オフラインでの動作確認用。

use crate::error::Error;
use crate::llm::config::CompletionHeaders;
use crate::llm::request::CompletionRequest;
use crate::msg::Role;
use crate::ports::outbound::CompletionClient;
use serde_json::json;

/// Echoクライアント
#[derive(Debug, Clone, Default)]
pub struct EchoClient;

impl EchoClient {
    pub fn new() -> Self {
        Self
    }
}

impl CompletionClient for EchoClient {
    fn name(&self) -> &str {
        "echo"
    }

    fn complete(&self, payload: &str, _headers: &CompletionHeaders) -> Result<String, Error> {
        let request: CompletionRequest = serde_json::from_str(payload)
            .map_err(|e| Error::json(format!("Failed to parse request JSON: {}", e)))?;
        let last_user = request
            .messages()
            .iter()
            .rev()
            .find(|m| m.role() == Role::User)
            .map(|m| m.content())
            .unwrap_or("");
        let body = json!({
            "object": "chat.completion",
            "model": request.model(),
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": format!("[echo] {}", last_user)},
                "finish_reason": "stop"
            }]
        });
        Ok(body.to_string())
    }
}
