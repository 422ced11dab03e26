//! OpenAI Chat Completions 互換エンドポイントへの補完クライアント
//!
//! 呼び出しごとに Client を作り、1 回の POST で本文を受け取って接続を閉じる。
//! 非 2xx でも本文をそのまま返す（解釈は response 側）。

use crate::error::Error;
use crate::llm::config::{CompletionHeaders, EndpointConfig};
use crate::ports::outbound::{emit, CompletionClient, Log, LogLevel, LogRecord};
use std::sync::Arc;

/// reqwest（blocking）による補完クライアント
pub struct OpenAiClient {
    config: EndpointConfig,
    log: Arc<dyn Log>,
}

impl OpenAiClient {
    pub fn new(config: EndpointConfig, log: Arc<dyn Log>) -> Self {
        Self { config, log }
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }
}

impl CompletionClient for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    fn complete(&self, payload: &str, headers: &CompletionHeaders) -> Result<String, Error> {
        let method = self.config.method()?;
        let client = reqwest::blocking::Client::new();
        let response = client
            .request(method, &self.config.endpoint_url)
            .header("Authorization", &headers.authorization)
            .header("Content-Type", &headers.content_type)
            .body(payload.to_string())
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        // response はここで消費され、成功・失敗どちらでも接続が解放される
        let body = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        let level = if status.is_success() {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        };
        emit(
            self.log.as_ref(),
            LogRecord::new(level, "completion response received")
                .layer("adapter")
                .kind("completion")
                .field("status", status.as_u16())
                .field("bytes", body.len()),
        );
        Ok(body)
    }
}
