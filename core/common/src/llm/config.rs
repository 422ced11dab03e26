//! エンドポイント設定
//!
//! 起動時に一度だけ解決し、以後プロセス終了まで変更しない。

use crate::error::Error;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const DEFAULT_METHOD: &str = "POST";

/// 補完エンドポイントへの接続情報
#[derive(Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub bearer_token: String,
    pub content_type: String,
    pub endpoint_url: String,
    pub http_method: String,
}

impl EndpointConfig {
    /// トークンとエンドポイントから作成（content-type / method は固定値）
    ///
    /// トークンが空でもそのまま送る。拒否はリモート側の応答として現れる。
    pub fn new(bearer_token: impl Into<String>, endpoint_url: Option<String>) -> Self {
        Self {
            bearer_token: bearer_token.into(),
            content_type: CONTENT_TYPE_JSON.to_string(),
            endpoint_url: endpoint_url.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            http_method: DEFAULT_METHOD.to_string(),
        }
    }

    /// リクエストに付けるヘッダ
    pub fn headers(&self) -> CompletionHeaders {
        CompletionHeaders {
            authorization: format!("Bearer {}", self.bearer_token),
            content_type: self.content_type.clone(),
        }
    }

    pub fn method(&self) -> Result<reqwest::Method, Error> {
        reqwest::Method::from_bytes(self.http_method.as_bytes())
            .map_err(|e| Error::env(format!("Invalid HTTP method '{}': {}", self.http_method, e)))
    }
}

// トークンをログやパニックメッセージに出さない
impl std::fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("bearer_token", &"<redacted>")
            .field("content_type", &self.content_type)
            .field("endpoint_url", &self.endpoint_url)
            .field("http_method", &self.http_method)
            .finish()
    }
}

/// 補完呼び出しごとに送るヘッダ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionHeaders {
    pub authorization: String,
    pub content_type: String,
}
