//! LLMドライバーの実装
//!
//! リクエストのシリアライズ → 補完クライアント呼び出し → 応答テキスト抽出をまとめる。
//! クライアントに依存しない共通処理。

use crate::error::Error;
use crate::llm::config::CompletionHeaders;
use crate::llm::request::CompletionRequest;
use crate::llm::response::{extract, Reply};
use crate::ports::outbound::{emit, CompletionClient, Log, LogLevel, LogRecord};
use std::sync::Arc;

/// LLMドライバー
///
/// Clone してワーカースレッドへ渡せる（中身は Arc とヘッダのみ）。
#[derive(Clone)]
pub struct LlmDriver {
    client: Arc<dyn CompletionClient>,
    headers: CompletionHeaders,
    log: Arc<dyn Log>,
}

impl LlmDriver {
    /// 新しいドライバーを作成
    pub fn new(
        client: Arc<dyn CompletionClient>,
        headers: CompletionHeaders,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            client,
            headers,
            log,
        }
    }

    /// リクエストを送信し、生のレスポンス本文を返す
    pub fn send(&self, request: &CompletionRequest) -> Result<String, Error> {
        let payload = request.to_json()?;
        emit(
            self.log.as_ref(),
            LogRecord::new(LogLevel::Debug, "completion request")
                .layer("adapter")
                .kind("completion")
                .field("client", self.client.name())
                .field("model", request.model().to_string())
                .field("messages", request.messages().len()),
        );
        self.client.complete(&payload, &self.headers)
    }

    /// リクエストを送信し、応答を抽出して返す
    ///
    /// Err はトランスポート層の失敗のみ。解析できない本文は空の Reply になる。
    pub fn query(&self, request: &CompletionRequest) -> Result<Reply, Error> {
        let raw = self.send(request)?;
        Ok(extract(&raw))
    }

    /// クライアント名
    pub fn client_name(&self) -> &str {
        self.client.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::NoopLog;
    use crate::domain::ModelName;
    use crate::llm::config::EndpointConfig;
    use crate::transcript::Transcript;
    use std::sync::Mutex;

    // 受け取ったペイロードを記録し、固定の本文を返すモック
    struct MockClient {
        body: Result<String, Error>,
        seen: Mutex<Vec<(String, CompletionHeaders)>>,
    }

    impl MockClient {
        fn new(body: Result<String, Error>) -> Self {
            Self {
                body,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl CompletionClient for MockClient {
        fn name(&self) -> &str {
            "mock"
        }

        fn complete(&self, payload: &str, headers: &CompletionHeaders) -> Result<String, Error> {
            self.seen
                .lock()
                .unwrap()
                .push((payload.to_string(), headers.clone()));
            self.body.clone()
        }
    }

    fn driver(client: Arc<MockClient>) -> LlmDriver {
        LlmDriver::new(
            client,
            EndpointConfig::new("sk-test", None).headers(),
            Arc::new(NoopLog),
        )
    }

    fn hello_request() -> CompletionRequest {
        let mut t = Transcript::new();
        t.append_user_turn("Hello");
        t.build_request(&ModelName::new("gpt-3.5-turbo"))
    }

    #[test]
    fn test_llm_driver_query() {
        let client = Arc::new(MockClient::new(Ok(
            r#"{"choices":[{"message":{"content":"Hi there"}}]}"#.to_string(),
        )));
        let reply = driver(Arc::clone(&client)).query(&hello_request()).unwrap();
        assert_eq!(reply.text, "Hi there");
        assert!(reply.well_formed);
    }

    #[test]
    fn test_llm_driver_sends_payload_and_headers() {
        let client = Arc::new(MockClient::new(Ok("{}".to_string())));
        driver(Arc::clone(&client)).send(&hello_request()).unwrap();
        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let v: serde_json::Value = serde_json::from_str(&seen[0].0).unwrap();
        assert_eq!(v["model"], "gpt-3.5-turbo");
        assert_eq!(v["messages"][0]["content"], "Hello");
        assert_eq!(seen[0].1.authorization, "Bearer sk-test");
        assert_eq!(seen[0].1.content_type, "application/json");
    }

    #[test]
    fn test_llm_driver_malformed_reply_is_empty() {
        let client = Arc::new(MockClient::new(Ok("<html>502</html>".to_string())));
        let reply = driver(client).query(&hello_request()).unwrap();
        assert_eq!(reply.text, "");
        assert!(!reply.well_formed);
    }

    #[test]
    fn test_llm_driver_transport_error() {
        let client = Arc::new(MockClient::new(Err(Error::http("connection refused"))));
        let err = driver(client).query(&hello_request()).unwrap_err();
        assert_eq!(err.exit_code(), 74);
    }

    #[test]
    fn test_llm_driver_with_echo_client() {
        use crate::llm::echo::EchoClient;
        let d = LlmDriver::new(
            Arc::new(EchoClient::new()),
            EndpointConfig::new("", None).headers(),
            Arc::new(NoopLog),
        );
        assert_eq!(d.client_name(), "echo");
        assert_eq!(d.query(&hello_request()).unwrap().text, "[echo] Hello");
    }
}
