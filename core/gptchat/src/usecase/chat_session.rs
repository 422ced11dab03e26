//! 会話セッション: 履歴の更新と 1 ターン分の補完呼び出し
//!
//! 行モード・全画面モードの両方がこの型を所有して使う。
//! 1 ターンは begin_turn（user 追加・リクエスト作成）と finish_turn（応答の反映）に分かれ、
//! 全画面モードでは間の補完呼び出しを別スレッドで行う。

use common::domain::ModelName;
use common::error::Error;
use common::llm::{CompletionRequest, LlmDriver, Reply};
use common::ports::outbound::{emit, Log, LogLevel, LogRecord};
use common::transcript::Transcript;
use std::sync::Arc;

/// 1 つの会話セッション（履歴・モデル・ドライバー）
pub struct ChatSession {
    transcript: Transcript,
    model: ModelName,
    max_history: Option<usize>,
    driver: LlmDriver,
    log: Arc<dyn Log>,
}

impl ChatSession {
    pub fn new(
        driver: LlmDriver,
        model: ModelName,
        system: Option<String>,
        max_history: Option<usize>,
        log: Arc<dyn Log>,
    ) -> Self {
        let transcript = match system {
            Some(s) => Transcript::with_system(s),
            None => Transcript::new(),
        };
        Self {
            transcript,
            model,
            max_history,
            driver,
            log,
        }
    }

    #[cfg(test)]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn driver(&self) -> &LlmDriver {
        &self.driver
    }

    /// user の発話を履歴に追加し、送信するリクエストを返す
    pub fn begin_turn(&mut self, text: impl Into<String>) -> CompletionRequest {
        self.transcript.append_user_turn(text);
        self.transcript
            .build_request_windowed(&self.model, self.max_history)
    }

    /// 補完呼び出しの結果を履歴に反映する
    ///
    /// - Ok: assistant の発話として追加（空文字列でも追加する）
    /// - Err: 何も追加せずそのまま返す（user の発話は残る）
    pub fn finish_turn(&mut self, result: Result<Reply, Error>) -> Result<Reply, Error> {
        let reply = match result {
            Ok(r) => r,
            Err(e) => {
                emit(
                    self.log.as_ref(),
                    LogRecord::new(LogLevel::Error, e.to_string())
                        .layer("usecase")
                        .kind("error")
                        .field("messages", self.transcript.len()),
                );
                return Err(e);
            }
        };
        if !reply.well_formed {
            emit(
                self.log.as_ref(),
                LogRecord::new(LogLevel::Warn, "malformed completion response; using empty reply")
                    .layer("usecase")
                    .kind("completion"),
            );
        }
        if let Some(msg) = &reply.api_error {
            emit(
                self.log.as_ref(),
                LogRecord::new(LogLevel::Warn, "completion endpoint returned an error")
                    .layer("usecase")
                    .kind("completion")
                    .field("error", msg.as_str()),
            );
        }
        self.transcript.append_assistant_turn(reply.text.clone());
        Ok(reply)
    }

    /// 1 ターンを同期的に実行する（行モード用）
    pub fn ask(&mut self, text: impl Into<String>) -> Result<Reply, Error> {
        let request = self.begin_turn(text);
        let result = self.driver.query(&request);
        self.finish_turn(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::StubClient;
    use common::adapter::NoopLog;
    use common::llm::EndpointConfig;
    use common::msg::Role;

    fn session_with(client: Arc<StubClient>, system: Option<&str>) -> ChatSession {
        let driver = LlmDriver::new(
            client,
            EndpointConfig::new("sk-test", None).headers(),
            Arc::new(NoopLog),
        );
        ChatSession::new(
            driver,
            ModelName::new("gpt-3.5-turbo"),
            system.map(str::to_string),
            None,
            Arc::new(NoopLog),
        )
    }

    #[test]
    fn test_ask_appends_user_then_assistant() {
        let client = Arc::new(StubClient::replying(&["Hi there"]));
        let mut s = session_with(Arc::clone(&client), None);
        let reply = s.ask("Hello").unwrap();
        assert_eq!(reply.text, "Hi there");
        let msgs = s.transcript().messages();
        assert_eq!(msgs.len(), 2);
        assert_eq!((msgs[0].role(), msgs[0].content()), (Role::User, "Hello"));
        assert_eq!((msgs[1].role(), msgs[1].content()), (Role::Assistant, "Hi there"));
    }

    #[test]
    fn test_request_ends_with_latest_user_turn() {
        let client = Arc::new(StubClient::replying(&["one", "two"]));
        let mut s = session_with(Arc::clone(&client), Some("be brief"));
        s.ask("first").unwrap();
        s.ask("second").unwrap();
        let payloads = client.payloads();
        assert_eq!(payloads.len(), 2);
        let msgs = payloads[1]["messages"].as_array().unwrap();
        assert_eq!(msgs.len(), 4);
        assert_eq!(msgs[0]["role"], "system");
        assert_eq!(msgs[3], serde_json::json!({"role": "user", "content": "second"}));
        assert_eq!(payloads[1]["model"], "gpt-3.5-turbo");
    }

    #[test]
    fn test_malformed_response_records_empty_assistant_turn() {
        let client = Arc::new(StubClient::new(vec![Ok("{\"choices\":[{".to_string())]));
        let mut s = session_with(client, None);
        let reply = s.ask("Hello").unwrap();
        assert!(!reply.well_formed);
        assert_eq!(reply.display_text(), "[no response]");
        assert_eq!(s.transcript().len(), 2);
        assert_eq!(s.transcript().messages()[1].content(), "");
    }

    #[test]
    fn test_transport_error_keeps_user_turn_only() {
        let client = Arc::new(StubClient::new(vec![Err(Error::http("connection refused"))]));
        let mut s = session_with(client, None);
        let err = s.ask("Hello").unwrap_err();
        assert!(matches!(err, Error::Http(_)));
        let msgs = s.transcript().messages();
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].role(), Role::User);
    }

    #[test]
    fn test_windowed_session_sends_tail_only() {
        let client = Arc::new(StubClient::replying(&["a", "b", "c"]));
        let driver = LlmDriver::new(
            Arc::clone(&client) as Arc<dyn common::ports::outbound::CompletionClient>,
            EndpointConfig::new("", None).headers(),
            Arc::new(NoopLog),
        );
        let mut s = ChatSession::new(
            driver,
            ModelName::new("m"),
            Some("sys".to_string()),
            Some(2),
            Arc::new(NoopLog),
        );
        for q in ["q1", "q2", "q3"] {
            s.ask(q).unwrap();
        }
        let payloads = client.payloads();
        let contents: Vec<&str> = payloads[2]["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["content"].as_str().unwrap())
            .collect();
        assert_eq!(contents, vec!["sys", "b", "q3"]);
        assert_eq!(s.transcript().len(), 7);
    }
}
