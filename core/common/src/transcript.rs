//! 会話履歴（Transcript）
//!
//! 追記専用の Message 列。毎回の補完呼び出しで全体を送信する。
//! system メッセージは生成時にのみ置け、常に先頭に留まる。

use crate::domain::ModelName;
use crate::llm::request::CompletionRequest;
use crate::msg::{Message, Role};

/// 追記専用の会話履歴
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// 空の履歴
    pub fn new() -> Self {
        Self::default()
    }

    /// 先頭に system メッセージを置いた履歴
    pub fn with_system(instruction: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(instruction)],
        }
    }

    pub fn append_user_turn(&mut self, text: impl Into<String>) {
        self.messages.push(Message::user(text));
    }

    pub fn append_assistant_turn(&mut self, text: impl Into<String>) {
        self.messages.push(Message::assistant(text));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// 先頭の system メッセージ（あれば）
    pub fn system(&self) -> Option<&Message> {
        self.messages.first().filter(|m| m.role() == Role::System)
    }

    /// 最後の user メッセージ
    pub fn last_user(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.role() == Role::User)
    }

    /// 現在の履歴全体をコピーしてリクエストを組み立てる
    pub fn build_request(&self, model: &ModelName) -> CompletionRequest {
        CompletionRequest::new(model.clone(), self.messages.clone())
    }

    /// 送信する履歴を直近 `max_messages` 件に絞ってリクエストを組み立てる
    ///
    /// 先頭の system メッセージは件数に数えず常に残す。履歴そのものは切り詰めない。
    /// 最新のメッセージは必ず含める（0 は 1 として扱う）。
    /// `None` のときは build_request と同じ。
    pub fn build_request_windowed(
        &self,
        model: &ModelName,
        max_messages: Option<usize>,
    ) -> CompletionRequest {
        let Some(max) = max_messages else {
            return self.build_request(model);
        };
        let (head, rest) = match self.system() {
            Some(system) => (Some(system.clone()), &self.messages[1..]),
            None => (None, &self.messages[..]),
        };
        let skip = rest.len().saturating_sub(max.max(1));
        let messages = head
            .into_iter()
            .chain(rest[skip..].iter().cloned())
            .collect();
        CompletionRequest::new(model.clone(), messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ModelName {
        ModelName::new("gpt-3.5-turbo")
    }

    #[test]
    fn test_transcript_appends_in_order() {
        let mut t = Transcript::new();
        t.append_user_turn("Hi");
        t.append_assistant_turn("Hello!");
        t.append_user_turn("Bye");
        let roles: Vec<Role> = t.messages().iter().map(|m| m.role()).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(t.last_user().unwrap().content(), "Bye");
    }

    #[test]
    fn test_transcript_system_stays_first() {
        let mut t = Transcript::with_system("You are terse.");
        t.append_user_turn("Hi");
        t.append_assistant_turn("Hey");
        assert_eq!(t.messages()[0].role(), Role::System);
        assert_eq!(t.system().unwrap().content(), "You are terse.");
    }

    #[test]
    fn test_transcript_without_system() {
        let mut t = Transcript::new();
        t.append_user_turn("Hi");
        assert!(t.system().is_none());
    }

    #[test]
    fn test_build_request_is_a_snapshot() {
        let mut t = Transcript::new();
        t.append_user_turn("first");
        let req = t.build_request(&model());
        t.append_assistant_turn("reply");
        assert_eq!(req.messages().len(), 1);
        assert_eq!(t.len(), 2);
        assert_eq!(req.model().as_ref(), "gpt-3.5-turbo");
    }

    #[test]
    fn test_build_request_forwards_empty_text() {
        let mut t = Transcript::new();
        t.append_user_turn("");
        let req = t.build_request(&model());
        assert_eq!(req.messages()[0].content(), "");
    }

    #[test]
    fn test_windowed_request_keeps_system_and_tail() {
        let mut t = Transcript::with_system("sys");
        for i in 0..3 {
            t.append_user_turn(format!("q{}", i));
            t.append_assistant_turn(format!("a{}", i));
        }
        t.append_user_turn("q3");
        let req = t.build_request_windowed(&model(), Some(3));
        let contents: Vec<&str> = req.messages().iter().map(|m| m.content()).collect();
        assert_eq!(contents, vec!["sys", "q2", "a2", "q3"]);
        // 履歴自体は切り詰めない
        assert_eq!(t.len(), 8);
    }

    #[test]
    fn test_windowed_request_larger_than_history() {
        let mut t = Transcript::new();
        t.append_user_turn("only");
        let req = t.build_request_windowed(&model(), Some(10));
        assert_eq!(req.messages(), t.messages());
    }

    #[test]
    fn test_windowed_request_zero_still_sends_latest_user_turn() {
        let mut t = Transcript::with_system("sys");
        t.append_user_turn("Hello");
        let req = t.build_request_windowed(&model(), Some(0));
        let last = req.messages().last().map(|m| (m.role(), m.content()));
        assert_eq!(last, Some((Role::User, "Hello")));
        assert_eq!(req.messages().len(), 2);
    }

    #[test]
    fn test_windowed_request_none_is_full() {
        let mut t = Transcript::with_system("sys");
        t.append_user_turn("a");
        t.append_assistant_turn("b");
        let req = t.build_request_windowed(&model(), None);
        assert_eq!(req.messages().len(), 3);
    }
}
