//! Chat Completions レスポンスの解釈
//!
//! `choices[].message.content` を配列順に区切りなしで連結する。
//! 解析できない本文は空文字列として扱い、セッションを止めない。

use crate::error::Error;
use serde::Deserialize;

/// レスポンス本体。`id` / `usage` などの未使用フィールドは無視する。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// 4xx/5xx 時に返る `{"error": {...}}`
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: ChoiceMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub index: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl CompletionResponse {
    /// 全 choice の content を連結したテキスト
    pub fn text(&self) -> String {
        self.choices
            .iter()
            .filter_map(|c| c.message.content.as_deref())
            .collect()
    }

    /// API エラーのメッセージ（あれば）
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| {
            e.message
                .as_deref()
                .or(e.kind.as_deref())
                .unwrap_or("unknown error")
        })
    }
}

/// 生のレスポンス本文を CompletionResponse として解析する
pub fn parse_response(raw: &str) -> Result<CompletionResponse, Error> {
    serde_json::from_str(raw)
        .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))
}

/// 応答テキストが空のときに表示する代替文字列
pub const NO_RESPONSE: &str = "[no response]";

/// 抽出結果。履歴には `text` をそのまま記録する。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    pub text: String,
    /// 本文が CompletionResponse として解析できたか
    pub well_formed: bool,
    /// `{"error": ...}` が返ってきた場合のメッセージ
    pub api_error: Option<String>,
}

impl Reply {
    /// 表示用テキスト（空なら NO_RESPONSE、API エラーがあれば併記）
    pub fn display_text(&self) -> String {
        if !self.text.is_empty() {
            return self.text.clone();
        }
        match &self.api_error {
            Some(msg) => format!("{} ({})", NO_RESPONSE, msg),
            None => NO_RESPONSE.to_string(),
        }
    }
}

/// 生のレスポンス本文を解釈する。解析に失敗しても Err にはせず空の Reply を返す。
pub fn extract(raw: &str) -> Reply {
    match parse_response(raw) {
        Ok(resp) => Reply {
            text: resp.text(),
            well_formed: true,
            api_error: resp.error_message().map(str::to_string),
        },
        Err(_) => Reply::default(),
    }
}

/// 生のレスポンス本文から応答テキストを取り出す（解析失敗時は空文字列）
pub fn extract_reply(raw: &str) -> String {
    extract(raw).text
}
