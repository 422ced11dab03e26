//! gptchat 共通ライブラリ
//!
//! 会話履歴・補完リクエスト/レスポンス・補完クライアント・ログなど、
//! 行モードと全画面モードの両方で使う部品を提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// 会話メッセージ
pub mod msg;

/// 会話履歴
pub mod transcript;

/// LLM 補完（リクエスト・クライアント・応答抽出）
pub mod llm;

/// Outbound ポート
pub mod ports;

/// 標準アダプター
pub mod adapter;
