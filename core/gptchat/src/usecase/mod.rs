//! ユースケース: 会話セッションと 2 つの実行モード

pub mod chat_session;
pub mod interactive;
pub mod line_mode;
