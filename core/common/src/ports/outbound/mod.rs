//! Outbound ポート: アプリが外界（補完エンドポイント・環境変数・ログ）を使うための trait

pub mod completion_client;
pub mod env_resolver;
pub mod log;

pub use completion_client::CompletionClient;
pub use env_resolver::EnvResolver;
pub use log::{emit, now_iso8601, Log, LogLevel, LogRecord};
