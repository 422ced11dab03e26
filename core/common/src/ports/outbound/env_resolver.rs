//! 環境変数解決 Outbound ポート
//!
//! 認証トークン・エンドポイント等を環境変数から解決する。
//! usecase / wiring はこの trait 経由でのみ環境変数にアクセスする。

use crate::error::Error;
use std::path::PathBuf;

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_ENDPOINT: &str = "GPTCHAT_ENDPOINT";
pub const ENV_MODEL: &str = "GPTCHAT_MODEL";
pub const ENV_MAX_HISTORY: &str = "GPTCHAT_MAX_HISTORY";
pub const ENV_LOG: &str = "GPTCHAT_LOG";

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のマップ実装など。
/// 空文字列の変数は未設定と同じに扱う（api_key を除く）。
pub trait EnvResolver: Send + Sync {
    /// OPENAI_API_KEY（未設定なら None。呼び出し側で空トークンとして送る）
    fn api_key(&self) -> Option<String>;

    /// GPTCHAT_ENDPOINT: 補完エンドポイントの完全な URL
    fn endpoint(&self) -> Option<String>;

    /// GPTCHAT_MODEL
    fn model(&self) -> Option<String>;

    /// GPTCHAT_MAX_HISTORY: 送信する直近メッセージ数の上限。数値でなければ `Error::Env`。
    fn max_history(&self) -> Result<Option<usize>, Error>;

    /// GPTCHAT_LOG: JSONL ログの出力先
    fn log_path(&self) -> Option<PathBuf>;
}
