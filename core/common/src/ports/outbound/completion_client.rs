//! 補完クライアント Outbound ポート
//!
//! 1 回の呼び出しで 1 回のリクエスト/レスポンス交換を行う。
//! ステータスコードは解釈せず、本文をそのまま返す（解釈は Response Extractor 側）。

use crate::error::Error;
use crate::llm::config::CompletionHeaders;

/// 補完エンドポイントとの同期的な 1 往復
///
/// 実装は `common::llm::openai::OpenAiClient`（reqwest）や `EchoClient`、テスト用スタブなど。
pub trait CompletionClient: Send + Sync {
    fn name(&self) -> &str;

    /// シリアライズ済みリクエストを送り、生のレスポンス本文を返す
    ///
    /// 接続失敗・本文の読み込み失敗は `Error::Http`。
    fn complete(&self, payload: &str, headers: &CompletionHeaders) -> Result<String, Error>;
}
