//! gptchat コマンドの enum（Command Pattern）
//!
//! 行モード vs 全画面モードの分岐を enum で明示する。

use common::domain::ModelName;
use common::llm::ProviderType;

/// セッション開始時に確定する設定（CLI 由来。環境変数との合成は wiring で行う）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionOptions {
    pub provider: ProviderType,
    pub model: Option<ModelName>,
    /// 先頭に置く system メッセージ
    pub system: Option<String>,
    /// 補完エンドポイントの URL
    pub endpoint: Option<String>,
    /// 送信する直近メッセージ数の上限
    pub max_history: Option<usize>,
}

/// gptchat の実行モード
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// ヘルプ表示
    Help,
    /// 1 行ずつ読み込む対話ループ
    Line(SessionOptions),
    /// 全画面 UI
    Interactive(SessionOptions),
}

impl ChatCommand {
    /// ログ用の名前
    pub fn name(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Line(_) => "line",
            Self::Interactive(_) => "interactive",
        }
    }
}
