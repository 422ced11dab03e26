//! SIGINT / SIGTERM による割り込みを検知する Outbound ポート
//!
//! 全画面モードのイベントループが毎ティック参照し、true なら端末を戻して終了する。

/// 割り込みが要求されたかどうかを返す能力
pub trait InterruptChecker: Send + Sync {
    fn is_interrupted(&self) -> bool;
}
