//! SIGINT / SIGTERM のハンドラ登録（ctrlc）
//!
//! - 行モード: 受けたら別れの挨拶を出して即終了する（履歴はメモリのみで書き出すものはない）
//! - 全画面モード: フラグを立てるだけ。イベントループが端末を戻してから終了する
//!
//! ctrlc の仕様上ハンドラはプロセスで一度しか登録できないので、どちらか一方だけ使う。

use crate::ports::outbound::InterruptChecker;
use common::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// シグナルを受けたら `farewell` を表示して終了コード 0 で終了する
pub fn install_exit_handler(farewell: &'static str) -> Result<(), Error> {
    ctrlc::set_handler(move || {
        println!("\n{}", farewell);
        std::process::exit(0);
    })
    .map_err(|e| Error::system(format!("Failed to install signal handler: {}", e)))
}

/// シグナルを受けたらフラグを立てる実装
pub struct SigintChecker {
    flag: Arc<AtomicBool>,
}

impl SigintChecker {
    /// 新しいチェッカーを作成し、ハンドラを登録する。
    pub fn new() -> Result<Self, ctrlc::Error> {
        let flag = Arc::new(AtomicBool::new(false));
        let flag_clone = Arc::clone(&flag);
        ctrlc::set_handler(move || {
            flag_clone.store(true, Ordering::Relaxed);
        })?;
        Ok(Self { flag })
    }
}

impl InterruptChecker for SigintChecker {
    fn is_interrupted(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// 割り込みを検知しないスタブ（ハンドラ登録に失敗した場合・テストで使用）
pub struct NoopInterruptChecker;

impl InterruptChecker for NoopInterruptChecker {
    fn is_interrupted(&self) -> bool {
        false
    }
}
