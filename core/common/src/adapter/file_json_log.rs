//! Log 実装: ファイルへ JSONL 追記 / stderr への要点出力 / 何もしない / 複数への分配

use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// ファイルへ JSONL を追記する Log 実装
///
/// UI スレッドと補完ワーカーの両方から書くため、追記はロックで直列化する。
pub struct FileJsonLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileJsonLog {
    /// ログファイルパスへ追記する logger を生成する。
    /// 親ディレクトリが無ければ初回書き込み時に作成する。
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }
}

impl Log for FileJsonLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let line = serde_json::to_string(record).map_err(|e| Error::Json(e.to_string()))?;
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::system("log lock poisoned"))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut w = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
        w.flush()?;
        Ok(())
    }
}

/// `-v` 指定時に stderr へ 1 行ずつ出す Log 実装
///
/// 全画面 UI 中は画面を壊すため wiring 側で使わない。
pub struct StderrLog {
    max_level: LogLevel,
}

impl StderrLog {
    pub fn new(max_level: LogLevel) -> Self {
        Self { max_level }
    }
}

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if record.level > self.max_level {
            return Ok(());
        }
        let mut line = format!("[{}] {}", record.level.as_str(), record.message);
        if let Some(fields) = &record.fields {
            for (k, v) in fields {
                line.push_str(&format!(" {}={}", k, v));
            }
        }
        eprintln!("{}", line);
        Ok(())
    }
}

/// 何も出力しない Log 実装（テスト・ログ無効時）
#[derive(Debug, Clone, Default)]
pub struct NoopLog;

impl Log for NoopLog {
    fn log(&self, _record: &LogRecord) -> Result<(), Error> {
        Ok(())
    }
}

/// 複数の Log へ同じレコードを配る。最初のエラーを返すが、残りへの出力は続ける。
pub struct CompositeLog {
    inner: Vec<Arc<dyn Log>>,
}

impl CompositeLog {
    pub fn new(inner: Vec<Arc<dyn Log>>) -> Self {
        Self { inner }
    }
}

impl Log for CompositeLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut first_err = None;
        for log in &self.inner {
            if let Err(e) = log.log(record) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
