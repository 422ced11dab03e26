//! エラーハンドリング
//!
//! 全レイヤー共通のエラー型。種別ごとに終了コード（sysexits 準拠）を持つ。

/// gptchat 共通のエラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// 引数不正（usage を表示して終了）
    #[error("{0}")]
    InvalidArgument(String),
    /// 環境変数・設定の不正
    #[error("environment error: {0}")]
    Env(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("JSON error: {0}")]
    Json(String),
    /// 接続失敗・本文読み込み失敗などトランスポート層のエラー
    #[error("HTTP error: {0}")]
    Http(String),
    /// 端末（全画面 UI）の初期化・描画失敗
    #[error("terminal error: {0}")]
    Tui(String),
    #[error("{0}")]
    System(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn tui(msg: impl Into<String>) -> Self {
        Self::Tui(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    /// usage を併せて表示すべきエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// プロセスの終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::System(_) => 70,
            Self::Tui(_) => 71,
            Self::Io(_) | Self::Json(_) | Self::Http(_) => 74,
            Self::Env(_) => 78,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(Error::invalid_argument("x").exit_code(), 64);
        assert_eq!(Error::system("x").exit_code(), 70);
        assert_eq!(Error::tui("x").exit_code(), 71);
        assert_eq!(Error::http("x").exit_code(), 74);
        assert_eq!(Error::json("x").exit_code(), 74);
        assert_eq!(Error::env("x").exit_code(), 78);
    }

    #[test]
    fn test_error_is_usage() {
        assert!(Error::invalid_argument("bad flag").is_usage());
        assert!(!Error::http("refused").is_usage());
    }

    #[test]
    fn test_error_display() {
        let err = Error::http("connection refused");
        assert_eq!(err.to_string(), "HTTP error: connection refused");
        let err = Error::invalid_argument("No such option");
        assert_eq!(err.to_string(), "No such option");
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(ref m) if m.contains("pipe closed")));
    }
}
