//! 全画面モードで扱うキー入力
//!
//! 端末ライブラリのイベントは tui 側でこの型に変換し、状態遷移は端末に依存させない。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// 送信
    Enter,
    /// 終了
    Esc,
    /// Ctrl+C（raw モード中はシグナルではなくキーとして届く）
    Interrupt,
    /// 全画面 / 通常画面の切り替え
    ToggleScreen,
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    /// 上記以外（無視する）
    Other,
}

impl Key {
    pub fn is_quit(&self) -> bool {
        matches!(self, Self::Esc | Self::Interrupt)
    }
}
