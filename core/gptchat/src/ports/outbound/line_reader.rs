//! 1 行入力の Outbound ポート
//!
//! 行モードのセッションループはこの trait 経由でユーザーの発話を 1 行ずつ受け取る。

use common::error::Error;

/// ユーザー入力を 1 行ずつ読む
pub trait LineReader {
    /// 1 行読む。末尾の改行は含んだまま返してよい。入力の終端（EOF）なら None。
    fn read_line(&mut self) -> Result<Option<String>, Error>;

    /// 入力が端末にエコーされるか
    ///
    /// false（パイプ・テスト）のとき、ループ側がプロンプトの後に入力を書き出して
    /// `YOU: ...` の行を出力に残す。
    fn echoes_input(&self) -> bool;
}
