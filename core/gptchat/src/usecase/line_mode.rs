//! 行モードのセッションループ
//!
//! AwaitingInput（1 行読む）→ AwaitingCompletion（補完呼び出し）→ AwaitingInput を繰り返す。
//! ループ内に終了状態はなく、終わるのはシグナル（ハンドラ側で exit）か入力の EOF のみ。
//! トランスポートエラーはセッション全体のエラーとして返す。

use crate::ports::outbound::LineReader;
use crate::usecase::chat_session::ChatSession;
use common::error::Error;
use std::io::Write;

pub const GREETING: &str = "Started new chat session. Press Ctrl+C to stop.";
pub const FAREWELL: &str = "Chat has ended.";
pub const USER_PREFIX: &str = "YOU: ";
pub const ASSISTANT_PREFIX: &str = "AI: ";

#[derive(Debug, PartialEq, Eq)]
enum LineState {
    AwaitingInput,
    AwaitingCompletion(String),
}

/// 末尾の改行（`\n` または `\r\n`）を 1 つだけ取り除く
pub fn strip_line_ending(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => line,
    }
}

/// 行モードの対話ループを実行する
///
/// EOF で `Ok(0)`。補完呼び出しのトランスポートエラーは `Err` で返す（履歴には user の発話のみ残る）。
pub fn run_line_session(
    session: &mut ChatSession,
    reader: &mut dyn LineReader,
    out: &mut dyn Write,
) -> Result<i32, Error> {
    writeln!(out, "{}", GREETING)?;
    let mut state = LineState::AwaitingInput;
    loop {
        state = match state {
            LineState::AwaitingInput => {
                write!(out, "{}", USER_PREFIX)?;
                out.flush()?;
                let Some(line) = reader.read_line()? else {
                    writeln!(out, "\n{}", FAREWELL)?;
                    out.flush()?;
                    return Ok(0);
                };
                let text = strip_line_ending(&line).to_string();
                if !reader.echoes_input() {
                    writeln!(out, "{}", text)?;
                }
                LineState::AwaitingCompletion(text)
            }
            LineState::AwaitingCompletion(text) => {
                let reply = session.ask(text)?;
                writeln!(out, "{}{}\n", ASSISTANT_PREFIX, reply.display_text())?;
                out.flush()?;
                LineState::AwaitingInput
            }
        };
    }
}
