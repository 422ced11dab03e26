//! 全画面モードの描画
//!
//! 上から「会話」「入力欄」「ヒント行」の 3 段。会話は表示幅で折り返し、常に末尾を表示する。

use crate::usecase::interactive::{Answer, UiState};
use crate::usecase::line_mode::{ASSISTANT_PREFIX, USER_PREFIX};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const HINT: &str = "Enter: send  F2: full screen  Esc/Ctrl+C: quit";

/// 表示幅 `width` で折り返す（改行は段落の区切りとして扱う）
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for paragraph in text.split('\n') {
        let mut row = String::new();
        let mut row_width = 0;
        for ch in paragraph.chars() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if row_width + w > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            row.push(ch);
            row_width += w;
        }
        rows.push(row);
    }
    rows
}

/// 会話欄の行（折り返し済み）とそのスタイル
pub fn chat_rows(ui: &UiState, width: usize) -> Vec<(String, Style)> {
    let you = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let ai = Style::default().fg(Color::Green);
    let failed = Style::default().fg(Color::Red);
    let waiting = Style::default().fg(Color::DarkGray);

    let mut rows = Vec::new();
    for (i, exchange) in ui.exchanges.iter().enumerate() {
        if i > 0 {
            rows.push((String::new(), Style::default()));
        }
        let question = format!("{}{}", USER_PREFIX, exchange.question);
        rows.extend(wrap(&question, width).into_iter().map(|r| (r, you)));
        let (answer, style) = match &exchange.answer {
            Answer::Pending => (format!("{}{}", ASSISTANT_PREFIX, ui.spinner()), waiting),
            Answer::Replied(text) => (format!("{}{}", ASSISTANT_PREFIX, text), ai),
            Answer::Failed(msg) => (format!("{}[error] {}", ASSISTANT_PREFIX, msg), failed),
        };
        rows.extend(wrap(&answer, width).into_iter().map(|r| (r, style)));
    }
    rows
}

fn layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// 1 フレーム分を描画する
pub fn render(frame: &mut Frame, ui: &UiState) {
    let [chat_area, input_area, hint_area] = layout(frame.area());

    let chat_block = Block::default().borders(Borders::ALL).title(" Chat ");
    let inner = chat_block.inner(chat_area);
    let rows = chat_rows(ui, inner.width as usize);
    let skip = rows.len().saturating_sub(inner.height as usize);
    let lines: Vec<Line> = rows
        .into_iter()
        .skip(skip)
        .map(|(text, style)| Line::from(Span::styled(text, style)))
        .collect();
    frame.render_widget(Paragraph::new(lines).block(chat_block), chat_area);

    let input_block = Block::default().borders(Borders::ALL).title(" Input ");
    let inner = input_block.inner(input_area);
    let cursor_col = UnicodeWidthStr::width(ui.input.before_cursor()) as u16;
    let offset = (cursor_col + 1).saturating_sub(inner.width);
    frame.render_widget(
        Paragraph::new(ui.input.text())
            .block(input_block)
            .scroll((0, offset)),
        input_area,
    );
    frame.set_cursor_position((inner.x + cursor_col.saturating_sub(offset), inner.y));

    let hint = if ui.pending {
        format!("{} waiting for reply...  {}", ui.spinner(), HINT)
    } else {
        HINT.to_string()
    };
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        hint_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::interactive::Exchange;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_wrap_by_display_width() {
        assert_eq!(wrap("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(wrap("", 4), vec![""]);
        assert_eq!(wrap("ab\ncd", 10), vec!["ab", "cd"]);
        // 全角は幅 2
        assert_eq!(wrap("あいう", 4), vec!["あい", "う"]);
        assert_eq!(wrap("x", 0), vec!["x"]);
    }

    #[test]
    fn test_chat_rows_prefixes_and_blank_separator() {
        let ui = UiState {
            exchanges: vec![
                Exchange {
                    question: "Hello".into(),
                    answer: Answer::Replied("Hi there".into()),
                },
                Exchange {
                    question: "again".into(),
                    answer: Answer::Failed("HTTP request failed".into()),
                },
            ],
            ..UiState::default()
        };
        let rows: Vec<String> = chat_rows(&ui, 40).into_iter().map(|(r, _)| r).collect();
        assert_eq!(
            rows,
            vec![
                "YOU: Hello",
                "AI: Hi there",
                "",
                "YOU: again",
                "AI: [error] HTTP request failed",
            ]
        );
    }

    #[test]
    fn test_render_shows_latest_rows_and_hint() {
        let exchanges = (0..10)
            .map(|i| Exchange {
                question: format!("q{}", i),
                answer: Answer::Replied(format!("a{}", i)),
            })
            .collect();
        let ui = UiState {
            exchanges,
            ..UiState::default()
        };
        let mut terminal = Terminal::new(TestBackend::new(50, 12)).unwrap();
        terminal.draw(|f| render(f, &ui)).unwrap();
        let text = screen_text(&terminal).join("\n");
        assert!(text.contains("AI: a9"));
        assert!(!text.contains("YOU: q0"));
        assert!(text.contains("Enter: send"));
    }
}
