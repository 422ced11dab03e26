//! 全画面モードの実行部（ratatui + crossterm）
//!
//! 端末の raw モード・代替スクリーンの管理、イベントループ、補完呼び出しのワーカースレッドを持つ。
//! 状態遷移そのものは `usecase::interactive` に任せる。

pub mod keymap;
pub mod view;

use crate::ports::outbound::InterruptChecker;
use crate::usecase::chat_session::ChatSession;
use crate::usecase::interactive::{InteractiveSession, UiCommand, UiEvent, Viewport};
use common::error::Error;
use common::llm::{CompletionRequest, LlmDriver};
use common::ports::outbound::{emit, Log, LogLevel, LogRecord};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

type Backend = CrosstermBackend<io::Stdout>;

fn tui_err(e: io::Error) -> Error {
    Error::tui(e.to_string())
}

/// 端末の状態を保持し、Drop で必ず元に戻す
struct TerminalGuard {
    terminal: Terminal<Backend>,
    alternate: bool,
}

impl TerminalGuard {
    fn enter() -> Result<Self, Error> {
        enable_raw_mode().map_err(tui_err)?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(tui_err(e));
        }
        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self {
                terminal,
                alternate: true,
            }),
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                Err(tui_err(e))
            }
        }
    }

    fn set_alternate(&mut self, on: bool) -> Result<(), Error> {
        if on == self.alternate {
            return Ok(());
        }
        if on {
            execute!(self.terminal.backend_mut(), EnterAlternateScreen).map_err(tui_err)?;
        } else {
            execute!(self.terminal.backend_mut(), LeaveAlternateScreen).map_err(tui_err)?;
        }
        self.alternate = on;
        self.terminal.clear().map_err(tui_err)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        if self.alternate {
            let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        }
        let _ = self.terminal.show_cursor();
    }
}

/// 補完呼び出しを別スレッドで行い、結果をイベントとして送り返す
fn spawn_completion(driver: LlmDriver, request: CompletionRequest, tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let result = driver.query(&request);
        let _ = tx.send(UiEvent::CompletionFinished(result));
    });
}

/// 溜まっているワーカーの結果と端末イベント 1 つ分を集める（端末イベントが無ければ Tick）
fn collect_events(rx: &Receiver<UiEvent>) -> Result<Vec<UiEvent>, Error> {
    let mut events: Vec<UiEvent> = rx.try_iter().collect();
    if !event::poll(TICK).map_err(tui_err)? {
        events.push(UiEvent::Tick);
        return Ok(events);
    }
    match event::read().map_err(tui_err)? {
        Event::Key(key) => {
            if let Some(key) = keymap::map_key(&key) {
                events.push(UiEvent::Key(key));
            }
        }
        Event::Resize(width, height) => events.push(UiEvent::Resize { width, height }),
        _ => {}
    }
    Ok(events)
}

/// 全画面モードを実行する。終了キーか割り込みで `Ok(0)`。
pub fn run_interactive(
    session: ChatSession,
    interrupt: &dyn InterruptChecker,
    log: Arc<dyn Log>,
) -> Result<i32, Error> {
    let mut guard = TerminalGuard::enter()?;
    let (width, height) = terminal::size().map_err(tui_err)?;
    let mut app = InteractiveSession::new(session, true, Viewport { width, height });
    let (tx, rx) = mpsc::channel();

    loop {
        guard
            .terminal
            .draw(|frame| view::render(frame, app.ui()))
            .map_err(tui_err)?;
        if interrupt.is_interrupted() {
            emit(
                log.as_ref(),
                LogRecord::new(LogLevel::Info, "interrupted").layer("tui").kind("lifecycle"),
            );
            return Ok(0);
        }
        for ev in collect_events(&rx)? {
            for cmd in app.update(ev) {
                match cmd {
                    UiCommand::Dispatch(request) => {
                        spawn_completion(app.session().driver().clone(), request, tx.clone());
                    }
                    UiCommand::ToggleScreen { full_screen } => {
                        guard.set_alternate(full_screen)?;
                        emit(
                            log.as_ref(),
                            LogRecord::new(LogLevel::Debug, "screen toggled")
                                .layer("tui")
                                .field("full_screen", full_screen),
                        );
                    }
                    UiCommand::Quit => return Ok(0),
                }
            }
        }
    }
}
