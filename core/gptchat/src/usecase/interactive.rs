//! 全画面モードの状態遷移
//!
//! `update(event) -> commands` の純粋な遷移関数として書き、端末・スレッドには触れない。
//! 補完呼び出しは `UiCommand::Dispatch` として外に出し、結果は
//! `UiEvent::CompletionFinished` として戻ってくる。待ち中も終了・リサイズ・入力編集は受け付ける。

use crate::domain::{InputBuffer, Key};
use crate::usecase::chat_session::ChatSession;
use common::error::Error;
use common::llm::{CompletionRequest, Reply};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// 端末の表示領域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// 画面に表示する 1 往復分の回答状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Pending,
    Replied(String),
    Failed(String),
}

/// 画面に表示する質問と回答の組
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub question: String,
    pub answer: Answer,
}

/// イベントループから渡される入力
#[derive(Debug)]
pub enum UiEvent {
    Key(Key),
    Resize { width: u16, height: u16 },
    /// ワーカーからの補完結果
    CompletionFinished(Result<Reply, Error>),
    /// 入力が無いまま一定時間経過した
    Tick,
}

/// 遷移の結果としてイベントループに依頼する副作用
#[derive(Debug)]
pub enum UiCommand {
    /// このリクエストで補完呼び出しを開始する
    Dispatch(CompletionRequest),
    /// 全画面（代替スクリーン）と通常画面を切り替える
    ToggleScreen { full_screen: bool },
    Quit,
}

/// 画面の状態
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub input: InputBuffer,
    pub exchanges: Vec<Exchange>,
    pub viewport: Viewport,
    pub pending: bool,
    pub quitting: bool,
    pub full_screen: bool,
    pub(crate) ticks: usize,
}

impl UiState {
    /// 待ち中に表示するスピナーの 1 コマ
    pub fn spinner(&self) -> &'static str {
        SPINNER[self.ticks % SPINNER.len()]
    }
}

/// 会話セッションと画面状態をまとめた全画面モードのセッション
pub struct InteractiveSession {
    session: ChatSession,
    ui: UiState,
}

impl InteractiveSession {
    pub fn new(session: ChatSession, full_screen: bool, viewport: Viewport) -> Self {
        Self {
            session,
            ui: UiState {
                full_screen,
                viewport,
                ..UiState::default()
            },
        }
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// イベントを 1 つ適用し、実行すべきコマンドを返す
    pub fn update(&mut self, event: UiEvent) -> Vec<UiCommand> {
        match event {
            UiEvent::Resize { width, height } => {
                self.ui.viewport = Viewport { width, height };
                vec![]
            }
            UiEvent::Tick => {
                if self.ui.pending {
                    self.ui.ticks = self.ui.ticks.wrapping_add(1);
                }
                vec![]
            }
            UiEvent::Key(key) if key.is_quit() => {
                self.ui.quitting = true;
                vec![UiCommand::Quit]
            }
            UiEvent::Key(Key::ToggleScreen) => {
                self.ui.full_screen = !self.ui.full_screen;
                vec![UiCommand::ToggleScreen {
                    full_screen: self.ui.full_screen,
                }]
            }
            UiEvent::Key(Key::Enter) => self.submit(),
            UiEvent::Key(key) => {
                self.ui.input.handle(key);
                vec![]
            }
            UiEvent::CompletionFinished(result) => {
                self.apply_completion(result);
                vec![]
            }
        }
    }

    fn submit(&mut self) -> Vec<UiCommand> {
        // 1 往復ずつ。待ち中の Enter は入力を残したまま無視する
        if self.ui.pending {
            return vec![];
        }
        let question = self.ui.input.take();
        let request = self.session.begin_turn(question.clone());
        self.ui.exchanges.push(Exchange {
            question,
            answer: Answer::Pending,
        });
        self.ui.pending = true;
        self.ui.ticks = 0;
        vec![UiCommand::Dispatch(request)]
    }

    fn apply_completion(&mut self, result: Result<Reply, Error>) {
        if !self.ui.pending {
            return;
        }
        self.ui.pending = false;
        let answer = match self.session.finish_turn(result) {
            Ok(reply) => Answer::Replied(reply.display_text()),
            Err(e) => Answer::Failed(e.to_string()),
        };
        if let Some(last) = self.ui.exchanges.last_mut() {
            last.answer = answer;
        }
    }
}
