use crate::adapter::StubClient;
use crate::domain::Key;
use crate::usecase::chat_session::ChatSession;
use crate::usecase::interactive::{Answer, InteractiveSession, UiCommand, UiEvent, Viewport};
use common::adapter::NoopLog;
use common::domain::ModelName;
use common::error::Error;
use common::llm::{EndpointConfig, LlmDriver};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

fn interactive(client: Arc<StubClient>, system: Option<&str>) -> InteractiveSession {
    let driver = LlmDriver::new(
        client,
        EndpointConfig::new("sk-test", None).headers(),
        Arc::new(NoopLog),
    );
    let session = ChatSession::new(
        driver,
        ModelName::new("gpt-3.5-turbo"),
        system.map(str::to_string),
        None,
        Arc::new(NoopLog),
    );
    InteractiveSession::new(session, true, Viewport { width: 80, height: 24 })
}

/// 1 行入力して Enter を押し、補完をワーカースレッドで実行して結果を反映する
fn submit_and_complete(app: &mut InteractiveSession, text: &str) {
    for c in text.chars() {
        app.update(UiEvent::Key(Key::Char(c)));
    }
    let cmds = app.update(UiEvent::Key(Key::Enter));
    let request = match cmds.into_iter().next() {
        Some(UiCommand::Dispatch(r)) => r,
        other => panic!("expected dispatch, got {:?}", other),
    };
    let (tx, rx) = mpsc::channel();
    let driver = app.session().driver().clone();
    thread::spawn(move || {
        let _ = tx.send(UiEvent::CompletionFinished(driver.query(&request)));
    });
    // 待っている間も編集・リサイズは受け付ける
    app.update(UiEvent::Resize { width: 100, height: 30 });
    app.update(UiEvent::Tick);
    let finished = rx.recv().unwrap();
    app.update(finished);
}

#[test]
fn test_turns_through_worker_thread() {
    let client = Arc::new(StubClient::replying(&["Hi there", "Fine"]));
    let mut app = interactive(Arc::clone(&client), Some("be brief"));
    submit_and_complete(&mut app, "Hello");
    submit_and_complete(&mut app, "How are you?");

    let ui = app.ui();
    assert_eq!(ui.exchanges.len(), 2);
    assert_eq!(ui.exchanges[0].answer, Answer::Replied("Hi there".into()));
    assert_eq!(ui.exchanges[1].question, "How are you?");
    assert_eq!(ui.exchanges[1].answer, Answer::Replied("Fine".into()));
    assert_eq!(ui.viewport, Viewport { width: 100, height: 30 });
    assert!(!ui.pending);

    // system + 2 往復
    assert_eq!(app.session().transcript().len(), 5);
    let payloads = client.payloads();
    assert_eq!(payloads[1]["messages"].as_array().unwrap().len(), 4);
}

#[test]
fn test_malformed_reply_shows_placeholder() {
    let client = Arc::new(StubClient::new(vec![Ok("{}".to_string())]));
    let mut app = interactive(client, None);
    submit_and_complete(&mut app, "Hello");
    assert_eq!(
        app.ui().exchanges[0].answer,
        Answer::Replied("[no response]".into())
    );
    assert_eq!(app.session().transcript().len(), 2);
}

#[test]
fn test_transport_error_is_not_fatal() {
    let client = Arc::new(StubClient::new(vec![
        Err(Error::http("HTTP request failed: timed out")),
        Ok(r#"{"choices":[{"message":{"content":"back"}}]}"#.to_string()),
    ]));
    let mut app = interactive(Arc::clone(&client), None);
    submit_and_complete(&mut app, "first");
    assert!(matches!(&app.ui().exchanges[0].answer, Answer::Failed(m) if m.contains("timed out")));
    assert_eq!(app.session().transcript().len(), 1);

    submit_and_complete(&mut app, "second");
    assert_eq!(app.ui().exchanges[1].answer, Answer::Replied("back".into()));
    // 失敗したターンの user 発話も次のリクエストに含まれる
    let msgs = client.payloads()[1]["messages"].as_array().unwrap().clone();
    assert_eq!(msgs.len(), 2);
    assert_eq!(msgs[0]["content"], "first");
    assert_eq!(msgs[1]["content"], "second");
}

#[test]
fn test_quit_while_pending() {
    let client = Arc::new(StubClient::replying(&["late"]));
    let mut app = interactive(client, None);
    app.update(UiEvent::Key(Key::Char('x')));
    assert!(matches!(
        app.update(UiEvent::Key(Key::Enter)).as_slice(),
        [UiCommand::Dispatch(_)]
    ));
    assert!(matches!(
        app.update(UiEvent::Key(Key::Interrupt)).as_slice(),
        [UiCommand::Quit]
    ));
    assert!(app.ui().quitting);
}
