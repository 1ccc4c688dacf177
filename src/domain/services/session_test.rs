use std::num::NonZeroUsize;
use std::time::Duration;

use super::translate;
use super::AttemptStatus;
use super::SessionState;
use crate::domain::models::OutOfRangeError;
use crate::domain::models::PendingInput;
use crate::domain::models::StubGateway;
use crate::domain::models::TranslateError;
use crate::domain::models::TranslationErrorKind;
use crate::domain::models::TranslationRecord;
use crate::domain::models::TranslationRequest;

const TIMEOUT: Duration = Duration::from_secs(5);

impl SessionState {
    fn status(&self) -> AttemptStatus {
        return self.status;
    }
}

fn session(history_size: usize) -> SessionState {
    return SessionState::new(
        "test",
        PendingInput::new("english", "french"),
        NonZeroUsize::new(history_size).unwrap(),
    );
}

fn record(text: &str) -> TranslationRecord {
    return TranslationRecord::new(TranslationRequest::new(text, "english", "french"), text);
}

#[tokio::test]
async fn it_does_not_call_the_gateway_for_blank_input() {
    let gateway = StubGateway::mapping(&[]);
    let mut input = PendingInput::new("english", "french");
    input.set_text("   ");

    let res = translate(&input, &gateway, TIMEOUT).await;

    assert_eq!(res, Err(TranslateError::EmptyInput));
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn it_builds_a_record() {
    let gateway = StubGateway::mapping(&[("hello", "bonjour")]);
    let mut input = PendingInput::new("english", "french");
    input.set_text("hello");

    let record = translate(&input, &gateway, TIMEOUT).await.unwrap();

    assert_eq!(record.source_language, "english");
    assert_eq!(record.target_language, "french");
    assert_eq!(record.original_text, "hello");
    assert_eq!(record.translated_text, "bonjour");
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn it_records_auto_detected_sources() {
    let gateway = StubGateway::mapping(&[("hola", "bonjour")]);
    let mut input = PendingInput::new("spanish", "french");
    input.set_text("hola");
    input.auto_detect = true;

    let record = translate(&input, &gateway, TIMEOUT).await.unwrap();

    assert_eq!(record.source_language, "auto");
}

#[tokio::test]
async fn it_carries_the_gateway_message() {
    let gateway = StubGateway::failing("Too many requests");
    let mut input = PendingInput::new("english", "french");
    input.set_text("hello");

    let res = translate(&input, &gateway, TIMEOUT).await;

    assert_eq!(
        res,
        Err(TranslateError::Translation {
            kind: TranslationErrorKind::Provider,
            message: "Too many requests".to_string(),
        })
    );
}

#[tokio::test]
async fn it_times_out() {
    let gateway = StubGateway::hanging();
    let mut input = PendingInput::new("english", "french");
    input.set_text("hello");

    let res = translate(&input, &gateway, Duration::from_millis(20)).await;

    match res {
        Err(TranslateError::Translation { kind, .. }) => {
            assert_eq!(kind, TranslationErrorKind::Timeout);
        }
        _ => panic!("expected a timeout"),
    }
}

#[tokio::test]
async fn it_commits_successful_translations() {
    let gateway = StubGateway::mapping(&[("hello", "bonjour")]);
    let mut state = session(5);
    state.pending.set_text("hello");

    let record = state.submit(&gateway, TIMEOUT).await.unwrap();

    assert_eq!(record.original_text, "hello");
    assert_eq!(record.translated_text, "bonjour");
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.current_translation, Some("bonjour".to_string()));
    assert_eq!(state.pending.text, "hello");
    assert_eq!(state.status(), AttemptStatus::Idle);
}

#[tokio::test]
async fn it_preserves_state_on_failure() {
    let gateway = StubGateway::failing("Network is unreachable");
    let mut state = session(5);
    state.pending.set_text("hello");

    let res = state.submit(&gateway, TIMEOUT).await;

    assert!(matches!(res, Err(TranslateError::Translation { .. })));
    assert_eq!(state.history.len(), 0);
    assert_eq!(state.pending.text, "hello");
    assert_eq!(state.current_translation, None);
    assert_eq!(state.status(), AttemptStatus::Idle);
}

#[tokio::test]
async fn it_keeps_previous_translation_on_failure() {
    let mut state = session(5);
    state.pending.set_text("hello");
    state
        .submit(&StubGateway::mapping(&[("hello", "bonjour")]), TIMEOUT)
        .await
        .unwrap();

    state.pending.set_text("goodbye");
    let res = state
        .submit(&StubGateway::failing("boom"), TIMEOUT)
        .await;

    assert!(res.is_err());
    assert_eq!(state.current_translation, Some("bonjour".to_string()));
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.pending.text, "goodbye");
}

#[tokio::test]
async fn it_warns_on_blank_input() {
    let gateway = StubGateway::mapping(&[]);
    let mut state = session(5);
    state.pending.set_text("\n  ");

    let res = state.submit(&gateway, TIMEOUT).await;

    assert_eq!(res, Err(TranslateError::EmptyInput));
    assert_eq!(gateway.calls(), 0);
    assert_eq!(state.status(), AttemptStatus::Idle);
    assert!(state.history.is_empty());
}

#[test]
fn it_rejects_overlapping_attempts() {
    let mut state = session(5);
    state.pending.set_text("hello");

    let request = state.begin_attempt().unwrap();
    assert_eq!(request, TranslationRequest::new("hello", "english", "french"));
    assert_eq!(state.status(), AttemptStatus::Pending);
    assert_eq!(state.begin_attempt(), Err(TranslateError::InFlight));

    state.finish_attempt(Ok(record("hello"))).unwrap();
    assert_eq!(state.status(), AttemptStatus::Idle);
    assert!(state.begin_attempt().is_ok());
}

#[tokio::test]
async fn it_rejects_submits_while_an_attempt_is_pending() {
    let gateway = StubGateway::mapping(&[("hello", "bonjour")]);
    let mut state = session(5);
    state.pending.set_text("hello");
    state.begin_attempt().unwrap();

    let res = state.submit(&gateway, TIMEOUT).await;

    assert_eq!(res, Err(TranslateError::InFlight));
    assert_eq!(gateway.calls(), 0);
    assert_eq!(state.status(), AttemptStatus::Pending);
    assert!(state.history.is_empty());
}

#[test]
fn it_stays_idle_on_blank_input() {
    let mut state = session(5);
    assert_eq!(state.begin_attempt(), Err(TranslateError::EmptyInput));
    assert_eq!(state.status(), AttemptStatus::Idle);
}

#[test]
fn it_returns_to_idle_after_failure() {
    let mut state = session(5);
    state.pending.set_text("hello");
    state.begin_attempt().unwrap();

    let res = state.finish_attempt(Err(TranslateError::provider("boom")));
    assert!(res.is_err());
    assert_eq!(state.status(), AttemptStatus::Idle);
    assert!(state.history.is_empty());
}

#[test]
fn it_replays_into_input() {
    let mut state = session(5);
    state.finish_attempt(Ok(record("first"))).unwrap();
    state.finish_attempt(Ok(record("second"))).unwrap();
    state.pending.set_text("something else");

    state.replay_into_input(1).unwrap();
    assert_eq!(state.pending.text, "first");

    state.replay_into_input(0).unwrap();
    assert_eq!(state.pending.text, "second");
}

#[test]
fn it_fails_replay_without_touching_input() {
    let mut state = session(5);
    state.pending.set_text("draft");

    let res = state.replay_into_input(0);

    assert_eq!(res, Err(OutOfRangeError { index: 0, len: 0 }));
    assert_eq!(state.pending.text, "draft");
}

#[test]
fn it_clears_history_and_current_translation() {
    let mut state = session(5);
    state.finish_attempt(Ok(record("first"))).unwrap();
    state.clear_history();

    assert!(state.history.list().is_empty());
    assert_eq!(state.current_translation, None);
}

#[test]
fn it_shrinks_history() {
    let mut state = session(2);
    for text in ["A", "B", "C"] {
        state.finish_attempt(Ok(record(text))).unwrap();
    }

    let originals = |state: &SessionState| {
        return state
            .history
            .list()
            .iter()
            .map(|e| return e.original_text.to_string())
            .collect::<Vec<String>>();
    };
    assert_eq!(originals(&state), vec!["C", "B"]);

    state.set_history_size(NonZeroUsize::new(1).unwrap());
    assert_eq!(originals(&state), vec!["C"]);
}

#[test]
fn it_swaps_languages() {
    let mut state = session(5);
    state.swap_languages();

    assert_eq!(state.pending.source_language, "french");
    assert_eq!(state.pending.target_language, "english");
    assert_eq!(state.default_save_file_name(), "translation_french_to_english.txt");
}
