use super::translation_outcome;
use crate::domain::models::MessageType;
use crate::domain::models::TranslateError;
use crate::domain::models::TranslationRecord;
use crate::domain::models::TranslationRequest;

#[test]
fn it_prints_successful_translations() {
    let record = TranslationRecord::new(
        TranslationRequest::new("hello", "english", "french"),
        "bonjour",
    );

    assert_eq!(translation_outcome(Ok(record)), Ok("bonjour".to_string()));
}

#[test]
fn it_warns_on_blank_input() {
    let msg = translation_outcome(Err(TranslateError::EmptyInput)).unwrap_err();

    assert_eq!(msg.message_type(), MessageType::Warning);
    insta::assert_snapshot!(msg.text, @"Please enter text to translate!");
}

#[test]
fn it_reports_gateway_failures_as_errors() {
    let msg = translation_outcome(Err(TranslateError::provider("Network is unreachable")))
        .unwrap_err();

    assert_eq!(msg.message_type(), MessageType::Error);
    insta::assert_snapshot!(msg.text, @"Translation error (provider): Network is unreachable");

    let msg = translation_outcome(Err(TranslateError::timeout("No response after 10ms")))
        .unwrap_err();
    assert_eq!(msg.message_type(), MessageType::Error);
}
