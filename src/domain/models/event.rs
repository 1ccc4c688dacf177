use super::LanguageCatalog;
use super::Message;
use super::TranslateError;
use super::TranslationRecord;

#[derive(Debug)]
pub enum Event {
    LanguagesLoaded(LanguageCatalog),
    Notice(Message),
    TranslationCompleted(Result<TranslationRecord, TranslateError>),
}
