use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum TranslationErrorKind {
    Provider,
    Timeout,
}

/// Failures of a single translation attempt. None of these are fatal, and
/// none of them change the pending input or the history.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("Please enter text to translate!")]
    EmptyInput,

    #[error("A translation is already in progress.")]
    InFlight,

    #[error("Translation error ({kind}): {message}")]
    Translation {
        kind: TranslationErrorKind,
        message: String,
    },
}

impl TranslateError {
    pub fn provider(message: &str) -> TranslateError {
        return TranslateError::Translation {
            kind: TranslationErrorKind::Provider,
            message: message.to_string(),
        };
    }

    pub fn timeout(message: &str) -> TranslateError {
        return TranslateError::Translation {
            kind: TranslationErrorKind::Timeout,
            message: message.to_string(),
        };
    }
}

/// Raised when a history index was computed against a stale view.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("History index {index} is out of range, there are {len} entries.")]
pub struct OutOfRangeError {
    pub index: usize,
    pub len: usize,
}
