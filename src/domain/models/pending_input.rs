#[cfg(test)]
#[path = "pending_input_test.rs"]
mod tests;

use super::TranslateError;
use super::TranslationRequest;
use super::AUTO_DETECT;

/// Text and language selections that haven't been translated yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingInput {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
    pub auto_detect: bool,
}

impl PendingInput {
    pub fn new(source_language: &str, target_language: &str) -> PendingInput {
        return PendingInput {
            text: "".to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            auto_detect: false,
        };
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn swap_languages(&mut self) {
        std::mem::swap(&mut self.source_language, &mut self.target_language);
    }

    /// The source tag handed to the gateway: `auto` when detection is on.
    pub fn effective_source(&self) -> &str {
        if self.auto_detect {
            return AUTO_DETECT;
        }

        return &self.source_language;
    }

    pub fn char_count(&self) -> usize {
        return self.text.chars().count();
    }

    pub fn is_blank(&self) -> bool {
        return self.text.trim().is_empty();
    }

    pub fn to_request(&self) -> Result<TranslationRequest, TranslateError> {
        if self.is_blank() {
            return Err(TranslateError::EmptyInput);
        }

        return Ok(TranslationRequest::new(
            &self.text,
            self.effective_source(),
            &self.target_language,
        ));
    }
}
