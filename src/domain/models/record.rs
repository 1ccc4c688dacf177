#[cfg(test)]
#[path = "record_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Local;

use super::title_case;
use super::TranslationRequest;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One completed translation. Records are never modified after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationRecord {
    pub source_language: String,
    pub target_language: String,
    pub original_text: String,
    pub translated_text: String,
    pub timestamp: DateTime<Local>,
}

impl TranslationRecord {
    pub fn new(request: TranslationRequest, translated_text: &str) -> TranslationRecord {
        return TranslationRecord::new_with_timestamp(request, translated_text, Local::now());
    }

    pub fn new_with_timestamp(
        request: TranslationRequest,
        translated_text: &str,
        timestamp: DateTime<Local>,
    ) -> TranslationRecord {
        return TranslationRecord {
            source_language: request.source_language,
            target_language: request.target_language,
            original_text: request.text,
            translated_text: translated_text.to_string(),
            timestamp,
        };
    }

    pub fn title(&self) -> String {
        return format!(
            "{} → {} ({})",
            title_case(&self.source_language),
            title_case(&self.target_language),
            self.timestamp.format(TIMESTAMP_FORMAT)
        );
    }
}
