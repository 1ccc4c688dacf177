#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::num::NonZeroUsize;
use std::time::Duration;

use tokio::time;

use super::HistoryStore;
use crate::domain::models::Gateway;
use crate::domain::models::OutOfRangeError;
use crate::domain::models::PendingInput;
use crate::domain::models::TranslateError;
use crate::domain::models::TranslationRecord;
use crate::domain::models::TranslationRequest;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttemptStatus {
    Idle,
    Pending,
}

/// Sends one request through the gateway. Provider failures and timeouts are
/// both reported as `TranslateError::Translation`.
pub async fn translate_request(
    request: TranslationRequest,
    gateway: &(dyn Gateway + Send + Sync),
    timeout: Duration,
) -> Result<TranslationRecord, TranslateError> {
    tracing::debug!(
        gateway = %gateway.name(),
        source = %request.source_language,
        target = %request.target_language,
        chars = request.text.chars().count(),
        "Translation request"
    );

    let res = time::timeout(timeout, gateway.translate(&request)).await;
    match res {
        Err(_) => {
            tracing::warn!(
                gateway = %gateway.name(),
                timeout_ms = timeout.as_millis() as u64,
                "Translation timed out"
            );
            return Err(TranslateError::timeout(&format!(
                "No response from {} after {}ms",
                gateway.name(),
                timeout.as_millis()
            )));
        }
        Ok(Err(err)) => {
            tracing::error!(error = ?err, "Translation failed");
            return Err(TranslateError::provider(&err.to_string()));
        }
        Ok(Ok(translated)) => {
            return Ok(TranslationRecord::new(request, &translated));
        }
    }
}

/// Translates pending input without touching any session state. Blank input
/// never reaches the gateway.
pub async fn translate(
    input: &PendingInput,
    gateway: &(dyn Gateway + Send + Sync),
    timeout: Duration,
) -> Result<TranslationRecord, TranslateError> {
    let request = input.to_request()?;
    return translate_request(request, gateway, timeout).await;
}

/// Everything one user session owns: pending input, history, and the most
/// recent translation.
pub struct SessionState {
    pub id: String,
    pub pending: PendingInput,
    pub history: HistoryStore,
    pub current_translation: Option<String>,
    status: AttemptStatus,
}

impl SessionState {
    pub fn new(id: &str, pending: PendingInput, history_size: NonZeroUsize) -> SessionState {
        return SessionState {
            id: id.to_string(),
            pending,
            history: HistoryStore::new(history_size),
            current_translation: None,
            status: AttemptStatus::Idle,
        };
    }

    /// Moves the session from idle to pending and returns the request to send.
    /// Nothing changes when the input is blank.
    pub fn begin_attempt(&mut self) -> Result<TranslationRequest, TranslateError> {
        if self.status == AttemptStatus::Pending {
            return Err(TranslateError::InFlight);
        }

        let request = self.pending.to_request()?;
        self.status = AttemptStatus::Pending;

        return Ok(request);
    }

    /// Commits a finished attempt. Successful records become the current
    /// translation and are added to the history; failures leave everything
    /// except the status untouched.
    pub fn finish_attempt(
        &mut self,
        result: Result<TranslationRecord, TranslateError>,
    ) -> Result<TranslationRecord, TranslateError> {
        self.status = AttemptStatus::Idle;

        let record = result?;
        self.current_translation = Some(record.translated_text.to_string());
        self.history.append(record.clone());

        return Ok(record);
    }

    /// Translates the pending input and commits the outcome. Blank input is
    /// rejected by `translate` without reaching the gateway.
    pub async fn submit(
        &mut self,
        gateway: &(dyn Gateway + Send + Sync),
        timeout: Duration,
    ) -> Result<TranslationRecord, TranslateError> {
        if self.status == AttemptStatus::Pending {
            return Err(TranslateError::InFlight);
        }

        self.status = AttemptStatus::Pending;
        let res = translate(&self.pending, gateway, timeout).await;

        return self.finish_attempt(res);
    }

    /// Copies the original text of a history entry, newest first, back into
    /// the pending input.
    pub fn replay_into_input(&mut self, index: usize) -> Result<(), OutOfRangeError> {
        let text = self.history.replay(index)?;
        self.pending.set_text(&text);

        return Ok(());
    }

    pub fn swap_languages(&mut self) {
        self.pending.swap_languages();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.current_translation = None;
    }

    pub fn set_history_size(&mut self, history_size: NonZeroUsize) {
        self.history.set_capacity(history_size);
    }

    pub fn default_save_file_name(&self) -> String {
        return format!(
            "translation_{}_to_{}.txt",
            self.pending.source_language, self.pending.target_language
        );
    }
}
