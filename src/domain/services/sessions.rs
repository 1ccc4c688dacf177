#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;

use std::num::NonZeroUsize;
use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::SessionState;
use super::MAX_HISTORY_SIZE;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::PendingInput;

/// A session is only ever touched through its own lock, so a pending gateway
/// call blocks other commands for that session and nobody else.
pub type SessionHandle = Arc<Mutex<SessionState>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionDefaults {
    pub source_language: String,
    pub target_language: String,
    pub auto_detect: bool,
    pub history_size: NonZeroUsize,
}

impl SessionDefaults {
    pub fn from_config() -> Result<SessionDefaults> {
        let history_size = parse_history_size(&Config::get(ConfigKey::HistorySize))?;
        let auto_detect = Config::get(ConfigKey::AutoDetect);

        return Ok(SessionDefaults {
            source_language: Config::get(ConfigKey::SourceLanguage),
            target_language: Config::get(ConfigKey::TargetLanguage),
            auto_detect: auto_detect == "true",
            history_size,
        });
    }

    pub fn pending_input(&self) -> PendingInput {
        let mut pending = PendingInput::new(&self.source_language, &self.target_language);
        pending.auto_detect = self.auto_detect;

        return pending;
    }
}

pub fn parse_history_size(text: &str) -> Result<NonZeroUsize> {
    let size = text.trim().parse::<usize>().ok().and_then(NonZeroUsize::new);
    match size {
        Some(size) if size.get() <= MAX_HISTORY_SIZE => return Ok(size),
        _ => bail!(format!(
            "History size must be between 1 and {MAX_HISTORY_SIZE}, got '{text}'"
        )),
    }
}

#[derive(Default)]
pub struct Sessions {
    sessions: DashMap<String, SessionHandle>,
}

impl Sessions {
    pub fn create_id() -> String {
        return Uuid::new_v4()
            .to_string()
            .split('-')
            .enumerate()
            .filter_map(|(idx, str)| {
                if idx > 1 {
                    return None;
                }
                return Some(str);
            })
            .collect::<Vec<&str>>()
            .join("-");
    }

    pub fn create(&self, defaults: &SessionDefaults) -> SessionHandle {
        let id = Sessions::create_id();
        let state = SessionState::new(&id, defaults.pending_input(), defaults.history_size);
        let handle = Arc::new(Mutex::new(state));
        self.sessions.insert(id.to_string(), handle.clone());

        tracing::debug!(id = %id, "Session created");
        return handle;
    }

    /// Ends a session. Its history goes with it.
    pub fn remove(&self, id: &str) -> bool {
        return self.sessions.remove(id).is_some();
    }
}
