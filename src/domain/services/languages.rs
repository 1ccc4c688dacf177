#[cfg(test)]
#[path = "languages_test.rs"]
mod tests;

use crate::domain::models::Gateway;
use crate::domain::models::LanguageCatalog;

pub const FALLBACK_NOTICE: &str = "Could not load all languages. Using default set instead.";

pub struct Languages {}

impl Languages {
    /// Fetches the gateway's catalog, settling for the built-in list on any
    /// failure. This never errors.
    pub async fn load(gateway: &(dyn Gateway + Send + Sync)) -> LanguageCatalog {
        match gateway.list_languages().await {
            Ok(languages) => {
                if languages.is_empty() {
                    tracing::warn!(gateway = %gateway.name(), "Gateway returned no languages");
                    return LanguageCatalog::fallback(FALLBACK_NOTICE);
                }

                tracing::debug!(
                    gateway = %gateway.name(),
                    count = languages.len(),
                    "Loaded languages"
                );
                return LanguageCatalog::new(languages);
            }
            Err(err) => {
                tracing::warn!(gateway = %gateway.name(), error = ?err, "Failed to load languages");
                return LanguageCatalog::fallback(FALLBACK_NOTICE);
            }
        }
    }
}
