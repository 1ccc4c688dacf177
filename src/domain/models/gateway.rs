#[cfg(test)]
#[path = "gateway_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::LanguageMap;
use super::AUTO_DETECT;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum GatewayName {
    Google,
    LibreTranslate,
}

impl GatewayName {
    pub fn parse(text: String) -> Option<GatewayName> {
        return GatewayName::iter().find(|e| return e.to_string() == text);
    }
}

/// Everything a gateway needs to perform one translation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

impl TranslationRequest {
    pub fn new(text: &str, source_language: &str, target_language: &str) -> TranslationRequest {
        return TranslationRequest {
            text: text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        };
    }

    pub fn is_auto_detect(&self) -> bool {
        return self.source_language == AUTO_DETECT;
    }
}

#[async_trait]
pub trait Gateway {
    fn name(&self) -> GatewayName;

    /// Used at startup to verify the translation service can be reached. A
    /// failure here is reported to the user but never stops a session.
    async fn health_check(&self) -> Result<()>;

    /// Supported languages as display name to language code. Callers are
    /// expected to fall back to a built-in list when this fails.
    async fn list_languages(&self) -> Result<LanguageMap>;

    /// Translates the request's text. Source and target may be given either
    /// as a display name or as a code, and the source may be `auto`.
    async fn translate(&self, request: &TranslationRequest) -> Result<String>;
}

pub type GatewayBox = Box<dyn Gateway + Send + Sync>;
