#[cfg(test)]
#[path = "libretranslate_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use tokio::sync::OnceCell;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::resolve_tag;
use crate::domain::models::Gateway;
use crate::domain::models::GatewayName;
use crate::domain::models::LanguageMap;
use crate::domain::models::TranslationRequest;
use crate::domain::models::AUTO_DETECT;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Language {
    code: String,
    name: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TranslateRequest {
    q: String,
    source: String,
    target: String,
    format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

pub struct LibreTranslate {
    url: String,
    api_key: String,
    timeout: String,
    languages: OnceCell<LanguageMap>,
}

impl Default for LibreTranslate {
    fn default() -> LibreTranslate {
        return LibreTranslate {
            url: Config::get(ConfigKey::LibreTranslateURL),
            api_key: Config::get(ConfigKey::LibreTranslateApiKey),
            timeout: Config::get(ConfigKey::GatewayTimeout),
            languages: OnceCell::new(),
        };
    }
}

impl LibreTranslate {
    async fn fetch_languages(&self) -> Result<LanguageMap> {
        let res = reqwest::Client::new()
            .get(format!("{url}/languages", url = self.url))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to list LibreTranslate languages"
            );
            bail!("Failed to list LibreTranslate languages");
        }

        let languages = res
            .json::<Vec<Language>>()
            .await?
            .into_iter()
            .map(|language| return (language.name.to_lowercase(), language.code))
            .collect::<LanguageMap>();

        return Ok(languages);
    }

    /// The catalog is fetched once per gateway and reused for name lookups.
    async fn catalog(&self) -> Result<&LanguageMap> {
        return self
            .languages
            .get_or_try_init(|| return self.fetch_languages())
            .await;
    }
}

/// Maps a display name to its code. Tags the catalog doesn't know, or any tag
/// while the catalog is unavailable, are sent as they are and left for the
/// server to judge.
fn resolve_code(languages: Option<&LanguageMap>, tag: &str) -> String {
    return languages
        .and_then(|languages| return resolve_tag(languages, tag))
        .unwrap_or_else(|| return tag.to_string());
}

#[async_trait]
impl Gateway for LibreTranslate {
    fn name(&self) -> GatewayName {
        return GatewayName::LibreTranslate;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        let res = reqwest::Client::new()
            .get(format!("{url}/languages", url = self.url))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "LibreTranslate is not running");
                bail!("LibreTranslate is not running");
            }
        };

        if res.status() != 200 {
            tracing::error!(status = res.status().as_u16(), "LibreTranslate health check failed");
            bail!("LibreTranslate health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn list_languages(&self) -> Result<LanguageMap> {
        return Ok(self.catalog().await?.clone());
    }

    #[allow(clippy::implicit_return)]
    async fn translate(&self, request: &TranslationRequest) -> Result<String> {
        let languages = self.catalog().await.ok();
        let mut source = AUTO_DETECT.to_string();
        if !request.is_auto_detect() {
            source = resolve_code(languages, &request.source_language);
        }

        let mut req = TranslateRequest {
            q: request.text.to_string(),
            source,
            target: resolve_code(languages, &request.target_language),
            format: "text".to_string(),
            api_key: None,
        };
        if !self.api_key.is_empty() {
            req.api_key = Some(self.api_key.to_string());
        }

        let res = reqwest::Client::new()
            .post(format!("{url}/translate", url = self.url))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            tracing::error!(status, "Failed to make translation request to LibreTranslate");

            if let Ok(err) = res.json::<ErrorResponse>().await {
                bail!(err.error);
            }
            bail!(format!("LibreTranslate responded with status {status}"));
        }

        let body = res.json::<TranslateResponse>().await?;
        tracing::debug!(body = ?body, "Translation response");

        return Ok(body.translated_text);
    }
}
