#[cfg(test)]
#[path = "google_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::resolve_tag;
use crate::domain::models::Gateway;
use crate::domain::models::GatewayName;
use crate::domain::models::LanguageMap;
use crate::domain::models::TranslationRequest;
use crate::domain::models::AUTO_DETECT;

const LANGUAGES: [(&str, &str); 133] = [
    ("afrikaans", "af"),
    ("albanian", "sq"),
    ("amharic", "am"),
    ("arabic", "ar"),
    ("armenian", "hy"),
    ("assamese", "as"),
    ("aymara", "ay"),
    ("azerbaijani", "az"),
    ("bambara", "bm"),
    ("basque", "eu"),
    ("belarusian", "be"),
    ("bengali", "bn"),
    ("bhojpuri", "bho"),
    ("bosnian", "bs"),
    ("bulgarian", "bg"),
    ("catalan", "ca"),
    ("cebuano", "ceb"),
    ("chichewa", "ny"),
    ("chinese (simplified)", "zh-CN"),
    ("chinese (traditional)", "zh-TW"),
    ("corsican", "co"),
    ("croatian", "hr"),
    ("czech", "cs"),
    ("danish", "da"),
    ("dhivehi", "dv"),
    ("dogri", "doi"),
    ("dutch", "nl"),
    ("english", "en"),
    ("esperanto", "eo"),
    ("estonian", "et"),
    ("ewe", "ee"),
    ("filipino", "tl"),
    ("finnish", "fi"),
    ("french", "fr"),
    ("frisian", "fy"),
    ("galician", "gl"),
    ("georgian", "ka"),
    ("german", "de"),
    ("greek", "el"),
    ("guarani", "gn"),
    ("gujarati", "gu"),
    ("haitian creole", "ht"),
    ("hausa", "ha"),
    ("hawaiian", "haw"),
    ("hebrew", "iw"),
    ("hindi", "hi"),
    ("hmong", "hmn"),
    ("hungarian", "hu"),
    ("icelandic", "is"),
    ("igbo", "ig"),
    ("ilocano", "ilo"),
    ("indonesian", "id"),
    ("irish", "ga"),
    ("italian", "it"),
    ("japanese", "ja"),
    ("javanese", "jw"),
    ("kannada", "kn"),
    ("kazakh", "kk"),
    ("khmer", "km"),
    ("kinyarwanda", "rw"),
    ("konkani", "gom"),
    ("korean", "ko"),
    ("krio", "kri"),
    ("kurdish (kurmanji)", "ku"),
    ("kurdish (sorani)", "ckb"),
    ("kyrgyz", "ky"),
    ("lao", "lo"),
    ("latin", "la"),
    ("latvian", "lv"),
    ("lingala", "ln"),
    ("lithuanian", "lt"),
    ("luganda", "lg"),
    ("luxembourgish", "lb"),
    ("macedonian", "mk"),
    ("maithili", "mai"),
    ("malagasy", "mg"),
    ("malay", "ms"),
    ("malayalam", "ml"),
    ("maltese", "mt"),
    ("maori", "mi"),
    ("marathi", "mr"),
    ("meiteilon (manipuri)", "mni-Mtei"),
    ("mizo", "lus"),
    ("mongolian", "mn"),
    ("myanmar", "my"),
    ("nepali", "ne"),
    ("norwegian", "no"),
    ("odia (oriya)", "or"),
    ("oromo", "om"),
    ("pashto", "ps"),
    ("persian", "fa"),
    ("polish", "pl"),
    ("portuguese", "pt"),
    ("punjabi", "pa"),
    ("quechua", "qu"),
    ("romanian", "ro"),
    ("russian", "ru"),
    ("samoan", "sm"),
    ("sanskrit", "sa"),
    ("scots gaelic", "gd"),
    ("sepedi", "nso"),
    ("serbian", "sr"),
    ("sesotho", "st"),
    ("shona", "sn"),
    ("sindhi", "sd"),
    ("sinhala", "si"),
    ("slovak", "sk"),
    ("slovenian", "sl"),
    ("somali", "so"),
    ("spanish", "es"),
    ("sundanese", "su"),
    ("swahili", "sw"),
    ("swedish", "sv"),
    ("tajik", "tg"),
    ("tamil", "ta"),
    ("tatar", "tt"),
    ("telugu", "te"),
    ("thai", "th"),
    ("tigrinya", "ti"),
    ("tsonga", "ts"),
    ("turkish", "tr"),
    ("turkmen", "tk"),
    ("twi", "ak"),
    ("ukrainian", "uk"),
    ("urdu", "ur"),
    ("uyghur", "ug"),
    ("uzbek", "uz"),
    ("vietnamese", "vi"),
    ("welsh", "cy"),
    ("xhosa", "xh"),
    ("yiddish", "yi"),
    ("yoruba", "yo"),
    ("zulu", "zu"),
];

/// Names most people type for languages Google lists under a longer name.
const ALIASES: [(&str, &str); 3] = [
    ("chinese", "zh-CN"),
    ("kurdish", "ku"),
    ("odia", "or"),
];

fn languages() -> LanguageMap {
    return LANGUAGES
        .iter()
        .chain(ALIASES.iter())
        .map(|(name, code)| return (name.to_string(), code.to_string()))
        .collect();
}

fn resolve_code(languages: &LanguageMap, tag: &str) -> Result<String> {
    return resolve_tag(languages, tag)
        .ok_or_else(|| return anyhow!("{tag} is not supported by Google Translate"));
}

/// Joins the translated segments out of `[[["Bonjour", "Hello", ...], ...], ...]`.
fn parse_segments(body: &Value) -> Result<String> {
    let sentences = body
        .get(0)
        .and_then(|e| return e.as_array())
        .ok_or_else(|| return anyhow!("Invalid response format from Google Translate"))?;

    let translated = sentences
        .iter()
        .filter_map(|sentence| return sentence.get(0).and_then(|e| return e.as_str()))
        .collect::<Vec<&str>>()
        .join("");

    return Ok(translated);
}

pub struct Google {
    url: String,
    timeout: String,
}

impl Default for Google {
    fn default() -> Google {
        return Google {
            url: Config::get(ConfigKey::GoogleURL),
            timeout: Config::get(ConfigKey::GatewayTimeout),
        };
    }
}

#[async_trait]
impl Gateway for Google {
    fn name(&self) -> GatewayName {
        return GatewayName::Google;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        let status = match res {
            Ok(res) => res.status(),
            Err(err) => {
                tracing::error!(error = ?err, "Google Translate is unreachable");
                bail!("Google Translate is unreachable");
            }
        };
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "Google Translate health check failed");
            bail!("Google Translate health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn list_languages(&self) -> Result<LanguageMap> {
        return Ok(languages());
    }

    #[allow(clippy::implicit_return)]
    async fn translate(&self, request: &TranslationRequest) -> Result<String> {
        let languages = languages();
        let mut source = AUTO_DETECT.to_string();
        if !request.is_auto_detect() {
            source = resolve_code(&languages, &request.source_language)?;
        }
        let target = resolve_code(&languages, &request.target_language)?;

        let res = reqwest::Client::new()
            .get(format!("{url}/translate_a/single", url = self.url))
            .query(&[
                ("client", "gtx"),
                ("sl", source.as_str()),
                ("tl", target.as_str()),
                ("dt", "t"),
                ("q", request.text.as_str()),
            ])
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make translation request to Google Translate"
            );
            bail!(format!(
                "Google Translate responded with status {}",
                res.status().as_u16()
            ));
        }

        let body = res.json::<Value>().await?;
        tracing::debug!(body = ?body, "Translation response");

        return parse_segments(&body);
    }
}
