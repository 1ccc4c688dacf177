use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use super::Gateway;
use super::GatewayName;
use super::LanguageMap;
use super::TranslationRequest;

pub enum StubBehavior {
    Map(Vec<(String, String)>),
    Fail(String),
    Hang,
}

/// In-memory gateway that counts how often it was asked to translate.
pub struct StubGateway {
    behavior: StubBehavior,
    languages: Option<LanguageMap>,
    calls: AtomicUsize,
}

impl StubGateway {
    pub fn mapping(pairs: &[(&str, &str)]) -> StubGateway {
        let pairs = pairs
            .iter()
            .map(|(from, to)| return (from.to_string(), to.to_string()))
            .collect();

        return StubGateway::new(StubBehavior::Map(pairs));
    }

    pub fn failing(message: &str) -> StubGateway {
        return StubGateway::new(StubBehavior::Fail(message.to_string()));
    }

    pub fn hanging() -> StubGateway {
        return StubGateway::new(StubBehavior::Hang);
    }

    fn new(behavior: StubBehavior) -> StubGateway {
        return StubGateway {
            behavior,
            languages: None,
            calls: AtomicUsize::new(0),
        };
    }

    pub fn with_languages(mut self, languages: LanguageMap) -> StubGateway {
        self.languages = Some(languages);
        return self;
    }

    pub fn calls(&self) -> usize {
        return self.calls.load(Ordering::SeqCst);
    }
}

#[async_trait]
impl Gateway for StubGateway {
    fn name(&self) -> GatewayName {
        return GatewayName::Google;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if let StubBehavior::Fail(message) = &self.behavior {
            bail!(message.to_string());
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn list_languages(&self) -> Result<LanguageMap> {
        if let Some(languages) = &self.languages {
            return Ok(languages.clone());
        }

        bail!("Language catalog is unavailable");
    }

    #[allow(clippy::implicit_return)]
    async fn translate(&self, request: &TranslationRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            StubBehavior::Map(pairs) => {
                if let Some((_, to)) = pairs.iter().find(|(from, _)| return *from == request.text) {
                    return Ok(to.to_string());
                }
                bail!(format!("No stub translation for {}", request.text));
            }
            StubBehavior::Fail(message) => {
                bail!(message.to_string());
            }
            StubBehavior::Hang => {
                return std::future::pending().await;
            }
        }
    }
}
