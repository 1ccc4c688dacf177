#[cfg(test)]
#[path = "gateways_test.rs"]
mod tests;

pub mod google;
pub mod libretranslate;

use std::time::Duration;

use anyhow::anyhow;
use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::GatewayBox;
use crate::domain::models::GatewayName;

pub struct GatewayManager {}

impl GatewayManager {
    pub fn get(name: GatewayName) -> Result<GatewayBox> {
        match name {
            GatewayName::Google => {
                return Ok(Box::<google::Google>::default());
            }
            GatewayName::LibreTranslate => {
                return Ok(Box::<libretranslate::LibreTranslate>::default());
            }
        }
    }

    /// The gateway named by the loaded config.
    pub fn from_config() -> Result<GatewayBox> {
        let name = Config::get(ConfigKey::Gateway);
        let gateway = GatewayName::parse(name.to_string())
            .ok_or_else(|| return anyhow!("Unknown gateway '{name}'"))?;

        return GatewayManager::get(gateway);
    }

    /// How long a single translation may take before it's reported as timed out.
    pub fn timeout() -> Result<Duration> {
        let millis = Config::get(ConfigKey::GatewayTimeout).parse::<u64>()?;
        return Ok(Duration::from_millis(millis));
    }
}
