#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::GatewayName;
use crate::domain::services::parse_history_size;
use crate::domain::services::DEFAULT_HISTORY_SIZE;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ConfigFile,
    Gateway,
    GatewayTimeout,
    #[strum(serialize = "google-url")]
    GoogleURL,
    #[strum(serialize = "libretranslate-url")]
    LibreTranslateURL,
    #[strum(serialize = "libretranslate-api-key")]
    LibreTranslateApiKey,
    SourceLanguage,
    TargetLanguage,
    AutoDetect,
    HistorySize,
}

fn default_config_path() -> path::PathBuf {
    #[cfg(not(target_os = "macos"))]
    let base = dirs::config_dir();
    #[cfg(target_os = "macos")]
    let base = dirs::home_dir().map(|e| return e.join(".config"));

    return base
        .unwrap_or_else(|| return path::PathBuf::from("."))
        .join("parley/config.toml");
}

/// Reads every known key out of a config file. Values for keys with clap
/// possible values are checked against them.
fn parse_file(cmd: &Command, toml_str: &str) -> Result<Vec<(ConfigKey, String)>> {
    let doc = toml_str.parse::<toml_edit::Document>()?;
    let mut res = vec![];

    for key in ConfigKey::iter() {
        let val = match doc.get(&key.to_string()) {
            Some(val) => val,
            None => continue,
        };

        // Use clap value parsers to do validation.
        let mut possible_values = vec![];
        if let Some(arg) = cmd
            .get_arguments()
            .find(|e| return e.get_long() == Some(key.to_string().as_str()))
        {
            possible_values = arg
                .get_possible_values()
                .iter()
                .map(|e| return e.get_name().to_string())
                .collect::<Vec<String>>();
        }

        if let Some(val_int) = val.as_integer() {
            res.push((key, val_int.to_string()));
        } else if let Some(val_bool) = val.as_bool() {
            res.push((key, val_bool.to_string()));
        } else if let Some(val_str) = val.as_str() {
            if val_str.is_empty() {
                continue;
            }
            if !possible_values.is_empty() && !possible_values.contains(&val_str.to_string()) {
                bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
            }
            res.push((key, val_str.to_string()));
        }
    }

    return Ok(res);
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        match key {
            ConfigKey::ConfigFile => {
                return default_config_path().to_string_lossy().to_string();
            }
            ConfigKey::Gateway => return GatewayName::Google.to_string(),
            ConfigKey::GatewayTimeout => return "10000".to_string(),
            ConfigKey::GoogleURL => return "https://translate.googleapis.com".to_string(),
            ConfigKey::LibreTranslateURL => return "http://localhost:5000".to_string(),
            ConfigKey::LibreTranslateApiKey => return "".to_string(),
            ConfigKey::SourceLanguage => return "english".to_string(),
            ConfigKey::TargetLanguage => return "french".to_string(),
            ConfigKey::AutoDetect => return "false".to_string(),
            ConfigKey::HistorySize => return DEFAULT_HISTORY_SIZE.to_string(),
        }
    }

    /// Checks values that clap can't, such as numbers that arrive as strings
    /// from the environment or the config file.
    fn validate() -> Result<()> {
        let timeout = Config::get(ConfigKey::GatewayTimeout);
        if timeout.parse::<u64>().is_err() {
            bail!(format!(
                "{} must be a number of milliseconds, got '{timeout}'",
                ConfigKey::GatewayTimeout
            ));
        }

        let auto_detect = Config::get(ConfigKey::AutoDetect);
        if auto_detect != "true" && auto_detect != "false" {
            bail!(format!(
                "{} must be true or false, got '{auto_detect}'",
                ConfigKey::AutoDetect
            ));
        }

        parse_history_size(&Config::get(ConfigKey::HistorySize))?;

        return Ok(());
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(&config_path).await?;
            for (key, val) in parse_file(&cmd, &toml_str)? {
                Config::set(key, &val);
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        Config::validate()?;

        tracing::debug!(
            config_file = %config_path.display(),
            gateway = Config::get(ConfigKey::Gateway),
            gateway_timeout = Config::get(ConfigKey::GatewayTimeout),
            source_language = Config::get(ConfigKey::SourceLanguage),
            target_language = Config::get(ConfigKey::TargetLanguage),
            auto_detect = Config::get(ConfigKey::AutoDetect),
            history_size = Config::get(ConfigKey::HistorySize),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|e| return e.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name().to_string())
                        .collect::<Vec<String>>()
                        .join(", ");
                    description = format!("{description} [possible values: {possible_values}]");
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i64>().is_ok() || val.parse::<bool>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
