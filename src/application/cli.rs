#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::title_case;
use crate::domain::models::GatewayName;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::TranslateError;
use crate::domain::models::TranslationRecord;
use crate::domain::services::actions::help_text;
use crate::domain::services::Languages;
use crate::domain::services::SessionDefaults;
use crate::domain::services::Sessions;
use crate::infrastructure::gateways::GatewayManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

pub fn log_dir() -> path::PathBuf {
    if let Ok(dir) = std::env::var("PARLEY_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(|| return path::PathBuf::from("."))
        .join("parley");
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

async fn print_languages() -> Result<()> {
    let gateway = GatewayManager::from_config()?;
    let catalog = Languages::load(gateway.as_ref()).await;
    if let Some(notice) = &catalog.notice {
        eprintln!("{}", Paint::yellow(notice));
    }

    let lines = catalog
        .languages
        .iter()
        .map(|(name, code)| return format!("{} ({code})", title_case(name)))
        .collect::<Vec<String>>();
    println!("{}", lines.join("\n"));

    return Ok(());
}

async fn translate_once(text: &str) -> Result<()> {
    let gateway = GatewayManager::from_config()?;
    let timeout = GatewayManager::timeout()?;

    let sessions = Sessions::default();
    let session = sessions.create(&SessionDefaults::from_config()?);
    let mut state = session.lock().await;
    state.pending.set_text(text);

    match translation_outcome(state.submit(gateway.as_ref(), timeout).await) {
        Ok(translated) => println!("{translated}"),
        Err(msg) => {
            print_failure(&msg);
            std::process::exit(1);
        }
    }

    return Ok(());
}

/// The text to print, or the message explaining why there is none.
fn translation_outcome(res: Result<TranslationRecord, TranslateError>) -> Result<String, Message> {
    match res {
        Ok(record) => return Ok(record.translated_text),
        Err(err @ TranslateError::Translation { .. }) => {
            return Err(Message::error(&err.to_string()));
        }
        Err(err) => return Err(Message::warning(&err.to_string())),
    }
}

fn print_failure(msg: &Message) {
    if msg.message_type() == MessageType::Warning {
        eprintln!("{}", Paint::yellow(&msg.text));
    } else {
        eprintln!("{}", Paint::red(&msg.text));
    }
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Parley")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Parley with environment variable RUST_LOG=parley")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_translate() -> Command {
    return Command::new("translate")
        .about("Translates text once and prints the result.")
        .arg(
            Arg::new("text")
                .help("Text to translate. Multiple words are joined with spaces.")
                .num_args(1..)
                .required(true),
        );
}

fn arg_gateway() -> Arg {
    return Arg::new(ConfigKey::Gateway.to_string())
        .short('g')
        .long(ConfigKey::Gateway.to_string())
        .env("PARLEY_GATEWAY")
        .num_args(1)
        .help(format!(
            "The translation service to use. [default: {}]",
            Config::default(ConfigKey::Gateway)
        ))
        .value_parser(PossibleValuesParser::new(GatewayName::VARIANTS))
        .global(true);
}

fn arg_gateway_timeout() -> Arg {
    return Arg::new(ConfigKey::GatewayTimeout.to_string())
        .long(ConfigKey::GatewayTimeout.to_string())
        .env("PARLEY_GATEWAY_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds for a translation before giving up. [default: {}]",
            Config::default(ConfigKey::GatewayTimeout)
        ))
        .global(true);
}

fn arg_source_language() -> Arg {
    return Arg::new(ConfigKey::SourceLanguage.to_string())
        .short('f')
        .long(ConfigKey::SourceLanguage.to_string())
        .env("PARLEY_SOURCE_LANGUAGE")
        .num_args(1)
        .help(format!(
            "Language to translate from, by name or code. [default: {}]",
            Config::default(ConfigKey::SourceLanguage)
        ))
        .global(true);
}

fn arg_target_language() -> Arg {
    return Arg::new(ConfigKey::TargetLanguage.to_string())
        .short('t')
        .long(ConfigKey::TargetLanguage.to_string())
        .env("PARLEY_TARGET_LANGUAGE")
        .num_args(1)
        .help(format!(
            "Language to translate to, by name or code. [default: {}]",
            Config::default(ConfigKey::TargetLanguage)
        ))
        .global(true);
}

fn arg_auto_detect() -> Arg {
    return Arg::new(ConfigKey::AutoDetect.to_string())
        .short('a')
        .long(ConfigKey::AutoDetect.to_string())
        .env("PARLEY_AUTO_DETECT")
        .num_args(1)
        .help(format!(
            "Let the translation service detect the source language. [default: {}]",
            Config::default(ConfigKey::AutoDetect)
        ))
        .value_parser(PossibleValuesParser::new(["true", "false"]))
        .global(true);
}

fn arg_history_size() -> Arg {
    return Arg::new(ConfigKey::HistorySize.to_string())
        .long(ConfigKey::HistorySize.to_string())
        .env("PARLEY_HISTORY_SIZE")
        .num_args(1)
        .help(format!(
            "How many translations a session keeps, between 1 and 20. [default: {}]",
            Config::default(ConfigKey::HistorySize)
        ))
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("HISTORY:") {
                return Paint::new(format!("SESSION {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("parley")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(Command::new("session").about("Start an interactive translation session."))
        .subcommand(subcommand_translate())
        .subcommand(
            Command::new("languages").about("List the languages supported by the gateway."),
        )
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(arg_gateway())
        .arg(arg_gateway_timeout())
        .arg(arg_source_language())
        .arg(arg_target_language())
        .arg(arg_auto_detect())
        .arg(arg_history_size())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("PARLEY_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::GoogleURL.to_string())
                .long(ConfigKey::GoogleURL.to_string())
                .env("PARLEY_GOOGLE_URL")
                .num_args(1)
                .help(format!("Google Translate URL when using the google gateway. [default: {}]", Config::default(ConfigKey::GoogleURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::LibreTranslateURL.to_string())
                .long(ConfigKey::LibreTranslateURL.to_string())
                .env("PARLEY_LIBRETRANSLATE_URL")
                .num_args(1)
                .help(format!("LibreTranslate API URL when using the libretranslate gateway. [default: {}]", Config::default(ConfigKey::LibreTranslateURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::LibreTranslateApiKey.to_string())
                .long(ConfigKey::LibreTranslateApiKey.to_string())
                .env("PARLEY_LIBRETRANSLATE_API_KEY")
                .num_args(1)
                .help("LibreTranslate API key, for servers that require one.")
                .global(true),
        );
}

/// Handles every subcommand that runs to completion. Returns true when an
/// interactive session should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    println!("{}", log_dir().join("debug.log").to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("session", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("translate", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            let text = subcmd_matches
                .get_many::<String>("text")
                .map(|values| {
                    return values
                        .map(|e| return e.as_str())
                        .collect::<Vec<&str>>()
                        .join(" ");
                })
                .unwrap_or_default();
            translate_once(&text).await?;
            return Ok(false);
        }
        Some(("languages", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            print_languages().await?;
            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
