#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;

use std::io::Write;
use std::path;

use anyhow::bail;
use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use yansi::Paint;

use crate::domain::models::title_case;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::LanguageCatalog;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::SlashCommand;
use crate::domain::models::TranslateError;
use crate::domain::models::TranslationRecord;
use crate::domain::models::AUTO_DETECT;
use crate::domain::services::actions::help_text;
use crate::domain::services::parse_history_size;
use crate::domain::services::SessionDefaults;
use crate::domain::services::SessionState;
use crate::domain::services::Sessions;

fn render(message: &Message) {
    let text = &message.text;
    match message.message_type() {
        MessageType::Info => println!("{}", Paint::cyan(text)),
        MessageType::Success => println!("{}", Paint::green(text)),
        MessageType::Warning => println!("{}", Paint::yellow(text)),
        MessageType::Error => println!("{}", Paint::red(text)),
    }
}

fn language_label(catalog: &LanguageCatalog, tag: &str) -> String {
    return title_case(&catalog.display_name(tag));
}

fn format_prompt(state: &SessionState, catalog: &LanguageCatalog) -> String {
    let mut source = language_label(catalog, &state.pending.source_language);
    if state.pending.auto_detect {
        source = title_case(AUTO_DETECT);
    }

    return format!(
        "{source} → {} [{} chars] > ",
        language_label(catalog, &state.pending.target_language),
        state.pending.char_count()
    );
}

fn format_record(record: &TranslationRecord) -> String {
    return format!(
        "{}\n  {}\n  → {}",
        record.title(),
        record.original_text.replace('\n', "\n  "),
        record.translated_text.replace('\n', "\n    ")
    );
}

/// History as shown to users: numbered from 1, newest first.
fn format_history(state: &SessionState) -> String {
    if state.history.is_empty() {
        return "No translations yet.".to_string();
    }

    return state
        .history
        .list()
        .iter()
        .enumerate()
        .map(|(idx, record)| return format!("{}. {}", idx + 1, format_record(record)))
        .collect::<Vec<String>>()
        .join("\n\n");
}

fn format_input(state: &SessionState, catalog: &LanguageCatalog) -> String {
    let mut lines = vec![
        format!(
            "From: {}",
            language_label(catalog, &state.pending.source_language)
        ),
        format!(
            "To: {}",
            language_label(catalog, &state.pending.target_language)
        ),
        format!("Auto-detect: {}", state.pending.auto_detect),
        format!(
            "History: {} of {}",
            state.history.len(),
            state.history.capacity()
        ),
        format!("Characters: {}", state.pending.char_count()),
        format!("Text: {}", state.pending.text),
    ];

    if let Some(translation) = &state.current_translation {
        lines.push(format!("Translation: {translation}"));
    }

    return lines.join("\n");
}

fn format_languages(catalog: &LanguageCatalog) -> String {
    return catalog
        .languages
        .iter()
        .map(|(name, code)| return format!("- {} ({code})", title_case(name)))
        .collect::<Vec<String>>()
        .join("\n");
}

/// Everything typed after the command word, spacing kept as is.
fn command_text(line: &str) -> String {
    let line = line.trim_start();
    return match line.find(char::is_whitespace) {
        Some(idx) => line[idx..].trim_start().to_string(),
        None => "".to_string(),
    };
}

/// Turns a 1-based history number typed by the user into an index for the
/// newest-first view.
fn parse_history_number(text: &str, len: usize) -> Result<usize> {
    let number = match text.trim().parse::<usize>() {
        Ok(number) => number,
        Err(_) => bail!(format!("'{text}' isn't a history number. Usage: /use NUMBER")),
    };

    if number == 0 || number > len {
        bail!(format!(
            "History entry {number} doesn't exist, there are {len} entries."
        ));
    }

    return Ok(number - 1);
}

fn set_source_language(
    state: &mut SessionState,
    catalog: &LanguageCatalog,
    tag: &str,
) -> Message {
    if tag.is_empty() {
        return Message::warning("Usage: /from LANGUAGE");
    }

    if tag.to_lowercase() == AUTO_DETECT {
        state.pending.auto_detect = true;
        return Message::info("Detecting the source language automatically.");
    }

    if !catalog.contains(tag) {
        return Message::error(&format!(
            "Unknown language '{tag}'. Use /languages to list supported languages."
        ));
    }

    state.pending.source_language = catalog.display_name(tag);
    let mut msg = Message::info(&format!(
        "Translating from {}.",
        language_label(catalog, tag)
    ));
    if state.pending.auto_detect {
        state.pending.auto_detect = false;
        msg.append(" Auto-detect is now off.");
    }

    return msg;
}

fn set_target_language(
    state: &mut SessionState,
    catalog: &LanguageCatalog,
    tag: &str,
) -> Message {
    if tag.is_empty() {
        return Message::warning("Usage: /to LANGUAGE");
    }

    if tag.to_lowercase() == AUTO_DETECT || !catalog.contains(tag) {
        return Message::error(&format!(
            "Unknown language '{tag}'. Use /languages to list supported languages."
        ));
    }

    state.pending.target_language = catalog.display_name(tag);
    return Message::info(&format!(
        "Translating to {}.",
        language_label(catalog, tag)
    ));
}

fn set_auto_detect(state: &mut SessionState, arg: &str) -> Message {
    match arg {
        "" => state.pending.auto_detect = !state.pending.auto_detect,
        "on" => state.pending.auto_detect = true,
        "off" => state.pending.auto_detect = false,
        _ => return Message::warning("Usage: /auto [on|off]"),
    }

    if state.pending.auto_detect {
        return Message::info("Auto-detect is on.");
    }
    return Message::info("Auto-detect is off.");
}

fn use_history_entry(state: &mut SessionState, arg: &str) -> Message {
    let index = match parse_history_number(arg, state.history.len()) {
        Ok(index) => index,
        Err(err) => return Message::warning(&err.to_string()),
    };

    if let Err(err) = state.replay_into_input(index) {
        return Message::error(&err.to_string());
    }

    return Message::info(&format!(
        "Loaded history entry {} into the input. Use /translate to translate it again.\n{}",
        index + 1,
        state.pending.text
    ));
}

fn set_max_history(state: &mut SessionState, arg: &str) -> Message {
    match parse_history_size(arg) {
        Ok(size) => {
            state.set_history_size(size);
            return Message::success(&format!("Keeping the last {size} translations."));
        }
        Err(err) => return Message::error(&err.to_string()),
    }
}

fn print_prompt(state: &SessionState, catalog: &LanguageCatalog) -> Result<()> {
    print!("{}", Paint::new(format_prompt(state, catalog)).bold());
    std::io::stdout().flush()?;
    return Ok(());
}

/// Blocks until the worker hands back the languages, showing any notices
/// that arrive first.
async fn wait_for_languages(rx: &mut mpsc::UnboundedReceiver<Event>) -> Result<LanguageCatalog> {
    while let Some(event) = rx.recv().await {
        match event {
            Event::LanguagesLoaded(catalog) => return Ok(catalog),
            Event::Notice(msg) => render(&msg),
            Event::TranslationCompleted(_) => (),
        }
    }

    bail!("The translation worker stopped unexpectedly");
}

async fn wait_for_notice(rx: &mut mpsc::UnboundedReceiver<Event>) -> Result<()> {
    while let Some(event) = rx.recv().await {
        if let Event::Notice(msg) = event {
            render(&msg);
            return Ok(());
        }
    }

    bail!("The translation worker stopped unexpectedly");
}

async fn wait_for_translation(
    state: &mut SessionState,
    rx: &mut mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    while let Some(event) = rx.recv().await {
        match event {
            Event::TranslationCompleted(res) => {
                match state.finish_attempt(res) {
                    Ok(record) => println!("{}", Paint::green(&record.translated_text).bold()),
                    Err(err) => render(&Message::error(&err.to_string())),
                }
                return Ok(());
            }
            Event::Notice(msg) => render(&msg),
            Event::LanguagesLoaded(_) => (),
        }
    }

    bail!("The translation worker stopped unexpectedly");
}

async fn translate_pending(
    state: &mut SessionState,
    tx: &mpsc::UnboundedSender<Action>,
    rx: &mut mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let request = match state.begin_attempt() {
        Ok(request) => request,
        Err(err @ TranslateError::EmptyInput) | Err(err @ TranslateError::InFlight) => {
            render(&Message::warning(&err.to_string()));
            return Ok(());
        }
        Err(err) => {
            render(&Message::error(&err.to_string()));
            return Ok(());
        }
    };

    println!("{}", Paint::default("Translating...").dimmed());
    tx.send(Action::Translate(request))?;
    wait_for_translation(state, rx).await?;

    return Ok(());
}

async fn save_translation(
    state: &SessionState,
    path_arg: &str,
    tx: &mpsc::UnboundedSender<Action>,
    rx: &mut mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let translation = match &state.current_translation {
        Some(translation) => translation.to_string(),
        None => {
            render(&Message::warning("There's no translation to save yet."));
            return Ok(());
        }
    };

    let mut file_path = path_arg.to_string();
    if file_path.is_empty() {
        file_path = state.default_save_file_name();
    }

    tx.send(Action::SaveTranslation(
        path::PathBuf::from(file_path),
        translation,
    ))?;
    wait_for_notice(rx).await?;

    return Ok(());
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    mut rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let sessions = Sessions::default();
    let session = sessions.create(&SessionDefaults::from_config()?);
    let mut state = session.lock().await;

    tx.send(Action::HealthCheck())?;
    tx.send(Action::LoadLanguages())?;
    let catalog = wait_for_languages(&mut rx).await?;
    if let Some(notice) = &catalog.notice {
        render(&Message::warning(notice));
    }

    render(&Message::info(
        "Type text to translate it, or /help to see all commands.",
    ));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt(&state, &catalog)?;
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };

        if line.trim().is_empty() {
            continue;
        }

        let command = match SlashCommand::parse(&line) {
            Some(command) => command,
            None => {
                if line.starts_with('/') {
                    render(&Message::warning(&format!(
                        "Unknown command '{}'. Type /help to see what's available.",
                        line.split_whitespace().next().unwrap_or_default()
                    )));
                    continue;
                }

                state.pending.set_text(&line);
                translate_pending(&mut state, &tx, &mut rx).await?;
                continue;
            }
        };

        let arg = command.arg_text();
        if command.is_quit() {
            break;
        } else if command.is_help() {
            println!("{}", help_text());
        } else if command.is_translate() {
            let text = command_text(&line);
            if !text.is_empty() {
                state.pending.set_text(&text);
            }
            translate_pending(&mut state, &tx, &mut rx).await?;
        } else if command.is_source_set() {
            render(&set_source_language(&mut state, &catalog, &arg));
        } else if command.is_target_set() {
            render(&set_target_language(&mut state, &catalog, &arg));
        } else if command.is_swap() {
            state.swap_languages();
            render(&Message::info(&format!(
                "Swapped languages, translating from {} to {}.",
                language_label(&catalog, &state.pending.source_language),
                language_label(&catalog, &state.pending.target_language)
            )));
        } else if command.is_auto_detect() {
            render(&set_auto_detect(&mut state, &arg));
        } else if command.is_history() {
            println!("{}", format_history(&state));
        } else if command.is_use() {
            render(&use_history_entry(&mut state, &arg));
        } else if command.is_clear() {
            state.clear_history();
            render(&Message::success("Cleared the history and the current translation."));
        } else if command.is_max_history() {
            render(&set_max_history(&mut state, &arg));
        } else if command.is_language_list() {
            println!("{}", format_languages(&catalog));
            if let Some(notice) = &catalog.notice {
                render(&Message::warning(notice));
            }
        } else if command.is_input() {
            println!("{}", format_input(&state, &catalog));
        } else if command.is_save() {
            save_translation(&state, &arg, &tx, &mut rx).await?;
        }
    }

    let id = state.id.to_string();
    drop(state);
    sessions.remove(&id);
    tracing::debug!(id = %id, "Session ended");

    return Ok(());
}
