#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::path;
use std::time::Duration;

use anyhow::Result;
use tokio::fs;
use tokio::sync::mpsc;

use super::translate_request;
use super::Languages;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::GatewayBox;
use crate::domain::models::Message;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- Any text without a leading slash replaces the pending input and translates it.
- /translate (/t) [TEXT] - Translates TEXT, or the pending input again when no text is given. Use it for text that starts with a slash.
- /from (/f) [LANGUAGE] - Sets the source language, by name or code.
- /to [LANGUAGE] - Sets the target language, by name or code.
- /swap (/s) - Swaps the source and target languages.
- /auto [on,off] - Toggles detecting the source language automatically.
- /languages (/l) - Lists all supported languages.
- /input (/i) - Shows the pending input and selected languages.
- /save [PATH] - Saves the current translation to a text file.
- /quit /exit (/q) - Exit Parley.
- /help (/h) - Provides this help menu.

HISTORY:
- /history (/hi) - Lists past translations, newest first.
- /use (/u) [NUMBER] - Copies the original text of a history entry into the pending input.
- /clear - Clears the history and the current translation.
- /max [NUMBER] - Sets how many translations are kept, between 1 and 20. Older entries are dropped right away.
        "#;

    return text.trim().to_string();
}

async fn save_translation(
    file_path: path::PathBuf,
    text: String,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    if let Err(err) = fs::write(&file_path, text.as_bytes()).await {
        tracing::error!(error = ?err, path = %file_path.display(), "Failed to save translation");
        tx.send(Event::Notice(Message::error(&format!(
            "Couldn't save the translation to {}: {err}",
            file_path.display()
        ))))?;
        return Ok(());
    }

    tx.send(Event::Notice(Message::success(&format!(
        "Saved translation to {}",
        file_path.display()
    ))))?;

    return Ok(());
}

async fn health_check(gateway: &GatewayBox, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    if let Err(err) = gateway.health_check().await {
        let name = gateway.name();
        tx.send(Event::Notice(Message::warning(&format!(
            "Hey, it looks like the {name} gateway can't be reached. Translations will fail until it's back.\n\nError: {err}"
        ))))?;
    }

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs actions one at a time until the UI hangs up. Translations are
    /// awaited in place, so a session never has two requests in flight.
    pub async fn start(
        gateway: GatewayBox,
        timeout: Duration,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            match action {
                Action::HealthCheck() => {
                    health_check(&gateway, &tx).await?;
                }
                Action::LoadLanguages() => {
                    let catalog = Languages::load(gateway.as_ref()).await;
                    tx.send(Event::LanguagesLoaded(catalog))?;
                }
                Action::SaveTranslation(file_path, text) => {
                    save_translation(file_path, text, &tx).await?;
                }
                Action::Translate(request) => {
                    let res = translate_request(request, gateway.as_ref(), timeout).await;
                    tx.send(Event::TranslationCompleted(res))?;
                }
            }
        }

        return Ok(());
    }
}
