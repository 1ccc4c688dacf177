use std::path;

use super::TranslationRequest;

#[derive(Debug)]
pub enum Action {
    HealthCheck(),
    LoadLanguages(),
    SaveTranslation(path::PathBuf, String),
    Translate(TranslationRequest),
}
