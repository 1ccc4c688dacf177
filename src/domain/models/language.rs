#[cfg(test)]
#[path = "language_test.rs"]
mod tests;

use std::collections::BTreeMap;

/// Source tag sent to a gateway when the source language should be detected.
pub const AUTO_DETECT: &str = "auto";

/// Display name to code pairs used whenever a gateway cannot provide its own
/// catalog.
pub const FALLBACK_LANGUAGES: [(&str, &str); 8] = [
    ("english", "en"),
    ("french", "fr"),
    ("spanish", "es"),
    ("german", "de"),
    ("chinese", "zh-CN"),
    ("japanese", "ja"),
    ("arabic", "ar"),
    ("russian", "ru"),
];

pub type LanguageMap = BTreeMap<String, String>;

pub fn fallback_languages() -> LanguageMap {
    return FALLBACK_LANGUAGES
        .iter()
        .map(|(name, code)| return (name.to_string(), code.to_string()))
        .collect();
}

/// Looks a tag up by display name first, then by code. Matching ignores case.
pub fn resolve_tag(languages: &LanguageMap, tag: &str) -> Option<String> {
    let needle = tag.trim().to_lowercase();
    if let Some(code) = languages.get(&needle) {
        return Some(code.to_string());
    }

    return languages
        .values()
        .find(|code| return code.to_lowercase() == needle)
        .cloned();
}

/// The languages a session may pick from. `notice` is set when the catalog
/// is the built-in fallback rather than the gateway's own list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageCatalog {
    pub languages: LanguageMap,
    pub notice: Option<String>,
}

impl LanguageCatalog {
    pub fn new(languages: LanguageMap) -> LanguageCatalog {
        return LanguageCatalog {
            languages,
            notice: None,
        };
    }

    pub fn fallback(notice: &str) -> LanguageCatalog {
        return LanguageCatalog {
            languages: fallback_languages(),
            notice: Some(notice.to_string()),
        };
    }

    /// Returns the display name for a name or code, keeping the tag as-is
    /// when the catalog doesn't know it.
    pub fn display_name(&self, tag: &str) -> String {
        let needle = tag.trim().to_lowercase();
        if self.languages.contains_key(&needle) {
            return needle;
        }

        if let Some((name, _)) = self
            .languages
            .iter()
            .find(|(_, code)| return code.to_lowercase() == needle)
        {
            return name.to_string();
        }

        return tag.to_string();
    }

    pub fn contains(&self, tag: &str) -> bool {
        return resolve_tag(&self.languages, tag).is_some();
    }
}

/// `english` -> `English`, `chinese (simplified)` -> `Chinese (Simplified)`.
pub fn title_case(tag: &str) -> String {
    let mut res = String::with_capacity(tag.len());
    let mut upper_next = true;
    for c in tag.chars() {
        if upper_next {
            res.extend(c.to_uppercase());
        } else {
            res.extend(c.to_lowercase());
        }
        upper_next = !c.is_alphanumeric();
    }

    return res;
}
