/// Locale resources: the supported-locale index, per-locale message
/// dictionaries and the system-vs-explicit language choice
use std::collections::HashMap;

use serde::Deserialize;

use crate::settings::SYSTEM_LANGUAGE;

/// Locales assumed present when the bundled index cannot be read
pub const FALLBACK_LOCALES: [&str; 2] = ["en", "ja"];

/// Shape of the bundled locales/index.json resource
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleIndex {
    pub supported: Vec<String>,
}

/// Supported locale codes, falling back to the bundled defaults
pub fn supported_locales(index: Option<LocaleIndex>) -> Vec<String> {
    match index {
        Some(index) => index.supported,
        None => FALLBACK_LOCALES.iter().map(|s| s.to_string()).collect(),
    }
}

/// One entry of a _locales/<code>/messages.json dictionary
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LocaleMessage {
    pub message: String,
}

/// Parsed message dictionary for one locale
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct LocaleDict(HashMap<String, LocaleMessage>);

impl LocaleDict {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|entry| entry.message.as_str())
    }

    /// Lookup with a visible marker for untranslated keys
    pub fn message(&self, key: &str) -> String {
        match self.get(key) {
            Some(message) => message.to_string(),
            None => format!("__MISSING:{}__", key),
        }
    }
}

/// The user's display-language selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageChoice {
    /// Follow the browser UI language
    System,
    /// An explicit locale code such as "en" or "ja"
    Locale(String),
}

impl LanguageChoice {
    pub fn parse(choice: &str) -> LanguageChoice {
        if choice.is_empty() || choice == SYSTEM_LANGUAGE {
            LanguageChoice::System
        } else {
            LanguageChoice::Locale(choice.to_string())
        }
    }
}

/// Resolved source of translated UI text
#[derive(Debug, Clone, PartialEq)]
pub enum Translator {
    /// The host's own lookup for the system-selected language
    System,
    /// A loaded dictionary for an explicit locale
    Dict(LocaleDict),
}

impl Translator {
    /// Resolve a message key
    ///
    /// `system` performs the host lookup and is only consulted for the
    /// System variant. An unknown key resolves to None for the system
    /// language (the caller keeps its built-in label) and to the
    /// __MISSING marker for an explicit locale.
    pub fn resolve<F>(&self, key: &str, system: F) -> Option<String>
    where
        F: Fn(&str) -> String,
    {
        match self {
            Translator::System => {
                let message = system(key);
                if message.is_empty() { None } else { Some(message) }
            }
            Translator::Dict(dict) => Some(dict.message(key)),
        }
    }
}
