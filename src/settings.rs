/// Settings model and storage shape for chrome.storage.sync
use serde::{Deserialize, Serialize};

/// Key under which the settings record is stored
pub const SETTINGS_KEY: &str = "settings";

/// Template applied when the stored template is empty
pub const DEFAULT_TEMPLATE: &str = "{title}\n{url}";

/// Language choice meaning "follow the browser UI language"
pub const SYSTEM_LANGUAGE: &str = "system";

/// User settings, always fully populated
///
/// Field names serialize in camelCase so the record is interchangeable
/// with profiles written by earlier versions of the extension.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub language_choice: String,
    pub template: String,
    pub hashtags: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            language_choice: SYSTEM_LANGUAGE.to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
            hashtags: String::new(),
        }
    }
}

/// Possibly-partial record as it comes back from storage
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredSettings {
    pub language_choice: Option<String>,
    pub template: Option<String>,
    pub hashtags: Option<String>,
}

impl Settings {
    /// Merge a stored record over the defaults
    ///
    /// Absent fields keep their default; a field that was stored as an
    /// empty string stays empty.
    pub fn from_stored(stored: Option<StoredSettings>) -> Settings {
        let defaults = Settings::default();
        let stored = stored.unwrap_or_default();

        Settings {
            language_choice: stored.language_choice.unwrap_or(defaults.language_choice),
            template: stored.template.unwrap_or(defaults.template),
            hashtags: stored.hashtags.unwrap_or(defaults.hashtags),
        }
    }
}
