/// Share trigger: action click -> X compose intent in a new tab
use url::Url;
use wasm_bindgen::prelude::*;

use crate::settings::{SETTINGS_KEY, Settings, StoredSettings};
use crate::template::{RenderContext, build_post_text};

// Import JS bridge functions
#[wasm_bindgen(module = "/background.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn openTab(url: &str) -> Result<(), JsValue>;
}

const INTENT_BASE: &str = "https://x.com/intent/post";

// Pages that cannot be meaningfully shared
const DISALLOWED_PREFIXES: [&str; 4] = [
    "chrome://",
    "chrome-extension://",
    "edge://",
    "about:",
];

/// Whether a compose intent may be opened for this URL
pub fn is_sharable_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    let lower = url.to_lowercase();
    !DISALLOWED_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

/// Compose intent URL carrying the post text as an encoded query parameter
pub fn intent_url(text: &str) -> Result<Url, String> {
    Url::parse_with_params(INTENT_BASE, &[("text", text)])
        .map_err(|e| format!("Failed to build intent URL: {}", e))
}

/// Handle an action click
///
/// Best effort: every failure is logged and swallowed so the trigger
/// never surfaces an error while the user is browsing.
pub async fn share_page(title: Option<String>, url: Option<String>) {
    if let Err(e) = try_share(title, url).await {
        log::error!("Share failed: {}", e);
    }
}

async fn try_share(title: Option<String>, url: Option<String>) -> Result<(), String> {
    let settings = load_settings().await?;

    let title = title.unwrap_or_default();
    let url = url.unwrap_or_default();

    if !is_sharable_url(&url) {
        return Ok(());
    }

    let text = build_post_text(&RenderContext { title, url }, &settings);
    let intent = intent_url(&text)?;

    openTab(intent.as_str())
        .await
        .map_err(|e| format!("Failed to open tab: {:?}", e))
}

async fn load_settings() -> Result<Settings, String> {
    let stored_js = getStorage(SETTINGS_KEY)
        .await
        .map_err(|e| format!("Failed to get storage: {:?}", e))?;

    let stored: Option<StoredSettings> = if stored_js.is_null() || stored_js.is_undefined() {
        None
    } else {
        serde_wasm_bindgen::from_value(stored_js)
            .map_err(|e| format!("Failed to parse settings: {:?}", e))?
    };

    Ok(Settings::from_stored(stored))
}
