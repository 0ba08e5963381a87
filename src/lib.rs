/// One-Click Share to X - Chrome Extension for sharing the active page
/// Built with Rust + WASM + Yew

mod locale;
mod settings;
mod share;
mod template;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the core renderer for JavaScript access
#[wasm_bindgen]
pub fn build_post_text(title: &str, url: &str, template_text: &str, hashtags: &str) -> String {
    let settings = settings::Settings {
        template: template_text.to_string(),
        hashtags: hashtags.to_string(),
        ..settings::Settings::default()
    };

    template::build_post_text(&template::RenderContext::new(title, url), &settings)
}

// Handle an action click forwarded by the MV3 service worker
#[wasm_bindgen]
pub async fn share_page(title: Option<String>, url: Option<String>) {
    share::share_page(title, url).await;
}

// Start the Yew app for the options page
#[wasm_bindgen]
pub fn start_options() {
    yew::Renderer::<ui::options::OptionsPage>::new().render();
}
