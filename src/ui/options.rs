/// Options page: language selection, template editing and live preview
use std::time::Duration;

use patternfly_yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::platform::time::sleep;
use yew::prelude::*;

use crate::locale::{LanguageChoice, LocaleIndex, Translator, supported_locales};
use crate::settings::{DEFAULT_TEMPLATE, SETTINGS_KEY, SYSTEM_LANGUAGE, Settings, StoredSettings};
use crate::template::{RenderContext, build_post_text};

// Import JS bridge functions
#[wasm_bindgen(module = "/options.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    // Both loaders resolve to the raw JSON text of the bundled resource
    #[wasm_bindgen(catch)]
    async fn loadLocalesIndex() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn loadLocaleMessages(locale: &str) -> Result<JsValue, JsValue>;

    fn getSystemMessage(key: &str) -> String;

    fn languageSelfName(locale: &str) -> String;
}

// Sample page shown in the preview instead of a real tab
const SAMPLE_TITLE: &str = "Example Title";
const SAMPLE_URL: &str = "https://example.com";

const STATUS_CLEAR_MS: u64 = 1800;

const TEMPLATE_EXAMPLES_FALLBACK: &str =
    "{title}\\n{url}\n{title}\\n{url}\\n#music #bookmark\nListening: {title}\\n{url}";

#[derive(Clone, PartialEq)]
enum ViewState {
    Loading,
    Idle,
    Error(String),
}

#[derive(Clone, PartialEq)]
struct LocaleOption {
    code: String,
    label: String,
}

#[function_component(OptionsPage)]
pub fn options_page() -> Html {
    let view = use_state(|| ViewState::Loading);
    let settings = use_state(Settings::default);
    let template_value = use_state(String::new);
    let hashtags_value = use_state(String::new);
    let locales = use_state(Vec::<LocaleOption>::new);
    let translator = use_state(|| Translator::System);
    let status = use_state(|| None::<String>);
    let status_epoch = use_mut_ref(|| 0u32);

    // Show a transient status message; a newer message supersedes the
    // pending clear of an older one
    let show_status = {
        let status = status.clone();
        let status_epoch = status_epoch.clone();

        Callback::from(move |text: String| {
            let epoch = {
                let mut epoch = status_epoch.borrow_mut();
                *epoch += 1;
                *epoch
            };
            status.set(Some(text));

            let status = status.clone();
            let status_epoch = status_epoch.clone();
            spawn_local(async move {
                sleep(Duration::from_millis(STATUS_CLEAR_MS)).await;
                if *status_epoch.borrow() == epoch {
                    status.set(None);
                }
            });
        })
    };

    // Load settings, locale list and translations on mount
    {
        let view = view.clone();
        let settings = settings.clone();
        let template_value = template_value.clone();
        let hashtags_value = hashtags_value.clone();
        let locales = locales.clone();
        let translator = translator.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match load_page().await {
                    Ok(page) => {
                        template_value.set(page.settings.template.clone());
                        hashtags_value.set(page.settings.hashtags.clone());
                        settings.set(page.settings);
                        locales.set(page.locales);
                        translator.set(page.translator);
                        view.set(ViewState::Idle);
                    }
                    Err(e) => {
                        view.set(ViewState::Error(format!("Failed to load: {}", e)));
                    }
                }
            });
            || ()
        });
    }

    // Keep the document title in the selected language
    use_effect_with((*translator).clone(), |translator| {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            document.set_title(&ui_text(translator, "optionsTitle", "Options"));
        }
        || ()
    });

    let on_template_input = {
        let template_value = template_value.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlTextAreaElement>() {
                template_value.set(input.value());
            }
        })
    };

    let on_hashtags_input = {
        let hashtags_value = hashtags_value.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                hashtags_value.set(input.value());
            }
        })
    };

    // Language changes persist immediately and re-apply translations
    let on_language_change = {
        let settings = settings.clone();
        let translator = translator.clone();
        let view = view.clone();
        let show_status = show_status.clone();

        Callback::from(move |e: Event| {
            let Some(select) = e.target_dyn_into::<HtmlSelectElement>() else {
                return;
            };

            let mut updated = (*settings).clone();
            updated.language_choice = select.value();
            settings.set(updated.clone());

            let translator = translator.clone();
            let view = view.clone();
            let show_status = show_status.clone();
            spawn_local(async move {
                if let Err(e) = save_settings(&updated).await {
                    view.set(ViewState::Error(format!("Failed to save: {}", e)));
                    return;
                }

                match load_translator(&LanguageChoice::parse(&updated.language_choice)).await {
                    Ok(loaded) => {
                        show_status.emit(ui_text(&loaded, "saved", "Saved"));
                        translator.set(loaded);
                    }
                    Err(e) => {
                        view.set(ViewState::Error(e));
                    }
                }
            });
        })
    };

    let on_save = {
        let settings = settings.clone();
        let template_value = template_value.clone();
        let hashtags_value = hashtags_value.clone();
        let translator = translator.clone();
        let view = view.clone();
        let show_status = show_status.clone();

        Callback::from(move |_| {
            let updated = Settings {
                language_choice: settings.language_choice.clone(),
                template: (*template_value).clone(),
                hashtags: (*hashtags_value).clone(),
            };
            settings.set(updated.clone());

            let saved_text = ui_text(&translator, "saved", "Saved");
            let view = view.clone();
            let show_status = show_status.clone();
            spawn_local(async move {
                match save_settings(&updated).await {
                    Ok(()) => show_status.emit(saved_text),
                    Err(e) => view.set(ViewState::Error(format!("Failed to save: {}", e))),
                }
            });
        })
    };

    // Reset restores template and hashtags; the language choice stays
    let on_reset = {
        let settings = settings.clone();
        let template_value = template_value.clone();
        let hashtags_value = hashtags_value.clone();
        let translator = translator.clone();
        let view = view.clone();
        let show_status = show_status.clone();

        Callback::from(move |_| {
            let updated = Settings {
                language_choice: settings.language_choice.clone(),
                template: DEFAULT_TEMPLATE.to_string(),
                hashtags: String::new(),
            };
            template_value.set(updated.template.clone());
            hashtags_value.set(updated.hashtags.clone());
            settings.set(updated.clone());

            let reset_text = ui_text(&translator, "resetDone", "Reset");
            let view = view.clone();
            let show_status = show_status.clone();
            spawn_local(async move {
                match save_settings(&updated).await {
                    Ok(()) => show_status.emit(reset_text),
                    Err(e) => view.set(ViewState::Error(format!("Failed to save: {}", e))),
                }
            });
        })
    };

    // Live preview from the currently typed values, never persisted
    let preview = {
        let preview_settings = Settings {
            language_choice: settings.language_choice.clone(),
            template: (*template_value).clone(),
            hashtags: (*hashtags_value).clone(),
        };
        build_post_text(
            &RenderContext::new(SAMPLE_TITLE, SAMPLE_URL),
            &preview_settings,
        )
    };

    let t = &*translator;

    html! {
        <div class="padding-20">
            <h1 class="options-title">{ui_text(t, "optionsTitle", "Options")}</h1>

            {match &*view {
                ViewState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                    </div>
                },
                ViewState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                ViewState::Idle => html! {},
            }}

            if !matches!(*view, ViewState::Loading) {
                <div class="options-form">
                    <div class="field-row">
                        <label for="language">{ui_text(t, "languageLabel", "Language")}</label>
                        <select id="language" onchange={on_language_change}>
                            <option
                                value={SYSTEM_LANGUAGE}
                                selected={settings.language_choice == SYSTEM_LANGUAGE}
                            >
                                {"System"}
                            </option>
                            {for locales.iter().map(|locale| html! {
                                <option
                                    value={locale.code.clone()}
                                    selected={settings.language_choice == locale.code}
                                >
                                    {locale.label.clone()}
                                </option>
                            })}
                        </select>
                    </div>

                    <div class="field-row">
                        <label for="template">{ui_text(t, "templateLabel", "Template")}</label>
                        <textarea
                            id="template"
                            rows="4"
                            value={(*template_value).clone()}
                            oninput={on_template_input}
                        />
                    </div>

                    <pre class="template-examples">
                        {ui_text(t, "templateExamples", TEMPLATE_EXAMPLES_FALLBACK)}
                    </pre>

                    <div class="field-row">
                        <label for="hashtags">{ui_text(t, "hashtagsLabel", "Hashtags")}</label>
                        <input
                            id="hashtags"
                            type="text"
                            value={(*hashtags_value).clone()}
                            oninput={on_hashtags_input}
                        />
                    </div>

                    <div class="field-row">
                        <label for="preview">{ui_text(t, "previewLabel", "Preview")}</label>
                        <textarea id="preview" rows="4" readonly={true} value={preview} />
                    </div>

                    <div class="flex-column-gap">
                        <Button onclick={on_save} variant={ButtonVariant::Primary} block={true}>
                            {ui_text(t, "saveButton", "Save")}
                        </Button>
                        <Button onclick={on_reset} variant={ButtonVariant::Secondary} block={true}>
                            {ui_text(t, "resetButton", "Reset")}
                        </Button>
                    </div>

                    if let Some(message) = (*status).clone() {
                        <p class="status-text">{message}</p>
                    }
                </div>
            }
        </div>
    }
}

// Helper functions

struct PageData {
    settings: Settings,
    locales: Vec<LocaleOption>,
    translator: Translator,
}

fn ui_text(translator: &Translator, key: &str, fallback: &str) -> String {
    translator
        .resolve(key, |key| getSystemMessage(key))
        .unwrap_or_else(|| fallback.to_string())
}

async fn load_page() -> Result<PageData, String> {
    let settings = load_settings().await?;
    let locales = load_locale_options().await;
    let translator = load_translator(&LanguageChoice::parse(&settings.language_choice)).await?;

    Ok(PageData {
        settings,
        locales,
        translator,
    })
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

async fn save_settings(settings: &Settings) -> Result<(), String> {
    let value = serde_wasm_bindgen::to_value(settings)
        .map_err(|e| format!("Failed to serialize settings: {:?}", e))?;

    setStorage(SETTINGS_KEY, value)
        .await
        .map_err(|e| format!("Failed to save storage: {:?}", e))
}

// An unreadable or malformed index falls back to the bundled locales
async fn load_locale_options() -> Vec<LocaleOption> {
    let index = match loadLocalesIndex().await {
        Ok(index_js) => index_js
            .as_string()
            .and_then(|text| serde_json::from_str::<LocaleIndex>(&text).ok()),
        Err(_) => None,
    };

    supported_locales(index)
        .into_iter()
        .map(|code| {
            let label = languageSelfName(&code);
            let label = if label.is_empty() { code.clone() } else { label };
            LocaleOption { code, label }
        })
        .collect()
}

async fn load_translator(choice: &LanguageChoice) -> Result<Translator, String> {
    match choice {
        LanguageChoice::System => Ok(Translator::System),
        LanguageChoice::Locale(code) => {
            let dict_js = loadLocaleMessages(code)
                .await
                .map_err(|e| format!("Missing locale {}: {:?}", code, e))?;

            let text = dict_js
                .as_string()
                .ok_or_else(|| format!("Locale {} did not return text", code))?;
            let dict = serde_json::from_str(&text)
                .map_err(|e| format!("Failed to parse locale {}: {}", code, e))?;

            Ok(Translator::Dict(dict))
        }
    }
}
