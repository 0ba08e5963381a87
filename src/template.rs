/// Post text rendering: placeholder substitution and whitespace cleanup
use std::sync::LazyLock;

use regex::Regex;

use crate::settings::{DEFAULT_TEMPLATE, Settings};

/// Page values substituted into the template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    pub title: String,
    pub url: String,
}

impl RenderContext {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> RenderContext {
        RenderContext {
            title: title.into(),
            url: url.into(),
        }
    }
}

// Runs of spaces/tabs sitting directly before a newline
static TRAILING_INLINE_WS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+\n").expect("constant regex pattern is valid"));

/// Convert literal "\n" (backslash + n) and "/n" to real newlines
///
/// Users type templates into a plain text field, so an escaped-looking
/// newline has to be turned into the real thing. The "/n" rule is kept
/// as shipped: it tolerates the common slash-for-backslash typo.
pub fn normalize_template_newlines(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    s.replace("\\n", "\n").replace("/n", "\n")
}

/// Render the final post text
///
/// Steps:
/// 1. Fall back to the default template when the configured one is empty
/// 2. Normalize literal newline sequences in the template
/// 3. Substitute {title}, {url} and {hashtags} everywhere they occur
/// 4. If the template had no {hashtags} token, append the hashtags on
///    their own line so they are never silently dropped
/// 5. Strip trailing inline whitespace per line and at the end of the text
pub fn build_post_text(ctx: &RenderContext, settings: &Settings) -> String {
    let template_raw = if settings.template.is_empty() {
        DEFAULT_TEMPLATE
    } else {
        settings.template.as_str()
    };
    let template = normalize_template_newlines(template_raw);

    let hashtags = settings.hashtags.trim();
    let has_hashtags_token = template.contains("{hashtags}");

    let mut text = template
        .replace("{title}", &ctx.title)
        .replace("{url}", &ctx.url)
        .replace("{hashtags}", hashtags);

    if !has_hashtags_token && !hashtags.is_empty() {
        text.truncate(text.trim_end().len());
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(hashtags);
    }

    let text = TRAILING_INLINE_WS.replace_all(&text, "\n");
    text.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with(template: &str, hashtags: &str) -> Settings {
        Settings {
            template: template.to_string(),
            hashtags: hashtags.to_string(),
            ..Settings::default()
        }
    }

    fn page() -> RenderContext {
        RenderContext::new("Hello", "https://a.test")
    }

    #[test]
    fn test_default_template_without_hashtags() {
        let text = build_post_text(&page(), &settings_with("{title}\n{url}", ""));

        assert_eq!(text, "Hello\nhttps://a.test");
    }

    #[test]
    fn test_default_template_appends_hashtags() {
        let text = build_post_text(&page(), &settings_with("{title}\n{url}", "#music #bookmark"));

        assert_eq!(text, "Hello\nhttps://a.test\n#music #bookmark");
    }

    #[test]
    fn test_literal_newlines_and_hashtags_token() {
        let settings = settings_with("Listening: {title}\\n{url}\\n{hashtags}", "#np");

        let text = build_post_text(&page(), &settings);

        assert_eq!(text, "Listening: Hello\nhttps://a.test\n#np");
    }

    #[test]
    fn test_slash_n_is_treated_as_newline() {
        let text = build_post_text(&page(), &settings_with("{title}/n{url}", ""));

        assert_eq!(text, "Hello\nhttps://a.test");
    }

    #[test]
    fn test_empty_template_falls_back_to_default() {
        let text = build_post_text(&page(), &settings_with("", ""));

        assert_eq!(text, "Hello\nhttps://a.test");
    }

    #[test]
    fn test_hashtags_appended_exactly_once_without_token() {
        let text = build_post_text(&page(), &settings_with("{title} - {url}", "#rust"));

        assert!(text.ends_with("#rust"));
        assert_eq!(text.matches("#rust").count(), 1);
        assert_eq!(text, "Hello - https://a.test\n#rust");
    }

    #[test]
    fn test_hashtags_token_substituted_in_place() {
        let text = build_post_text(&page(), &settings_with("{hashtags} {title}", "#rust"));

        assert_eq!(text, "#rust Hello");
        assert_eq!(text.matches("#rust").count(), 1);
    }

    #[test]
    fn test_repeated_tokens_all_substituted() {
        let text = build_post_text(&page(), &settings_with("{title} {title}\\n{url}", ""));

        assert_eq!(text, "Hello Hello\nhttps://a.test");
    }

    #[test]
    fn test_hashtags_are_trimmed() {
        let text = build_post_text(&page(), &settings_with("{title}", "  #np  "));

        assert_eq!(text, "Hello\n#np");
    }

    #[test]
    fn test_whitespace_only_hashtags_do_not_append() {
        let text = build_post_text(&page(), &settings_with("{title}", "   "));

        assert_eq!(text, "Hello");
    }

    #[test]
    fn test_empty_title_and_url_leave_no_token_behind() {
        let ctx = RenderContext::default();

        let text = build_post_text(&ctx, &settings_with("{title}\n{url}", "#np"));

        assert!(!text.contains("{title}"));
        assert!(!text.contains("{url}"));
        assert_eq!(text, "#np");
    }

    #[test]
    fn test_whitespace_only_result_collapses_to_empty() {
        let ctx = RenderContext::default();

        let text = build_post_text(&ctx, &settings_with(" {title} \\n {url} ", ""));

        assert_eq!(text, "");
    }

    #[test]
    fn test_empty_hashtags_token_is_removed_cleanly() {
        let with_token = build_post_text(&page(), &settings_with("{title}\n{url}\n{hashtags}", ""));
        let without_token = build_post_text(&page(), &settings_with("{title}\n{url}", ""));

        assert_eq!(with_token, without_token);
    }

    #[test]
    fn test_inline_trailing_whitespace_is_stripped() {
        let text = build_post_text(&page(), &settings_with("{title}  \t\\n{url}", ""));

        assert_eq!(text, "Hello\nhttps://a.test");
    }

    #[test]
    fn test_output_never_ends_in_whitespace() {
        let cases = [
            ("{title}\\n{url}\\n", ""),
            ("{title}  ", "#np"),
            ("{url}\\n\\n", "#a #b"),
            ("   ", ""),
            ("{hashtags}   ", "#x"),
        ];

        for (template, hashtags) in cases {
            let text = build_post_text(&page(), &settings_with(template, hashtags));
            assert!(
                !text.ends_with([' ', '\t', '\n']),
                "trailing whitespace for template {:?}",
                template
            );
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = ["{title}\\n{url}", "a/nb", "already\nreal", "\\n/n\n"];

        for input in inputs {
            let once = normalize_template_newlines(input);
            let twice = normalize_template_newlines(&once);
            assert_eq!(once, twice, "double normalization changed {:?}", input);
        }
    }

    #[test]
    fn test_url_content_is_not_newline_normalized() {
        // Only the template is normalized; substituted values keep "/n"
        let ctx = RenderContext::new("Hello", "https://a.test/news");

        let text = build_post_text(&ctx, &settings_with("{url}", ""));

        assert_eq!(text, "https://a.test/news");
    }
}
