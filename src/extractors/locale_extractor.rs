//! Locale extraction from inline scripts
//!
//! Pages embed their locale in state blobs that are frequently truncated or
//! not valid JSON on their own, so the keys are found by pattern rather than
//! by parsing the scripts.

use std::sync::LazyLock;

use regex::Regex;

static COUNTRY_ORIGIN_RE: LazyLock<Regex> = LazyLock::new(|| script_key_pattern("countryOrigin"));
static CURRENCY_CODE_RE: LazyLock<Regex> = LazyLock::new(|| script_key_pattern("currencyCode"));

fn script_key_pattern(key: &str) -> Regex {
    Regex::new(&format!(
        r#""{}"\s*:\s*"((?:[^"\\]|\\.)*)""#,
        regex::escape(key)
    ))
    .expect("valid regex")
}

/// Locale hints found on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locale {
    pub country_origin: Option<String>,
    pub currency_code: Option<String>,
}

/// Source of locale hints for a page's inline scripts.
pub trait LocaleScanner {
    fn scan(&self, scripts: &[String]) -> Locale;
}

/// Best-effort scanner matching `"key":"value"` pairs anywhere in script text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptKeyScanner;

impl LocaleScanner for ScriptKeyScanner {
    fn scan(&self, scripts: &[String]) -> Locale {
        let locale = Locale {
            country_origin: first_script_value(scripts, &COUNTRY_ORIGIN_RE),
            currency_code: first_script_value(scripts, &CURRENCY_CODE_RE),
        };
        tracing::debug!(
            country_origin = ?locale.country_origin,
            currency_code = ?locale.currency_code,
            scripts = scripts.len(),
            "locale scan finished"
        );
        locale
    }
}

/// First value captured by `pattern` across the scripts, in order.
fn first_script_value(scripts: &[String], pattern: &Regex) -> Option<String> {
    scripts.iter().find_map(|script| {
        let raw = pattern.captures(script)?.get(1)?.as_str();
        Some(unescape_json_string(raw))
    })
}

// Decode JSON escapes when the captured text is a valid string body;
// otherwise keep it as written.
fn unescape_json_string(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }
    serde_json::from_str::<String>(&format!("\"{raw}\"")).unwrap_or_else(|_| raw.to_string())
}
