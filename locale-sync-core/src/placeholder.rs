//! `{{variable}}` protection for machine translation.
//!
//! The name inside each placeholder is swapped for a sentinel before the text
//! goes to the backend, so `{{user}}` travels as `{{ ###### }}`. The braces stay
//! in the text and keep the sentinel apart from neighbouring characters; the
//! names are put back by position afterwards.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Sentinel used when none is configured.
pub const DEFAULT_SENTINEL: &str = "######";

fn placeholder_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\{([^{}]*)\}\}").expect("placeholder pattern is valid"))
}

/// True if the text contains at least one `{{...}}` placeholder.
#[must_use]
pub fn has_placeholders(text: &str) -> bool {
    placeholder_regex().is_match(text)
}

/// All placeholders in the text, left to right.
#[must_use]
pub fn extract_placeholders(text: &str) -> Vec<String> {
    placeholder_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Text with its placeholder names swapped for a sentinel, plus the tokens
/// needed to undo the swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedText {
    pub masked: String,
    pub tokens: Vec<String>,
    sentinel: String,
}

impl MaskedText {
    /// Replace each placeholder with `{{ sentinel }}`, remembering the
    /// originals in order.
    #[must_use]
    pub fn mask(text: &str, sentinel: &str) -> Self {
        let tokens = extract_placeholders(text);
        let masked = placeholder_regex()
            .replace_all(text, |_: &Captures<'_>| format!("{{{{ {sentinel} }}}}"))
            .into_owned();
        Self {
            masked,
            tokens,
            sentinel: sentinel.to_string(),
        }
    }

    /// Put the tokens back into `translated`, the i-th masked placeholder
    /// receiving the i-th token.
    ///
    /// Only `{{...}}` groups whose content is the sentinel are replaced, so a
    /// bare sentinel already present in the text is left alone. Whitespace the
    /// backend adds or drops inside the braces does not matter. If the backend
    /// dropped or duplicated a group the result is misaligned: surplus groups
    /// stay in the text and surplus tokens are lost.
    #[must_use]
    pub fn restore(&self, translated: &str) -> String {
        if self.tokens.is_empty() {
            return translated.to_string();
        }

        let found = self.masked_groups(translated).count();
        if found != self.tokens.len() {
            log::warn!(
                "placeholder count changed during translation ({} sent, {} returned): {translated:?}",
                self.tokens.len(),
                found
            );
        }

        let mut out = String::with_capacity(translated.len());
        let mut last = 0;
        for (group, token) in self.masked_groups(translated).zip(&self.tokens) {
            out.push_str(&translated[last..group.start()]);
            out.push_str(token);
            last = group.end();
        }
        out.push_str(&translated[last..]);
        out
    }

    fn masked_groups<'t>(&'t self, text: &'t str) -> impl Iterator<Item = regex::Match<'t>> + 't {
        placeholder_regex().captures_iter(text).filter_map(|caps| {
            let inner = caps.get(1)?;
            if inner.as_str().trim() == self.sentinel.trim() {
                caps.get(0)
            } else {
                None
            }
        })
    }
}
