//! Translation backend seam and the wrappers layered on top of it.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::config::LanguageRemap;
use crate::placeholder::{MaskedText, has_placeholders};

/// Trait for abstracting the machine-translation service.
/// Network-backed implementations live outside this crate.
pub trait Translator {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Translate `text` from `source` to `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects or fails the request.
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, Self::Error>;
}

impl<T: Translator + ?Sized> Translator for &T {
    type Error = T::Error;

    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, Self::Error> {
        (**self).translate(text, source, target)
    }
}

/// In-memory memo of backend results for a single run.
///
/// Identical leaves (a repeated "OK" or "Cancel") are only sent once per
/// language pair.
pub struct CachingTranslator<T> {
    inner: T,
    cache: RefCell<HashMap<(String, String, String), String>>,
    hits: Cell<usize>,
}

impl<T: Translator> CachingTranslator<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
            hits: Cell::new(0),
        }
    }

    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.get()
    }
}

impl<T: Translator> Translator for CachingTranslator<T> {
    type Error = T::Error;

    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, Self::Error> {
        let key = (text.to_string(), source.to_string(), target.to_string());
        if let Some(hit) = self.cache.borrow().get(&key) {
            self.hits.set(self.hits.get() + 1);
            return Ok(hit.clone());
        }
        let translated = self.inner.translate(text, source, target)?;
        self.cache.borrow_mut().insert(key, translated.clone());
        Ok(translated)
    }
}

/// Translator bound to one source language that keeps `{{var}}` placeholders
/// intact and applies the language remap table.
pub struct InterpolationSafeTranslator<'a, T> {
    backend: T,
    source: &'a str,
    remap: &'a LanguageRemap,
    sentinel: &'a str,
}

impl<'a, T: Translator> InterpolationSafeTranslator<'a, T> {
    pub const fn new(
        backend: T,
        source: &'a str,
        remap: &'a LanguageRemap,
        sentinel: &'a str,
    ) -> Self {
        Self {
            backend,
            source,
            remap,
            sentinel,
        }
    }

    /// Translate `text` into `target`.
    ///
    /// Text without placeholders goes to the backend untouched; otherwise the
    /// placeholders are masked, the masked text is translated, and the
    /// placeholders are restored in their original order.
    ///
    /// # Errors
    ///
    /// Propagates the backend error unchanged.
    pub fn translate(&self, text: &str, target: &str) -> Result<String, T::Error> {
        let backend_target = self.remap.resolve(target);
        if backend_target != target {
            log::debug!("sending '{target}' to the backend as '{backend_target}'");
        }

        if !has_placeholders(text) {
            return self.backend.translate(text, self.source, backend_target);
        }

        let masked = MaskedText::mask(text, self.sentinel);
        let translated = self
            .backend
            .translate(&masked.masked, self.source, backend_target)?;
        Ok(masked.restore(&translated))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::placeholder::DEFAULT_SENTINEL;
    use std::convert::Infallible;

    /// Backend that records each request and returns `<target>:<text>`.
    #[derive(Default)]
    pub(crate) struct EchoTranslator {
        pub(crate) calls: RefCell<Vec<(String, String, String)>>,
    }

    impl Translator for EchoTranslator {
        type Error = Infallible;

        fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, Self::Error> {
            self.calls
                .borrow_mut()
                .push((text.to_string(), source.to_string(), target.to_string()));
            Ok(format!("{target}:{text}"))
        }
    }

    #[test]
    fn plain_text_is_sent_unmasked() {
        let backend = EchoTranslator::default();
        let remap = LanguageRemap::default();
        let translator = InterpolationSafeTranslator::new(&backend, "en", &remap, DEFAULT_SENTINEL);

        let out = translator.translate("Good morning", "fr").unwrap();

        assert_eq!(out, "fr:Good morning");
        let calls = backend.calls.borrow();
        assert_eq!(calls.as_slice(), &[(
            "Good morning".to_string(),
            "en".to_string(),
            "fr".to_string()
        )]);
    }

    #[test]
    fn placeholders_survive_round_trip_in_order() {
        let backend = EchoTranslator::default();
        let remap = LanguageRemap::default();
        let translator = InterpolationSafeTranslator::new(&backend, "en", &remap, DEFAULT_SENTINEL);

        let out = translator
            .translate("{{user}} sent {{count}} files to {{user_b}}", "de")
            .unwrap();

        assert_eq!(out, "de:{{user}} sent {{count}} files to {{user_b}}");
        let calls = backend.calls.borrow();
        assert_eq!(
            calls[0].0,
            "{{ ###### }} sent {{ ###### }} files to {{ ###### }}"
        );
    }

    #[test]
    fn placeholder_after_hash_keeps_its_position() {
        let backend = EchoTranslator::default();
        let remap = LanguageRemap::empty();
        let translator = InterpolationSafeTranslator::new(&backend, "en", &remap, DEFAULT_SENTINEL);

        assert_eq!(
            translator.translate("Order #{{id}} shipped", "fr").unwrap(),
            "fr:Order #{{id}} shipped"
        );
        assert_eq!(
            translator.translate("Tag ###### is {{tag}}", "fr").unwrap(),
            "fr:Tag ###### is {{tag}}"
        );
    }

    #[test]
    fn remapped_target_reaches_backend() {
        let backend = EchoTranslator::default();
        let remap = LanguageRemap::default();
        let translator = InterpolationSafeTranslator::new(&backend, "en", &remap, DEFAULT_SENTINEL);

        translator.translate("Yes", "sr").unwrap();
        assert_eq!(backend.calls.borrow()[0].2, "hr");
    }

    #[test]
    fn cache_skips_repeated_requests() {
        let backend = EchoTranslator::default();
        let cached = CachingTranslator::new(&backend);

        assert_eq!(cached.translate("OK", "en", "fr").unwrap(), "fr:OK");
        assert_eq!(cached.translate("OK", "en", "fr").unwrap(), "fr:OK");
        assert_eq!(cached.translate("OK", "en", "de").unwrap(), "de:OK");

        assert_eq!(backend.calls.borrow().len(), 2);
        assert_eq!(cached.hits(), 1);
    }
}
