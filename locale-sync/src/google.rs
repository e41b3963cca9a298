use locale_sync_core::Translator;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum GoogleError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("translation service answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not parse translation response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected translation response shape: {0}")]
    Malformed(String),
}

/// Blocking client for the public Google Translate endpoint.
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, GoogleError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("locale-sync/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl Translator for GoogleTranslator {
    type Error = GoogleError;

    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, Self::Error> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("dt", "t"),
                ("sl", source),
                ("tl", target),
                ("q", text),
            ])
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(GoogleError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let payload: Value = serde_json::from_str(&body)?;
        parse_response(&payload)
    }
}

/// Join the translated sentences of a `translate_a/single` response.
///
/// The payload looks like `[[["Bonjour","Hello",...],["Monde","World",...]],null,"en",...]`.
fn parse_response(payload: &Value) -> Result<String, GoogleError> {
    let sentences = payload
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| GoogleError::Malformed("missing sentence list".into()))?;

    let mut out = String::new();
    for sentence in sentences {
        if let Some(part) = sentence.get(0).and_then(Value::as_str) {
            out.push_str(part);
        }
    }

    if out.is_empty() {
        return Err(GoogleError::Malformed("no translated text".into()));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joins_all_sentences() {
        let payload = json!([
            [["Bonjour. ", "Hello. ", null, null, 10], ["Au revoir", "Bye", null, null, 10]],
            null,
            "en"
        ]);
        assert_eq!(parse_response(&payload).unwrap(), "Bonjour. Au revoir");
    }

    #[test]
    fn rejects_unexpected_shapes() {
        assert!(matches!(
            parse_response(&json!({ "error": "nope" })),
            Err(GoogleError::Malformed(_))
        ));
        assert!(matches!(
            parse_response(&json!([[]])),
            Err(GoogleError::Malformed(_))
        ));
    }

    #[test]
    fn blank_text_skips_the_network() {
        let translator = GoogleTranslator::new("http://127.0.0.1:9/unreachable").unwrap();
        assert_eq!(translator.translate("  ", "en", "fr").unwrap(), "  ");
    }
}
