use crate::error::ProviderError;
use crate::i18n::LocaleId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const PROVIDER: &str = "Cloud Translation";

/// Outcome of a successful translation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// The provider returned at least one result; this is the first one
    Text(String),
    /// The provider answered successfully but with zero results
    Empty,
}

impl Translation {
    /// Text to hand back to the client. Zero results become an empty string.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Empty => String::new(),
        }
    }

    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Remote text translation.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` to `target` with exactly one provider call.
    async fn translate(
        &self,
        text: &str,
        source: &LocaleId,
        target: &LocaleId,
    ) -> Result<Translation, ProviderError>;
}

/// Google Cloud Translation v2 request body
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: Vec<&'a str>,
    source: String,
    target: String,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslatedText {
    translated_text: String,
}

/// Translator backed by the Google Cloud Translation REST API.
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GoogleTranslator {
    /// `base_url` is the API root, e.g. `https://translation.googleapis.com`.
    pub fn new(client: reqwest::Client, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: format!("{}/language/translate/v2", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &LocaleId,
        target: &LocaleId,
    ) -> Result<Translation, ProviderError> {
        let request = TranslateRequest {
            q: vec![text],
            source: source.to_string(),
            target: target.to_string(),
            format: "text",
        };

        debug!("Translating {} chars from {} to {}", text.len(), source, target);

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Goog-Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Transport {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(ProviderError::Api {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TranslateResponse =
            response.json().await.map_err(|e| ProviderError::Decode {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        match parsed.data.translations.into_iter().next() {
            Some(first) => Ok(Translation::Text(first.translated_text)),
            None => {
                warn!("{} returned no results for {} -> {}", PROVIDER, source, target);
                Ok(Translation::Empty)
            }
        }
    }
}
