//! Speech synthesis through the Google Cloud Text-to-Speech REST API.
//!
//! Voice gender and audio encoding are fixed: every request asks for a
//! neutral voice and MP3 output.

use crate::error::ProviderError;
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

const PROVIDER: &str = "Cloud Text-to-Speech";

/// Remote text-to-speech.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` spoken in `locale`, returning encoded audio bytes.
    async fn synthesize(&self, text: &str, locale: &str) -> Result<Vec<u8>, ProviderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum SsmlVoiceGender {
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum AudioEncoding {
    Mp3,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelectionParams<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelectionParams<'a> {
    language_code: &'a str,
    ssml_gender: SsmlVoiceGender,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: AudioEncoding,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

fn build_request<'a>(text: &'a str, locale: &'a str) -> SynthesizeRequest<'a> {
    SynthesizeRequest {
        input: SynthesisInput { text },
        voice: VoiceSelectionParams {
            language_code: locale,
            ssml_gender: SsmlVoiceGender::Neutral,
        },
        audio_config: AudioConfig {
            audio_encoding: AudioEncoding::Mp3,
        },
    }
}

/// Synthesizer backed by the Google Cloud Text-to-Speech REST API.
pub struct GoogleSpeechSynthesizer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GoogleSpeechSynthesizer {
    /// `base_url` is the API root, e.g. `https://texttospeech.googleapis.com`.
    pub fn new(client: reqwest::Client, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: format!("{}/v1/text:synthesize", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleSpeechSynthesizer {
    async fn synthesize(&self, text: &str, locale: &str) -> Result<Vec<u8>, ProviderError> {
        let request = build_request(text, locale);

        debug!("Synthesizing {} chars in {}", text.len(), locale);

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

        let parsed: SynthesizeResponse =
            response.json().await.map_err(|e| ProviderError::Decode {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        base64::engine::general_purpose::STANDARD
            .decode(parsed.audio_content.as_bytes())
            .map_err(|e| ProviderError::Decode {
                provider: PROVIDER,
                message: format!("audioContent is not valid base64: {}", e),
            })
    }
}
