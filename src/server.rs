//! HTTP front controller: routes, form validation and JSON responses.

use crate::error::AppError;
use crate::i18n::{LanguageRegistry, LocaleId};
use crate::speech::SpeechSynthesizer;
use crate::storage::AudioStore;
use crate::translation::Translator;
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, get_service, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<dyn Translator>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub audio_store: Arc<AudioStore>,
}

impl AppState {
    pub fn new(
        translator: Arc<dyn Translator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        audio_store: Arc<AudioStore>,
    ) -> Self {
        Self {
            translator,
            synthesizer,
            audio_store,
        }
    }
}

/// Build the application router.
///
/// Static files (generated audio included) are served from the audio
/// store's directory under `/static`.
pub fn create_router(state: AppState, index_file: &Path) -> Router {
    let static_dir = state.audio_store.dir().to_path_buf();

    Router::new()
        .route("/", get_service(ServeFile::new(index_file)))
        .route("/translate", post(translate))
        .route("/synthesize", post(synthesize))
        .route("/languages", get(list_languages))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct TranslateForm {
    text: Option<String>,
    #[serde(rename = "sourceLanguage")]
    source_language: Option<String>,
    #[serde(rename = "targetLanguage")]
    target_language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

#[derive(Debug, Deserialize)]
pub struct SynthesizeForm {
    text: Option<String>,
    language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SynthesizeResponse {
    #[serde(rename = "audioPath")]
    pub audio_path: String,
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<&'static str>,
}

/// Treat absent and empty form values the same way.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Look up `code` in the registry and parse the result as a locale.
fn resolve_locale(code: &str, role: &str) -> Result<LocaleId, AppError> {
    let locale = LanguageRegistry::get()
        .resolve(code)
        .ok_or_else(|| AppError::validation(format!("Unsupported {} language: {}", role, code)))?;

    LocaleId::parse(locale)
        .map_err(|e| AppError::validation(format!("Invalid {} language: {}", role, e)))
}

async fn translate(
    State(state): State<AppState>,
    form: Result<Form<TranslateForm>, FormRejection>,
) -> Result<Json<TranslateResponse>, AppError> {
    let Form(form) = form.map_err(|e| AppError::validation(e.body_text()))?;

    let (Some(text), Some(source_code), Some(target_code)) = (
        non_empty(form.text),
        non_empty(form.source_language),
        non_empty(form.target_language),
    ) else {
        return Err(AppError::validation(
            "Text, source language, or target language not provided",
        ));
    };

    let target = resolve_locale(&target_code, "target")?;
    let source = resolve_locale(&source_code, "source")?;

    let translation = state
        .translator
        .translate(&text, &source, &target)
        .await
        .map_err(|e| AppError::provider("Translation error", e))?;

    if translation.is_empty_result() {
        warn!(
            "Translation {} -> {} returned no results, answering with empty text",
            source, target
        );
    } else {
        info!("Translated {} chars {} -> {}", text.chars().count(), source, target);
    }

    Ok(Json(TranslateResponse {
        translated_text: translation.into_text(),
    }))
}

async fn synthesize(
    State(state): State<AppState>,
    form: Result<Form<SynthesizeForm>, FormRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Form(form) = form.map_err(|e| AppError::validation(e.body_text()))?;

    let (Some(text), Some(code)) = (non_empty(form.text), non_empty(form.language)) else {
        return Err(AppError::validation("Text or language not provided"));
    };

    let locale = LanguageRegistry::get()
        .resolve(&code)
        .ok_or_else(|| AppError::validation(format!("Unsupported language: {}", code)))?;

    let audio = state
        .synthesizer
        .synthesize(&text, locale)
        .await
        .map_err(|e| AppError::provider("Synthesize error", e))?;

    let stored = state.audio_store.save(&audio).await?;

    info!(
        "Synthesized {} bytes of {} audio to {}",
        audio.len(),
        locale,
        stored.public_path
    );

    Ok((
        [
            (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        Json(SynthesizeResponse {
            audio_path: stored.public_path,
        }),
    ))
}

async fn list_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: LanguageRegistry::get().codes(),
    })
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("en".to_string())), Some("en".to_string()));
    }

    #[test]
    fn test_resolve_locale_supported() {
        let locale = resolve_locale("ko-KR", "target").expect("Should resolve");
        assert_eq!(locale.to_string(), "ko-KR");
    }

    #[test]
    fn test_resolve_locale_unsupported_names_role() {
        let err = resolve_locale("tlh", "source").unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Unsupported source language: tlh");
    }

    #[test]
    fn test_translate_response_field_name() {
        let json = serde_json::to_string(&TranslateResponse {
            translated_text: "Halo \"dunia\"".to_string(),
        })
        .expect("Should serialize");
        assert_eq!(json, r#"{"translatedText":"Halo \"dunia\""}"#);
    }

    #[test]
    fn test_synthesize_response_field_name() {
        let json = serde_json::to_string(&SynthesizeResponse {
            audio_path: "/static/output_1.mp3".to_string(),
        })
        .expect("Should serialize");
        assert_eq!(json, r#"{"audioPath":"/static/output_1.mp3"}"#);
    }

    #[test]
    fn test_translate_form_field_names() {
        let form: TranslateForm = serde_json::from_value(serde_json::json!({
            "text": "Hello",
            "sourceLanguage": "en",
            "targetLanguage": "id"
        }))
        .expect("Should deserialize");

        assert_eq!(form.text.as_deref(), Some("Hello"));
        assert_eq!(form.source_language.as_deref(), Some("en"));
        assert_eq!(form.target_language.as_deref(), Some("id"));
    }
}
