//! Error types shared by the provider adapters and the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

/// Failure talking to a remote provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced an HTTP response (DNS, connect, timeout)
    #[error("failed to send request to {provider}: {message}")]
    Transport {
        provider: &'static str,
        message: String,
    },

    /// The provider answered with a non-success status
    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// The provider answered 2xx but the body was not what we expected
    #[error("failed to parse {provider} response: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    pub fn provider(&self) -> &'static str {
        match self {
            Self::Transport { provider, .. }
            | Self::Api { provider, .. }
            | Self::Decode { provider, .. } => *provider,
        }
    }
}

/// Error returned by request handlers.
///
/// Every variant renders as a plain-text body with a matching status code;
/// none of them is fatal to the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing field, unsupported language code or unparsable locale
    #[error("{0}")]
    Validation(String),

    /// Remote call failed
    #[error("{context}: {source}")]
    Provider {
        context: &'static str,
        #[source]
        source: ProviderError,
    },

    /// Writing generated audio to disk failed
    #[error("Write file error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn provider(context: &'static str, source: ProviderError) -> Self {
        Self::Provider { context, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Provider { .. } | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_client_error() {
            warn!("Rejected request ({}): {}", status, message);
        } else {
            error!("Request failed ({}): {}", status, message);
        }

        (status, message).into_response()
    }
}
