use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Google Cloud
    pub google_api_key: String,
    pub translate_api_url: String,
    pub tts_api_url: String,
    pub provider_timeout_secs: u64,

    // Web server
    pub host: String,
    pub port: u16,

    // Files
    pub static_dir: PathBuf,
    pub index_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Google Cloud - one API key serves both Translation and Text-to-Speech
            google_api_key: std::env::var("GOOGLE_API_KEY")
                .context("GOOGLE_API_KEY not set")?,
            translate_api_url: std::env::var("TRANSLATE_API_URL")
                .unwrap_or_else(|_| "https://translation.googleapis.com".to_string()),
            tts_api_url: std::env::var("TTS_API_URL")
                .unwrap_or_else(|_| "https://texttospeech.googleapis.com".to_string()),
            provider_timeout_secs: std::env::var("PROVIDER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),

            // Web server
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            // Files
            static_dir: std::env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),
            index_file: std::env::var("INDEX_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("templates/index.html")),
        })
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "GOOGLE_API_KEY",
        "TRANSLATE_API_URL",
        "TTS_API_URL",
        "PROVIDER_TIMEOUT_SECS",
        "HOST",
        "PORT",
        "STATIC_DIR",
        "INDEX_FILE",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_requires_api_key() {
        clear_env();

        let result = Config::from_env();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("GOOGLE_API_KEY"));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        std::env::set_var("GOOGLE_API_KEY", "test-key");

        let config = Config::from_env().expect("Should load");
        assert_eq!(config.google_api_key, "test-key");
        assert_eq!(config.translate_api_url, "https://translation.googleapis.com");
        assert_eq!(config.tts_api_url, "https://texttospeech.googleapis.com");
        assert_eq!(config.provider_timeout_secs, 30);
        assert_eq!(config.port, 8080);
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.index_file, PathBuf::from("templates/index.html"));
        assert_eq!(config.bind_address(), "0.0.0.0:8080");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("GOOGLE_API_KEY", "test-key");
        std::env::set_var("HOST", "127.0.0.1");
        std::env::set_var("PORT", "3000");
        std::env::set_var("STATIC_DIR", "/var/lib/tts");
        std::env::set_var("PROVIDER_TIMEOUT_SECS", "5");

        let config = Config::from_env().expect("Should load");
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.static_dir, PathBuf::from("/var/lib/tts"));
        assert_eq!(config.provider_timeout_secs, 5);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_port_falls_back() {
        clear_env();
        std::env::set_var("GOOGLE_API_KEY", "test-key");
        std::env::set_var("PORT", "not-a-port");

        let config = Config::from_env().expect("Should load");
        assert_eq!(config.port, 8080);

        clear_env();
    }
}
