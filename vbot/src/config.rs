//! BotConfig: Telegram connection, inference endpoint, storage, logging. Loaded from env once at
//! startup and passed to the component factory.

use anyhow::{anyhow, bail, Context, Result};
use ollama_client::{OllamaConfig, DEFAULT_MODEL, DEFAULT_OLLAMA_URL, DEFAULT_TIMEOUT_SECS};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "bot_data.db";
pub const DEFAULT_LOG_FILE: &str = "logs/vbot.log";

/// Bot config. Use [`BotConfig::load`], then [`BotConfig::validate`] before building components.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// OLLAMA_URL: full generate endpoint URL
    pub ollama_url: String,
    /// OLLAMA_MODEL
    pub ollama_model: String,
    /// OLLAMA_TIMEOUT_SECS
    pub ollama_timeout_secs: u64,
    /// DATABASE_URL: SQLite file path or `sqlite:` URL
    pub database_url: String,
    /// LOG_FILE
    pub log_file: String,
    /// PHOTO_TMP_DIR: where downloaded photos are buffered
    pub photo_tmp_dir: PathBuf,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow!("BOT_TOKEN not set"))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let ollama_url = env::var("OLLAMA_URL").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
        let ollama_model = env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let ollama_timeout_secs = match env::var("OLLAMA_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("OLLAMA_TIMEOUT_SECS is not a number of seconds: {}", raw))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        let database_url = database_url_from_env();
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let photo_tmp_dir = env::var("PHOTO_TMP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir());

        Ok(Self {
            bot_token,
            telegram_api_url,
            ollama_url,
            ollama_model,
            ollama_timeout_secs,
            database_url,
            log_file,
            photo_tmp_dir,
        })
    }

    /// Fail fast on values that would only break at the first message.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            bail!("BOT_TOKEN is empty");
        }
        if self.ollama_model.trim().is_empty() {
            bail!("OLLAMA_MODEL is empty");
        }
        if self.ollama_timeout_secs == 0 {
            bail!("OLLAMA_TIMEOUT_SECS must be greater than zero");
        }
        match reqwest::Url::parse(&self.ollama_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => bail!("OLLAMA_URL is not a valid http(s) URL: {}", self.ollama_url),
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }

    pub fn ollama_config(&self) -> OllamaConfig {
        OllamaConfig::new(self.ollama_url.clone(), self.ollama_model.clone())
            .with_timeout(Duration::from_secs(self.ollama_timeout_secs))
    }
}

/// DATABASE_URL or the default file; shared by `run` and `history`.
pub fn database_url_from_env() -> String {
    env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "BOT_TOKEN",
        "TELEGRAM_API_URL",
        "TELOXIDE_API_URL",
        "OLLAMA_URL",
        "OLLAMA_MODEL",
        "OLLAMA_TIMEOUT_SECS",
        "DATABASE_URL",
        "LOG_FILE",
        "PHOTO_TMP_DIR",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_load_config_with_defaults() {
        clear_env();
        env::set_var("BOT_TOKEN", "test_token");

        let config = BotConfig::load(None).unwrap();

        assert_eq!(config.bot_token, "test_token");
        assert!(config.telegram_api_url.is_none());
        assert_eq!(config.ollama_url, "http://localhost:11434/api/generate");
        assert_eq!(config.ollama_model, "llava");
        assert_eq!(config.ollama_timeout_secs, 120);
        assert_eq!(config.database_url, "bot_data.db");
        assert_eq!(config.log_file, "logs/vbot.log");
        assert_eq!(config.photo_tmp_dir, env::temp_dir());
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_load_config_with_custom_values() {
        clear_env();
        env::set_var("BOT_TOKEN", "custom_token");
        env::set_var("TELOXIDE_API_URL", "http://127.0.0.1:8081");
        env::set_var("OLLAMA_URL", "http://gpu-box:11434/api/generate");
        env::set_var("OLLAMA_MODEL", "bakllava");
        env::set_var("OLLAMA_TIMEOUT_SECS", "30");
        env::set_var("DATABASE_URL", "/tmp/custom.db");
        env::set_var("LOG_FILE", "/tmp/vbot-test.log");
        env::set_var("PHOTO_TMP_DIR", "/tmp/vbot-photos");

        let config = BotConfig::load(None).unwrap();

        assert_eq!(config.bot_token, "custom_token");
        assert_eq!(config.telegram_api_url.as_deref(), Some("http://127.0.0.1:8081"));
        assert_eq!(config.ollama_url, "http://gpu-box:11434/api/generate");
        assert_eq!(config.ollama_model, "bakllava");
        assert_eq!(config.ollama_timeout_secs, 30);
        assert_eq!(config.database_url, "/tmp/custom.db");
        assert_eq!(config.log_file, "/tmp/vbot-test.log");
        assert_eq!(config.photo_tmp_dir, PathBuf::from("/tmp/vbot-photos"));

        let ollama = config.ollama_config();
        assert_eq!(ollama.model, "bakllava");
        assert_eq!(ollama.timeout, Duration::from_secs(30));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_config_with_override_token() {
        clear_env();
        env::set_var("BOT_TOKEN", "env_token");

        let config = BotConfig::load(Some("override_token".to_string())).unwrap();

        assert_eq!(config.bot_token, "override_token");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_config_missing_token() {
        clear_env();

        let err = BotConfig::load(None).unwrap_err();

        assert!(err.to_string().contains("BOT_TOKEN"));
    }

    #[test]
    #[serial]
    fn test_load_config_bad_timeout() {
        clear_env();
        env::set_var("BOT_TOKEN", "t");
        env::set_var("OLLAMA_TIMEOUT_SECS", "two minutes");

        assert!(BotConfig::load(None).is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_validate_rejects_bad_values() {
        clear_env();
        let base = BotConfig::load(Some("123:abc".to_string())).unwrap();
        assert!(base.validate().is_ok());

        let mut empty_token = base.clone();
        empty_token.bot_token = "  ".to_string();
        assert!(empty_token.validate().is_err());

        let mut empty_model = base.clone();
        empty_model.ollama_model = String::new();
        assert!(empty_model.validate().is_err());

        let mut bad_scheme = base.clone();
        bad_scheme.ollama_url = "ftp://localhost/api/generate".to_string();
        assert!(bad_scheme.validate().is_err());

        let mut not_a_url = base.clone();
        not_a_url.ollama_url = "localhost:11434".to_string();
        assert!(not_a_url.validate().is_err());

        let mut bad_telegram = base;
        bad_telegram.telegram_api_url = Some("not a url".to_string());
        assert!(bad_telegram.validate().is_err());
    }
}
