//! Logging initialization: human-readable lines (timestamp, level, target, message, fields) to both console and file.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::{FmtSpan, Writer},
    fmt::time::FormatTime,
    fmt::writer::MakeWriterExt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Local time in `YYYY-MM-DD HH:MM:SS` for human-readable log lines.
struct ChronoLocal;

impl FormatTime for ChronoLocal {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let t = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        write!(w, "{} ", t)
    }
}

/// Initializes the global tracing subscriber.
///
/// Lines look like `YYYY-MM-DD HH:MM:SS LEVEL target: message key=value ...` and are teed to stdout
/// and `log_file_path` (parent directories are created). No ANSI codes so the file stays plain text.
/// Level comes from `RUST_LOG`, default `info`. Load `.env` before calling.
pub fn init_tracing(log_file_path: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(log_file_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    let writer = io::stdout.and(Arc::new(file));

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let event_format = tracing_subscriber::fmt::format()
        .with_timer(ChronoLocal)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(false);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .event_format(event_format)
        .with_span_events(FmtSpan::NONE)
        .with_ansi(false);

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}

/// Masks a Telegram bot token for logging.
///
/// The numeric bot id before `:` is public and kept; the secret part is reduced to its last 4 characters.
/// Tokens without a `:` or with a secret of 8 characters or fewer are fully masked as `***`.
pub fn mask_token(token: &str) -> String {
    let Some((bot_id, secret)) = token.split_once(':') else {
        return "***".to_string();
    };
    let secret_len = secret.chars().count();
    if secret_len <= 8 {
        return "***".to_string();
    }
    let tail: String = secret.chars().skip(secret_len - 4).collect();
    format!("{}:***{}", bot_id, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_token_keeps_bot_id_and_tail() {
        assert_eq!(
            mask_token("123456789:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw"),
            "123456789:***Dsaw"
        );
    }

    #[test]
    fn mask_token_short_or_malformed_is_fully_masked() {
        assert_eq!(mask_token(""), "***");
        assert_eq!(mask_token("no-colon-token-value"), "***");
        assert_eq!(mask_token("42:short"), "***");
    }
}
