//! `vbot history`: prints stored exchanges, newest first.

use anyhow::{Context, Result};
use storage::{ExchangeQuery, ExchangeRecord, ExchangeRepository};

const PREVIEW_LEN: usize = 60;

/// Opens the database at `database_url` and prints the rows matching `query`.
pub async fn print_history(database_url: &str, query: &ExchangeQuery) -> Result<()> {
    let repo = ExchangeRepository::new(database_url)
        .await
        .with_context(|| format!("Open message database at {}", database_url))?;
    let records = repo.recent(query).await.context("Query stored exchanges")?;

    if records.is_empty() {
        println!("No exchanges stored (database: {}).", database_url);
        return Ok(());
    }

    println!(
        "{} exchange(s), newest first (database: {}):\n",
        records.len(),
        database_url
    );
    println!(
        "{:<6} {:<24} {:<12} {:<16} {:<6} {}",
        "ID", "TIMESTAMP", "USER_ID", "USERNAME", "KIND", "INPUT -> RESPONSE"
    );
    for record in &records {
        println!("{}", format_record(record));
    }
    Ok(())
}

/// One table row; input and response are flattened to a single line and truncated.
pub fn format_record(record: &ExchangeRecord) -> String {
    format!(
        "{:<6} {:<24} {:<12} {:<16} {:<6} {} -> {}",
        record.id,
        record.timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
        record.user_id,
        record.username.as_deref().unwrap_or("-"),
        record.kind.as_str(),
        preview(&record.user_input),
        preview(&record.ai_response),
    )
}

fn preview(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() > PREVIEW_LEN {
        format!("{}...", flat.chars().take(PREVIEW_LEN).collect::<String>())
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use storage::ExchangeKind;

    fn record(input: &str, response: &str, username: Option<&str>) -> ExchangeRecord {
        ExchangeRecord {
            id: 7,
            user_id: 1001,
            username: username.map(str::to_string),
            kind: ExchangeKind::Text,
            user_input: input.to_string(),
            ai_response: response.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        }
    }

    #[test]
    fn format_record_contains_fields() {
        let line = format_record(&record("Hello", "Hi there", Some("alice")));

        assert!(line.starts_with("7 "));
        assert!(line.contains("2024-05-01T12:30:00.000Z"));
        assert!(line.contains("1001"));
        assert!(line.contains("alice"));
        assert!(line.contains("text"));
        assert!(line.ends_with("Hello -> Hi there"));
    }

    #[test]
    fn format_record_flattens_and_truncates() {
        let long = "word ".repeat(40);
        let line = format_record(&record("line one\nline two", &long, None));

        assert!(line.contains("line one line two"));
        assert!(line.contains(" - "));
        assert!(line.ends_with("..."));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn preview_counts_chars_not_bytes() {
        let text = "é".repeat(PREVIEW_LEN);
        assert_eq!(preview(&text), text);
    }
}
