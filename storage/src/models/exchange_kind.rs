//! Kind of user input an exchange was made for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stored in the `message_type` column as `"text"` or `"photo"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeKind {
    Text,
    Photo,
}

impl ExchangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeKind::Text => "text",
            ExchangeKind::Photo => "photo",
        }
    }
}

impl fmt::Display for ExchangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExchangeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ExchangeKind::Text),
            "photo" => Ok(ExchangeKind::Photo),
            other => Err(format!("unknown message_type '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_values() {
        assert_eq!("text".parse::<ExchangeKind>(), Ok(ExchangeKind::Text));
        assert_eq!("photo".parse::<ExchangeKind>(), Ok(ExchangeKind::Photo));
        assert!("Photo".parse::<ExchangeKind>().is_err());
        assert!("voice".parse::<ExchangeKind>().is_err());
    }

    #[test]
    fn display_matches_column_value() {
        assert_eq!(ExchangeKind::Photo.to_string(), "photo");
    }
}
