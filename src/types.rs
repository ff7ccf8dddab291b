use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One repository as returned by `GET /users/{user}/repos`.
///
/// Only the fields the page displays are kept. Every field tolerates a
/// missing, null or mistyped value and falls back to its default, so one
/// odd record never fails the whole listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub stargazers_count: u64,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub homepage: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub html_url: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub fork: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub archived: bool,
}

impl Repository {
    /// Homepage link, if the owner set a non-empty one.
    pub fn live_url(&self) -> Option<&str> {
        self.homepage.as_deref().filter(|h| !h.is_empty())
    }

    /// Hidden repositories never show up on the page, whatever the query.
    pub fn is_hidden(&self) -> bool {
        self.fork || self.archived
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        _ => 0,
    })
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}
