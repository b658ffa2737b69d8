use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Error envelope the backend returns alongside non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub status: u16,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl ErrorBody {
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// One-line summary: the message, followed by any field errors
    pub fn summary(&self) -> String {
        let message = self
            .message
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or("no details");

        if self.fields.is_empty() {
            message.to_string()
        } else {
            let fields: Vec<String> = self
                .fields
                .iter()
                .map(|(field, reason)| format!("{}: {}", field, reason))
                .collect();
            format!("{} ({})", message, fields.join("; "))
        }
    }
}
