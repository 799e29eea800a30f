use crate::services::StoreStatus;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How many collection names the report lists.
pub const MAX_REPORTED_COLLECTIONS: usize = 10;
/// Longest store error excerpt included in the report.
pub const MAX_ERROR_CHARS: usize = 50;

const SET: &str = "✅ Set";
const NOT_SET: &str = "❌ Not Set";

/// Operational snapshot served by `GET /test`.
///
/// Configuration values are reported as set or not set, never echoed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DiagnosticsReport {
    #[schema(example = "✅ Running")]
    pub backend: String,
    #[schema(example = "✅ Connected & Working")]
    pub database: String,
    #[schema(example = "✅ Set")]
    pub database_url: String,
    #[schema(example = "✅ Set")]
    pub database_name: String,
    #[schema(example = "Connected")]
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl DiagnosticsReport {
    /// `status` is `None` when no store adapter is wired into the process.
    pub fn new(status: Option<StoreStatus>, url_set: bool, name_set: bool) -> Self {
        let (database, connection_status, collections) = match status {
            None => (
                "❌ Database module not found".to_string(),
                "Not Connected",
                Vec::new(),
            ),
            Some(StoreStatus::NotInitialized) => (
                "⚠️  Available but not initialized".to_string(),
                "Not Connected",
                Vec::new(),
            ),
            Some(StoreStatus::Faulted { error }) => (
                format!("⚠️  Connected but Error: {}", truncate_chars(&error, MAX_ERROR_CHARS)),
                "Connected",
                Vec::new(),
            ),
            Some(StoreStatus::Connected { mut collections }) => {
                collections.truncate(MAX_REPORTED_COLLECTIONS);
                (
                    "✅ Connected & Working".to_string(),
                    "Connected",
                    collections,
                )
            }
        };

        Self {
            backend: "✅ Running".to_string(),
            database,
            database_url: presence(url_set),
            database_name: presence(name_set),
            connection_status: connection_status.to_string(),
            collections,
        }
    }
}

fn presence(set: bool) -> String {
    let label = if set { SET } else { NOT_SET };
    label.to_string()
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
