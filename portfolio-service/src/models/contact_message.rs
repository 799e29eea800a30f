use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};

/// Collection holding submitted contact messages.
pub const CONTACT_COLLECTION: &str = "contactmessage";

/// A contact message as persisted in the document store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactMessage {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    /// Stamp a new submission with the handler-side receive time.
    pub fn new(name: String, email: String, subject: Option<String>, message: String) -> Self {
        Self {
            id: None,
            name,
            email,
            subject,
            message,
            created_at: Utc::now(),
        }
    }

    pub fn to_document(&self) -> Result<Document, bson::ser::Error> {
        bson::to_document(self)
    }
}

/// Lenient read-side view of a stored document.
///
/// Records written by older clients may lack fields; text fields fall back
/// to empty strings and a missing timestamp falls back to `now`.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredContact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl StoredContact {
    pub fn from_document(doc: &Document, now: DateTime<Utc>) -> Self {
        Self {
            id: doc.get("_id").map(id_to_string).unwrap_or_default(),
            name: text_field(doc, "name"),
            email: text_field(doc, "email"),
            subject: match doc.get("subject") {
                Some(Bson::String(s)) => Some(s.clone()),
                _ => None,
            },
            message: text_field(doc, "message"),
            created_at: match doc.get("created_at") {
                Some(Bson::DateTime(dt)) => dt.to_chrono(),
                Some(Bson::String(s)) => DateTime::parse_from_rfc3339(s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or(now),
                _ => now,
            },
        }
    }
}

/// Render a store identifier as text. Object ids use their hex form.
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn text_field(doc: &Document, key: &str) -> String {
    doc.get_str(key).map(str::to_string).unwrap_or_default()
}
