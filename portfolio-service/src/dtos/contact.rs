use crate::models::{ContactMessage, StoredContact};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_LIST_LIMIT: i64 = 25;
pub const MAX_LIST_LIMIT: i64 = 100;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ContactRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Ada")]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "ada@example.com")]
    pub email: String,

    #[schema(example = "Collaboration")]
    pub subject: Option<String>,

    #[validate(length(min = 1, message = "Message cannot be empty"))]
    #[schema(example = "Hello")]
    pub message: String,
}

impl From<ContactRequest> for ContactMessage {
    fn from(request: ContactRequest) -> Self {
        ContactMessage::new(request.name, request.email, request.subject, request.message)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    #[schema(example = "665f1c2e9b1e8a3d4c2b1a00")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<StoredContact> for ContactResponse {
    fn from(stored: StoredContact) -> Self {
        Self {
            id: stored.id,
            name: stored.name,
            email: stored.email,
            subject: stored.subject,
            message: stored.message,
            created_at: stored.created_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListContactsQuery {
    /// Maximum number of messages to return (default 25, capped at 100).
    #[validate(range(min = 1, message = "limit must be at least 1"))]
    #[param(example = 25, minimum = 1, maximum = 100)]
    pub limit: Option<i64>,
}

impl ListContactsQuery {
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .min(MAX_LIST_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, message: &str) -> ContactRequest {
        ContactRequest {
            name: name.to_string(),
            email: email.to_string(),
            subject: None,
            message: message.to_string(),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request("Ada", "ada@example.com", "Hello").validate().is_ok());
    }

    #[test]
    fn empty_name_or_message_is_rejected() {
        assert!(request("", "ada@example.com", "Hello").validate().is_err());
        assert!(request("Ada", "ada@example.com", "").validate().is_err());
    }

    #[test]
    fn malformed_email_is_rejected() {
        assert!(request("Ada", "not-an-email", "Hello").validate().is_err());
    }

    #[test]
    fn limit_defaults_and_caps() {
        assert_eq!(ListContactsQuery::default().effective_limit(), 25);
        assert_eq!(ListContactsQuery { limit: Some(3) }.effective_limit(), 3);
        assert_eq!(ListContactsQuery { limit: Some(5000) }.effective_limit(), 100);
    }

    #[test]
    fn zero_limit_is_invalid() {
        assert!(ListContactsQuery { limit: Some(0) }.validate().is_err());
        assert!(ListContactsQuery { limit: None }.validate().is_ok());
    }
}
