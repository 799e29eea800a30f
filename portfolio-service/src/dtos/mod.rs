pub mod contact;
pub mod diagnostics;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use contact::{ContactRequest, ContactResponse, ListContactsQuery};
pub use diagnostics::DiagnosticsReport;

/// Fixed informational payload of the liveness endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Portfolio API running")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Failed to save message")]
    pub error: String,
    pub details: Option<String>,
}
