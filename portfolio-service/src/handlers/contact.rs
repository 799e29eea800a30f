use crate::dtos::{ContactRequest, ContactResponse, ErrorResponse, ListContactsQuery};
use crate::models::{ContactMessage, StoredContact, CONTACT_COLLECTION};
use crate::services::DocumentStore;
use crate::startup::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use mongodb::bson::doc;
use service_core::error::AppError;
use std::sync::Arc;
use validator::Validate;

fn require_store(state: &AppState) -> Result<&Arc<dyn DocumentStore>, AppError> {
    state.store.as_ref().ok_or_else(|| {
        tracing::error!("Contact request received but no store adapter is configured");
        AppError::DatabaseError(anyhow::anyhow!("Database not available"))
    })
}

/// Submit a contact message.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message stored", body = ContactResponse),
        (status = 422, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Message could not be saved", body = ErrorResponse)
    ),
    tag = "Contact"
)]
#[tracing::instrument(skip(state, request))]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, AppError> {
    request.validate()?;
    let store = require_store(&state)?;

    let message = ContactMessage::from(request);
    let record = message.to_document()?;

    let stored = store
        .insert_one(CONTACT_COLLECTION, record)
        .await?
        .filter(|doc| doc.contains_key("_id"))
        .ok_or_else(|| {
            tracing::error!("Store returned no identifier for inserted contact message");
            AppError::StorageFailure("Failed to save message".to_string())
        })?;

    let contact = StoredContact::from_document(&stored, message.created_at);
    metrics::counter!("contact_messages_created_total").increment(1);
    tracing::info!(contact_id = %contact.id, "Contact message stored");

    Ok(Json(ContactResponse::from(contact)))
}

/// List stored contact messages in store order.
#[utoipa::path(
    get,
    path = "/api/contact",
    params(ListContactsQuery),
    responses(
        (status = 200, description = "Stored messages", body = [ContactResponse]),
        (status = 422, description = "Invalid limit", body = ErrorResponse)
    ),
    tag = "Contact"
)]
#[tracing::instrument(skip(state))]
pub async fn list_contacts(
    State(state): State<AppState>,
    Query(query): Query<ListContactsQuery>,
) -> Result<Json<Vec<ContactResponse>>, AppError> {
    query.validate()?;
    let store = require_store(&state)?;

    let docs = store
        .find(CONTACT_COLLECTION, doc! {}, query.effective_limit())
        .await?;

    let now = Utc::now();
    let contacts: Vec<ContactResponse> = docs
        .iter()
        .map(|d| ContactResponse::from(StoredContact::from_document(d, now)))
        .collect();

    metrics::counter!("contact_messages_listed_total").increment(contacts.len() as u64);
    Ok(Json(contacts))
}
