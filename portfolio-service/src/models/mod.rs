pub mod contact_message;

pub use contact_message::{id_to_string, ContactMessage, StoredContact, CONTACT_COLLECTION};
