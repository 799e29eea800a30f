//! HTTP handlers for portfolio-service.

pub mod contact;
pub mod diagnostics;
pub mod health;
pub mod metrics;

pub use contact::{list_contacts, submit_contact};
pub use diagnostics::test_database;
pub use health::{health_check, hello, readiness_check, read_root};
