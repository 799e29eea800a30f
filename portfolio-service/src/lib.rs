pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use utoipa::OpenApi;

pub use startup::{build_router, AppState, Application};

#[derive(OpenApi)]
#[openapi(
    info(title = "Portfolio API"),
    paths(
        handlers::health::read_root,
        handlers::health::hello,
        handlers::diagnostics::test_database,
        handlers::contact::submit_contact,
        handlers::contact::list_contacts,
    ),
    components(schemas(
        dtos::MessageResponse,
        dtos::ErrorResponse,
        dtos::ContactRequest,
        dtos::ContactResponse,
        dtos::DiagnosticsReport,
    )),
    tags(
        (name = "Health", description = "Liveness messages"),
        (name = "Diagnostics", description = "Database visibility for operators"),
        (name = "Contact", description = "Contact form submissions"),
    )
)]
pub struct ApiDoc;
