// Route exports
pub mod accounts;
pub mod admin;
pub mod events;
pub mod users;

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;

use crate::auth::{Principal, TokenVerifier};
use crate::core::{EmailPolicy, Ranker};
use crate::error::AppError;
use crate::models::HealthResponse;
use crate::services::CatalogStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CatalogStore>,
    pub ranker: Ranker,
    pub verifier: Arc<TokenVerifier>,
    pub email_policy: Arc<EmailPolicy>,
}

impl AppState {
    /// Verify the bearer token and resolve its subject against the store
    ///
    /// Unknown accounts and disabled organizers are rejected even when the
    /// token itself is valid.
    pub async fn authenticate(&self, req: &HttpRequest) -> Result<Principal, AppError> {
        let principal = self.verifier.authenticate(req)?;

        if !self.store.is_active_account(&principal.id, principal.role).await {
            tracing::info!("Rejected token for inactive {} {}", principal.role.as_str(), principal.id);
            return Err(AppError::Unauthorized("Invalid user".to_string()));
        }

        Ok(principal)
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health_check))
            .service(web::scope("/events").configure(events::configure))
            .service(web::scope("/users").configure(users::configure))
            .service(web::scope("/auth").configure(accounts::configure))
            .service(web::scope("/admin").configure(admin::configure)),
    );
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
