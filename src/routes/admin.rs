use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::Principal;
use crate::core::provision_organizer;
use crate::error::AppError;
use crate::models::{
    CreateOrganizerRequest, MessageResponse, OrganizerAction, OrganizerActionRequest,
    OrganizerResponse, OrganizersResponse, Role,
};
use crate::routes::AppState;

/// Configure admin routes; every route requires the admin role
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/organizers", web::post().to(create_organizer))
        .route("/organizers", web::get().to(list_organizers))
        .route("/organizers/{organizer_id}/disable", web::patch().to(disable_organizer));
}

async fn require_admin(state: &AppState, req: &HttpRequest) -> Result<Principal, AppError> {
    let principal = state.authenticate(req).await?;
    principal.require(&[Role::Admin])?;
    Ok(principal)
}

/// Provision an organizer account
///
/// POST /api/admin/organizers
///
/// Request body:
/// ```json
/// { "organizerName": "Tech Society", "category": "Technical" }
/// ```
async fn create_organizer(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreateOrganizerRequest>,
) -> Result<HttpResponse, AppError> {
    let admin = require_admin(&state, &req).await?;
    body.validate()?;

    let organizer = provision_organizer(body.into_inner(), Utc::now());
    state.store.insert_organizer(organizer.clone()).await;

    tracing::info!(
        "Admin {} provisioned organizer {} ({:?})",
        admin.id,
        organizer.id,
        organizer.login_email
    );

    Ok(HttpResponse::Created().json(OrganizerResponse { organizer }))
}

/// GET /api/admin/organizers
///
/// All organizers, disabled and archived ones included.
async fn list_organizers(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    require_admin(&state, &req).await?;

    let organizers = state.store.all_organizers().await;
    Ok(HttpResponse::Ok().json(OrganizersResponse { organizers }))
}

/// Disable, archive or delete an organizer
///
/// PATCH /api/admin/organizers/{organizer_id}/disable
///
/// Body `{ "action": "archive" | "delete" }`; anything else disables.
async fn disable_organizer(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: Option<web::Json<OrganizerActionRequest>>,
) -> Result<HttpResponse, AppError> {
    let admin = require_admin(&state, &req).await?;

    let organizer_id = path.into_inner();
    let action = body.map(|b| b.into_inner().action).unwrap_or_default();

    let found = match action {
        OrganizerAction::Disable => state
            .store
            .update_organizer(&organizer_id, |o| o.disabled = true)
            .await
            .is_some(),
        OrganizerAction::Archive => state
            .store
            .update_organizer(&organizer_id, |o| {
                o.archived = true;
                o.disabled = true;
            })
            .await
            .is_some(),
        OrganizerAction::Delete => state.store.remove_organizer(&organizer_id).await.is_some(),
    };

    if !found {
        return Err(AppError::NotFound("Organizer not found".to_string()));
    }

    tracing::info!("Admin {} applied {:?} to organizer {}", admin.id, action, organizer_id);

    let message = match action {
        OrganizerAction::Disable => "Organizer disabled",
        OrganizerAction::Archive => "Organizer archived",
        OrganizerAction::Delete => "Organizer permanently deleted",
    };
    Ok(HttpResponse::Ok().json(MessageResponse { message: message.to_string() }))
}
