use actix_web::{web, HttpRequest, HttpResponse};

use crate::core::apply_profile_update;
use crate::error::AppError;
use crate::models::{OrganizersResponse, ParticipantProfileUpdate, ParticipantResponse, Role};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/organizers", web::get().to(list_organizers))
        .route("/participant/profile", web::patch().to(update_profile));
}

/// GET /api/users/organizers
///
/// Enabled organizers, sorted by name.
async fn list_organizers(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    state.authenticate(&req).await?;

    let organizers = state.store.enabled_organizers().await;
    Ok(HttpResponse::Ok().json(OrganizersResponse { organizers }))
}

/// Update interests, followed organizers and contact details
///
/// PATCH /api/users/participant/profile
async fn update_profile(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<ParticipantProfileUpdate>,
) -> Result<HttpResponse, AppError> {
    let principal = state.authenticate(&req).await?;
    principal.require(&[Role::Participant])?;

    let update = body.into_inner();
    let user = state
        .store
        .update_participant(&principal.id, |participant| {
            apply_profile_update(participant, update);
            participant.clone()
        })
        .await
        .ok_or_else(|| AppError::NotFound("Participant not found".to_string()))?;

    tracing::debug!(
        "Participant {} now follows {} organizers with {} interests",
        user.id,
        user.followed_organizers.len(),
        user.interests.len()
    );

    Ok(HttpResponse::Ok().json(ParticipantResponse { user }))
}
