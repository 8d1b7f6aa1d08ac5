use actix_web::{web, HttpRequest, HttpResponse};

use crate::core::prepare_signup;
use crate::error::AppError;
use crate::models::{AccountView, ParticipantResponse, ParticipantSignupRequest, Role};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/participant-signup", web::post().to(participant_signup))
        .route("/me", web::get().to(me));
}

/// Participant self-signup
///
/// POST /api/auth/participant-signup
///
/// Institute participants must use an allowed email domain. Credentials are
/// issued by the account service, not here.
async fn participant_signup(
    state: web::Data<AppState>,
    body: web::Json<ParticipantSignupRequest>,
) -> Result<HttpResponse, AppError> {
    let participant = prepare_signup(body.into_inner(), &state.email_policy)?;
    state.store.insert_participant(participant.clone()).await?;

    tracing::info!(
        "Participant {} signed up ({:?})",
        participant.id,
        participant.participant_type
    );

    Ok(HttpResponse::Created().json(ParticipantResponse { user: participant }))
}

/// GET /api/auth/me
async fn me(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, AppError> {
    let principal = state.authenticate(&req).await?;

    let view = match principal.role {
        Role::Participant => {
            let user = state
                .store
                .participant(&principal.id)
                .await
                .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;
            AccountView::Participant { user }
        }
        Role::Organizer => {
            let user = state
                .store
                .organizer(&principal.id)
                .await
                .filter(|o| !o.disabled)
                .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;
            AccountView::Organizer { user }
        }
        Role::Admin => AccountView::Admin { id: principal.id },
    };

    tracing::debug!("Resolved {} account {}", view.role().as_str(), principal.id);

    Ok(HttpResponse::Ok().json(view))
}
