use actix_web::{http::header, web, HttpRequest, HttpResponse};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::core::{
    apply_update, calendar_export, check_edit, decide_merch_order, place_merch_order,
    register_for_event, CatalogFilter, RankingQuery,
};
use crate::error::AppError;
use crate::models::{
    BrowseQuery, BrowseResponse, CatalogEventResponse, CreateEventRequest, Event, EventResponse,
    EventStatus, EventUpdate, EventsResponse, MerchDecisionRequest, OrdersResponse, PurchaseRequest,
    RegisterRequest, RegistrationResponse, RegistrationsResponse, Role,
};
use crate::routes::AppState;

/// Configure all event routes
///
/// Literal paths are registered before `/{event_id}` so they win the match.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/browse", web::get().to(browse_events))
        .route("/participant/my-registrations", web::get().to(my_registrations))
        .route("/organizer", web::post().to(create_event))
        .route("/organizer/mine/list", web::get().to(organizer_events))
        .route("/organizer/merch-orders/list", web::get().to(merch_orders))
        .route(
            "/organizer/merch-orders/{registration_id}/decision",
            web::patch().to(decide_order),
        )
        .route("/organizer/{event_id}", web::patch().to(update_event))
        .route("/{event_id}/calendar.ics", web::get().to(calendar_ics))
        .route("/{event_id}/register", web::post().to(register_event))
        .route("/{event_id}/purchase", web::post().to(purchase_merch))
        .route("/{event_id}", web::get().to(get_event));
}

/// Browse events
///
/// GET /api/events/browse?search=&eventType=&eligibility=&fromDate=&toDate=&followedOnly=&participantId=
///
/// Returns `{ events, trending }`. A supplied participant id that is malformed
/// is ignored; one that matches no participant ranks with an empty profile.
async fn browse_events(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<BrowseQuery>,
) -> Result<HttpResponse, AppError> {
    state.authenticate(&req).await?;

    let filter = CatalogFilter::from_query(&query);
    let catalog = state.store.catalog(&filter).await;

    let participant_id = query
        .participant_id
        .as_deref()
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| Uuid::parse_str(raw).ok());

    let profile = match participant_id {
        Some(id) => Some(
            state
                .store
                .participant(&id)
                .await
                .map(|p| p.profile())
                .unwrap_or_default(),
        ),
        None => None,
    };

    let ranking_query = RankingQuery {
        term: query.search.as_deref(),
        participant: profile.as_ref(),
        followed_only: query.followed_only.as_deref() == Some("true"),
    };

    let view = state.ranker.rank(&catalog, &ranking_query);

    tracing::info!(
        "Browse returned {} events from a catalog of {}",
        view.events.len(),
        catalog.len()
    );

    Ok(HttpResponse::Ok().json(BrowseResponse {
        events: view.events,
        trending: view.trending,
    }))
}

/// GET /api/events/{event_id}
async fn get_event(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state.authenticate(&req).await?;

    let event = state
        .store
        .catalog_event(&path.into_inner())
        .await
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    Ok(HttpResponse::Ok().json(CatalogEventResponse { event }))
}

/// Calendar file for an event
///
/// GET /api/events/{event_id}/calendar.ics
///
/// Public. Google and Outlook deep links travel in response headers.
async fn calendar_ics(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let event = state
        .store
        .event(&path.into_inner())
        .await
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    let export = calendar_export(&event, Utc::now());

    Ok(HttpResponse::Ok()
        .content_type("text/calendar")
        .insert_header(("X-Google-Calendar-Link", export.google_link))
        .insert_header(("X-Outlook-Calendar-Link", export.outlook_link))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.filename),
        ))
        .body(export.ics))
}

/// Register for a normal event
///
/// POST /api/events/{event_id}/register
///
/// Request body:
/// ```json
/// { "answers": { "teamName": "..." } }
/// ```
async fn register_event(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: Option<web::Json<RegisterRequest>>,
) -> Result<HttpResponse, AppError> {
    let principal = state.authenticate(&req).await?;
    principal.require(&[Role::Participant])?;

    let event_id = path.into_inner();
    let answers = body
        .and_then(|b| b.into_inner().answers)
        .unwrap_or_else(|| serde_json::json!({}));
    let now = Utc::now();

    let registration = state
        .store
        .register(&event_id, |event, existing| {
            register_for_event(event, principal.id, existing, answers, now)
        })
        .await
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))??;

    tracing::info!(
        "Participant {} registered for event {} (ticket {:?})",
        principal.id,
        event_id,
        registration.ticket_id
    );

    Ok(HttpResponse::Created().json(RegistrationResponse { registration }))
}

/// GET /api/events/participant/my-registrations
async fn my_registrations(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let principal = state.authenticate(&req).await?;
    principal.require(&[Role::Participant])?;

    let registrations = state.store.registrations_for_participant(&principal.id).await;
    Ok(HttpResponse::Ok().json(RegistrationsResponse { registrations }))
}

/// Create an event as a draft
///
/// POST /api/events/organizer
async fn create_event(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreateEventRequest>,
) -> Result<HttpResponse, AppError> {
    let principal = state.authenticate(&req).await?;
    principal.require(&[Role::Organizer])?;
    body.validate()?;

    let request = body.into_inner();
    let event = Event {
        id: Uuid::new_v4(),
        name: request.name.trim().to_string(),
        description: request.description.trim().to_string(),
        event_type: request.event_type,
        eligibility: request.eligibility.unwrap_or_else(|| "ALL".to_string()),
        registration_deadline: request.registration_deadline,
        event_start_date: request.event_start_date,
        event_end_date: request.event_end_date,
        registration_limit: request.registration_limit,
        registration_fee: request.registration_fee,
        organizer_id: principal.id,
        tags: request.tags.iter().map(|t| t.trim().to_string()).collect(),
        status: EventStatus::Draft,
        custom_form: request.custom_form,
        form_locked: false,
        merch_item_name: request.merch_item_name,
        merch_variants: request.merch_variants,
        purchase_limit_per_participant: request.purchase_limit_per_participant.unwrap_or(1),
        merch_stock: request.merch_stock,
        registrations_last_24h: 0,
        created_at: Utc::now(),
    };

    state.store.insert_event(event.clone()).await;
    tracing::info!("Organizer {} created draft event {}", principal.id, event.id);

    Ok(HttpResponse::Created().json(EventResponse { event }))
}

/// Edit an event within the limits of its lifecycle status
///
/// PATCH /api/events/organizer/{event_id}
async fn update_event(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<serde_json::Map<String, serde_json::Value>>,
) -> Result<HttpResponse, AppError> {
    let principal = state.authenticate(&req).await?;
    principal.require(&[Role::Organizer])?;

    let raw = body.into_inner();
    let keys: Vec<String> = raw.keys().cloned().collect();

    // the guard sees the raw keys before the body is typed
    let event = state
        .store
        .update_event(&path.into_inner(), |event| {
            check_edit(event, &principal.id, keys.iter().map(String::as_str))?;
            let update: EventUpdate = serde_json::from_value(serde_json::Value::Object(raw))
                .map_err(|e| AppError::BadRequest(format!("Invalid update: {}", e)))?;
            apply_update(event, update);
            Ok::<Event, AppError>(event.clone())
        })
        .await
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))??;

    tracing::info!("Event {} updated (status {:?})", event.id, event.status);

    Ok(HttpResponse::Ok().json(EventResponse { event }))
}

/// GET /api/events/organizer/mine/list
async fn organizer_events(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let principal = state.authenticate(&req).await?;
    principal.require(&[Role::Organizer])?;

    let events = state.store.events_by_organizer(&principal.id).await;
    Ok(HttpResponse::Ok().json(EventsResponse { events }))
}

/// Order merchandise, pending organizer approval
///
/// POST /api/events/{event_id}/purchase
///
/// Request body:
/// ```json
/// { "size": "M", "color": "Black", "quantity": 1, "proofImageUrl": "/uploads/proof.png" }
/// ```
async fn purchase_merch(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<PurchaseRequest>,
) -> Result<HttpResponse, AppError> {
    let principal = state.authenticate(&req).await?;
    principal.require(&[Role::Participant])?;
    body.validate()?;

    let event_id = path.into_inner();
    let request = body.into_inner();
    let now = Utc::now();

    let registration = state
        .store
        .register(&event_id, |event, existing| {
            place_merch_order(event, principal.id, existing, request, now)
        })
        .await
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))??;

    tracing::info!("Participant {} ordered merchandise from event {}", principal.id, event_id);

    Ok(HttpResponse::Created().json(RegistrationResponse { registration }))
}

/// GET /api/events/organizer/merch-orders/list
async fn merch_orders(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let principal = state.authenticate(&req).await?;
    principal.require(&[Role::Organizer])?;

    let orders = state.store.merch_orders_for_organizer(&principal.id).await;
    Ok(HttpResponse::Ok().json(OrdersResponse { orders }))
}

/// Approve or reject a pending merchandise order
///
/// PATCH /api/events/organizer/merch-orders/{registration_id}/decision
///
/// Request body:
/// ```json
/// { "decision": "APPROVE", "comment": "Payment verified" }
/// ```
async fn decide_order(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<MerchDecisionRequest>,
) -> Result<HttpResponse, AppError> {
    let principal = state.authenticate(&req).await?;
    principal.require(&[Role::Organizer])?;

    let decision = body.into_inner();
    let registration = state
        .store
        .decide_order(&path.into_inner(), |event, order| {
            decide_merch_order(event, order, &principal.id, decision.decision)?;
            Ok::<_, AppError>(order.clone())
        })
        .await
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))??;

    tracing::info!(
        "Organizer {} decided order {} as {:?} ({})",
        principal.id,
        registration.id,
        registration.status,
        decision.comment.as_deref().unwrap_or("no comment")
    );

    Ok(HttpResponse::Ok().json(RegistrationResponse { registration }))
}
