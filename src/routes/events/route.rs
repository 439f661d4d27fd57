use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use super::dto::{CreateEventRequest, EventDetailResponse, EventResponse, UpdateEventRequest};
use crate::error::AppResult;
use crate::extractor::{AppJson, AuthClaims};
use crate::middleware::permission::{Action, require};
use crate::routes::{MessageResponse, parse_id};
use crate::services::EventService;
use crate::state::AppState;

const EVENT_NOT_FOUND: &str = "Event not found";

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route(
            "/api/events/{event_id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/api/events/{event_id}/register", post(register_for_event))
        .route("/api/events/{event_id}/cancel", post(cancel_registration))
}

/// List events, newest first
#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "Events", body = Vec<EventResponse>),
        (status = 401, description = "Invalid token", body = MessageResponse)
    ),
    security((), ("bearer_auth" = [])),
    tag = "Events"
)]
pub async fn list_events(
    State(state): State<AppState>,
    claims: Option<AuthClaims>,
) -> AppResult<Json<Vec<EventResponse>>> {
    let caller = claims.map(|AuthClaims(identity)| identity);
    let events = EventService::new(&state.db).list(caller).await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}",
    params(("event_id" = String, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event with creator and registered students", body = EventDetailResponse),
        (status = 404, description = "Event not found", body = MessageResponse)
    ),
    tag = "Events"
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> AppResult<Json<EventDetailResponse>> {
    let event_id = parse_id(&event_id, EVENT_NOT_FOUND)?;
    let detail = EventService::new(&state.db).get(event_id).await?;
    Ok(Json(detail.into()))
}

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = EventDetailResponse),
        (status = 400, description = "Missing required fields", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Caller is not faculty or admin", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    AuthClaims(caller): AuthClaims,
    AppJson(payload): AppJson<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<EventDetailResponse>)> {
    // Role before body validation, so a student gets 403 rather than 400.
    require(caller.role, Action::CreateEvent)?;
    let detail = EventService::new(&state.db)
        .create(caller, payload.into_draft()?)
        .await?;
    Ok((StatusCode::CREATED, Json(detail.into())))
}

#[utoipa::path(
    put,
    path = "/api/events/{event_id}",
    params(("event_id" = String, Path, description = "Event id")),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated", body = EventDetailResponse),
        (status = 400, description = "Unknown event type", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Caller is neither the creator nor an admin", body = MessageResponse),
        (status = 404, description = "Event not found", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
pub async fn update_event(
    State(state): State<AppState>,
    AuthClaims(caller): AuthClaims,
    Path(event_id): Path<String>,
    AppJson(payload): AppJson<UpdateEventRequest>,
) -> AppResult<Json<EventDetailResponse>> {
    let event_id = parse_id(&event_id, EVENT_NOT_FOUND)?;
    require(caller.role, Action::UpdateEvent)?;
    let detail = EventService::new(&state.db)
        .update(caller, event_id, payload.into_update()?)
        .await?;
    Ok(Json(detail.into()))
}

#[utoipa::path(
    delete,
    path = "/api/events/{event_id}",
    params(("event_id" = String, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event removed", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Caller is neither the creator nor an admin", body = MessageResponse),
        (status = 404, description = "Event not found", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
pub async fn delete_event(
    State(state): State<AppState>,
    AuthClaims(caller): AuthClaims,
    Path(event_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let event_id = parse_id(&event_id, EVENT_NOT_FOUND)?;
    EventService::new(&state.db).delete(caller, event_id).await?;
    Ok(Json(MessageResponse::new("Event removed")))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/register",
    params(("event_id" = String, Path, description = "Event id")),
    responses(
        (status = 200, description = "Registered", body = MessageResponse),
        (status = 400, description = "Registration closed or already registered", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Caller is not a student", body = MessageResponse),
        (status = 404, description = "Event not found", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
pub async fn register_for_event(
    State(state): State<AppState>,
    AuthClaims(caller): AuthClaims,
    Path(event_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let event_id = parse_id(&event_id, EVENT_NOT_FOUND)?;
    EventService::new(&state.db).register(caller, event_id).await?;
    Ok(Json(MessageResponse::new("Successfully registered for the event")))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/cancel",
    params(("event_id" = String, Path, description = "Event id")),
    responses(
        (status = 200, description = "Registration cancelled", body = MessageResponse),
        (status = 400, description = "Not registered", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Caller is not a student", body = MessageResponse),
        (status = 404, description = "Event not found", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
pub async fn cancel_registration(
    State(state): State<AppState>,
    AuthClaims(caller): AuthClaims,
    Path(event_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let event_id = parse_id(&event_id, EVENT_NOT_FOUND)?;
    EventService::new(&state.db).cancel(caller, event_id).await?;
    Ok(Json(MessageResponse::new("Registration cancelled successfully")))
}
