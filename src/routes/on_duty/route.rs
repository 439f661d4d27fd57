use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};

use super::dto::{CreateOnDutyRequest, OnDutyQueryParams, OnDutyResolutionResponse, OnDutyResponse};
use crate::error::{AppError, AppResult};
use crate::extractor::{AppJson, AuthClaims};
use crate::middleware::permission::{Action, require};
use crate::routes::{MessageResponse, parse_id};
use crate::services::OnDutyService;
use crate::state::AppState;

const REQUEST_NOT_FOUND: &str = "On-duty request not found";

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route(
            "/api/on-duty-requests",
            get(list_requests).post(create_request),
        )
        .route("/api/on-duty-requests/{request_id}", get(get_request))
        .route("/api/on-duty-requests/{request_id}/approve", put(approve_request))
        .route("/api/on-duty-requests/{request_id}/reject", put(reject_request))
}

/// List the on-duty requests visible to the caller
#[utoipa::path(
    get,
    path = "/api/on-duty-requests",
    params(OnDutyQueryParams),
    responses(
        (status = 200, description = "Own requests for students, own department for faculty, all for admin", body = Vec<OnDutyResponse>),
        (status = 401, description = "Missing or invalid token", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "On-duty requests"
)]
pub async fn list_requests(
    State(state): State<AppState>,
    AuthClaims(caller): AuthClaims,
    query: Result<Query<OnDutyQueryParams>, axum::extract::rejection::QueryRejection>,
) -> AppResult<Json<Vec<OnDutyResponse>>> {
    let Query(params) = query.map_err(|e| AppError::validation(e.body_text()))?;
    let requests = OnDutyService::new(&state.db)
        .list(caller, params.status)
        .await?;
    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/on-duty-requests/{request_id}",
    params(("request_id" = String, Path, description = "On-duty request id")),
    responses(
        (status = 200, description = "On-duty request", body = OnDutyResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 404, description = "Not found or not visible to the caller", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "On-duty requests"
)]
pub async fn get_request(
    State(state): State<AppState>,
    AuthClaims(caller): AuthClaims,
    Path(request_id): Path<String>,
) -> AppResult<Json<OnDutyResponse>> {
    let request_id = parse_id(&request_id, REQUEST_NOT_FOUND)?;
    let request = OnDutyService::new(&state.db).get(caller, request_id).await?;
    Ok(Json(request.into()))
}

#[utoipa::path(
    post,
    path = "/api/on-duty-requests",
    request_body = CreateOnDutyRequest,
    responses(
        (status = 201, description = "Request submitted as pending", body = OnDutyResponse),
        (status = 400, description = "Validation failed", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Caller is not a student", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "On-duty requests"
)]
pub async fn create_request(
    State(state): State<AppState>,
    AuthClaims(caller): AuthClaims,
    AppJson(payload): AppJson<CreateOnDutyRequest>,
) -> AppResult<(StatusCode, Json<OnDutyResponse>)> {
    require(caller.role, Action::CreateOnDutyRequest)?;
    let request = OnDutyService::new(&state.db)
        .create(caller, payload.into_draft()?)
        .await?;
    Ok((StatusCode::CREATED, Json(request.into())))
}

#[utoipa::path(
    put,
    path = "/api/on-duty-requests/{request_id}/approve",
    params(("request_id" = String, Path, description = "On-duty request id")),
    responses(
        (status = 200, description = "Request approved", body = OnDutyResolutionResponse),
        (status = 400, description = "Request already resolved", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Caller may not resolve this request", body = MessageResponse),
        (status = 404, description = "Request not found", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "On-duty requests"
)]
pub async fn approve_request(
    State(state): State<AppState>,
    AuthClaims(caller): AuthClaims,
    Path(request_id): Path<String>,
) -> AppResult<Json<OnDutyResolutionResponse>> {
    let request_id = parse_id(&request_id, REQUEST_NOT_FOUND)?;
    let request = OnDutyService::new(&state.db)
        .approve(caller, request_id)
        .await?;
    Ok(Json(OnDutyResolutionResponse {
        message: "Request approved".to_string(),
        request: request.into(),
    }))
}

#[utoipa::path(
    put,
    path = "/api/on-duty-requests/{request_id}/reject",
    params(("request_id" = String, Path, description = "On-duty request id")),
    responses(
        (status = 200, description = "Request rejected", body = OnDutyResolutionResponse),
        (status = 400, description = "Request already resolved", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Caller may not resolve this request", body = MessageResponse),
        (status = 404, description = "Request not found", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "On-duty requests"
)]
pub async fn reject_request(
    State(state): State<AppState>,
    AuthClaims(caller): AuthClaims,
    Path(request_id): Path<String>,
) -> AppResult<Json<OnDutyResolutionResponse>> {
    let request_id = parse_id(&request_id, REQUEST_NOT_FOUND)?;
    let request = OnDutyService::new(&state.db)
        .reject(caller, request_id)
        .await?;
    Ok(Json(OnDutyResolutionResponse {
        message: "Request rejected".to_string(),
        request: request.into(),
    }))
}
