use axum::{Json, Router, extract::State, routing::post};

use super::dto::{LoginRequest, LoginResponse};
use crate::error::AppResult;
use crate::extractor::AppJson;
use crate::routes::MessageResponse;
use crate::services::{CredentialService, PrincipalKind};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login/student", post(login_student))
        .route("/api/auth/login/faculty", post(login_faculty))
}

async fn login(state: &AppState, payload: LoginRequest, kind: PrincipalKind) -> AppResult<LoginResponse> {
    let principal = CredentialService::new(&state.db, &state.password_policy)
        .verify(&payload.username, &payload.password, kind)
        .await?;

    let token = state.jwt.issue(principal.principal_id, principal.role)?;

    Ok(LoginResponse {
        token,
        role: principal.role,
        username: principal.username,
        name: principal.name,
    })
}

/// Student login with roll number and birthdate
#[utoipa::path(
    post,
    path = "/api/auth/login/student",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing fields or invalid credentials", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "Authentication"
)]
pub async fn login_student(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    Ok(Json(login(&state, payload, PrincipalKind::Student).await?))
}

/// Faculty or admin login with faculty id and password
#[utoipa::path(
    post,
    path = "/api/auth/login/faculty",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing fields or invalid credentials", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "Authentication"
)]
pub async fn login_faculty(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    Ok(Json(login(&state, payload, PrincipalKind::Faculty).await?))
}
