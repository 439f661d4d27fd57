use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State, multipart::MultipartRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};

use super::dto::{CertificateResponse, IssueCertificatesForm, IssueCertificatesResponse};
use crate::config::MAX_UPLOAD_BYTES;
use crate::error::{AppError, AppResult};
use crate::extractor::AuthClaims;
use crate::middleware::permission::{Action, require};
use crate::routes::{MessageResponse, parse_id};
use crate::services::CertificateService;
use crate::state::AppState;
use crate::utils::upload::{ArtifactStore, read_certificate_upload};

const CERTIFICATE_NOT_FOUND: &str = "Certificate not found";

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route(
            "/api/certificates",
            get(list_certificates)
                .post(issue_certificates)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/api/certificates/{certificate_id}/artifact",
            get(download_artifact),
        )
}

fn service(state: &AppState) -> CertificateService<'_> {
    CertificateService::new(&state.db, ArtifactStore::new(&state.upload_dir))
}

/// Students receive their own certificates, staff receive all
#[utoipa::path(
    get,
    path = "/api/certificates",
    responses(
        (status = 200, description = "Certificates visible to the caller", body = Vec<CertificateResponse>),
        (status = 401, description = "Missing or invalid token", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Certificates"
)]
pub async fn list_certificates(
    State(state): State<AppState>,
    AuthClaims(caller): AuthClaims,
) -> AppResult<Json<Vec<CertificateResponse>>> {
    let certificates = service(&state).list(caller).await?;
    Ok(Json(certificates.into_iter().map(Into::into).collect()))
}

/// Bulk-issue certificates from a roster and one artifact per row
#[utoipa::path(
    post,
    path = "/api/certificates",
    request_body(content = IssueCertificatesForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "All roster rows issued", body = IssueCertificatesResponse),
        (status = 400, description = "Roster or artifacts inconsistent; nothing issued", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Caller is not faculty or admin", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Certificates"
)]
pub async fn issue_certificates(
    State(state): State<AppState>,
    AuthClaims(caller): AuthClaims,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<IssueCertificatesResponse>)> {
    require(caller.role, Action::IssueCertificates)?;

    let multipart = multipart.map_err(|e| AppError::validation(e.body_text()))?;
    let upload = read_certificate_upload(multipart).await?;

    let issued = service(&state).issue(caller, upload).await?;
    let count = issued.len();

    Ok((
        StatusCode::CREATED,
        Json(IssueCertificatesResponse {
            message: format!("{} certificate(s) issued", count),
            issued: count,
            certificates: issued.into_iter().map(Into::into).collect(),
        }),
    ))
}

fn content_type_for(path: &str) -> &'static str {
    let ext = std::path::Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[utoipa::path(
    get,
    path = "/api/certificates/{certificate_id}/artifact",
    params(("certificate_id" = String, Path, description = "Certificate id")),
    responses(
        (status = 200, description = "Stored certificate file", content_type = "application/octet-stream"),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 404, description = "Not found or not visible to the caller", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Certificates"
)]
pub async fn download_artifact(
    State(state): State<AppState>,
    AuthClaims(caller): AuthClaims,
    Path(certificate_id): Path<String>,
) -> AppResult<Response> {
    let certificate_id = parse_id(&certificate_id, CERTIFICATE_NOT_FOUND)?;
    let (certificate, bytes) = service(&state).artifact(caller, certificate_id).await?;

    let file_name = std::path::Path::new(&certificate.artifact_path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("certificate");

    Ok((
        [
            (header::CONTENT_TYPE, content_type_for(&certificate.artifact_path).to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    )
        .into_response())
}
