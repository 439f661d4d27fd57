use axum::{
    extract::{FromRef, FromRequest, FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::AppError;
use crate::state::AppState;

/// Identity decoded from a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub principal_id: Uuid,
    pub role: RoleEnum,
}

/// Rejects the request with 401 before the handler runs when the bearer
/// token is missing or does not verify.
#[derive(Debug, Clone, Copy)]
pub struct AuthClaims(pub Identity);

impl<S> FromRequestParts<S> for AuthClaims
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            <TypedHeader<Authorization<Bearer>> as FromRequestParts<S>>::from_request_parts(
                parts, state,
            )
                .await
                .map_err(|_| AppError::Unauthorized("No token, authorization denied".to_string()))?;

        let app_state = AppState::from_ref(state);
        let claims = app_state.jwt.verify(bearer.token()).map_err(|e| {
            tracing::debug!(error = %e, "rejected bearer token");
            AppError::from(e)
        })?;

        Ok(AuthClaims(Identity {
            principal_id: claims.sub,
            role: claims.role,
        }))
    }
}

/// Lets public routes personalise their response for a signed-in caller.
/// A present but invalid token is still rejected.
impl<S> OptionalFromRequestParts<S> for AuthClaims
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        if !parts.headers.contains_key(http::header::AUTHORIZATION) {
            return Ok(None);
        }
        <AuthClaims as FromRequestParts<S>>::from_request_parts(parts, state)
            .await
            .map(Some)
    }
}

/// JSON body extractor whose rejection uses the `{message}` error shape.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
