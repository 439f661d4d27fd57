use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::RoleEnum;

/// Claims carried by a session token. No secret material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Uuid,
    pub role: RoleEnum,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    SignatureInvalid,
}

#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in: i64,
}

impl std::fmt::Debug for JwtManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtManager")
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

impl JwtManager {
    pub fn new(secret: &str, expires_in: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in,
        }
    }

    pub fn issue(&self, principal_id: Uuid, role: RoleEnum) -> anyhow::Result<String> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: principal_id,
            role,
            iat: now,
            exp: now + self.expires_in,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                _ => TokenError::Malformed,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify() {
        let manager = JwtManager::new("test-secret", 3600);
        let principal_id = Uuid::new_v4();

        let token = manager.issue(principal_id, RoleEnum::Faculty).unwrap();
        let claims = manager.verify(&token).unwrap();

        assert_eq!(claims.sub, principal_id);
        assert_eq!(claims.role, RoleEnum::Faculty);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token() {
        let manager = JwtManager::new("test-secret", -120);
        let token = manager.issue(Uuid::new_v4(), RoleEnum::Student).unwrap();

        assert_eq!(manager.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_token_signed_with_other_secret() {
        let issuer = JwtManager::new("secret-a", 3600);
        let verifier = JwtManager::new("secret-b", 3600);
        let token = issuer.issue(Uuid::new_v4(), RoleEnum::Admin).unwrap();

        assert_eq!(verifier.verify(&token), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_garbage_token() {
        let manager = JwtManager::new("test-secret", 3600);

        assert_eq!(manager.verify("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(manager.verify(""), Err(TokenError::Malformed));
    }
}
