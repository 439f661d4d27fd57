use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::RoleEnum;

/// Students sign in with roll number and birthdate, faculty with faculty id
/// and password.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "STU004")]
    pub username: String,

    #[serde(default)]
    #[schema(example = "2003-05-14")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub role: RoleEnum,
    pub username: String,
    pub name: String,
}
