//! `SeaORM` active enums shared by the entities

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum RoleEnum {
    #[sea_orm(string_value = "student")]
    Student,
    #[sea_orm(string_value = "faculty")]
    Faculty,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl RoleEnum {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleEnum::Student => "student",
            RoleEnum::Faculty => "faculty",
            RoleEnum::Admin => "admin",
        }
    }
}

impl std::fmt::Display for RoleEnum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    #[default]
    #[sea_orm(string_value = "technical")]
    Technical,
    #[sea_orm(string_value = "cultural")]
    Cultural,
    #[sea_orm(string_value = "sports")]
    Sports,
    #[sea_orm(string_value = "workshop")]
    Workshop,
    #[sea_orm(string_value = "seminar")]
    Seminar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum OnDutyStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl OnDutyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnDutyStatus::Pending => "pending",
            OnDutyStatus::Approved => "approved",
            OnDutyStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum OnDutyReason {
    #[sea_orm(string_value = "Event Participation")]
    #[serde(rename = "Event Participation")]
    EventParticipation,
    #[sea_orm(string_value = "Competition")]
    Competition,
    #[sea_orm(string_value = "Workshop")]
    Workshop,
    #[sea_orm(string_value = "Internship")]
    Internship,
    #[sea_orm(string_value = "Project Work")]
    #[serde(rename = "Project Work")]
    ProjectWork,
    #[sea_orm(string_value = "Other")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum CertificateType {
    #[sea_orm(string_value = "participation")]
    Participation,
    #[sea_orm(string_value = "achievement")]
    Achievement,
}

impl CertificateType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "participation" => Some(CertificateType::Participation),
            "achievement" => Some(CertificateType::Achievement),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CertificateType::Participation => "Certificate of Participation",
            CertificateType::Achievement => "Certificate of Achievement",
        }
    }
}
