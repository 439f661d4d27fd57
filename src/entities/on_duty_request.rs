//! `SeaORM` Entity for on_duty_request table

use super::sea_orm_active_enums::{OnDutyReason, OnDutyStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "on_duty_request"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    pub request_id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub registration_number: String,
    pub department: String,
    pub reason: OnDutyReason,
    pub event_name: String,
    pub from_date: Date,
    pub to_date: Date,
    pub from_time: Time,
    pub to_time: Time,
    pub description: String,
    pub attachment_url: Option<String>,
    pub status: OnDutyStatus,
    pub resolved_by: Option<Uuid>,
    pub resolved_by_name: Option<String>,
    pub resolved_at: Option<DateTime>,
    pub submitted_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    RequestId,
    StudentId,
    StudentName,
    RegistrationNumber,
    Department,
    Reason,
    EventName,
    FromDate,
    ToDate,
    FromTime,
    ToTime,
    Description,
    AttachmentUrl,
    Status,
    ResolvedBy,
    ResolvedByName,
    ResolvedAt,
    SubmittedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    RequestId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Student,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::RequestId => ColumnType::Uuid.def(),
            Self::StudentId => ColumnType::Uuid.def(),
            Self::StudentName => ColumnType::String(StringLen::None).def(),
            Self::RegistrationNumber => ColumnType::String(StringLen::N(64u32)).def(),
            Self::Department => ColumnType::String(StringLen::None).def(),
            Self::Reason => OnDutyReason::db_type().get_column_type().to_owned().def(),
            Self::EventName => ColumnType::String(StringLen::None).def(),
            Self::FromDate => ColumnType::Date.def(),
            Self::ToDate => ColumnType::Date.def(),
            Self::FromTime => ColumnType::Time.def(),
            Self::ToTime => ColumnType::Time.def(),
            Self::Description => ColumnType::Text.def(),
            Self::AttachmentUrl => ColumnType::String(StringLen::None).def().null(),
            Self::Status => OnDutyStatus::db_type().get_column_type().to_owned().def(),
            Self::ResolvedBy => ColumnType::Uuid.def().null(),
            Self::ResolvedByName => ColumnType::String(StringLen::None).def().null(),
            Self::ResolvedAt => ColumnType::DateTime.def().null(),
            Self::SubmittedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Student => Entity::belongs_to(super::student::Entity)
                .from(Column::StudentId)
                .to(super::student::Column::StudentId)
                .into(),
        }
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
