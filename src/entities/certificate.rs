//! `SeaORM` Entity for certificate table

use super::sea_orm_active_enums::CertificateType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "certificate"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub certificate_id: Uuid,
    pub student_id: Uuid,
    pub title: String,
    pub event_name: String,
    pub issue_date: Date,
    pub certificate_type: CertificateType,
    pub student_name: String,
    pub email: String,
    pub department: String,
    pub registration_number: String,
    #[serde(skip_serializing)]
    pub artifact_path: String,
    pub issued_by: Uuid,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    CertificateId,
    StudentId,
    Title,
    EventName,
    IssueDate,
    CertificateType,
    StudentName,
    Email,
    Department,
    RegistrationNumber,
    ArtifactPath,
    IssuedBy,
    CreatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    CertificateId,
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
            Self::CertificateId => ColumnType::Uuid.def(),
            Self::StudentId => ColumnType::Uuid.def(),
            Self::Title => ColumnType::String(StringLen::None).def(),
            Self::EventName => ColumnType::String(StringLen::None).def(),
            Self::IssueDate => ColumnType::Date.def(),
            Self::CertificateType => CertificateType::db_type().get_column_type().to_owned().def(),
            Self::StudentName => ColumnType::String(StringLen::None).def(),
            Self::Email => ColumnType::String(StringLen::None).def(),
            Self::Department => ColumnType::String(StringLen::None).def(),
            Self::RegistrationNumber => ColumnType::String(StringLen::N(64u32)).def(),
            Self::ArtifactPath => ColumnType::String(StringLen::None).def(),
            Self::IssuedBy => ColumnType::Uuid.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
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
