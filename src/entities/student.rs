//! `SeaORM` Entity for student table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "student"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    pub student_id: Uuid,
    pub regno: i64,
    pub rno: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub bdate: String,
    pub phone: String,
    pub email: String,
    pub nationality: String,
    pub department: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    StudentId,
    Regno,
    Rno,
    Name,
    Bdate,
    Phone,
    Email,
    Nationality,
    Department,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    StudentId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    EventRegistration,
    OnDutyRequest,
    Certificate,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::StudentId => ColumnType::Uuid.def(),
            Self::Regno => ColumnType::BigInteger.def().unique(),
            Self::Rno => ColumnType::String(StringLen::N(64u32)).def().unique(),
            Self::Name => ColumnType::String(StringLen::None).def(),
            Self::Bdate => ColumnType::String(StringLen::N(32u32)).def(),
            Self::Phone => ColumnType::String(StringLen::N(32u32)).def(),
            Self::Email => ColumnType::String(StringLen::None).def(),
            Self::Nationality => ColumnType::String(StringLen::None).def(),
            Self::Department => ColumnType::String(StringLen::None).def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::EventRegistration => Entity::has_many(super::event_registration::Entity).into(),
            Self::OnDutyRequest => Entity::has_many(super::on_duty_request::Entity).into(),
            Self::Certificate => Entity::has_many(super::certificate::Entity).into(),
        }
    }
}

impl Related<super::event_registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventRegistration.def()
    }
}

impl Related<super::on_duty_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OnDutyRequest.def()
    }
}

impl Related<super::certificate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Certificate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
