//! `SeaORM` Entity for faculty table

use super::sea_orm_active_enums::RoleEnum;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "faculty"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    pub faculty_id: Uuid,
    pub faculty_code: String,
    pub name: String,
    pub department: String,
    pub email: String,
    pub phone: String,
    pub designation: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: RoleEnum,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    FacultyId,
    FacultyCode,
    Name,
    Department,
    Email,
    Phone,
    Designation,
    Password,
    Role,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    FacultyId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Event,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::FacultyId => ColumnType::Uuid.def(),
            Self::FacultyCode => ColumnType::String(StringLen::N(64u32)).def().unique(),
            Self::Name => ColumnType::String(StringLen::None).def(),
            Self::Department => ColumnType::String(StringLen::None).def(),
            Self::Email => ColumnType::String(StringLen::None).def().unique(),
            Self::Phone => ColumnType::String(StringLen::N(32u32)).def(),
            Self::Designation => ColumnType::String(StringLen::None).def(),
            Self::Password => ColumnType::String(StringLen::None).def(),
            Self::Role => RoleEnum::db_type().get_column_type().to_owned().def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Event => Entity::has_many(super::event::Entity).into(),
        }
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
