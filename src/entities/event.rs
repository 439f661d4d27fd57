//! `SeaORM` Entity for event table

use super::sea_orm_active_enums::EventCategory;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "event"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    pub event_id: Uuid,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub organizer: String,
    pub category: EventCategory,
    pub registration_open: bool,
    pub created_by: Uuid,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    EventId,
    Title,
    Description,
    Date,
    Time,
    Venue,
    Organizer,
    Category,
    RegistrationOpen,
    CreatedBy,
    CreatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    EventId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Faculty,
    EventRegistration,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::EventId => ColumnType::Uuid.def(),
            Self::Title => ColumnType::String(StringLen::None).def(),
            Self::Description => ColumnType::Text.def(),
            Self::Date => ColumnType::String(StringLen::N(64u32)).def(),
            Self::Time => ColumnType::String(StringLen::N(64u32)).def(),
            Self::Venue => ColumnType::String(StringLen::None).def(),
            Self::Organizer => ColumnType::String(StringLen::None).def(),
            Self::Category => EventCategory::db_type().get_column_type().to_owned().def(),
            Self::RegistrationOpen => ColumnType::Boolean.def(),
            Self::CreatedBy => ColumnType::Uuid.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Faculty => Entity::belongs_to(super::faculty::Entity)
                .from(Column::CreatedBy)
                .to(super::faculty::Column::FacultyId)
                .into(),
            Self::EventRegistration => Entity::has_many(super::event_registration::Entity).into(),
        }
    }
}

impl Related<super::faculty::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Faculty.def()
    }
}

impl Related<super::event_registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventRegistration.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
