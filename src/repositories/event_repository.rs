use std::collections::HashMap;

use crate::entities::{event, event_registration, sea_orm_active_enums::EventCategory};
use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::OnConflict,
};
use uuid::Uuid;

pub struct EventRepository<'a> {
    db: &'a DatabaseConnection,
}

pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub organizer: String,
    pub category: EventCategory,
    pub registration_open: bool,
    pub created_by: Uuid,
}

/// Fields to overwrite; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub organizer: Option<String>,
    pub category: Option<EventCategory>,
    pub registration_open: Option<bool>,
}

impl EventUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.venue.is_none()
            && self.organizer.is_none()
            && self.category.is_none()
            && self.registration_open.is_none()
    }
}

impl<'a> EventRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Newest first.
    pub async fn find_all(&self) -> Result<Vec<event::Model>> {
        let events = event::Entity::find()
            .order_by_desc(event::Column::CreatedAt)
            .all(self.db)
            .await?;
        Ok(events)
    }

    pub async fn find_by_id(&self, event_id: Uuid) -> Result<Option<event::Model>> {
        let event = event::Entity::find_by_id(event_id).one(self.db).await?;
        Ok(event)
    }

    pub async fn create(&self, new_event: NewEvent) -> Result<event::Model> {
        let event = event::ActiveModel {
            event_id: Set(Uuid::new_v4()),
            title: Set(new_event.title),
            description: Set(new_event.description),
            date: Set(new_event.date),
            time: Set(new_event.time),
            venue: Set(new_event.venue),
            organizer: Set(new_event.organizer),
            category: Set(new_event.category),
            registration_open: Set(new_event.registration_open),
            created_by: Set(new_event.created_by),
            created_at: Set(Utc::now().naive_utc()),
        };

        let result = event.insert(self.db).await?;
        Ok(result)
    }

    pub async fn update(&self, event: event::Model, updates: EventUpdate) -> Result<event::Model> {
        if updates.is_empty() {
            return Ok(event);
        }

        let mut active_model: event::ActiveModel = event.into();

        if let Some(title) = updates.title {
            active_model.title = Set(title);
        }
        if let Some(description) = updates.description {
            active_model.description = Set(description);
        }
        if let Some(date) = updates.date {
            active_model.date = Set(date);
        }
        if let Some(time) = updates.time {
            active_model.time = Set(time);
        }
        if let Some(venue) = updates.venue {
            active_model.venue = Set(venue);
        }
        if let Some(organizer) = updates.organizer {
            active_model.organizer = Set(organizer);
        }
        if let Some(category) = updates.category {
            active_model.category = Set(category);
        }
        if let Some(registration_open) = updates.registration_open {
            active_model.registration_open = Set(registration_open);
        }

        let result = active_model.update(self.db).await?;
        Ok(result)
    }

    /// Removes the event together with its registrations. Returns false when
    /// the event was already gone.
    pub async fn delete(&self, event_id: Uuid) -> Result<bool> {
        let txn = self.db.begin().await?;

        event_registration::Entity::delete_many()
            .filter(event_registration::Column::EventId.eq(event_id))
            .exec(&txn)
            .await?;

        let result = event::Entity::delete_by_id(event_id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    /// Conditional insert keyed on the (event, student) pair. Returns false
    /// when the pair already existed, so concurrent callers cannot both win.
    pub async fn insert_registration(&self, event_id: Uuid, student_id: Uuid) -> Result<bool> {
        let registration = event_registration::ActiveModel {
            event_id: Set(event_id),
            student_id: Set(student_id),
            registered_at: Set(Utc::now().naive_utc()),
        };

        let inserted = event_registration::Entity::insert(registration)
            .on_conflict(
                OnConflict::columns([
                    event_registration::Column::EventId,
                    event_registration::Column::StudentId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        Ok(inserted > 0)
    }

    /// Returns false when there was nothing to remove.
    pub async fn delete_registration(&self, event_id: Uuid, student_id: Uuid) -> Result<bool> {
        let result = event_registration::Entity::delete_many()
            .filter(event_registration::Column::EventId.eq(event_id))
            .filter(event_registration::Column::StudentId.eq(student_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Registered student ids in registration order.
    pub async fn registered_students(&self, event_id: Uuid) -> Result<Vec<Uuid>> {
        let registrations = event_registration::Entity::find()
            .filter(event_registration::Column::EventId.eq(event_id))
            .order_by_asc(event_registration::Column::RegisteredAt)
            .all(self.db)
            .await?;

        Ok(registrations.into_iter().map(|r| r.student_id).collect())
    }

    /// Registered student ids per event, each list in registration order.
    pub async fn registered_students_by_event(
        &self,
        event_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Uuid>>> {
        let mut by_event: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        if event_ids.is_empty() {
            return Ok(by_event);
        }

        let registrations = event_registration::Entity::find()
            .filter(event_registration::Column::EventId.is_in(event_ids.iter().copied()))
            .order_by_asc(event_registration::Column::RegisteredAt)
            .all(self.db)
            .await?;

        for registration in registrations {
            by_event
                .entry(registration.event_id)
                .or_default()
                .push(registration.student_id);
        }
        Ok(by_event)
    }
}
