use std::collections::HashMap;

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::entities::{event, sea_orm_active_enums::{EventCategory, RoleEnum}};
use crate::error::{AppError, AppResult, TransitionError};
use crate::extractor::Identity;
use crate::middleware::permission::{Action, require};
use crate::repositories::{EventRepository, EventUpdate, FacultyRepository, NewEvent, StudentRepository};

const EVENT_NOT_FOUND: &str = "Event not found";

/// Validated input for a new event; the creator comes from the caller.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub organizer: String,
    pub category: EventCategory,
    pub registration_open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalRef {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredStudent {
    pub id: Uuid,
    pub name: String,
    pub rno: String,
}

/// List entry. `is_registered` is only set for a student caller.
#[derive(Debug, Clone)]
pub struct EventSummary {
    pub event: event::Model,
    pub creator: Option<PrincipalRef>,
    pub registered_students: Vec<Uuid>,
    pub is_registered: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct EventDetail {
    pub event: event::Model,
    pub creator: Option<PrincipalRef>,
    pub registered_students: Vec<RegisteredStudent>,
}

pub struct EventService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    fn events(&self) -> EventRepository<'a> {
        EventRepository::new(self.db)
    }

    async fn creator_names(&self, creator_ids: &[Uuid]) -> AppResult<HashMap<Uuid, String>> {
        let creators = FacultyRepository::new(self.db).find_by_ids(creator_ids).await?;
        Ok(creators
            .into_iter()
            .map(|f| (f.faculty_id, f.name))
            .collect())
    }

    async fn find_event(&self, event_id: Uuid) -> AppResult<event::Model> {
        self.events()
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::not_found(EVENT_NOT_FOUND))
    }

    pub async fn list(&self, caller: Option<Identity>) -> AppResult<Vec<EventSummary>> {
        let repo = self.events();
        let events = repo.find_all().await?;

        let event_ids: Vec<Uuid> = events.iter().map(|e| e.event_id).collect();
        let mut creator_ids: Vec<Uuid> = events.iter().map(|e| e.created_by).collect();
        creator_ids.sort_unstable();
        creator_ids.dedup();

        let creators = self.creator_names(&creator_ids).await?;
        let mut registrations = repo.registered_students_by_event(&event_ids).await?;

        let student_id = caller
            .filter(|identity| identity.role == RoleEnum::Student)
            .map(|identity| identity.principal_id);

        Ok(events
            .into_iter()
            .map(|event| {
                let registered_students = registrations.remove(&event.event_id).unwrap_or_default();
                let is_registered = student_id.map(|id| registered_students.contains(&id));
                let creator = creators.get(&event.created_by).map(|name| PrincipalRef {
                    id: event.created_by,
                    name: name.clone(),
                });
                EventSummary {
                    event,
                    creator,
                    registered_students,
                    is_registered,
                }
            })
            .collect())
    }

    pub async fn get(&self, event_id: Uuid) -> AppResult<EventDetail> {
        let event = self.find_event(event_id).await?;
        self.detail(event).await
    }

    async fn detail(&self, event: event::Model) -> AppResult<EventDetail> {
        let creator = self
            .creator_names(&[event.created_by])
            .await?
            .remove(&event.created_by)
            .map(|name| PrincipalRef {
                id: event.created_by,
                name,
            });

        let student_ids = self.events().registered_students(event.event_id).await?;
        let mut students: HashMap<Uuid, _> = StudentRepository::new(self.db)
            .find_by_ids(&student_ids)
            .await?
            .into_iter()
            .map(|s| (s.student_id, s))
            .collect();

        let registered_students = student_ids
            .iter()
            .filter_map(|id| students.remove(id))
            .map(|s| RegisteredStudent {
                id: s.student_id,
                name: s.name,
                rno: s.rno,
            })
            .collect();

        Ok(EventDetail {
            event,
            creator,
            registered_students,
        })
    }

    pub async fn create(&self, caller: Identity, draft: EventDraft) -> AppResult<EventDetail> {
        require(caller.role, Action::CreateEvent)?;

        // The creator must be a live faculty/admin record, not just a token.
        FacultyRepository::new(self.db)
            .find_by_id(caller.principal_id)
            .await?
            .ok_or_else(|| AppError::forbidden("Not authorized to create events"))?;

        let event = self
            .events()
            .create(NewEvent {
                title: draft.title,
                description: draft.description,
                date: draft.date,
                time: draft.time,
                venue: draft.venue,
                organizer: draft.organizer,
                category: draft.category,
                registration_open: draft.registration_open,
                created_by: caller.principal_id,
            })
            .await?;

        tracing::info!(event_id = %event.event_id, created_by = %caller.principal_id, "event created");
        self.detail(event).await
    }

    fn ensure_owner(caller: &Identity, event: &event::Model, verb: &str) -> AppResult<()> {
        if caller.role == RoleEnum::Admin || event.created_by == caller.principal_id {
            return Ok(());
        }
        tracing::warn!(event_id = %event.event_id, caller = %caller.principal_id, "ownership check denied");
        Err(AppError::forbidden(format!("Not authorized to {verb} this event")))
    }

    pub async fn update(
        &self,
        caller: Identity,
        event_id: Uuid,
        updates: EventUpdate,
    ) -> AppResult<EventDetail> {
        require(caller.role, Action::UpdateEvent)?;
        let event = self.find_event(event_id).await?;
        Self::ensure_owner(&caller, &event, "update")?;

        let updated = self.events().update(event, updates).await?;
        tracing::info!(event_id = %event_id, "event updated");
        self.detail(updated).await
    }

    pub async fn delete(&self, caller: Identity, event_id: Uuid) -> AppResult<()> {
        require(caller.role, Action::DeleteEvent)?;
        let event = self.find_event(event_id).await?;
        Self::ensure_owner(&caller, &event, "delete")?;

        if !self.events().delete(event_id).await? {
            return Err(AppError::not_found(EVENT_NOT_FOUND));
        }
        tracing::info!(event_id = %event_id, "event deleted");
        Ok(())
    }

    pub async fn register(&self, caller: Identity, event_id: Uuid) -> AppResult<()> {
        require(caller.role, Action::RegisterForEvent)?;
        let event = self.find_event(event_id).await?;

        if !event.registration_open {
            return Err(TransitionError::RegistrationClosed.into());
        }

        if !self
            .events()
            .insert_registration(event_id, caller.principal_id)
            .await?
        {
            return Err(TransitionError::AlreadyRegistered.into());
        }

        tracing::info!(event_id = %event_id, student_id = %caller.principal_id, "student registered");
        Ok(())
    }

    pub async fn cancel(&self, caller: Identity, event_id: Uuid) -> AppResult<()> {
        require(caller.role, Action::CancelRegistration)?;
        self.find_event(event_id).await?;

        if !self
            .events()
            .delete_registration(event_id, caller.principal_id)
            .await?
        {
            return Err(TransitionError::NotRegistered.into());
        }

        tracing::info!(event_id = %event_id, student_id = %caller.principal_id, "registration cancelled");
        Ok(())
    }
}
