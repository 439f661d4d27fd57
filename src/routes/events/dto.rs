use chrono::NaiveDateTime;
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{event, sea_orm_active_enums::EventCategory};
use crate::error::AppError;
use crate::repositories::EventUpdate;
use crate::services::event_service::{PrincipalRef, RegisteredStudent};
use crate::services::{EventDetail, EventDraft, EventSummary};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(default)]
    #[schema(example = "Tech Fest")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[schema(example = "2025-03-14")]
    pub date: String,
    #[serde(default)]
    #[schema(example = "10:00")]
    pub time: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub organizer: String,
    #[serde(rename = "type", alias = "category", default)]
    pub category: Option<EventCategory>,
    pub registration_open: Option<bool>,
}

impl CreateEventRequest {
    pub fn into_draft(self) -> Result<EventDraft, AppError> {
        let required = [
            ("title", &self.title),
            ("description", &self.description),
            ("date", &self.date),
            ("time", &self.time),
            ("venue", &self.venue),
            ("organizer", &self.organizer),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(AppError::validation(format!(
                "Missing required field(s): {}",
                missing.join(", ")
            )));
        }

        Ok(EventDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
            venue: self.venue.trim().to_string(),
            organizer: self.organizer.trim().to_string(),
            category: self.category.unwrap_or_default(),
            registration_open: self.registration_open.unwrap_or(true),
        })
    }
}

/// Partial update. Blank text fields are ignored; `registrationOpen` is
/// applied whenever present, `false` included.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub organizer: Option<String>,
    #[serde(rename = "type", alias = "category")]
    #[schema(value_type = Option<EventCategory>)]
    pub category: Option<String>,
    pub registration_open: Option<bool>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl UpdateEventRequest {
    pub fn into_update(self) -> Result<EventUpdate, AppError> {
        let category = present(self.category)
            .map(|value| {
                EventCategory::try_from_value(&value)
                    .map_err(|_| AppError::validation(format!("Invalid event type '{}'", value)))
            })
            .transpose()?;

        Ok(EventUpdate {
            title: present(self.title),
            description: present(self.description),
            date: present(self.date),
            time: present(self.time),
            venue: present(self.venue),
            organizer: present(self.organizer),
            category,
            registration_open: self.registration_open,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatorResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<PrincipalRef> for CreatorResponse {
    fn from(p: PrincipalRef) -> Self {
        Self {
            id: p.id,
            name: p.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisteredUserResponse {
    pub id: Uuid,
    pub name: String,
    pub rno: String,
}

impl From<RegisteredStudent> for RegisteredUserResponse {
    fn from(s: RegisteredStudent) -> Self {
        Self {
            id: s.id,
            name: s.name,
            rno: s.rno,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub organizer: String,
    #[serde(rename = "type")]
    pub category: EventCategory,
    pub registration_open: bool,
    pub created_by: Option<CreatorResponse>,
    pub registered_users: Vec<Uuid>,
    /// Only present for a signed-in student.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_registered: Option<bool>,
    #[schema(value_type = String)]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub organizer: String,
    #[serde(rename = "type")]
    pub category: EventCategory,
    pub registration_open: bool,
    pub created_by: Option<CreatorResponse>,
    pub registered_users: Vec<RegisteredUserResponse>,
    #[schema(value_type = String)]
    pub created_at: NaiveDateTime,
}

impl From<EventSummary> for EventResponse {
    fn from(summary: EventSummary) -> Self {
        let event::Model {
            event_id,
            title,
            description,
            date,
            time,
            venue,
            organizer,
            category,
            registration_open,
            created_at,
            ..
        } = summary.event;

        Self {
            id: event_id,
            title,
            description,
            date,
            time,
            venue,
            organizer,
            category,
            registration_open,
            created_by: summary.creator.map(Into::into),
            registered_users: summary.registered_students,
            is_registered: summary.is_registered,
            created_at,
        }
    }
}

impl From<EventDetail> for EventDetailResponse {
    fn from(detail: EventDetail) -> Self {
        let event::Model {
            event_id,
            title,
            description,
            date,
            time,
            venue,
            organizer,
            category,
            registration_open,
            created_at,
            ..
        } = detail.event;

        Self {
            id: event_id,
            title,
            description,
            date,
            time,
            venue,
            organizer,
            category,
            registration_open,
            created_by: detail.creator.map(Into::into),
            registered_users: detail
                .registered_students
                .into_iter()
                .map(Into::into)
                .collect(),
            created_at,
        }
    }
}
