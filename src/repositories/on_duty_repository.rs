use crate::entities::{
    on_duty_request,
    sea_orm_active_enums::{OnDutyReason, OnDutyStatus},
};
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct OnDutyRepository<'a> {
    db: &'a DatabaseConnection,
}

pub struct NewOnDutyRequest {
    pub student_id: Uuid,
    pub student_name: String,
    pub registration_number: String,
    pub department: String,
    pub reason: OnDutyReason,
    pub event_name: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub from_time: NaiveTime,
    pub to_time: NaiveTime,
    pub description: String,
    pub attachment_url: Option<String>,
}

/// Which requests a caller may list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestScope {
    Student(Uuid),
    Department(String),
    All,
}

pub struct Resolution {
    pub status: OnDutyStatus,
    pub resolved_by: Uuid,
    pub resolved_by_name: String,
    pub resolved_at: NaiveDateTime,
}

impl<'a> OnDutyRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, new_request: NewOnDutyRequest) -> Result<on_duty_request::Model> {
        let request = on_duty_request::ActiveModel {
            request_id: Set(Uuid::new_v4()),
            student_id: Set(new_request.student_id),
            student_name: Set(new_request.student_name),
            registration_number: Set(new_request.registration_number),
            department: Set(new_request.department),
            reason: Set(new_request.reason),
            event_name: Set(new_request.event_name),
            from_date: Set(new_request.from_date),
            to_date: Set(new_request.to_date),
            from_time: Set(new_request.from_time),
            to_time: Set(new_request.to_time),
            description: Set(new_request.description),
            attachment_url: Set(new_request.attachment_url),
            status: Set(OnDutyStatus::Pending),
            resolved_by: Set(None),
            resolved_by_name: Set(None),
            resolved_at: Set(None),
            submitted_at: Set(Utc::now().naive_utc()),
        };

        let result = request.insert(self.db).await?;
        Ok(result)
    }

    pub async fn find_by_id(&self, request_id: Uuid) -> Result<Option<on_duty_request::Model>> {
        let request = on_duty_request::Entity::find_by_id(request_id)
            .one(self.db)
            .await?;
        Ok(request)
    }

    /// Newest first, optionally narrowed to one status.
    pub async fn find_in_scope(
        &self,
        scope: &RequestScope,
        status_filter: Option<OnDutyStatus>,
    ) -> Result<Vec<on_duty_request::Model>> {
        let mut query = on_duty_request::Entity::find();

        query = match scope {
            RequestScope::Student(student_id) => {
                query.filter(on_duty_request::Column::StudentId.eq(*student_id))
            }
            RequestScope::Department(department) => {
                query.filter(on_duty_request::Column::Department.eq(department.as_str()))
            }
            RequestScope::All => query,
        };

        if let Some(status) = status_filter {
            query = query.filter(on_duty_request::Column::Status.eq(status));
        }

        let requests = query
            .order_by_desc(on_duty_request::Column::SubmittedAt)
            .all(self.db)
            .await?;
        Ok(requests)
    }

    /// Moves a pending request to its terminal status in a single
    /// conditional update. Returns false when the request was no longer
    /// pending (or no longer exists) at write time.
    pub async fn resolve_if_pending(&self, request_id: Uuid, resolution: Resolution) -> Result<bool> {
        let changes = on_duty_request::ActiveModel {
            status: Set(resolution.status),
            resolved_by: Set(Some(resolution.resolved_by)),
            resolved_by_name: Set(Some(resolution.resolved_by_name)),
            resolved_at: Set(Some(resolution.resolved_at)),
            ..Default::default()
        };

        let result = on_duty_request::Entity::update_many()
            .set(changes)
            .filter(on_duty_request::Column::RequestId.eq(request_id))
            .filter(on_duty_request::Column::Status.eq(OnDutyStatus::Pending))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
