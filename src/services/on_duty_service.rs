use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::entities::{
    faculty, on_duty_request,
    sea_orm_active_enums::{OnDutyReason, OnDutyStatus, RoleEnum},
};
use crate::error::{AppError, AppResult, TransitionError};
use crate::extractor::Identity;
use crate::middleware::permission::{Action, require};
use crate::repositories::{
    FacultyRepository, NewOnDutyRequest, OnDutyRepository, RequestScope, Resolution,
    StudentRepository,
};

const REQUEST_NOT_FOUND: &str = "On-duty request not found";

#[derive(Debug, Clone)]
pub struct OnDutyDraft {
    pub reason: OnDutyReason,
    pub event_name: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub from_time: NaiveTime,
    pub to_time: NaiveTime,
    pub description: String,
    pub attachment_url: Option<String>,
}

pub struct OnDutyService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OnDutyService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    fn requests(&self) -> OnDutyRepository<'a> {
        OnDutyRepository::new(self.db)
    }

    async fn staff_record(&self, caller: &Identity) -> AppResult<faculty::Model> {
        FacultyRepository::new(self.db)
            .find_by_id(caller.principal_id)
            .await?
            .ok_or_else(|| AppError::forbidden("Faculty account not found"))
    }

    async fn scope_for(&self, caller: &Identity) -> AppResult<RequestScope> {
        Ok(match caller.role {
            RoleEnum::Student => RequestScope::Student(caller.principal_id),
            RoleEnum::Faculty => RequestScope::Department(self.staff_record(caller).await?.department),
            RoleEnum::Admin => RequestScope::All,
        })
    }

    fn in_scope(scope: &RequestScope, request: &on_duty_request::Model) -> bool {
        match scope {
            RequestScope::Student(student_id) => request.student_id == *student_id,
            RequestScope::Department(department) => request.department == *department,
            RequestScope::All => true,
        }
    }

    /// Files a new request in `pending`, snapshotting the student's name,
    /// department and registration number.
    pub async fn create(
        &self,
        caller: Identity,
        draft: OnDutyDraft,
    ) -> AppResult<on_duty_request::Model> {
        require(caller.role, Action::CreateOnDutyRequest)?;

        let student = StudentRepository::new(self.db)
            .find_by_id(caller.principal_id)
            .await?
            .ok_or_else(|| AppError::forbidden("Student account not found"))?;

        let request = self
            .requests()
            .create(NewOnDutyRequest {
                student_id: student.student_id,
                student_name: student.name,
                registration_number: student.regno.to_string(),
                department: student.department,
                reason: draft.reason,
                event_name: draft.event_name,
                from_date: draft.from_date,
                to_date: draft.to_date,
                from_time: draft.from_time,
                to_time: draft.to_time,
                description: draft.description,
                attachment_url: draft.attachment_url,
            })
            .await?;

        tracing::info!(request_id = %request.request_id, student_id = %request.student_id, "on-duty request submitted");
        Ok(request)
    }

    pub async fn list(
        &self,
        caller: Identity,
        status: Option<OnDutyStatus>,
    ) -> AppResult<Vec<on_duty_request::Model>> {
        require(caller.role, Action::ReadOnDutyRequests)?;
        let scope = self.scope_for(&caller).await?;
        Ok(self.requests().find_in_scope(&scope, status).await?)
    }

    /// Requests outside the caller's visibility read as missing.
    pub async fn get(&self, caller: Identity, request_id: Uuid) -> AppResult<on_duty_request::Model> {
        require(caller.role, Action::ReadOnDutyRequests)?;
        let scope = self.scope_for(&caller).await?;

        self.requests()
            .find_by_id(request_id)
            .await?
            .filter(|request| Self::in_scope(&scope, request))
            .ok_or_else(|| AppError::not_found(REQUEST_NOT_FOUND))
    }

    pub async fn approve(&self, caller: Identity, request_id: Uuid) -> AppResult<on_duty_request::Model> {
        self.resolve(caller, request_id, OnDutyStatus::Approved).await
    }

    pub async fn reject(&self, caller: Identity, request_id: Uuid) -> AppResult<on_duty_request::Model> {
        self.resolve(caller, request_id, OnDutyStatus::Rejected).await
    }

    async fn resolve(
        &self,
        caller: Identity,
        request_id: Uuid,
        target: OnDutyStatus,
    ) -> AppResult<on_duty_request::Model> {
        require(caller.role, Action::ResolveOnDutyRequest)?;

        let repo = self.requests();
        let request = repo
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(REQUEST_NOT_FOUND))?;

        let resolver = self.staff_record(&caller).await?;
        if caller.role == RoleEnum::Faculty && resolver.department != request.department {
            tracing::warn!(
                request_id = %request_id,
                resolver = %resolver.faculty_id,
                "department check denied"
            );
            return Err(AppError::forbidden(
                "Not authorized to resolve requests from another department",
            ));
        }

        if request.status != OnDutyStatus::Pending {
            return Err(TransitionError::AlreadyResolved(request.status).into());
        }

        let resolved = repo
            .resolve_if_pending(
                request_id,
                Resolution {
                    status: target,
                    resolved_by: resolver.faculty_id,
                    resolved_by_name: resolver.name,
                    resolved_at: Utc::now().naive_utc(),
                },
            )
            .await?;

        let current = repo
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(REQUEST_NOT_FOUND))?;

        if !resolved {
            // Another resolver got there between our read and our write.
            return Err(TransitionError::AlreadyResolved(current.status).into());
        }

        tracing::info!(request_id = %request_id, status = target.as_str(), "on-duty request resolved");
        Ok(current)
    }
}
