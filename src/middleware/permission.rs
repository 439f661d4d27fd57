//! Role-level authorization.
//!
//! Answers only "may this role ever perform this action". Whether the caller
//! owns the particular event, or shares the request's department, is decided
//! by the service that has loaded the entity.

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReadEvents,
    CreateEvent,
    UpdateEvent,
    DeleteEvent,
    RegisterForEvent,
    CancelRegistration,
    CreateOnDutyRequest,
    ResolveOnDutyRequest,
    ReadOnDutyRequests,
    IssueCertificates,
    ReadCertificates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

pub fn authorize(role: RoleEnum, action: Action) -> Decision {
    use Action::*;
    use RoleEnum::*;

    let allowed = match action {
        ReadEvents | ReadOnDutyRequests | ReadCertificates => true,
        CreateEvent | UpdateEvent | DeleteEvent => matches!(role, Faculty | Admin),
        RegisterForEvent | CancelRegistration | CreateOnDutyRequest => role == Student,
        ResolveOnDutyRequest | IssueCertificates => matches!(role, Faculty | Admin),
    };

    if allowed { Decision::Allow } else { Decision::Deny }
}

fn denial_message(action: Action) -> &'static str {
    match action {
        Action::ReadEvents => "Not authorized to view events",
        Action::CreateEvent => "Not authorized to create events",
        Action::UpdateEvent => "Not authorized to update events",
        Action::DeleteEvent => "Not authorized to delete events",
        Action::RegisterForEvent => "Only students can register for events",
        Action::CancelRegistration => "Only students can cancel event registrations",
        Action::CreateOnDutyRequest => "Only students can submit on-duty requests",
        Action::ResolveOnDutyRequest => "Only faculty or admin can resolve on-duty requests",
        Action::ReadOnDutyRequests => "Not authorized to view on-duty requests",
        Action::IssueCertificates => "Only faculty or admin can issue certificates",
        Action::ReadCertificates => "Not authorized to view certificates",
    }
}

/// `authorize` as a `Result`, for use with `?` in services.
pub fn require(role: RoleEnum, action: Action) -> Result<(), AppError> {
    match authorize(role, action) {
        Decision::Allow => Ok(()),
        Decision::Deny => {
            tracing::warn!(role = %role, ?action, "role check denied");
            Err(AppError::forbidden(denial_message(action)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ACTIONS: [Action; 11] = [
        Action::ReadEvents,
        Action::CreateEvent,
        Action::UpdateEvent,
        Action::DeleteEvent,
        Action::RegisterForEvent,
        Action::CancelRegistration,
        Action::CreateOnDutyRequest,
        Action::ResolveOnDutyRequest,
        Action::ReadOnDutyRequests,
        Action::IssueCertificates,
        Action::ReadCertificates,
    ];

    fn allowed_for(role: RoleEnum) -> Vec<Action> {
        ALL_ACTIONS
            .into_iter()
            .filter(|action| authorize(role, *action) == Decision::Allow)
            .collect()
    }

    #[test]
    fn test_student_matrix() {
        assert_eq!(
            allowed_for(RoleEnum::Student),
            vec![
                Action::ReadEvents,
                Action::RegisterForEvent,
                Action::CancelRegistration,
                Action::CreateOnDutyRequest,
                Action::ReadOnDutyRequests,
                Action::ReadCertificates,
            ]
        );
    }

    #[test]
    fn test_faculty_and_admin_share_role_level_rights() {
        let expected = vec![
            Action::ReadEvents,
            Action::CreateEvent,
            Action::UpdateEvent,
            Action::DeleteEvent,
            Action::ResolveOnDutyRequest,
            Action::ReadOnDutyRequests,
            Action::IssueCertificates,
            Action::ReadCertificates,
        ];
        assert_eq!(allowed_for(RoleEnum::Faculty), expected);
        assert_eq!(allowed_for(RoleEnum::Admin), expected);
    }

    #[test]
    fn test_require_maps_deny_to_forbidden() {
        let err = require(RoleEnum::Faculty, Action::RegisterForEvent).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(ref m) if m == "Only students can register for events"));
        assert!(require(RoleEnum::Student, Action::RegisterForEvent).is_ok());
    }
}
