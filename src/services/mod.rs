pub mod certificate_service;
pub mod credential_service;
pub mod event_service;
pub mod on_duty_service;

pub use certificate_service::CertificateService;
pub use credential_service::{CredentialService, PasswordPolicy, PrincipalKind, VerifiedPrincipal};
pub use event_service::{EventDetail, EventDraft, EventService, EventSummary};
pub use on_duty_service::{OnDutyDraft, OnDutyService};
