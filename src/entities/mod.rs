pub mod certificate;
pub mod event;
pub mod event_registration;
pub mod faculty;
pub mod on_duty_request;
pub mod sea_orm_active_enums;
pub mod student;
