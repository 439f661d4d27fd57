pub mod certificate_repository;
pub mod event_repository;
pub mod faculty_repository;
pub mod on_duty_repository;
pub mod student_repository;

pub use certificate_repository::CertificateRepository;
pub use event_repository::{EventRepository, EventUpdate, NewEvent};
pub use faculty_repository::{FacultyRepository, NewFaculty};
pub use on_duty_repository::{NewOnDutyRequest, OnDutyRepository, RequestScope, Resolution};
pub use student_repository::{NewStudent, StudentRepository};
