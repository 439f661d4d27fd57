use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::entities::sea_orm_active_enums::{
    CertificateType, EventCategory, OnDutyReason, OnDutyStatus, RoleEnum,
};
use crate::routes::{self, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::route::health,
        routes::auth::route::login_student,
        routes::auth::route::login_faculty,
        routes::events::route::list_events,
        routes::events::route::get_event,
        routes::events::route::create_event,
        routes::events::route::update_event,
        routes::events::route::delete_event,
        routes::events::route::register_for_event,
        routes::events::route::cancel_registration,
        routes::on_duty::route::list_requests,
        routes::on_duty::route::get_request,
        routes::on_duty::route::create_request,
        routes::on_duty::route::approve_request,
        routes::on_duty::route::reject_request,
        routes::certificates::route::list_certificates,
        routes::certificates::route::issue_certificates,
        routes::certificates::route::download_artifact,
    ),
    components(schemas(
        MessageResponse,
        RoleEnum,
        EventCategory,
        OnDutyStatus,
        OnDutyReason,
        CertificateType,
        routes::auth::dto::LoginRequest,
        routes::auth::dto::LoginResponse,
        routes::events::dto::CreateEventRequest,
        routes::events::dto::UpdateEventRequest,
        routes::events::dto::EventResponse,
        routes::events::dto::EventDetailResponse,
        routes::events::dto::CreatorResponse,
        routes::events::dto::RegisteredUserResponse,
        routes::on_duty::dto::CreateOnDutyRequest,
        routes::on_duty::dto::OnDutyResponse,
        routes::on_duty::dto::OnDutyResolutionResponse,
        routes::certificates::dto::CertificateResponse,
        routes::certificates::dto::IssueCertificatesResponse,
        routes::certificates::dto::IssueCertificatesForm,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Authentication", description = "Student and faculty login"),
        (name = "Events", description = "Events and student registration"),
        (name = "On-duty requests", description = "On-duty leave requests and their approval"),
        (name = "Certificates", description = "Certificate listing and bulk issuance"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
