use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{certificate, sea_orm_active_enums::CertificateType};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub title: String,
    pub event_name: String,
    #[schema(value_type = String)]
    pub issue_date: NaiveDate,
    #[serde(rename = "type")]
    pub certificate_type: CertificateType,
    pub student_name: String,
    pub email: String,
    pub department: String,
    pub registration_number: String,
    pub issued_by: Uuid,
    #[schema(value_type = String)]
    pub created_at: NaiveDateTime,
}

impl From<certificate::Model> for CertificateResponse {
    fn from(m: certificate::Model) -> Self {
        Self {
            id: m.certificate_id,
            student_id: m.student_id,
            title: m.title,
            event_name: m.event_name,
            issue_date: m.issue_date,
            certificate_type: m.certificate_type,
            student_name: m.student_name,
            email: m.email,
            department: m.department,
            registration_number: m.registration_number,
            issued_by: m.issued_by,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IssueCertificatesResponse {
    pub message: String,
    pub issued: usize,
    pub certificates: Vec<CertificateResponse>,
}

/// Multipart form for bulk issuance; documentation only.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct IssueCertificatesForm {
    /// CSV or XLSX with columns id, name, email, event, type
    #[schema(value_type = String, format = Binary)]
    pub roster: Vec<u8>,
    /// One file per roster row, named `<student id>.<ext>`
    #[schema(value_type = Vec<String>)]
    pub certificate: Vec<Vec<u8>>,
}
