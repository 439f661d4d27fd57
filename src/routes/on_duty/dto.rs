use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entities::{
    on_duty_request,
    sea_orm_active_enums::{OnDutyReason, OnDutyStatus},
};
use crate::error::AppError;
use crate::services::OnDutyDraft;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOnDutyRequest {
    pub reason: Option<OnDutyReason>,
    #[serde(default)]
    #[schema(example = "National Hackathon")]
    pub event_name: String,
    #[serde(default)]
    #[schema(example = "2025-03-14")]
    pub from_date: String,
    #[serde(default)]
    #[schema(example = "2025-03-15")]
    pub to_date: String,
    #[serde(default)]
    #[schema(example = "09:00")]
    pub from_time: String,
    #[serde(default)]
    #[schema(example = "17:00")]
    pub to_time: String,
    #[serde(default)]
    pub description: String,
    pub attachment_url: Option<String>,
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| AppError::validation(format!("{field} must be a date in YYYY-MM-DD format")))
}

fn parse_time(field: &str, value: &str) -> Result<NaiveTime, AppError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| AppError::validation(format!("{field} must be a time in HH:MM format")))
}

impl CreateOnDutyRequest {
    pub fn into_draft(self) -> Result<OnDutyDraft, AppError> {
        let reason = self
            .reason
            .ok_or_else(|| AppError::validation("reason is required"))?;

        let required = [
            ("eventName", &self.event_name),
            ("fromDate", &self.from_date),
            ("toDate", &self.to_date),
            ("fromTime", &self.from_time),
            ("toTime", &self.to_time),
            ("description", &self.description),
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

        let from_date = parse_date("fromDate", &self.from_date)?;
        let to_date = parse_date("toDate", &self.to_date)?;
        if from_date > to_date {
            return Err(AppError::validation("fromDate must not be after toDate"));
        }

        Ok(OnDutyDraft {
            reason,
            event_name: self.event_name.trim().to_string(),
            from_date,
            to_date,
            from_time: parse_time("fromTime", &self.from_time)?,
            to_time: parse_time("toTime", &self.to_time)?,
            description: self.description.trim().to_string(),
            attachment_url: self
                .attachment_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OnDutyQueryParams {
    /// pending, approved or rejected
    pub status: Option<OnDutyStatus>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnDutyResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub registration_number: String,
    pub department: String,
    pub reason: OnDutyReason,
    pub event_name: String,
    pub from_date: String,
    pub to_date: String,
    pub from_time: String,
    pub to_time: String,
    pub description: String,
    pub attachment_url: Option<String>,
    pub status: OnDutyStatus,
    pub resolved_by: Option<Uuid>,
    pub resolved_by_name: Option<String>,
    #[schema(value_type = Option<String>)]
    pub resolved_at: Option<NaiveDateTime>,
    #[schema(value_type = String)]
    pub submitted_at: NaiveDateTime,
}

impl From<on_duty_request::Model> for OnDutyResponse {
    fn from(m: on_duty_request::Model) -> Self {
        Self {
            id: m.request_id,
            student_id: m.student_id,
            student_name: m.student_name,
            registration_number: m.registration_number,
            department: m.department,
            reason: m.reason,
            event_name: m.event_name,
            from_date: m.from_date.format(DATE_FORMAT).to_string(),
            to_date: m.to_date.format(DATE_FORMAT).to_string(),
            from_time: m.from_time.format(TIME_FORMAT).to_string(),
            to_time: m.to_time.format(TIME_FORMAT).to_string(),
            description: m.description,
            attachment_url: m.attachment_url,
            status: m.status,
            resolved_by: m.resolved_by,
            resolved_by_name: m.resolved_by_name,
            resolved_at: m.resolved_at,
            submitted_at: m.submitted_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OnDutyResolutionResponse {
    pub message: String,
    pub request: OnDutyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: &str) -> CreateOnDutyRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_valid_request_becomes_draft() {
        let draft = request(
            r#"{"reason":"Event Participation","eventName":"Hackathon","fromDate":"2025-03-14",
                "toDate":"2025-03-15","fromTime":"09:00","toTime":"17:30","description":"Team event",
                "attachmentUrl":"  "}"#,
        )
        .into_draft()
        .unwrap();

        assert_eq!(draft.reason, OnDutyReason::EventParticipation);
        assert_eq!(draft.from_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(draft.attachment_url, None);
    }

    #[test]
    fn test_reversed_dates_are_rejected() {
        let err = request(
            r#"{"reason":"Workshop","eventName":"W","fromDate":"2025-03-16","toDate":"2025-03-15",
                "fromTime":"09:00","toTime":"10:00","description":"d"}"#,
        )
        .into_draft()
        .unwrap_err();

        assert!(matches!(err, AppError::Validation(ref m) if m == "fromDate must not be after toDate"));
    }

    #[test]
    fn test_missing_reason_and_bad_time() {
        let err = request(r#"{"eventName":"W"}"#).into_draft().unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "reason is required"));

        let err = request(
            r#"{"reason":"Other","eventName":"W","fromDate":"2025-03-14","toDate":"2025-03-14",
                "fromTime":"9am","toTime":"10:00","description":"d"}"#,
        )
        .into_draft()
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.starts_with("fromTime")));
    }

    #[test]
    fn test_unknown_reason_fails_to_deserialize() {
        assert!(serde_json::from_str::<CreateOnDutyRequest>(r#"{"reason":"Vacation"}"#).is_err());
    }
}
