//! services/api/src/web/protocol.rs
//!
//! Defines the JSON bodies exchanged between the form client and the record store.
//! These are the "impure" wire shapes; handlers convert them to and from the
//! core domain types.

use attendance_core::domain::{AttendanceRecord, AttendanceStatus, NewAttendance, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Confirmation text returned with every stored record.
pub const SAVED_MESSAGE: &str = "Attendance saved!";

//=========================================================================================
// Request Bodies
//=========================================================================================

/// Body of `POST /attendance`.
///
/// Every field is optional at the parsing stage so that an incomplete body is
/// reported as a validation failure naming the field, not as a decoding error.
#[derive(Deserialize, Debug, Default, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateAttendanceRequest {
    #[schema(example = "Perez")]
    pub last_name: Option<String>,
    #[schema(example = "Kevin")]
    pub first_name: Option<String>,
    #[schema(example = "BSIT-2A")]
    pub section: Option<String>,
    #[schema(example = "Present")]
    pub status: Option<String>,
}

impl CreateAttendanceRequest {
    pub fn into_domain(self) -> Result<NewAttendance, ValidationError> {
        let status = self
            .status
            .as_deref()
            .unwrap_or_default()
            .parse::<AttendanceStatus>()?;
        NewAttendance::new(
            self.last_name.as_deref().unwrap_or_default(),
            self.first_name.as_deref().unwrap_or_default(),
            self.section.as_deref().unwrap_or_default(),
            status,
        )
    }
}

//=========================================================================================
// Response Bodies
//=========================================================================================

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum AttendanceStatusBody {
    Present,
    Absent,
}

impl From<AttendanceStatus> for AttendanceStatusBody {
    fn from(status: AttendanceStatus) -> Self {
        match status {
            AttendanceStatus::Present => AttendanceStatusBody::Present,
            AttendanceStatus::Absent => AttendanceStatusBody::Absent,
        }
    }
}

/// A stored attendance record as it appears on the wire.
#[derive(Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecordBody {
    pub last_name: String,
    pub first_name: String,
    pub section: String,
    pub status: AttendanceStatusBody,
    /// Server-assigned creation time (RFC 3339, UTC).
    pub date: DateTime<Utc>,
}

impl From<AttendanceRecord> for AttendanceRecordBody {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            last_name: record.last_name,
            first_name: record.first_name,
            section: record.section,
            status: record.status.into(),
            date: record.date,
        }
    }
}

/// The response payload sent after a record is stored.
#[derive(Serialize, Debug, ToSchema)]
pub struct CreateAttendanceResponse {
    #[schema(example = "Attendance saved!")]
    pub message: String,
    pub record: AttendanceRecordBody,
}

/// Error payload for rejected requests.
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    /// Wire name of the offending field, when one can be named.
    pub field: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        Self {
            message: err.to_string(),
            field: Some(err.field().wire_name().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attendance_core::domain::Field;

    fn request(json: &str) -> CreateAttendanceRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn complete_request_converts_to_domain() {
        let entry = request(
            r#"{"lastName":"Perez","firstName":"Kevin","section":"BSIT-2A","status":"Present"}"#,
        )
        .into_domain()
        .unwrap();
        assert_eq!(entry.last_name(), "Perez");
        assert_eq!(entry.status(), AttendanceStatus::Present);
    }

    #[test]
    fn absent_fields_are_validation_failures() {
        let err = request(r#"{"lastName":"Perez","section":"BSIT-2A","status":"Absent"}"#)
            .into_domain()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField(Field::FirstName));

        let err = request(r#"{"lastName":"Perez","firstName":"Kevin","section":"BSIT-2A"}"#)
            .into_domain()
            .unwrap_err();
        assert_eq!(err.field(), Field::Status);
    }

    #[test]
    fn record_body_uses_camel_case_and_status_strings() {
        let date = "2025-09-08T10:15:02Z".parse::<DateTime<Utc>>().unwrap();
        let body = AttendanceRecordBody::from(
            NewAttendance::new("Perez", "Kevin", "BSIT-2A", AttendanceStatus::Absent)
                .unwrap()
                .into_record(date),
        );
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["lastName"], "Perez");
        assert_eq!(json["firstName"], "Kevin");
        assert_eq!(json["status"], "Absent");
        assert_eq!(json["date"], "2025-09-08T10:15:02Z");
    }

    #[test]
    fn validation_error_names_wire_field() {
        let body = ErrorResponse::from(ValidationError::MissingField(Field::LastName));
        assert_eq!(body.field.as_deref(), Some("lastName"));
    }
}
