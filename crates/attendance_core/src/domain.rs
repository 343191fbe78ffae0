//! crates/attendance_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any transport or serialization format.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// The two states a person can be marked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("present") {
            Ok(AttendanceStatus::Present)
        } else if trimmed.eq_ignore_ascii_case("absent") {
            Ok(AttendanceStatus::Absent)
        } else {
            Err(ValidationError::InvalidStatus(s.to_string()))
        }
    }
}

/// The identity fields of the attendance form, in the order they are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    LastName,
    FirstName,
    Section,
    Status,
}

impl Field {
    /// Name of the field as it appears on the wire.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Field::LastName => "lastName",
            Field::FirstName => "firstName",
            Field::Section => "section",
            Field::Status => "status",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Why an attendance submission was refused before it reached the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(Field),
    #[error("Invalid attendance status: '{0}' (expected Present or Absent)")]
    InvalidStatus(String),
}

impl ValidationError {
    /// The offending field.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::MissingField(field) => *field,
            ValidationError::InvalidStatus(_) => Field::Status,
        }
    }
}

/// A validated request to record one person's attendance.
///
/// The only way to build one is [`NewAttendance::new`], so holding a value
/// means all three identity fields are non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    last_name: String,
    first_name: String,
    section: String,
    status: AttendanceStatus,
}

impl NewAttendance {
    /// Trims the identity fields and checks them in form order.
    pub fn new(
        last_name: &str,
        first_name: &str,
        section: &str,
        status: AttendanceStatus,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            last_name: required(last_name, Field::LastName)?,
            first_name: required(first_name, Field::FirstName)?,
            section: required(section, Field::Section)?,
            status,
        })
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn status(&self) -> AttendanceStatus {
        self.status
    }

    /// Stamps the entry with its creation time, producing the stored record.
    pub fn into_record(self, date: DateTime<Utc>) -> AttendanceRecord {
        AttendanceRecord {
            last_name: self.last_name,
            first_name: self.first_name,
            section: self.section,
            status: self.status,
            date,
        }
    }
}

fn required(value: &str, field: Field) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// One person's attendance status at a point in time. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub last_name: String,
    pub first_name: String,
    pub section: String,
    pub status: AttendanceStatus,
    /// Assigned by the store, never by the client.
    pub date: DateTime<Utc>,
}
