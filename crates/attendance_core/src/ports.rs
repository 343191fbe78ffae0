//! crates/attendance_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! The server implements the store side, the client implements the gateway
//! side, and both speak in terms of the domain types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::domain::{AttendanceRecord, NewAttendance};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (storage, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The remote side could not be reached at all.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    /// The remote side answered with a non-success status.
    #[error("Request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The authoritative holder of attendance records.
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Stamps the entry with the creation time and appends it.
    async fn create_record(&self, entry: NewAttendance) -> PortResult<AttendanceRecord>;

    /// Every record held, in creation order.
    async fn list_records(&self) -> PortResult<Vec<AttendanceRecord>>;
}

/// The client's view of a remote record store.
#[async_trait]
pub trait AttendanceGateway: Send + Sync {
    async fn create_record(&self, entry: &NewAttendance) -> PortResult<AttendanceRecord>;

    async fn list_records(&self) -> PortResult<Vec<AttendanceRecord>>;
}

/// Source of creation timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
