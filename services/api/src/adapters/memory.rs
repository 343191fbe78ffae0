//! services/api/src/adapters/memory.rs
//!
//! The volatile record store. This is the concrete implementation of the
//! `AttendanceRepository` port from the `core` crate; everything it holds is
//! lost when the process exits.

use async_trait::async_trait;
use attendance_core::domain::{AttendanceRecord, NewAttendance};
use attendance_core::ports::{AttendanceRepository, Clock, PortResult, SystemClock};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An append-only, in-memory store that implements the `AttendanceRepository` port.
#[derive(Clone)]
pub struct InMemoryAttendanceStore {
    records: Arc<RwLock<Vec<AttendanceRecord>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryAttendanceStore {
    /// Creates an empty store stamped by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store that takes its timestamps from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            clock,
        }
    }
}

impl Default for InMemoryAttendanceStore {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================================
// Port Implementation
//=========================================================================================

#[async_trait]
impl AttendanceRepository for InMemoryAttendanceStore {
    async fn create_record(&self, entry: NewAttendance) -> PortResult<AttendanceRecord> {
        let mut records = self.records.write().await;

        // Dates never go backwards in insertion order, even if the wall clock does.
        let mut date = self.clock.now();
        if let Some(last) = records.last() {
            if last.date > date {
                date = last.date;
            }
        }

        let record = entry.into_record(date);
        records.push(record.clone());
        debug!(total = records.len(), "Stored attendance record");
        Ok(record)
    }

    async fn list_records(&self) -> PortResult<Vec<AttendanceRecord>> {
        Ok(self.records.read().await.clone())
    }
}
