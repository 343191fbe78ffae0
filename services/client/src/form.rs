//! services/client/src/form.rs
//!
//! The attendance form controller: input fields, submission, and the local
//! state that follows a submission (notifications, the record table, and the
//! acknowledgement pulse).

use crate::error::ClientError;
use crate::notifications::{Notification, NotificationQueue};
use crate::table::RecordTable;
use attendance_core::domain::{AttendanceRecord, AttendanceStatus, NewAttendance, ValidationError};
use attendance_core::ports::AttendanceGateway;
use chrono::Local;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

const PULSE_CAPACITY: usize = 16;

//=========================================================================================
// Form State
//=========================================================================================

/// The three text inputs, exactly as typed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub last_name: String,
    pub first_name: String,
    pub section: String,
}

impl FormFields {
    pub fn to_entry(&self, status: AttendanceStatus) -> Result<NewAttendance, ValidationError> {
        NewAttendance::new(&self.last_name, &self.first_name, &self.section, status)
    }

    pub fn clear(&mut self) {
        self.last_name.clear();
        self.first_name.clear();
        self.section.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
}

/// Fired once per successful save. Carries no record data; listeners use it
/// only to trigger a visual acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcknowledgementPulse;

//=========================================================================================
// Controller
//=========================================================================================

pub struct FormController {
    gateway: Arc<dyn AttendanceGateway>,
    fields: FormFields,
    phase: FormPhase,
    notifications: NotificationQueue,
    table: RecordTable,
    pulses: broadcast::Sender<AcknowledgementPulse>,
}

impl FormController {
    pub fn new(gateway: Arc<dyn AttendanceGateway>) -> Self {
        let (pulses, _) = broadcast::channel(PULSE_CAPACITY);
        Self {
            gateway,
            fields: FormFields::default(),
            phase: FormPhase::Idle,
            notifications: NotificationQueue::new(),
            table: RecordTable::new(),
            pulses,
        }
    }

    /// Listens for acknowledgement pulses emitted after each successful save.
    pub fn subscribe(&self) -> broadcast::Receiver<AcknowledgementPulse> {
        self.pulses.subscribe()
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    /// Submits the current fields with `status`.
    ///
    /// Blank fields fail with [`ClientError::Validation`] before any request is
    /// made. A failed create leaves fields and notifications untouched. On
    /// success the fields are cleared, a notification is queued, a pulse is
    /// emitted, and the table is re-fetched.
    pub async fn submit(&mut self, status: AttendanceStatus) -> Result<AttendanceRecord, ClientError> {
        let entry = self.fields.to_entry(status).map_err(|e| {
            debug!(field = %e.field(), "Submission blocked by validation");
            ClientError::Validation(e)
        })?;

        self.phase = FormPhase::Submitting;
        let result = self.gateway.create_record(&entry).await;
        self.phase = FormPhase::Idle;

        let record = result.map_err(|e| {
            warn!(error = %e, "Failed to save attendance");
            ClientError::Network(e)
        })?;
        info!(last_name = %record.last_name, status = %record.status, "Attendance saved");

        self.fields.clear();
        self.notifications.push(Notification::for_submission(
            entry.last_name(),
            entry.status(),
            Local::now(),
        ));
        // Nobody listening is fine.
        self.pulses.send(AcknowledgementPulse).ok();

        // A failed refresh is already logged and leaves the old list in place.
        self.refresh().await.ok();
        Ok(record)
    }

    /// Re-fetches every record and replaces the table with the response.
    ///
    /// Returns whether the response was applied (it is not when a newer fetch
    /// already landed).
    pub async fn refresh(&mut self) -> Result<bool, ClientError> {
        let ticket = self.table.issue();
        match self.gateway.list_records().await {
            Ok(records) => {
                debug!(count = records.len(), "Fetched attendance records");
                Ok(self.table.apply(ticket, records))
            }
            Err(e) => {
                warn!(error = %e, "Failed to refresh attendance records; keeping previous list");
                Err(ClientError::RemoteFetch(e))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::{SAVE_FAILED_MESSAGE, VALIDATION_MESSAGE};
    use crate::notifications::MAX_NOTIFICATIONS;
    use crate::table::EMPTY_PLACEHOLDER;
    use async_trait::async_trait;
    use attendance_core::domain::Field;
    use attendance_core::ports::{PortError, PortResult};
    use chrono::Utc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-process stand-in for the record store.
    #[derive(Default)]
    pub(crate) struct FakeGateway {
        pub records: Mutex<Vec<AttendanceRecord>>,
        pub create_calls: AtomicUsize,
        pub fail_create: AtomicBool,
        pub fail_list: AtomicBool,
    }

    #[async_trait]
    impl AttendanceGateway for FakeGateway {
        async fn create_record(&self, entry: &NewAttendance) -> PortResult<AttendanceRecord> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_create.load(Ordering::SeqCst) {
                return Err(PortError::Unavailable("connection refused".into()));
            }
            let record = entry.clone().into_record(Utc::now());
            self.records.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn list_records(&self) -> PortResult<Vec<AttendanceRecord>> {
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(PortError::Rejected {
                    status: 500,
                    message: "Internal server error".into(),
                });
            }
            Ok(self.records.lock().unwrap().clone())
        }
    }

    fn fill(controller: &mut FormController, last: &str, first: &str, section: &str) {
        let fields = controller.fields_mut();
        fields.last_name = last.to_string();
        fields.first_name = first.to_string();
        fields.section = section.to_string();
    }

    fn setup() -> (Arc<FakeGateway>, FormController) {
        let gateway = Arc::new(FakeGateway::default());
        let controller = FormController::new(gateway.clone());
        (gateway, controller)
    }

    #[tokio::test]
    async fn empty_field_blocks_request_and_keeps_input() {
        let (gateway, mut controller) = setup();
        fill(&mut controller, "Perez", "", "BSIT-2A");

        let err = controller.submit(AttendanceStatus::Present).await.unwrap_err();

        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::MissingField(Field::FirstName))
        ));
        assert_eq!(err.user_message(), Some(VALIDATION_MESSAGE));
        assert_eq!(gateway.create_calls.load(Ordering::SeqCst), 0);
        assert_eq!(controller.fields().last_name, "Perez");
        assert_eq!(controller.fields().section, "BSIT-2A");
        assert!(controller.notifications().is_empty());
    }

    #[tokio::test]
    async fn successful_submit_clears_notifies_pulses_and_refreshes() {
        let (_gateway, mut controller) = setup();
        let mut pulses = controller.subscribe();
        fill(&mut controller, " Perez ", "Kevin", "BSIT-2A");

        let record = controller.submit(AttendanceStatus::Present).await.unwrap();

        assert_eq!(record.last_name, "Perez");
        assert_eq!(controller.fields(), &FormFields::default());
        assert_eq!(controller.phase(), FormPhase::Idle);
        assert_eq!(
            controller.notifications().latest().unwrap().message,
            "Perez marked as Present"
        );
        assert_eq!(pulses.try_recv().unwrap(), AcknowledgementPulse);
        assert_eq!(controller.table().records(), &[record]);
    }

    #[tokio::test]
    async fn failed_create_keeps_fields_and_notifications() {
        let (gateway, mut controller) = setup();
        let mut pulses = controller.subscribe();
        gateway.fail_create.store(true, Ordering::SeqCst);
        fill(&mut controller, "Perez", "Kevin", "BSIT-2A");

        let err = controller.submit(AttendanceStatus::Absent).await.unwrap_err();

        assert!(matches!(err, ClientError::Network(PortError::Unavailable(_))));
        assert_eq!(err.user_message(), Some(SAVE_FAILED_MESSAGE));
        assert_eq!(controller.fields().first_name, "Kevin");
        assert_eq!(controller.phase(), FormPhase::Idle);
        assert!(controller.notifications().is_empty());
        assert!(pulses.try_recv().is_err());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_list() {
        let (gateway, mut controller) = setup();
        fill(&mut controller, "Perez", "Kevin", "BSIT-2A");
        controller.submit(AttendanceStatus::Present).await.unwrap();
        assert_eq!(controller.table().records().len(), 1);

        gateway.fail_list.store(true, Ordering::SeqCst);
        fill(&mut controller, "Santos", "Ana", "BSIT-2B");
        controller.submit(AttendanceStatus::Absent).await.unwrap();

        assert_eq!(controller.table().records().len(), 1);
        let err = controller.refresh().await.unwrap_err();
        assert!(matches!(err, ClientError::RemoteFetch(_)));
        assert_eq!(err.user_message(), None);
        assert_eq!(controller.notifications().len(), 2);
    }

    #[tokio::test]
    async fn notifications_keep_ten_most_recent() {
        let (_gateway, mut controller) = setup();
        for i in 0..11 {
            fill(&mut controller, &format!("Student{i}"), "Kevin", "BSIT-2A");
            controller.submit(AttendanceStatus::Present).await.unwrap();
        }

        let messages: Vec<_> = controller
            .notifications()
            .iter()
            .map(|n| n.message.clone())
            .collect();
        assert_eq!(messages.len(), MAX_NOTIFICATIONS);
        assert_eq!(messages[0], "Student10 marked as Present");
        assert_eq!(messages[9], "Student1 marked as Present");
        assert_eq!(controller.table().records().len(), 11);
    }

    #[tokio::test]
    async fn initial_refresh_of_empty_store_shows_placeholder() {
        let (_gateway, mut controller) = setup();
        assert!(controller.refresh().await.unwrap());
        assert!(controller.table().render(false).contains(EMPTY_PLACEHOLDER));
    }
}
