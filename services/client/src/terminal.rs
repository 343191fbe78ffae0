//! services/client/src/terminal.rs
//!
//! A line-oriented front-end for the form controller. Input is read
//! asynchronously so the runtime keeps serving network calls; output goes to
//! any `Write` so the loop can run against a buffer in tests.

use crate::error::ClientError;
use crate::form::{AcknowledgementPulse, FormController};
use attendance_core::domain::AttendanceStatus;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::debug;

/// What the user picked after filling in the fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Mark(AttendanceStatus),
    Refresh,
    Quit,
}

impl Action {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "p" | "present" => Some(Action::Mark(AttendanceStatus::Present)),
            "a" | "absent" => Some(Action::Mark(AttendanceStatus::Absent)),
            "r" | "refresh" => Some(Action::Refresh),
            "q" | "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

/// Runs the interactive form until the user quits or input ends.
///
/// An empty answer to a field prompt keeps the current value, so input
/// retained after a failed submission does not have to be retyped.
pub async fn run_form<R, W>(
    controller: &mut FormController,
    input: R,
    out: &mut W,
    color: bool,
) -> Result<(), ClientError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut pulses = controller.subscribe();

    writeln!(out, "Attendance")?;
    // Initial load; a failure leaves the table empty and is only logged.
    controller.refresh().await.ok();
    write!(out, "{}", controller.table().render(color))?;

    loop {
        let Some(last_name) = prompt(&mut lines, out, "Last name", &controller.fields().last_name).await? else {
            break;
        };
        controller.fields_mut().last_name = last_name;

        let Some(first_name) = prompt(&mut lines, out, "First name", &controller.fields().first_name).await? else {
            break;
        };
        controller.fields_mut().first_name = first_name;

        let Some(section) = prompt(&mut lines, out, "Year and Section", &controller.fields().section).await? else {
            break;
        };
        controller.fields_mut().section = section;

        let action = loop {
            write!(out, "[p]resent / [a]bsent / [r]efresh / [q]uit: ")?;
            out.flush()?;
            let Some(line) = lines.next_line().await? else {
                return Ok(());
            };
            match Action::parse(&line) {
                Some(action) => break action,
                None => writeln!(out, "Unknown action '{}'", line.trim())?,
            }
        };
        debug!(?action, "Form action");

        match action {
            Action::Quit => break,
            Action::Refresh => {
                if controller.refresh().await.is_ok() {
                    write!(out, "{}", controller.table().render(color))?;
                }
            }
            Action::Mark(status) => {
                match controller.submit(status).await {
                    Ok(_) => {
                        drain_pulses(&mut pulses, out)?;
                        write_notifications(controller, out)?;
                        write!(out, "{}", controller.table().render(color))?;
                    }
                    Err(e) => {
                        if let Some(message) = e.user_message() {
                            writeln!(out, "! {}", message)?;
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

/// Performs a single submission and prints the outcome, for one-shot use.
pub async fn submit_once<W: Write>(
    controller: &mut FormController,
    status: AttendanceStatus,
    out: &mut W,
    color: bool,
) -> Result<(), ClientError> {
    let mut pulses = controller.subscribe();
    if let Err(e) = controller.submit(status).await {
        if let Some(message) = e.user_message() {
            writeln!(out, "! {}", message)?;
        }
        return Err(e);
    }
    drain_pulses(&mut pulses, out)?;
    write_notifications(controller, out)?;
    write!(out, "{}", controller.table().render(color))?;
    Ok(())
}

async fn prompt<R, W>(
    lines: &mut Lines<R>,
    out: &mut W,
    label: &str,
    current: &str,
) -> Result<Option<String>, ClientError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if current.is_empty() {
        write!(out, "{}: ", label)?;
    } else {
        write!(out, "{} [{}]: ", label, current)?;
    }
    out.flush()?;

    let Some(line) = lines.next_line().await? else {
        return Ok(None);
    };
    if line.trim().is_empty() {
        Ok(Some(current.to_string()))
    } else {
        Ok(Some(line))
    }
}

fn drain_pulses<W: Write>(
    pulses: &mut broadcast::Receiver<AcknowledgementPulse>,
    out: &mut W,
) -> Result<(), ClientError> {
    loop {
        match pulses.try_recv() {
            Ok(AcknowledgementPulse) => writeln!(out, "* Saved *")?,
            Err(TryRecvError::Lagged(_)) => continue,
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return Ok(()),
        }
    }
}

fn write_notifications<W: Write>(controller: &FormController, out: &mut W) -> Result<(), ClientError> {
    for notification in controller.notifications().iter() {
        writeln!(out, "  [{}] {}", notification.timestamp, notification.message)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::tests::FakeGateway;
    use crate::table::EMPTY_PLACEHOLDER;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    async fn run(script: &str, gateway: Arc<FakeGateway>) -> (FormController, String) {
        let mut controller = FormController::new(gateway);
        let mut out = Vec::new();
        run_form(&mut controller, script.as_bytes(), &mut out, false)
            .await
            .unwrap();
        (controller, String::from_utf8(out).unwrap())
    }

    #[test]
    fn actions_accept_short_and_long_forms() {
        assert_eq!(Action::parse("P"), Some(Action::Mark(AttendanceStatus::Present)));
        assert_eq!(Action::parse(" absent "), Some(Action::Mark(AttendanceStatus::Absent)));
        assert_eq!(Action::parse("r"), Some(Action::Refresh));
        assert_eq!(Action::parse("q"), Some(Action::Quit));
        assert_eq!(Action::parse("x"), None);
    }

    #[tokio::test]
    async fn empty_store_shows_placeholder_on_load() {
        let (_, output) = run("", Arc::new(FakeGateway::default())).await;
        assert!(output.contains(EMPTY_PLACEHOLDER));
    }

    #[tokio::test]
    async fn marking_present_saves_and_shows_the_row() {
        let gateway = Arc::new(FakeGateway::default());
        let (controller, output) = run("Perez\nKevin\nBSIT-2A\np\n", gateway.clone()).await;

        assert_eq!(gateway.create_calls.load(Ordering::SeqCst), 1);
        assert!(output.contains("* Saved *"));
        assert!(output.contains("Perez marked as Present"));
        assert!(output.contains("Perez    | Kevin     | BSIT-2A | Present"));
        assert!(controller.fields().last_name.is_empty());
    }

    #[tokio::test]
    async fn blank_field_shows_validation_message_and_is_kept_for_retry() {
        let gateway = Arc::new(FakeGateway::default());
        // Second round keeps Perez/BSIT-2A and fills in the missing first name.
        let script = "Perez\n\nBSIT-2A\na\n\nKevin\n\na\n";
        let (_, output) = run(script, gateway.clone()).await;

        assert!(output.contains("! Please fill in all fields."));
        assert!(output.contains("Last name [Perez]: "));
        assert_eq!(gateway.create_calls.load(Ordering::SeqCst), 1);
        assert!(output.contains("Perez marked as Absent"));
    }

    #[tokio::test]
    async fn failed_save_shows_alert() {
        let gateway = Arc::new(FakeGateway::default());
        gateway.fail_create.store(true, Ordering::SeqCst);
        let (controller, output) = run("Perez\nKevin\nBSIT-2A\np\n", gateway).await;

        assert!(output.contains("! Failed to save attendance."));
        assert_eq!(controller.fields().first_name, "Kevin");
    }

    #[tokio::test]
    async fn submit_once_reports_success() {
        let gateway = Arc::new(FakeGateway::default());
        let mut controller = FormController::new(gateway);
        {
            let fields = controller.fields_mut();
            fields.last_name = "Perez".into();
            fields.first_name = "Kevin".into();
            fields.section = "BSIT-2A".into();
        }
        let mut out = Vec::new();
        submit_once(&mut controller, AttendanceStatus::Present, &mut out, false)
            .await
            .unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("* Saved *"));
        assert!(output.contains("BSIT-2A"));
    }
}
