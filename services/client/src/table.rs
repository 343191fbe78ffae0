//! services/client/src/table.rs
//!
//! The displayed record list and its text rendering.
//!
//! Every list-fetch takes a [`RefreshTicket`] before the request goes out. A
//! response is applied only if its ticket is newer than the last one applied,
//! so a slow, older fetch can never overwrite a newer list.

use attendance_core::domain::{AttendanceRecord, AttendanceStatus};
use tracing::debug;

pub const EMPTY_PLACEHOLDER: &str = "No records found.";

const HEADERS: [&str; 4] = ["Lastname", "Firstname", "Section", "Status"];
const GREEN: &str = "\x1b[1;32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Orders list-fetches by the time they were issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

#[derive(Debug, Default)]
pub struct RecordTable {
    records: Vec<AttendanceRecord>,
    issued: u64,
    applied: u64,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the next ticket. Call before sending the list request.
    pub fn issue(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Replaces the displayed records wholesale, unless a newer fetch already landed.
    ///
    /// Returns whether the records were applied.
    pub fn apply(&mut self, ticket: RefreshTicket, records: Vec<AttendanceRecord>) -> bool {
        if ticket.0 <= self.applied {
            debug!(
                ticket = ticket.0,
                applied = self.applied,
                "Discarding stale record list"
            );
            return false;
        }
        self.applied = ticket.0;
        self.records = records;
        true
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn render(&self, color: bool) -> String {
        render_records(&self.records, color)
    }
}

/// Lays out `records` as an aligned text table, or the placeholder when empty.
pub fn render_records(records: &[AttendanceRecord], color: bool) -> String {
    let rows: Vec<[&str; 4]> = records
        .iter()
        .map(|r| {
            [
                r.last_name.as_str(),
                r.first_name.as_str(),
                r.section.as_str(),
                r.status.as_str(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&format_row(&HEADERS, &widths));
    out.push('\n');
    let rule_len = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');

    if records.is_empty() {
        out.push_str(EMPTY_PLACEHOLDER);
        out.push('\n');
        return out;
    }

    for (record, row) in records.iter().zip(&rows) {
        let mut line = format_row(row, &widths);
        if color {
            // Pad first, then colour, so escape codes don't skew alignment.
            let plain = record.status.as_str();
            let painted = format!("{}{}{}", status_color(record.status), plain, RESET);
            if let Some(pos) = line.rfind(plain) {
                line.replace_range(pos..pos + plain.len(), &painted);
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn status_color(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Present => GREEN,
        AttendanceStatus::Absent => RED,
    }
}

fn format_row(cells: &[&str; 4], widths: &[usize; 4]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(" | ")
}
