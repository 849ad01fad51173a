// File: ./src/model/recurrence.rs
// Rolling recurring tasks forward once they fall due
use crate::error::{DecodeError, TaskError};
use crate::model::item::{Recurrence, parse_date};
use crate::model::parser::{LineParts, RECURRING_MARKER, render_line};
use chrono::{Days, Months, NaiveDate};
use std::collections::HashSet;

impl Recurrence {
    /// Next due date after `date`. Monthly steps keep the day of month and
    /// clamp to the last day when the target month is shorter.
    pub fn advance(&self, date: NaiveDate) -> NaiveDate {
        let next = match self {
            Recurrence::Daily => date.checked_add_days(Days::new(1)),
            Recurrence::Weekly => date.checked_add_days(Days::new(7)),
            Recurrence::Monthly => date.checked_add_months(Months::new(1)),
        };
        // Only overflows at NaiveDate::MAX.
        next.unwrap_or(date)
    }
}

/// The renewal of one stored line, if it is recurring and due on or before
/// `today`.
///
/// Only the due date and the recurrence token are decoded; the priority token
/// and name are carried over verbatim, so an odd priority does not block the
/// rollover. The recurrence tag is re-rendered in canonical form.
pub fn renew_line(line: &str, today: NaiveDate) -> Result<Option<String>, DecodeError> {
    let parts = LineParts::split(line).ok_or(DecodeError::MissingPriority)?;
    let Some(token) = parts.recurrence else {
        return Ok(None);
    };
    let recurrence: Recurrence = token.parse()?;
    let Some(due) = parts.due else {
        return Ok(None);
    };
    let due = parse_date(due)?;
    if due > today {
        return Ok(None);
    }
    let tag = format!("{RECURRING_MARKER}{recurrence}]");
    Ok(Some(render_line(
        parts.priority,
        parts.name,
        Some(recurrence.advance(due)),
        &tag,
    )))
}

/// Scans `lines` and returns the renewal lines to append, in scan order.
///
/// A recurring line with a bad due date or recurrence token fails the whole
/// batch. Renewals already present in `lines` (or produced earlier in the same
/// scan) are not returned again.
pub fn process_recurring_tasks(
    lines: &[String],
    today: NaiveDate,
) -> Result<Vec<String>, TaskError> {
    let seen: HashSet<&str> = lines.iter().map(String::as_str).collect();
    let mut renewals: Vec<String> = Vec::new();

    for line in lines.iter().filter(|l| l.contains(RECURRING_MARKER)) {
        let renewal = renew_line(line, today).map_err(|source| TaskError::Corrupt {
            line: line.clone(),
            source,
        })?;
        let Some(next_line) = renewal else {
            continue;
        };
        if seen.contains(next_line.as_str()) || renewals.contains(&next_line) {
            continue;
        }
        tracing::info!(from = %line, to = %next_line, "recurring task rolled over");
        renewals.push(next_line);
    }

    Ok(renewals)
}
