// File: ./src/model/parser.rs
// Canonical line format: [PRIORITY] name (Due: YYYY-MM-DD) [Recurring: token]
use crate::error::DecodeError;
use crate::model::item::{DATE_FORMAT, Priority, Task, parse_date};
use chrono::NaiveDate;
use std::fmt;

pub const DUE_MARKER: &str = " (Due: ";
pub const RECURRING_MARKER: &str = " [Recurring: ";

/// Raw, unvalidated slices of a stored line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineParts<'a> {
    pub priority: &'a str,
    pub name: &'a str,
    pub due: Option<&'a str>,
    pub recurrence: Option<&'a str>,
}

impl<'a> LineParts<'a> {
    /// Structural split only. Returns `None` when the line has no leading
    /// `[...]` priority token.
    pub fn split(line: &'a str) -> Option<Self> {
        let rest = line.strip_prefix('[')?;
        let close = rest.find(']')?;
        let priority = &rest[..close];
        let body = &rest[close + 1..];
        let body = body.strip_prefix(' ').unwrap_or(body);

        let (head, recurrence) = match body.find(RECURRING_MARKER) {
            Some(idx) => {
                let tail = &body[idx + RECURRING_MARKER.len()..];
                let token = match tail.find(']') {
                    Some(end) => &tail[..end],
                    None => tail,
                };
                (&body[..idx], Some(token))
            }
            None => (body, None),
        };

        let (name, due) = match head.find(DUE_MARKER) {
            Some(idx) => {
                let tail = &head[idx + DUE_MARKER.len()..];
                let text = match tail.find(')') {
                    Some(end) => &tail[..end],
                    None => tail,
                };
                (&head[..idx], Some(text))
            }
            None => (head, None),
        };

        Some(Self {
            priority,
            name: name.trim(),
            due,
            recurrence,
        })
    }

    /// The verbatim recurrence suffix (`" [Recurring: ...]"`), if any.
    pub fn recurring_tag(line: &str) -> Option<&str> {
        line.find(RECURRING_MARKER).map(|idx| &line[idx..])
    }
}

impl Task {
    /// Renders the canonical line.
    pub fn to_line(&self) -> String {
        let tag = self
            .recurrence
            .map(|r| format!("{}{}]", RECURRING_MARKER, r))
            .unwrap_or_default();
        render_line(self.priority.as_str(), &self.name, self.due, &tag)
    }

    /// Strict decode: every present field must be valid.
    pub fn from_line(line: &str) -> Result<Self, DecodeError> {
        let parts = LineParts::split(line).ok_or(DecodeError::MissingPriority)?;
        let mut task = Task::new(parts.name, parts.priority.parse()?)?;
        if let Some(d) = parts.due {
            task.due = Some(parse_date(d)?);
        }
        if let Some(r) = parts.recurrence {
            task.recurrence = Some(r.parse()?);
        }
        Ok(task)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

/// Assembles a line from an already-rendered priority token and recurrence
/// suffix. `tag` is appended as-is.
pub(crate) fn render_line(priority: &str, name: &str, due: Option<NaiveDate>, tag: &str) -> String {
    let mut s = format!("[{}] {}", priority, name);
    if let Some(d) = due {
        s.push_str(&format!("{}{})", DUE_MARKER, d.format(DATE_FORMAT)));
    }
    s.push_str(tag);
    s
}

/// Validates raw input and renders it, or `None` if any field is invalid.
pub fn format_task(
    name: &str,
    priority: &str,
    due: Option<&str>,
    recurring: Option<&str>,
) -> Option<String> {
    Task::parse_fields(name, priority, due, recurring)
        .ok()
        .map(|t| t.to_line())
}

/// Rank used by listings. The token must match a canonical priority exactly;
/// anything else (including `[low]`) sorts last.
pub fn priority_rank(line: &str) -> u8 {
    LineParts::split(line)
        .and_then(|parts| Priority::ALL.iter().find(|p| p.as_str() == parts.priority))
        .map(Priority::rank)
        .unwrap_or(99)
}
