// File: ./src/model/item.rs
// Structured task record and its enums
use crate::error::FieldError;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Priority {
    Urgent,
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Every priority, most pressing first.
    pub const ALL: [Priority; 4] = [
        Priority::Urgent,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Urgent => "URGENT",
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }

    /// Sort rank: URGENT = 0 .. LOW = 3.
    pub fn rank(&self) -> u8 {
        *self as u8
    }
}

impl FromStr for Priority {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "URGENT" => Ok(Priority::Urgent),
            "HIGH" => Ok(Priority::High),
            "MEDIUM" => Ok(Priority::Medium),
            "LOW" => Ok(Priority::Low),
            _ => Err(FieldError::Priority(s.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
        }
    }
}

impl FromStr for Recurrence {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Recurrence::Daily),
            "weekly" => Ok(Recurrence::Weekly),
            "monthly" => Ok(Recurrence::Monthly),
            _ => Err(FieldError::Recurrence(s.to_string())),
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Task {
    pub name: String,
    pub priority: Priority,
    pub due: Option<NaiveDate>,
    pub recurrence: Option<Recurrence>,
}

impl Task {
    pub fn new(name: &str, priority: Priority) -> Result<Self, FieldError> {
        Ok(Self {
            name: validate_name(name)?,
            priority,
            due: None,
            recurrence: None,
        })
    }

    pub fn with_due(mut self, due: NaiveDate) -> Self {
        self.due = Some(due);
        self
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    /// Builds a task from raw user input. Priority and recurrence are
    /// case-insensitive; the due date must be `YYYY-MM-DD`.
    ///
    /// Fields are checked in the order priority, name, due date, recurrence and
    /// the first failure is returned.
    pub fn parse_fields(
        name: &str,
        priority: &str,
        due: Option<&str>,
        recurrence: Option<&str>,
    ) -> Result<Self, FieldError> {
        let priority = priority.parse::<Priority>()?;
        let mut task = Task::new(name, priority)?;
        if let Some(d) = due {
            task.due = Some(parse_date(d)?);
        }
        if let Some(r) = recurrence {
            task.recurrence = Some(r.parse()?);
        }
        Ok(task)
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| FieldError::DueDate(s.to_string()))
}

/// Names are trimmed and must not contain anything the line decoder would
/// mistake for a field marker. The markers are matched without their trailing
/// space: the encoder follows the name with a space of its own, so a name
/// ending in `(Due:` would complete a marker once rendered.
pub fn validate_name(name: &str) -> Result<String, FieldError> {
    let trimmed = name.trim();
    let forbidden = trimmed.is_empty()
        || trimmed.contains(['\n', '\r'])
        || trimmed.contains("(Due:")
        || trimmed.contains("[Recurring:");
    if forbidden {
        return Err(FieldError::Name(name.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_parse_is_case_insensitive() {
        assert_eq!("medium".parse::<Priority>(), Ok(Priority::Medium));
        assert_eq!("Urgent".parse::<Priority>(), Ok(Priority::Urgent));
        assert!("CRITICAL".parse::<Priority>().is_err());
        assert!("".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_rank_order() {
        let ranks: Vec<u8> = Priority::ALL.iter().map(Priority::rank).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_recurrence_parse() {
        assert_eq!("WEEKLY".parse::<Recurrence>(), Ok(Recurrence::Weekly));
        assert!("everyday".parse::<Recurrence>().is_err());
        assert_eq!(Recurrence::Monthly.to_string(), "monthly");
    }

    #[test]
    fn test_name_validation() {
        assert_eq!(validate_name("  Read book "), Ok("Read book".to_string()));
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("two\nlines").is_err());
        assert!(validate_name("Sneaky (Due: 2025-01-01)").is_err());
        assert!(validate_name("Sneaky [Recurring: daily]").is_err());
        // Trimming must not let a marker slip through at the end.
        assert!(validate_name("Water plants [Recurring:").is_err());
        assert!(validate_name("Call (Due:").is_err());
        assert!(validate_name("Call (Due:  ").is_err());
        assert!(validate_name("Call(Due:x").is_err());
        // Plain brackets and parens are fine.
        assert!(validate_name("Fix [bug] (urgent-ish)").is_ok());
    }

    #[test]
    fn test_parse_fields_reports_first_bad_field() {
        let err = Task::parse_fields("", "nope", Some("bad"), Some("bad")).unwrap_err();
        assert!(matches!(err, FieldError::Priority(_)));

        let err = Task::parse_fields("ok", "low", Some("31-Feb-2025"), None).unwrap_err();
        assert!(matches!(err, FieldError::DueDate(_)));

        let err = Task::parse_fields("ok", "low", Some("2025-02-28"), Some("yearly")).unwrap_err();
        assert!(matches!(err, FieldError::Recurrence(_)));
    }

    #[test]
    fn test_parse_fields_normalizes_date() {
        let task = Task::parse_fields("Pay rent", "low", Some("2025-4-1"), Some("Monthly")).unwrap();
        assert_eq!(task.due, NaiveDate::from_ymd_opt(2025, 4, 1));
        assert_eq!(task.recurrence, Some(Recurrence::Monthly));
        assert_eq!(task.priority, Priority::Low);
    }
}
