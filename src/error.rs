// File: ./src/error.rs
use std::fmt;

/// A single invalid field handed to the encoder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("unknown priority '{0}'")]
    Priority(String),
    #[error("invalid task name '{0}'")]
    Name(String),
    #[error("invalid due date '{0}', expected YYYY-MM-DD")]
    DueDate(String),
    #[error("unknown recurrence '{0}'")]
    Recurrence(String),
}

/// Why a stored line could not be decoded strictly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("missing [PRIORITY] prefix")]
    MissingPriority,
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Errors returned by task store operations.
///
/// The `Display` text of the user-facing variants is the status line the CLI
/// prints verbatim.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("Invalid priority level or date format!")]
    InvalidTask(#[source] FieldError),

    #[error("Invalid recurrence type!")]
    InvalidRecurrence(#[source] FieldError),

    #[error("Invalid priority level!")]
    InvalidPriority(#[source] FieldError),

    #[error("Invalid date format!")]
    InvalidDate(#[source] FieldError),

    #[error("Task already exists!")]
    Duplicate,

    #[error("Task not found!")]
    NotFound,

    /// A recurring line in the store could not be decoded. Aborts the batch.
    #[error("Corrupt task line '{line}': {source}")]
    Corrupt {
        line: String,
        #[source]
        source: DecodeError,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl TaskError {
    /// Classifies an encoder failure the way `add_task` reports it.
    pub(crate) fn from_add(err: FieldError) -> Self {
        match err {
            FieldError::Recurrence(_) => TaskError::InvalidRecurrence(err),
            _ => TaskError::InvalidTask(err),
        }
    }
}

/// Successful outcome of a mutating store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Added,
    Removed,
    Updated,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Added => "Task added successfully!",
            Status::Removed => "Task removed successfully!",
            Status::Updated => "Task updated successfully!",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        assert_eq!(Status::Added.to_string(), "Task added successfully!");
        assert_eq!(Status::Removed.to_string(), "Task removed successfully!");
        assert_eq!(Status::Updated.to_string(), "Task updated successfully!");
    }

    #[test]
    fn test_add_classification() {
        let err = TaskError::from_add(FieldError::Recurrence("everyday".into()));
        assert_eq!(err.to_string(), "Invalid recurrence type!");

        let err = TaskError::from_add(FieldError::Priority("CRITICAL".into()));
        assert_eq!(err.to_string(), "Invalid priority level or date format!");

        let err = TaskError::from_add(FieldError::DueDate("May 5, 2025".into()));
        assert_eq!(err.to_string(), "Invalid priority level or date format!");
    }
}
