// File: ./src/model/matcher.rs
// Locating stored lines by what the user typed
use crate::model::Priority;
use crate::model::parser::LineParts;

/// How a user refers to an existing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskQuery {
    /// Trimmed, case-insensitive equality against the logical name.
    Name(String),
    /// The line must contain `[PRIORITY] name` verbatim.
    Exact { priority: Priority, name: String },
}

impl TaskQuery {
    pub fn new(name: &str, priority: Option<Priority>) -> Self {
        match priority {
            Some(priority) => TaskQuery::Exact {
                priority,
                name: name.to_string(),
            },
            None => TaskQuery::Name(name.to_string()),
        }
    }

    pub fn matches(&self, line: &str) -> bool {
        match self {
            TaskQuery::Name(name) => name_matches(line, name),
            TaskQuery::Exact { priority, name } => line.contains(&format!("[{}] {}", priority, name)),
        }
    }

    /// Index of the first matching line in store order.
    pub fn find_in(&self, lines: &[String]) -> Option<usize> {
        lines.iter().position(|l| self.matches(l))
    }
}

/// Exact logical-name match, never substring containment.
pub fn name_matches(line: &str, name: &str) -> bool {
    let wanted = name.trim().to_lowercase();
    if wanted.is_empty() {
        return false;
    }
    LineParts::split(line).is_some_and(|parts| parts.name.to_lowercase() == wanted)
}
