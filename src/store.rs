// File: ./src/store.rs
// Task list operations over an injected line storage
use crate::error::{Status, TaskError};
use crate::model::item::parse_date;
use crate::model::parser::{LineParts, priority_rank, render_line};
use crate::model::{Priority, Task, TaskQuery, process_recurring_tasks};
use crate::storage::LineStorage;
use chrono::{Local, NaiveDate};

/// Owns the canonical lines for the duration of a session.
///
/// Every mutating operation works on a copy of the lines, persists it with a
/// single `save_lines` call and only then replaces the in-memory state, so a
/// failed operation leaves both memory and storage untouched.
pub struct TaskStore<S: LineStorage> {
    storage: S,
    lines: Vec<String>,
    today: Option<NaiveDate>,
}

impl<S: LineStorage> TaskStore<S> {
    pub fn open(storage: S) -> Result<Self, TaskError> {
        let lines = storage.load_lines()?;
        Ok(Self {
            storage,
            lines,
            today: None,
        })
    }

    /// Pins the date recurrence processing compares against.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Lines in store (insertion) order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Persists and consumes the store.
    pub fn close(self) -> Result<S, TaskError> {
        self.storage.save_lines(&self.lines)?;
        Ok(self.storage)
    }

    pub fn reload(&mut self) -> Result<(), TaskError> {
        self.lines = self.storage.load_lines()?;
        Ok(())
    }

    fn commit(&mut self, next: Vec<String>) -> Result<(), TaskError> {
        self.storage.save_lines(&next)?;
        self.lines = next;
        Ok(())
    }

    /// Adds a task. `priority` defaults to MEDIUM.
    pub fn add_task(
        &mut self,
        name: &str,
        priority: Option<&str>,
        due: Option<&str>,
        recurring: Option<&str>,
    ) -> Result<Status, TaskError> {
        let priority = priority.unwrap_or(Priority::default().as_str());
        let task =
            Task::parse_fields(name, priority, due, recurring).map_err(TaskError::from_add)?;
        let line = task.to_line();
        if self.lines.contains(&line) {
            return Err(TaskError::Duplicate);
        }

        let mut next = self.lines.clone();
        next.push(line);
        self.commit(next)?;
        tracing::info!(task = %task, "task added");
        Ok(Status::Added)
    }

    /// Removes the first matching task in store order. With a priority the
    /// line must contain `[PRIORITY] name`; without one the logical name must
    /// match exactly, ignoring case and surrounding whitespace.
    pub fn remove_task(&mut self, name: &str, priority: Option<&str>) -> Result<Status, TaskError> {
        let priority = priority
            .map(str::parse::<Priority>)
            .transpose()
            .map_err(TaskError::InvalidPriority)?;
        let idx = TaskQuery::new(name, priority)
            .find_in(&self.lines)
            .ok_or(TaskError::NotFound)?;

        let mut next = self.lines.clone();
        let removed = next.remove(idx);
        self.commit(next)?;
        tracing::info!(task = %removed, "task removed");
        Ok(Status::Removed)
    }

    /// Changes priority and/or due date of the task whose logical name matches
    /// `name`. Unspecified fields keep their old values and an existing
    /// recurrence tag is carried over verbatim.
    pub fn update_task(
        &mut self,
        name: &str,
        priority: Option<&str>,
        due: Option<&str>,
    ) -> Result<Status, TaskError> {
        let idx = TaskQuery::new(name, None)
            .find_in(&self.lines)
            .ok_or(TaskError::NotFound)?;
        let old = &self.lines[idx];
        let parts = LineParts::split(old).ok_or(TaskError::NotFound)?;

        let new_priority = match priority {
            Some(p) => p
                .parse::<Priority>()
                .map_err(TaskError::InvalidPriority)?
                .as_str()
                .to_string(),
            None => parts.priority.trim().to_uppercase(),
        };

        let new_due = match due {
            Some(d) => Some(parse_date(d).map_err(TaskError::InvalidDate)?),
            None => parts.due.and_then(|d| match parse_date(d) {
                Ok(date) => Some(date),
                Err(_) => {
                    tracing::warn!(line = %old, "dropping unparsable due date on update");
                    None
                }
            }),
        };

        let tag = LineParts::recurring_tag(old).unwrap_or("");
        let line = render_line(&new_priority, parts.name, new_due, tag);
        if self
            .lines
            .iter()
            .enumerate()
            .any(|(i, l)| i != idx && *l == line)
        {
            return Err(TaskError::Duplicate);
        }

        let mut next = self.lines.clone();
        tracing::info!(from = %next[idx], to = %line, "task updated");
        next[idx] = line;
        self.commit(next)?;
        Ok(Status::Updated)
    }

    /// Appends renewals for every recurring task due on or before today.
    /// Returns how many lines were added. A corrupt recurring line aborts
    /// the batch without writing anything.
    pub fn process_recurring(&mut self) -> Result<usize, TaskError> {
        let renewals = process_recurring_tasks(&self.lines, self.today())?;
        if renewals.is_empty() {
            return Ok(0);
        }
        let count = renewals.len();
        let mut next = self.lines.clone();
        next.extend(renewals);
        self.commit(next)?;
        Ok(count)
    }

    /// Rolls recurring tasks, reloads from storage and returns the lines
    /// ordered by priority rank, then lexically.
    pub fn list_tasks(&mut self) -> Result<Vec<String>, TaskError> {
        self.process_recurring()?;
        self.reload()?;
        let mut sorted = self.lines.clone();
        sorted.sort_by(|a, b| {
            priority_rank(a)
                .cmp(&priority_rank(b))
                .then_with(|| a.cmp(b))
        });
        Ok(sorted)
    }
}
