// File: ./src/model/mod.rs
// Aggregates the split model files
pub mod item;
pub mod matcher;
pub mod parser;
pub mod recurrence;

pub use item::{Priority, Recurrence, Task};
pub use matcher::TaskQuery;
pub use parser::{LineParts, format_task};
pub use recurrence::{process_recurring_tasks, renew_line};
