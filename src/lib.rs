pub mod config;
pub mod error;
pub mod model;
pub mod storage;
pub mod store;

pub use error::{Status, TaskError};
pub use model::{Priority, Recurrence, Task};
pub use storage::{FileStorage, LineStorage, MemoryStorage};
pub use store::TaskStore;
