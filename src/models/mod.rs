pub mod task;

pub use task::{NO_DEADLINE, Task, TaskId, deadline_from, parse_duration};
