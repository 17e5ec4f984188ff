pub mod search;
pub mod store;
pub mod ticker;

pub use search::SearchFilter;
pub use store::{StoreError, TaskStore};
pub use ticker::{AlertMode, CountdownFormat, DeadlineAlert, DeadlineTicker};
