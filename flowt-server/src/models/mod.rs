//! Request and response models
//!
//! Request shapes are deserialized by the HTTP layer and checked here
//! before any SQL runs. Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod title;
pub mod task;
pub mod pagination;
pub mod params;
pub mod bodies;
pub mod timestamp;

pub use validation::ValidationError;
pub use title::TaskTitle;
pub use task::{Assignment, BulkTaskUpdate, Column, FieldValue, NewTask, Task, TaskCreate, TaskUpdate};
pub use pagination::{Page, PageParams};
pub use params::{OverdueParams, PriorityParams, SearchParams, SortField, SortParams};
pub use timestamp::UtcTimestamp;
pub use bodies::{AssignBody, CommentBody, PriorityBody, ReminderBody};
