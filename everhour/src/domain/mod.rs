mod project;
mod task;
mod time_record;
mod timer;
mod user;

pub use project::Project;
pub use task::Task;
pub use time_record::{distinct_tasks, TimeRecord};
pub use timer::{Timer, TimerStatus};
pub use user::User;
