use serde::Deserialize;

use super::Task;

/// One recent time entry as returned by `GET /users/{id}/time`, embedding the
/// task it was tracked against.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeRecord {
    #[serde(default)]
    pub task: Option<Task>,
    /// Seconds tracked in this entry.
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub date: String,
}

/// Collapse a list of time records into their distinct tasks, most recent
/// first. Entries without a task (e.g. deleted tasks) are skipped.
pub fn distinct_tasks(records: Vec<TimeRecord>) -> Vec<Task> {
    let mut tasks: Vec<Task> = Vec::new();
    for record in records {
        let Some(task) = record.task else {
            continue;
        };
        if !tasks.iter().any(|t| t.id == task.id) {
            tasks.push(task);
        }
    }
    tasks
}
