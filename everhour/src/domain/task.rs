use serde::{Deserialize, Serialize};

/// A unit of billable work. Read-only from the client's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    /// Ids of the projects this task belongs to. May be empty; display logic
    /// must cope with a task that carries no project.
    #[serde(default)]
    pub projects: Vec<String>,
}

impl Task {
    /// The primary project id, if the task has one.
    pub fn primary_project(&self) -> Option<&str> {
        self.projects.first().map(String::as_str)
    }
}
