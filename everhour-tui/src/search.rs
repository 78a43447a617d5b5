//! Candidate supply for the task picker.
//!
//! An empty query serves the cached recent-tasks list without a network call;
//! a non-empty query is answered by a live server-side search. Results of
//! distinct queries are never cached, and each query carries its own sequence
//! number so a slow response cannot overwrite the list for a newer keystroke.

use std::collections::HashMap;

use everhour::domain::{Project, Task};

use crate::sync::{Applied, Seq};

#[derive(Debug, Default)]
pub struct TaskSearch {
    recents: Vec<Task>,
    results: Option<Vec<Task>>,
    next_seq: Seq,
    applied_seq: Seq,
}

impl TaskSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_recents(&mut self, tasks: Vec<Task>) {
        self.recents = tasks;
    }

    pub fn recents(&self) -> &[Task] {
        &self.recents
    }

    /// Candidates for the current query: live results when a search has been
    /// applied, the recents list otherwise.
    pub fn candidates(&self) -> &[Task] {
        match &self.results {
            Some(results) => results,
            None => &self.recents,
        }
    }

    /// Drop live results, falling back to the recents list. Called when the
    /// query becomes empty. The clear counts as an application of its own, so
    /// anything still in flight for an abandoned query gets discarded.
    pub fn clear_results(&mut self) {
        self.results = None;
        let seq = self.begin_query();
        self.applied_seq = seq;
    }

    /// Allocate the sequence number for an outgoing search.
    pub fn begin_query(&mut self) -> Seq {
        self.next_seq += 1;
        self.next_seq
    }

    pub fn apply_results(&mut self, seq: Seq, tasks: Vec<Task>) -> Applied {
        if seq < self.applied_seq {
            return Applied::Stale;
        }
        self.applied_seq = seq;
        self.results = Some(tasks);
        Applied::Applied
    }
}

/// Project label shown under a candidate. Resolves the task's first project
/// id against the cached project map; blank when the task has no project or
/// the id is unknown.
pub fn project_label(task: &Task, projects: &HashMap<String, Project>) -> String {
    task.primary_project()
        .and_then(|id| projects.get(id))
        .map(|p| p.name.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, projects: Vec<&str>) -> Task {
        Task {
            id: id.to_string(),
            name: format!("task {}", id),
            projects: projects.into_iter().map(str::to_string).collect(),
        }
    }

    #[test]
    fn empty_query_serves_recents_without_results() {
        let mut search = TaskSearch::new();
        search.set_recents(vec![task("a", vec![]), task("b", vec![])]);
        assert_eq!(search.candidates().len(), 2);
        assert_eq!(search.candidates()[0].id, "a");
    }

    #[test]
    fn applied_results_replace_recents_until_cleared() {
        let mut search = TaskSearch::new();
        search.set_recents(vec![task("a", vec![])]);

        let seq = search.begin_query();
        search.apply_results(seq, vec![task("x", vec![]), task("y", vec![])]);
        assert_eq!(search.candidates().len(), 2);

        search.clear_results();
        assert_eq!(search.candidates()[0].id, "a");
    }

    #[test]
    fn stale_response_does_not_overwrite_newer_results() {
        let mut search = TaskSearch::new();
        let old_seq = search.begin_query();
        let new_seq = search.begin_query();

        search.apply_results(new_seq, vec![task("new", vec![])]);
        assert_eq!(
            search.apply_results(old_seq, vec![task("old", vec![])]),
            Applied::Stale
        );
        assert_eq!(search.candidates()[0].id, "new");
    }

    #[test]
    fn response_for_abandoned_query_is_discarded_after_clear() {
        let mut search = TaskSearch::new();
        search.set_recents(vec![task("a", vec![])]);

        let seq = search.begin_query();
        search.clear_results();
        assert_eq!(search.apply_results(seq, vec![task("x", vec![])]), Applied::Stale);
        assert_eq!(search.candidates()[0].id, "a");
    }

    #[test]
    fn project_label_is_blank_without_projects() {
        let projects = HashMap::from([(
            "pr:1".to_string(),
            Project {
                id: "pr:1".to_string(),
                name: "Website".to_string(),
            },
        )]);

        assert_eq!(project_label(&task("a", vec!["pr:1"]), &projects), "Website");
        assert_eq!(project_label(&task("b", vec![]), &projects), "");
        assert_eq!(project_label(&task("c", vec!["pr:unknown"]), &projects), "");
    }
}
