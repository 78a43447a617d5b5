use std::collections::HashMap;
use std::time::Instant;

use everhour::domain::{Project, Task, User};

use crate::search::{self, TaskSearch};
use crate::store::DomainCache;
use crate::sync::TimerSync;

mod state;
pub use state::{TextInput, View};

pub struct App {
    pub running: bool,
    pub current_view: View,
    pub sync: TimerSync,
    pub search: TaskSearch,
    pub status_message: Option<String>,

    // Session cache (persisted to cache.json on exit)
    pub user: Option<User>,
    pub projects: HashMap<String, Project>,

    // Task picker
    pub search_input: TextInput,
    pub selected_index: usize,

    // Loading indicator
    pub is_loading: bool,
    pub throbber_state: throbber_widgets_tui::ThrobberState,

    /// When the timer state was last reconciled with the server.
    pub last_poll: Option<Instant>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            current_view: View::Timer,
            sync: TimerSync::new(),
            search: TaskSearch::new(),
            status_message: None,
            user: None,
            projects: HashMap::new(),
            search_input: TextInput::new(),
            selected_index: 0,
            is_loading: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            last_poll: None,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn open_task_picker(&mut self) {
        self.current_view = View::SelectTask;
        self.search_input.clear();
        self.search.clear_results();
        self.selected_index = 0;
    }

    pub fn close_task_picker(&mut self) {
        self.current_view = View::Timer;
        self.search_input.clear();
        self.search.clear_results();
        self.selected_index = 0;
    }

    pub fn select_next(&mut self) {
        let len = self.search.candidates().len();
        if len > 0 {
            self.selected_index = (self.selected_index + 1) % len;
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.search.candidates().len();
        if len > 0 {
            self.selected_index = (self.selected_index + len - 1) % len;
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.search.candidates().get(self.selected_index)
    }

    /// Clamp the selection after the candidate list changed.
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
    }

    pub fn project_label(&self, task: &Task) -> String {
        search::project_label(task, &self.projects)
    }

    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects.into_iter().map(|p| (p.id.clone(), p)).collect();
    }

    pub fn apply_cache(&mut self, cache: DomainCache) {
        self.user = cache.user;
        self.search.set_recents(cache.recent_tasks);
        self.set_projects(cache.projects);
    }

    pub fn to_cache(&self) -> DomainCache {
        DomainCache {
            user: self.user.clone(),
            recent_tasks: self.search.recents().to_vec(),
            projects: self.projects.values().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            name: id.to_string(),
            projects: vec![],
        }
    }

    #[test]
    fn selection_wraps_both_directions() {
        let mut app = App::new();
        app.search.set_recents(vec![task("a"), task("b"), task("c")]);

        app.select_previous();
        assert_eq!(app.selected_task().unwrap().id, "c");
        app.select_next();
        assert_eq!(app.selected_task().unwrap().id, "a");
    }

    #[test]
    fn selection_is_noop_on_empty_candidates() {
        let mut app = App::new();
        app.select_next();
        app.select_previous();
        assert!(app.selected_task().is_none());
    }

    #[test]
    fn cache_round_trip_preserves_user_and_projects() {
        let mut app = App::new();
        app.user = Some(User {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        });
        app.set_projects(vec![Project {
            id: "pr:1".to_string(),
            name: "Website".to_string(),
        }]);
        app.search.set_recents(vec![task("a")]);

        let cache = app.to_cache();
        let mut restored = App::new();
        restored.apply_cache(cache);

        assert_eq!(restored.user.as_ref().unwrap().name, "Ada");
        assert_eq!(restored.projects["pr:1"].name, "Website");
        assert_eq!(restored.search.recents().len(), 1);
    }
}
