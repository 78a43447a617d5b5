use everhour::domain::Task;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone)]
pub(super) enum Action {
    /// Reconcile timer state with the server. Background polls keep quiet on
    /// transport failure; explicit refreshes report it.
    RefreshTimer { background: bool },
    StartTimer { task: Task },
    StopTimer,
    SearchTasks { query: String },
    LoadRecents,
    LoadProjects,
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
