use std::time::Instant;

use anyhow::Result;
use everhour::{ApiError, EverhourClient};

use crate::app::App;
use crate::config::EverhourConfig;
use crate::sync::{Applied, TimerPhase};

use super::action_queue::Action;

const MSG_RELOGIN: &str = "Unauthorized. Run `everhour-tui login` with a fresh API token.";

pub(super) async fn run_action(
    action: Action,
    app: &mut App,
    client: &EverhourClient,
    cfg: &EverhourConfig,
) -> Result<()> {
    match action {
        Action::RefreshTimer { background } => refresh_timer(app, client, background).await,
        Action::StartTimer { task } => start_timer(app, client, cfg, &task.id).await,
        Action::StopTimer => stop_timer(app, client).await,
        Action::SearchTasks { query } => search_tasks(app, client, cfg, &query).await,
        Action::LoadRecents => load_recents(app, client, cfg).await,
        Action::LoadProjects => load_projects(app, client).await,
    }
    Ok(())
}

/// Poll the server for the current timer. A failed poll leaves state
/// untouched; the next scheduled poll still fires.
async fn refresh_timer(app: &mut App, client: &EverhourClient, background: bool) {
    let seq = app.sync.begin_request();
    match client.current_timer().await {
        Ok(timer) => {
            if app.sync.apply_refresh(seq, &timer) == Applied::Applied {
                app.last_poll = Some(Instant::now());
            }
            if !background {
                app.clear_status();
            }
        }
        Err(ApiError::Unauthorized) => app.set_status(MSG_RELOGIN),
        Err(e) => app.set_status(format!("Sync failed: {}", e)),
    }
}

async fn start_timer(app: &mut App, client: &EverhourClient, cfg: &EverhourConfig, task_id: &str) {
    let seq = app.sync.begin_request();
    app.sync.begin_start(seq);

    match client.start_timer(task_id).await {
        Ok(timer) => {
            app.sync.apply_start(seq, &timer);
            app.last_poll = Some(Instant::now());
            app.close_task_picker();
            app.clear_status();
            // The started task belongs at the top of the recents list.
            load_recents(app, client, cfg).await;
        }
        Err(ApiError::Unauthorized) => app.set_status(MSG_RELOGIN),
        Err(e) => app.set_status(format!("Could not start timer: {}", e)),
    }
}

async fn stop_timer(app: &mut App, client: &EverhourClient) {
    if !matches!(app.sync.phase(), TimerPhase::Active(_)) {
        app.set_status("No active timer");
        return;
    }

    let seq = app.sync.begin_request();
    app.sync.begin_stop(seq);

    match client.stop_timer().await {
        Ok(_) => {
            app.sync.apply_stop(seq);
            app.last_poll = Some(Instant::now());
            app.clear_status();
        }
        // Nothing was running server-side; already stopped.
        Err(ApiError::NotFound) => {
            app.sync.fail_stop(seq, true);
            app.last_poll = Some(Instant::now());
        }
        Err(ApiError::Unauthorized) => {
            app.sync.fail_stop(seq, false);
            app.set_status(MSG_RELOGIN);
        }
        Err(e) => {
            app.sync.fail_stop(seq, false);
            app.set_status(format!("Could not stop timer: {}", e));
        }
    }
}

async fn search_tasks(app: &mut App, client: &EverhourClient, cfg: &EverhourConfig, query: &str) {
    if query.is_empty() {
        app.search.clear_results();
        app.reset_selection();
        return;
    }

    let seq = app.search.begin_query();
    match client.search_tasks(query, cfg.search_limit).await {
        Ok(tasks) => {
            if app.search.apply_results(seq, tasks) == Applied::Applied {
                app.reset_selection();
            }
        }
        Err(ApiError::Unauthorized) => app.set_status(MSG_RELOGIN),
        Err(e) => app.set_status(format!("Search failed: {}", e)),
    }
}

async fn load_recents(app: &mut App, client: &EverhourClient, cfg: &EverhourConfig) {
    // The recents endpoint needs the user id; fetch and cache it once.
    if app.user.is_none() {
        match client.me().await {
            Ok(user) => app.user = Some(user),
            Err(ApiError::Unauthorized) => {
                app.set_status(MSG_RELOGIN);
                return;
            }
            Err(e) => {
                app.set_status(format!("Could not load user: {}", e));
                return;
            }
        }
    }
    let user_id = app.user.as_ref().map(|u| u.id).unwrap_or_default();

    match client.recent_tasks(user_id, cfg.recent_limit).await {
        Ok(tasks) => app.search.set_recents(tasks),
        Err(ApiError::Unauthorized) => app.set_status(MSG_RELOGIN),
        Err(e) => app.set_status(format!("Could not load recent tasks: {}", e)),
    }
}

async fn load_projects(app: &mut App, client: &EverhourClient) {
    // Limit 0 leaves the result count to the server.
    match client.projects("", 0).await {
        Ok(projects) => app.set_projects(projects),
        Err(ApiError::Unauthorized) => app.set_status(MSG_RELOGIN),
        Err(e) => app.set_status(format!("Could not load projects: {}", e)),
    }
}
