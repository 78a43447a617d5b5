use anyhow::Result;
use crossterm::event::{self, Event};
use everhour::EverhourClient;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use crate::app::App;
use crate::config::EverhourConfig;
use crate::ui;

use super::action_queue::{channel, Action};
use super::actions::run_action;
use super::views::handle_view_key;

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &EverhourClient,
    cfg: &EverhourConfig,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();

    // Initial load: cached lists are already applied; reconcile with the
    // server right away.
    app.is_loading = true;
    let _ = action_tx.send(Action::RefreshTimer { background: false });
    let _ = action_tx.send(Action::LoadProjects);
    let _ = action_tx.send(Action::LoadRecents);

    let poll_interval = Duration::from_secs(cfg.poll_interval_secs.max(1));
    let loading_until = Instant::now() + Duration::from_secs(3);
    let mut last_poll_attempt = Instant::now();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.is_loading {
            app.throbber_state.calc_next();
            if app.last_poll.is_some() || Instant::now() >= loading_until {
                app.is_loading = false;
            }
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_view_key(key, app, &action_tx);
            }
        }

        // Cosmetic once-per-second display increment, live only while the
        // engine is in the Active phase.
        if last_tick.elapsed() >= Duration::from_secs(1) {
            if app.sync.is_ticking() {
                app.sync.tick();
            }
            last_tick = Instant::now();
        }

        if last_poll_attempt.elapsed() >= poll_interval {
            let _ = action_tx.send(Action::RefreshTimer { background: true });
            last_poll_attempt = Instant::now();
        }

        while let Ok(action) = action_rx.try_recv() {
            run_action(action, app, client, cfg).await?;
        }

        if !app.running {
            // Teardown: the queue is dropped with us; anything still in it is
            // discarded.
            break;
        }
    }

    Ok(())
}
