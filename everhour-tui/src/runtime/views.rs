use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, View};

use super::action_queue::{Action, ActionTx};

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match app.current_view {
        View::Timer => handle_timer_key(key, app, action_tx),
        View::SelectTask => handle_select_task_key(key, app, action_tx),
    }
}

fn handle_timer_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.running = false;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('s') => {
            app.open_task_picker();
        }
        KeyCode::Char('x') => {
            enqueue_action(action_tx, Action::StopTimer);
        }
        KeyCode::Char('r') => {
            enqueue_action(action_tx, Action::RefreshTimer { background: false });
        }
        _ => {}
    }
}

fn handle_select_task_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Esc => {
            app.close_task_picker();
        }
        KeyCode::Enter => {
            if let Some(task) = app.selected_task().cloned() {
                enqueue_action(action_tx, Action::StartTimer { task });
            }
        }
        KeyCode::Up => {
            app.select_previous();
        }
        KeyCode::Down => {
            app.select_next();
        }
        KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input.clear();
            enqueue_action(
                action_tx,
                Action::SearchTasks {
                    query: String::new(),
                },
            );
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input.insert(c);
            enqueue_action(
                action_tx,
                Action::SearchTasks {
                    query: app.search_input.value.clone(),
                },
            );
        }
        KeyCode::Backspace => {
            app.search_input.backspace();
            enqueue_action(
                action_tx,
                Action::SearchTasks {
                    query: app.search_input.value.clone(),
                },
            );
        }
        KeyCode::Left => {
            app.search_input.move_left();
        }
        KeyCode::Right => {
            app.search_input.move_right();
        }
        KeyCode::Home => {
            app.search_input.home();
        }
        KeyCode::End => {
            app.search_input.end();
        }
        _ => {}
    }
}
