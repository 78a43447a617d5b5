use crate::app::{App, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

mod selection_view;
mod timer_view;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(frame.area());

    render_status_bar(frame, root[0], app);

    let body = root[1];
    match app.current_view {
        View::Timer => timer_view::render_timer_view(frame, app, body),
        View::SelectTask => selection_view::render_task_selection(frame, app, body),
    }
}

/// Single-line status widget: timer state on the left, errors or poll
/// freshness on the right.
fn render_status_bar(frame: &mut Frame, area: Rect, app: &mut App) {
    let mut spans = vec![
        Span::styled(
            app.sync.status_line(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];

    if let Some(message) = &app.status_message {
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ));
    } else if let Some(last_poll) = app.last_poll {
        spans.push(Span::styled(
            format!("synced {}s ago", last_poll.elapsed().as_secs()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    if app.is_loading && area.width > 2 {
        let spinner_area = Rect {
            x: area.right().saturating_sub(2),
            y: area.y,
            width: 1,
            height: 1,
        };
        let throbber = throbber_widgets_tui::Throbber::default()
            .throbber_style(Style::default().fg(Color::Yellow))
            .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
            .use_type(throbber_widgets_tui::WhichUse::Spin);
        frame.render_stateful_widget(throbber, spinner_area, &mut app.throbber_state);
    }
}
