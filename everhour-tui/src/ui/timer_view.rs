use super::*;
use crate::sync::TimerPhase;
use crate::time_utils::{format_hm, format_hms};

pub fn render_timer_view(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Min(0),    // Timer panel
            Constraint::Length(3), // Controls
        ])
        .split(body);

    let mut lines: Vec<Line> = Vec::new();
    match app.sync.phase() {
        TimerPhase::Unknown => {
            lines.push(Line::from(Span::styled(
                "Syncing with Everhour...",
                Style::default().fg(Color::DarkGray),
            )));
        }
        TimerPhase::Idle => {
            lines.push(Line::from(Span::styled(
                "No active timer",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from("Press s to pick a task and start tracking."));
        }
        TimerPhase::Active(timer) | TimerPhase::Stopping(timer) => {
            let stopping = matches!(app.sync.phase(), TimerPhase::Stopping(_));

            let mut title = vec![Span::styled(
                timer.task_name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )];
            let project_name = timer
                .project_id
                .as_deref()
                .and_then(|id| app.projects.get(id))
                .map(|p| p.name.clone());
            if let Some(name) = project_name {
                title.push(Span::styled(
                    format!("  {}", name),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            if stopping {
                title.push(Span::styled(
                    "  (stopping)",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            lines.push(Line::from(title));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format_hms(timer.duration_secs),
                Style::default()
                    .fg(if stopping { Color::DarkGray } else { Color::Green })
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                format!("today {}", format_hm(timer.today_secs)),
                Style::default().fg(Color::DarkGray),
            )));
            if let Some(comment) = &timer.comment {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    comment.clone(),
                    Style::default().fg(Color::Gray),
                )));
            }
        }
    }

    let panel = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Timer ")
            .padding(Padding::uniform(1)),
    );
    frame.render_widget(panel, chunks[0]);

    let controls_text = vec![
        Span::styled("s", Style::default().fg(Color::Yellow)),
        Span::raw(": Start  "),
        Span::styled("x", Style::default().fg(Color::Yellow)),
        Span::raw(": Stop  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(": Refresh  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(": Quit"),
    ];
    let controls = Paragraph::new(Line::from(controls_text))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " Controls ",
                    Style::default().fg(Color::DarkGray),
                )),
        );
    frame.render_widget(controls, chunks[1]);
}
