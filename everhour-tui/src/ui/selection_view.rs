use super::*;

pub fn render_task_selection(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Task list
            Constraint::Length(3), // Controls
        ])
        .split(body);

    // Search input box with a block cursor
    let search_text = if app.search_input.value.is_empty() {
        "█".to_string()
    } else {
        let (before, after) = app.search_input.split_at_cursor();
        format!("{}█{}", before, after)
    };
    let search_box = Paragraph::new(search_text)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(search_box, chunks[0]);

    // Candidate list: task name plus a dimmed project label
    let items: Vec<ListItem> = app
        .search
        .candidates()
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let style = if i == app.selected_index {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![Span::styled(task.name.clone(), style)];
            let label = app.project_label(task);
            if !label.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", label),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = if app.search_input.value.is_empty() {
        format!(" Recent tasks ({}) ", app.search.candidates().len())
    } else {
        format!(" Results ({}) ", app.search.candidates().len())
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(list, chunks[1]);

    // Controls
    let controls_text = vec![
        Span::styled("Type", Style::default().fg(Color::Yellow)),
        Span::raw(": Search  "),
        Span::styled("↑↓", Style::default().fg(Color::Yellow)),
        Span::raw(": Navigate  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(": Start timer  "),
        Span::styled("Ctrl+X", Style::default().fg(Color::Yellow)),
        Span::raw(": Clear  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(": Cancel"),
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
    frame.render_widget(controls, chunks[2]);
}
