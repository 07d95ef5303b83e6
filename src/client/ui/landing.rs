//! Public course catalog.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap};

use crate::client::state::{ClientApp, LandingFocus, Screen};
use crate::models::{Course, CourseComponent};

/// Render the landing screen.
pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let Screen::Landing {
        search,
        selected,
        focus,
    } = &app.screen
    else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3), // Search box
        Constraint::Fill(1),   // Catalog
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    render_search(frame, chunks[0], search.value("query"), *focus == LandingFocus::Search);

    let columns =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).split(chunks[1]);
    render_catalog(frame, columns[0], app, *selected);
    render_detail(frame, columns[1], app.catalog.visible_at(*selected));

    render_controls(frame, chunks[2], *focus);
}

fn render_search(frame: &mut Frame, area: Rect, query: &str, focused: bool) {
    let border = if focused { Color::Yellow } else { Color::DarkGray };
    let mut spans = vec![Span::styled(query.to_string(), Style::default().fg(Color::Yellow))];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    }

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Search ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_catalog(frame: &mut Frame, area: Rect, app: &ClientApp, selected: usize) {
    let items: Vec<ListItem> = app
        .catalog
        .visible()
        .map(|course| ListItem::new(course.title.clone()))
        .collect();

    let title = if app.catalog.query().is_empty() {
        format!(" Courses ({}) ", app.catalog.visible_len())
    } else {
        format!(
            " Courses matching \"{}\" ({}) ",
            app.catalog.query(),
            app.catalog.visible_len()
        )
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title)
                .title_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if app.catalog.visible_len() > 0 {
        state.select(Some(selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_detail(frame: &mut Frame, area: Rect, course: Option<&Course>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Course ")
        .title_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let Some(course) = course else {
        let widget = Paragraph::new("No courses to show.")
            .fg(Color::DarkGray)
            .block(block);
        frame.render_widget(widget, area);
        return;
    };

    let assessments = course
        .components
        .iter()
        .filter(|component| component.is_assessment())
        .count();

    let mut lines = vec![
        Line::from(Span::styled(
            course.title.clone(),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(""),
    ];
    if !course.instructor.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Instructor: ", Style::default().fg(Color::DarkGray)),
            Span::styled(course.instructor.clone(), Style::default().fg(Color::Green)),
        ]));
    }
    lines.push(Line::from(Span::styled(
        format!(
            "{} modules, {} assessments",
            course.components.len() - assessments,
            assessments
        ),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(course.description.clone()));
    lines.push(Line::from(""));
    for (index, component) in course.components.iter().enumerate() {
        let marker = match component {
            CourseComponent::Module(_) => "M",
            CourseComponent::Assessment(_) => "A",
        };
        lines.push(Line::from(Span::styled(
            format!("{:2}. [{}] {}", index + 1, marker, component.title()),
            Style::default().fg(Color::Gray),
        )));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, focus: LandingFocus) {
    let text = match focus {
        LandingFocus::Search => "type to search  ·  Enter apply  ·  Esc clear  ·  Tab courses",
        LandingFocus::List => {
            "j/k select  ·  Enter details  ·  / search  ·  l log in  ·  r reload  ·  q quit"
        }
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
