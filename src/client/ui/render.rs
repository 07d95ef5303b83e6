//! Main client UI renderer.

use ratatui::layout::Flex;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::client::state::{ClientApp, NoticeKind, Screen};

use super::{auth, course, home, landing, preview};

/// Render the client UI based on current state.
pub fn render(frame: &mut Frame, app: &ClientApp) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).split(area);
    render_header(frame, chunks[0], app);

    match &app.screen {
        Screen::Landing { .. } => landing::render(frame, chunks[1], app),
        Screen::Login { .. } | Screen::Register { .. } | Screen::Recovery { .. } => {
            auth::render(frame, chunks[1], app)
        }
        Screen::Home { .. } => home::render(frame, chunks[1], app),
        Screen::Course { .. } => course::render(frame, chunks[1], app),
    }

    if let Some(course) = &app.preview {
        preview::render(frame, popup_area(area, 80, 80), course);
    }
    if let Some(notice) = &app.notice {
        render_notice(frame, area, notice.kind, &notice.message);
    }
    if let Some(message) = app.busy {
        render_busy(frame, area, message);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let user = match &app.session {
        Some(session) => format!("{} <{}>", session.user.name, session.user.email),
        None => "not logged in".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(" MICRO-CREDENTIALS ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(format!(" {} ", app.server), Style::default().fg(Color::DarkGray)),
        Span::styled(format!(" {}", user), Style::default().fg(Color::Green)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// A centered rectangle taking the given percentages of `area`.
pub(super) fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [area] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(area);
    area
}

fn render_notice(frame: &mut Frame, area: Rect, kind: NoticeKind, message: &str) {
    let (title, color) = match kind {
        NoticeKind::Info => (" Notice ", Color::Green),
        NoticeKind::Error => (" Error ", Color::Red),
    };

    let mut lines: Vec<Line> = message
        .lines()
        .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(Color::White))))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to continue",
        Style::default().fg(Color::DarkGray),
    )));

    let popup = popup_area(area, 60, 40);
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title)
                .title_style(Style::default().fg(color).bold())
                .padding(Padding::uniform(1)),
        );

    frame.render_widget(Clear, popup);
    frame.render_widget(widget, popup);
}

fn render_busy(frame: &mut Frame, area: Rect, message: &str) {
    let popup = popup_area(area, 40, 20);
    let widget = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::vertical(1)),
        );

    frame.render_widget(Clear, popup);
    frame.render_widget(widget, popup);
}
