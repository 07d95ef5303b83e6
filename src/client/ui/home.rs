//! Home screen of a logged-in user.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Padding, Paragraph, Tabs};

use crate::client::state::{ClientApp, HomeTab, Screen};
use crate::models::{Course, User};

/// Render the home screen.
pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let (Screen::Home { tab, selected }, Some(session)) = (&app.screen, &app.session) else {
        return;
    };
    let user = &session.user;

    let chunks = Layout::vertical([
        Constraint::Length(4), // User info
        Constraint::Length(1), // Tabs
        Constraint::Fill(1),   // Courses
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    render_user(frame, chunks[0], user);
    render_tabs(frame, chunks[1], user, *tab);
    render_courses(frame, chunks[2], app.home_courses(*tab), *tab, *selected);
    render_controls(frame, chunks[3], user.is_instructor());
}

fn render_user(frame: &mut Frame, area: Rect, user: &User) {
    let role = if user.is_instructor() {
        "Instructor"
    } else {
        "Learner"
    };
    let lines = vec![
        Line::from(Span::styled(
            format!("Welcome, {}", user.name),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(vec![
            Span::styled(user.email.clone(), Style::default().fg(Color::Gray)),
            Span::styled(format!("  ·  {}", role), Style::default().fg(Color::Green)),
        ]),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_tabs(frame: &mut Frame, area: Rect, user: &User, tab: HomeTab) {
    let mut titles = vec![format!("My Courses ({})", user.enrolled_courses().len())];
    if user.is_instructor() {
        titles.push(format!("Authored ({})", user.authored_courses().len()));
    }

    let tabs = Tabs::new(titles)
        .select(match tab {
            HomeTab::Learning => 0,
            HomeTab::Teaching => 1,
        })
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold());
    frame.render_widget(tabs, area);
}

fn render_courses(frame: &mut Frame, area: Rect, courses: &[Course], tab: HomeTab, selected: usize) {
    if courses.is_empty() {
        let message = match tab {
            HomeTab::Learning => "You are not enrolled in any course yet. Press c to browse the catalog.",
            HomeTab::Teaching => "You have not authored any course yet.",
        };
        let widget = Paragraph::new(message)
            .alignment(Alignment::Center)
            .fg(Color::DarkGray);
        frame.render_widget(widget, area);
        return;
    }

    let rows = Layout::vertical(courses.iter().map(|_| Constraint::Length(3))).split(area);
    for ((index, course), row) in courses.iter().enumerate().zip(rows.iter()) {
        render_course_row(frame, *row, course, tab, index == selected);
    }
}

fn render_course_row(frame: &mut Frame, area: Rect, course: &Course, tab: HomeTab, is_selected: bool) {
    let border = if is_selected { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", course.title))
        .title_style(Style::default().fg(Color::White).bold())
        .padding(Padding::horizontal(1));

    match tab {
        HomeTab::Learning => {
            let progress = course.calculate_progress();
            let label = if course.credential_earned == Some(true) {
                format!("{}%  credential earned", progress)
            } else {
                format!("{}%", progress)
            };
            let gauge = Gauge::default()
                .block(block)
                .gauge_style(Style::default().fg(progress_color(progress)))
                .percent(progress as u16)
                .label(label);
            frame.render_widget(gauge, area);
        }
        HomeTab::Teaching => {
            let widget = Paragraph::new(format!("{} components", course.components.len()))
                .fg(Color::Gray)
                .block(block);
            frame.render_widget(widget, area);
        }
    }
}

fn progress_color(progress: u32) -> Color {
    match progress {
        100 => Color::Green,
        50..=99 => Color::Cyan,
        _ => Color::Yellow,
    }
}

fn render_controls(frame: &mut Frame, area: Rect, is_instructor: bool) {
    let text = if is_instructor {
        "j/k select  ·  Enter open  ·  Tab switch list  ·  c catalog  ·  o log out  ·  q quit"
    } else {
        "j/k select  ·  Enter open  ·  c catalog  ·  o log out  ·  q quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
