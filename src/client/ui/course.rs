//! Course taking screen: modules and assessments.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap};

use crate::client::state::{ClientApp, Screen};
use crate::models::{Assessment, Course, CourseComponent, Module, Question};

/// Render the course screen.
pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let (Screen::Course {
        selected_option, ..
    }, Some(course)) = (&app.screen, app.active_course())
    else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3), // Progress
        Constraint::Fill(1),   // Component
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], course);

    match course.current_component() {
        None => render_completed(frame, chunks[1], course),
        Some(CourseComponent::Module(module)) => render_module(frame, chunks[1], module),
        Some(CourseComponent::Assessment(assessment)) if assessment.is_completed() => {
            render_score(frame, chunks[1], assessment)
        }
        Some(CourseComponent::Assessment(assessment)) => {
            render_question(frame, chunks[1], assessment, *selected_option)
        }
    }

    let controls = match course.current_component() {
        Some(CourseComponent::Assessment(assessment)) if !assessment.is_completed() => {
            "j/k or arrows to select  ·  Enter/Space to answer  ·  Esc back"
        }
        Some(_) => "Enter continue  ·  Esc back",
        None => "Esc back",
    };
    let widget = Paragraph::new(controls)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, chunks[2]);
}

fn render_progress(frame: &mut Frame, area: Rect, course: &Course) {
    let progress = course.calculate_progress();
    let position = (course.current_component + 1).min(course.components.len());
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", course.title))
                .title_style(Style::default().fg(Color::Cyan).bold()),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(progress as u16)
        .label(format!(
            "Component {} of {}  ·  {}%",
            position,
            course.components.len(),
            progress
        ));
    frame.render_widget(gauge, area);
}

fn section(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1))
}

fn render_module(frame: &mut Frame, area: Rect, module: &Module) {
    let media = if module.is_audio() {
        "Audio"
    } else if module.is_video() {
        "Video"
    } else if module.is_markdown() {
        "Reading"
    } else {
        "Content"
    };

    let mut lines = vec![
        Line::from(Span::styled(media, Style::default().fg(Color::Green).bold())),
        Line::from(""),
        Line::from(module.description.clone()),
        Line::from(""),
        Line::from(vec![
            Span::styled("Open: ", Style::default().fg(Color::DarkGray)),
            Span::styled(module.url.clone(), Style::default().fg(Color::Yellow)),
        ]),
    ];
    if module.has_chapters() {
        let count = module.chapters.as_ref().map_or(0, Vec::len);
        lines.push(Line::from(Span::styled(
            format!("{} chapters", count),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(section(&module.title));
    frame.render_widget(widget, area);
}

fn render_question(frame: &mut Frame, area: Rect, assessment: &Assessment, selected: usize) {
    let Some(question) = assessment.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1), // Counter
        Constraint::Length(5), // Question text
        Constraint::Fill(1),   // Options
    ])
    .split(area);

    let counter = Paragraph::new(format!(
        "{}  ·  Question {} of {}  ·  {} answered",
        assessment.title,
        assessment.current_question_index() + 1,
        assessment.questions.len(),
        assessment.answered_count()
    ))
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(counter, chunks[0]);

    let text = Paragraph::new(question.question.clone())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(section("Question"));
    frame.render_widget(text, chunks[1]);

    let lines: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let is_selected = i == selected;
            let prefix = if is_selected { "> " } else { "  " };
            let style = if is_selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(format!("{}) ", Question::option_label(i)), style),
                Span::styled(option.clone(), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(section("Options")), chunks[2]);
}

fn render_score(frame: &mut Frame, area: Rect, assessment: &Assessment) {
    let score = assessment.calculate_score();
    let grade_color = match score {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                "{} / {}  ({}%)",
                assessment.correct_count(),
                assessment.questions.len(),
                score
            ),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(""),
    ];

    for (index, question) in assessment.questions.iter().enumerate() {
        let (symbol, color) = if question.is_correct() {
            ("+", Color::Green)
        } else {
            ("-", Color::Red)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
            Span::styled(format!("{:2}. ", index + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(question.question.clone(), Style::default().fg(Color::Gray)),
        ]));
        if !question.is_correct() && !question.explanation.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("      {}", question.explanation),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(section("Results"));
    frame.render_widget(widget, area);
}

fn render_completed(frame: &mut Frame, area: Rect, course: &Course) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "COURSE COMPLETED",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from(""),
        Line::from(format!("You earned the credential for \"{}\".", course.title)),
    ];
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(section("Credential"));
    frame.render_widget(widget, area);
}
