//! Read-only course overview with answers, shown over another screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::client::state::CoursePreview;
use crate::models::{CourseComponent, Question};

pub fn render(frame: &mut Frame, area: Rect, preview: &CoursePreview) {
    let course = &preview.course;
    let mut lines = vec![
        Line::from(Span::styled(
            course.title.clone(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(course.description.clone()),
        Line::from(""),
    ];

    for component in &course.components {
        match component {
            CourseComponent::Module(module) => {
                lines.push(Line::from(vec![
                    Span::styled("Module: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(module.title.clone(), Style::default().fg(Color::White).bold()),
                    Span::styled(format!("  ({:?})", module.kind), Style::default().fg(Color::DarkGray)),
                ]));
                if !module.description.is_empty() {
                    lines.push(Line::from(format!("  {}", module.description)));
                }
            }
            CourseComponent::Assessment(assessment) => {
                lines.push(Line::from(vec![
                    Span::styled("Assessment: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        assessment.title.clone(),
                        Style::default().fg(Color::White).bold(),
                    ),
                    Span::styled(
                        format!("  ({} questions)", assessment.questions.len()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]));
                if preview.show_answers {
                    for (index, question) in assessment.questions.iter().enumerate() {
                        lines.push(Line::from(format!("  {}. {}", index + 1, question.question)));
                        lines.push(Line::from(Span::styled(
                            format!(
                                "     {}) {}",
                                Question::option_label(question.correct_option),
                                question.correct_answer().unwrap_or("?")
                            ),
                            Style::default().fg(Color::Green),
                        )));
                    }
                }
            }
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Esc to close",
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Course Overview ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::uniform(1)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(widget, area);
}
