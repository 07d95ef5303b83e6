//! Rendering of `Form` controls.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::form::{Control, FieldKind, Form};

/// Render every visible control of `form`, one line each.
pub fn render(frame: &mut Frame, area: Rect, form: &Form, title: &str) {
    let lines: Vec<Line> = form
        .controls()
        .iter()
        .enumerate()
        .filter(|(_, control)| control.kind != FieldKind::Hidden)
        .map(|(index, control)| control_line(control, index == form.focused_index()))
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::uniform(1)),
    );

    frame.render_widget(widget, area);
}

fn control_line(control: &Control, focused: bool) -> Line<'static> {
    let prefix = if focused { "> " } else { "  " };
    let label_style = if focused {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::White)
    };

    match control.kind {
        FieldKind::Submit | FieldKind::Button => Line::from(vec![
            Span::styled(prefix, label_style),
            Span::styled(format!("[ {} ]", control.label), label_style),
        ]),
        FieldKind::Checkbox | FieldKind::Radio => Line::from(vec![
            Span::styled(prefix, label_style),
            Span::styled(
                if control.checked { "[x] " } else { "[ ] " },
                label_style,
            ),
            Span::styled(control.label.clone(), label_style),
        ]),
        FieldKind::Select => Line::from(vec![
            Span::styled(prefix, label_style),
            Span::styled(format!("{}: ", control.label), label_style),
            Span::styled(
                format!("< {} >", control.selected_label().unwrap_or("")),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        _ => {
            let shown = if control.kind == FieldKind::Password {
                "*".repeat(control.value.chars().count())
            } else {
                control.value.clone()
            };
            let mut spans = vec![
                Span::styled(prefix, label_style),
                Span::styled(format!("{}: ", control.label), label_style),
                Span::styled(shown, Style::default().fg(Color::Yellow)),
            ];
            if focused {
                spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
            }
            Line::from(spans)
        }
    }
}
