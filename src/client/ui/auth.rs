//! Login, registration and account recovery screens.

use ratatui::layout::Flex;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::client::state::{ClientApp, Screen};
use crate::form::Form;
use crate::validation::{password_feedback, PasswordPolicy, PolicyViolation};

use super::form;

pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let chunks = Layout::vertical([
        Constraint::Length(3),  // Heading
        Constraint::Length(10), // Form
        Constraint::Fill(1),    // Password rules
        Constraint::Length(2),  // Controls
    ])
    .margin(1)
    .split(area);

    let centered = |area: Rect| {
        Layout::horizontal([Constraint::Max(70)])
            .flex(Flex::Center)
            .split(area)[0]
    };

    match &app.screen {
        Screen::Login { form } => {
            render_heading(frame, chunks[0], "Log in or register", None);
            form::render(frame, centered(chunks[1]), form, "Account");
        }
        Screen::Register {
            email,
            password,
            form,
        } => {
            render_heading(
                frame,
                chunks[0],
                "Create your account",
                Some(format!("No account exists for {} yet.", email)),
            );
            form::render(frame, centered(chunks[1]), form, "Registration");
            render_password_rules(frame, centered(chunks[2]), password, form.value("password"));
        }
        Screen::Recovery { email, form } => {
            render_heading(
                frame,
                chunks[0],
                "Reset your password",
                Some(format!("Enter the code sent to {}.", email)),
            );
            form::render(frame, centered(chunks[1]), form, "Recovery");
            render_recovery_rules(frame, centered(chunks[2]), form);
        }
        _ => return,
    }

    let widget = Paragraph::new("Tab/arrows move  ·  Space/Left/Right change  ·  Enter submit  ·  Esc back")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, chunks[3]);
}

fn render_heading(frame: &mut Frame, area: Rect, title: &str, subtitle: Option<String>) {
    let mut lines = vec![Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(Color::Cyan).bold(),
    ))];
    if let Some(subtitle) = subtitle {
        lines.push(Line::from(Span::styled(
            subtitle,
            Style::default().fg(Color::Gray),
        )));
    }
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_recovery_rules(frame: &mut Frame, area: Rect, form: &Form) {
    render_password_rules(frame, area, form.value("password"), form.value("confirm"));
}

/// Live checklist of the password rules.
fn render_password_rules(frame: &mut Frame, area: Rect, password: &str, confirmation: &str) {
    let feedback = password_feedback(password, confirmation);
    let policy = PasswordPolicy::DEFAULT;
    let rules = [
        PolicyViolation::TooShort {
            min_length: policy.min_length,
        },
        PolicyViolation::MissingUppercase,
        PolicyViolation::MissingLowercase,
        PolicyViolation::MissingDigit,
        PolicyViolation::MissingSpecial,
    ];

    let mut lines: Vec<Line> = rules
        .iter()
        .map(|rule| rule_line(!feedback.violations.contains(rule), rule.to_string()))
        .collect();
    lines.push(rule_line(
        feedback.confirmation_matches,
        "Both passwords must match.".to_string(),
    ));

    frame.render_widget(Paragraph::new(lines), area);
}

fn rule_line(ok: bool, text: String) -> Line<'static> {
    let (symbol, color) = if ok { ("+", Color::Green) } else { ("-", Color::Red) };
    Line::from(vec![
        Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
        Span::styled(text, Style::default().fg(Color::Gray)),
    ])
}
