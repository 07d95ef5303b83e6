//! Keyboard handling for the client screens.

use crossterm::event::KeyCode;

use super::state::{ClientApp, Command, LandingFocus, Screen};

/// Apply a key press. Returns the request to perform, if the key triggered one.
///
/// Sets `should_quit` when the user leaves the application.
pub fn handle_input(app: &mut ClientApp, key: KeyCode) -> Option<Command> {
    if app.busy.is_some() {
        return None;
    }

    if app.notice.is_some() {
        app.dismiss_notice();
        return None;
    }

    if app.preview.is_some() {
        if matches!(
            key,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q')
        ) {
            app.close_preview();
        }
        return None;
    }

    match &app.screen {
        Screen::Landing {
            focus: LandingFocus::Search,
            ..
        } => handle_search_input(app, key),
        Screen::Landing { .. } => handle_landing_input(app, key),
        Screen::Login { .. } | Screen::Register { .. } | Screen::Recovery { .. } => {
            handle_form_input(app, key)
        }
        Screen::Home { .. } => handle_home_input(app, key),
        Screen::Course { .. } => handle_course_input(app, key),
    }
}

fn quit(app: &mut ClientApp) -> Option<Command> {
    app.should_quit = true;
    None
}

fn handle_landing_input(app: &mut ClientApp, key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Enter => app.preview_selected_course(),
        KeyCode::Tab | KeyCode::Char('/') => app.toggle_landing_focus(),
        KeyCode::Char('l') | KeyCode::Char('L') => {
            if app.session.is_some() {
                app.screen = Screen::home();
            } else {
                app.open_login();
            }
        }
        KeyCode::Char('r') | KeyCode::Char('R') => return Some(Command::LoadCourses),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return quit(app),
        _ => {}
    }
    None
}

fn handle_search_input(app: &mut ClientApp, key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Enter => app.apply_search(),
        KeyCode::Esc => app.reset_search(),
        KeyCode::Tab => app.toggle_landing_focus(),
        KeyCode::Char(c) => {
            if let Some(form) = app.screen.form_mut() {
                form.input_char(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.screen.form_mut() {
                form.backspace();
            }
        }
        _ => {}
    }
    None
}

fn handle_form_input(app: &mut ClientApp, key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Esc => {
            if app.back() {
                return quit(app);
            }
        }
        KeyCode::Enter => return submit_form(app),
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.screen.form_mut() {
                form.focus_next();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.screen.form_mut() {
                form.focus_previous();
            }
        }
        KeyCode::Left | KeyCode::Right => {
            if let Some(control) = app.screen.form_mut().and_then(|form| form.focused_mut()) {
                control.cycle_option();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = app.screen.form_mut() {
                form.input_char(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.screen.form_mut() {
                form.backspace();
            }
        }
        _ => {}
    }
    None
}

fn submit_form(app: &mut ClientApp) -> Option<Command> {
    let forgot = match &app.screen {
        Screen::Login { form } => form.focused().is_some_and(|control| control.name == "forgot"),
        _ => false,
    };

    match app.screen {
        Screen::Login { .. } if forgot => app.submit_recovery_request(),
        Screen::Login { .. } => app.submit_login(),
        Screen::Register { .. } => app.submit_registration(),
        Screen::Recovery { .. } => app.submit_password_reset(),
        _ => None,
    }
}

fn handle_home_input(app: &mut ClientApp, key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Enter => app.open_selected_course(),
        KeyCode::Tab => app.toggle_home_tab(),
        KeyCode::Char('c') | KeyCode::Char('C') => app.screen = Screen::landing(),
        KeyCode::Char('o') | KeyCode::Char('O') => app.log_out(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return quit(app),
        _ => {}
    }
    None
}

fn handle_course_input(app: &mut ClientApp, key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Enter | KeyCode::Char(' ') => app.confirm_course_step(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.back();
        }
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(app: &mut ClientApp, text: &str) {
        for c in text.chars() {
            handle_input(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_login_keys_produce_command() {
        let mut app = ClientApp::new(String::new());
        handle_input(&mut app, KeyCode::Char('l'));
        assert!(matches!(app.screen, Screen::Login { .. }));

        type_text(&mut app, "ada@example.com");
        handle_input(&mut app, KeyCode::Tab);
        type_text(&mut app, "pw");

        assert_eq!(
            handle_input(&mut app, KeyCode::Enter),
            Some(Command::Login {
                email: "ada@example.com".into(),
                password: "pw".into(),
            })
        );
    }

    #[test]
    fn test_forgot_button_requests_recovery() {
        let mut app = ClientApp::new(String::new());
        app.open_login();
        type_text(&mut app, "ada@example.com");
        for _ in 0..3 {
            handle_input(&mut app, KeyCode::Tab);
        }

        assert_eq!(
            handle_input(&mut app, KeyCode::Enter),
            Some(Command::RequestRecovery {
                email: "ada@example.com".into(),
                password: String::new(),
            })
        );
    }

    #[test]
    fn test_notice_swallows_next_key() {
        let mut app = ClientApp::new(String::new());
        app.open_login();
        assert_eq!(handle_input(&mut app, KeyCode::Enter), None);
        assert!(app.notice.is_some());

        handle_input(&mut app, KeyCode::Char('x'));
        assert!(app.notice.is_none());
        let Screen::Login { form } = &app.screen else {
            panic!("expected login screen");
        };
        assert_eq!(form.value("email"), "");
    }

    #[test]
    fn test_escape_from_login_returns_to_landing() {
        let mut app = ClientApp::new(String::new());
        app.open_login();
        handle_input(&mut app, KeyCode::Esc);
        assert!(matches!(app.screen, Screen::Landing { .. }));
        assert!(!app.should_quit);

        handle_input(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_search_typing_does_not_trigger_shortcuts() {
        let mut app = ClientApp::new(String::new());
        handle_input(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "ql");
        assert!(!app.should_quit);
        assert!(matches!(app.screen, Screen::Landing { .. }));
        assert_eq!(app.screen.form_mut().unwrap().value("query"), "ql");

        handle_input(&mut app, KeyCode::Enter);
        assert_eq!(app.catalog.query(), "ql");
    }

    #[test]
    fn test_reload_key() {
        let mut app = ClientApp::new(String::new());
        assert_eq!(handle_input(&mut app, KeyCode::Char('r')), Some(Command::LoadCourses));
    }
}
