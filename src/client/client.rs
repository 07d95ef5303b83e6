//! Event loop of the terminal client.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info};

use crate::api::ApiClient;
use crate::config::Config;
use crate::terminal::{self, AppTerminal};
use crate::AppError;

use super::input::handle_input;
use super::state::{ClientApp, Command};
use super::ui;

/// Run the client until the user quits.
pub async fn run(config: Config) -> Result<(), AppError> {
    let api = ApiClient::new(config)?;
    let mut app = ClientApp::new(api.config().server_label());
    info!("[Client] Starting against {}", app.server);

    let mut terminal = terminal::init()?;
    let result = run_tui(&mut terminal, &api, &mut app).await;
    terminal::restore()?;
    result
}

async fn run_tui(
    terminal: &mut AppTerminal,
    api: &ApiClient,
    app: &mut ClientApp,
) -> Result<(), AppError> {
    execute(terminal, api, app, Command::LoadCourses).await?;

    loop {
        if app.should_quit {
            break;
        }

        terminal.draw(|frame| ui::render(frame, &*app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if let Some(command) = handle_input(app, key.code) {
                    execute(terminal, api, app, command).await?;
                }
            }
        }
    }

    Ok(())
}

/// Show the busy overlay, then perform the request.
async fn execute(
    terminal: &mut AppTerminal,
    api: &ApiClient,
    app: &mut ClientApp,
    command: Command,
) -> Result<(), AppError> {
    app.busy = Some(command.busy_message());
    terminal.draw(|frame| ui::render(frame, &*app))?;
    perform(api, app, command).await;
    app.busy = None;
    Ok(())
}

/// Perform one request and apply its outcome to the app state.
pub async fn perform(api: &ApiClient, app: &mut ClientApp, command: Command) {
    debug!("[Client] {}", command.busy_message());

    match command {
        Command::LoadCourses => {
            let result = api.list_courses(app.session.as_ref()).await;
            app.courses_loaded(result);
        }
        Command::Login { email, password } => {
            let result = api.login(&email, &password).await;
            app.login_finished(email, password, result);
        }
        Command::Register(registration) => {
            let result = api.register(&registration).await;
            app.registration_finished(result);
        }
        Command::RequestRecovery { email, password } => {
            let result = api.request_recovery(&email).await;
            app.recovery_requested(email, password, result);
        }
        Command::ResetPassword { token, password } => {
            let result = api.recover(&token, &password).await;
            app.password_reset_finished(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::state::{NoticeKind, Screen};
    use crate::test_support::{json_response, serve, unreachable_url};
    use serde_json::json;

    fn api_for(base: &str) -> ApiClient {
        ApiClient::new(Config::new(Some(base), Some(5)).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_load_courses_fills_catalog() {
        let (base, server) = serve(vec![json_response(
            200,
            json!({"Courses_data": [{"title": "Rust", "components": []}]}),
        )])
        .await;
        let api = api_for(&base);
        let mut app = ClientApp::new(base);

        perform(&api, &mut app, Command::LoadCourses).await;

        assert_eq!(app.catalog.visible_len(), 1);
        assert!(app.notice.is_none());
        let requests = server.await.unwrap();
        assert_eq!(requests[0].path, "/courses");
    }

    #[tokio::test]
    async fn test_unknown_login_opens_registration() {
        let (base, server) = serve(vec![json_response(404, json!({"msg": "no such user"}))]).await;
        let api = api_for(&base);
        let mut app = ClientApp::new(base);
        app.open_login();

        perform(
            &api,
            &mut app,
            Command::Login {
                email: "new@example.com".into(),
                password: "Secret!1234".into(),
            },
        )
        .await;

        assert!(matches!(app.screen, Screen::Register { ref password, .. } if password == "Secret!1234"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_server_shows_notice() {
        let base = unreachable_url().await;
        let api = api_for(&base);
        let mut app = ClientApp::new(base);

        perform(&api, &mut app, Command::LoadCourses).await;

        let notice = app.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.starts_with("Loading the courses failed."));
    }
}
