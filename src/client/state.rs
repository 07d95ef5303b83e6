//! Client state management.

use log::{debug, info, warn};

use crate::api::{Action, Failure, Registration};
use crate::form::{get_form_data, Form};
use crate::models::{Course, CourseCatalog, CourseComponent, Session};
use crate::validation::{is_email, PasswordPolicy};

use super::forms;

/// Network work requested by a key press, performed by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadCourses,
    Login { email: String, password: String },
    Register(Registration),
    RequestRecovery { email: String, password: String },
    ResetPassword { token: String, password: String },
}

impl Command {
    pub fn busy_message(&self) -> &'static str {
        match self {
            Self::LoadCourses => "Loading courses...",
            Self::Login { .. } => "Logging in...",
            Self::Register(_) => "Registering...",
            Self::RequestRecovery { .. } => "Requesting a recovery code...",
            Self::ResetPassword { .. } => "Resetting password...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingFocus {
    Search,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeTab {
    Learning,
    Teaching,
}

/// Current screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// Public course catalog.
    Landing {
        search: Form,
        selected: usize,
        focus: LandingFocus,
    },

    Login { form: Form },

    /// Shown when the login e-mail is unknown.
    Register {
        email: String,
        password: String,
        form: Form,
    },

    /// Entering the e-mailed recovery code and a new password.
    Recovery { email: String, form: Form },

    /// The logged-in user's courses.
    Home { tab: HomeTab, selected: usize },

    /// Taking one of the enrolled courses.
    Course { index: usize, selected_option: usize },
}

impl Screen {
    pub fn landing() -> Self {
        Self::Landing {
            search: forms::search_form(),
            selected: 0,
            focus: LandingFocus::List,
        }
    }

    pub fn login(email: &str) -> Self {
        Self::Login {
            form: forms::login_form(email),
        }
    }

    pub fn home() -> Self {
        Self::Home {
            tab: HomeTab::Learning,
            selected: 0,
        }
    }

    /// The form the user is typing into, if any.
    pub fn form_mut(&mut self) -> Option<&mut Form> {
        match self {
            Self::Login { form } | Self::Register { form, .. } | Self::Recovery { form, .. } => {
                Some(form)
            }
            Self::Landing {
                search,
                focus: LandingFocus::Search,
                ..
            } => Some(search),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A blocking message; any key dismisses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// A course opened read-only. Answers are only revealed to the course's
/// author.
#[derive(Debug, Clone, PartialEq)]
pub struct CoursePreview {
    pub course: Course,
    pub show_answers: bool,
}

/// Client application state.
pub struct ClientApp {
    pub screen: Screen,
    /// Logged-in user, replaced wholesale on login and cleared on logout.
    pub session: Option<Session>,
    pub catalog: CourseCatalog,
    pub notice: Option<Notice>,
    /// Read-only course overview shown over the current screen.
    pub preview: Option<CoursePreview>,
    /// Set while a request is in flight.
    pub busy: Option<&'static str>,
    pub server: String,
    pub should_quit: bool,
}

impl ClientApp {
    pub fn new(server: String) -> Self {
        Self {
            screen: Screen::landing(),
            session: None,
            catalog: CourseCatalog::default(),
            notice: None,
            preview: None,
            busy: None,
            server,
            should_quit: false,
        }
    }

    pub fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notice = Some(Notice {
            kind,
            message: message.into(),
        });
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn fail(&mut self, action: Action, failure: Failure) {
        warn!("[Client] {:?} failed: {}", action, failure);
        self.notify(NoticeKind::Error, failure.user_message(action));
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn open_login(&mut self) {
        self.screen = Screen::login("");
    }

    /// Leave the current screen for its parent. Returns true if the app
    /// should quit instead.
    pub fn back(&mut self) -> bool {
        self.screen = match &self.screen {
            Screen::Landing { .. } => return true,
            Screen::Login { .. } => Screen::landing(),
            Screen::Register { email, .. } | Screen::Recovery { email, .. } => {
                Screen::login(email)
            }
            Screen::Home { .. } => return true,
            Screen::Course { .. } => Screen::home(),
        };
        false
    }

    pub fn log_out(&mut self) {
        if let Some(session) = self.session.take() {
            info!("[Client] {} logged out", session.user.email);
        }
        self.preview = None;
        self.screen = Screen::landing();
    }

    pub fn open_preview(&mut self, course: Course, show_answers: bool) {
        self.preview = Some(CoursePreview {
            course,
            show_answers,
        });
    }

    pub fn close_preview(&mut self) {
        self.preview = None;
    }

    // ------------------------------------------------------------------
    // Landing
    // ------------------------------------------------------------------

    pub fn apply_search(&mut self) {
        if let Screen::Landing {
            search,
            selected,
            focus,
        } = &mut self.screen
        {
            let data = get_form_data(search);
            self.catalog.search(data.text("query"));
            *selected = 0;
            *focus = LandingFocus::List;
        }
    }

    pub fn reset_search(&mut self) {
        if let Screen::Landing {
            search,
            selected,
            focus,
        } = &mut self.screen
        {
            search.set_value("query", "");
            self.catalog.reset();
            *selected = 0;
            *focus = LandingFocus::List;
        }
    }

    pub fn toggle_landing_focus(&mut self) {
        if let Screen::Landing { focus, .. } = &mut self.screen {
            *focus = match focus {
                LandingFocus::Search => LandingFocus::List,
                LandingFocus::List => LandingFocus::Search,
            };
        }
    }

    pub fn preview_selected_course(&mut self) {
        if let Screen::Landing { selected, .. } = &self.screen {
            if let Some(course) = self.catalog.visible_at(*selected).cloned() {
                self.open_preview(course, false);
            }
        }
    }

    // ------------------------------------------------------------------
    // List selection (landing and home)
    // ------------------------------------------------------------------

    fn list_len(&self) -> usize {
        match &self.screen {
            Screen::Landing { .. } => self.catalog.visible_len(),
            Screen::Home { tab, .. } => self.home_courses(*tab).len(),
            Screen::Course { index, .. } => self.course_option_count(*index),
            _ => 0,
        }
    }

    pub fn select_next(&mut self) {
        self.step_selection(1);
    }

    pub fn select_previous(&mut self) {
        let len = self.list_len();
        self.step_selection(len.saturating_sub(1));
    }

    fn step_selection(&mut self, step: usize) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        match &mut self.screen {
            Screen::Landing { selected, .. }
            | Screen::Home { selected, .. }
            | Screen::Course {
                selected_option: selected,
                ..
            } => *selected = (*selected + step) % len,
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Forms
    // ------------------------------------------------------------------

    /// Validate the login form and build the login request.
    pub fn submit_login(&mut self) -> Option<Command> {
        let Screen::Login { form } = &self.screen else {
            return None;
        };
        let data = get_form_data(form);
        let email = data.text("email").trim().to_string();
        let password = data.text("password").to_string();

        let mut problems = Vec::new();
        if !is_email(&email) {
            problems.push("That's not a valid e-mail address.");
        }
        if password.is_empty() {
            problems.push("A password is required.");
        }
        if !problems.is_empty() {
            self.fail(Action::Login, Failure::Invalid(problems.join("\n")));
            return None;
        }

        Some(Command::Login { email, password })
    }

    /// "Forgot password" on the login form.
    pub fn submit_recovery_request(&mut self) -> Option<Command> {
        let Screen::Login { form } = &self.screen else {
            return None;
        };
        let data = get_form_data(form);
        let email = data.text("email").trim().to_string();
        if !is_email(&email) {
            self.fail(
                Action::RecoveryRequest,
                Failure::Invalid("Enter your e-mail address to recover your account.".into()),
            );
            return None;
        }

        Some(Command::RequestRecovery {
            email,
            password: data.text("password").to_string(),
        })
    }

    pub fn submit_registration(&mut self) -> Option<Command> {
        let Screen::Register {
            email,
            password,
            form,
        } = &self.screen
        else {
            return None;
        };
        let data = get_form_data(form);
        let name = data.text("name").trim().to_string();
        let repeated = data.text("password");
        let is_instructor = data.text("role") == "true";

        let mut problems: Vec<String> = Vec::new();
        if name.is_empty() {
            problems.push("\"Name\" is required.".into());
        }
        if repeated != password {
            problems.push("That's not the same password!".into());
        } else if let Err(violations) = PasswordPolicy::DEFAULT.validate(password) {
            problems.extend(violations.iter().map(ToString::to_string));
        }
        if !problems.is_empty() {
            self.fail(Action::Registration, Failure::Invalid(problems.join("\n")));
            return None;
        }

        Some(Command::Register(Registration {
            name,
            email: email.clone(),
            password: password.clone(),
            is_instructor,
        }))
    }

    pub fn submit_password_reset(&mut self) -> Option<Command> {
        let Screen::Recovery { form, .. } = &self.screen else {
            return None;
        };
        let data = get_form_data(form);
        let token = data.text("token").trim().to_string();
        let password = data.text("password").to_string();

        let mut problems: Vec<String> = Vec::new();
        if token.is_empty() {
            problems.push("\"Recovery Code\" is required.".into());
        }
        if password != data.text("confirm") {
            problems.push("The two passwords don't match.".into());
        }
        if let Err(violations) = PasswordPolicy::DEFAULT.validate(&password) {
            problems.extend(violations.iter().map(ToString::to_string));
        }
        if !problems.is_empty() {
            self.fail(Action::PasswordReset, Failure::Invalid(problems.join("\n")));
            return None;
        }

        Some(Command::ResetPassword { token, password })
    }

    // ------------------------------------------------------------------
    // Request outcomes
    // ------------------------------------------------------------------

    pub fn courses_loaded(&mut self, result: Result<CourseCatalog, Failure>) {
        match result {
            Ok(catalog) => {
                debug!("[Client] Catalog holds {} courses", catalog.all().len());
                self.catalog = catalog;
                if let Screen::Landing { selected, .. } = &mut self.screen {
                    *selected = 0;
                }
            }
            Err(failure) => self.fail(Action::CourseListing, failure),
        }
    }

    pub fn login_finished(&mut self, email: String, password: String, result: Result<Session, Failure>) {
        match result {
            Ok(session) => self.start_session(session),
            Err(failure) if failure.is_not_registered() => {
                info!("[Client] {} is not registered; offering registration", email);
                self.screen = Screen::Register {
                    email,
                    password,
                    form: forms::registration_form(),
                };
            }
            Err(failure) => self.fail(Action::Login, failure),
        }
    }

    pub fn registration_finished(&mut self, result: Result<Session, Failure>) {
        match result {
            Ok(session) => self.start_session(session),
            Err(failure) => self.fail(Action::Registration, failure),
        }
    }

    pub fn recovery_requested(&mut self, email: String, password: String, result: Result<(), Failure>) {
        match result {
            Ok(()) => {
                self.screen = Screen::Recovery {
                    form: forms::recovery_form(&password),
                    email: email.clone(),
                };
                self.notify(
                    NoticeKind::Info,
                    format!("An e-mail with a recovery code has been sent to {}.", email),
                );
            }
            Err(failure) => self.fail(Action::RecoveryRequest, failure),
        }
    }

    pub fn password_reset_finished(&mut self, result: Result<Session, Failure>) {
        match result {
            Ok(session) => self.start_session(session),
            Err(failure) => self.fail(Action::PasswordReset, failure),
        }
    }

    fn start_session(&mut self, session: Session) {
        info!("[Client] Session started for {}", session.user.email);
        self.session = Some(session);
        self.preview = None;
        self.screen = Screen::home();
    }

    // ------------------------------------------------------------------
    // Home
    // ------------------------------------------------------------------

    pub fn home_courses(&self, tab: HomeTab) -> &[Course] {
        match (&self.session, tab) {
            (Some(session), HomeTab::Learning) => session.user.enrolled_courses(),
            (Some(session), HomeTab::Teaching) => session.user.authored_courses(),
            (None, _) => &[],
        }
    }

    pub fn toggle_home_tab(&mut self) {
        let is_instructor = self
            .session
            .as_ref()
            .is_some_and(|session| session.user.is_instructor());
        if let Screen::Home { tab, selected } = &mut self.screen {
            if is_instructor {
                *tab = match tab {
                    HomeTab::Learning => HomeTab::Teaching,
                    HomeTab::Teaching => HomeTab::Learning,
                };
                *selected = 0;
            }
        }
    }

    /// Enter an enrolled course, or preview an authored one.
    pub fn open_selected_course(&mut self) {
        let Screen::Home { tab, selected } = self.screen else {
            return;
        };
        match tab {
            HomeTab::Learning if selected < self.home_courses(tab).len() => {
                self.screen = Screen::Course {
                    index: selected,
                    selected_option: 0,
                };
            }
            HomeTab::Teaching => {
                if let Some(course) = self.home_courses(tab).get(selected).cloned() {
                    self.open_preview(course, true);
                }
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Course
    // ------------------------------------------------------------------

    pub fn active_course(&self) -> Option<&Course> {
        let Screen::Course { index, .. } = self.screen else {
            return None;
        };
        self.session
            .as_ref()
            .and_then(|session| session.user.enrolled_courses().get(index))
    }

    fn course_option_count(&self, index: usize) -> usize {
        let course = self
            .session
            .as_ref()
            .and_then(|session| session.user.enrolled_courses().get(index));
        match course.and_then(Course::current_component) {
            Some(CourseComponent::Assessment(assessment)) => assessment
                .current_question()
                .map_or(0, |question| question.options.len()),
            _ => 0,
        }
    }

    /// Enter on the course screen: answer the current question, or finish
    /// the current component and move on.
    pub fn confirm_course_step(&mut self) {
        let Screen::Course {
            index,
            selected_option,
        } = &mut self.screen
        else {
            return;
        };
        let choice = *selected_option;
        *selected_option = 0;

        let Some(course) = self
            .session
            .as_mut()
            .and_then(|session| session.user.enrolled_courses_mut().get_mut(*index))
        else {
            return;
        };

        let result = match course.current_component_mut() {
            Some(CourseComponent::Assessment(assessment)) if !assessment.is_completed() => {
                assessment.answer_current(choice)
            }
            _ => course.advance(),
        };

        match result {
            Ok(()) if course.is_completed() => {
                info!("[Client] Course \"{}\" completed", course.title);
                let title = course.title.clone();
                self.notify(
                    NoticeKind::Info,
                    format!("Congratulations! You earned the credential for \"{}\".", title),
                );
            }
            Ok(()) => {}
            Err(err) => {
                warn!("[Client] Course step rejected: {}", err);
                self.notify(NoticeKind::Error, err.to_string());
            }
        }
    }
}
