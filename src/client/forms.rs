//! Form layouts of the client screens.

use crate::form::{Control, FieldKind, Form, SelectOption};

pub fn search_form() -> Form {
    Form::new(vec![Control::new("query", "Search", FieldKind::Search)])
}

pub fn login_form(email: &str) -> Form {
    Form::new(vec![
        Control::new("email", "E-mail Address", FieldKind::Email).with_value(email),
        Control::new("password", "Password", FieldKind::Password),
        Control::new("submit", "Log In or Register", FieldKind::Submit),
        Control::new("forgot", "Forgot Password?", FieldKind::Button),
    ])
}

pub fn registration_form() -> Form {
    Form::new(vec![
        Control::new("name", "Name", FieldKind::Text),
        Control::new("password", "Password (again)", FieldKind::Password),
        Control::new("role", "I am a", FieldKind::Select).with_options(vec![
            SelectOption::new("Learner", "false"),
            SelectOption::new("Instructor", "true"),
        ]),
        Control::new("submit", "Register", FieldKind::Submit),
    ])
}

pub fn recovery_form(password: &str) -> Form {
    Form::new(vec![
        Control::new("token", "Recovery Code", FieldKind::Text),
        Control::new("password", "Password", FieldKind::Password).with_value(password),
        Control::new("confirm", "Re-Enter Password", FieldKind::Password),
        Control::new("submit", "Reset Password", FieldKind::Submit),
    ])
}
