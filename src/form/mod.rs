//! Typed form controls and their conversion to plain data.
//!
//! Screens keep their input state in a [`Form`]. On submit the form is turned
//! into [`FormData`] by [`get_form_data`], which converts each control's raw
//! value according to its declared [`FieldKind`].

mod convert;

use chrono::{NaiveDateTime, SecondsFormat};
use serde_json::{Map, Value};

pub use convert::{parse_date_value, parse_number_value, Conversion};

/// Declared type of a form control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Password,
    Email,
    Search,
    Tel,
    Url,
    Hidden,
    TextArea,
    Select,
    SelectMultiple,
    Checkbox,
    Radio,
    Number,
    Range,
    Date,
    DateTime,
    DateTimeLocal,
    Month,
    Time,
    Week,
    Image,
    Submit,
    Button,
    Output,
}

impl FieldKind {
    /// Whether the control can take keyboard focus on a screen.
    pub fn is_focusable(self) -> bool {
        !matches!(self, Self::Hidden | Self::Output)
    }

    /// Whether typed characters edit the raw value.
    pub fn accepts_text(self) -> bool {
        !matches!(
            self,
            Self::Checkbox
                | Self::Radio
                | Self::Select
                | Self::SelectMultiple
                | Self::Image
                | Self::Submit
                | Self::Button
                | Self::Hidden
                | Self::Output
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            selected: false,
        }
    }
}

/// One named input in a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub value: String,
    pub checked: bool,
    pub options: Vec<SelectOption>,
}

impl Control {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            value: String::new(),
            checked: false,
            options: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Attach options. For a single select the first option starts selected.
    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        if self.kind == FieldKind::Select {
            if let Some(first) = self.options.first_mut() {
                first.selected = true;
                self.value = first.value.clone();
            }
        }
        self
    }

    /// Label of the currently chosen option of a single select.
    pub fn selected_label(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.selected)
            .map(|option| option.label.as_str())
    }

    /// Move a single select to its next option, wrapping around.
    pub fn cycle_option(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let current = self.options.iter().position(|o| o.selected).unwrap_or(0);
        let next = (current + 1) % self.options.len();
        for (index, option) in self.options.iter_mut().enumerate() {
            option.selected = index == next;
        }
        self.value = self.options[next].value.clone();
    }

    /// Toggle a checkbox, or the given option of a multi-select.
    pub fn toggle(&mut self, option_index: usize) {
        match self.kind {
            FieldKind::Checkbox | FieldKind::Radio => self.checked = !self.checked,
            FieldKind::SelectMultiple => {
                if let Some(option) = self.options.get_mut(option_index) {
                    option.selected = !option.selected;
                }
            }
            FieldKind::Select => self.cycle_option(),
            _ => {}
        }
    }
}

/// A set of controls plus which one has keyboard focus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    controls: Vec<Control>,
    focused: usize,
}

impl Form {
    pub fn new(controls: Vec<Control>) -> Self {
        let mut form = Self {
            controls,
            focused: 0,
        };
        if !form.focused_is_focusable() {
            form.focus_next();
        }
        form
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn control(&self, name: &str) -> Option<&Control> {
        self.controls.iter().find(|control| control.name == name)
    }

    pub fn control_mut(&mut self, name: &str) -> Option<&mut Control> {
        self.controls.iter_mut().find(|control| control.name == name)
    }

    /// Raw value of a control, empty when the control does not exist.
    pub fn value(&self, name: &str) -> &str {
        self.control(name).map_or("", |control| control.value.as_str())
    }

    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        if let Some(control) = self.control_mut(name) {
            control.value = value.into();
        }
    }

    pub fn focused_index(&self) -> usize {
        self.focused
    }

    pub fn focused(&self) -> Option<&Control> {
        self.controls.get(self.focused)
    }

    pub fn focused_mut(&mut self) -> Option<&mut Control> {
        self.controls.get_mut(self.focused)
    }

    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    pub fn focus_previous(&mut self) {
        self.step_focus(self.controls.len().saturating_sub(1));
    }

    fn step_focus(&mut self, step: usize) {
        let len = self.controls.len();
        for _ in 0..len {
            self.focused = (self.focused + step) % len;
            if self.focused_is_focusable() {
                return;
            }
        }
    }

    fn focused_is_focusable(&self) -> bool {
        self.focused().is_some_and(|control| control.kind.is_focusable())
    }

    /// Append a typed character to the focused control.
    pub fn input_char(&mut self, c: char) {
        if let Some(control) = self.focused_mut() {
            if control.kind.accepts_text() {
                control.value.push(c);
            } else if c == ' ' {
                control.toggle(0);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(control) = self.focused_mut() {
            if control.kind.accepts_text() {
                control.value.pop();
            }
        }
    }
}

/// Converted value of one control.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Date(Option<NaiveDateTime>),
    Number(f64),
    Bool(bool),
    List(Vec<String>),
    Text(String),
}

impl FormValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Date(Some(date)) => Value::String(
                date.and_utc()
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
            Self::Date(None) => Value::Null,
            Self::Number(number) => Value::from(*number),
            Self::Bool(value) => Value::Bool(*value),
            Self::List(values) => Value::from(values.clone()),
            Self::Text(text) => Value::String(text.clone()),
        }
    }
}

/// Name → value mapping produced from a form, in control order.
///
/// A later control with the same name replaces the earlier value but keeps
/// its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    entries: Vec<(String, FormValue)>,
}

impl FormData {
    pub fn insert(&mut self, name: impl Into<String>, value: FormValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Text value of a control, or an empty string.
    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(FormValue::as_text).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        Value::Object(map)
    }
}

/// Convert every named control of `form` to its typed value.
///
/// Unnamed controls and image buttons are skipped.
pub fn get_form_data(form: &Form) -> FormData {
    let mut data = FormData::default();

    for control in form.controls() {
        if control.name.is_empty() {
            continue;
        }

        let value = match control.kind.conversion() {
            Conversion::Skip => continue,
            Conversion::Date => FormValue::Date(parse_date_value(control.kind, &control.value)),
            Conversion::Number => FormValue::Number(parse_number_value(&control.value)),
            Conversion::Checked => FormValue::Bool(control.checked),
            Conversion::SelectedOptions => FormValue::List(
                control
                    .options
                    .iter()
                    .filter(|option| option.selected)
                    .map(|option| option.value.clone())
                    .collect(),
            ),
            Conversion::Raw => FormValue::Text(control.value.clone()),
        };

        data.insert(control.name.clone(), value);
    }

    data
}
