use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::wire;
use super::{Assessment, Module, ProgressError};

/// A step of a course: content to study or a quiz to take.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CourseComponent {
    Module(Module),
    Assessment(Assessment),
}

impl CourseComponent {
    pub fn title(&self) -> &str {
        match self {
            Self::Module(module) => &module.title,
            Self::Assessment(assessment) => &assessment.title,
        }
    }

    pub fn is_assessment(&self) -> bool {
        matches!(self, Self::Assessment(_))
    }
}

// The backend does not tag components; assessments are the ones carrying
// a `questions` list.
impl<'de> Deserialize<'de> for CourseComponent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        if value.get("questions").is_some() {
            Assessment::deserialize(value)
                .map(Self::Assessment)
                .map_err(D::Error::custom)
        } else {
            Module::deserialize(value)
                .map(Self::Module)
                .map_err(D::Error::custom)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "wire::object_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "wire::display_name")]
    pub instructor: String,
    #[serde(default)]
    pub components: Vec<CourseComponent>,
    /// Index of the component the learner is on; equal to
    /// `components.len()` once the course is completed.
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub current_component: usize,
    #[serde(default)]
    pub credential_earned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

impl Course {
    pub fn is_completed(&self) -> bool {
        self.current_component >= self.components.len()
    }

    /// The component the learner is on, or `None` when completed.
    pub fn current_component(&self) -> Option<&CourseComponent> {
        self.components.get(self.current_component)
    }

    pub fn current_component_mut(&mut self) -> Option<&mut CourseComponent> {
        self.components.get_mut(self.current_component)
    }

    /// Progress through the components as a rounded percentage, capped at 100.
    pub fn calculate_progress(&self) -> u32 {
        if self.components.is_empty() {
            return 0;
        }
        let ratio = self.current_component as f64 / self.components.len() as f64;
        ((ratio * 100.0).round() as u32).min(100)
    }

    /// Finish the current component and move to the next one.
    ///
    /// Progress only ever moves forward. An assessment has to be fully
    /// answered first; a module is marked completed on the way out. Leaving
    /// the last component earns the course credential.
    pub fn advance(&mut self) -> Result<(), ProgressError> {
        match self.current_component_mut() {
            None => return Err(ProgressError::CourseCompleted),
            Some(CourseComponent::Assessment(assessment)) if !assessment.is_completed() => {
                return Err(ProgressError::AssessmentIncomplete);
            }
            Some(CourseComponent::Module(module)) => module.completed = Some(true),
            Some(CourseComponent::Assessment(_)) => {}
        }

        self.current_component += 1;
        if self.is_completed() {
            self.credential_earned = Some(true);
        }
        Ok(())
    }

    /// Whether the course title or description contains `needle`, which is
    /// expected to be lower-case already.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}
