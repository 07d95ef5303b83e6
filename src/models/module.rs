use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Media type of a module's content file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleKind {
    Audio,
    Video,
    Markdown,
    #[serde(other)]
    Other,
}

/// A single piece of learning content within a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ModuleKind,
    /// Chapter markers for audio and video content.
    #[serde(default)]
    pub chapters: Option<Vec<Value>>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub url_authentication: Option<Value>,
    /// Learner completion; absent for instructors.
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

impl Module {
    pub fn is_audio(&self) -> bool {
        self.kind == ModuleKind::Audio
    }

    pub fn is_video(&self) -> bool {
        self.kind == ModuleKind::Video
    }

    pub fn is_markdown(&self) -> bool {
        self.kind == ModuleKind::Markdown
    }

    pub fn has_chapters(&self) -> bool {
        self.chapters.as_ref().is_some_and(|chapters| !chapters.is_empty())
    }

    pub fn is_completed(&self) -> bool {
        self.completed == Some(true)
    }
}
