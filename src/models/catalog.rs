use serde::{Deserialize, Serialize};

use super::Course;

/// The public course list shown before login, with a search filter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "CatalogWire", into = "CatalogWire")]
pub struct CourseCatalog {
    courses: Vec<Course>,
    visible: Vec<usize>,
    query: String,
}

#[derive(Deserialize, Serialize)]
struct CatalogWire {
    #[serde(rename = "Courses_data", default)]
    courses: Vec<Course>,
}

impl From<CatalogWire> for CourseCatalog {
    fn from(wire: CatalogWire) -> Self {
        Self::new(wire.courses)
    }
}

impl From<CourseCatalog> for CatalogWire {
    fn from(catalog: CourseCatalog) -> Self {
        Self {
            courses: catalog.courses,
        }
    }
}

impl CourseCatalog {
    pub fn new(courses: Vec<Course>) -> Self {
        let visible = (0..courses.len()).collect();
        Self {
            courses,
            visible,
            query: String::new(),
        }
    }

    pub fn all(&self) -> &[Course] {
        &self.courses
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Keep only courses whose title or description contains `query`,
    /// ignoring case and surrounding whitespace.
    pub fn search(&mut self, query: &str) {
        self.query = query.trim().to_string();
        let needle = self.query.to_lowercase();
        self.visible = self
            .courses
            .iter()
            .enumerate()
            .filter(|(_, course)| course.matches(&needle))
            .map(|(index, _)| index)
            .collect();
    }

    pub fn reset(&mut self) {
        self.query.clear();
        self.visible = (0..self.courses.len()).collect();
    }

    pub fn visible(&self) -> impl Iterator<Item = &Course> {
        self.visible.iter().map(|&index| &self.courses[index])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// The `position`-th course among those currently shown.
    pub fn visible_at(&self, position: usize) -> Option<&Course> {
        self.visible
            .get(position)
            .and_then(|&index| self.courses.get(index))
    }
}
