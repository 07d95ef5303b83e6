use serde::{Deserialize, Serialize};

use super::wire;
use super::Course;

/// Courses a user is enrolled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearnerData {
    #[serde(default)]
    pub courses: Vec<Course>,
}

/// Courses an instructor has authored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstructorData {
    #[serde(default)]
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "wire::object_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub learner_data: LearnerData,
    /// Present exactly when the user is an instructor.
    #[serde(default)]
    pub instructor_data: Option<InstructorData>,
}

impl User {
    pub fn is_instructor(&self) -> bool {
        self.instructor_data.is_some()
    }

    pub fn enrolled_courses(&self) -> &[Course] {
        &self.learner_data.courses
    }

    pub fn enrolled_courses_mut(&mut self) -> &mut [Course] {
        &mut self.learner_data.courses
    }

    pub fn authored_courses(&self) -> &[Course] {
        self.instructor_data
            .as_ref()
            .map_or(&[], |data| data.courses.as_slice())
    }
}

/// An authenticated user together with the bearer token for later requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(rename = "user_info")]
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_learner_session() {
        let session: Session = serde_json::from_value(json!({
            "access_token": "abc.def",
            "user_info": {
                "_id": "u1",
                "name": "Ada",
                "email": "ada@example.com",
                "learnerData": {"courses": []},
                "instructorData": null
            }
        }))
        .unwrap();

        assert_eq!(session.access_token, "abc.def");
        assert!(!session.user.is_instructor());
        assert!(session.user.authored_courses().is_empty());
    }

    #[test]
    fn test_instructor_user() {
        let user: User = serde_json::from_value(json!({
            "name": "Grace",
            "email": "grace@example.com",
            "learnerData": null,
            "instructorData": {"courses": [{"title": "COBOL", "components": []}]}
        }))
        .unwrap();

        assert!(user.is_instructor());
        assert_eq!(user.authored_courses()[0].title, "COBOL");
        assert!(user.enrolled_courses().is_empty());
    }
}
