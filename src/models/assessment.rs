use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::wire;
use super::ProgressError;

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 26;

/// A multiple-choice question inside an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    #[serde(alias = "choices")]
    pub options: Vec<String>,
    /// Index into `options` chosen by the learner.
    #[serde(default, deserialize_with = "wire::answer_index")]
    pub answer: Option<usize>,
    #[serde(alias = "correctChoice")]
    pub correct_option: usize,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

impl Question {
    /// A question needs between 2 and 26 options, one per letter.
    pub fn is_valid(&self) -> bool {
        (MIN_OPTIONS..=MAX_OPTIONS).contains(&self.options.len())
    }

    pub fn is_answered(&self) -> bool {
        self.answer.is_some()
    }

    pub fn is_correct(&self) -> bool {
        self.answer == Some(self.correct_option)
    }

    pub fn correct_answer(&self) -> Option<&str> {
        self.options.get(self.correct_option).map(String::as_str)
    }

    /// Letter shown next to option `index` (A..Z).
    pub fn option_label(index: usize) -> char {
        if index < MAX_OPTIONS {
            (b'A' + index as u8) as char
        } else {
            '?'
        }
    }
}

/// An ordered quiz within a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub title: String,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub current_question: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

impl Assessment {
    /// True once every question has an answer.
    pub fn is_completed(&self) -> bool {
        self.questions.iter().all(Question::is_answered)
    }

    /// The question the learner is on, or `None` when completed.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index())
    }

    /// Index of the question the learner is on, `questions.len()` once completed.
    ///
    /// A pointer that is missing, out of range or on an answered question
    /// falls back to the first unanswered question.
    pub fn current_question_index(&self) -> usize {
        match self.current_question {
            Some(index) if self.questions.get(index).is_some_and(|q| !q.is_answered()) => index,
            _ => self
                .questions
                .iter()
                .position(|q| !q.is_answered())
                .unwrap_or(self.questions.len()),
        }
    }

    pub fn answered_count(&self) -> usize {
        self.questions.iter().filter(|q| q.is_answered()).count()
    }

    pub fn correct_count(&self) -> usize {
        self.questions.iter().filter(|q| q.is_correct()).count()
    }

    /// Percentage of correct answers, rounded to the nearest integer.
    pub fn calculate_score(&self) -> u32 {
        if self.questions.is_empty() {
            return 0;
        }
        let ratio = self.correct_count() as f64 / self.questions.len() as f64;
        (ratio * 100.0).round() as u32
    }

    /// Record `choice` for the current question and move to the next
    /// unanswered one.
    pub fn answer_current(&mut self, choice: usize) -> Result<(), ProgressError> {
        if self.is_completed() {
            return Err(ProgressError::AssessmentCompleted);
        }

        let index = self.current_question_index();
        let question = self
            .questions
            .get_mut(index)
            .ok_or(ProgressError::AssessmentCompleted)?;
        if choice >= question.options.len() {
            return Err(ProgressError::OptionOutOfRange {
                choice,
                available: question.options.len(),
            });
        }
        question.answer = Some(choice);

        let len = self.questions.len();
        let next = (index + 1..len)
            .chain(0..index)
            .find(|&i| !self.questions[i].is_answered())
            .unwrap_or(len);
        self.current_question = Some(next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn question(correct: usize, answer: Option<usize>) -> Question {
        Question {
            question: "Pick one".into(),
            options: vec!["a".into(), "b".into(), "c".into()],
            answer,
            correct_option: correct,
            explanation: String::new(),
            creation_time: None,
            update_time: None,
        }
    }

    fn assessment(questions: Vec<Question>) -> Assessment {
        Assessment {
            title: "Quiz".into(),
            questions,
            current_question: Some(0),
            creation_time: None,
            update_time: None,
        }
    }

    #[test]
    fn test_score_edge_cases() {
        assert_eq!(assessment(vec![]).calculate_score(), 0);

        let all_correct = assessment(vec![question(0, Some(0)), question(2, Some(2))]);
        assert_eq!(all_correct.calculate_score(), 100);

        let one_of_three = assessment(vec![
            question(0, Some(0)),
            question(1, Some(0)),
            question(2, None),
        ]);
        assert_eq!(one_of_three.calculate_score(), 33);

        let two_of_three = assessment(vec![
            question(0, Some(0)),
            question(1, Some(1)),
            question(2, None),
        ]);
        assert_eq!(two_of_three.calculate_score(), 67);
    }

    #[test]
    fn test_completion() {
        assert!(assessment(vec![]).is_completed());
        let partial = assessment(vec![question(0, Some(1)), question(0, None)]);
        assert!(!partial.is_completed());
        assert_eq!(partial.answered_count(), 1);
        let done = assessment(vec![question(0, Some(1)), question(0, Some(0))]);
        assert!(done.is_completed());
        assert!(done.current_question().is_none());
    }

    #[test]
    fn test_negative_answer_is_unanswered() {
        let q: Question = serde_json::from_value(json!({
            "question": "2 + 2?",
            "options": ["3", "4"],
            "answer": -1,
            "correctOption": 1,
            "explanation": "Arithmetic."
        }))
        .unwrap();
        assert!(!q.is_answered());
        assert!(!q.is_correct());
        assert_eq!(q.correct_answer(), Some("4"));
    }

    #[test]
    fn test_legacy_field_names() {
        let q: Question = serde_json::from_value(json!({
            "question": "Capital of France?",
            "choices": ["Rome", "Paris"],
            "correctChoice": 1
        }))
        .unwrap();
        assert_eq!(q.options.len(), 2);
        assert_eq!(q.correct_option, 1);
        assert_eq!(q.answer, None);
    }

    #[test]
    fn test_option_count_validity() {
        let mut q = question(0, None);
        assert!(q.is_valid());
        q.options.truncate(1);
        assert!(!q.is_valid());
        q.options = (0..27).map(|i| i.to_string()).collect();
        assert!(!q.is_valid());
        assert_eq!(Question::option_label(0), 'A');
        assert_eq!(Question::option_label(25), 'Z');
    }

    #[test]
    fn test_answer_current_advances() {
        let mut quiz = assessment(vec![question(0, None), question(1, None), question(2, None)]);

        quiz.answer_current(0).unwrap();
        assert_eq!(quiz.current_question_index(), 1);
        assert_eq!(
            quiz.answer_current(5),
            Err(ProgressError::OptionOutOfRange {
                choice: 5,
                available: 3
            })
        );
        quiz.answer_current(1).unwrap();
        quiz.answer_current(0).unwrap();

        assert!(quiz.is_completed());
        assert_eq!(quiz.current_question_index(), 3);
        assert_eq!(quiz.calculate_score(), 67);
        assert_eq!(quiz.answer_current(0), Err(ProgressError::AssessmentCompleted));
    }

    #[test]
    fn test_answer_current_wraps_to_skipped_question() {
        let mut quiz = assessment(vec![question(0, None), question(1, Some(1)), question(2, None)]);
        quiz.current_question = Some(2);
        quiz.answer_current(2).unwrap();
        assert_eq!(quiz.current_question_index(), 0);
    }

    #[test]
    fn test_out_of_range_pointer_falls_back_to_first_unanswered() {
        let mut quiz: Assessment = serde_json::from_value(json!({
            "title": "Quiz",
            "currentQuestion": 5,
            "questions": [
                {"question": "1?", "options": ["a", "b"], "correctOption": 0},
                {"question": "2?", "options": ["a", "b"], "correctOption": 1}
            ]
        }))
        .unwrap();

        assert_eq!(quiz.current_question_index(), 0);
        assert_eq!(quiz.current_question().unwrap().question, "1?");
        quiz.answer_current(0).unwrap();
        quiz.answer_current(1).unwrap();
        assert!(quiz.is_completed());
        assert_eq!(quiz.calculate_score(), 100);
    }

    #[test]
    fn test_recorded_answer_is_never_replaced() {
        let mut quiz = assessment(vec![question(0, Some(0)), question(1, None)]);
        assert_eq!(quiz.current_question, Some(0));

        quiz.answer_current(1).unwrap();
        assert_eq!(quiz.questions[0].answer, Some(0));
        assert_eq!(quiz.questions[1].answer, Some(1));
        assert!(quiz.is_completed());
    }
}
