use crate::utils::{new_id, now_millis};
use serde::{Deserialize, Serialize};

/// The three question collections every subject carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "single")]
    Single,
    #[serde(rename = "multiple")]
    Multiple,
    #[serde(rename = "trueFalse")]
    TrueFalse,
}

impl QuestionKind {
    /// Exam phase order.
    pub const ALL: [QuestionKind; 3] = [
        QuestionKind::Single,
        QuestionKind::Multiple,
        QuestionKind::TrueFalse,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::Single => "Single Choice",
            QuestionKind::Multiple => "Multiple Choice",
            QuestionKind::TrueFalse => "True / False",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            QuestionKind::Single => "Single",
            QuestionKind::Multiple => "Multiple",
            QuestionKind::TrueFalse => "T/F",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOption {
    pub letter: char,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub kind: QuestionKind,
    pub chapter: String,
    pub stem: String,
    /// Populated options in letter order. True/false questions always carry A = √, B = ×.
    pub options: Vec<QuestionOption>,
    /// Canonical answer: ascending, duplicate-free uppercase letters.
    pub answer: String,
    pub difficulty: String,
}

pub const TRUE_GLYPH: &str = "√";
pub const FALSE_GLYPH: &str = "×";

impl Question {
    pub fn true_false(stem: String, answer_is_true: bool) -> Self {
        Question {
            kind: QuestionKind::TrueFalse,
            chapter: String::new(),
            stem,
            options: vec![
                QuestionOption {
                    letter: 'A',
                    text: TRUE_GLYPH.to_string(),
                },
                QuestionOption {
                    letter: 'B',
                    text: FALSE_GLYPH.to_string(),
                },
            ],
            answer: if answer_is_true { "A" } else { "B" }.to_string(),
            difficulty: String::new(),
        }
    }

    pub fn has_option(&self, letter: char) -> bool {
        self.options.iter().any(|o| o.letter == letter)
    }

    pub fn is_correct(&self, selection: &str) -> bool {
        selection == self.answer
    }
}

/// A question together with its position in the owning bank collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedQuestion {
    pub index: usize,
    pub question: Question,
}

/// One wrong answer event, as stored in the wrong-answer log and the exam result buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub id: String,
    pub question_index: usize,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub user_answer: String,
    pub correct_answer: String,
    #[serde(default)]
    pub is_correct: bool,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
}

impl AnswerRecord {
    pub fn wrong(
        subject_id: &str,
        kind: QuestionKind,
        question_index: usize,
        user_answer: &str,
        correct_answer: &str,
    ) -> Self {
        AnswerRecord {
            id: new_id(),
            question_index,
            kind,
            user_answer: user_answer.to_string(),
            correct_answer: correct_answer.to_string(),
            is_correct: false,
            timestamp: now_millis(),
            subject_id: Some(subject_id.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRecord {
    pub id: String,
    pub total_questions: usize,
    pub correct_answers: usize,
    pub accuracy: u32,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
}

impl ExamRecord {
    pub fn new(subject_id: &str, total_questions: usize, correct_answers: usize) -> Self {
        ExamRecord {
            id: new_id(),
            total_questions,
            correct_answers,
            accuracy: accuracy_percent(correct_answers, total_questions),
            timestamp: now_millis(),
            subject_id: Some(subject_id.to_string()),
        }
    }
}

/// `round(correct / total * 100)`, 0 for an empty exam.
pub fn accuracy_percent(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyProgress {
    pub single_index: usize,
    pub multiple_index: usize,
    pub true_false_index: usize,
    pub last_updated: i64,
}

impl StudyProgress {
    pub fn index_for(&self, kind: QuestionKind) -> usize {
        match kind {
            QuestionKind::Single => self.single_index,
            QuestionKind::Multiple => self.multiple_index,
            QuestionKind::TrueFalse => self.true_false_index,
        }
    }

    pub fn with_index(mut self, kind: QuestionKind, index: usize, now: i64) -> Self {
        match kind {
            QuestionKind::Single => self.single_index = index,
            QuestionKind::Multiple => self.multiple_index = index,
            QuestionKind::TrueFalse => self.true_false_index = index,
        }
        self.last_updated = now;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Home,
    Sequential,
    Random,
    Search,
    Exam,
    Errors,
}

impl AppState {
    /// Entries of the home menu, in display order.
    pub const MODES: [AppState; 5] = [
        AppState::Sequential,
        AppState::Random,
        AppState::Search,
        AppState::Exam,
        AppState::Errors,
    ];

    pub fn title(self) -> &'static str {
        match self {
            AppState::Home => "Home",
            AppState::Sequential => "Sequential Study",
            AppState::Random => "Random Drill",
            AppState::Search => "Search",
            AppState::Exam => "Mock Exam",
            AppState::Errors => "Wrong Answers",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_rounds_to_nearest_percent() {
        assert_eq!(accuracy_percent(37, 40), 93);
        assert_eq!(accuracy_percent(1, 3), 33);
        assert_eq!(accuracy_percent(2, 3), 67);
        assert_eq!(accuracy_percent(0, 0), 0);
        assert_eq!(accuracy_percent(40, 40), 100);
    }

    #[test]
    fn test_answer_record_json_shape() {
        let record = AnswerRecord::wrong("marx", QuestionKind::TrueFalse, 4, "B", "A");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["type"], "trueFalse");
        assert_eq!(value["questionIndex"], 4);
        assert_eq!(value["userAnswer"], "B");
        assert_eq!(value["correctAnswer"], "A");
        assert_eq!(value["isCorrect"], false);
        assert_eq!(value["subjectId"], "marx");
        assert!(!record.id.is_empty());
    }

    #[test]
    fn test_answer_record_without_subject_parses() {
        let json = r#"{"id":"x1","questionIndex":2,"type":"multiple","userAnswer":"AB","correctAnswer":"ABD","isCorrect":false,"timestamp":17}"#;
        let record: AnswerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, QuestionKind::Multiple);
        assert_eq!(record.subject_id, None);
    }

    #[test]
    fn test_progress_with_index_overwrites_only_one_kind() {
        let progress = StudyProgress::default()
            .with_index(QuestionKind::Single, 7, 100)
            .with_index(QuestionKind::TrueFalse, 2, 200);

        assert_eq!(progress.index_for(QuestionKind::Single), 7);
        assert_eq!(progress.index_for(QuestionKind::Multiple), 0);
        assert_eq!(progress.index_for(QuestionKind::TrueFalse), 2);
        assert_eq!(progress.last_updated, 200);
    }

    #[test]
    fn test_true_false_question_shape() {
        let q = Question::true_false("Stem".to_string(), true);
        assert_eq!(q.answer, "A");
        assert_eq!(q.options.len(), 2);
        assert!(q.has_option('A'));
        assert!(q.has_option('B'));
        assert!(!q.has_option('C'));
        assert!(q.is_correct("A"));
    }
}
