//! Per-mode controllers. Controllers never touch storage: every action returns
//! the persistence side effects it implies, and the caller applies them with
//! [`apply_effects`].

use crate::db;
use crate::error::Result;
use crate::models::{AnswerRecord, ExamRecord, Question, QuestionKind, StudyProgress};
use rusqlite::Connection;

pub mod exam;
pub mod random;
pub mod review;
pub mod search;
pub mod sequential;

pub use exam::{ExamSession, ExamState, ExamSummary};
pub use random::RandomSession;
pub use review::{ReviewFilter, ReviewSession};
pub use search::SearchSession;
pub use sequential::SequentialSession;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RecordWrongAnswer {
        subject_id: String,
        record: AnswerRecord,
    },
    RemoveWrongAnswer {
        subject_id: String,
        id: String,
    },
    ClearWrongAnswers {
        subject_id: String,
    },
    SaveProgress {
        subject_id: String,
        progress: StudyProgress,
    },
    SaveExamResults {
        subject_id: String,
        results: Vec<AnswerRecord>,
    },
    AppendExamRecord {
        subject_id: String,
        record: ExamRecord,
    },
    ClearExamRecords {
        subject_id: String,
    },
    SelectSubject {
        subject_id: String,
    },
}

/// Applies effects in order. Stops at the first failure; earlier writes stay.
pub fn apply_effects(conn: &Connection, effects: &[Effect]) -> Result<()> {
    for effect in effects {
        match effect {
            Effect::RecordWrongAnswer { subject_id, record } => {
                db::add_wrong_answer(conn, subject_id, record)?;
                log::info!(
                    "wrong answer recorded: {} {:?} #{} ({} vs {})",
                    subject_id,
                    record.kind,
                    record.question_index,
                    record.user_answer,
                    record.correct_answer
                );
            }
            Effect::RemoveWrongAnswer { subject_id, id } => {
                db::remove_wrong_answer(conn, subject_id, id)?
            }
            Effect::ClearWrongAnswers { subject_id } => db::clear_wrong_answers(conn, subject_id)?,
            Effect::SaveProgress {
                subject_id,
                progress,
            } => db::set_progress(conn, subject_id, progress)?,
            Effect::SaveExamResults {
                subject_id,
                results,
            } => db::save_exam_results(conn, subject_id, results)?,
            Effect::AppendExamRecord { subject_id, record } => {
                db::save_exam_record(conn, subject_id, record)?
            }
            Effect::ClearExamRecords { subject_id } => {
                db::clear_exam_records(conn, subject_id)?;
                db::clear_exam_results(conn, subject_id)?;
            }
            Effect::SelectSubject { subject_id } => db::set_selected_subject(conn, subject_id)?,
        }
    }
    Ok(())
}

/// Adds or removes `letter` from a multiple-choice selection, keeping it sorted
/// and duplicate-free.
pub fn toggle_letter(selection: &str, letter: char) -> String {
    let mut letters: Vec<char> = selection.chars().collect();
    if let Some(pos) = letters.iter().position(|c| *c == letter) {
        letters.remove(pos);
    } else {
        letters.push(letter);
    }
    letters.sort_unstable();
    letters.dedup();
    letters.into_iter().collect()
}

/// Selection and submission state of the question on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerState {
    pub selected: String,
    pub submitted: bool,
}

impl AnswerState {
    /// A frozen answer, used when revisiting a question that was already answered.
    pub fn submitted(answer: &str) -> Self {
        AnswerState {
            selected: answer.to_string(),
            submitted: true,
        }
    }

    /// Returns whether the selection changed.
    pub fn select(&mut self, question: &Question, letter: char) -> bool {
        let letter = letter.to_ascii_uppercase();
        if self.submitted || !question.has_option(letter) {
            return false;
        }
        let next = match question.kind {
            QuestionKind::Multiple => toggle_letter(&self.selected, letter),
            QuestionKind::Single | QuestionKind::TrueFalse => letter.to_string(),
        };
        let changed = next != self.selected;
        self.selected = next;
        changed
    }

    pub fn can_submit(&self) -> bool {
        !self.submitted && !self.selected.is_empty()
    }

    /// Freezes the selection. Returns false when there is nothing to submit.
    pub fn submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.submitted = true;
        true
    }

    pub fn is_correct(&self, question: &Question) -> bool {
        question.is_correct(&self.selected)
    }

    pub fn reset(&mut self) {
        self.selected.clear();
        self.submitted = false;
    }
}

/// Submits the current selection and returns the wrong-answer effect when it misses.
pub(crate) fn submit_and_grade(
    answer: &mut AnswerState,
    subject_id: &str,
    question: &Question,
    question_index: usize,
) -> Vec<Effect> {
    if !answer.submit() {
        return Vec::new();
    }
    if answer.is_correct(question) {
        return Vec::new();
    }
    vec![Effect::RecordWrongAnswer {
        subject_id: subject_id.to_string(),
        record: AnswerRecord::wrong(
            subject_id,
            question.kind,
            question_index,
            &answer.selected,
            &question.answer,
        ),
    }]
}
