use super::{AnswerState, Effect, submit_and_grade};
use crate::accessor::{TotalCounts, sequential_question, total_counts};
use crate::bank::Catalog;
use crate::models::{Question, QuestionKind, StudyProgress};
use crate::utils::now_millis;

/// Walks one kind's collection in bank order, resuming from the stored cursor.
#[derive(Debug, Clone)]
pub struct SequentialSession {
    subject_id: String,
    kind: QuestionKind,
    counts: TotalCounts,
    progress: StudyProgress,
    pub answer: AnswerState,
}

impl SequentialSession {
    pub fn new(catalog: &Catalog, subject_id: &str, progress: StudyProgress) -> Self {
        let counts = total_counts(catalog, subject_id);
        let kind = counts
            .available_kinds()
            .first()
            .copied()
            .unwrap_or(QuestionKind::Single);
        SequentialSession {
            subject_id: subject_id.to_string(),
            kind,
            counts,
            progress,
            answer: AnswerState::default(),
        }
    }

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    pub fn index(&self) -> usize {
        self.progress.index_for(self.kind)
    }

    pub fn total(&self) -> usize {
        self.counts.get(self.kind)
    }

    pub fn counts(&self) -> TotalCounts {
        self.counts
    }

    /// Past the last question of the current kind, or the kind is empty.
    pub fn is_complete(&self) -> bool {
        self.index() >= self.total()
    }

    pub fn current<'a>(&self, catalog: &'a Catalog) -> Option<&'a Question> {
        sequential_question(catalog, &self.subject_id, self.kind, self.index())
    }

    pub fn select(&mut self, catalog: &Catalog, letter: char) -> bool {
        match self.current(catalog) {
            Some(question) => self.answer.select(question, letter),
            None => false,
        }
    }

    pub fn submit(&mut self, catalog: &Catalog) -> Vec<Effect> {
        let index = self.index();
        match sequential_question(catalog, &self.subject_id, self.kind, index) {
            Some(question) => submit_and_grade(&mut self.answer, &self.subject_id, question, index),
            None => Vec::new(),
        }
    }

    /// Moves forward one question. Stepping past the last question lands on
    /// the completion state.
    pub fn next(&mut self) -> Vec<Effect> {
        let index = self.index();
        if index >= self.total() {
            return Vec::new();
        }
        self.move_to(index + 1)
    }

    pub fn prev(&mut self) -> Vec<Effect> {
        let index = self.index().min(self.total());
        if index == 0 {
            return Vec::new();
        }
        self.move_to(index - 1)
    }

    pub fn jump(&mut self, index: usize) -> Vec<Effect> {
        if index >= self.total() {
            return Vec::new();
        }
        self.move_to(index)
    }

    pub fn restart(&mut self) -> Vec<Effect> {
        self.move_to(0)
    }

    /// Switches collection and resumes that collection's stored cursor.
    /// Kinds without questions are not selectable.
    pub fn switch_kind(&mut self, kind: QuestionKind) -> bool {
        if kind == self.kind || self.counts.get(kind) == 0 {
            return false;
        }
        self.kind = kind;
        self.answer.reset();
        true
    }

    pub fn cycle_kind(&mut self) -> bool {
        let kinds = self.counts.available_kinds();
        let Some(pos) = kinds.iter().position(|k| *k == self.kind) else {
            return match kinds.first() {
                Some(kind) => self.switch_kind(*kind),
                None => false,
            };
        };
        self.switch_kind(kinds[(pos + 1) % kinds.len()])
    }

    fn move_to(&mut self, index: usize) -> Vec<Effect> {
        self.progress = self.progress.with_index(self.kind, index, now_millis());
        self.answer.reset();
        vec![Effect::SaveProgress {
            subject_id: self.subject_id.clone(),
            progress: self.progress,
        }]
    }
}
