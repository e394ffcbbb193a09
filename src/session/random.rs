use super::{AnswerState, Effect, submit_and_grade};
use crate::accessor::{TotalCounts, random_question, total_counts};
use crate::bank::Catalog;
use crate::models::{IndexedQuestion, QuestionKind};
use rand::Rng;

/// Independent draws from one kind's collection. Nothing about past draws is kept
/// except how many there were.
#[derive(Debug, Clone)]
pub struct RandomSession {
    subject_id: String,
    kind: QuestionKind,
    counts: TotalCounts,
    current: Option<IndexedQuestion>,
    drawn: usize,
    pub answer: AnswerState,
}

impl RandomSession {
    pub fn new<R: Rng + ?Sized>(catalog: &Catalog, subject_id: &str, rng: &mut R) -> Self {
        let counts = total_counts(catalog, subject_id);
        let kind = counts
            .available_kinds()
            .first()
            .copied()
            .unwrap_or(QuestionKind::Single);
        let mut session = RandomSession {
            subject_id: subject_id.to_string(),
            kind,
            counts,
            current: None,
            drawn: 0,
            answer: AnswerState::default(),
        };
        session.next(catalog, rng);
        session
    }

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    pub fn counts(&self) -> TotalCounts {
        self.counts
    }

    /// Number of questions drawn since entering the mode or switching kind.
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    pub fn current(&self) -> Option<&IndexedQuestion> {
        self.current.as_ref()
    }

    pub fn next<R: Rng + ?Sized>(&mut self, catalog: &Catalog, rng: &mut R) {
        self.current = random_question(catalog, &self.subject_id, self.kind, rng);
        if self.current.is_some() {
            self.drawn += 1;
        }
        self.answer.reset();
    }

    pub fn select(&mut self, letter: char) -> bool {
        match &self.current {
            Some(entry) => self.answer.select(&entry.question, letter),
            None => false,
        }
    }

    pub fn submit(&mut self) -> Vec<Effect> {
        match &self.current {
            Some(entry) => {
                submit_and_grade(&mut self.answer, &self.subject_id, &entry.question, entry.index)
            }
            None => Vec::new(),
        }
    }

    pub fn switch_kind<R: Rng + ?Sized>(
        &mut self,
        catalog: &Catalog,
        kind: QuestionKind,
        rng: &mut R,
    ) -> bool {
        if kind == self.kind || self.counts.get(kind) == 0 {
            return false;
        }
        self.kind = kind;
        self.drawn = 0;
        self.next(catalog, rng);
        true
    }

    pub fn cycle_kind<R: Rng + ?Sized>(&mut self, catalog: &Catalog, rng: &mut R) -> bool {
        let kinds = self.counts.available_kinds();
        let next = match kinds.iter().position(|k| *k == self.kind) {
            Some(pos) => kinds[(pos + 1) % kinds.len()],
            None => match kinds.first() {
                Some(kind) => *kind,
                None => return false,
            },
        };
        self.switch_kind(catalog, next, rng)
    }
}
