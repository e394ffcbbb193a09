//! Mock exam: three ordered phases drawn at random, graded once at the end.

use super::{AnswerState, Effect};
use crate::accessor::{ExamPaper, exam_questions};
use crate::bank::Catalog;
use crate::models::{AnswerRecord, ExamRecord, IndexedQuestion, QuestionKind, accuracy_percent};
use rand::Rng;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamSummary {
    pub total: usize,
    pub correct: usize,
    pub accuracy: u32,
}

impl ExamSummary {
    pub fn wrong(&self) -> usize {
        self.total - self.correct
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamState {
    NotStarted,
    InProgress { phase: QuestionKind, index: usize },
    Finished(ExamSummary),
}

#[derive(Debug, Clone)]
pub struct ExamSession {
    subject_id: String,
    paper: ExamPaper,
    state: ExamState,
    /// Submitted answers keyed by (phase, position within the phase).
    answers: HashMap<(QuestionKind, usize), String>,
    pub answer: AnswerState,
}

impl ExamSession {
    pub fn new(subject_id: &str) -> Self {
        ExamSession {
            subject_id: subject_id.to_string(),
            paper: ExamPaper::default(),
            state: ExamState::NotStarted,
            answers: HashMap::new(),
            answer: AnswerState::default(),
        }
    }

    pub fn state(&self) -> ExamState {
        self.state
    }

    pub fn paper(&self) -> &ExamPaper {
        &self.paper
    }

    pub fn total(&self) -> usize {
        self.paper.total()
    }

    /// Draws a fresh paper and discards everything from the previous attempt.
    /// Returns false, staying `NotStarted`, when the subject has no questions.
    pub fn start<R: Rng + ?Sized>(&mut self, catalog: &Catalog, rng: &mut R) -> bool {
        self.paper = exam_questions(catalog, &self.subject_id, rng);
        self.answers.clear();
        self.answer.reset();

        match self.first_position() {
            Some((phase, index)) => {
                self.state = ExamState::InProgress { phase, index };
                log::info!(
                    "exam started for {}: {} single, {} multiple, {} true/false",
                    self.subject_id,
                    self.paper.single.len(),
                    self.paper.multiple.len(),
                    self.paper.true_false.len()
                );
                true
            }
            None => {
                self.state = ExamState::NotStarted;
                log::warn!("exam for {} has no questions", self.subject_id);
                false
            }
        }
    }

    pub fn current(&self) -> Option<&IndexedQuestion> {
        match self.state {
            ExamState::InProgress { phase, index } => self.paper.phase(phase).get(index),
            _ => None,
        }
    }

    pub fn select(&mut self, letter: char) -> bool {
        let ExamState::InProgress { phase, index } = self.state else {
            return false;
        };
        match self.paper.phase(phase).get(index) {
            Some(entry) => self.answer.select(&entry.question, letter),
            None => false,
        }
    }

    /// Stores the selection for the current question. Grading waits for `finish`.
    pub fn submit(&mut self) -> bool {
        let ExamState::InProgress { phase, index } = self.state else {
            return false;
        };
        if !self.answer.submit() {
            return false;
        }
        self.answers
            .insert((phase, index), self.answer.selected.clone());
        true
    }

    /// Advances within the phase, then into the next non-empty phase. Moving on
    /// from the last question finishes the exam.
    pub fn next(&mut self) -> Vec<Effect> {
        let ExamState::InProgress { phase, index } = self.state else {
            return Vec::new();
        };
        if index + 1 < self.paper.phase(phase).len() {
            self.move_to(phase, index + 1);
            return Vec::new();
        }
        match self.following_phase(phase) {
            Some(next_phase) => {
                self.move_to(next_phase, 0);
                Vec::new()
            }
            None => self.finish(),
        }
    }

    /// Moves to a position on the answer sheet, numbered across all phases.
    pub fn jump(&mut self, global: usize) -> bool {
        if !matches!(self.state, ExamState::InProgress { .. }) {
            return false;
        }
        match self.position_of(global) {
            Some((phase, index)) => {
                self.move_to(phase, index);
                true
            }
            None => false,
        }
    }

    /// Grades every question, unanswered ones as wrong, and ends the exam.
    pub fn finish(&mut self) -> Vec<Effect> {
        if !matches!(self.state, ExamState::InProgress { .. }) {
            return Vec::new();
        }

        let mut misses = Vec::new();
        let mut correct = 0;
        for kind in QuestionKind::ALL {
            for (position, entry) in self.paper.phase(kind).iter().enumerate() {
                let user_answer = self
                    .answers
                    .get(&(kind, position))
                    .map(String::as_str)
                    .unwrap_or("");
                if entry.question.is_correct(user_answer) {
                    correct += 1;
                } else {
                    misses.push(AnswerRecord::wrong(
                        &self.subject_id,
                        kind,
                        entry.index,
                        user_answer,
                        &entry.question.answer,
                    ));
                }
            }
        }

        let total = self.paper.total();
        let summary = ExamSummary {
            total,
            correct,
            accuracy: accuracy_percent(correct, total),
        };
        self.state = ExamState::Finished(summary);
        self.answer.reset();
        log::info!(
            "exam finished for {}: {}/{} correct ({}%)",
            self.subject_id,
            correct,
            total,
            summary.accuracy
        );

        let mut effects: Vec<Effect> = misses
            .iter()
            .map(|record| Effect::RecordWrongAnswer {
                subject_id: self.subject_id.clone(),
                record: record.clone(),
            })
            .collect();
        effects.push(Effect::SaveExamResults {
            subject_id: self.subject_id.clone(),
            results: misses,
        });
        effects.push(Effect::AppendExamRecord {
            subject_id: self.subject_id.clone(),
            record: ExamRecord::new(&self.subject_id, total, correct),
        });
        effects
    }

    /// Position of the current question on the answer sheet.
    pub fn global_position(&self) -> Option<usize> {
        let ExamState::InProgress { phase, index } = self.state else {
            return None;
        };
        let offset: usize = QuestionKind::ALL
            .into_iter()
            .take_while(|kind| *kind != phase)
            .map(|kind| self.paper.phase(kind).len())
            .sum();
        Some(offset + index)
    }

    pub fn is_answered(&self, global: usize) -> bool {
        self.position_of(global)
            .is_some_and(|key| self.answers.contains_key(&key))
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// (answered, total) within the current phase.
    pub fn phase_progress(&self) -> Option<(usize, usize)> {
        let ExamState::InProgress { phase, .. } = self.state else {
            return None;
        };
        let answered = self.answers.keys().filter(|(kind, _)| *kind == phase).count();
        Some((answered, self.paper.phase(phase).len()))
    }

    fn position_of(&self, global: usize) -> Option<(QuestionKind, usize)> {
        let mut remaining = global;
        for kind in QuestionKind::ALL {
            let len = self.paper.phase(kind).len();
            if remaining < len {
                return Some((kind, remaining));
            }
            remaining -= len;
        }
        None
    }

    fn first_position(&self) -> Option<(QuestionKind, usize)> {
        self.position_of(0)
    }

    fn following_phase(&self, phase: QuestionKind) -> Option<QuestionKind> {
        QuestionKind::ALL
            .into_iter()
            .skip_while(|kind| *kind != phase)
            .skip(1)
            .find(|kind| !self.paper.phase(*kind).is_empty())
    }

    fn move_to(&mut self, phase: QuestionKind, index: usize) {
        self.state = ExamState::InProgress { phase, index };
        self.answer = match self.answers.get(&(phase, index)) {
            Some(stored) => AnswerState::submitted(stored),
            None => AnswerState::default(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::Subject;
    use crate::test_support::{bank, sample_catalog};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn started(subject: &str) -> (Catalog, ExamSession) {
        let catalog = sample_catalog();
        let mut rng = StdRng::seed_from_u64(42);
        let mut exam = ExamSession::new(subject);
        assert!(exam.start(&catalog, &mut rng));
        (catalog, exam)
    }

    fn answer_current(exam: &mut ExamSession, correctly: bool) {
        let question = exam.current().unwrap().question.clone();
        let letters: String = if correctly {
            question.answer.clone()
        } else if question.answer == "A" {
            "B".to_string()
        } else {
            "A".to_string()
        };
        for letter in letters.chars() {
            exam.select(letter);
        }
        assert!(exam.submit());
    }

    #[test]
    fn test_start_enters_first_phase() {
        let (_, exam) = started("marx");
        assert_eq!(
            exam.state(),
            ExamState::InProgress {
                phase: QuestionKind::Single,
                index: 0
            }
        );
        assert_eq!(exam.total(), 40);
        assert_eq!(exam.global_position(), Some(0));
    }

    #[test]
    fn test_start_with_empty_bank_stays_not_started() {
        let catalog = Catalog::new(vec![]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut exam = ExamSession::new("marx");

        assert!(!exam.start(&catalog, &mut rng));
        assert_eq!(exam.state(), ExamState::NotStarted);
        assert!(exam.finish().is_empty());
    }

    #[test]
    fn test_next_skips_empty_phases() {
        let catalog = Catalog::new(vec![Subject {
            id: "marx".to_string(),
            name: "Marxism".to_string(),
            bank: bank(2, 0, 1, "marx"),
        }]);
        let mut rng = StdRng::seed_from_u64(9);
        let mut exam = ExamSession::new("marx");
        exam.start(&catalog, &mut rng);

        exam.next();
        exam.next();
        assert_eq!(
            exam.state(),
            ExamState::InProgress {
                phase: QuestionKind::TrueFalse,
                index: 0
            }
        );
        assert_eq!(exam.global_position(), Some(2));

        let effects = exam.next();
        assert!(matches!(exam.state(), ExamState::Finished(_)));
        assert!(!effects.is_empty());
    }

    #[test]
    fn test_jump_maps_global_index_to_phase() {
        let (_, mut exam) = started("marx");

        assert!(exam.jump(27));
        assert_eq!(
            exam.state(),
            ExamState::InProgress {
                phase: QuestionKind::Multiple,
                index: 2
            }
        );
        assert!(exam.jump(39));
        assert_eq!(
            exam.state(),
            ExamState::InProgress {
                phase: QuestionKind::TrueFalse,
                index: 9
            }
        );
        assert!(!exam.jump(40));
        assert_eq!(exam.global_position(), Some(39));
    }

    #[test]
    fn test_revisit_restores_submitted_answer() {
        let (_, mut exam) = started("marx");
        answer_current(&mut exam, true);
        let stored = exam.answer.selected.clone();

        exam.next();
        assert_eq!(exam.answer, AnswerState::default());
        assert!(exam.jump(0));
        assert_eq!(exam.answer, AnswerState::submitted(&stored));
        assert!(!exam.select('D'));
        assert!(exam.is_answered(0));
        assert!(!exam.is_answered(1));
    }

    #[test]
    fn test_submit_does_not_grade() {
        let (_, mut exam) = started("marx");
        answer_current(&mut exam, false);
        assert_eq!(exam.answered_count(), 1);
        assert_eq!(exam.phase_progress(), Some((1, 25)));
    }

    #[test]
    fn test_forty_questions_three_wrong_scores_93() {
        let (_, mut exam) = started("marx");
        let mut effects = Vec::new();
        for position in 0..40 {
            answer_current(&mut exam, position >= 3);
            effects = exam.next();
        }

        let ExamState::Finished(summary) = exam.state() else {
            panic!("exam should be finished");
        };
        assert_eq!(summary.total, 40);
        assert_eq!(summary.correct, 37);
        assert_eq!(summary.wrong(), 3);
        assert_eq!(summary.accuracy, 93);

        let recorded = effects
            .iter()
            .filter(|e| matches!(e, Effect::RecordWrongAnswer { .. }))
            .count();
        assert_eq!(recorded, 3);
        match &effects[effects.len() - 2] {
            Effect::SaveExamResults { results, .. } => assert_eq!(results.len(), 3),
            other => panic!("unexpected effect {:?}", other),
        }
        match effects.last() {
            Some(Effect::AppendExamRecord { record, .. }) => {
                assert_eq!(record.total_questions, 40);
                assert_eq!(record.correct_answers, 37);
                assert_eq!(record.accuracy, 93);
            }
            other => panic!("unexpected effect {:?}", other),
        }
    }

    #[test]
    fn test_finish_counts_unanswered_as_wrong() {
        let (_, mut exam) = started("bio");
        answer_current(&mut exam, true);

        let effects = exam.finish();
        let ExamState::Finished(summary) = exam.state() else {
            panic!("exam should be finished");
        };
        assert_eq!(summary.total, 7);
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.accuracy, 14);

        let blank = effects.iter().find_map(|e| match e {
            Effect::RecordWrongAnswer { record, .. } => Some(record),
            _ => None,
        });
        assert_eq!(blank.unwrap().user_answer, "");
    }

    #[test]
    fn test_miss_records_use_bank_index() {
        let (catalog, mut exam) = started("marx");
        exam.jump(30);
        let entry = exam.current().unwrap().clone();

        let effects = exam.finish();
        let record = effects
            .iter()
            .find_map(|e| match e {
                Effect::RecordWrongAnswer { record, .. }
                    if record.kind == QuestionKind::TrueFalse =>
                {
                    Some(record)
                }
                _ => None,
            })
            .unwrap();
        let first_tf = &exam.paper().true_false[0];
        assert_eq!(record.question_index, first_tf.index);
        assert_eq!(entry.index, first_tf.index);
        assert_eq!(
            &catalog.subject("marx").bank.true_false[record.question_index].answer,
            &record.correct_answer
        );
    }

    #[test]
    fn test_restart_resets_state() {
        let (catalog, mut exam) = started("bio");
        answer_current(&mut exam, true);
        exam.finish();

        let mut rng = StdRng::seed_from_u64(100);
        assert!(exam.start(&catalog, &mut rng));
        assert_eq!(exam.answered_count(), 0);
        assert_eq!(exam.global_position(), Some(0));
        assert_eq!(exam.answer, AnswerState::default());
    }
}
