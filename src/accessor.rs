//! Read-only lookups over the catalog. Every function takes the subject id
//! explicitly and falls back to the default subject for unknown ids.

use crate::bank::Catalog;
use crate::models::{IndexedQuestion, Question, QuestionKind};
use rand::Rng;
use rand::seq::SliceRandom;

pub const EXAM_SINGLE_COUNT: usize = 25;
pub const EXAM_MULTIPLE_COUNT: usize = 5;
pub const EXAM_TRUE_FALSE_COUNT: usize = 10;

pub const SEARCH_RESULT_LIMIT: usize = 50;

pub fn exam_quota(kind: QuestionKind) -> usize {
    match kind {
        QuestionKind::Single => EXAM_SINGLE_COUNT,
        QuestionKind::Multiple => EXAM_MULTIPLE_COUNT,
        QuestionKind::TrueFalse => EXAM_TRUE_FALSE_COUNT,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TotalCounts {
    pub single: usize,
    pub multiple: usize,
    pub true_false: usize,
}

impl TotalCounts {
    pub fn get(&self, kind: QuestionKind) -> usize {
        match kind {
            QuestionKind::Single => self.single,
            QuestionKind::Multiple => self.multiple,
            QuestionKind::TrueFalse => self.true_false,
        }
    }

    pub fn total(&self) -> usize {
        self.single + self.multiple + self.true_false
    }

    /// Kinds offered by the type selector.
    pub fn available_kinds(&self) -> Vec<QuestionKind> {
        QuestionKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind) > 0)
            .collect()
    }
}

/// Questions drawn for one mock exam, grouped by phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamPaper {
    pub single: Vec<IndexedQuestion>,
    pub multiple: Vec<IndexedQuestion>,
    pub true_false: Vec<IndexedQuestion>,
}

impl ExamPaper {
    pub fn phase(&self, kind: QuestionKind) -> &[IndexedQuestion] {
        match kind {
            QuestionKind::Single => &self.single,
            QuestionKind::Multiple => &self.multiple,
            QuestionKind::TrueFalse => &self.true_false,
        }
    }

    pub fn total(&self) -> usize {
        self.single.len() + self.multiple.len() + self.true_false.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

pub fn sequential_question<'a>(
    catalog: &'a Catalog,
    subject_id: &str,
    kind: QuestionKind,
    index: usize,
) -> Option<&'a Question> {
    catalog.subject(subject_id).bank.questions(kind).get(index)
}

pub fn random_question<R: Rng + ?Sized>(
    catalog: &Catalog,
    subject_id: &str,
    kind: QuestionKind,
    rng: &mut R,
) -> Option<IndexedQuestion> {
    let questions = catalog.subject(subject_id).bank.questions(kind);
    if questions.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..questions.len());
    Some(IndexedQuestion {
        index,
        question: questions[index].clone(),
    })
}

fn sample_phase<R: Rng + ?Sized>(
    questions: &[Question],
    count: usize,
    rng: &mut R,
) -> Vec<IndexedQuestion> {
    let mut indices: Vec<usize> = (0..questions.len()).collect();
    indices.shuffle(rng);
    indices
        .into_iter()
        .take(count)
        .map(|index| IndexedQuestion {
            index,
            question: questions[index].clone(),
        })
        .collect()
}

pub fn exam_questions<R: Rng + ?Sized>(
    catalog: &Catalog,
    subject_id: &str,
    rng: &mut R,
) -> ExamPaper {
    let bank = &catalog.subject(subject_id).bank;
    ExamPaper {
        single: sample_phase(&bank.single, EXAM_SINGLE_COUNT, rng),
        multiple: sample_phase(&bank.multiple, EXAM_MULTIPLE_COUNT, rng),
        true_false: sample_phase(&bank.true_false, EXAM_TRUE_FALSE_COUNT, rng),
    }
}

pub fn total_counts(catalog: &Catalog, subject_id: &str) -> TotalCounts {
    let bank = &catalog.subject(subject_id).bank;
    TotalCounts {
        single: bank.single.len(),
        multiple: bank.multiple.len(),
        true_false: bank.true_false.len(),
    }
}

/// Questions whose stem or option text contains every whitespace-separated
/// term of `query`, case-insensitively. At most [`SEARCH_RESULT_LIMIT`] results.
pub fn search_questions(catalog: &Catalog, subject_id: &str, query: &str) -> Vec<IndexedQuestion> {
    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if terms.is_empty() {
        return Vec::new();
    }

    let bank = &catalog.subject(subject_id).bank;
    QuestionKind::ALL
        .into_iter()
        .flat_map(move |kind| bank.questions(kind).iter().enumerate())
        .filter(|(_, question)| {
            let haystack = searchable_text(question);
            terms.iter().all(|term| haystack.contains(term.as_str()))
        })
        .take(SEARCH_RESULT_LIMIT)
        .map(|(index, question)| IndexedQuestion {
            index,
            question: question.clone(),
        })
        .collect()
}

fn searchable_text(question: &Question) -> String {
    let mut text = question.stem.to_lowercase();
    if question.kind != QuestionKind::TrueFalse {
        for option in &question.options {
            text.push(' ');
            text.push_str(&option.text.to_lowercase());
        }
    }
    text
}
