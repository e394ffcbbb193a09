use crate::error::{QuizError, Result};
use crate::models::{Question, QuestionKind};
use std::path::Path;

pub mod raw;

use raw::{RawBank, RawQuestion};

pub const DEFAULT_SUBJECT: &str = "marx";

/// How a bank file groups its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankLayout {
    /// An object keyed by `单选题` / `多选题` / `判断题`.
    Grouped,
    /// A flat array; the type of each record is inferred from its fields.
    Flat,
}

#[derive(Debug, Clone, Copy)]
pub struct SubjectSource {
    pub id: &'static str,
    pub name: &'static str,
    pub file: &'static str,
    pub layout: BankLayout,
}

pub const SUBJECT_SOURCES: &[SubjectSource] = &[
    SubjectSource {
        id: "marx",
        name: "马克思主义基本原理",
        file: "marix.json",
        layout: BankLayout::Grouped,
    },
    SubjectSource {
        id: "bio",
        name: "生物化学",
        file: "bio.json",
        layout: BankLayout::Grouped,
    },
    SubjectSource {
        id: "med_bio",
        name: "临床生物化学",
        file: "med_bio.json",
        layout: BankLayout::Flat,
    },
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    pub single: Vec<Question>,
    pub multiple: Vec<Question>,
    pub true_false: Vec<Question>,
}

impl QuestionBank {
    pub fn questions(&self, kind: QuestionKind) -> &[Question] {
        match kind {
            QuestionKind::Single => &self.single,
            QuestionKind::Multiple => &self.multiple,
            QuestionKind::TrueFalse => &self.true_false,
        }
    }

    pub fn from_grouped(raw: RawBank) -> Self {
        QuestionBank {
            single: raw
                .single
                .into_iter()
                .map(|q| q.into_choice(QuestionKind::Single))
                .collect(),
            multiple: raw
                .multiple
                .into_iter()
                .map(|q| q.into_choice(QuestionKind::Multiple))
                .collect(),
            true_false: raw
                .true_false
                .into_iter()
                .map(RawQuestion::into_true_false)
                .collect(),
        }
    }

    /// Records with an option A are choice questions (multiple when the answer
    /// has more than one letter); the rest are true/false.
    pub fn from_flat(records: Vec<RawQuestion>) -> Self {
        let mut bank = QuestionBank::default();
        for record in records {
            if record.has_choices() {
                let letters = record.answer.chars().filter(|c| !c.is_whitespace()).count();
                if letters > 1 {
                    bank.multiple.push(record.into_choice(QuestionKind::Multiple));
                } else {
                    bank.single.push(record.into_choice(QuestionKind::Single));
                }
            } else {
                bank.true_false.push(record.into_true_false());
            }
        }
        bank
    }

    pub fn parse(json: &str, layout: BankLayout) -> serde_json::Result<Self> {
        Ok(match layout {
            BankLayout::Grouped => Self::from_grouped(serde_json::from_str(json)?),
            BankLayout::Flat => Self::from_flat(serde_json::from_str(json)?),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub bank: QuestionBank,
}

/// Every subject known to the application. Always contains the default subject.
#[derive(Debug, Clone)]
pub struct Catalog {
    subjects: Vec<Subject>,
}

impl Catalog {
    pub fn new(mut subjects: Vec<Subject>) -> Self {
        if !subjects.iter().any(|s| s.id == DEFAULT_SUBJECT) {
            let name = SUBJECT_SOURCES
                .iter()
                .find(|s| s.id == DEFAULT_SUBJECT)
                .map(|s| s.name)
                .unwrap_or(DEFAULT_SUBJECT);
            subjects.insert(
                0,
                Subject {
                    id: DEFAULT_SUBJECT.to_string(),
                    name: name.to_string(),
                    bank: QuestionBank::default(),
                },
            );
        }
        Catalog { subjects }
    }

    /// Loads every registered subject from `data_dir`. A missing file yields an
    /// empty bank; a malformed one is an error.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut subjects = Vec::with_capacity(SUBJECT_SOURCES.len());

        for source in SUBJECT_SOURCES {
            let path = data_dir.join(source.file);
            let bank = if path.is_file() {
                let content = std::fs::read_to_string(&path)?;
                QuestionBank::parse(&content, source.layout).map_err(|e| QuizError::Bank {
                    file: path.clone(),
                    source: e,
                })?
            } else {
                log::warn!(
                    "question bank {} not found, subject {} is empty",
                    path.display(),
                    source.id
                );
                QuestionBank::default()
            };

            log::info!(
                "loaded subject {}: {} single, {} multiple, {} true/false",
                source.id,
                bank.single.len(),
                bank.multiple.len(),
                bank.true_false.len()
            );

            subjects.push(Subject {
                id: source.id.to_string(),
                name: source.name.to_string(),
                bank,
            });
        }

        Ok(Catalog::new(subjects))
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn contains(&self, id: &str) -> bool {
        self.subjects.iter().any(|s| s.id == id)
    }

    /// The subject with `id`, or the default subject when `id` is unknown.
    pub fn subject(&self, id: &str) -> &Subject {
        self.subjects
            .iter()
            .find(|s| s.id == id)
            .or_else(|| self.subjects.iter().find(|s| s.id == DEFAULT_SUBJECT))
            .unwrap_or(&self.subjects[0])
    }

    /// Id of the subject after (or before, when `step` is negative) `id`, wrapping around.
    pub fn cycle(&self, id: &str, step: isize) -> &str {
        let len = self.subjects.len() as isize;
        let current = self
            .subjects
            .iter()
            .position(|s| s.id == id)
            .unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len) as usize;
        &self.subjects[next].id
    }
}
