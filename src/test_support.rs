//! Fixture catalog shared by unit tests.

use crate::bank::{Catalog, QuestionBank, Subject};
use crate::models::{Question, QuestionKind, QuestionOption};

const LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

fn choice(kind: QuestionKind, stem: String, texts: [&str; 4], answer: &str) -> Question {
    Question {
        kind,
        chapter: "Chapter 1".to_string(),
        stem,
        options: LETTERS
            .iter()
            .zip(texts)
            .map(|(letter, text)| QuestionOption {
                letter: *letter,
                text: text.to_string(),
            })
            .collect(),
        answer: answer.to_string(),
        difficulty: "easy".to_string(),
    }
}

/// Single-choice answers cycle A, B, C, D by index.
pub fn single_answer(index: usize) -> String {
    LETTERS[index % 4].to_string()
}

pub fn multiple_answer(index: usize) -> &'static str {
    if index % 2 == 0 { "AC" } else { "ABD" }
}

pub fn bank(single: usize, multiple: usize, true_false: usize, prefix: &str) -> QuestionBank {
    QuestionBank {
        single: (0..single)
            .map(|i| {
                if i == 0 {
                    choice(
                        QuestionKind::Single,
                        format!("{prefix} 商品的二因素是什么"),
                        ["A、使用价值和价值", "B. 价值和价格", "C 劳动和资本", "D.供给和需求"],
                        "A",
                    )
                } else {
                    choice(
                        QuestionKind::Single,
                        format!("{prefix} single question #{i}"),
                        ["A. alpha", "B. beta", "C. gamma", "D. delta"],
                        &single_answer(i),
                    )
                }
            })
            .collect(),
        multiple: (0..multiple)
            .map(|i| {
                choice(
                    QuestionKind::Multiple,
                    format!("{prefix} multiple question #{i}"),
                    ["first", "second", "third", "fourth"],
                    multiple_answer(i),
                )
            })
            .collect(),
        true_false: (0..true_false)
            .map(|i| Question::true_false(format!("{prefix} statement #{i}"), i % 2 == 0))
            .collect(),
    }
}

/// `marx`: 30 single, 8 multiple, 12 true/false. `bio`: 3 / 2 / 2.
pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        Subject {
            id: "marx".to_string(),
            name: "Marxism".to_string(),
            bank: bank(30, 8, 12, "marx"),
        },
        Subject {
            id: "bio".to_string(),
            name: "Biochemistry".to_string(),
            bank: bank(3, 2, 2, "bio"),
        },
    ])
}

pub fn memory_db() -> rusqlite::Connection {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    crate::db::run_migrations(&conn).unwrap();
    conn
}
