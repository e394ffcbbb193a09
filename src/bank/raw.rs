//! On-disk shape of the question bank files and their normalization into [`Question`]s.

use crate::models::{Question, QuestionKind, QuestionOption};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// One record as it appears in the bank JSON. Option letters (`A`..`Z`) are
/// collected from the remaining keys.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuestion {
    #[serde(rename = "章节", default, deserialize_with = "null_as_empty")]
    pub chapter: String,
    #[serde(rename = "题干", default, deserialize_with = "null_as_empty")]
    pub stem: String,
    #[serde(rename = "答案", default, deserialize_with = "null_as_empty")]
    pub answer: String,
    #[serde(rename = "难度", default, deserialize_with = "null_as_empty")]
    pub difficulty: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Absent and `null` text fields both read as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Bank file grouped by question type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBank {
    #[serde(rename = "单选题", default)]
    pub single: Vec<RawQuestion>,
    #[serde(rename = "多选题", default)]
    pub multiple: Vec<RawQuestion>,
    #[serde(rename = "判断题", default)]
    pub true_false: Vec<RawQuestion>,
}

const TRUE_MARKERS: [&str; 8] = ["√", "✓", "✔", "对", "正确", "A", "T", "TRUE"];

impl RawQuestion {
    /// Non-empty option texts in letter order.
    pub fn options(&self) -> Vec<QuestionOption> {
        ('A'..='Z')
            .filter_map(|letter| {
                let text = self.extra.get(&letter.to_string())?.as_str()?.trim();
                (!text.is_empty()).then(|| QuestionOption {
                    letter,
                    text: text.to_string(),
                })
            })
            .collect()
    }

    pub fn has_choices(&self) -> bool {
        self.options().iter().any(|o| o.letter == 'A')
    }

    pub fn into_choice(self, kind: QuestionKind) -> Question {
        let options = self.options();
        Question {
            kind,
            chapter: self.chapter.trim().to_string(),
            stem: self.stem.trim().to_string(),
            options,
            answer: canonical_answer(&self.answer),
            difficulty: self.difficulty.trim().to_string(),
        }
    }

    pub fn into_true_false(self) -> Question {
        Question::true_false(self.stem.trim().to_string(), is_true_marker(&self.answer))
    }
}

/// Uppercase letters only, deduplicated and ascending: `" d,a b A"` becomes `"ABD"`.
pub fn canonical_answer(raw: &str) -> String {
    let mut letters: Vec<char> = raw
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    letters.sort_unstable();
    letters.dedup();
    letters.into_iter().collect()
}

pub fn is_true_marker(raw: &str) -> bool {
    let marker = raw.trim().to_uppercase();
    TRUE_MARKERS.contains(&marker.as_str())
}
