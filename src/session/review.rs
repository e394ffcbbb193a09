use super::{AnswerState, Effect};
use crate::accessor::sequential_question;
use crate::bank::Catalog;
use crate::models::{AnswerRecord, Question, QuestionKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReviewFilter {
    #[default]
    All,
    Only(QuestionKind),
}

impl ReviewFilter {
    pub fn next(self) -> Self {
        match self {
            ReviewFilter::All => ReviewFilter::Only(QuestionKind::Single),
            ReviewFilter::Only(QuestionKind::Single) => ReviewFilter::Only(QuestionKind::Multiple),
            ReviewFilter::Only(QuestionKind::Multiple) => {
                ReviewFilter::Only(QuestionKind::TrueFalse)
            }
            ReviewFilter::Only(QuestionKind::TrueFalse) => ReviewFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReviewFilter::All => "All",
            ReviewFilter::Only(kind) => kind.short_label(),
        }
    }

    pub fn matches(self, record: &AnswerRecord) -> bool {
        match self {
            ReviewFilter::All => true,
            ReviewFilter::Only(kind) => record.kind == kind,
        }
    }
}

/// Browses the wrong-answer log of one subject.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    subject_id: String,
    records: Vec<AnswerRecord>,
    filter: ReviewFilter,
    cursor: usize,
    detail: bool,
}

impl ReviewSession {
    pub fn new(subject_id: &str, records: Vec<AnswerRecord>) -> Self {
        ReviewSession {
            subject_id: subject_id.to_string(),
            records,
            filter: ReviewFilter::All,
            cursor: 0,
            detail: false,
        }
    }

    pub fn filter(&self) -> ReviewFilter {
        self.filter
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_detail(&self) -> bool {
        self.detail
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn visible(&self) -> Vec<&AnswerRecord> {
        self.records
            .iter()
            .filter(|r| self.filter.matches(r))
            .collect()
    }

    pub fn selected(&self) -> Option<&AnswerRecord> {
        self.records
            .iter()
            .filter(|r| self.filter.matches(r))
            .nth(self.cursor)
    }

    /// The bank question a record points at. `None` when the bank no longer has it.
    pub fn question_for<'a>(&self, catalog: &'a Catalog, record: &AnswerRecord) -> Option<&'a Question> {
        sequential_question(catalog, &self.subject_id, record.kind, record.question_index)
    }

    /// The recorded wrong answer, frozen as a submitted selection.
    pub fn answer_state(&self) -> AnswerState {
        self.selected()
            .map(|r| AnswerState::submitted(&r.user_answer))
            .unwrap_or_default()
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.cursor = 0;
        self.detail = false;
    }

    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.visible().len() {
            self.cursor += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn open(&mut self) {
        self.detail = self.selected().is_some();
    }

    pub fn close(&mut self) {
        self.detail = false;
    }

    /// Drops the selected record from the log.
    pub fn delete_selected(&mut self) -> Vec<Effect> {
        let Some(id) = self.selected().map(|r| r.id.clone()) else {
            return Vec::new();
        };
        self.records.retain(|r| r.id != id);
        self.detail = false;
        let remaining = self.visible().len();
        if self.cursor >= remaining {
            self.cursor = remaining.saturating_sub(1);
        }
        vec![Effect::RemoveWrongAnswer {
            subject_id: self.subject_id.clone(),
            id,
        }]
    }

    pub fn clear_all(&mut self) -> Vec<Effect> {
        self.records.clear();
        self.cursor = 0;
        self.detail = false;
        vec![Effect::ClearWrongAnswers {
            subject_id: self.subject_id.clone(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_catalog;

    fn records() -> Vec<AnswerRecord> {
        vec![
            AnswerRecord::wrong("marx", QuestionKind::Single, 1, "A", "B"),
            AnswerRecord::wrong("marx", QuestionKind::Multiple, 0, "A", "AC"),
            AnswerRecord::wrong("marx", QuestionKind::TrueFalse, 3, "A", "B"),
            AnswerRecord::wrong("marx", QuestionKind::Single, 2, "A", "C"),
        ]
    }

    #[test]
    fn test_filter_cycle() {
        let mut session = ReviewSession::new("marx", records());
        assert_eq!(session.visible().len(), 4);

        session.cycle_filter();
        assert_eq!(session.filter(), ReviewFilter::Only(QuestionKind::Single));
        assert_eq!(session.visible().len(), 2);
        session.cycle_filter();
        assert_eq!(session.visible().len(), 1);
        session.cycle_filter();
        assert_eq!(session.filter().label(), "T/F");
        assert_eq!(session.visible().len(), 1);
        session.cycle_filter();
        assert_eq!(session.filter(), ReviewFilter::All);
    }

    #[test]
    fn test_detail_resolves_question_and_user_answer() {
        let catalog = sample_catalog();
        let mut session = ReviewSession::new("marx", records());
        session.select_next();
        session.open();

        assert!(session.is_detail());
        let record = session.selected().unwrap();
        let question = session.question_for(&catalog, record).unwrap();
        assert_eq!(question.stem, "marx multiple question #0");
        assert_eq!(session.answer_state(), AnswerState::submitted("A"));
    }

    #[test]
    fn test_delete_selected_emits_remove() {
        let mut session = ReviewSession::new("marx", records());
        session.cycle_filter();
        session.select_next();
        let target = session.selected().unwrap().id.clone();

        let effects = session.delete_selected();
        assert_eq!(
            effects,
            vec![Effect::RemoveWrongAnswer {
                subject_id: "marx".to_string(),
                id: target,
            }]
        );
        assert_eq!(session.visible().len(), 1);
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn test_clear_all() {
        let mut session = ReviewSession::new("marx", records());
        let effects = session.clear_all();
        assert!(session.is_empty());
        assert!(matches!(
            effects.as_slice(),
            [Effect::ClearWrongAnswers { subject_id }] if subject_id == "marx"
        ));
        assert!(session.delete_selected().is_empty());
    }

    #[test]
    fn test_missing_bank_question_is_none() {
        let catalog = sample_catalog();
        let record = AnswerRecord::wrong("bio", QuestionKind::Single, 40, "A", "B");
        let session = ReviewSession::new("bio", vec![record.clone()]);
        assert!(session.question_for(&catalog, &record).is_none());
    }
}
