use super::AnswerState;
use crate::accessor::search_questions;
use crate::bank::Catalog;
use crate::models::IndexedQuestion;

/// Keyword search with live results. Results are shown with their answer revealed.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    subject_id: String,
    query: String,
    results: Vec<IndexedQuestion>,
    selected: usize,
}

impl SearchSession {
    pub fn new(subject_id: &str) -> Self {
        SearchSession {
            subject_id: subject_id.to_string(),
            ..Default::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[IndexedQuestion] {
        &self.results
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&IndexedQuestion> {
        self.results.get(self.selected)
    }

    /// The revealed answer of the selected result.
    pub fn answer_state(&self) -> AnswerState {
        self.selected()
            .map(|entry| AnswerState::submitted(&entry.question.answer))
            .unwrap_or_default()
    }

    pub fn push_char(&mut self, catalog: &Catalog, c: char) {
        self.query.push(c);
        self.refresh(catalog);
    }

    pub fn backspace(&mut self, catalog: &Catalog) {
        if self.query.pop().is_some() {
            self.refresh(catalog);
        }
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.results.clear();
        self.selected = 0;
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.results.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn refresh(&mut self, catalog: &Catalog) {
        self.results = search_questions(catalog, &self.subject_id, &self.query);
        self.selected = 0;
        log::debug!("search {:?}: {} results", self.query, self.results.len());
    }
}
