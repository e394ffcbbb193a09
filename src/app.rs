use crate::accessor::{TotalCounts, total_counts};
use crate::bank::{Catalog, DEFAULT_SUBJECT};
use crate::db;
use crate::error::Result;
use crate::input::{Command, InputContext, SheetMove, map_key};
use crate::models::{AnswerRecord, AppState};
use crate::session::{
    Effect, ExamSession, ExamState, RandomSession, ReviewSession, SearchSession,
    SequentialSession, apply_effects,
};
use crossterm::event::KeyEvent;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rusqlite::Connection;

/// Cells per row in the answer sheet grid.
pub const SHEET_COLUMNS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    ClearWrongAnswers,
    ClearExamRecords,
}

impl ConfirmAction {
    pub fn prompt(self) -> &'static str {
        match self {
            ConfirmAction::ClearWrongAnswers => {
                "Clear every recorded wrong answer for this subject? This cannot be undone."
            }
            ConfirmAction::ClearExamRecords => {
                "Clear the exam history for this subject? This cannot be undone."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HomeStats {
    pub counts: TotalCounts,
    pub best_score: Option<u32>,
    pub exam_count: usize,
    pub wrong_count: usize,
}

pub struct App {
    pub catalog: Catalog,
    conn: Connection,
    rng: StdRng,
    pub subject_id: String,
    pub state: AppState,
    pub menu_index: usize,
    pub stats: HomeStats,
    /// Misses of the subject's most recent exam.
    pub last_exam_misses: Vec<AnswerRecord>,
    pub sequential: Option<SequentialSession>,
    pub random: Option<RandomSession>,
    pub exam: ExamSession,
    pub search: SearchSession,
    pub review: Option<ReviewSession>,
    /// Answer sheet cursor while the sheet is open.
    pub sheet: Option<usize>,
    pub confirm: Option<ConfirmAction>,
    /// One-line message for the footer, cleared on the next key.
    pub status: Option<String>,
}

impl App {
    pub fn new(catalog: Catalog, conn: Connection, subject: Option<&str>) -> Result<Self> {
        Self::with_rng(catalog, conn, subject, StdRng::from_entropy())
    }

    /// Picks the requested subject, else the remembered one, else the default.
    pub fn with_rng(
        catalog: Catalog,
        conn: Connection,
        subject: Option<&str>,
        rng: StdRng,
    ) -> Result<Self> {
        let remembered = db::get_selected_subject(&conn)?;
        let subject_id = subject
            .map(str::to_string)
            .into_iter()
            .chain(remembered)
            .find(|id| catalog.contains(id))
            .unwrap_or_else(|| DEFAULT_SUBJECT.to_string());
        if let Some(requested) = subject
            && requested != subject_id
        {
            log::warn!("unknown subject {}, using {}", requested, subject_id);
        }

        let mut app = App {
            exam: ExamSession::new(&subject_id),
            search: SearchSession::new(&subject_id),
            catalog,
            conn,
            rng,
            subject_id,
            state: AppState::Home,
            menu_index: 0,
            stats: HomeStats::default(),
            last_exam_misses: Vec::new(),
            sequential: None,
            random: None,
            review: None,
            sheet: None,
            confirm: None,
            status: None,
        };
        app.refresh_stats()?;
        Ok(app)
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn subject_name(&self) -> &str {
        &self.catalog.subject(&self.subject_id).name
    }

    pub fn input_context(&self) -> InputContext {
        if self.confirm.is_some() {
            return InputContext::Confirm;
        }
        if self.sheet.is_some() {
            return InputContext::AnswerSheet;
        }
        match self.state {
            AppState::Home => InputContext::Home,
            AppState::Sequential => match &self.sequential {
                Some(seq) if !seq.is_complete() => InputContext::Question {
                    submitted: seq.answer.submitted,
                },
                _ => InputContext::Completed,
            },
            AppState::Random => InputContext::Question {
                submitted: self.random.as_ref().is_some_and(|r| r.answer.submitted),
            },
            AppState::Exam => match self.exam.state() {
                ExamState::InProgress { .. } => InputContext::Question {
                    submitted: self.exam.answer.submitted,
                },
                _ => InputContext::ExamIdle,
            },
            AppState::Search => InputContext::Search,
            AppState::Errors => match &self.review {
                Some(review) if review.is_detail() => InputContext::ReviewDetail,
                _ => InputContext::ReviewList,
            },
        }
    }

    /// Returns `Ok(false)` when the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        match map_key(self.input_context(), key) {
            Some(command) => {
                self.status = None;
                self.execute(command)
            }
            None => Ok(true),
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Quit => return Ok(false),
            Command::GoHome => self.go_home()?,

            Command::MenuUp => self.menu_index = self.menu_index.saturating_sub(1),
            Command::MenuDown => {
                self.menu_index = (self.menu_index + 1).min(AppState::MODES.len() - 1)
            }
            Command::MenuSelect => self.enter(AppState::MODES[self.menu_index])?,
            Command::NextSubject => self.cycle_subject(1)?,
            Command::PrevSubject => self.cycle_subject(-1)?,
            Command::RequestClearWrongAnswers => {
                self.confirm = Some(ConfirmAction::ClearWrongAnswers)
            }
            Command::RequestClearExamRecords => {
                self.confirm = Some(ConfirmAction::ClearExamRecords)
            }
            Command::Confirm => self.confirm_pending()?,
            Command::Cancel => self.confirm = None,

            Command::SelectOption(letter) => self.select_option(letter),
            Command::Submit => self.submit()?,
            Command::Next => self.next()?,
            Command::Prev => self.prev()?,
            Command::SwitchKind => self.switch_kind(),
            Command::Restart => {
                if let Some(seq) = self.sequential.as_mut() {
                    let effects = seq.restart();
                    self.apply(&effects)?;
                }
            }
            Command::ToggleAnswerSheet => self.toggle_sheet(),
            Command::SheetMove(direction) => self.move_sheet(direction),
            Command::SheetJump => self.sheet_jump()?,
            Command::StartExam => {
                if self.state == AppState::Exam && !self.exam.start(&self.catalog, &mut self.rng) {
                    self.status = Some("No questions available for this subject".to_string());
                }
            }
            Command::FinishExam => {
                if self.state == AppState::Exam {
                    let effects = self.exam.finish();
                    self.apply(&effects)?;
                }
            }

            Command::SearchInput(c) => self.search.push_char(&self.catalog, c),
            Command::SearchBackspace => self.search.backspace(&self.catalog),
            Command::SearchClear => self.search.clear(),

            Command::CursorUp => match self.state {
                AppState::Search => self.search.select_prev(),
                AppState::Errors => {
                    if let Some(review) = self.review.as_mut() {
                        review.select_prev();
                    }
                }
                _ => {}
            },
            Command::CursorDown => match self.state {
                AppState::Search => self.search.select_next(),
                AppState::Errors => {
                    if let Some(review) = self.review.as_mut() {
                        review.select_next();
                    }
                }
                _ => {}
            },
            Command::OpenDetail => {
                if let Some(review) = self.review.as_mut() {
                    review.open();
                }
            }
            Command::CloseDetail => {
                if let Some(review) = self.review.as_mut() {
                    review.close();
                }
            }
            Command::CycleFilter => {
                if let Some(review) = self.review.as_mut() {
                    review.cycle_filter();
                }
            }
            Command::DeleteSelected => {
                if let Some(review) = self.review.as_mut() {
                    let effects = review.delete_selected();
                    self.apply(&effects)?;
                }
            }
        }
        Ok(true)
    }

    fn apply(&mut self, effects: &[Effect]) -> Result<()> {
        if effects.is_empty() {
            return Ok(());
        }
        apply_effects(&self.conn, effects)?;
        if effects.iter().any(|e| {
            matches!(
                e,
                Effect::RecordWrongAnswer { .. }
                    | Effect::RemoveWrongAnswer { .. }
                    | Effect::ClearWrongAnswers { .. }
                    | Effect::SaveExamResults { .. }
                    | Effect::AppendExamRecord { .. }
                    | Effect::ClearExamRecords { .. }
            )
        }) {
            self.refresh_stats()?;
        }
        Ok(())
    }

    pub fn refresh_stats(&mut self) -> Result<()> {
        let records = db::get_exam_records(&self.conn, &self.subject_id)?;
        self.stats = HomeStats {
            counts: total_counts(&self.catalog, &self.subject_id),
            best_score: records.iter().map(|r| r.accuracy).max(),
            exam_count: records.len(),
            wrong_count: db::get_wrong_answers(&self.conn, &self.subject_id)?.len(),
        };
        self.last_exam_misses = db::get_exam_results(&self.conn, &self.subject_id)?;
        Ok(())
    }

    fn go_home(&mut self) -> Result<()> {
        self.state = AppState::Home;
        self.sheet = None;
        self.refresh_stats()
    }

    /// Builds the controller for `mode` from the current subject and stored state.
    pub fn enter(&mut self, mode: AppState) -> Result<()> {
        match mode {
            AppState::Home => return self.go_home(),
            AppState::Sequential => {
                let progress = db::get_progress(&self.conn, &self.subject_id)?;
                self.sequential = Some(SequentialSession::new(
                    &self.catalog,
                    &self.subject_id,
                    progress,
                ));
            }
            AppState::Random => {
                self.random = Some(RandomSession::new(
                    &self.catalog,
                    &self.subject_id,
                    &mut self.rng,
                ));
            }
            AppState::Search => self.search = SearchSession::new(&self.subject_id),
            AppState::Exam => self.exam = ExamSession::new(&self.subject_id),
            AppState::Errors => {
                let records = db::get_wrong_answers(&self.conn, &self.subject_id)?;
                self.review = Some(ReviewSession::new(&self.subject_id, records));
            }
        }
        log::debug!("entering {} for {}", mode.title(), self.subject_id);
        self.sheet = None;
        self.state = mode;
        Ok(())
    }

    fn cycle_subject(&mut self, step: isize) -> Result<()> {
        let next = self.catalog.cycle(&self.subject_id, step).to_string();
        self.set_subject(&next)
    }

    /// Switches subject, rebuilding every controller and remembering the choice.
    pub fn set_subject(&mut self, subject_id: &str) -> Result<()> {
        if subject_id == self.subject_id || !self.catalog.contains(subject_id) {
            return Ok(());
        }
        self.subject_id = subject_id.to_string();
        self.sequential = None;
        self.random = None;
        self.review = None;
        self.exam = ExamSession::new(subject_id);
        self.search = SearchSession::new(subject_id);
        self.apply(&[Effect::SelectSubject {
            subject_id: subject_id.to_string(),
        }])?;
        log::info!("subject switched to {}", subject_id);
        self.refresh_stats()
    }

    fn confirm_pending(&mut self) -> Result<()> {
        let Some(action) = self.confirm.take() else {
            return Ok(());
        };
        let effects = match action {
            ConfirmAction::ClearWrongAnswers => match self.review.as_mut() {
                Some(review) if self.state == AppState::Errors => review.clear_all(),
                _ => vec![Effect::ClearWrongAnswers {
                    subject_id: self.subject_id.clone(),
                }],
            },
            ConfirmAction::ClearExamRecords => vec![Effect::ClearExamRecords {
                subject_id: self.subject_id.clone(),
            }],
        };
        self.apply(&effects)?;
        self.status = Some(match action {
            ConfirmAction::ClearWrongAnswers => "Wrong answers cleared".to_string(),
            ConfirmAction::ClearExamRecords => "Exam history cleared".to_string(),
        });
        Ok(())
    }

    fn select_option(&mut self, letter: char) {
        match self.state {
            AppState::Sequential => {
                if let Some(seq) = self.sequential.as_mut() {
                    seq.select(&self.catalog, letter);
                }
            }
            AppState::Random => {
                if let Some(random) = self.random.as_mut() {
                    random.select(letter);
                }
            }
            AppState::Exam => {
                self.exam.select(letter);
            }
            _ => {}
        }
    }

    fn submit(&mut self) -> Result<()> {
        let effects = match self.state {
            AppState::Sequential => match self.sequential.as_mut() {
                Some(seq) => seq.submit(&self.catalog),
                None => Vec::new(),
            },
            AppState::Random => match self.random.as_mut() {
                Some(random) => random.submit(),
                None => Vec::new(),
            },
            AppState::Exam => {
                self.exam.submit();
                Vec::new()
            }
            _ => Vec::new(),
        };
        self.apply(&effects)
    }

    fn next(&mut self) -> Result<()> {
        let effects = match self.state {
            AppState::Sequential => match self.sequential.as_mut() {
                Some(seq) => seq.next(),
                None => Vec::new(),
            },
            AppState::Random => {
                if let Some(random) = self.random.as_mut() {
                    random.next(&self.catalog, &mut self.rng);
                }
                Vec::new()
            }
            AppState::Exam => self.exam.next(),
            _ => Vec::new(),
        };
        self.apply(&effects)
    }

    /// Only sequential study steps backwards; the exam revisits through the answer sheet.
    fn prev(&mut self) -> Result<()> {
        let effects = match self.state {
            AppState::Sequential => match self.sequential.as_mut() {
                Some(seq) => seq.prev(),
                None => Vec::new(),
            },
            _ => Vec::new(),
        };
        self.apply(&effects)
    }

    fn switch_kind(&mut self) {
        match self.state {
            AppState::Sequential => {
                if let Some(seq) = self.sequential.as_mut() {
                    seq.cycle_kind();
                }
            }
            AppState::Random => {
                if let Some(random) = self.random.as_mut() {
                    random.cycle_kind(&self.catalog, &mut self.rng);
                }
            }
            _ => {}
        }
    }

    /// (total cells, current position) for the answer sheet of the active mode.
    pub fn sheet_shape(&self) -> Option<(usize, Option<usize>)> {
        match self.state {
            AppState::Sequential => self.sequential.as_ref().map(|seq| {
                let current = (!seq.is_complete()).then(|| seq.index());
                (seq.total(), current)
            }),
            AppState::Exam => match self.exam.state() {
                ExamState::InProgress { .. } => {
                    Some((self.exam.total(), self.exam.global_position()))
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// Sequential mode counts everything before the cursor as done.
    pub fn is_sheet_cell_answered(&self, cell: usize) -> bool {
        match self.state {
            AppState::Sequential => self
                .sequential
                .as_ref()
                .is_some_and(|seq| cell < seq.index()),
            AppState::Exam => self.exam.is_answered(cell),
            _ => false,
        }
    }

    fn toggle_sheet(&mut self) {
        if self.sheet.is_some() {
            self.sheet = None;
            return;
        }
        if let Some((total, current)) = self.sheet_shape()
            && total > 0
        {
            self.sheet = Some(current.unwrap_or(0).min(total - 1));
        }
    }

    fn move_sheet(&mut self, direction: SheetMove) {
        let (Some(cursor), Some((total, _))) = (self.sheet, self.sheet_shape()) else {
            return;
        };
        if total == 0 {
            return;
        }
        let moved = match direction {
            SheetMove::Left => cursor.checked_sub(1),
            SheetMove::Right => Some(cursor + 1),
            SheetMove::Up => cursor.checked_sub(SHEET_COLUMNS),
            SheetMove::Down => Some(cursor + SHEET_COLUMNS),
        };
        if let Some(next) = moved
            && next < total
        {
            self.sheet = Some(next);
        }
    }

    fn sheet_jump(&mut self) -> Result<()> {
        let Some(cursor) = self.sheet.take() else {
            return Ok(());
        };
        let effects = match self.state {
            AppState::Sequential => match self.sequential.as_mut() {
                Some(seq) => seq.jump(cursor),
                None => Vec::new(),
            },
            AppState::Exam => {
                self.exam.jump(cursor);
                Vec::new()
            }
            _ => Vec::new(),
        };
        self.apply(&effects)
    }
}
