//! Key bindings. Maps raw key events to [`Command`]s for the screen in focus.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    Home,
    /// A question on screen (sequential, random or a running exam).
    Question { submitted: bool },
    /// Sequential mode past its last question.
    Completed,
    /// Exam start or results screen.
    ExamIdle,
    Search,
    ReviewList,
    ReviewDetail,
    AnswerSheet,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetMove {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    GoHome,

    MenuUp,
    MenuDown,
    MenuSelect,
    NextSubject,
    PrevSubject,
    RequestClearWrongAnswers,
    RequestClearExamRecords,
    Confirm,
    Cancel,

    SelectOption(char),
    Submit,
    Next,
    Prev,
    SwitchKind,
    Restart,
    ToggleAnswerSheet,
    SheetMove(SheetMove),
    SheetJump,
    StartExam,
    FinishExam,

    SearchInput(char),
    SearchBackspace,
    SearchClear,

    CursorUp,
    CursorDown,
    OpenDetail,
    CloseDetail,
    CycleFilter,
    DeleteSelected,
}

pub fn map_key(context: InputContext, key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match context {
        InputContext::Confirm => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Command::Confirm),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Command::Cancel),
            _ => None,
        },
        InputContext::AnswerSheet => match key.code {
            KeyCode::Left => Some(Command::SheetMove(SheetMove::Left)),
            KeyCode::Right => Some(Command::SheetMove(SheetMove::Right)),
            KeyCode::Up => Some(Command::SheetMove(SheetMove::Up)),
            KeyCode::Down => Some(Command::SheetMove(SheetMove::Down)),
            KeyCode::Enter => Some(Command::SheetJump),
            KeyCode::Esc => Some(Command::ToggleAnswerSheet),
            KeyCode::Char('s') if ctrl => Some(Command::ToggleAnswerSheet),
            _ => None,
        },
        InputContext::Home => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Command::MenuUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Command::MenuDown),
            KeyCode::Enter => Some(Command::MenuSelect),
            KeyCode::Left => Some(Command::PrevSubject),
            KeyCode::Right | KeyCode::Tab => Some(Command::NextSubject),
            KeyCode::Char('c') => Some(Command::RequestClearWrongAnswers),
            KeyCode::Char('h') => Some(Command::RequestClearExamRecords),
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            _ => None,
        },
        InputContext::Question { submitted } => match key.code {
            KeyCode::Char('t') if ctrl => Some(Command::SwitchKind),
            KeyCode::Char('s') if ctrl => Some(Command::ToggleAnswerSheet),
            KeyCode::Char('f') if ctrl => Some(Command::FinishExam),
            KeyCode::Tab => Some(Command::SwitchKind),
            KeyCode::Enter if submitted => Some(Command::Next),
            KeyCode::Enter => Some(Command::Submit),
            KeyCode::Right => Some(Command::Next),
            KeyCode::Left => Some(Command::Prev),
            KeyCode::Char(c) if !ctrl && c.is_ascii_alphabetic() => {
                Some(Command::SelectOption(c.to_ascii_uppercase()))
            }
            KeyCode::Esc => Some(Command::GoHome),
            _ => None,
        },
        InputContext::Completed => match key.code {
            KeyCode::Enter | KeyCode::Char('r') => Some(Command::Restart),
            KeyCode::Left => Some(Command::Prev),
            KeyCode::Tab => Some(Command::SwitchKind),
            KeyCode::Char('t') if ctrl => Some(Command::SwitchKind),
            KeyCode::Char('s') if ctrl => Some(Command::ToggleAnswerSheet),
            KeyCode::Esc => Some(Command::GoHome),
            _ => None,
        },
        InputContext::ExamIdle => match key.code {
            KeyCode::Enter | KeyCode::Char('s') => Some(Command::StartExam),
            KeyCode::Esc | KeyCode::Char('q') => Some(Command::GoHome),
            _ => None,
        },
        InputContext::Search => match key.code {
            KeyCode::Char('u') if ctrl => Some(Command::SearchClear),
            KeyCode::Char(c) if !ctrl => Some(Command::SearchInput(c)),
            KeyCode::Backspace => Some(Command::SearchBackspace),
            KeyCode::Up => Some(Command::CursorUp),
            KeyCode::Down => Some(Command::CursorDown),
            KeyCode::Esc => Some(Command::GoHome),
            _ => None,
        },
        InputContext::ReviewList => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Command::CursorUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Command::CursorDown),
            KeyCode::Enter => Some(Command::OpenDetail),
            KeyCode::Tab => Some(Command::CycleFilter),
            KeyCode::Char('d') => Some(Command::DeleteSelected),
            KeyCode::Char('c') => Some(Command::RequestClearWrongAnswers),
            KeyCode::Esc | KeyCode::Char('q') => Some(Command::GoHome),
            _ => None,
        },
        InputContext::ReviewDetail => match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Command::CloseDetail),
            KeyCode::Char('d') => Some(Command::DeleteSelected),
            _ => None,
        },
    }
}
