pub mod layout;
mod errors;
mod exam;
mod home;
mod overlay;
mod practice;
pub mod question;
mod search;

pub use errors::draw_errors;
pub use exam::draw_exam;
pub use home::draw_home;
pub use layout::{calculate_question_chunks, calculate_screen_chunks, centered_rect};
pub use overlay::{draw_answer_sheet, draw_confirmation};
pub use practice::{draw_random, draw_sequential};
pub use question::{draw_question_card, strip_option_label};
pub use search::draw_search;

use crate::app::App;
use crate::models::AppState;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn draw(f: &mut Frame, app: &App) {
    match app.state {
        AppState::Home => draw_home(f, app),
        AppState::Sequential => draw_sequential(f, app),
        AppState::Random => draw_random(f, app),
        AppState::Search => draw_search(f, app),
        AppState::Exam => draw_exam(f, app),
        AppState::Errors => draw_errors(f, app),
    }

    if let Some(cursor) = app.sheet {
        draw_answer_sheet(f, app, cursor);
    }
    if let Some(action) = app.confirm {
        draw_confirmation(f, action);
    }
    if let Some(status) = &app.status {
        draw_status(f, status);
    }
}

pub(crate) fn draw_title(f: &mut Frame, area: Rect, title: &str) {
    let header = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

/// Footer of `key  label` pairs.
pub(crate) fn draw_help(f: &mut Frame, area: Rect, keys: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (key, label) in keys {
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::from(format!(" {}  ", label)));
    }
    spans.push(Span::styled(
        "Ctrl+C",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::from(" Exit App"));

    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

fn draw_status(f: &mut Frame, status: &str) {
    let area = f.area();
    if area.height == 0 {
        return;
    }
    let line = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    f.render_widget(
        Paragraph::new(status.to_string())
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center),
        line,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{Catalog, Subject};
    use crate::db;
    use crate::input::{Command, SheetMove};
    use crate::models::{AnswerRecord, QuestionKind};
    use crate::test_support::{bank, memory_db, sample_catalog};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn create_test_app() -> App {
        App::with_rng(sample_catalog(), memory_db(), None, StdRng::seed_from_u64(6)).unwrap()
    }

    fn render(app: &App) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let mut out = String::new();
        for row in buffer.content.chunks(buffer.area.width as usize) {
            for cell in row {
                out.push_str(cell.symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_home_screen_renders() {
        let app = create_test_app();
        let screen = render(&app);
        assert!(screen.contains("Exam Prep"));
        assert!(screen.contains("Sequential Study"));
        assert!(screen.contains("Wrong Answers"));
    }

    #[test]
    fn test_every_mode_renders() {
        let mut app = create_test_app();
        for mode in AppState::MODES {
            app.enter(mode).unwrap();
            let screen = render(&app);
            assert!(screen.contains(mode.title()), "missing title for {:?}", mode);
        }
    }

    #[test]
    fn test_sequential_card_after_submit() {
        let mut app = create_test_app();
        app.enter(AppState::Sequential).unwrap();
        app.execute(Command::SelectOption('A')).unwrap();
        app.execute(Command::Submit).unwrap();

        let screen = render(&app);
        assert!(screen.contains("Single Choice 1/30"));
        assert!(screen.contains("Correct answer: A"));
    }

    #[test]
    fn test_overlays_render() {
        let mut app = create_test_app();
        app.enter(AppState::Sequential).unwrap();
        app.execute(Command::ToggleAnswerSheet).unwrap();
        assert!(render(&app).contains("Answer Sheet"));

        app.execute(Command::ToggleAnswerSheet).unwrap();
        app.execute(Command::GoHome).unwrap();
        app.execute(Command::RequestClearWrongAnswers).unwrap();
        assert!(render(&app).contains("Please Confirm"));
    }

    #[test]
    fn test_exam_results_render() {
        let mut app = create_test_app();
        app.enter(AppState::Exam).unwrap();
        app.execute(Command::StartExam).unwrap();
        app.execute(Command::FinishExam).unwrap();

        let screen = render(&app);
        assert!(screen.contains("Exam Finished"));
        assert!(screen.contains("Accuracy: 0%"));
    }

    fn large_catalog() -> Catalog {
        Catalog::new(vec![Subject {
            id: "marx".to_string(),
            name: "Marxism".to_string(),
            bank: bank(500, 0, 0, "marx"),
        }])
    }

    #[test]
    fn test_answer_sheet_scrolls_to_cursor() {
        let mut app =
            App::with_rng(large_catalog(), memory_db(), None, StdRng::seed_from_u64(6)).unwrap();
        app.enter(AppState::Sequential).unwrap();
        app.execute(Command::ToggleAnswerSheet).unwrap();
        for _ in 0..40 {
            app.execute(Command::SheetMove(SheetMove::Down)).unwrap();
        }
        assert_eq!(app.sheet, Some(400));

        let screen = render(&app);
        assert!(screen.contains(" 401 "));
        assert!(!screen.contains("   1 "));
    }

    #[test]
    fn test_wrong_answer_list_scrolls_to_cursor() {
        let conn = memory_db();
        for index in 0..60 {
            let record = AnswerRecord::wrong("marx", QuestionKind::Single, index, "B", "A");
            db::add_wrong_answer(&conn, "marx", &record).unwrap();
        }
        let mut app =
            App::with_rng(large_catalog(), conn, None, StdRng::seed_from_u64(6)).unwrap();
        app.enter(AppState::Errors).unwrap();
        for _ in 0..50 {
            app.execute(Command::CursorDown).unwrap();
        }

        let review = app.review.as_ref().unwrap();
        let selected = review.selected().unwrap();
        let stem = review.question_for(&app.catalog, selected).unwrap().stem.clone();
        assert_eq!(stem, "marx single question #50");
        assert!(render(&app).contains(&stem));
    }
}
