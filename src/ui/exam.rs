use super::question::draw_question_card;
use super::{draw_help, draw_title};
use crate::accessor::{
    EXAM_MULTIPLE_COUNT, EXAM_SINGLE_COUNT, EXAM_TRUE_FALSE_COUNT, sequential_question,
};
use crate::app::App;
use crate::models::{AnswerRecord, FALSE_GLYPH, QuestionKind, TRUE_GLYPH};
use crate::session::{ExamSession, ExamState, ExamSummary};
use crate::ui::layout::{calculate_question_chunks, calculate_screen_chunks};
use crate::utils::truncate_string;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

pub fn phase_line(exam: &ExamSession) -> Option<String> {
    let ExamState::InProgress { phase, index } = exam.state() else {
        return None;
    };
    let (answered, total) = exam.phase_progress()?;
    Some(format!(
        "{} - question {} of {} - {} answered - {}/{} overall",
        phase.label(),
        index + 1,
        total,
        answered,
        exam.answered_count(),
        exam.total()
    ))
}

fn intro_text() -> Text<'static> {
    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        "Mock Exam",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(format!(
        "{} single choice, {} multiple choice, {} true/false",
        EXAM_SINGLE_COUNT, EXAM_MULTIPLE_COUNT, EXAM_TRUE_FALSE_COUNT
    )));
    text.push_line(Line::from(
        "Questions are drawn at random. Answers are graded when the exam ends;",
    ));
    text.push_line(Line::from("unanswered questions count as wrong."));
    text
}

pub fn results_text(summary: &ExamSummary) -> Text<'static> {
    let color = if summary.accuracy >= 60 {
        Color::Green
    } else {
        Color::Red
    };
    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        "Exam Finished",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        format!("Accuracy: {}%", summary.accuracy),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(format!("Correct: {}", summary.correct)));
    text.push_line(Line::from(format!("Wrong: {}", summary.wrong())));
    text.push_line(Line::from(format!("Total: {}", summary.total)));
    text
}

fn answer_label(kind: QuestionKind, letters: &str) -> String {
    match (kind, letters) {
        (_, "") => "-".to_string(),
        (QuestionKind::TrueFalse, "A") => TRUE_GLYPH.to_string(),
        (QuestionKind::TrueFalse, _) => FALSE_GLYPH.to_string(),
        _ => letters.to_string(),
    }
}

/// One line per missed question: kind, bank number, stem, both answers.
pub fn miss_line(app: &App, record: &AnswerRecord, width: usize) -> String {
    let kind = record.kind;
    let stem = sequential_question(&app.catalog, &app.subject_id, kind, record.question_index)
        .map(|q| q.stem.as_str())
        .unwrap_or("(question no longer in the bank)");
    format!(
        "{:<9}#{:<5}{}  yours: {}  correct: {}",
        kind.short_label(),
        record.question_index + 1,
        truncate_string(stem, width),
        answer_label(kind, &record.user_answer),
        answer_label(kind, &record.correct_answer)
    )
}

pub fn draw_exam(f: &mut Frame, app: &App) {
    let exam = &app.exam;
    match exam.state() {
        ExamState::InProgress { .. } => {
            let layout = calculate_question_chunks(f.area());
            draw_title(
                f,
                layout.header_area,
                &format!("Mock Exam - {}", app.subject_name()),
            );
            if let Some(line) = phase_line(exam) {
                f.render_widget(
                    Paragraph::new(line)
                        .style(Style::default().fg(Color::DarkGray))
                        .alignment(Alignment::Center),
                    layout.tabs_area,
                );
            }
            if let (Some(entry), Some(position)) = (exam.current(), exam.global_position()) {
                draw_question_card(
                    f,
                    layout.card_area,
                    &entry.question,
                    position + 1,
                    exam.total(),
                    &exam.answer,
                );
            }
            let enter = if exam.answer.submitted {
                ("Enter", "Next")
            } else {
                ("Enter", "Submit")
            };
            draw_help(
                f,
                layout.help_area,
                &[
                    ("A-Z", "Choose"),
                    enter,
                    ("→", "Next"),
                    ("Ctrl+S", "Answer Sheet"),
                    ("Ctrl+F", "Finish"),
                    ("Esc", "Home"),
                ],
            );
        }
        state => {
            let layout = calculate_screen_chunks(f.area());
            draw_title(
                f,
                layout.header_area,
                &format!("Mock Exam - {}", app.subject_name()),
            );
            let (text, start) = match state {
                ExamState::Finished(summary) => (results_text(&summary), "Retake"),
                _ => (intro_text(), "Start"),
            };
            let body = Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL));

            if app.last_exam_misses.is_empty() {
                f.render_widget(body, layout.body_area);
            } else {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(9), Constraint::Min(3)])
                    .split(layout.body_area);
                f.render_widget(body, rows[0]);

                let width = rows[1].width.saturating_sub(40) as usize;
                let items: Vec<ListItem> = app
                    .last_exam_misses
                    .iter()
                    .map(|record| ListItem::new(miss_line(app, record, width)))
                    .collect();
                let title = format!("Missed in the last exam ({})", items.len());
                f.render_widget(
                    List::new(items)
                        .style(Style::default().fg(Color::Red))
                        .block(Block::default().borders(Borders::ALL).title(title)),
                    rows[1],
                );
            }
            draw_help(f, layout.help_area, &[("Enter", start), ("Esc", "Home")]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Command;
    use crate::models::AppState;
    use crate::test_support::{memory_db, sample_catalog};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_phase_line() {
        let catalog = sample_catalog();
        let mut exam = ExamSession::new("marx");
        assert_eq!(phase_line(&exam), None);

        exam.start(&catalog, &mut StdRng::seed_from_u64(4));
        exam.jump(26);
        assert_eq!(
            phase_line(&exam).unwrap(),
            "Multiple Choice - question 2 of 5 - 0 answered - 0/40 overall"
        );
    }

    #[test]
    fn test_results_text() {
        let summary = ExamSummary {
            total: 40,
            correct: 37,
            accuracy: 93,
        };
        let lines: Vec<String> = results_text(&summary)
            .lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert!(lines.contains(&"Accuracy: 93%".to_string()));
        assert!(lines.contains(&"Wrong: 3".to_string()));
    }

    #[test]
    fn test_finished_exam_lists_misses() {
        let mut app =
            App::with_rng(sample_catalog(), memory_db(), None, StdRng::seed_from_u64(9)).unwrap();
        app.set_subject("bio").unwrap();
        app.enter(AppState::Exam).unwrap();
        app.execute(Command::StartExam).unwrap();
        app.execute(Command::FinishExam).unwrap();
        assert_eq!(app.last_exam_misses.len(), 7);

        let record = app
            .last_exam_misses
            .iter()
            .find(|r| r.kind == QuestionKind::TrueFalse)
            .unwrap();
        let line = miss_line(&app, record, 60);
        assert!(line.starts_with("T/F"));
        assert!(line.contains("bio statement #"));
        assert!(line.contains("yours: -"));
        let correct = answer_label(record.kind, &record.correct_answer);
        assert!(line.ends_with(&format!("correct: {}", correct)));

        app.enter(AppState::Home).unwrap();
        app.enter(AppState::Exam).unwrap();
        assert_eq!(app.last_exam_misses.len(), 7);
    }

    #[test]
    fn test_answer_label() {
        assert_eq!(answer_label(QuestionKind::TrueFalse, "A"), TRUE_GLYPH);
        assert_eq!(answer_label(QuestionKind::TrueFalse, "B"), FALSE_GLYPH);
        assert_eq!(answer_label(QuestionKind::Multiple, "ABD"), "ABD");
        assert_eq!(answer_label(QuestionKind::Single, ""), "-");
    }
}
