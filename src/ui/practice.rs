use super::question::{draw_empty_card, draw_question_card};
use super::{draw_help, draw_title};
use crate::accessor::TotalCounts;
use crate::app::App;
use crate::models::QuestionKind;
use crate::ui::layout::calculate_question_chunks;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Kind selector; kinds without questions are left out.
pub fn kind_tabs(counts: TotalCounts, current: QuestionKind) -> Line<'static> {
    let mut spans = Vec::new();
    for kind in counts.available_kinds() {
        let style = if kind == current {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!(" {} ({}) ", kind.label(), counts.get(kind)),
            style,
        ));
        spans.push(Span::from(" "));
    }
    Line::from(spans)
}

fn draw_tabs(f: &mut Frame, area: Rect, counts: TotalCounts, current: QuestionKind) {
    f.render_widget(
        Paragraph::new(kind_tabs(counts, current)).alignment(ratatui::layout::Alignment::Center),
        area,
    );
}

pub fn draw_sequential(f: &mut Frame, app: &App) {
    let layout = calculate_question_chunks(f.area());
    draw_title(
        f,
        layout.header_area,
        &format!("Sequential Study - {}", app.subject_name()),
    );

    let Some(seq) = &app.sequential else {
        return;
    };
    draw_tabs(f, layout.tabs_area, seq.counts(), seq.kind());

    match seq.current(&app.catalog) {
        Some(question) => {
            draw_question_card(
                f,
                layout.card_area,
                question,
                seq.index() + 1,
                seq.total(),
                &seq.answer,
            );
            let enter = if seq.answer.submitted {
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
                    ("←/→", "Prev/Next"),
                    ("Tab", "Type"),
                    ("Ctrl+S", "Answer Sheet"),
                    ("Esc", "Home"),
                ],
            );
        }
        None => {
            let message = if seq.total() == 0 {
                "No questions of this type"
            } else {
                "All questions completed"
            };
            draw_empty_card(f, layout.card_area, seq.kind().label(), message);
            draw_help(
                f,
                layout.help_area,
                &[("Enter", "Start Over"), ("←", "Back"), ("Tab", "Type"), ("Esc", "Home")],
            );
        }
    }
}

pub fn draw_random(f: &mut Frame, app: &App) {
    let layout = calculate_question_chunks(f.area());
    let Some(random) = &app.random else {
        draw_title(f, layout.header_area, "Random Drill");
        return;
    };
    draw_title(
        f,
        layout.header_area,
        &format!(
            "Random Drill - {} - {} drawn",
            app.subject_name(),
            random.drawn()
        ),
    );
    draw_tabs(f, layout.tabs_area, random.counts(), random.kind());

    match random.current() {
        Some(entry) => {
            draw_question_card(
                f,
                layout.card_area,
                &entry.question,
                entry.index + 1,
                random.counts().get(random.kind()),
                &random.answer,
            );
        }
        None => draw_empty_card(
            f,
            layout.card_area,
            random.kind().label(),
            "No questions available",
        ),
    }

    let enter = if random.answer.submitted {
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
            ("→", "Skip"),
            ("Tab", "Type"),
            ("Esc", "Home"),
        ],
    );
}
