use super::question::{draw_empty_card, draw_question_card};
use super::{draw_help, draw_title};
use crate::app::App;
use crate::models::QuestionKind;
use crate::session::{ReviewFilter, ReviewSession};
use crate::ui::layout::calculate_question_chunks;
use crate::utils::{format_timestamp, truncate_string};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

const FILTERS: [ReviewFilter; 4] = [
    ReviewFilter::All,
    ReviewFilter::Only(QuestionKind::Single),
    ReviewFilter::Only(QuestionKind::Multiple),
    ReviewFilter::Only(QuestionKind::TrueFalse),
];

fn filter_tabs(review: &ReviewSession) -> Line<'static> {
    let mut spans = Vec::new();
    for filter in FILTERS {
        let style = if filter == review.filter() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", filter.label()), style));
        spans.push(Span::from(" "));
    }
    Line::from(spans)
}

fn draw_list(f: &mut Frame, area: Rect, app: &App, review: &ReviewSession) {
    let width = area.width.saturating_sub(30) as usize;
    let items: Vec<ListItem> = review
        .visible()
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let style = if i == review.cursor() {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let stem = review
                .question_for(&app.catalog, record)
                .map(|q| q.stem.as_str())
                .unwrap_or("(question no longer in the bank)");
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<9}{:>4}  ", record.kind.short_label(), i + 1),
                    style,
                ),
                Span::styled(truncate_string(stem, width), style),
                Span::styled(
                    format!("  {}", format_timestamp(record.timestamp)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let title = format!("{} wrong answers", review.visible().len());
    let mut state = ListState::default().with_selected(Some(review.cursor()));
    f.render_stateful_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title(title)),
        area,
        &mut state,
    );
}

pub fn draw_errors(f: &mut Frame, app: &App) {
    let layout = calculate_question_chunks(f.area());
    draw_title(
        f,
        layout.header_area,
        &format!("Wrong Answers - {}", app.subject_name()),
    );
    let Some(review) = &app.review else {
        return;
    };

    if review.is_empty() {
        draw_empty_card(
            f,
            layout.card_area,
            "Wrong Answers",
            "No wrong answers recorded. Keep it up!",
        );
        draw_help(f, layout.help_area, &[("Esc", "Home")]);
        return;
    }

    f.render_widget(
        Paragraph::new(filter_tabs(review)).alignment(Alignment::Center),
        layout.tabs_area,
    );

    if review.is_detail()
        && let Some(record) = review.selected()
    {
        match review.question_for(&app.catalog, record) {
            Some(question) => draw_question_card(
                f,
                layout.card_area,
                question,
                review.cursor() + 1,
                review.visible().len(),
                &review.answer_state(),
            ),
            None => draw_empty_card(
                f,
                layout.card_area,
                record.kind.label(),
                "This question is no longer in the bank",
            ),
        }
        draw_help(
            f,
            layout.help_area,
            &[("Esc", "Back"), ("d", "Delete")],
        );
        return;
    }

    draw_list(f, layout.card_area, app, review);
    draw_help(
        f,
        layout.help_area,
        &[
            ("↑/↓", "Navigate"),
            ("Enter", "View"),
            ("Tab", "Filter"),
            ("d", "Delete"),
            ("c", "Clear All"),
            ("Esc", "Home"),
        ],
    );
}
