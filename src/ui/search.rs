use super::question::{draw_empty_card, draw_question_card};
use super::{draw_help, draw_title};
use crate::app::App;
use crate::ui::layout::calculate_screen_chunks;
use crate::utils::truncate_string;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

pub fn draw_search(f: &mut Frame, app: &App) {
    let layout = calculate_screen_chunks(f.area());
    draw_title(
        f,
        layout.header_area,
        &format!("Search - {}", app.subject_name()),
    );
    let search = &app.search;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(layout.body_area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    let query = if search.query().is_empty() {
        Line::from(Span::styled(
            "[Type keywords, separated by spaces...]",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(search.query().to_string())
    };
    f.render_widget(
        Paragraph::new(query).block(Block::default().borders(Borders::ALL).title("Query")),
        rows[0],
    );

    let width = columns[0].width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = search
        .results()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i == search.selected_index() {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let label = format!(
                "[{}] {}",
                entry.question.kind.short_label(),
                entry.question.stem
            );
            ListItem::new(truncate_string(&label, width)).style(style)
        })
        .collect();
    let mut state = ListState::default().with_selected(Some(search.selected_index()));
    f.render_stateful_widget(
        List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Results ({})", search.results().len())),
        ),
        columns[0],
        &mut state,
    );

    match search.selected() {
        Some(entry) => draw_question_card(
            f,
            columns[1],
            &entry.question,
            entry.index + 1,
            app.stats.counts.get(entry.question.kind),
            &search.answer_state(),
        ),
        None => {
            let message = if search.query().trim().is_empty() {
                "Start typing to search"
            } else {
                "No matching questions"
            };
            draw_empty_card(f, columns[1], "Question", message);
        }
    }

    draw_help(
        f,
        layout.help_area,
        &[("↑/↓", "Results"), ("Ctrl+U", "Clear"), ("Esc", "Home")],
    );
}
