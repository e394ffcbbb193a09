use super::{draw_help, draw_title};
use crate::app::App;
use crate::models::AppState;
use crate::ui::layout::calculate_screen_chunks;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

fn mode_hint(mode: AppState) -> &'static str {
    match mode {
        AppState::Sequential => "Work through the bank in order, resuming where you left off",
        AppState::Random => "Draw questions at random",
        AppState::Search => "Find questions by keyword",
        AppState::Exam => "25 single, 5 multiple, 10 true/false",
        AppState::Errors => "Review and prune your wrong answers",
        AppState::Home => "",
    }
}

pub fn stats_lines(app: &App) -> Vec<Line<'static>> {
    let stats = &app.stats;
    let best = stats
        .best_score
        .map(|score| format!("{}%", score))
        .unwrap_or_else(|| "--".to_string());
    vec![
        Line::from(vec![
            Span::styled("Questions: ", Style::default().fg(Color::DarkGray)),
            Span::from(format!(
                "{} total ({} single, {} multiple, {} true/false)",
                stats.counts.total(),
                stats.counts.single,
                stats.counts.multiple,
                stats.counts.true_false
            )),
        ]),
        Line::from(vec![
            Span::styled("Best exam: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                best,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Exams taken: ", Style::default().fg(Color::DarkGray)),
            Span::from(stats.exam_count.to_string()),
            Span::styled("   Wrong answers: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                stats.wrong_count.to_string(),
                Style::default().fg(Color::Red),
            ),
        ]),
    ]
}

pub fn draw_home(f: &mut Frame, app: &App) {
    let layout = calculate_screen_chunks(f.area());
    draw_title(f, layout.header_area, "Exam Prep");

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(5),
        ])
        .split(layout.body_area);

    let subject = Paragraph::new(Line::from(vec![
        Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.subject_name().to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(ratatui::layout::Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Subject"));
    f.render_widget(subject, body[0]);

    let stats = Paragraph::new(stats_lines(app))
        .block(Block::default().borders(Borders::ALL).title("Statistics"));
    f.render_widget(stats, body[1]);

    let items: Vec<ListItem> = AppState::MODES
        .iter()
        .enumerate()
        .map(|(i, mode)| {
            let style = if i == app.menu_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<18}", mode.title()), style),
                Span::styled(mode_hint(*mode), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();
    let menu = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title("Modes"),
    );
    f.render_widget(menu, body[2]);

    draw_help(
        f,
        layout.help_area,
        &[
            ("↑/↓", "Navigate"),
            ("Enter", "Open"),
            ("←/→", "Subject"),
            ("c", "Clear Wrong Answers"),
            ("h", "Clear Exam History"),
            ("q", "Quit"),
        ],
    );
}
