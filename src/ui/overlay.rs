use crate::app::{App, ConfirmAction, SHEET_COLUMNS};
use crate::ui::layout::centered_rect;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Current,
    Answered,
    Unanswered,
}

/// Rows of the answer sheet grid, `SHEET_COLUMNS` cells each.
pub fn sheet_rows(app: &App, cursor: usize) -> Vec<Line<'static>> {
    let Some((total, current)) = app.sheet_shape() else {
        return Vec::new();
    };
    let cells: Vec<Span<'static>> = (0..total)
        .map(|cell| {
            let state = if Some(cell) == current {
                CellState::Current
            } else if app.is_sheet_cell_answered(cell) {
                CellState::Answered
            } else {
                CellState::Unanswered
            };
            let mut style = match state {
                CellState::Current => Style::default().fg(Color::Black).bg(Color::Cyan),
                CellState::Answered => Style::default().fg(Color::Green),
                CellState::Unanswered => Style::default().fg(Color::DarkGray),
            };
            if cell == cursor {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            Span::styled(format!("{:>4} ", cell + 1), style)
        })
        .collect();

    cells
        .chunks(SHEET_COLUMNS)
        .map(|row| Line::from(row.to_vec()))
        .collect()
}

/// First grid row to show so the cursor row stays inside `visible_rows`.
pub fn sheet_scroll(cursor: usize, visible_rows: usize) -> u16 {
    let row = cursor / SHEET_COLUMNS;
    row.saturating_sub(visible_rows.saturating_sub(1)) as u16
}

pub fn draw_answer_sheet(f: &mut Frame, app: &App, cursor: usize) {
    let area = centered_rect(70, 70, f.area());
    f.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let visible_rows = chunks[0].height.saturating_sub(2) as usize;
    let grid = Paragraph::new(sheet_rows(app, cursor))
        .scroll((sheet_scroll(cursor, visible_rows), 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Answer Sheet "),
        );
    f.render_widget(grid, chunks[0]);

    let legend = Line::from(vec![
        Span::styled(" current ", Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::from("  "),
        Span::styled("answered", Style::default().fg(Color::Green)),
        Span::from("  "),
        Span::styled("unanswered", Style::default().fg(Color::DarkGray)),
        Span::from("    "),
        Span::styled(
            "Arrows",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Move  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Jump  "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Close"),
    ]);
    f.render_widget(
        Paragraph::new(legend)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        chunks[1],
    );
}

pub fn draw_confirmation(f: &mut Frame, action: ConfirmAction) {
    let area = centered_rect(60, 40, f.area());
    f.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    let title = Paragraph::new("Please Confirm")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new(Text::from(action.prompt()))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes, clear  "),
        Span::styled(
            "n",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" No, keep"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
