use crate::models::{FALSE_GLYPH, Question, QuestionKind, TRUE_GLYPH};
use crate::session::AnswerState;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use regex::Regex;

lazy_static::lazy_static! {
    static ref OPTION_LABEL: Regex = Regex::new(r"^([A-Za-z])[.、\s]+").unwrap();
}

/// Drops a leading `A.` / `A、` / `A ` label from option text when it repeats `letter`.
pub fn strip_option_label(text: &str, letter: char) -> &str {
    match OPTION_LABEL.captures(text) {
        Some(caps)
            if caps[1]
                .chars()
                .next()
                .is_some_and(|c| c.eq_ignore_ascii_case(&letter)) =>
        {
            text[caps[0].len()..].trim()
        }
        _ => text.trim(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Plain,
    Selected,
    /// Part of the canonical answer, shown after submission.
    Correct,
    /// Selected but not part of the answer, shown after submission.
    Wrong,
    Dimmed,
}

pub fn option_mark(question: &Question, answer: &AnswerState, letter: char) -> OptionMark {
    let selected = answer.selected.contains(letter);
    if answer.submitted {
        if question.answer.contains(letter) {
            OptionMark::Correct
        } else if selected {
            OptionMark::Wrong
        } else {
            OptionMark::Dimmed
        }
    } else if selected {
        OptionMark::Selected
    } else {
        OptionMark::Plain
    }
}

/// The answer as shown to the user: glyphs for true/false, letters otherwise.
pub fn display_answer(question: &Question) -> String {
    match question.kind {
        QuestionKind::TrueFalse => match question.answer.as_str() {
            "A" => TRUE_GLYPH.to_string(),
            _ => FALSE_GLYPH.to_string(),
        },
        _ => question.answer.clone(),
    }
}

fn mark_style(mark: OptionMark) -> Style {
    match mark {
        OptionMark::Plain => Style::default(),
        OptionMark::Selected => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        OptionMark::Correct => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        OptionMark::Wrong => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        OptionMark::Dimmed => Style::default().fg(Color::DarkGray),
    }
}

pub fn question_card_title(question: &Question, number: usize, total: usize) -> String {
    format!("{} {}/{}", question.kind.label(), number, total)
}

pub fn question_card_text(question: &Question, answer: &AnswerState) -> Text<'static> {
    let mut text = Text::default();

    if question.kind != QuestionKind::TrueFalse
        && (!question.chapter.is_empty() || !question.difficulty.is_empty())
    {
        text.push_line(Line::from(vec![
            Span::styled(
                question.chapter.clone(),
                Style::default().fg(Color::DarkGray),
            ),
            Span::from("  "),
            Span::styled(
                format!("[{}]", question.difficulty),
                Style::default().fg(Color::Magenta),
            ),
        ]));
        text.push_line(Line::from(""));
    }

    text.push_line(Line::from(Span::styled(
        question.stem.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));

    for option in &question.options {
        let mark = option_mark(question, answer, option.letter);
        let cursor = match mark {
            OptionMark::Selected | OptionMark::Wrong => "▸ ",
            OptionMark::Correct if answer.selected.contains(option.letter) => "▸ ",
            _ => "  ",
        };
        text.push_line(Line::from(vec![
            Span::from(cursor),
            Span::styled(format!("{}. ", option.letter), mark_style(mark)),
            Span::styled(
                strip_option_label(&option.text, option.letter).to_string(),
                mark_style(mark),
            ),
        ]));
    }

    if answer.submitted {
        let correct = answer.is_correct(question);
        let (verdict, color) = if correct {
            ("Correct", Color::Green)
        } else {
            ("Wrong", Color::Red)
        };
        text.push_line(Line::from(""));
        text.push_line(Line::from(Span::styled(
            verdict,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        text.push_line(Line::from(format!(
            "Correct answer: {}",
            display_answer(question)
        )));
    }

    text
}

pub fn draw_question_card(
    f: &mut Frame,
    area: Rect,
    question: &Question,
    number: usize,
    total: usize,
    answer: &AnswerState,
) {
    let card = Paragraph::new(question_card_text(question, answer))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(question_card_title(question, number, total)),
        );
    f.render_widget(card, area);
}

pub fn draw_empty_card(f: &mut Frame, area: Rect, title: &str, message: &str) {
    let card = Paragraph::new(message.to_string())
        .style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(card, area);
}
