use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct ScreenLayout {
    pub header_area: Rect,
    pub body_area: Rect,
    pub help_area: Rect,
}

pub struct QuestionLayout {
    pub header_area: Rect,
    pub tabs_area: Rect,
    pub card_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_screen_chunks(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    ScreenLayout {
        header_area: chunks[0],
        body_area: chunks[1],
        help_area: chunks[2],
    }
}

pub fn calculate_question_chunks(area: Rect) -> QuestionLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    QuestionLayout {
        header_area: chunks[0],
        tabs_area: chunks[1],
        card_area: chunks[2],
        help_area: chunks[3],
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_layout() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = calculate_screen_chunks(area);

        // Margin 1 leaves 38 rows: 3 header, 3 help, the rest for the body.
        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.help_area.height, 3);
        assert_eq!(layout.body_area.height, 32);
    }

    #[test]
    fn test_question_layout() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = calculate_question_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.tabs_area.height, 1);
        assert_eq!(layout.help_area.height, 3);
        assert_eq!(layout.card_area.height, 31);
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, area);

        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 15);
    }
}
