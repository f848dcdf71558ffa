use std::fmt::Display;

use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Padding, Paragraph, Wrap},
};

use crate::{
    app::Message,
    config::Config,
    utils::center,
};

/// Page: Error
///
/// Displays an error
#[derive(Debug)]
pub struct Error(String);

impl<E: Display> From<E> for Error {
    fn from(value: E) -> Self {
        Self(value.to_string())
    }
}

// Rendering logic
impl Error {
    pub fn render(&self, frame: &mut Frame, area: Rect, config: &Config) {
        let center = center(area, Constraint::Percentage(80), Constraint::Percentage(80));

        let mut lines = vec![
            Line::styled(
                "[Error]",
                Style::new().bold().fg(config.settings.theme.text.incorrect),
            )
            .centered(),
        ];

        lines.extend(self.0.lines().map(|line| Line::from(line).centered()));

        let text = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::new().padding(Padding::new(0, 0, center.height / 2, 0)));

        frame.render_widget(text, center);
    }

    pub fn render_top(&self, _config: &Config) -> Option<Line<'_>> {
        Some(Line::from("<Enter> to start a new test"))
    }

    pub fn handle_events(&self, event: &Event, _config: &Config) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
            && key.code == KeyCode::Enter
        {
            return Some(Message::Reset);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    #[test]
    fn test_renders_every_line() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::get(Some(dir.path().to_path_buf())).unwrap();
        let page = Error::from("first problem\nsecond problem");

        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                page.render(frame, area, &config);
            })
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("[Error]"));
        assert!(screen.contains("first problem"));
        assert!(screen.contains("second problem"));
    }

    #[test]
    fn test_enter_resets() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::get(Some(dir.path().to_path_buf())).unwrap();
        let page = Error::from("oops");

        let enter = Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(matches!(page.handle_events(&enter, &config), Some(Message::Reset)));

        let other = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(page.handle_events(&other, &config).is_none());
    }
}
