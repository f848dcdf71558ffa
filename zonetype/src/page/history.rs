use caret::Mode;
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, ToSpan},
    widgets::{List, ListState, Paragraph},
};

use crate::{
    app::Message,
    config::Config,
    store::{FileResultStore, StoredResult, Summary, personal_bests, summary},
    utils::ROUNDED_BLOCK,
};

/// Page: History
///
/// Personal bests and the most recent saved results of the signed-in user.
#[derive(Debug)]
pub struct History {
    summary: Option<Summary>,
    recent: Vec<StoredResult>,
    bests: Vec<StoredResult>,
    /// Shown instead of the lists when there is nothing to load
    notice: Option<String>,
    selected: ListState,
    /// The test to go back to
    mode: Mode,
}

impl History {
    pub fn new(config: &Config, mode: Mode) -> Self {
        let mut page = Self {
            summary: None,
            recent: Vec::new(),
            bests: Vec::new(),
            notice: None,
            selected: ListState::default(),
            mode,
        };

        let Some(user) = config.settings.identity() else {
            page.notice = Some("Set `user` in settings.toml to keep a history".to_owned());
            return page;
        };

        let store = FileResultStore::new(&config.results_dir);
        match store.load(&user) {
            Ok(results) => {
                page.summary = summary(&results);
                page.bests = personal_bests(&results).into_values().collect();
                page.recent = results;
                page.recent.truncate(config.settings.results.history_limit);
                if page.recent.is_empty() {
                    page.notice = Some(format!("No saved results for {user} yet"));
                } else {
                    page.selected.select_first();
                }
            }
            Err(error) => page.notice = Some(error.to_string()),
        }

        page
    }
}

// Rendering logic
impl History {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, config: &Config) {
        let theme = &config.settings.theme.text;

        if let Some(notice) = &self.notice {
            frame.render_widget(Paragraph::new(notice.as_str()).centered(), area);
            return;
        }

        let overview = self.summary.map(|summary| summary.to_string()).unwrap_or_default();
        let overview_height = u16::try_from(overview.lines().count())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let best_height = u16::try_from(self.bests.len()).unwrap_or(u16::MAX).saturating_add(2);
        let [overview_area, bests, recent] = Layout::vertical([
            Constraint::Length(overview_height),
            Constraint::Length(best_height),
            Constraint::Fill(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(overview).block(ROUNDED_BLOCK.title("Overview".to_span().bold())),
            overview_area,
        );

        let best_lines: Vec<Line> = self
            .bests
            .iter()
            .map(|result| Line::from(result.to_string()))
            .collect();
        frame.render_widget(
            Paragraph::new(best_lines)
                .block(ROUNDED_BLOCK.title("Personal bests".to_span().bold())),
            bests,
        );

        let recent_list = List::new(self.recent.iter().map(ToString::to_string))
            .block(ROUNDED_BLOCK.title("Recent".to_span().bold()))
            .highlight_style(Style::new().fg(theme.highlight).bold())
            .highlight_symbol("> ");
        frame.render_stateful_widget(recent_list, recent, &mut self.selected);
    }

    pub fn render_top(&self, _config: &Config) -> Option<Line<'_>> {
        Some(Line::from("<Esc> back | <Up/Down> select"))
    }

    pub fn handle_events(&mut self, event: &Event, _config: &Config) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
        {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => Some(Message::Start(self.mode)),
                KeyCode::Up => {
                    self.selected.select_previous();
                    None
                }
                KeyCode::Down => {
                    self.selected.select_next();
                    None
                }
                _ => None,
            };
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use caret::{KeyInput, SessionController, UserId, WordList};

    use super::*;

    fn config_for(dir: &std::path::Path) -> Config {
        let results = dir.join("results");
        std::fs::write(
            dir.join("settings.toml"),
            format!(
                "user = \"ada\"\n\n[results]\ndirectory = \"{}\"\n",
                results.display()
            ),
        )
        .unwrap();
        Config::get(Some(dir.to_path_buf())).unwrap()
    }

    #[test]
    fn test_loads_overview() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());

        let mut controller =
            SessionController::new(WordList::new("test", ["go"]), Mode::words(1)).unwrap();
        controller.handle_key_event(KeyInput::Char('g'));
        controller.handle_key_event(KeyInput::Char('o'));
        let result = controller.finalize().unwrap();

        let store = FileResultStore::new(&config.results_dir);
        let record = StoredResult::new(result, &UserId::new("ada"));
        store.write(&record, &UserId::new("ada")).unwrap();

        let page = History::new(&config, Mode::words(1));

        assert!(page.notice.is_none());
        assert_eq!(page.recent.len(), 1);
        assert_eq!(page.summary.map(|summary| summary.tests_completed), Some(1));
    }

    #[test]
    fn test_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());

        let page = History::new(&config, Mode::time(30));

        assert!(page.summary.is_none());
        assert!(page.notice.is_some());
    }
}
