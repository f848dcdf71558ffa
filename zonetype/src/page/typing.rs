use std::{cell::RefCell, rc::Rc, time::Duration};

use caret::{
    CharStatus, GenerationError, Keystroke, Mode, SessionController, SessionObserver, UserId,
    render::{CaretSide, LineRenderConfig},
    session::Progress,
};
use crossterm::event::{Event, KeyCode};
use derive_more::From;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use thiserror::Error;
use web_time::Instant;

use crate::{
    app::Message,
    config::{Config, SourceError, source, test},
    page,
    store::{FileResultStore, StoredResult},
    utils::{KeyEventHelper, center, clock_label},
};

/// Lines of text shown at once: the caret's line, one above and one below
const VISIBLE_LINES: u16 = 3;

/// How long the top bar flags a rejected keystroke
const REJECT_FLASH: Duration = Duration::from_millis(150);

#[derive(Debug, From, Error)]
pub enum TypingError {
    #[error("{0}")]
    Source(SourceError),

    #[error("Failed to generate words: {0}")]
    Generation(GenerationError),
}

/// What the page learns from the controller between frames
#[derive(Debug, Default)]
struct Feedback {
    started_at: Option<Instant>,
    rejected_at: Option<Instant>,
}

struct FeedbackObserver(Rc<RefCell<Feedback>>);

impl SessionObserver for FeedbackObserver {
    fn on_started(&mut self, mode: Mode) {
        tracing::debug!(%mode, "test started");
        self.0.borrow_mut().started_at = Some(Instant::now());
    }

    fn on_keystroke(&mut self, keystroke: Keystroke) {
        if keystroke == Keystroke::Rejected {
            self.0.borrow_mut().rejected_at = Some(Instant::now());
        }
    }

    fn on_afk_changed(&mut self, afk: bool) {
        tracing::debug!(afk, "away from keyboard");
    }
}

/// Page: Typing
///
/// Runs a test and hands its result to the results page.
pub struct Typing {
    controller: SessionController,
    store: FileResultStore,
    user: Option<UserId>,
    previous_best: Option<StoredResult>,
    feedback: Rc<RefCell<Feedback>>,
    /// Seconds already forwarded to the controller
    ticks: u64,
}

impl Typing {
    pub fn new(config: &Config, mode: Mode) -> Result<Self, TypingError> {
        let words = source::word_source(&config.word_lists, config.settings.word_list.as_deref())?;
        let store = FileResultStore::new(&config.results_dir);
        let user = config.settings.identity();
        let feedback = Rc::new(RefCell::new(Feedback::default()));

        let controller = SessionController::builder(words)
            .with_configuration(config.settings.configuration())
            .with_identity(user.clone())
            .with_store(store.clone())
            .with_observer(FeedbackObserver(Rc::clone(&feedback)))
            .start(mode)?;

        let mut page = Self {
            controller,
            store,
            user,
            previous_best: None,
            feedback,
            ticks: 0,
        };
        page.load_previous_best();

        Ok(page)
    }

    pub const fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub const fn previous_best(&self) -> Option<&StoredResult> {
        self.previous_best.as_ref()
    }

    pub const fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    fn load_previous_best(&mut self) {
        let Some(user) = &self.user else {
            return;
        };

        self.previous_best = self
            .store
            .best_for(user, self.controller.mode())
            .inspect_err(|error| tracing::warn!(%error, "could not load personal best"))
            .ok()
            .flatten();
    }

    fn start(&mut self, mode: Mode) -> Option<Message> {
        if let Err(error) = self.controller.start(mode) {
            return Some(Message::Error(Box::new(error)));
        }

        *self.feedback.borrow_mut() = Feedback::default();
        self.ticks = 0;
        self.load_previous_best();
        None
    }

    fn was_rejected_recently(&self) -> bool {
        self.feedback
            .borrow()
            .rejected_at
            .is_some_and(|at| at.elapsed() < REJECT_FLASH)
    }
}

// Rendering logic
impl Typing {
    pub fn render(&self, frame: &mut Frame, area: Rect, config: &Config) {
        let theme = &config.settings.theme.text;
        let session = self.controller.session();

        let [text_area, hint_area] = Layout::vertical([
            Constraint::Length(VISIBLE_LINES),
            Constraint::Length(1),
        ])
        .spacing(1)
        .areas(center(
            area,
            Constraint::Percentage(80),
            Constraint::Length(VISIBLE_LINES + 2),
        ));

        let mut cursor: Option<(u16, u16)> = None;
        let mut row = 0u16;

        let mut lines = session.render_lines(
            |line| {
                if line.active_line_offset < -1 {
                    return None;
                }

                let mut col = 0u16;
                let mut spans = Vec::new();
                for word in &line.words {
                    for ctx in &word.contents {
                        let color = match ctx.character.status {
                            CharStatus::Pending => theme.pending,
                            CharStatus::Correct => theme.correct,
                            CharStatus::Incorrect => theme.incorrect,
                            CharStatus::Extra => theme.extra,
                            CharStatus::Missed => theme.missed,
                        };

                        let mut style = Style::new().fg(color);
                        if word.is_marked {
                            style = style.underlined().underline_color(theme.incorrect);
                        }

                        match ctx.caret {
                            Some(CaretSide::Before) => cursor = Some((col, row)),
                            Some(CaretSide::After) => cursor = Some((col + 1, row)),
                            None => {}
                        }

                        spans.push(Span::styled(ctx.character.glyph.to_string(), style));
                        col += 1;
                    }
                    spans.push(Span::raw(" "));
                    col += 1;
                }

                row += 1;
                Some(Line::from(spans))
            },
            LineRenderConfig::new(usize::from(text_area.width)),
        );
        lines.truncate(usize::from(VISIBLE_LINES));

        frame.render_widget(Paragraph::new(lines), text_area);

        if let Some((x, y)) = cursor
            && y < VISIBLE_LINES
        {
            frame.set_cursor_position((text_area.x + x, text_area.y + y));
        }

        let hint = if !session.is_focused() {
            Some("Focus the terminal to continue".bold().fg(theme.caret))
        } else if session.is_idle() {
            Some(
                "<Ctrl-T> time | <Ctrl-W> words | <Ctrl-R> history | <Esc> restart"
                    .fg(theme.pending),
            )
        } else {
            None
        };

        if let Some(hint) = hint {
            frame.render_widget(Line::from(hint).centered(), hint_area);
        }
    }

    pub fn render_top(&self, config: &Config) -> Option<Line<'_>> {
        let theme = &config.settings.theme.text;
        let session = self.controller.session();

        let progress = match session.progress() {
            Progress::Time { remaining } => clock_label(remaining),
            Progress::Words { completed, target } => format!("{completed}/{target}"),
        };
        let wpm = session.series().last().map_or(0, |sample| sample.net_wpm);

        let mut line = Line::from(format!("{} | {progress} | {wpm} wpm", session.mode()));

        if session.is_afk() {
            line.push_span(" | AFK".bold().fg(theme.missed));
        }
        if self.was_rejected_recently() {
            line = line.fg(theme.incorrect);
        }

        Some(line)
    }

    pub fn poll(&mut self, _config: &Config) -> Option<Message> {
        let started_at = self.feedback.borrow().started_at;

        if let Some(started_at) = started_at {
            let due = started_at.elapsed().as_secs();
            while self.ticks < due && self.controller.session().is_running() {
                self.controller.tick();
                self.ticks += 1;
            }
        }

        page::Results::new(self).map(|results| Message::Show(results.into()))
    }

    pub fn handle_events(&mut self, event: &Event, config: &Config) -> Option<Message> {
        match event {
            Event::FocusGained => self.controller.set_focus(true),
            Event::FocusLost => self.controller.set_focus(false),
            Event::Key(key) if key.is_press() => {
                if key.is_ctrl_press_char('t') {
                    return self.start(test::cycle_time(self.controller.mode()));
                }
                if key.is_ctrl_press_char('w') {
                    return self.start(test::cycle_words(self.controller.mode()));
                }
                if key.is_history() {
                    return Some(Message::Show(
                        page::History::new(config, self.controller.mode()).into(),
                    ));
                }

                match key.code {
                    KeyCode::Esc | KeyCode::Tab => {
                        return self.start(self.controller.mode());
                    }
                    _ => {
                        // Any key brings the caret back
                        if !self.controller.session().is_focused() {
                            self.controller.set_focus(true);
                        }
                        self.controller.handle_key_event(key.key_input());
                    }
                }
            }
            _ => {}
        }

        None
    }
}
