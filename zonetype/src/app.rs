use std::io::stdout;
use std::time::Duration;

use caret::Mode;
use crossterm::cursor::SetCursorStyle;
use crossterm::event::{self, DisableFocusChange, EnableFocusChange, Event, KeyEvent};
use crossterm::execute;
use ratatui::{Frame, style::Stylize, text::ToLine, widgets::Padding};

use crate::config::Config;
use crate::page;
use crate::utils::{KeyEventHelper, ROUNDED_BLOCK};

/// How long to wait for input before redrawing
const FRAME_TIMEOUT: Duration = Duration::from_millis(33);

/// An app message
pub enum Message {
    /// An error occurred
    Error(Box<dyn std::error::Error>),
    /// Show a specific page
    Show(page::Page),
    /// Start a fresh test
    Start(Mode),
    /// Start a fresh test with the configured defaults
    Reset,
    /// Quit the application
    Quit,
}

/// The app itself
pub struct App {
    page: page::Page,
    config: Config,
}

impl App {
    /// Creates a new `App`
    pub fn new(config: Config) -> Self {
        let page = Self::typing_page(&config, config.settings.test.mode());
        Self { page, config }
    }

    fn typing_page(config: &Config, mode: Mode) -> page::Page {
        match page::Typing::new(config, mode) {
            Ok(page) => page.into(),
            Err(error) => {
                tracing::error!(%error, "could not start a test");
                page::Error::from(error).into()
            }
        }
    }

    /// Runs the app
    pub fn run(&mut self) -> std::io::Result<()> {
        let mut terminal = ratatui::init();

        execute!(stdout(), SetCursorStyle::SteadyBar, EnableFocusChange)?;

        let result = self.event_loop(&mut terminal);

        execute!(stdout(), DisableFocusChange, SetCursorStyle::DefaultUserShape)?;
        ratatui::restore();

        result
    }

    fn event_loop(&mut self, terminal: &mut ratatui::DefaultTerminal) -> std::io::Result<()> {
        loop {
            let event = event::poll(FRAME_TIMEOUT)?.then(event::read).transpose()?;
            if let Some(message) = self.handle_events(event) {
                match message {
                    Message::Error(error) => {
                        tracing::error!(%error, "showing error");
                        self.page = page::Error::from(error).into();
                    }
                    Message::Show(page) => self.page = page,
                    Message::Start(mode) => self.page = Self::typing_page(&self.config, mode),
                    Message::Reset => {
                        self.page = Self::typing_page(&self.config, self.config.settings.test.mode());
                    }
                    Message::Quit => return Ok(()),
                }
            }
            terminal.draw(|frame| self.draw(frame))?;
        }
    }

    /// Draws the next frame
    fn draw(&mut self, frame: &mut Frame) {
        let mut block = ROUNDED_BLOCK
            .padding(Padding::new(1, 1, 0, 0))
            .title_top("ZONETYPE".to_line().bold().centered())
            .title_top("<CTRL-Q> to exit".to_line().right_aligned());

        if let Some(top_msg) = self.page.render_top(&self.config) {
            block = block.title_top(top_msg);
        }

        let area = frame.area();
        let content = block.inner(area);

        frame.render_widget(block, area);

        self.page.render(frame, content, &self.config);
    }

    /// Global event handler
    fn handle_events(&mut self, event_opt: Option<Event>) -> Option<Message> {
        event_opt
            .and_then(|event| match event {
                Event::Key(key) if Self::is_quit(key) => Some(Message::Quit),
                _ => self.page.handle_events(&event, &self.config),
            })
            .or_else(|| self.page.poll(&self.config))
    }

    /// Global key events
    fn is_quit(key: KeyEvent) -> bool {
        key.is_ctrl_press_char('q')
    }
}
