use crossterm::event::Event;
use ratatui::{Frame, layout::Rect, text::Line};

pub mod error;
pub mod history;
pub mod results;
pub mod typing;

pub use error::Error;
pub use history::History;
pub use results::Results;
pub use typing::Typing;

use crate::{app::Message, config::Config};

macro_rules! make_page_enum {
    ($($t:tt),*) => {
        pub enum Page {
            $(
                $t(Box<$t>),
            )*
        }

        $(
            impl From<$t> for Page {
                fn from(value: $t) -> Page {
                    Page::$t(Box::new(value))
                }
            }
        )*
    };
}

make_page_enum!(Typing, Results, History, Error);

impl Page {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, config: &Config) {
        match self {
            Self::Typing(page) => page.render(frame, area, config),
            Self::Results(page) => page.render(frame, area, config),
            Self::History(page) => page.render(frame, area, config),
            Self::Error(page) => page.render(frame, area, config),
        }
    }

    pub fn render_top(&mut self, config: &Config) -> Option<Line<'_>> {
        match self {
            Self::Typing(page) => page.render_top(config),
            Self::Results(page) => page.render_top(config),
            Self::History(page) => page.render_top(config),
            Self::Error(page) => page.render_top(config),
        }
    }

    /// Takes the event if the page handles it
    pub fn handle_events(&mut self, event: &Event, config: &Config) -> Option<Message> {
        match self {
            Self::Typing(page) => page.handle_events(event, config),
            Self::Results(page) => page.handle_events(event, config),
            Self::History(page) => page.handle_events(event, config),
            Self::Error(page) => page.handle_events(event, config),
        }
    }

    pub fn poll(&mut self, config: &Config) -> Option<Message> {
        match self {
            Self::Typing(page) => page.poll(config),
            Self::Results(_) | Self::History(_) | Self::Error(_) => None,
        }
    }
}
