use ratatui::{style::Color, symbols::Marker};
use serde::{Deserialize, Serialize};

/// General theme
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Theme {
    pub text: TextTheme,
    pub plot: PlotTheme,
}

/// Text color theme
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct TextTheme {
    pub pending: Color,
    pub correct: Color,
    pub incorrect: Color,
    pub extra: Color,
    pub missed: Color,
    pub caret: Color,
    pub highlight: Color,
}

impl Default for TextTheme {
    fn default() -> Self {
        Self {
            pending: Color::DarkGray,
            correct: Color::White,
            incorrect: Color::Red,
            extra: Color::LightRed,
            missed: Color::Yellow,
            caret: Color::Yellow,
            highlight: Color::Blue,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum PlotSymbol {
    Dot,
    Block,
    HalfBlock,
    Braille,
    Bar,
}

impl PlotSymbol {
    /// Returns the marker that the symbol corresponds to.
    ///
    /// This doesn't use the `From` trait, as we can't make that a const fn
    pub const fn as_marker(self) -> Marker {
        match self {
            Self::Dot => Marker::Dot,
            Self::Bar => Marker::Bar,
            Self::Block => Marker::Block,
            Self::Braille => Marker::Braille,
            Self::HalfBlock => Marker::HalfBlock,
        }
    }
}

/// Plot color and symbol theme
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct PlotTheme {
    pub raw_wpm: Color,
    pub net_wpm: Color,
    pub line_symbol: PlotSymbol,
}

impl Default for PlotTheme {
    fn default() -> Self {
        Self {
            raw_wpm: Color::Gray,
            net_wpm: Color::Yellow,
            line_symbol: PlotSymbol::Braille,
        }
    }
}
