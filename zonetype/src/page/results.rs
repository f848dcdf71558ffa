use caret::{Counters, Mode, Outcome, Persistence, SessionResult, SkipReason};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span, ToSpan},
    widgets::{Axis, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph, Wrap},
};

use crate::{
    app::Message,
    config::Config,
    page::{self, Typing},
    store::StoredResult,
    utils::{KeyEventHelper, ROUNDED_BLOCK, clock_label},
};

type PlotData = Vec<(f64, f64)>;

/// Whether the result reached storage, as shown to the typist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Saved,
    NotSaved(String),
    SaveFailed(String),
}

impl From<&Persistence> for Notice {
    fn from(value: &Persistence) -> Self {
        match value {
            Persistence::Saved => Self::Saved,
            Persistence::Pending => Self::NotSaved("Not saved".into()),
            Persistence::Skipped(SkipReason::SignedOut) => {
                Self::NotSaved("Not saved: set `user` in settings.toml to keep results".into())
            }
            Persistence::Skipped(SkipReason::NotPassed(reason)) => {
                Self::NotSaved(format!("Not saved: {reason}"))
            }
            Persistence::Failed(error) => Self::SaveFailed(error.to_string()),
        }
    }
}

/// Page: Results
///
/// Summary and speed chart of a finished test.
#[derive(Debug, Clone)]
pub struct Results {
    result: SessionResult,
    notice: Notice,
    new_best: bool,
    raw_wpm: PlotData,
    net_wpm: PlotData,
    wpm_high: f64,
}

impl Results {
    /// The results of the test on `typing`, once it has one
    pub fn new(typing: &Typing) -> Option<Self> {
        let controller = typing.controller();
        let result = controller.result()?.clone();
        let notice = Notice::from(controller.persistence());

        let new_best = notice == Notice::Saved
            && typing.user().is_some_and(|user| {
                let record = StoredResult::new(&result, user);
                typing
                    .previous_best()
                    .is_none_or(|best| record.beats(best))
            });

        let mut raw_wpm = Vec::with_capacity(result.samples.len());
        let mut net_wpm = Vec::with_capacity(result.samples.len());
        let mut wpm_high = 0.0f64;

        for sample in &result.samples {
            let elapsed = f64::from(sample.elapsed);
            raw_wpm.push((elapsed, f64::from(sample.raw_wpm)));
            net_wpm.push((elapsed, f64::from(sample.net_wpm)));
            wpm_high = wpm_high.max(f64::from(sample.raw_wpm.max(sample.net_wpm)));
        }

        Some(Self {
            result,
            notice,
            new_best,
            raw_wpm,
            net_wpm,
            wpm_high,
        })
    }

    pub const fn mode(&self) -> Mode {
        self.result.mode
    }
}

// Rendering logic
impl Results {
    pub fn render(&self, frame: &mut Frame, area: Rect, config: &Config) {
        let text_theme = &config.settings.theme.text;
        let plot_theme = &config.settings.theme.plot;

        let [summary, chart] =
            Layout::horizontal([Constraint::Percentage(30), Constraint::Percentage(70)])
                .areas(area);

        let result = &self.result;
        let counters = &result.counters;

        let outcome = match result.outcome {
            Outcome::Passed => "passed".bold().fg(text_theme.correct),
            Outcome::Failed(reason) => format!("failed: {reason}").bold().fg(text_theme.incorrect),
        };

        let mut lines = vec![
            Line::from(vec![Span::raw("Result      : "), outcome]),
            Line::from(format!("Wpm         : {}", result.wpm)),
            Line::from(format!("Raw         : {}", result.raw_wpm)),
            Line::from(format!("Accuracy    : {}%", result.accuracy)),
            Line::from(format!("Consistency : {}%", result.consistency)),
            Line::from(format!("Characters  : {}", character_breakdown(counters))),
            Line::from(format!(
                "Words       : {}/{}",
                counters.correct_word, counters.completed_words
            )),
            Line::from(format!("Test        : {}", result.mode)),
            Line::from(format!("Time        : {}", clock_label(result.elapsed))),
        ];

        if result.afk {
            lines.push("Went AFK during the test".fg(text_theme.missed).into());
        }

        lines.push(Line::default());
        lines.push(match &self.notice {
            Notice::Saved => "Saved".fg(text_theme.correct).into(),
            Notice::NotSaved(reason) => reason.clone().fg(text_theme.pending).into(),
            Notice::SaveFailed(error) => format!("Failed to save: {error}")
                .fg(text_theme.incorrect)
                .into(),
        });

        if self.new_best {
            lines.push("New personal best!".bold().fg(text_theme.highlight).into());
        }

        let summary_text = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            ROUNDED_BLOCK
                .borders(Borders::TOP)
                .title("Summary".to_span().bold()),
        );
        frame.render_widget(summary_text, summary);

        let total_duration = f64::from(result.elapsed.max(1));

        let raw_wpm = Dataset::default()
            .name("Raw")
            .marker(plot_theme.line_symbol.as_marker())
            .graph_type(GraphType::Line)
            .style(Style::default().fg(plot_theme.raw_wpm))
            .data(&self.raw_wpm);

        let net_wpm = Dataset::default()
            .name("Wpm")
            .marker(plot_theme.line_symbol.as_marker())
            .graph_type(GraphType::Line)
            .style(Style::default().fg(plot_theme.net_wpm))
            .data(&self.net_wpm);

        let wpm_high = self.wpm_high.max(10.0);

        let wpm_chart = Chart::new(vec![raw_wpm, net_wpm])
            .block(ROUNDED_BLOCK.title("Words/min".to_span().bold()))
            .x_axis(
                Axis::default()
                    .title("Seconds")
                    .style(Style::default().fg(Color::Gray))
                    .labels([Span::raw("0"), Span::raw(result.elapsed.to_string())])
                    .bounds([0.0, total_duration]),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .labels([
                        Span::raw("0"),
                        Span::raw((wpm_high / 2.0).trunc().to_string()),
                        Span::raw(wpm_high.trunc().to_string()),
                    ])
                    .bounds([0.0, wpm_high]),
            )
            .legend_position(Some(LegendPosition::BottomRight));

        frame.render_widget(wpm_chart, chart);
    }

    pub fn render_top(&self, _config: &Config) -> Option<Line<'_>> {
        Some(Line::from("<Tab> next test | <Ctrl-R> history"))
    }

    pub fn handle_events(&mut self, event: &Event, config: &Config) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
        {
            if key.is_history() {
                return Some(Message::Show(page::History::new(config, self.mode()).into()));
            }

            return match key.code {
                KeyCode::Tab | KeyCode::Enter | KeyCode::Esc => Some(Message::Start(self.mode())),
                _ => None,
            };
        }

        None
    }
}

/// Character counts in `correct/incorrect/missed/extra` order
fn character_breakdown(counters: &Counters) -> String {
    format!(
        "{} correct, {} incorrect, {} missed, {} extra",
        counters.correct_char, counters.incorrect_char, counters.missed_char, counters.extra_char
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_breakdown() {
        let counters = Counters {
            correct_char: 12,
            incorrect_char: 3,
            extra_char: 1,
            missed_char: 2,
            ..Counters::default()
        };

        assert_eq!(
            character_breakdown(&counters),
            "12 correct, 3 incorrect, 2 missed, 1 extra"
        );
    }
}
