use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span, ToSpan},
    widgets::{List, Padding, Paragraph},
};
use reckon::{Action, ERROR_MARKER, Outcome, format_number, storage::Storage};

use crate::{
    app::Message,
    config::Config,
    feedback::{Effect, Feedback},
    keypad::{self, Keypad},
    keys,
    utils::{ROUNDED_BLOCK, center, time_ago},
};

/// Page: Calculator
pub struct Calculator {
    calculator: reckon::Calculator<Box<dyn Storage>>,
    keypad: Keypad,
    feedback: Feedback,
    show_history: bool,
}

impl Calculator {
    /// Creates a new calculator page, restoring its state from `storage`
    pub fn new(config: &Config, storage: Box<dyn Storage>) -> Self {
        Self {
            calculator: reckon::Calculator::load(storage),
            keypad: Keypad::new(),
            feedback: Feedback::new(config.settings.animations),
            show_history: config.settings.show_history,
        }
    }

    /// Performs an action and starts the matching effects
    fn dispatch(&mut self, action: Action) {
        if keypad::find(action).is_some() {
            self.feedback.trigger(Effect::Press(action));
        }

        match self.calculator.apply(action) {
            Some(Outcome::Evaluated(value)) => {
                tracing::debug!(value, "evaluated");
                self.feedback.trigger(Effect::Pulse);
            }
            Some(Outcome::Failed(error)) => {
                tracing::debug!(%error, "evaluation failed");
                self.feedback.trigger(Effect::Shake);
            }
            None => (),
        }
    }
}

// Rendering logic
impl Calculator {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, config: &Config) {
        let area = center(area, Constraint::Percentage(90), Constraint::Percentage(90));

        let calculator_area = if self.show_history {
            let [calculator_area, history_area] =
                Layout::horizontal([Constraint::Fill(3), Constraint::Fill(2)]).areas(area);
            self.render_history(frame, history_area, config);
            calculator_area
        } else {
            center(area, Constraint::Max(60), Constraint::Percentage(100))
        };

        let [display_area, memory_area, keypad_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(calculator_area);

        self.render_display(frame, display_area, config);
        self.render_memory(frame, memory_area, config);
        self.keypad
            .render(frame, keypad_area, &config.settings.theme, &self.feedback);
    }

    pub fn render_top(&self, _config: &Config) -> Option<Line<'_>> {
        let history = if self.show_history {
            "<Tab> hide history"
        } else {
            "<Tab> show history"
        };
        Some(Line::raw(format!(
            "{history} | <Ctrl-M> recall | <Esc> clear"
        )))
    }

    pub fn handle_events(&mut self, event: &Event, _config: &Config) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.code == KeyCode::Tab {
                    self.show_history = !self.show_history;
                } else if let Some(action) = keys::action_for(key) {
                    self.dispatch(action);
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if let Some(action) = self.keypad.action_at(mouse.column, mouse.row) {
                    self.dispatch(action);
                }
            }
            _ => (),
        }

        None
    }
}

// Render helpers
impl Calculator {
    fn render_display(&self, frame: &mut Frame, area: Rect, config: &Config) {
        let theme = &config.settings.theme;
        let text = self.calculator.display();

        let offset = self.feedback.shake_offset();
        let block = ROUNDED_BLOCK.padding(Padding::new(1, 1 + offset, 0, 0));
        let inner_width = block.inner(area).width as usize;

        let line = if text.is_empty() {
            Line::styled("0", Style::new().fg(theme.text.dim))
        } else if text == ERROR_MARKER {
            Line::styled(text, Style::new().fg(theme.text.error).bold())
        } else {
            // Keep the end of long expressions visible
            Line::styled(
                visible_tail(text, inner_width),
                Style::new().fg(theme.foreground).bold(),
            )
        };

        frame.render_widget(Paragraph::new(line.right_aligned()).block(block), area);
    }

    fn render_memory(&self, frame: &mut Frame, area: Rect, config: &Config) {
        let theme = &config.settings.theme.text;
        let memory = self.calculator.memory();

        let style = if memory == 0.0 {
            Style::new().fg(theme.dim)
        } else {
            Style::new().fg(theme.success)
        };

        let indicator = Line::from(vec![
            Span::styled("M: ", style.bold()),
            Span::styled(format_number(memory), style),
        ]);

        frame.render_widget(Paragraph::new(indicator).right_aligned(), area);
    }

    fn render_history(&self, frame: &mut Frame, area: Rect, config: &Config) {
        let theme = &config.settings.theme.text;
        let history = self.calculator.history();
        let block = ROUNDED_BLOCK.title("History".to_span().bold());

        if history.is_empty() {
            let empty = Paragraph::new(Line::styled("No history", Style::new().fg(theme.dim)))
                .block(block)
                .centered();
            frame.render_widget(empty, area);
            return;
        }

        let items = history.entries().iter().map(|entry| {
            Line::from(vec![
                Span::raw(entry.printable_text().into_owned()),
                Span::styled(
                    format!("  {}", time_ago(entry.time())),
                    Style::new().fg(theme.dim),
                ),
            ])
        });

        frame.render_widget(List::new(items).block(block), area);
    }
}

/// The last `width` characters of `text`
fn visible_tail(text: &str, width: usize) -> &str {
    let skip = text.chars().count().saturating_sub(width);
    text.char_indices()
        .nth(skip)
        .map_or("", |(start, _)| &text[start..])
}
