use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Padding, Paragraph, Wrap},
};
use reckon::storage::MemoryStorage;

use crate::{app::Message, config::Config, utils::center};

use super::Calculator;

/// Page: Error
///
/// Shown when the calculator cannot start normally. Continuing starts a calculator that keeps
/// its memory and history for this session only.
pub struct Error(String);

impl Error {
    pub fn new(message: impl std::fmt::Display) -> Self {
        Self(message.to_string())
    }
}

/// Rendering logic
impl Error {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, config: &Config) {
        let theme = &config.settings.theme.text;
        let center = center(area, Constraint::Percentage(80), Constraint::Percentage(80));

        let mut lines = vec![
            Line::styled("[Error]", Style::new().bold().fg(theme.error)).centered(),
        ];
        lines.extend(self.0.lines().map(|line| Line::from(line).centered()));
        lines.push(Line::default());
        lines.push(
            Line::styled(
                "Memory and history will not be saved",
                Style::new().fg(theme.highlight),
            )
            .centered(),
        );

        let text = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::new().padding(Padding::new(0, 0, center.height / 3, 0)));

        frame.render_widget(text, center);
    }

    pub fn render_top(&self, _config: &Config) -> Option<Line<'_>> {
        Some(Line::from("<Enter> to continue"))
    }

    pub fn handle_events(&mut self, event: &Event, config: &Config) -> Option<Message> {
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
            && key.code == KeyCode::Enter
        {
            tracing::warn!("continuing without persistent storage");
            let calculator = Calculator::new(config, Box::new(MemoryStorage::default()));
            return Some(Message::Show(calculator.into()));
        }

        None
    }
}
