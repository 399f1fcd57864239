use std::io::stdout;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent};
use crossterm::execute;
use ratatui::{DefaultTerminal, Frame, style::Stylize, text::ToLine, widgets::Padding};
use reckon::storage::FileStorage;
use web_time::Duration;

use crate::config::Config;
use crate::page::{self, Page};
use crate::utils::{KeyEventHelper, ROUNDED_BLOCK};

/// How long to wait for input before redrawing, so running effects keep animating
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Requests from a page to the app
pub enum Message {
    /// Replace the current page
    Show(Page),
    /// Leave the app
    Quit,
}

/// The terminal application: one page at a time inside a titled frame
pub struct App {
    page: Page,
    config: Config,
}

impl App {
    /// Creates the app, starting on the calculator if its storage can be opened
    pub fn new(config: Config) -> Self {
        let page = Self::start_page(&config);
        Self { page, config }
    }

    fn start_page(config: &Config) -> Page {
        match FileStorage::open(&config.data_dir) {
            Ok(storage) => {
                tracing::info!(path = %storage.path().display(), "opened storage");
                page::Calculator::new(config, Box::new(storage)).into()
            }
            Err(error) => {
                tracing::error!(%error, "failed to open storage");
                let location = config.data_dir.display();
                page::Error::new(format!("Could not open storage in {location}:\n{error}")).into()
            }
        }
    }

    /// Takes over the terminal until the user quits
    pub fn run(mut self) -> std::io::Result<()> {
        let mut terminal = ratatui::init();
        execute!(stdout(), EnableMouseCapture)?;

        let outcome = self.run_loop(&mut terminal);

        // Restore the terminal even if the loop failed
        let released = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        outcome.and(released)
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> std::io::Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;

            if !event::poll(FRAME_INTERVAL)? {
                continue;
            }

            match self.handle_event(&event::read()?) {
                Some(Message::Show(page)) => self.page = page,
                Some(Message::Quit) => return Ok(()),
                None => (),
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let hints = self.page.render_top(&self.config);

        let frame_block = [
            Some("CALCTERM".to_line().bold().centered()),
            Some("<CTRL-Q> to exit".to_line().right_aligned()),
            hints,
        ]
        .into_iter()
        .flatten()
        .fold(
            ROUNDED_BLOCK.padding(Padding::horizontal(1)),
            |block, title| block.title_top(title),
        );

        let content = frame_block.inner(frame.area());
        frame.render_widget(frame_block, frame.area());

        self.page.render(frame, content, &self.config);
    }

    /// App-wide keys first, then the current page
    fn handle_event(&mut self, event: &Event) -> Option<Message> {
        if let Event::Key(key) = event
            && let Some(message) = Self::global_key(key)
        {
            return Some(message);
        }

        self.page.handle_events(event, &self.config)
    }

    fn global_key(key: &KeyEvent) -> Option<Message> {
        key.is_ctrl_char('q').then_some(Message::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_ctrl_q_quits() {
        let quit = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(matches!(App::global_key(&quit), Some(Message::Quit)));

        let typed = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(App::global_key(&typed).is_none());
    }
}
