use crossterm::event::Event;
use ratatui::{Frame, layout::Rect, text::Line};

pub mod calculator;
pub mod error;

pub use calculator::Calculator;
pub use error::Error;

use crate::{app::Message, config::Config};

/// Declares the [Page] enum over the given page types, along with conversions into it and
/// methods forwarding to the current page
macro_rules! pages {
    ($($page:ident),* $(,)?) => {
        pub enum Page {
            $($page(Box<$page>),)*
        }

        $(
            impl From<$page> for Page {
                fn from(page: $page) -> Self {
                    Self::$page(Box::new(page))
                }
            }
        )*

        impl Page {
            pub fn render(&mut self, frame: &mut Frame, area: Rect, config: &Config) {
                match self {
                    $(Self::$page(page) => page.render(frame, area, config),)*
                }
            }

            /// Hints shown in the title bar
            pub fn render_top(&self, config: &Config) -> Option<Line<'_>> {
                match self {
                    $(Self::$page(page) => page.render_top(config),)*
                }
            }

            pub fn handle_events(&mut self, event: &Event, config: &Config) -> Option<Message> {
                match self {
                    $(Self::$page(page) => page.handle_events(event, config),)*
                }
            }
        }
    };
}

pages!(Calculator, Error);
