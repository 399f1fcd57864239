use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block, BorderType},
};
use web_time::{Duration, SystemTime};

/// A block with a rounded border
pub const ROUNDED_BLOCK: Block = Block::bordered().border_type(BorderType::Rounded);

/// A rectangle of the given size, centered inside `area`
pub fn center(area: Rect, width: Constraint, height: Constraint) -> Rect {
    let [column] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
    let [centered] = Layout::vertical([height]).flex(Flex::Center).areas(column);
    centered
}

/// Describes how long ago `timestamp` was, e.g. "3m ago"
///
/// Timestamps in the future count as "just now".
pub fn time_ago(timestamp: SystemTime) -> String {
    let elapsed = SystemTime::now()
        .duration_since(timestamp)
        .unwrap_or_default();
    describe_elapsed(elapsed)
}

fn describe_elapsed(elapsed: Duration) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    match elapsed.as_secs() {
        secs if secs >= DAY => format!("{}d {}h ago", secs / DAY, secs % DAY / HOUR),
        secs if secs >= HOUR => format!("{}h {}m ago", secs / HOUR, secs % HOUR / MINUTE),
        secs if secs >= MINUTE => format!("{}m ago", secs / MINUTE),
        _ => "just now".to_string(),
    }
}

/// Shortcut checks on key events
pub trait KeyEventHelper {
    /// Returns true if the character was pressed while holding CTRL, in either case
    fn is_ctrl_char(&self, character: char) -> bool;

    /// Returns true if CTRL or ALT was held
    fn has_command_modifier(&self) -> bool;
}

impl KeyEventHelper for KeyEvent {
    fn is_ctrl_char(&self, character: char) -> bool {
        self.kind == KeyEventKind::Press
            && self.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(self.code, KeyCode::Char(typed) if typed.eq_ignore_ascii_case(&character))
    }

    fn has_command_modifier(&self) -> bool {
        self.modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    }
}
