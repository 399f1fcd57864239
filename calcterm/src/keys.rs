use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use reckon::Action;

use crate::utils::KeyEventHelper;

/// Map a key press to a calculator action
///
/// Shift is ignored, as terminals differ in whether they report it for characters like `+`,
/// `*`, `%` and parentheses. Keys held with Ctrl or Alt are not typed into the expression.
pub fn action_for(key: &KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.is_ctrl_char('m') {
        return Some(Action::MemoryRecall);
    }

    if key.has_command_modifier() {
        return None;
    }

    match key.code {
        KeyCode::Char(character @ ('0'..='9' | '+' | '-' | '*' | '/' | '.' | '(' | ')')) => {
            Some(Action::Input(character))
        }
        KeyCode::Char('%') => Some(Action::Percent),
        KeyCode::Char('=') | KeyCode::Enter => Some(Action::Evaluate),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Esc => Some(Action::Clear),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_input_keys() {
        for character in "0123456789+-*/.()".chars() {
            assert_eq!(
                action_for(&press(KeyCode::Char(character))),
                Some(Action::Input(character))
            );
        }

        let shifted = KeyEvent::new(KeyCode::Char('*'), KeyModifiers::SHIFT);
        assert_eq!(action_for(&shifted), Some(Action::Input('*')));
    }

    #[test]
    fn test_command_keys() {
        assert_eq!(action_for(&press(KeyCode::Enter)), Some(Action::Evaluate));
        assert_eq!(action_for(&press(KeyCode::Char('='))), Some(Action::Evaluate));
        assert_eq!(action_for(&press(KeyCode::Backspace)), Some(Action::Backspace));
        assert_eq!(action_for(&press(KeyCode::Esc)), Some(Action::Clear));
        assert_eq!(action_for(&press(KeyCode::Char('%'))), Some(Action::Percent));
    }

    #[test]
    fn test_memory_recall() {
        let key = KeyEvent::new(KeyCode::Char('m'), KeyModifiers::CONTROL);
        assert_eq!(action_for(&key), Some(Action::MemoryRecall));

        assert_eq!(action_for(&press(KeyCode::Char('m'))), None);
    }

    #[test]
    fn test_ignored_keys() {
        assert_eq!(action_for(&press(KeyCode::Char('a'))), None);
        assert_eq!(action_for(&press(KeyCode::Tab)), None);

        let ctrl_digit = KeyEvent::new(KeyCode::Char('1'), KeyModifiers::CONTROL);
        assert_eq!(action_for(&ctrl_digit), None);

        let release = KeyEvent {
            code: KeyCode::Char('1'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(action_for(&release), None);
    }
}
