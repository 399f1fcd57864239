use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    widgets::{Block, Paragraph},
};
use reckon::Action;

use crate::{
    config::theme::Theme,
    feedback::{Effect, Feedback},
    utils::ROUNDED_BLOCK,
};

/// Groups of buttons sharing a color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Digit,
    Operator,
    Memory,
    Command,
    Evaluate,
}

/// A keypad button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    pub action: Action,
    pub kind: ButtonKind,
}

const fn button(label: &'static str, action: Action, kind: ButtonKind) -> Button {
    Button {
        label,
        action,
        kind,
    }
}

const fn digit(label: &'static str, character: char) -> Button {
    button(label, Action::Input(character), ButtonKind::Digit)
}

const fn operator(label: &'static str, character: char) -> Button {
    button(label, Action::Input(character), ButtonKind::Operator)
}

/// The buttons, row by row
pub const LAYOUT: &[&[Button]] = &[
    &[
        button("MC", Action::MemoryClear, ButtonKind::Memory),
        button("MR", Action::MemoryRecall, ButtonKind::Memory),
        button("M+", Action::MemoryAdd, ButtonKind::Memory),
        button("M-", Action::MemorySubtract, ButtonKind::Memory),
        button("C", Action::Clear, ButtonKind::Command),
    ],
    &[
        digit("7", '7'),
        digit("8", '8'),
        digit("9", '9'),
        operator("÷", '/'),
        button("⌫", Action::Backspace, ButtonKind::Command),
    ],
    &[
        digit("4", '4'),
        digit("5", '5'),
        digit("6", '6'),
        operator("×", '*'),
        button("%", Action::Percent, ButtonKind::Operator),
    ],
    &[
        digit("1", '1'),
        digit("2", '2'),
        digit("3", '3'),
        operator("−", '-'),
        operator("(", '('),
    ],
    &[
        button("±", Action::ToggleSign, ButtonKind::Operator),
        digit("0", '0'),
        digit(".", '.'),
        operator("+", '+'),
        operator(")", ')'),
    ],
    &[button("=", Action::Evaluate, ButtonKind::Evaluate)],
];

/// Find the button that performs `action`
pub fn find(action: Action) -> Option<&'static Button> {
    LAYOUT
        .iter()
        .flat_map(|row| row.iter())
        .find(|button| button.action == action)
}

/// Split an area into one rectangle per button
pub fn layout(area: Rect) -> Vec<(Rect, &'static Button)> {
    let rows = Layout::vertical(LAYOUT.iter().map(|_| Constraint::Fill(1))).split(area);

    LAYOUT
        .iter()
        .zip(rows.iter())
        .flat_map(|(buttons, row_area)| {
            let columns =
                Layout::horizontal(buttons.iter().map(|_| Constraint::Fill(1))).split(*row_area);
            buttons
                .iter()
                .zip(columns.iter().copied())
                .map(|(button, area)| (area, button))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// The clickable keypad
///
/// Remembers where each button was last drawn, so clicks can be mapped back to actions.
#[derive(Debug, Default)]
pub struct Keypad {
    areas: Vec<(Rect, Action)>,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// The action of the button drawn at the given cell
    pub fn action_at(&self, column: u16, row: u16) -> Option<Action> {
        let position = Position::new(column, row);
        self.areas
            .iter()
            .find(|(area, _)| area.contains(position))
            .map(|(_, action)| *action)
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, feedback: &Feedback) {
        let buttons = layout(area);
        self.areas = buttons
            .iter()
            .map(|(area, button)| (*area, button.action))
            .collect();

        for (area, button) in buttons {
            let color = theme.keypad.color(button.kind);

            let pressed = feedback.is_active(Effect::Press(button.action));
            let pulsing = button.action == Action::Evaluate && feedback.is_active(Effect::Pulse);

            let mut style = Style::new().fg(color);
            if pressed || pulsing {
                style = style.fg(theme.background).bg(color);
            }
            if pulsing {
                style = style.add_modifier(Modifier::BOLD);
            }

            // Only draw borders when there is room for them
            let block = if area.height >= 3 {
                ROUNDED_BLOCK.border_style(Style::new().fg(color))
            } else {
                Block::new()
            };
            let inner = block.inner(area);
            let [label_area] = Layout::vertical([Constraint::Length(1)])
                .flex(ratatui::layout::Flex::Center)
                .areas(inner);

            frame.render_widget(block.style(style), area);
            frame.render_widget(Paragraph::new(button.label).style(style).centered(), label_area);
        }
    }
}
