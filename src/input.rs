use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::config::KeyBindings;

/// Logical keys the states react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Back,
    VolumeUp,
    VolumeDown,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Confirm,
        Action::Back,
        Action::VolumeUp,
        Action::VolumeDown,
    ];

    /// Name used in the `[key_bindings]` config table.
    pub fn name(self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Confirm => "confirm",
            Action::Back => "back",
            Action::VolumeUp => "volume_up",
            Action::VolumeDown => "volume_down",
        }
    }
}

/// Events delivered to the topmost state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Closed,
    FocusLost,
    Key(Action),
}

/// Translate a raw terminal event. Key releases, repeats of unbound keys and
/// resizes yield nothing.
pub fn translate(event: &Event, bindings: &KeyBindings) -> Option<InputEvent> {
    match event {
        Event::FocusLost => Some(InputEvent::FocusLost),
        Event::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return None;
            }
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Some(InputEvent::Closed);
            }
            bindings.action_for(key).map(InputEvent::Key)
        }
        _ => None,
    }
}
