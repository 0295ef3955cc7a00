use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::input::Action;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl KeyBinding {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifier(mut self, modifier: &str) -> Self {
        self.modifiers.push(modifier.to_string());
        self
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        let key_matches = match event.code {
            KeyCode::Char(' ') => self.key == "space",
            KeyCode::Char(c) => self.key == c.to_string(),
            KeyCode::Enter => self.key == "enter",
            KeyCode::Esc => self.key == "esc",
            KeyCode::Backspace => self.key == "backspace",
            KeyCode::Tab => self.key == "tab",
            KeyCode::Left => self.key == "left",
            KeyCode::Right => self.key == "right",
            KeyCode::Up => self.key == "up",
            KeyCode::Down => self.key == "down",
            KeyCode::F(n) => self.key == format!("f{}", n),
            _ => false,
        };

        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let alt = event.modifiers.contains(KeyModifiers::ALT);
        // Shift is part of the character itself ('W', '+')
        let shift = event.modifiers.contains(KeyModifiers::SHIFT)
            && !matches!(event.code, KeyCode::Char(_));

        let modifiers_match = if self.modifiers.is_empty() {
            !ctrl && !alt && !shift
        } else {
            self.modifiers.iter().all(|m| match m.as_str() {
                "ctrl" => ctrl,
                "alt" => alt,
                "shift" => shift,
                _ => false,
            })
        };

        key_matches && modifiers_match
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    // Maps from action name to the keys that trigger it
    #[serde(default)]
    pub actions: HashMap<String, Vec<KeyBinding>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut actions = HashMap::new();
        actions.insert(
            Action::Up.name().to_string(),
            vec![KeyBinding::new("up"), KeyBinding::new("w")],
        );
        actions.insert(
            Action::Down.name().to_string(),
            vec![KeyBinding::new("down"), KeyBinding::new("s")],
        );
        actions.insert(
            Action::Left.name().to_string(),
            vec![KeyBinding::new("left"), KeyBinding::new("a")],
        );
        actions.insert(
            Action::Right.name().to_string(),
            vec![KeyBinding::new("right"), KeyBinding::new("d")],
        );
        actions.insert(Action::Confirm.name().to_string(), vec![KeyBinding::new("enter")]);
        actions.insert(Action::Back.name().to_string(), vec![KeyBinding::new("esc")]);
        actions.insert(Action::VolumeUp.name().to_string(), vec![KeyBinding::new("+")]);
        actions.insert(Action::VolumeDown.name().to_string(), vec![KeyBinding::new("-")]);

        Self { actions }
    }
}

impl KeyBindings {
    /// First action (in `Action::ALL` order) bound to `event`.
    pub fn action_for(&self, event: &KeyEvent) -> Option<Action> {
        Action::ALL.into_iter().find(|action| {
            self.actions
                .get(action.name())
                .map_or(false, |bindings| bindings.iter().any(|b| b.matches(event)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_binding_matches() {
        let binding = KeyBinding::new("n").with_modifier("ctrl");

        let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert!(binding.matches(&ctrl_n));

        let alt_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::ALT);
        assert!(!binding.matches(&alt_n));

        let just_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
        assert!(!binding.matches(&just_n));
    }

    #[test]
    fn test_shifted_characters_match_plain_binding() {
        let plus = KeyBinding::new("+");
        let event = KeyEvent::new(KeyCode::Char('+'), KeyModifiers::SHIFT);
        assert!(plus.matches(&event));

        let shift_up = KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT);
        assert!(!KeyBinding::new("up").matches(&shift_up));
    }

    #[test]
    fn test_default_key_bindings() {
        let bindings = KeyBindings::default();

        let s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(bindings.action_for(&s), Some(Action::Down));

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(bindings.action_for(&esc), Some(Action::Back));

        let minus = KeyEvent::new(KeyCode::Char('-'), KeyModifiers::NONE);
        assert_eq!(bindings.action_for(&minus), Some(Action::VolumeDown));
    }

    #[test]
    fn test_custom_binding_from_toml() {
        let bindings: KeyBindings = toml::from_str(
            r#"
            [[actions.confirm]]
            key = "space"
            "#,
        )
        .unwrap();

        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(bindings.action_for(&space), Some(Action::Confirm));

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(bindings.action_for(&enter), None);
    }
}
