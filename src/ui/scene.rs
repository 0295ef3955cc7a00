//! What the states want on screen, independent of the terminal backend.

use crate::game::Grid;

/// Tint laid over everything drawn before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Dim,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    /// Filled steps of a 10-step volume bar shown next to the label.
    pub level: Option<u8>,
    /// Drawn struck through (a muted channel).
    pub struck: bool,
}

impl MenuItem {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            level: None,
            struck: false,
        }
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self.struck = level == 0;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub title: String,
    pub subtitle: Option<String>,
    pub items: Vec<MenuItem>,
    pub selected: usize,
    /// Items side by side instead of stacked.
    pub horizontal: bool,
    pub footer: Option<String>,
}

impl MenuView {
    pub fn new(title: &str, items: Vec<MenuItem>, selected: usize) -> Self {
        Self {
            title: title.to_string(),
            subtitle: None,
            items,
            selected,
            horizontal: false,
            footer: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum DrawCommand {
    Grid(Grid),
    Score(u32),
    Shade(Shade),
    Menu(MenuView),
}

/// Draw list for one frame. Commands are painted in insertion order, so later
/// layers cover earlier ones.
#[derive(Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
    frames_presented: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Mark the frame as complete.
    pub fn present(&mut self) {
        self.frames_presented += 1;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_clear_and_present() {
        let mut scene = Scene::new();
        scene.draw(DrawCommand::Score(3));
        scene.draw(DrawCommand::Shade(Shade::Dim));
        assert_eq!(scene.commands().len(), 2);

        scene.present();
        scene.clear();
        assert!(scene.commands().is_empty());
        assert_eq!(scene.frames_presented(), 1);
    }

    #[test]
    fn test_muted_item_is_struck() {
        assert!(MenuItem::new("music").with_level(0).struck);
        assert!(!MenuItem::new("music").with_level(4).struck);
    }
}
