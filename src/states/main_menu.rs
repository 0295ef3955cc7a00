use super::menu::MenuCursor;
use super::{State, StateContext, StateId};
use crate::audio::SoundEffect;
use crate::input::{Action, InputEvent};
use crate::ui::{DrawCommand, MenuItem, MenuView, Scene};

const ITEMS: [&str; 3] = ["play", "options", "exit"];

pub struct MainMenuState {
    cursor: MenuCursor,
}

impl MainMenuState {
    pub fn new() -> Self {
        Self {
            cursor: MenuCursor::new(ITEMS.len()),
        }
    }
}

impl State for MainMenuState {
    fn enter(&mut self) {
        self.cursor.reset();
    }

    fn process_events(&mut self, events: &[InputEvent], ctx: &mut StateContext) {
        for event in events {
            match event {
                InputEvent::Closed => ctx.quit(),
                InputEvent::Key(Action::Up) => {
                    if self.cursor.previous() {
                        ctx.play(SoundEffect::Ui);
                    }
                }
                InputEvent::Key(Action::Down) => {
                    if self.cursor.next() {
                        ctx.play(SoundEffect::Ui);
                    }
                }
                InputEvent::Key(Action::Confirm) => match self.cursor.selected() {
                    0 => {
                        ctx.replace(StateId::LevelSelection);
                        ctx.play(SoundEffect::UiConfirm);
                    }
                    1 => {
                        ctx.push(StateId::Options);
                        ctx.play(SoundEffect::UiConfirm);
                    }
                    _ => ctx.quit(),
                },
                _ => {}
            }
        }
    }

    fn render_as_non_top_state(&self, scene: &mut Scene) {
        let items = ITEMS.iter().map(|label| MenuItem::new(label)).collect();
        let mut view = MenuView::new("SNAKE", items, self.cursor.selected());
        view.footer = Some("arrows / wasd to move, enter to select".to_string());
        scene.draw(DrawCommand::Menu(view));
    }
}
