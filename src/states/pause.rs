use super::menu::MenuCursor;
use super::{State, StateContext, StateId};
use crate::audio::SoundEffect;
use crate::input::{Action, InputEvent};
use crate::ui::{DrawCommand, MenuItem, MenuView, Scene, Shade};

const ITEMS: [&str; 3] = ["resume", "options", "exit"];

/// Overlay on top of a running game. Pushed with render-below so the frozen
/// board stays visible.
pub struct PauseState {
    cursor: MenuCursor,
}

impl PauseState {
    pub fn new() -> Self {
        Self {
            cursor: MenuCursor::new(ITEMS.len()),
        }
    }
}

impl State for PauseState {
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
                InputEvent::Key(Action::Back) => {
                    ctx.pop();
                    ctx.play(SoundEffect::UiConfirm);
                }
                InputEvent::Key(Action::Confirm) => {
                    match self.cursor.selected() {
                        0 => ctx.pop(),
                        1 => ctx.push(StateId::Options),
                        _ => {
                            // leave both the pause overlay and the game
                            ctx.pop();
                            ctx.replace(StateId::MainMenu);
                        }
                    }
                    ctx.play(SoundEffect::UiConfirm);
                }
                _ => {}
            }
        }
    }

    fn render_as_non_top_state(&self, scene: &mut Scene) {
        scene.draw(DrawCommand::Shade(Shade::Dim));
        let items = ITEMS.iter().map(|label| MenuItem::new(label)).collect();
        scene.draw(DrawCommand::Menu(MenuView::new(
            "PAUSED",
            items,
            self.cursor.selected(),
        )));
    }
}
