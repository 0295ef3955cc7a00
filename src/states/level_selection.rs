use super::menu::MenuCursor;
use super::{State, StateContext, StateId};
use crate::audio::SoundEffect;
use crate::game::LEVEL_COUNT;
use crate::input::{Action, InputEvent};
use crate::ui::{DrawCommand, MenuItem, MenuView, Scene};

pub struct LevelSelectionState {
    cursor: MenuCursor,
}

impl LevelSelectionState {
    pub fn new() -> Self {
        Self {
            cursor: MenuCursor::new(LEVEL_COUNT),
        }
    }
}

impl State for LevelSelectionState {
    fn enter(&mut self) {
        self.cursor.reset();
    }

    fn process_events(&mut self, events: &[InputEvent], ctx: &mut StateContext) {
        for event in events {
            match event {
                InputEvent::Closed => ctx.quit(),
                InputEvent::Key(Action::Left) => {
                    if self.cursor.previous() {
                        ctx.play(SoundEffect::Ui);
                    }
                }
                InputEvent::Key(Action::Right) => {
                    if self.cursor.next() {
                        ctx.play(SoundEffect::Ui);
                    }
                }
                InputEvent::Key(Action::Confirm) => {
                    ctx.set_next_level(self.cursor.selected());
                    ctx.replace(StateId::Game);
                    ctx.play(SoundEffect::UiConfirm);
                }
                InputEvent::Key(Action::Back) => {
                    ctx.replace(StateId::MainMenu);
                    ctx.play(SoundEffect::UiConfirm);
                }
                _ => {}
            }
        }
    }

    fn render_as_non_top_state(&self, scene: &mut Scene) {
        let items = (1..=LEVEL_COUNT)
            .map(|n| MenuItem::new(&format!("level {}", n)))
            .collect();
        let mut view = MenuView::new("Select Level", items, self.cursor.selected());
        view.horizontal = true;
        view.footer = Some("ESC to return".to_string());
        scene.draw(DrawCommand::Menu(view));
    }
}
