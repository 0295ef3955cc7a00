use super::menu::MenuCursor;
use super::{State, StateContext};
use crate::audio::SoundEffect;
use crate::input::{Action, InputEvent};
use crate::ui::{DrawCommand, MenuItem, MenuView, Scene};

const MUSIC: usize = 0;
const EFFECTS: usize = 1;
const RETURN: usize = 2;

/// Number of steps on a volume bar; each step is 10% volume.
const VOLUME_STEPS: u8 = 10;

/// Volume settings. One instance is shared by every push, so the levels
/// survive leaving and re-entering the screen.
pub struct OptionsState {
    cursor: MenuCursor,
    music_level: u8,
    effects_level: u8,
}

impl OptionsState {
    /// Start levels from 0-100 volumes.
    pub fn new(music_volume: u8, effects_volume: u8) -> Self {
        Self {
            cursor: MenuCursor::new(3),
            music_level: to_level(music_volume),
            effects_level: to_level(effects_volume),
        }
    }

    #[cfg(test)]
    pub fn music_level(&self) -> u8 {
        self.music_level
    }

    #[cfg(test)]
    pub fn effects_level(&self) -> u8 {
        self.effects_level
    }

    fn lower_volume(&mut self, ctx: &mut StateContext) {
        match self.cursor.selected() {
            MUSIC if self.music_level > 0 => {
                self.music_level -= 1;
                ctx.set_music_volume(to_volume(self.music_level));
            }
            EFFECTS if self.effects_level > 0 => {
                ctx.play(SoundEffect::VolumeDown);
                self.effects_level -= 1;
                ctx.set_effects_volume(to_volume(self.effects_level));
            }
            _ => {}
        }
    }

    fn raise_volume(&mut self, ctx: &mut StateContext) {
        match self.cursor.selected() {
            MUSIC if self.music_level < VOLUME_STEPS => {
                self.music_level += 1;
                ctx.set_music_volume(to_volume(self.music_level));
            }
            EFFECTS if self.effects_level < VOLUME_STEPS => {
                ctx.play(SoundEffect::VolumeUp);
                self.effects_level += 1;
                ctx.set_effects_volume(to_volume(self.effects_level));
            }
            _ => {}
        }
    }
}

fn to_level(volume: u8) -> u8 {
    (volume.min(100) + 5) / 10
}

fn to_volume(level: u8) -> u8 {
    level * 10
}

impl State for OptionsState {
    fn enter(&mut self) {
        self.cursor.reset();
    }

    fn process_events(&mut self, events: &[InputEvent], ctx: &mut StateContext) {
        for event in events {
            match event {
                InputEvent::Closed => ctx.quit(),
                InputEvent::Key(Action::Back) => {
                    ctx.pop();
                    ctx.play(SoundEffect::UiConfirm);
                }
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
                InputEvent::Key(Action::Confirm) if self.cursor.selected() == RETURN => {
                    ctx.pop();
                    ctx.play(SoundEffect::UiConfirm);
                }
                InputEvent::Key(Action::Left | Action::VolumeDown) => self.lower_volume(ctx),
                InputEvent::Key(Action::Right | Action::VolumeUp) => self.raise_volume(ctx),
                _ => {}
            }
        }
    }

    fn render_as_non_top_state(&self, scene: &mut Scene) {
        let items = vec![
            MenuItem::new("music").with_level(self.music_level),
            MenuItem::new("effects").with_level(self.effects_level),
            MenuItem::new("return"),
        ];
        let mut view = MenuView::new("Options", items, self.cursor.selected());
        view.footer = Some("left / right to change volume".to_string());
        scene.draw(DrawCommand::Menu(view));
    }

    fn set_effects_volume(&mut self, volume: u8) {
        self.effects_level = to_level(volume);
    }
}
