//! Stack of screens. Each screen is one `State`; the manager owns exactly one
//! instance per `StateId` and the stack only stores ids plus layering flags.

mod game;
mod game_over;
mod level_selection;
mod main_menu;
mod manager;
mod menu;
mod options;
mod pause;

pub use game::GameState;
pub use game_over::GameOverState;
pub use level_selection::LevelSelectionState;
pub use main_menu::MainMenuState;
pub use manager::StateManager;
pub use options::OptionsState;
pub use pause::PauseState;

use std::time::Duration;

use crate::audio::{AudioSink, SoundEffect};
use crate::input::InputEvent;
use crate::ui::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    /// Reported while the stack is empty.
    Invalid,
    MainMenu,
    LevelSelection,
    Options,
    Game,
    Pause,
    GameOver,
}

/// One stack entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackFrame {
    pub id: StateId,
    /// Keep drawing the frames below this one.
    pub render_below: bool,
    /// Keep simulating the frames below this one.
    pub update_below: bool,
}

/// Changes a state asks the manager to make once the current call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Push {
        id: StateId,
        render_below: bool,
        update_below: bool,
    },
    Pop,
    Replace {
        id: StateId,
        render_below: bool,
        update_below: bool,
    },
    SetNextLevel(usize),
    SetGameOverScore(u32),
    SetEffectsVolume(u8),
    SetMusicVolume(u8),
    Quit,
}

/// Handle passed into state callbacks. Sounds play immediately; stack changes
/// are queued and applied in order by the manager.
pub struct StateContext<'a> {
    audio: &'a mut dyn AudioSink,
    requests: Vec<Request>,
}

impl<'a> StateContext<'a> {
    pub fn new(audio: &'a mut dyn AudioSink) -> Self {
        Self {
            audio,
            requests: Vec::new(),
        }
    }

    pub fn push(&mut self, id: StateId) {
        self.push_layered(id, false, false);
    }

    pub fn push_layered(&mut self, id: StateId, render_below: bool, update_below: bool) {
        self.requests.push(Request::Push {
            id,
            render_below,
            update_below,
        });
    }

    pub fn pop(&mut self) {
        self.requests.push(Request::Pop);
    }

    pub fn replace(&mut self, id: StateId) {
        self.requests.push(Request::Replace {
            id,
            render_below: false,
            update_below: false,
        });
    }

    pub fn set_next_level(&mut self, index: usize) {
        self.requests.push(Request::SetNextLevel(index));
    }

    pub fn set_game_over_score(&mut self, score: u32) {
        self.requests.push(Request::SetGameOverScore(score));
    }

    pub fn set_effects_volume(&mut self, volume: u8) {
        self.requests.push(Request::SetEffectsVolume(volume));
    }

    pub fn set_music_volume(&mut self, volume: u8) {
        self.requests.push(Request::SetMusicVolume(volume));
    }

    pub fn quit(&mut self) {
        self.requests.push(Request::Quit);
    }

    pub fn play(&mut self, effect: SoundEffect) {
        self.audio.play_effect(effect);
    }

    pub fn into_requests(self) -> Vec<Request> {
        self.requests
    }
}

pub trait State {
    fn enter(&mut self) {}

    fn exit(&mut self) {}

    fn update(&mut self, _elapsed: Duration, _ctx: &mut StateContext) {}

    /// Raw events of this frame; only the topmost state receives them.
    fn process_events(&mut self, events: &[InputEvent], ctx: &mut StateContext);

    /// Polled input, only called on the topmost state.
    fn process_input(&mut self, _ctx: &mut StateContext) {}

    /// Draw this state alone as a complete frame.
    fn render(&self, scene: &mut Scene) {
        scene.clear();
        self.render_as_non_top_state(scene);
        scene.present();
    }

    /// Draw this state's own layer without clearing or presenting.
    fn render_as_non_top_state(&self, scene: &mut Scene);

    fn set_effects_volume(&mut self, _volume: u8) {}
}
