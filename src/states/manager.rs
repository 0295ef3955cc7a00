use std::time::Duration;

use log::{debug, warn};

use super::{
    GameOverState, GameState, LevelSelectionState, MainMenuState, OptionsState, PauseState,
    Request, StackFrame, State, StateContext, StateId,
};
use crate::audio::AudioSink;
use crate::config::Config;
use crate::input::InputEvent;
use crate::ui::Scene;

/// One instance of every state, addressed by id.
struct StateSet {
    main_menu: MainMenuState,
    level_selection: LevelSelectionState,
    options: OptionsState,
    game: GameState,
    pause: PauseState,
    game_over: GameOverState,
}

impl StateSet {
    fn get(&self, id: StateId) -> Option<&dyn State> {
        match id {
            StateId::Invalid => None,
            StateId::MainMenu => Some(&self.main_menu),
            StateId::LevelSelection => Some(&self.level_selection),
            StateId::Options => Some(&self.options),
            StateId::Game => Some(&self.game),
            StateId::Pause => Some(&self.pause),
            StateId::GameOver => Some(&self.game_over),
        }
    }

    fn get_mut(&mut self, id: StateId) -> Option<&mut dyn State> {
        match id {
            StateId::Invalid => None,
            StateId::MainMenu => Some(&mut self.main_menu),
            StateId::LevelSelection => Some(&mut self.level_selection),
            StateId::Options => Some(&mut self.options),
            StateId::Game => Some(&mut self.game),
            StateId::Pause => Some(&mut self.pause),
            StateId::GameOver => Some(&mut self.game_over),
        }
    }

    fn all_mut(&mut self) -> [&mut dyn State; 6] {
        [
            &mut self.main_menu,
            &mut self.level_selection,
            &mut self.options,
            &mut self.game,
            &mut self.pause,
            &mut self.game_over,
        ]
    }
}

/// Index of the lowest frame taking part in a traversal from the top. The walk
/// includes frames until one whose flag is unset, that frame included.
fn lowest_active(stack: &[StackFrame], passes_below: impl Fn(&StackFrame) -> bool) -> usize {
    let mut lowest = stack.len();
    for (index, frame) in stack.iter().enumerate().rev() {
        lowest = index;
        if !passes_below(frame) {
            break;
        }
    }
    lowest
}

pub struct StateManager {
    states: StateSet,
    stack: Vec<StackFrame>,
    audio: Box<dyn AudioSink>,
    running: bool,
}

impl StateManager {
    /// Build every state, apply the configured volumes, start the music and
    /// open the main menu.
    pub fn new(config: &Config, mut audio: Box<dyn AudioSink>, seed: Option<u64>) -> Self {
        audio.set_music_volume(config.audio.music_volume);
        audio.set_effects_volume(config.audio.effects_volume);
        audio.start_music();

        let states = StateSet {
            main_menu: MainMenuState::new(),
            level_selection: LevelSelectionState::new(),
            options: OptionsState::new(config.audio.music_volume, config.audio.effects_volume),
            game: GameState::new(config.simulation.clone(), seed),
            pause: PauseState::new(),
            game_over: GameOverState::new(),
        };

        let mut manager = Self {
            states,
            stack: Vec::new(),
            audio,
            running: true,
        };
        manager.push(StateId::MainMenu, false, false);
        manager
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Id of the topmost frame, `Invalid` while the stack is empty.
    pub fn current_state(&self) -> StateId {
        self.stack.last().map_or(StateId::Invalid, |frame| frame.id)
    }

    #[cfg(test)]
    pub fn stack(&self) -> &[StackFrame] {
        &self.stack
    }

    /// Replace the top frame with the given level.
    pub fn start_level(&mut self, index: usize) {
        self.states.game.set_next_level(index);
        self.replace(StateId::Game, false, false);
    }

    pub fn push(&mut self, id: StateId, render_below: bool, update_below: bool) {
        let Some(state) = self.states.get_mut(id) else {
            warn!("refusing to push {:?}", id);
            return;
        };
        debug!("push {:?}", id);
        self.stack.push(StackFrame {
            id,
            render_below,
            update_below,
        });
        state.enter();
    }

    pub fn pop(&mut self) {
        let Some(frame) = self.stack.pop() else {
            warn!("pop on an empty state stack");
            return;
        };
        debug!("pop {:?}", frame.id);
        if let Some(state) = self.states.get_mut(frame.id) {
            state.exit();
        }
    }

    pub fn replace(&mut self, id: StateId, render_below: bool, update_below: bool) {
        self.pop();
        self.push(id, render_below, update_below);
    }

    /// Update the top frame and every frame it lets through, lowest first.
    pub fn update(&mut self, elapsed: Duration) {
        let lowest = lowest_active(&self.stack, |frame| frame.update_below);
        let ids: Vec<StateId> = self.stack[lowest..].iter().map(|frame| frame.id).collect();

        for id in ids {
            let Some(state) = self.states.get_mut(id) else {
                continue;
            };
            let mut ctx = StateContext::new(self.audio.as_mut());
            state.update(elapsed, &mut ctx);
            let requests = ctx.into_requests();
            self.apply(requests);
        }
    }

    pub fn render(&self, scene: &mut Scene) {
        scene.clear();
        let lowest = lowest_active(&self.stack, |frame| frame.render_below);
        for frame in &self.stack[lowest..] {
            if let Some(state) = self.states.get(frame.id) {
                state.render_as_non_top_state(scene);
            }
        }
        scene.present();
    }

    pub fn process_events(&mut self, events: &[InputEvent]) {
        let Some(id) = self.stack.last().map(|frame| frame.id) else {
            if events.contains(&InputEvent::Closed) {
                self.running = false;
            }
            return;
        };
        if let Some(state) = self.states.get_mut(id) {
            let mut ctx = StateContext::new(self.audio.as_mut());
            state.process_events(events, &mut ctx);
            let requests = ctx.into_requests();
            self.apply(requests);
        }
    }

    pub fn process_input(&mut self) {
        let Some(id) = self.stack.last().map(|frame| frame.id) else {
            return;
        };
        if let Some(state) = self.states.get_mut(id) {
            let mut ctx = StateContext::new(self.audio.as_mut());
            state.process_input(&mut ctx);
            let requests = ctx.into_requests();
            self.apply(requests);
        }
    }

    fn apply(&mut self, requests: Vec<Request>) {
        for request in requests {
            match request {
                Request::Push {
                    id,
                    render_below,
                    update_below,
                } => self.push(id, render_below, update_below),
                Request::Pop => self.pop(),
                Request::Replace {
                    id,
                    render_below,
                    update_below,
                } => self.replace(id, render_below, update_below),
                Request::SetNextLevel(index) => self.states.game.set_next_level(index),
                Request::SetGameOverScore(score) => self.states.game_over.set_score(score),
                Request::SetEffectsVolume(volume) => {
                    self.audio.set_effects_volume(volume);
                    for state in self.states.all_mut() {
                        state.set_effects_volume(volume);
                    }
                }
                Request::SetMusicVolume(volume) => self.audio.set_music_volume(volume),
                Request::Quit => {
                    debug!("quit requested");
                    self.running = false;
                }
            }
        }
    }
}
