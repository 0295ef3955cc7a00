use std::time::Duration;

use log::{debug, info, warn};

use super::{State, StateContext, StateId};
use crate::audio::SoundEffect;
use crate::config::SimulationConfig;
use crate::game::{level, Direction, GameSession, SimEvent, LEVEL_COUNT};
use crate::input::{Action, InputEvent};
use crate::ui::{DrawCommand, Scene};

/// The playing field. Owns the running session; every `enter` restarts the
/// selected level from scratch.
pub struct GameState {
    session: GameSession,
    next_level: usize,
}

impl GameState {
    pub fn new(config: SimulationConfig, seed: Option<u64>) -> Self {
        Self {
            session: GameSession::new(config, seed),
            next_level: 0,
        }
    }

    /// Level loaded by the next `enter`. Out-of-range indices are ignored.
    pub fn set_next_level(&mut self, index: usize) {
        if index >= LEVEL_COUNT {
            warn!("{} is not a valid level index", index);
            return;
        }
        self.next_level = index;
    }

    #[cfg(test)]
    pub fn next_level(&self) -> usize {
        self.next_level
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn steer(&mut self, direction: Direction) {
        if !self.session.steer(direction) {
            debug!("ignoring reversal to {:?}", direction);
        }
    }
}

impl State for GameState {
    fn enter(&mut self) {
        let Some(definition) = level::level(self.next_level) else {
            return;
        };
        if let Err(err) = self.session.start_level(definition) {
            warn!("level {} failed to load: {}", self.next_level, err);
        }
    }

    fn update(&mut self, elapsed: Duration, ctx: &mut StateContext) {
        for event in self.session.update(elapsed) {
            match event {
                SimEvent::Growing => ctx.play(SoundEffect::MovementGrowing),
                SimEvent::AteFood => ctx.play(SoundEffect::Food),
                SimEvent::AteSuperFood => ctx.play(SoundEffect::FoodBig),
                SimEvent::Teleported => ctx.play(SoundEffect::Teleport),
                SimEvent::Collided => ctx.play(SoundEffect::Collision),
                SimEvent::Died { score } => {
                    info!("game over on level {} with score {}", self.next_level, score);
                    ctx.push_layered(StateId::GameOver, true, false);
                    ctx.set_game_over_score(score);
                }
                SimEvent::FoodSpawned { .. } => {}
            }
        }
    }

    fn process_events(&mut self, events: &[InputEvent], ctx: &mut StateContext) {
        for event in events {
            match event {
                InputEvent::Closed => ctx.quit(),
                InputEvent::FocusLost => ctx.push_layered(StateId::Pause, true, false),
                InputEvent::Key(Action::Up) => self.steer(Direction::Up),
                InputEvent::Key(Action::Down) => self.steer(Direction::Down),
                InputEvent::Key(Action::Left) => self.steer(Direction::Left),
                InputEvent::Key(Action::Right) => self.steer(Direction::Right),
                InputEvent::Key(Action::Back) => {
                    ctx.push_layered(StateId::Pause, true, false);
                    ctx.play(SoundEffect::UiConfirm);
                }
                _ => {}
            }
        }
    }

    fn render_as_non_top_state(&self, scene: &mut Scene) {
        scene.draw(DrawCommand::Grid(self.session.grid().clone()));
        scene.draw(DrawCommand::Score(self.session.score()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::testing::RecordingAudio;
    use crate::game::Position;
    use crate::states::Request;

    fn game() -> GameState {
        let mut game = GameState::new(SimulationConfig::default(), Some(11));
        game.enter();
        game
    }

    #[test]
    fn test_enter_loads_selected_level() {
        let mut game = GameState::new(SimulationConfig::default(), Some(11));
        game.set_next_level(1);
        game.enter();
        assert_eq!(game.session().grid().width(), 40);
        assert_eq!(game.session().snake().head(), Some(Position::new(10, 20)));
    }

    #[test]
    fn test_invalid_level_ignored() {
        let mut game = GameState::new(SimulationConfig::default(), None);
        game.set_next_level(2);
        game.set_next_level(3);
        assert_eq!(game.next_level(), 2);
    }

    #[test]
    fn test_escape_and_focus_loss_pause() {
        let mut game = game();
        let mut audio = RecordingAudio::default();
        let mut ctx = StateContext::new(&mut audio);
        game.process_events(
            &[InputEvent::Key(Action::Back), InputEvent::FocusLost],
            &mut ctx,
        );
        let pause = Request::Push {
            id: StateId::Pause,
            render_below: true,
            update_below: false,
        };
        assert_eq!(ctx.into_requests(), vec![pause, pause]);
        assert_eq!(audio.log.borrow().effects, vec![SoundEffect::UiConfirm]);
    }

    #[test]
    fn test_direction_keys_steer() {
        let mut game = game();
        let mut audio = RecordingAudio::default();
        let mut ctx = StateContext::new(&mut audio);
        // down reverses the initial upward move and is dropped
        game.process_events(
            &[InputEvent::Key(Action::Down), InputEvent::Key(Action::Left)],
            &mut ctx,
        );
        game.update(Duration::from_millis(250), &mut ctx);
        assert_eq!(game.session().snake().head(), Some(Position::new(16, 18)));
        assert_eq!(game.session().last_movement(), Direction::Left);
    }

    #[test]
    fn test_death_requests_game_over() {
        let mut game = game();
        let mut audio = RecordingAudio::default();
        let mut ctx = StateContext::new(&mut audio);
        // level 1: head (17, 18) moving up hits the wall at row 3
        game.update(Duration::from_millis(250 * 15), &mut ctx);
        assert!(game.session().is_dead());

        let score = game.session().score();
        let requests = ctx.into_requests();
        assert_eq!(
            requests,
            vec![
                Request::Push {
                    id: StateId::GameOver,
                    render_below: true,
                    update_below: false,
                },
                Request::SetGameOverScore(score),
            ]
        );
        assert!(audio.log.borrow().effects.contains(&SoundEffect::Collision));
    }

    #[test]
    fn test_render_draws_grid_then_score() {
        let game = game();
        let mut scene = Scene::new();
        game.render_as_non_top_state(&mut scene);
        assert!(matches!(scene.commands()[0], DrawCommand::Grid(_)));
        assert!(matches!(scene.commands()[1], DrawCommand::Score(0)));
    }
}
