use super::menu::MenuCursor;
use super::{State, StateContext, StateId};
use crate::audio::SoundEffect;
use crate::input::{Action, InputEvent};
use crate::ui::{DrawCommand, MenuItem, MenuView, Scene, Shade};

const ITEMS: [&str; 2] = ["play again", "exit"];

pub struct GameOverState {
    cursor: MenuCursor,
    score: u32,
}

impl GameOverState {
    pub fn new() -> Self {
        Self {
            cursor: MenuCursor::new(ITEMS.len()),
            score: 0,
        }
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

impl State for GameOverState {
    fn enter(&mut self) {
        self.cursor.reset();
        self.score = 0;
    }

    fn process_events(&mut self, events: &[InputEvent], ctx: &mut StateContext) {
        for event in events {
            match event {
                InputEvent::Closed => ctx.quit(),
                InputEvent::Key(Action::Up) => {
                    if self.cursor.previous() {
                        ctx.play(SoundEffect::UiConfirm);
                    }
                }
                InputEvent::Key(Action::Down) => {
                    if self.cursor.next() {
                        ctx.play(SoundEffect::UiConfirm);
                    }
                }
                InputEvent::Key(Action::Confirm) => {
                    // drop this overlay, then swap out the finished game
                    ctx.pop();
                    if self.cursor.selected() == 0 {
                        ctx.replace(StateId::Game);
                    } else {
                        ctx.replace(StateId::MainMenu);
                    }
                    ctx.play(SoundEffect::UiConfirm);
                }
                _ => {}
            }
        }
    }

    fn render_as_non_top_state(&self, scene: &mut Scene) {
        scene.draw(DrawCommand::Shade(Shade::Danger));
        let items = ITEMS.iter().map(|label| MenuItem::new(label)).collect();
        let mut view = MenuView::new("GAME OVER", items, self.cursor.selected());
        view.subtitle = Some(format!("Your score: {}", self.score));
        scene.draw(DrawCommand::Menu(view));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::testing::RecordingAudio;
    use crate::states::Request;

    fn send(state: &mut GameOverState, events: &[InputEvent]) -> Vec<Request> {
        let mut audio = RecordingAudio::default();
        let mut ctx = StateContext::new(&mut audio);
        state.process_events(events, &mut ctx);
        ctx.into_requests()
    }

    #[test]
    fn test_play_again_replaces_game() {
        let mut state = GameOverState::new();
        let requests = send(&mut state, &[InputEvent::Key(Action::Confirm)]);
        assert_eq!(
            requests,
            vec![
                Request::Pop,
                Request::Replace {
                    id: StateId::Game,
                    render_below: false,
                    update_below: false,
                },
            ]
        );
    }

    #[test]
    fn test_exit_goes_to_main_menu() {
        let mut state = GameOverState::new();
        let requests = send(
            &mut state,
            &[InputEvent::Key(Action::Down), InputEvent::Key(Action::Confirm)],
        );
        assert_eq!(requests[1], Request::Replace {
            id: StateId::MainMenu,
            render_below: false,
            update_below: false,
        });
    }

    #[test]
    fn test_enter_resets_score() {
        let mut state = GameOverState::new();
        state.set_score(12);
        state.enter();
        assert_eq!(state.score(), 0);

        state.set_score(7);
        let mut scene = Scene::new();
        state.render_as_non_top_state(&mut scene);
        match &scene.commands()[1] {
            DrawCommand::Menu(view) => {
                assert_eq!(view.subtitle.as_deref(), Some("Your score: 7"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
