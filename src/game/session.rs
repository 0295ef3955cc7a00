//! One round of play: a loaded level, the snake on it and the fixed-timestep
//! simulation that moves it.

use std::time::Duration;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::grid::{Grid, GridError, Position, TeleporterKind, TileValue};
use super::level::LevelDefinition;
use super::snake::{Direction, Snake};
use crate::config::SimulationConfig;

/// Things that happened during `update`, in order. The owner turns them into
/// sounds and state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// A queued growth unit was used up by this move.
    Growing,
    AteFood,
    AteSuperFood,
    Teleported,
    Collided,
    Died { score: u32 },
    FoodSpawned { position: Position, super_food: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Move,
    Die,
    Eat { reward: u32, growth: u32, super_food: bool },
}

pub struct GameSession {
    config: SimulationConfig,
    grid: Grid,
    snake: Snake,
    score: u32,
    max_food: u32,
    food_in_level: u32,
    remaining_growth_ticks: u32,
    remaining_food_spawn_cooldown: u32,
    last_input: Direction,
    last_movement: Direction,
    dead: bool,
    // time not yet consumed by whole ticks
    accumulated: Duration,
    rng: StdRng,
}

impl GameSession {
    pub fn new(config: SimulationConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            grid: Grid::new(),
            snake: Snake::default(),
            score: 0,
            max_food: 0,
            food_in_level: 0,
            remaining_growth_ticks: 0,
            remaining_food_spawn_cooldown: 0,
            last_input: Direction::Up,
            last_movement: Direction::Up,
            dead: false,
            accumulated: Duration::ZERO,
            rng,
        }
    }

    /// Load `level`, spawn a fresh snake and reset the round.
    pub fn start_level(&mut self, level: &LevelDefinition) -> Result<(), GridError> {
        self.grid
            .load(level.tiles, level.width, level.height, level.tile_size)?;

        self.snake = Snake::spawn(level.start);
        let segments = self.snake.segments().to_vec();
        for (i, segment) in segments.into_iter().enumerate() {
            let tile = if i == 0 { TileValue::SnakeHead } else { TileValue::SnakeBody };
            self.paint(segment, tile);
        }

        self.max_food = level.max_food;
        self.score = 0;
        self.food_in_level = 0;
        self.remaining_growth_ticks = 0;
        self.remaining_food_spawn_cooldown = 0;
        self.last_input = Direction::Up;
        self.last_movement = Direction::Up;
        self.dead = false;
        self.accumulated = Duration::ZERO;

        info!(
            "level started: {}x{} with {:?} px tiles, snake at {:?}",
            level.width,
            level.height,
            self.grid.tile_size(),
            level.start
        );
        Ok(())
    }

    /// Queue a new heading. Reversing the last executed move is refused.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if direction == self.last_movement.opposite() {
            return false;
        }
        self.last_input = direction;
        true
    }

    /// Feed elapsed wall time in and run as many whole ticks as it covers.
    pub fn update(&mut self, elapsed: Duration) -> Vec<SimEvent> {
        let mut events = Vec::new();
        if self.dead {
            return events;
        }

        let tick = self.config.tick_duration();
        if tick.is_zero() {
            warn!("tick length is zero, simulation halted");
            return events;
        }
        self.accumulated += elapsed;

        while self.accumulated >= tick {
            self.accumulated -= tick;
            self.tick(&mut events);
            if self.dead {
                break;
            }
            self.spawn_food(&mut events);
        }

        events
    }

    fn tick(&mut self, events: &mut Vec<SimEvent>) {
        if !self.snake.can_move() || self.dead {
            return;
        }
        self.move_snake(events);
        self.last_movement = self.last_input;
    }

    fn move_snake(&mut self, events: &mut Vec<SimEvent>) {
        let Some(head) = self.snake.head() else {
            return;
        };
        let offset = self.last_input.offset();
        let mut target = head + offset;

        // the border walls normally stop the snake before this
        let Some(tile) = self.grid.tile_at(target) else {
            return;
        };

        if self.remaining_growth_ticks > 0 {
            self.remaining_growth_ticks -= 1;
            events.push(SimEvent::Growing);
        }

        let outcome = match tile.teleporter_kind() {
            Some(kind) => match self.grid.other_teleporter(kind, target) {
                Some(partner) => {
                    target = partner + offset;
                    let Some(exit_tile) = self.grid.tile_at(target) else {
                        warn!("teleporter exit {:?} lies outside the grid", target);
                        return;
                    };
                    events.push(SimEvent::Teleported);
                    self.exit_outcome(kind, exit_tile)
                }
                None => Outcome::Move,
            },
            None => self.outcome(tile),
        };

        let mut growth = 0;
        match outcome {
            Outcome::Die => {
                events.push(SimEvent::Collided);
                self.kill_snake();
                events.push(SimEvent::Died { score: self.score });
            }
            Outcome::Eat { reward, growth: amount, super_food } => {
                self.food_in_level = self.food_in_level.saturating_sub(1);
                self.score = self.score.saturating_add(reward);
                growth = amount;
                events.push(if super_food { SimEvent::AteSuperFood } else { SimEvent::AteFood });
            }
            Outcome::Move => {}
        }

        if !self.dead {
            if let Some(vacated) = self.snake.advance(target) {
                self.paint(vacated, TileValue::Empty);
                let body = self.snake.segments()[1..].to_vec();
                for segment in body {
                    self.paint(segment, TileValue::SnakeBody);
                }
                self.paint(target, TileValue::SnakeHead);
            }
        }

        if growth > 0 {
            self.snake.grow(growth);
            self.remaining_growth_ticks = self.remaining_growth_ticks.saturating_add(growth);
        }
    }

    fn outcome(&self, tile: TileValue) -> Outcome {
        match tile {
            t if t.is_lethal() => Outcome::Die,
            TileValue::Food => self.food_outcome(),
            TileValue::SuperFood => self.super_food_outcome(),
            // Poison has no effect yet
            _ => Outcome::Move,
        }
    }

    /// Effects on the far side of a teleporter. Teleporters do not chain.
    fn exit_outcome(&self, kind: TeleporterKind, tile: TileValue) -> Outcome {
        match tile {
            t if t.is_lethal() => Outcome::Die,
            TileValue::Food => self.food_outcome(),
            TileValue::SuperFood => match kind {
                TeleporterKind::One => self.super_food_outcome(),
                // full super reward but only plain growth through teleporter 2
                TeleporterKind::Two => Outcome::Eat {
                    reward: self.config.super_food_reward,
                    growth: self.config.food_growth,
                    super_food: true,
                },
            },
            _ => Outcome::Move,
        }
    }

    fn food_outcome(&self) -> Outcome {
        Outcome::Eat {
            reward: self.config.food_reward,
            growth: self.config.food_growth,
            super_food: false,
        }
    }

    fn super_food_outcome(&self) -> Outcome {
        Outcome::Eat {
            reward: self.config.super_food_reward,
            growth: self.config.super_food_growth,
            super_food: true,
        }
    }

    fn kill_snake(&mut self) {
        self.dead = true;
        let segments = self.snake.segments().to_vec();
        if let Some((head, body)) = segments.split_first() {
            for segment in body {
                self.paint(*segment, TileValue::DeadSnakeBody);
            }
            // painted last so it stays visible on top of a bitten body segment
            self.paint(*head, TileValue::DeadSnakeHead);
        }
        info!("snake died with score {}", self.score);
    }

    fn spawn_food(&mut self, events: &mut Vec<SimEvent>) {
        if self.remaining_food_spawn_cooldown > 0 {
            self.remaining_food_spawn_cooldown -= 1;
        }
        if self.remaining_food_spawn_cooldown > 0 || self.food_in_level >= self.max_food {
            return;
        }

        let empty = self.grid.empty_tiles();
        if empty.is_empty() {
            // cooldown stays at zero, try again next tick
            return;
        }

        let position = empty[self.rng.gen_range(0..empty.len())];
        let super_food = self.rng.gen_range(0..100) < self.config.super_food_percent;
        let tile = if super_food { TileValue::SuperFood } else { TileValue::Food };
        self.paint(position, tile);
        self.food_in_level += 1;
        self.remaining_food_spawn_cooldown = self.config.food_spawn_cooldown;
        events.push(SimEvent::FoodSpawned { position, super_food });
    }

    fn paint(&mut self, position: Position, tile: TileValue) {
        if let Err(err) = self.grid.set_tile(position, tile) {
            warn!("paint {:?}: {}", tile, err);
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub fn food_in_level(&self) -> u32 {
        self.food_in_level
    }

    #[cfg(test)]
    pub fn remaining_growth_ticks(&self) -> u32 {
        self.remaining_growth_ticks
    }

    pub fn last_movement(&self) -> Direction {
        self.last_movement
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::level;

    const TICK: Duration = Duration::from_millis(250);

    // 3 wide, corridor of 5 empty cells above a snake spawned at (1, 6)
    #[rustfmt::skip]
    const CORRIDOR: [u8; 30] = [
        1, 1, 1,
        1, 0, 1,
        1, 0, 1,
        1, 0, 1,
        1, 0, 1,
        1, 0, 1,
        1, 0, 1,
        1, 0, 1,
        1, 0, 1,
        1, 1, 1,
    ];

    // teleporter 1 at (1, 2) and (5, 2), teleporter 2 at (1, 4) and (5, 4)
    #[rustfmt::skip]
    const PORTALS: [u8; 56] = [
        1, 1, 1, 1, 1, 1, 1,
        1, 0, 0, 0, 0, 0, 1,
        1, 7, 0, 0, 0, 7, 1,
        1, 0, 0, 0, 0, 0, 1,
        1, 8, 0, 0, 0, 8, 1,
        1, 0, 0, 0, 0, 0, 1,
        1, 0, 0, 0, 0, 0, 1,
        1, 1, 1, 1, 1, 1, 1,
    ];

    #[rustfmt::skip]
    const WALLS: [u8; 9] = [
        1, 1, 1,
        1, 1, 1,
        1, 1, 1,
    ];

    // teleporter 1 at (1, 2) and on the top border at (5, 0)
    #[rustfmt::skip]
    const EDGE_PORTAL: [u8; 56] = [
        1, 1, 1, 1, 1, 7, 1,
        1, 0, 0, 0, 0, 0, 1,
        1, 7, 0, 0, 0, 0, 1,
        1, 0, 0, 0, 0, 0, 1,
        1, 0, 0, 0, 0, 0, 1,
        1, 0, 0, 0, 0, 0, 1,
        1, 0, 0, 0, 0, 0, 1,
        1, 1, 1, 1, 1, 1, 1,
    ];

    fn def(
        tiles: &'static [u8],
        width: u32,
        height: u32,
        start: Position,
        max_food: u32,
    ) -> LevelDefinition {
        LevelDefinition {
            width,
            height,
            tile_size: (20, 20),
            start,
            max_food,
            tiles,
        }
    }

    fn corridor() -> GameSession {
        let mut session = GameSession::new(SimulationConfig::default(), Some(7));
        session
            .start_level(&def(&CORRIDOR, 3, 10, Position::new(1, 6), 0))
            .unwrap();
        session
    }

    fn portals() -> GameSession {
        let mut session = GameSession::new(SimulationConfig::default(), Some(7));
        session
            .start_level(&def(&PORTALS, 7, 8, Position::new(2, 3), 0))
            .unwrap();
        session
    }

    fn tile(session: &GameSession, x: i32, y: i32) -> Option<TileValue> {
        session.grid().tile_at(Position::new(x, y))
    }

    #[test]
    fn test_start_level_paints_snake() {
        let session = corridor();
        assert_eq!(session.snake().len(), 3);
        assert_eq!(tile(&session, 1, 6), Some(TileValue::SnakeHead));
        assert_eq!(tile(&session, 1, 7), Some(TileValue::SnakeBody));
        assert_eq!(tile(&session, 1, 8), Some(TileValue::SnakeBody));
        assert_eq!(session.score(), 0);
        assert!(!session.is_dead());
    }

    #[test]
    fn test_moves_one_tile_per_tick_up_the_corridor() {
        let mut session = corridor();

        for step in 1..=5 {
            session.update(TICK);
            let head_y = 6 - step;
            assert_eq!(
                session.snake().segments(),
                &[
                    Position::new(1, head_y),
                    Position::new(1, head_y + 1),
                    Position::new(1, head_y + 2),
                ]
            );
            assert_eq!(tile(&session, 1, head_y), Some(TileValue::SnakeHead));
            assert_eq!(tile(&session, 1, head_y + 1), Some(TileValue::SnakeBody));
            assert_eq!(tile(&session, 1, head_y + 2), Some(TileValue::SnakeBody));
            assert_eq!(tile(&session, 1, head_y + 3), Some(TileValue::Empty));
        }
        assert!(!session.is_dead());
    }

    #[test]
    fn test_wall_kills_without_moving() {
        let mut session = corridor();
        session.update(TICK * 5);
        let before = session.snake().segments().to_vec();

        let events = session.update(TICK);
        assert!(session.is_dead());
        assert_eq!(session.snake().segments(), before.as_slice());
        assert!(events.contains(&SimEvent::Collided));
        assert!(events.contains(&SimEvent::Died { score: 0 }));

        assert_eq!(tile(&session, 1, 1), Some(TileValue::DeadSnakeHead));
        assert_eq!(tile(&session, 1, 2), Some(TileValue::DeadSnakeBody));
        assert_eq!(tile(&session, 1, 3), Some(TileValue::DeadSnakeBody));
        assert_eq!(tile(&session, 1, 0), Some(TileValue::Wall));

        // no more ticks once dead
        assert!(session.update(TICK * 10).is_empty());
        assert_eq!(session.snake().segments(), before.as_slice());
    }

    #[test]
    fn test_catch_up_runs_several_ticks() {
        let mut session = corridor();
        session.update(Duration::from_millis(100));
        assert_eq!(session.snake().head(), Some(Position::new(1, 6)));

        session.update(Duration::from_millis(700));
        assert_eq!(session.snake().head(), Some(Position::new(1, 3)));

        // the 50ms remainder carries over
        session.update(Duration::from_millis(200));
        assert_eq!(session.snake().head(), Some(Position::new(1, 2)));
    }

    #[test]
    fn test_short_snake_never_moves() {
        let mut session = corridor();
        session.snake = Snake::new(vec![Position::new(1, 6)]);

        for _ in 0..20 {
            session.update(TICK);
        }
        assert_eq!(session.snake().segments(), &[Position::new(1, 6)]);
        assert!(!session.is_dead());
    }

    #[test]
    fn test_reverse_direction_rejected() {
        let mut session = corridor();
        assert!(!session.steer(Direction::Down));
        assert!(session.steer(Direction::Left));
        assert!(session.steer(Direction::Up));

        let mut open = portals();
        open.steer(Direction::Right);
        open.update(TICK);
        assert_eq!(open.last_movement(), Direction::Right);
        assert!(!open.steer(Direction::Left));
        assert!(open.steer(Direction::Down));
    }

    #[test]
    fn test_eating_food() {
        let mut session = corridor();
        session.grid.set_tile(Position::new(1, 5), TileValue::Food).unwrap();
        session.food_in_level = 1;

        let events = session.update(TICK);
        assert!(events.contains(&SimEvent::AteFood));
        assert_eq!(session.score(), 1);
        assert_eq!(session.food_in_level(), 0);
        assert_eq!(session.snake().len(), 4);
        assert_eq!(session.remaining_growth_ticks(), 1);
        assert_eq!(session.snake().tail(), Some(Position::new(1, 7)));

        let events = session.update(TICK);
        assert!(events.contains(&SimEvent::Growing));
        assert_eq!(session.remaining_growth_ticks(), 0);
        assert_eq!(
            session.snake().segments(),
            &[
                Position::new(1, 4),
                Position::new(1, 5),
                Position::new(1, 6),
                Position::new(1, 7),
            ]
        );
        assert_eq!(tile(&session, 1, 7), Some(TileValue::SnakeBody));
    }

    #[test]
    fn test_eating_super_food() {
        let mut session = corridor();
        session.grid.set_tile(Position::new(1, 5), TileValue::SuperFood).unwrap();
        session.food_in_level = 3;

        let events = session.update(TICK);
        assert!(events.contains(&SimEvent::AteSuperFood));
        assert_eq!(session.score(), 5);
        assert_eq!(session.food_in_level(), 2);
        assert_eq!(session.snake().len(), 8);
        assert_eq!(session.remaining_growth_ticks(), 5);
    }

    #[test]
    fn test_biting_body_kills() {
        let mut session = corridor();
        session.grid.set_tile(Position::new(1, 5), TileValue::SnakeBody).unwrap();
        session.update(TICK);
        assert!(session.is_dead());
        assert_eq!(session.snake().head(), Some(Position::new(1, 6)));
    }

    #[test]
    fn test_no_play_area_kills() {
        let mut session = corridor();
        session.grid.set_tile(Position::new(1, 5), TileValue::NoPlayArea).unwrap();
        session.update(TICK);
        assert!(session.is_dead());
    }

    #[test]
    fn test_poison_is_plain_move() {
        let mut session = corridor();
        session.grid.set_tile(Position::new(1, 5), TileValue::Poison).unwrap();
        session.update(TICK);
        assert!(!session.is_dead());
        assert_eq!(session.snake().head(), Some(Position::new(1, 5)));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_teleport_moves_past_partner() {
        let mut session = portals();
        // head (2, 3); steer left then up into teleporter 1 at (1, 2)
        session.steer(Direction::Left);
        session.update(TICK);
        assert_eq!(session.snake().head(), Some(Position::new(1, 3)));

        session.steer(Direction::Up);
        let events = session.update(TICK);
        assert!(events.contains(&SimEvent::Teleported));
        // partner (5, 2) plus one step up
        assert_eq!(session.snake().head(), Some(Position::new(5, 1)));
        assert_eq!(tile(&session, 5, 1), Some(TileValue::SnakeHead));
        assert_eq!(tile(&session, 1, 2), Some(TileValue::Teleport1));
        assert_eq!(tile(&session, 5, 2), Some(TileValue::Teleport1));
    }

    #[test]
    fn test_teleport_into_wall_dies_at_exit() {
        let mut session = portals();
        // head (2, 3) moving left then up; block the exit cell beyond (5, 2)
        session.grid.set_tile(Position::new(5, 1), TileValue::Wall).unwrap();
        session.steer(Direction::Left);
        session.update(TICK);
        session.steer(Direction::Up);
        let events = session.update(TICK);

        assert!(events.contains(&SimEvent::Teleported));
        assert!(session.is_dead());
        assert_eq!(session.snake().head(), Some(Position::new(1, 3)));
        assert_eq!(tile(&session, 1, 3), Some(TileValue::DeadSnakeHead));
    }

    #[test]
    fn test_teleport_exit_food() {
        let mut session = portals();
        session.grid.set_tile(Position::new(5, 1), TileValue::Food).unwrap();
        session.food_in_level = 1;
        session.steer(Direction::Left);
        session.update(TICK);
        session.steer(Direction::Up);
        let events = session.update(TICK);

        assert!(events.contains(&SimEvent::AteFood));
        assert_eq!(session.score(), 1);
        assert_eq!(session.food_in_level(), 0);
        assert_eq!(session.snake().head(), Some(Position::new(5, 1)));
    }

    #[test]
    fn test_teleport_does_not_chain() {
        let mut session = portals();
        // a teleporter 2 tile right where teleporter 1 lets the snake out
        session.grid.set_tile(Position::new(5, 1), TileValue::Teleport2).unwrap();
        session.steer(Direction::Left);
        session.update(TICK);
        session.steer(Direction::Up);
        let events = session.update(TICK);

        let teleports = events.iter().filter(|e| **e == SimEvent::Teleported).count();
        assert_eq!(teleports, 1);
        assert!(!session.is_dead());
        assert_eq!(session.snake().head(), Some(Position::new(5, 1)));
        assert_eq!(tile(&session, 5, 1), Some(TileValue::SnakeHead));
    }

    #[test]
    fn test_teleport_exit_outside_grid_skips_move() {
        let mut session = GameSession::new(SimulationConfig::default(), Some(7));
        session
            .start_level(&def(&EDGE_PORTAL, 7, 8, Position::new(2, 3), 0))
            .unwrap();
        session.steer(Direction::Left);
        session.update(TICK);
        let before = session.snake().segments().to_vec();

        session.steer(Direction::Up);
        let events = session.update(TICK);
        assert!(!events.contains(&SimEvent::Teleported));
        assert!(!session.is_dead());
        assert_eq!(session.snake().segments(), before.as_slice());
        assert_eq!(tile(&session, 1, 2), Some(TileValue::Teleport1));
        assert_eq!(tile(&session, 1, 3), Some(TileValue::SnakeHead));
    }

    #[test]
    fn test_huge_rewards_saturate() {
        let config = SimulationConfig {
            food_reward: u32::MAX,
            ..SimulationConfig::default()
        };
        let mut session = GameSession::new(config, Some(7));
        session
            .start_level(&def(&CORRIDOR, 3, 10, Position::new(1, 6), 0))
            .unwrap();
        session.grid.set_tile(Position::new(1, 5), TileValue::Food).unwrap();
        session.grid.set_tile(Position::new(1, 4), TileValue::Food).unwrap();

        session.update(TICK * 2);
        assert_eq!(session.score(), u32::MAX);
        assert!(!session.is_dead());
    }

    #[test]
    fn test_zero_tick_length_halts() {
        let config = SimulationConfig {
            tick_millis: 0,
            ..SimulationConfig::default()
        };
        let mut session = GameSession::new(config, Some(7));
        session
            .start_level(&def(&CORRIDOR, 3, 10, Position::new(1, 6), 0))
            .unwrap();
        assert!(session.update(TICK).is_empty());
        assert_eq!(session.snake().head(), Some(Position::new(1, 6)));
    }

    #[test]
    fn test_super_food_behind_teleporters() {
        // teleporter 1: full super growth
        let mut one = portals();
        one.grid.set_tile(Position::new(5, 1), TileValue::SuperFood).unwrap();
        one.steer(Direction::Left);
        one.update(TICK);
        one.steer(Direction::Up);
        one.update(TICK);
        assert_eq!(one.score(), 5);
        assert_eq!(one.snake().len(), 8);

        // teleporter 2: super reward, plain growth
        let mut two = portals();
        two.grid.set_tile(Position::new(5, 5), TileValue::SuperFood).unwrap();
        two.steer(Direction::Left);
        two.update(TICK);
        two.steer(Direction::Down);
        two.update(TICK);
        // (1, 4) is teleporter 2, exit is (5, 4) + down
        assert_eq!(two.snake().head(), Some(Position::new(5, 5)));
        assert_eq!(two.score(), 5);
        assert_eq!(two.snake().len(), 4);
    }

    #[test]
    fn test_unpaired_teleporter_is_plain_move() {
        let mut session = corridor();
        session.grid.set_tile(Position::new(1, 5), TileValue::Teleport2).unwrap();
        let events = session.update(TICK);
        assert!(!events.contains(&SimEvent::Teleported));
        assert_eq!(session.snake().head(), Some(Position::new(1, 5)));
    }

    #[test]
    fn test_food_spawn_cooldown() {
        let mut session = GameSession::new(SimulationConfig::default(), Some(42));
        session.start_level(level::level(0).unwrap()).unwrap();
        // inert snake so nothing gets eaten
        session.snake = Snake::new(vec![Position::new(17, 18)]);

        let spawned: Vec<bool> = (0..11)
            .map(|_| {
                session
                    .update(TICK)
                    .iter()
                    .any(|e| matches!(e, SimEvent::FoodSpawned { .. }))
            })
            .collect();
        assert_eq!(
            spawned,
            vec![true, false, false, false, false, true, false, false, false, false, true]
        );
        assert_eq!(session.food_in_level(), 3);

        let food_tiles = (0..session.grid().height())
            .flat_map(|y| session.grid().row(y).to_vec())
            .filter(|t| matches!(t, TileValue::Food | TileValue::SuperFood))
            .count();
        assert_eq!(food_tiles, 3);
    }

    #[test]
    fn test_food_spawn_respects_cap() {
        let mut session = GameSession::new(SimulationConfig::default(), Some(1));
        session
            .start_level(&def(&CORRIDOR, 3, 10, Position::new(1, 6), 1))
            .unwrap();
        session.snake = Snake::new(vec![Position::new(1, 6)]);

        session.update(TICK * 20);
        assert_eq!(session.food_in_level(), 1);
    }

    #[test]
    fn test_food_spawn_retries_when_grid_full() {
        let mut session = GameSession::new(SimulationConfig::default(), Some(3));
        session
            .start_level(&def(&WALLS, 3, 3, Position::new(1, 0), 5))
            .unwrap();
        session.snake = Snake::new(vec![Position::new(1, 0)]);

        assert!(session.update(TICK * 3).is_empty());
        assert_eq!(session.food_in_level(), 0);

        session.grid.set_tile(Position::new(1, 1), TileValue::Empty).unwrap();
        let events = session.update(TICK);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            SimEvent::FoodSpawned { position, .. } if position == Position::new(1, 1)
        ));
    }

    #[test]
    fn test_seeded_sessions_spawn_identically() {
        let run = |seed| {
            let mut session = GameSession::new(SimulationConfig::default(), Some(seed));
            session.start_level(level::level(1).unwrap()).unwrap();
            session.snake = Snake::new(vec![Position::new(10, 20)]);
            session.update(TICK * 30)
        };
        assert_eq!(run(9), run(9));
    }
}
