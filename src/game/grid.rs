use std::fmt;
use std::ops::{Add, Sub};

use log::debug;
use thiserror::Error;

/// A cell coordinate on the grid. Signed so that `head + offset` can step
/// outside the map and be rejected by the bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Logical content of one grid cell. The discriminants are the integers used
/// by the compiled-in level data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TileValue {
    Empty = 0,
    Wall = 1,
    SnakeBody = 2,
    SnakeHead = 3,
    Food = 4,
    SuperFood = 5,
    /// Reserved, nothing places it yet.
    Poison = 6,
    Teleport1 = 7,
    Teleport2 = 8,
    NoPlayArea = 9,
    DeadSnakeBody = 10,
    DeadSnakeHead = 11,
}

impl TileValue {
    /// Moving onto one of these kills the snake.
    pub fn is_lethal(self) -> bool {
        matches!(
            self,
            TileValue::Wall | TileValue::SnakeBody | TileValue::SnakeHead | TileValue::NoPlayArea
        )
    }

    pub fn teleporter_kind(self) -> Option<TeleporterKind> {
        match self {
            TileValue::Teleport1 => Some(TeleporterKind::One),
            TileValue::Teleport2 => Some(TeleporterKind::Two),
            _ => None,
        }
    }

    /// Display colour of the tile as RGB.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            TileValue::Empty => (235, 235, 235),
            TileValue::Wall => (140, 140, 140),
            TileValue::SnakeBody => (0, 255, 0),
            TileValue::SnakeHead => (0, 200, 0),
            TileValue::Food => (255, 0, 0),
            TileValue::SuperFood => (255, 255, 0),
            TileValue::Poison => (255, 0, 255),
            TileValue::Teleport1 => (0, 255, 255),
            TileValue::Teleport2 => (255, 140, 0),
            TileValue::NoPlayArea => (0, 0, 0),
            TileValue::DeadSnakeBody => (181, 164, 144),
            TileValue::DeadSnakeHead => (127, 91, 51),
        }
    }
}

impl TryFrom<u8> for TileValue {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => TileValue::Empty,
            1 => TileValue::Wall,
            2 => TileValue::SnakeBody,
            3 => TileValue::SnakeHead,
            4 => TileValue::Food,
            5 => TileValue::SuperFood,
            6 => TileValue::Poison,
            7 => TileValue::Teleport1,
            8 => TileValue::Teleport2,
            9 => TileValue::NoPlayArea,
            10 => TileValue::DeadSnakeBody,
            11 => TileValue::DeadSnakeHead,
            other => return Err(other),
        })
    }
}

/// The two independent teleporter networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeleporterKind {
    One,
    Two,
}

impl TeleporterKind {
    fn slot(self) -> usize {
        match self {
            TeleporterKind::One => 0,
            TeleporterKind::Two => 1,
        }
    }
}

impl fmt::Display for TeleporterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeleporterKind::One => write!(f, "teleporter 1"),
            TeleporterKind::Two => write!(f, "teleporter 2"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid level size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("level data has {actual} tiles, expected width * height = {expected}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("unknown tile value {value} at index {index}")]
    UnknownTile { index: usize, value: u8 },
    #[error("{kind} appears {count} times, expected 0 or 2")]
    TeleporterCount { kind: TeleporterKind, count: usize },
    #[error("position ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TeleporterPair {
    first: Position,
    second: Position,
}

impl TeleporterPair {
    fn other(&self, position: Position) -> Option<Position> {
        if position == self.first {
            Some(self.second)
        } else if position == self.second {
            Some(self.first)
        } else {
            None
        }
    }
}

/// Tile map of a loaded level, stored row by row (`index = x + y * width`).
#[derive(Debug, Clone, Default)]
pub struct Grid {
    width: i32,
    height: i32,
    tile_size: (u32, u32),
    tiles: Vec<TileValue>,
    teleporters: [Option<TeleporterPair>; 2],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the grid with `level`. Nothing is changed when validation fails.
    pub fn load(
        &mut self,
        level: &[u8],
        width: u32,
        height: u32,
        tile_size: (u32, u32),
    ) -> Result<(), GridError> {
        let max = i32::MAX as u32;
        if width == 0 || height == 0 || width > max || height > max {
            return Err(GridError::InvalidSize { width, height });
        }

        let expected = width as usize * height as usize;
        if level.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                actual: level.len(),
            });
        }

        let mut tiles = Vec::with_capacity(expected);
        let mut found: [Vec<Position>; 2] = [Vec::new(), Vec::new()];

        for (index, &raw) in level.iter().enumerate() {
            let tile = TileValue::try_from(raw)
                .map_err(|value| GridError::UnknownTile { index, value })?;
            if let Some(kind) = tile.teleporter_kind() {
                let position = Position::new(
                    (index % width as usize) as i32,
                    (index / width as usize) as i32,
                );
                found[kind.slot()].push(position);
            }
            tiles.push(tile);
        }

        let mut teleporters = [None, None];
        for kind in [TeleporterKind::One, TeleporterKind::Two] {
            match found[kind.slot()].as_slice() {
                [] => {}
                [first, second] => {
                    teleporters[kind.slot()] = Some(TeleporterPair {
                        first: *first,
                        second: *second,
                    });
                }
                other => {
                    return Err(GridError::TeleporterCount {
                        kind,
                        count: other.len(),
                    })
                }
            }
        }

        self.width = width as i32;
        self.height = height as i32;
        self.tile_size = tile_size;
        self.tiles = tiles;
        self.teleporters = teleporters;
        debug!("grid loaded: {}x{}", width, height);
        Ok(())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Pixel size of one tile as declared by the level.
    pub fn tile_size(&self) -> (u32, u32) {
        self.tile_size
    }

    pub fn is_in_bounds(&self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && position.x < self.width && position.y < self.height
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.is_in_bounds(position)
            .then(|| (position.x + position.y * self.width) as usize)
    }

    pub fn tile_at(&self, position: Position) -> Option<TileValue> {
        self.index(position).map(|index| self.tiles[index])
    }

    pub fn set_tile(&mut self, position: Position, value: TileValue) -> Result<(), GridError> {
        let index = self.index(position).ok_or(GridError::OutOfBounds {
            x: position.x,
            y: position.y,
        })?;
        self.tiles[index] = value;
        Ok(())
    }

    /// All empty cells in row-major order (top row first, left to right).
    pub fn empty_tiles(&self) -> Vec<Position> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| **tile == TileValue::Empty)
            .map(|(index, _)| {
                Position::new(index as i32 % self.width, index as i32 / self.width)
            })
            .collect()
    }

    /// Given one endpoint of the stored pair for `kind`, return the other.
    pub fn other_teleporter(&self, kind: TeleporterKind, position: Position) -> Option<Position> {
        self.teleporters[kind.slot()]
            .as_ref()
            .and_then(|pair| pair.other(position))
    }

    /// Tiles of one row, used by the renderer.
    pub fn row(&self, y: i32) -> &[TileValue] {
        if y < 0 || y >= self.height {
            return &[];
        }
        let start = (y * self.width) as usize;
        &self.tiles[start..start + self.width as usize]
    }
}
