use super::grid::Position;

// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// One-cell step in this direction (y grows downwards).
    pub fn offset(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
        }
    }
}

/// Ordered body segments, head at index 0 and tail last.
///
/// Segments may overlap: growth stacks copies of the tail on the tail cell
/// and they unfold over the following moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snake {
    segments: Vec<Position>,
}

impl Snake {
    pub fn new(segments: Vec<Position>) -> Self {
        Self { segments }
    }

    /// Head at `start`, two body segments trailing downwards.
    pub fn spawn(start: Position) -> Self {
        Self::new(vec![
            start,
            start + Position::new(0, 1),
            start + Position::new(0, 2),
        ])
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// A snake needs a head and at least one body segment to move.
    pub fn can_move(&self) -> bool {
        self.segments.len() > 1
    }

    pub fn head(&self) -> Option<Position> {
        self.segments.first().copied()
    }

    pub fn tail(&self) -> Option<Position> {
        self.segments.last().copied()
    }

    pub fn segments(&self) -> &[Position] {
        &self.segments
    }

    /// Shift every segment onto its predecessor and put the head at `new_head`.
    /// Returns the cell the tail left.
    pub fn advance(&mut self, new_head: Position) -> Option<Position> {
        let old_tail = self.tail()?;
        for i in (1..self.segments.len()).rev() {
            self.segments[i] = self.segments[i - 1];
        }
        self.segments[0] = new_head;
        Some(old_tail)
    }

    pub fn grow(&mut self, amount: u32) {
        if let Some(tail) = self.tail() {
            for _ in 0..amount {
                self.segments.push(tail);
            }
        }
    }
}
