/// Cursor over a fixed list of menu entries. Moving past either end is
/// refused rather than wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuCursor {
    selected: usize,
    len: usize,
}

impl MenuCursor {
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }

    /// Returns whether the cursor moved.
    pub fn previous(&mut self) -> bool {
        if self.selected == 0 {
            return false;
        }
        self.selected -= 1;
        true
    }

    /// Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if self.selected + 1 >= self.len {
            return false;
        }
        self.selected += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_stops_at_ends() {
        let mut cursor = MenuCursor::new(3);
        assert!(!cursor.previous());
        assert!(cursor.next());
        assert!(cursor.next());
        assert!(!cursor.next());
        assert_eq!(cursor.selected(), 2);

        cursor.reset();
        assert_eq!(cursor.selected(), 0);
    }
}
