//! Two-option menu cursor

/// A cursor over exactly two choices
///
/// Up and down both flip the cursor, so there is no "end" to run off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector<T: Copy> {
    options: [T; 2],
    cursor: usize,
}

impl<T: Copy> Selector<T> {
    pub fn new(options: [T; 2]) -> Self {
        Self { options, cursor: 0 }
    }

    pub fn toggle(&mut self) {
        self.cursor = 1 - self.cursor;
    }

    /// Back to the first option
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.cursor == index
    }

    pub fn selected(&self) -> T {
        self.options[self.cursor]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_wraps() {
        let mut sel = Selector::new(["a", "b"]);
        assert_eq!(sel.selected(), "a");
        sel.toggle();
        assert_eq!(sel.selected(), "b");
        assert!(sel.is_selected(1));
        sel.toggle();
        assert_eq!(sel.cursor(), 0);
    }

    #[test]
    fn test_reset() {
        let mut sel = Selector::new([1, 2]);
        sel.toggle();
        sel.reset();
        assert_eq!(sel.selected(), 1);
    }
}
