#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Timer,
    SelectTask,
}

/// A text input with mid-string cursor support.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character immediately before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let new_cursor = self.prev_boundary(self.cursor);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Returns the string split at the cursor: (before, after).
    pub fn split_at_cursor(&self) -> (&str, &str) {
        (&self.value[..self.cursor], &self.value[self.cursor..])
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        debug_assert!(pos > 0, "prev_boundary called with pos == 0");
        let mut p = pos;
        loop {
            p -= 1;
            if self.value.is_char_boundary(p) {
                return p;
            }
        }
    }

    fn next_boundary(&self, pos: usize) -> usize {
        let mut p = pos + 1;
        while p <= self.value.len() && !self.value.is_char_boundary(p) {
            p += 1;
        }
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace_at_cursor() {
        let mut input = TextInput::new();
        input.insert('a');
        input.insert('b');
        input.move_left();
        input.insert('x');
        assert_eq!(input.value, "axb");

        input.backspace();
        assert_eq!(input.value, "ab");
        assert_eq!(input.cursor, 1);
    }

    #[test]
    fn home_and_end_jump_to_the_extremes() {
        let mut input = TextInput::new();
        for c in "query".chars() {
            input.insert(c);
        }

        input.home();
        assert_eq!(input.cursor, 0);
        input.insert('a');
        assert_eq!(input.value, "aquery");

        input.end();
        assert_eq!(input.cursor, input.value.len());
        input.insert('!');
        assert_eq!(input.value, "aquery!");
    }

    #[test]
    fn cursor_respects_multibyte_boundaries() {
        let mut input = TextInput::new();
        input.insert('å');
        input.insert('b');
        input.move_left();
        input.move_left();
        assert_eq!(input.cursor, 0);
        input.move_right();
        assert_eq!(input.cursor, 'å'.len_utf8());

        let (before, after) = input.split_at_cursor();
        assert_eq!(before, "å");
        assert_eq!(after, "b");
    }
}
