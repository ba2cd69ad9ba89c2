use crate::mask::TextField;

pub fn char_count(value: &str) -> usize {
    value.chars().count()
}

pub fn clamp_cursor(cursor: usize, value: &str) -> usize {
    cursor.min(char_count(value))
}

/// Single-line text with a caret measured in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    value: String,
    cursor: usize,
}

impl LineBuffer {
    /// Creates a buffer with the caret after the last character.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = char_count(value.as_str());
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert_char(&mut self, ch: char) {
        let pos = clamp_cursor(self.cursor, &self.value);
        let byte_pos = byte_index_at_char(&self.value, pos);
        self.value.insert(byte_pos, ch);
        self.cursor = pos + 1;
    }

    pub fn backspace(&mut self) -> bool {
        let pos = clamp_cursor(self.cursor, &self.value);
        if pos == 0 {
            return false;
        }
        let byte_pos = byte_index_at_char(&self.value, pos - 1);
        self.value.remove(byte_pos);
        self.cursor = pos - 1;
        true
    }

    pub fn delete(&mut self) -> bool {
        let pos = clamp_cursor(self.cursor, &self.value);
        if pos >= char_count(&self.value) {
            return false;
        }
        let byte_pos = byte_index_at_char(&self.value, pos);
        self.value.remove(byte_pos);
        self.cursor = pos;
        true
    }

    pub fn move_left(&mut self) -> bool {
        let pos = clamp_cursor(self.cursor, &self.value);
        if pos == 0 {
            return false;
        }
        self.cursor = pos - 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        let pos = clamp_cursor(self.cursor, &self.value);
        if pos >= char_count(&self.value) {
            return false;
        }
        self.cursor = pos + 1;
        true
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = char_count(&self.value);
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

impl TextField for LineBuffer {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = clamp_cursor(self.cursor, &self.value);
    }

    fn caret_offset(&self) -> Option<usize> {
        Some(self.cursor)
    }

    fn set_caret_offset(&mut self, offset: usize) {
        self.cursor = clamp_cursor(offset, &self.value);
    }
}

fn byte_index_at_char(value: &str, char_idx: usize) -> usize {
    value
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len())
}
