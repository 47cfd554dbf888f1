use unicode_width::UnicodeWidthStr;

/// Cursor over the query text shown in the search bar.
///
/// The text itself lives in the controller state; edits return the new text so
/// the caller can dispatch it as an input change.
#[derive(Debug, Default)]
pub struct InputLine {
    /// Byte offset, always on a char boundary
    pub cursor_pos: usize,
}

impl InputLine {
    pub fn insert(&mut self, text: &str, c: char) -> String {
        self.clamp(text);
        let mut next = text.to_string();
        next.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
        next
    }

    pub fn backspace(&mut self, text: &str) -> Option<String> {
        self.clamp(text);
        if self.cursor_pos == 0 {
            return None;
        }
        // Find the previous character boundary
        let prev = prev_boundary(text, self.cursor_pos);
        let mut next = text.to_string();
        next.remove(prev);
        self.cursor_pos = prev;
        Some(next)
    }

    pub fn delete(&mut self, text: &str) -> Option<String> {
        self.clamp(text);
        if self.cursor_pos >= text.len() {
            return None;
        }
        let mut next = text.to_string();
        next.remove(self.cursor_pos);
        Some(next)
    }

    pub fn move_left(&mut self, text: &str) {
        self.clamp(text);
        if self.cursor_pos > 0 {
            self.cursor_pos = prev_boundary(text, self.cursor_pos);
        }
    }

    pub fn move_right(&mut self, text: &str) {
        self.clamp(text);
        if self.cursor_pos < text.len() {
            self.cursor_pos = text[self.cursor_pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_pos + i)
                .unwrap_or(text.len());
        }
    }

    pub fn home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn end(&mut self, text: &str) {
        self.cursor_pos = text.len();
    }

    /// Terminal columns between the start of the text and the cursor
    pub fn display_offset(&self, text: &str) -> u16 {
        let end = self.cursor_pos.min(text.len());
        text.get(..end).map_or(0, |before| before.width() as u16)
    }

    fn clamp(&mut self, text: &str) {
        if self.cursor_pos > text.len() || !text.is_char_boundary(self.cursor_pos) {
            self.cursor_pos = text.len();
        }
    }
}

fn prev_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .last()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_inserts_at_cursor() {
        let mut line = InputLine::default();
        let text = line.insert("", 'a');
        let text = line.insert(&text, 'c');
        line.move_left(&text);
        let text = line.insert(&text, 'b');
        assert_eq!(text, "abc");
        assert_eq!(line.cursor_pos, 2);
    }

    #[test]
    fn backspace_respects_multibyte_chars() {
        let mut line = InputLine::default();
        line.end("añ");
        assert_eq!(line.backspace("añ").as_deref(), Some("a"));
        assert_eq!(line.cursor_pos, 1);
        line.home();
        assert_eq!(line.backspace("a"), None);
    }

    #[test]
    fn delete_removes_under_cursor() {
        let mut line = InputLine::default();
        assert_eq!(line.delete("xyz").as_deref(), Some("yz"));
        line.end("yz");
        assert_eq!(line.delete("yz"), None);
    }

    #[test]
    fn cursor_clamps_when_text_shrinks() {
        let mut line = InputLine { cursor_pos: 10 };
        line.move_left("abc");
        assert_eq!(line.cursor_pos, 2);
    }

    #[test]
    fn display_offset_counts_columns() {
        let mut line = InputLine::default();
        line.end("ab");
        assert_eq!(line.display_offset("ab"), 2);
    }
}
