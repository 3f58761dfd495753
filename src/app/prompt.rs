use unicode_width::UnicodeWidthStr;

/// What a submitted prompt line is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// `:` command line.
    Command,
    /// `read:` list of type names.
    Read,
}

impl PromptKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Command => ":",
            Self::Read => "read:",
        }
    }
}

/// A single editable input line.
///
/// The cursor is a byte offset that always sits on a char boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLine {
    kind: PromptKind,
    text: String,
    cursor: usize,
}

impl PromptLine {
    pub const fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            text: String::new(),
            cursor: 0,
        }
    }

    pub const fn kind(&self) -> PromptKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Terminal column of the cursor, counting wide characters as two.
    pub fn cursor_column(&self) -> usize {
        UnicodeWidthStr::width(&self.text[..self.cursor])
    }

    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Delete the char before the cursor. Returns false at the start.
    pub fn delete_back(&mut self) -> bool {
        let Some(ch) = self.text[..self.cursor].chars().next_back() else {
            return false;
        };
        self.cursor -= ch.len_utf8();
        self.text.remove(self.cursor);
        true
    }

    /// Delete the char under the cursor. Returns false at the end.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        self.text.remove(self.cursor);
        true
    }

    pub fn move_left(&mut self) {
        if let Some(ch) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= ch.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub const fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Whitespace-split words of the line.
    pub fn tokens(&self) -> Vec<String> {
        self.text.split_whitespace().map(ToOwned::to_owned).collect()
    }
}
