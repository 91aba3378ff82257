//! Plain-text receipt layout builder
//!
//! Unlike [`EscPosBuilder`](crate::EscPosBuilder), this builder never emits
//! control codes: the result is a UTF-8 document that reads the same on a
//! console as on paper. Alignment is done with spaces against a fixed
//! column width.

use crate::encoding::{pad_text, text_width, truncate_text};

/// Fixed-width plain-text builder
pub struct TextLayout {
    buf: String,
    width: usize,
}

impl TextLayout {
    /// Create a new layout with the paper width in characters
    pub fn new(width: usize) -> Self {
        Self {
            buf: String::new(),
            width,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write a line, truncated to the paper width
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(&truncate_text(s, self.width));
        self.buf.push('\n');
        self
    }

    /// Write a line, wrapping on word boundaries
    ///
    /// Leading spaces of `s` are kept on the first line; continuation lines
    /// are indented by `indent` spaces.
    pub fn wrapped(&mut self, s: &str, indent: usize) -> &mut Self {
        let pad = " ".repeat(indent);
        let lead = &s[..s.len() - s.trim_start().len()];
        let mut current = lead.to_string();
        let mut has_word = false;

        for word in s.split_whitespace() {
            let needed = if has_word {
                text_width(&current) + 1 + text_width(word)
            } else {
                text_width(&current) + text_width(word)
            };

            if needed > self.width && has_word {
                self.line(&current);
                current = format!("{}{}", pad, word);
            } else {
                if has_word {
                    current.push(' ');
                }
                current.push_str(word);
                has_word = true;
            }
        }

        if has_word {
            self.line(&current);
        }
        self
    }

    /// Write a line centered within the paper width
    pub fn center(&mut self, s: &str) -> &mut Self {
        let w = text_width(s);
        if w >= self.width {
            return self.line(s);
        }
        let left = (self.width - w) / 2;
        self.line(&format!("{}{}", " ".repeat(left), s))
    }

    // === Separators ===

    pub fn sep_double(&mut self) -> &mut Self {
        self.line(&"=".repeat(self.width))
    }

    pub fn sep_single(&mut self) -> &mut Self {
        self.line(&"-".repeat(self.width))
    }

    // === Layout Helpers ===

    /// Print left and right text on the same line
    ///
    /// Left text is left-aligned, right text is right-aligned. When both do
    /// not fit, the left side is truncated so the right side stays intact.
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let rw = text_width(right);
        if rw + 1 >= self.width {
            return self.line(right);
        }

        let left_room = self.width - rw - 1;
        let left = pad_text(left, left_room, false);
        self.line(&format!("{} {}", left, right))
    }

    // === Build ===

    pub fn finalize(self) -> String {
        self.buf
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }
}

impl Default for TextLayout {
    fn default() -> Self {
        Self::new(48)
    }
}
