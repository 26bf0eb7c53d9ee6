//! Keystroke buffer and block matching

use super::block::CharBlock;

/// A discrete key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// A printable character
    Char(char),
    /// Remove the last typed character
    Backspace,
    /// Clear the whole buffer (Enter)
    Reset,
}

impl KeyInput {
    /// Map a DOM `KeyboardEvent.key` value. Returns None for keys the
    /// game ignores (modifiers, arrows, function keys, ...).
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Backspace" => Some(KeyInput::Backspace),
            "Enter" => Some(KeyInput::Reset),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() && !c.is_whitespace() => Some(KeyInput::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

/// Characters typed since the last reset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypedBuffer {
    text: String,
}

impl TypedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    /// Remove the last character (no-op when empty)
    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Apply a key event. Returns true when a character was appended,
    /// which is the only mutation that triggers a match check.
    pub fn apply(&mut self, key: KeyInput) -> bool {
        match key {
            KeyInput::Char(c) => {
                self.push(c);
                true
            }
            KeyInput::Backspace => {
                self.backspace();
                false
            }
            KeyInput::Reset => {
                self.clear();
                false
            }
        }
    }
}

/// Indices of every live block whose reading equals `typed`.
///
/// All qualifying blocks match in the same pass; order of the slice has
/// no effect on which blocks are returned.
pub fn find_matches(blocks: &[CharBlock], typed: &str) -> Vec<usize> {
    if typed.is_empty() {
        return Vec::new();
    }
    blocks
        .iter()
        .enumerate()
        .filter(|(_, b)| !b.deleted && b.accepts(typed))
        .map(|(i, _)| i)
        .collect()
}
