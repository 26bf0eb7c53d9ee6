//! Error types

use thiserror::Error;

/// No character set is enabled, or every enabled set is empty.
///
/// Recovered by refusing to start the round and asking the player to
/// open the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no characters to play with: enable at least one character set")]
pub struct EmptyVocabularyError;
