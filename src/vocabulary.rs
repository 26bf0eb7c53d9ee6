//! Active vocabulary
//!
//! Built once per new game from the enabled character sets.

use std::collections::{BTreeMap, HashMap};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::EmptyVocabularyError;
use crate::lexicon::{ALTERNATE_READINGS, CharSet, LexiconEntry};

/// Which character sets are enabled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterSetConfig {
    pub enabled: BTreeMap<CharSet, bool>,
}

impl Default for CharacterSetConfig {
    fn default() -> Self {
        let mut config = Self::none();
        config.set(CharSet::Hiragana, true);
        config
    }
}

impl CharacterSetConfig {
    /// Every set disabled
    pub fn none() -> Self {
        Self {
            enabled: CharSet::ALL.iter().map(|&s| (s, false)).collect(),
        }
    }

    /// Only the given sets enabled
    pub fn only(sets: &[CharSet]) -> Self {
        let mut config = Self::none();
        for &set in sets {
            config.set(set, true);
        }
        config
    }

    pub fn set(&mut self, set: CharSet, enabled: bool) {
        self.enabled.insert(set, enabled);
    }

    pub fn is_enabled(&self, set: CharSet) -> bool {
        self.enabled.get(&set).copied().unwrap_or(false)
    }

    /// Enabled sets in build order
    pub fn enabled_sets(&self) -> impl Iterator<Item = CharSet> + '_ {
        CharSet::ALL.into_iter().filter(|&s| self.is_enabled(s))
    }
}

/// One playable glyph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabEntry {
    pub kana: String,
    /// Canonical reading
    pub romanization: String,
    /// Every accepted reading, canonical first
    pub accepted: Vec<String>,
    /// Set the glyph came from
    pub set: CharSet,
}

impl VocabEntry {
    /// Case-insensitive check against every accepted reading
    #[cfg(test)]
    pub fn accepts(&self, typed: &str) -> bool {
        self.accepted.iter().any(|r| r.eq_ignore_ascii_case(typed))
    }
}

/// Mapping kana → romanization for the current round
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: Vec<VocabEntry>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Union of the given tables. The first occurrence of a glyph wins.
    pub fn from_tables<'a>(tables: impl IntoIterator<Item = (CharSet, &'a [LexiconEntry])>) -> Self {
        let mut vocab = Self::default();
        for (set, table) in tables {
            for entry in table {
                vocab.insert(set, entry.kana, entry.romanization);
            }
        }
        vocab
    }

    /// Build from ad-hoc pairs (tagged as hiragana)
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut vocab = Self::default();
        for (kana, romanization) in pairs {
            vocab.insert(CharSet::Hiragana, kana, romanization);
        }
        vocab
    }

    fn insert(&mut self, set: CharSet, kana: &str, romanization: &str) {
        if self.index.contains_key(kana) {
            return;
        }
        self.index.insert(kana.to_string(), self.entries.len());
        self.entries.push(VocabEntry {
            kana: kana.to_string(),
            romanization: romanization.to_lowercase(),
            accepted: vec![romanization.to_lowercase()],
            set,
        });
    }

    /// Register an extra accepted reading for a glyph already present.
    /// Returns false if the glyph is not in the vocabulary.
    pub fn add_alternate(&mut self, kana: &str, romanization: &str) -> bool {
        let Some(&i) = self.index.get(kana) else {
            return false;
        };
        let reading = romanization.to_lowercase();
        let entry = &mut self.entries[i];
        if !entry.accepted.contains(&reading) {
            entry.accepted.push(reading);
        }
        true
    }

    /// Add every known alternate reading for glyphs in this vocabulary
    pub fn with_alternates(mut self) -> Self {
        for alt in ALTERNATE_READINGS {
            self.add_alternate(alt.kana, alt.romanization);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, kana: &str) -> Option<&VocabEntry> {
        self.index.get(kana).map(|&i| &self.entries[i])
    }

    /// Canonical reading for a glyph
    pub fn romanization(&self, kana: &str) -> Option<&str> {
        self.get(kana).map(|e| e.romanization.as_str())
    }

    /// Uniform random draw
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&VocabEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let i = rng.random_range(0..self.entries.len());
        Some(&self.entries[i])
    }
}

/// Union of every enabled set's table
pub fn build_vocabulary(config: &CharacterSetConfig) -> Result<Vocabulary, EmptyVocabularyError> {
    let vocab = Vocabulary::from_tables(config.enabled_sets().map(|s| (s, s.entries())));
    if vocab.is_empty() {
        log::warn!("Vocabulary is empty, no character set enabled");
        return Err(EmptyVocabularyError);
    }
    log::info!(
        "Built vocabulary: {} glyphs from {} sets",
        vocab.len(),
        config.enabled_sets().count()
    );
    Ok(vocab)
}
