//! High score tracking
//!
//! The core only needs `load_high_score` / `save_high_score`; where the
//! value lives is up to the `HighScoreStore` implementation (LocalStorage
//! in the browser, memory elsewhere).

use serde::{Deserialize, Serialize};

/// Persistence seam for the high score
pub trait HighScoreStore {
    fn load_high_score(&self) -> u64;
    fn save_high_score(&mut self, value: u64);
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    pub value: u64,
    /// Number of saves performed
    pub saves: u32,
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load_high_score(&self) -> u64 {
        self.value
    }

    fn save_high_score(&mut self, value: u64) {
        self.value = value;
        self.saves += 1;
    }
}

/// LocalStorage-backed store
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageHighScoreStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageHighScoreStore {
    const STORAGE_KEY: &'static str = "afureru_high_score";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageHighScoreStore {
    fn load_high_score(&self) -> u64 {
        let Some(storage) = Self::storage() else {
            return 0;
        };
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<u64>(&json) {
                Ok(value) => {
                    log::info!("Loaded high score {}", value);
                    value
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable high score: {}", e);
                    0
                }
            },
            _ => 0,
        }
    }

    fn save_high_score(&mut self, value: u64) {
        if let Some(storage) = Self::storage() {
            if let Ok(json) = serde_json::to_string(&value) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High score saved ({})", value);
            }
        }
    }
}

/// High score and last committed round score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    pub high_score: u64,
    pub last_score: u64,
}

impl HighScores {
    /// Load the stored high score
    pub fn load(store: &dyn HighScoreStore) -> Self {
        Self {
            high_score: store.load_high_score(),
            last_score: 0,
        }
    }

    /// Commit a finished round. Saves and returns true when the score
    /// beats the stored high score.
    pub fn commit(&mut self, score: u64, store: &mut dyn HighScoreStore) -> bool {
        self.last_score = score;
        if score > self.high_score {
            self.high_score = score;
            store.save_high_score(score);
            log::info!("New high score: {}", score);
            return true;
        }
        false
    }
}
