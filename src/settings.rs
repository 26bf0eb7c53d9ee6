//! Game settings and preferences
//!
//! Persisted in LocalStorage. Read once per new game.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::vocabulary::CharacterSetConfig;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which character sets feed the vocabulary
    pub character_sets: CharacterSetConfig,
    /// Milliseconds between spawns
    pub spawn_interval_ms: u32,
    /// Gravity in matter-style units
    pub gravity: f32,
    /// Block edge length (pixels)
    pub block_size: f32,
    /// Accept common alternate readings (は as "wa", し as "si", ...)
    pub accept_alternate_readings: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            character_sets: CharacterSetConfig::default(),
            spawn_interval_ms: DEFAULT_SPAWN_INTERVAL_MS,
            gravity: DEFAULT_GRAVITY,
            block_size: DEFAULT_BLOCK_SIZE,
            accept_alternate_readings: false,
        }
    }
}

impl Settings {
    /// Clamp values into playable ranges
    pub fn sanitized(mut self) -> Self {
        self.spawn_interval_ms = self
            .spawn_interval_ms
            .clamp(MIN_SPAWN_INTERVAL_MS, MAX_SPAWN_INTERVAL_MS);
        if !self.gravity.is_finite() {
            self.gravity = DEFAULT_GRAVITY;
        }
        self.gravity = self.gravity.clamp(0.1, 5.0);
        if !self.block_size.is_finite() {
            self.block_size = DEFAULT_BLOCK_SIZE;
        }
        self.block_size = self.block_size.clamp(MIN_BLOCK_SIZE, MAX_BLOCK_SIZE);
        self
    }

    /// Parse settings JSON, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "afureru_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
