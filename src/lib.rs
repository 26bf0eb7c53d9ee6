//! Afureru - a kana typing game
//!
//! Kana blocks fall into a cup; typing a block's reading destroys it.
//! The round ends when the cup overflows and a block falls off screen.
//!
//! Core modules:
//! - `lexicon`: Static kana → romanization tables per character set
//! - `vocabulary`: Active vocabulary built from the enabled character sets
//! - `sim`: Simulation (physics, spawning, matching, scoring, session)
//! - `highscores`: High score state and persistence seam
//! - `settings`: Player preferences
//! - `render`: Per-frame snapshot handed to the render sink

pub mod error;
pub mod highscores;
pub mod lexicon;
pub mod render;
pub mod settings;
pub mod sim;
pub mod vocabulary;

pub use error::EmptyVocabularyError;
pub use highscores::{HighScoreStore, HighScores, MemoryHighScoreStore};
pub use lexicon::CharSet;
pub use settings::Settings;
pub use sim::{GameEvent, GameSession, KeyInput, SessionPhase};
pub use vocabulary::{CharacterSetConfig, Vocabulary, build_vocabulary};

/// Game configuration constants
pub mod consts {
    /// Fixed frame timestep (display refresh cadence)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum physics substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Play area dimensions (pixels, y grows downward)
    pub const PLAY_WIDTH: f32 = 800.0;
    pub const PLAY_HEIGHT: f32 = 900.0;

    /// Cup corners
    pub const CUP_TOP_LEFT: (f32, f32) = (120.0, 300.0);
    pub const CUP_BOTTOM_LEFT: (f32, f32) = (170.0, 860.0);
    pub const CUP_BOTTOM_RIGHT: (f32, f32) = (630.0, 860.0);
    pub const CUP_TOP_RIGHT: (f32, f32) = (680.0, 300.0);
    /// Leg length of the bottom corner chamfers
    pub const CUP_CHAMFER: f32 = 40.0;
    /// Collision thickness of the cup walls
    pub const CUP_WALL_THICKNESS: f32 = 4.0;

    /// Gravity in matter-style units (0.9 ≈ 900 px/s²)
    pub const DEFAULT_GRAVITY: f32 = 0.9;
    /// Conversion from matter-style gravity units to px/s²
    pub const GRAVITY_SCALE: f32 = 1000.0;

    /// Block material (gameplay-tuned)
    pub const BLOCK_RESTITUTION: f32 = 0.6;
    pub const BLOCK_FRICTION: f32 = 0.5;
    pub const BLOCK_DENSITY: f32 = 0.02;

    /// Block defaults
    pub const DEFAULT_BLOCK_SIZE: f32 = 50.0;
    pub const MIN_BLOCK_SIZE: f32 = 20.0;
    pub const MAX_BLOCK_SIZE: f32 = 120.0;

    /// Spawn timer defaults (milliseconds)
    pub const DEFAULT_SPAWN_INTERVAL_MS: u32 = 1000;
    pub const MIN_SPAWN_INTERVAL_MS: u32 = 200;
    pub const MAX_SPAWN_INTERVAL_MS: u32 = 10_000;

    /// Initial horizontal drift speed range (px/s)
    pub const SPAWN_SPEED_MIN: f32 = 30.0;
    pub const SPAWN_SPEED_MAX: f32 = 180.0;

    /// Points per matched block
    pub const POINTS_PER_BLOCK: u64 = 5;
    /// Bonus per extra block matched by the same keystroke
    pub const COMBO_BONUS_PER_EXTRA: u64 = 2;

    /// Score tier thresholds (inclusive lower bounds)
    pub const TIER_THRESHOLDS: [u64; 3] = [100, 300, 600];
}

/// Convert a `(x, y)` constant into a vector
#[inline]
pub fn vec2(p: (f32, f32)) -> glam::Vec2 {
    glam::Vec2::new(p.0, p.1)
}
