//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Fixed timestep physics
//! - Seeded RNG only
//! - Hosts drive it through `GameSession` and `tick`

pub mod block;
pub mod cup;
pub mod matcher;
pub mod physics;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;

pub use block::CharBlock;
pub use cup::Cup;
pub use matcher::{KeyInput, TypedBuffer, find_matches};
pub use physics::{Material, PhysicsBody, PhysicsWorld};
pub use score::{ScoreTier, Scorer, points_for};
pub use spawner::{SpawnPlan, Spawner, plan_spawn};
pub use state::{GameEvent, GameSession, RoundEnd, SessionPhase};
pub use tick::tick;
