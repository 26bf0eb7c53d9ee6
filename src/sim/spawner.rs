//! Block spawning
//!
//! A fixed-period timer plus the placement policy for new blocks.
//! The timer can be driven either by `advance` from the frame loop or by
//! an external interval calling into the session; both respect `running`.

use glam::Vec2;
use rand::Rng;

use super::cup::Cup;
use crate::consts::*;
use crate::vocabulary::{VocabEntry, Vocabulary};

const MAX_ADVANCE_MS: f32 = 100.0;

/// Periodic spawn timer
#[derive(Debug, Clone)]
pub struct Spawner {
    running: bool,
    interval_ms: u32,
    elapsed_ms: f32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new(DEFAULT_SPAWN_INTERVAL_MS)
    }
}

impl Spawner {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            running: false,
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0.0,
        }
    }

    /// Start the timer. Returns false if it was already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.elapsed_ms = 0.0;
        true
    }

    /// Stop the timer. Returns false if it was already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.elapsed_ms = 0.0;
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn set_interval_ms(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms.max(1);
    }

    /// Accumulate elapsed time and return how many spawns are due.
    ///
    /// A single call counts at most 100 ms, the same cap the frame tick
    /// puts on `dt`, so a stalled tab does not flood the cup on resume.
    pub fn advance(&mut self, dt_ms: f32) -> u32 {
        if !self.running || dt_ms.is_nan() {
            return 0;
        }
        self.elapsed_ms += dt_ms.clamp(0.0, MAX_ADVANCE_MS);
        let period = self.interval_ms as f32;
        let mut due = 0;
        while self.elapsed_ms >= period {
            self.elapsed_ms -= period;
            due += 1;
        }
        due
    }
}

/// Where and what to spawn next
#[derive(Debug, Clone)]
pub struct SpawnPlan {
    pub entry: VocabEntry,
    pub pos: Vec2,
    pub velocity: Vec2,
    pub size: f32,
}

/// Pick a glyph and a starting pose for a new block.
///
/// The block starts one block-height above the play area at a uniform
/// position across the cup rim, drifting toward the cup center.
pub fn plan_spawn<R: Rng + ?Sized>(cup: &Cup, vocab: &Vocabulary, size: f32, rng: &mut R) -> Option<SpawnPlan> {
    let entry = vocab.choose(rng)?.clone();
    let (pos, velocity) = place(cup, size, rng);
    Some(SpawnPlan {
        entry,
        pos,
        velocity,
        size,
    })
}

/// Starting position and velocity for a block of the given size
pub fn place<R: Rng + ?Sized>(cup: &Cup, size: f32, rng: &mut R) -> (Vec2, Vec2) {
    let (left, right) = cup.interior_x_range();
    let (lo, hi) = (left + size / 2.0, right - size / 2.0);
    let x = if hi > lo { rng.random_range(lo..hi) } else { cup.center_x() };

    let speed = rng.random_range(SPAWN_SPEED_MIN..SPAWN_SPEED_MAX);
    let vx = if x < cup.center_x() { speed } else { -speed };

    (Vec2::new(x, -size), Vec2::new(vx, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_start_stop_idempotent() {
        let mut spawner = Spawner::default();
        assert!(!spawner.stop());
        assert!(spawner.start());
        assert!(!spawner.start());
        assert!(spawner.stop());
        assert!(!spawner.stop());
        assert!(!spawner.is_running());
    }

    #[test]
    fn test_advance_counts_periods() {
        let mut spawner = Spawner::new(200);
        assert_eq!(spawner.advance(50.0), 0, "stopped timer never fires");
        spawner.start();
        assert_eq!(spawner.advance(99.0), 0);
        assert_eq!(spawner.advance(99.0), 0);
        assert_eq!(spawner.advance(2.0), 1);
        assert_eq!(spawner.advance(100.0), 0);
        assert_eq!(spawner.advance(100.0), 1);
        spawner.stop();
        assert_eq!(spawner.advance(100.0), 0);
    }

    #[test]
    fn test_advance_caps_long_gaps() {
        let mut spawner = Spawner::new(20);
        spawner.start();
        assert_eq!(spawner.advance(60_000.0), 5);
        assert_eq!(spawner.advance(f32::INFINITY), 5);
        assert_eq!(spawner.advance(f32::NAN), 0);
        assert_eq!(spawner.advance(-50.0), 0);
        assert_eq!(spawner.advance(20.0), 1);
    }

    #[test]
    fn test_plan_drifts_inward() {
        let cup = Cup::default();
        let vocab = Vocabulary::from_pairs(&[("あ", "a"), ("い", "i")]);
        let mut rng = Pcg32::seed_from_u64(3);
        let (left, right) = cup.interior_x_range();
        for _ in 0..200 {
            let plan = plan_spawn(&cup, &vocab, 50.0, &mut rng).unwrap();
            assert!(plan.pos.x >= left + 25.0 && plan.pos.x <= right - 25.0);
            assert!(plan.pos.y < 0.0);
            let speed = plan.velocity.x.abs();
            assert!((SPAWN_SPEED_MIN..SPAWN_SPEED_MAX).contains(&speed));
            if plan.pos.x < cup.center_x() {
                assert!(plan.velocity.x > 0.0);
            } else {
                assert!(plan.velocity.x < 0.0);
            }
        }
    }

    #[test]
    fn test_plan_needs_vocabulary() {
        let cup = Cup::default();
        let mut rng = Pcg32::seed_from_u64(3);
        assert!(plan_spawn(&cup, &Vocabulary::default(), 50.0, &mut rng).is_none());
    }
}
