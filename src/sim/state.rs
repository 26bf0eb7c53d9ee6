//! Game session state
//!
//! `GameSession` owns everything a round touches: the physics world, the
//! live blocks, the typed buffer, the spawn timer and the scores. Hosts
//! drive it from three independent callbacks (frame tick, spawn timer,
//! key events); each entry point checks the phase itself and never
//! assumes what ran before it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::block::CharBlock;
use super::cup::Cup;
use super::matcher::{KeyInput, TypedBuffer, find_matches};
use super::physics::{Material, PhysicsWorld};
use super::score::{ScoreTier, Scorer};
use super::spawner::{Spawner, place, plan_spawn};
use crate::error::EmptyVocabularyError;
use crate::highscores::{HighScoreStore, HighScores, MemoryHighScoreStore};
use crate::settings::Settings;
use crate::vocabulary::{VocabEntry, Vocabulary, build_vocabulary};

/// Round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No round played yet
    Idle,
    /// Round in progress
    Running,
    /// Round ended; a new game may start
    GameOver,
}

/// Notifications for the host UI, drained once per frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    RoundStarted { glyphs: usize },
    BlockSpawned { id: u32, kana: String },
    BlocksMatched { count: u32, points: u64 },
    /// One-shot visual pulse on the score readout
    ScorePulse { score: u64, tier: ScoreTier },
    GameOver { score: u64, high_score: u64, new_high: bool },
    /// New game refused; the settings panel should open
    EmptyVocabulary,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    /// A block fell out of the play area
    Overflow { block_id: u32 },
    /// The player ended the round
    Player,
}

pub struct GameSession {
    phase: SessionPhase,
    settings: Settings,
    cup: Cup,
    world: PhysicsWorld,
    vocabulary: Vocabulary,
    blocks: Vec<CharBlock>,
    buffer: TypedBuffer,
    spawner: Spawner,
    scorer: Scorer,
    high_scores: HighScores,
    store: Box<dyn HighScoreStore>,
    rng: Pcg32,
    events: Vec<GameEvent>,
    /// Unconsumed frame time (seconds)
    pub(crate) accumulator: f32,
    /// Physics steps taken this round
    pub time_ticks: u64,
    next_id: u32,
}

impl GameSession {
    /// Create an idle session. The stored high score is loaded here.
    pub fn new(settings: Settings, store: Box<dyn HighScoreStore>, seed: u64) -> Self {
        let settings = settings.sanitized();
        let cup = Cup::default();
        let mut world = PhysicsWorld::new(settings.gravity);
        world.add_cup(&cup);
        let high_scores = HighScores::load(&*store);
        log::info!("Session created (seed {}, high score {})", seed, high_scores.high_score);

        Self {
            phase: SessionPhase::Idle,
            spawner: Spawner::new(settings.spawn_interval_ms),
            settings,
            cup,
            world,
            vocabulary: Vocabulary::default(),
            blocks: Vec::new(),
            buffer: TypedBuffer::new(),
            scorer: Scorer::new(),
            high_scores,
            store,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            accumulator: 0.0,
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Session backed by an in-memory high score store
    pub fn in_memory(settings: Settings, seed: u64) -> Self {
        Self::new(settings, Box::new(MemoryHighScoreStore::default()), seed)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings; they take effect on the next new game
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings.sanitized();
    }

    pub fn cup(&self) -> &Cup {
        &self.cup
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub(crate) fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Live blocks
    pub fn blocks(&self) -> &[CharBlock] {
        &self.blocks
    }

    #[cfg(test)]
    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<CharBlock> {
        &mut self.blocks
    }

    pub fn typed(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn score(&self) -> u64 {
        self.scorer.score()
    }

    pub fn score_tier(&self) -> ScoreTier {
        self.scorer.tier()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start a round from the current settings.
    ///
    /// Returns `Ok(false)` if a round is already running, and
    /// `EmptyVocabularyError` (leaving the phase unchanged) when no
    /// glyphs are enabled.
    pub fn new_game(&mut self) -> Result<bool, EmptyVocabularyError> {
        if self.is_running() {
            return Ok(false);
        }
        let vocabulary = match build_vocabulary(&self.settings.character_sets) {
            Ok(v) => v,
            Err(e) => {
                self.events.push(GameEvent::EmptyVocabulary);
                return Err(e);
            }
        };
        let vocabulary = if self.settings.accept_alternate_readings {
            vocabulary.with_alternates()
        } else {
            vocabulary
        };
        self.start_round(vocabulary)
    }

    /// Start a round with an explicit vocabulary
    pub fn start_round(&mut self, vocabulary: Vocabulary) -> Result<bool, EmptyVocabularyError> {
        if self.is_running() {
            return Ok(false);
        }
        if vocabulary.is_empty() {
            self.events.push(GameEvent::EmptyVocabulary);
            return Err(EmptyVocabularyError);
        }

        self.vocabulary = vocabulary;
        self.buffer.clear();
        self.clear_blocks();
        self.scorer.take();
        self.world.set_gravity(self.settings.gravity);
        self.spawner.set_interval_ms(self.settings.spawn_interval_ms);
        self.accumulator = 0.0;
        self.time_ticks = 0;
        self.phase = SessionPhase::Running;

        self.spawn_block();
        self.spawner.start();

        log::info!("Round started with {} glyphs", self.vocabulary.len());
        self.events.push(GameEvent::RoundStarted {
            glyphs: self.vocabulary.len(),
        });
        Ok(true)
    }

    /// Player-triggered end of round. Returns false unless running.
    pub fn end_game(&mut self) -> bool {
        self.finish_round(RoundEnd::Player)
    }

    /// A block fell out of the play area. Returns false unless running.
    pub fn on_out_of_bounds(&mut self, block_id: u32) -> bool {
        self.delete_block(block_id);
        self.finish_round(RoundEnd::Overflow { block_id })
    }

    fn finish_round(&mut self, reason: RoundEnd) -> bool {
        if !self.is_running() {
            return false;
        }
        self.spawner.stop();
        let score = self.scorer.take();
        let new_high = self.high_scores.commit(score, &mut *self.store);
        self.clear_blocks();
        self.buffer.clear();
        self.phase = SessionPhase::GameOver;

        log::info!("Round over ({:?}): score {}", reason, score);
        self.events.push(GameEvent::GameOver {
            score,
            high_score: self.high_scores.high_score,
            new_high,
        });
        true
    }

    /// Spawn timer callback: one block per call while the spawner runs
    pub fn on_spawn_timer(&mut self) -> Option<u32> {
        if !self.spawner.is_running() {
            return None;
        }
        self.spawn_block()
    }

    /// Drive the spawn timer from elapsed time instead of an interval.
    /// Returns how many blocks were spawned.
    pub fn update_spawner(&mut self, dt_ms: f32) -> u32 {
        let due = self.spawner.advance(dt_ms);
        let mut spawned = 0;
        for _ in 0..due {
            if self.spawn_block().is_some() {
                spawned += 1;
            }
        }
        spawned
    }

    /// Spawn a random glyph from the vocabulary
    pub fn spawn_block(&mut self) -> Option<u32> {
        if !self.is_running() {
            return None;
        }
        let plan = plan_spawn(&self.cup, &self.vocabulary, self.settings.block_size, &mut self.rng)?;
        Some(self.insert_block(plan.entry, plan.pos, plan.velocity, plan.size))
    }

    /// Spawn a specific glyph from the vocabulary
    pub fn spawn_kana(&mut self, kana: &str) -> Option<u32> {
        if !self.is_running() {
            return None;
        }
        let entry = self.vocabulary.get(kana)?.clone();
        let size = self.settings.block_size;
        let (pos, velocity) = place(&self.cup, size, &mut self.rng);
        Some(self.insert_block(entry, pos, velocity, size))
    }

    fn insert_block(&mut self, entry: VocabEntry, pos: glam::Vec2, velocity: glam::Vec2, size: f32) -> u32 {
        let id = self.next_entity_id();
        let body = self
            .world
            .add_block(id, pos, size, velocity, Material::default());
        log::debug!("Spawned block {} ({}) at x={:.0}", id, entry.kana, pos.x);
        self.events.push(GameEvent::BlockSpawned {
            id,
            kana: entry.kana.clone(),
        });
        self.blocks.push(CharBlock::new(
            id,
            &entry.kana,
            &entry.romanization,
            entry.accepted,
            entry.set,
            size,
            pos,
            body,
        ));
        id
    }

    /// Delete one block: removed from the world and the live list.
    /// Returns false if no live block has that id.
    pub fn delete_block(&mut self, block_id: u32) -> bool {
        let Some(i) = self.blocks.iter().position(|b| b.id == block_id) else {
            return false;
        };
        let mut block = self.blocks.remove(i);
        block.destroy(&mut self.world)
    }

    /// Copy physics poses into the block entities
    pub(crate) fn sync_blocks(&mut self) {
        for block in &mut self.blocks {
            block.sync_from(&self.world);
        }
    }

    fn clear_blocks(&mut self) {
        for block in &mut self.blocks {
            block.destroy(&mut self.world);
        }
        self.blocks.clear();
    }

    /// Key event callback. Returns the number of blocks matched.
    pub fn on_key(&mut self, key: KeyInput) -> u32 {
        if !self.is_running() {
            return 0;
        }
        if self.buffer.apply(key) {
            self.check_match()
        } else {
            0
        }
    }

    /// Match the buffer against every live block. All blocks accepting
    /// the buffer are destroyed in one pass; on any match the buffer is
    /// cleared and the score updated.
    pub fn check_match(&mut self) -> u32 {
        let matched = find_matches(&self.blocks, self.buffer.as_str());
        if matched.is_empty() {
            return 0;
        }
        for &i in &matched {
            self.blocks[i].destroy(&mut self.world);
        }
        self.blocks.retain(|b| !b.deleted);

        let count = matched.len() as u32;
        let points = self.scorer.add_score(count);
        log::debug!("Matched {} block(s) with {:?} (+{})", count, self.buffer.as_str(), points);
        self.buffer.clear();

        self.events.push(GameEvent::BlocksMatched { count, points });
        self.events.push(GameEvent::ScorePulse {
            score: self.scorer.score(),
            tier: self.scorer.tier(),
        });
        count
    }

    /// Whether the buffer is a prefix of some live block's reading
    pub fn is_prefix_of_live_block(&self) -> bool {
        !self.buffer.is_empty()
            && self
                .blocks
                .iter()
                .any(|b| !b.deleted && b.accepts_prefix(self.buffer.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::CharacterSetConfig;

    fn running(pairs: &[(&str, &str)]) -> GameSession {
        let mut session = GameSession::in_memory(Settings::default(), 42);
        assert_eq!(session.start_round(Vocabulary::from_pairs(pairs)), Ok(true));
        session
    }

    fn type_str(session: &mut GameSession, s: &str) -> u32 {
        s.chars().map(|c| session.on_key(KeyInput::Char(c))).sum()
    }

    #[test]
    fn test_new_game_spawns_and_starts() {
        let mut session = GameSession::in_memory(Settings::default(), 1);
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.new_game(), Ok(true));
        assert!(session.is_running());
        assert_eq!(session.blocks().len(), 1);
        assert!(session.spawner().is_running());
        // Cup + one block
        assert_eq!(session.world().body_count(), 2);
        assert!(matches!(session.drain_events().last(), Some(GameEvent::RoundStarted { .. })));
    }

    #[test]
    fn test_new_game_while_running_is_ignored() {
        let mut session = running(&[("あ", "a")]);
        assert_eq!(session.new_game(), Ok(false));
        assert_eq!(session.blocks().len(), 1);
    }

    #[test]
    fn test_empty_vocabulary_refuses_round() {
        let settings = Settings {
            character_sets: CharacterSetConfig::none(),
            ..Default::default()
        };
        let mut session = GameSession::in_memory(settings, 1);
        assert_eq!(session.new_game(), Err(EmptyVocabularyError));
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(!session.spawner().is_running());
        assert_eq!(session.drain_events(), vec![GameEvent::EmptyVocabulary]);

        assert_eq!(session.start_round(Vocabulary::default()), Err(EmptyVocabularyError));
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_single_match() {
        let mut session = running(&[("あ", "a"), ("い", "i")]);
        session.delete_block(session.blocks()[0].id);
        let id = session.spawn_kana("あ").unwrap();
        assert_eq!(type_str(&mut session, "a"), 1);
        assert!(session.blocks().iter().all(|b| b.id != id));
        assert_eq!(session.score(), 5);
        assert_eq!(session.typed(), "");
    }

    #[test]
    fn test_multi_match_same_pass() {
        let mut session = running(&[("し", "shi")]);
        session.spawn_kana("し").unwrap();
        assert_eq!(session.blocks().len(), 2);
        assert_eq!(type_str(&mut session, "SHI"), 2);
        assert!(session.blocks().is_empty());
        assert_eq!(session.score(), 12);
        assert_eq!(session.world().body_count(), 1);
    }

    fn running_hiragana() -> GameSession {
        let mut session = GameSession::in_memory(Settings::default(), 42);
        assert_eq!(session.new_game(), Ok(true));
        session.delete_block(session.blocks()[0].id);
        session
    }

    #[test]
    fn test_wo_matches_alongside_o() {
        let mut session = running_hiragana();
        session.spawn_kana("お").unwrap();
        session.spawn_kana("を").unwrap();
        assert_eq!(type_str(&mut session, "o"), 2);
        assert!(session.blocks().is_empty());
        assert_eq!(session.score(), 12);
    }

    #[test]
    fn test_n_does_not_shadow_na() {
        let mut session = running_hiragana();
        let n = session.spawn_kana("ん").unwrap();
        let a = session.spawn_kana("あ").unwrap();
        session.spawn_kana("な").unwrap();

        assert_eq!(type_str(&mut session, "na"), 1);
        let live: Vec<u32> = session.blocks().iter().map(|b| b.id).collect();
        assert_eq!(live, vec![n, a]);
        assert_eq!(session.score(), 5);

        assert_eq!(type_str(&mut session, "nn"), 1);
        assert_eq!(session.blocks().len(), 1);
        assert_eq!(session.blocks()[0].id, a);
    }

    #[test]
    fn test_non_matching_input_changes_nothing() {
        let mut session = running(&[("あ", "a")]);
        let before = session.blocks().len();
        assert_eq!(type_str(&mut session, "zz"), 0);
        assert_eq!(session.blocks().len(), before);
        assert_eq!(session.score(), 0);
        assert_eq!(session.typed(), "zz");
        session.on_key(KeyInput::Backspace);
        assert_eq!(session.typed(), "z");
        session.on_key(KeyInput::Reset);
        assert_eq!(session.typed(), "");
    }

    #[test]
    fn test_prefix_hint() {
        let mut session = running(&[("し", "shi")]);
        session.on_key(KeyInput::Char('s'));
        assert!(session.is_prefix_of_live_block());
        session.on_key(KeyInput::Char('x'));
        assert!(!session.is_prefix_of_live_block());
    }

    #[test]
    fn test_delete_block_once() {
        let mut session = running(&[("あ", "a")]);
        let id = session.blocks()[0].id;
        assert!(session.delete_block(id));
        assert!(!session.delete_block(id));
        assert!(session.blocks().is_empty());
        assert_eq!(session.world().body_count(), 1);
    }

    #[test]
    fn test_new_then_end_round_trip() {
        let mut session = GameSession::in_memory(Settings::default(), 9);
        session.new_game().unwrap();
        session.on_key(KeyInput::Char('q'));
        assert!(session.end_game());
        assert_eq!(session.phase(), SessionPhase::GameOver);
        assert_eq!(session.typed(), "");
        assert!(session.blocks().is_empty());
        assert!(!session.spawner().is_running());
        assert_eq!(session.high_scores().last_score, 0);
        assert!(!session.end_game());
        assert!(session.on_spawn_timer().is_none());
    }

    #[test]
    fn test_out_of_bounds_ends_round_and_commits() {
        let mut session = running(&[("あ", "a")]);
        session.spawn_kana("あ");
        session.spawn_kana("あ");
        session.on_key(KeyInput::Char('a'));
        assert_eq!(session.score(), 19);
        let id = session.spawn_kana("あ").unwrap();
        assert!(session.on_out_of_bounds(id));
        assert_eq!(session.phase(), SessionPhase::GameOver);
        assert_eq!(session.high_scores().high_score, 19);
        assert_eq!(session.high_scores().last_score, 19);
        assert_eq!(session.score(), 0);
        assert!(session.blocks().is_empty());
        assert!(!session.on_out_of_bounds(id));

        // Next round starts from zero
        assert_eq!(session.start_round(Vocabulary::from_pairs(&[("あ", "a")])), Ok(true));
        assert_eq!(session.score(), 0);
        assert_eq!(session.blocks().len(), 1);
    }

    #[test]
    fn test_keys_ignored_when_not_running() {
        let mut session = GameSession::in_memory(Settings::default(), 1);
        assert_eq!(session.on_key(KeyInput::Char('a')), 0);
        assert_eq!(session.typed(), "");
    }

    #[test]
    fn test_spawn_timer_paths() {
        let mut session = running(&[("あ", "a")]);
        assert!(session.on_spawn_timer().is_some());
        let spawned: u32 = (0..25).map(|_| session.update_spawner(100.0)).sum();
        assert_eq!(spawned, 2);
        assert_eq!(session.blocks().len(), 4);
    }
}
