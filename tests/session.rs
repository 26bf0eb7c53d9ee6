// Integration tests (native) for the `afureru` crate.
// These drive a whole session through its public API the way a host does:
// key events, spawn timer callbacks and frame ticks interleaved.

use afureru::consts::FRAME_DT;
use afureru::sim::{GameEvent, GameSession, KeyInput, SessionPhase, tick};
use afureru::{
    CharSet, CharacterSetConfig, EmptyVocabularyError, HighScoreStore, MemoryHighScoreStore,
    Settings, Vocabulary,
};

fn type_str(session: &mut GameSession, s: &str) -> u32 {
    s.chars().map(|c| session.on_key(KeyInput::Char(c))).sum()
}

/// Shares the saved value across sessions
struct SharedStore(std::rc::Rc<std::cell::Cell<u64>>);

impl HighScoreStore for SharedStore {
    fn load_high_score(&self) -> u64 {
        self.0.get()
    }

    fn save_high_score(&mut self, value: u64) {
        self.0.set(value);
    }
}

#[test]
fn typing_a_falling_block_scores() {
    let mut session = GameSession::in_memory(Settings::default(), 1);
    session
        .start_round(Vocabulary::from_pairs(&[("あ", "a"), ("い", "i")]))
        .unwrap();
    // Let it fall for a while first
    for _ in 0..30 {
        tick(&mut session, FRAME_DT);
    }
    let reading = session.blocks()[0].romanization.clone();
    assert_eq!(type_str(&mut session, &reading), 1);
    assert_eq!(session.score(), 5);
    assert_eq!(session.typed(), "");
    assert!(session.blocks().is_empty());
}

#[test]
fn two_identical_blocks_match_together() {
    let mut session = GameSession::in_memory(Settings::default(), 2);
    session
        .start_round(Vocabulary::from_pairs(&[("し", "shi")]))
        .unwrap();
    session.on_spawn_timer();
    tick(&mut session, FRAME_DT);
    assert_eq!(type_str(&mut session, "shi"), 2);
    assert_eq!(session.score(), 12);
    let events = session.drain_events();
    assert!(events.contains(&GameEvent::BlocksMatched { count: 2, points: 12 }));
}

#[test]
fn no_sets_enabled_never_starts() {
    let settings = Settings {
        character_sets: CharacterSetConfig::none(),
        ..Default::default()
    };
    let mut session = GameSession::in_memory(settings, 3);
    assert_eq!(session.new_game(), Err(EmptyVocabularyError));
    assert_eq!(session.phase(), SessionPhase::Idle);

    // Fixing the settings lets the next attempt through
    session.set_settings(Settings {
        character_sets: CharacterSetConfig::only(&[CharSet::Katakana]),
        ..Default::default()
    });
    assert_eq!(session.new_game(), Ok(true));
    assert_eq!(session.blocks()[0].set, CharSet::Katakana);
}

#[test]
fn alternate_readings_setting_applies() {
    let settings = Settings {
        accept_alternate_readings: true,
        ..Default::default()
    };
    let mut session = GameSession::in_memory(settings, 4);
    session.new_game().unwrap();
    let ha = session.vocabulary().get("は").unwrap();
    assert_eq!(ha.accepted, vec!["ha".to_string(), "wa".to_string()]);
    let n = session.vocabulary().get("ん").unwrap();
    assert_eq!(n.accepted, vec!["nn".to_string(), "n".to_string()]);
}

#[test]
fn high_score_survives_sessions() {
    let cell = std::rc::Rc::new(std::cell::Cell::new(0));

    let mut session = GameSession::new(Settings::default(), Box::new(SharedStore(cell.clone())), 5);
    session
        .start_round(Vocabulary::from_pairs(&[("あ", "a")]))
        .unwrap();
    type_str(&mut session, "a");
    session.end_game();
    assert_eq!(cell.get(), 5);

    let session = GameSession::new(Settings::default(), Box::new(SharedStore(cell)), 6);
    assert_eq!(session.high_scores().high_score, 5);
}

#[test]
fn rounds_restart_after_game_over() {
    let mut session = GameSession::new(Settings::default(), Box::new(MemoryHighScoreStore::default()), 7);
    for _ in 0..3 {
        assert_eq!(session.new_game(), Ok(true));
        assert!(session.end_game());
        assert_eq!(session.phase(), SessionPhase::GameOver);
        assert!(!session.spawner().is_running());
    }
    // Only the cup is left in the world
    assert_eq!(session.world().body_count(), 1);
}

#[test]
fn interleaved_callbacks_are_tolerated() {
    let mut session = GameSession::in_memory(Settings::default(), 8);
    // Callbacks before the first round do nothing
    assert!(session.on_spawn_timer().is_none());
    assert_eq!(tick(&mut session, FRAME_DT), None);
    assert_eq!(session.on_key(KeyInput::Char('a')), 0);

    session.new_game().unwrap();
    session.end_game();
    // A late timer or frame after game over does nothing either
    assert!(session.on_spawn_timer().is_none());
    assert_eq!(tick(&mut session, FRAME_DT), None);
    assert!(session.blocks().is_empty());
}
