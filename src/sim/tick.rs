//! Frame tick
//!
//! Advances physics with a fixed timestep, then scans for blocks that
//! fell out of the play area. Physics always runs before the scan.

use super::state::GameSession;
use crate::consts::*;

/// Advance the session by one display frame of `dt` seconds.
///
/// Returns the id of the block that overflowed the cup, if this frame
/// ended the round.
pub fn tick(session: &mut GameSession, dt: f32) -> Option<u32> {
    if !session.is_running() {
        return None;
    }

    session.accumulator += dt.clamp(0.0, 0.1);
    let mut substeps = 0;
    while session.accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
        session.world_mut().step();
        session.accumulator -= FRAME_DT;
        session.time_ticks += 1;
        substeps += 1;
    }
    // Drop time we couldn't catch up on
    if substeps == MAX_SUBSTEPS {
        session.accumulator = session.accumulator.min(FRAME_DT);
    }

    session.sync_blocks();

    let overflowed = find_overflow(session)?;
    log::info!("Block {} fell out of the cup", overflowed);
    session.on_out_of_bounds(overflowed);
    Some(overflowed)
}

fn find_overflow(session: &GameSession) -> Option<u32> {
    session
        .blocks()
        .iter()
        .find(|b| !b.deleted && b.is_below(PLAY_HEIGHT))
        .map(|b| b.id)
}
