//! Render sink interface
//!
//! The core never draws. Once per frame the host builds a `FrameSnapshot`
//! and hands it to whatever `RenderSink` it uses (canvas 2D in the
//! browser, a text dump in the native demo).

use glam::Vec2;

use crate::sim::{GameSession, ScoreTier, SessionPhase};

/// One block as the renderer needs it
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSprite {
    pub id: u32,
    /// Center
    pub pos: Vec2,
    pub rotation: f32,
    pub size: f32,
    pub kana: String,
    /// Background color (0xRRGGBB)
    pub color: u32,
}

/// Everything drawn in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub phase: SessionPhase,
    pub blocks: Vec<BlockSprite>,
    pub cup_outline: [Vec2; 4],
    pub cup_chamfers: [[Vec2; 3]; 2],
    pub score: u64,
    pub tier: ScoreTier,
    pub high_score: u64,
    pub last_score: u64,
    pub typed: String,
    /// Typed text is a prefix of some live block's reading
    pub typed_on_track: bool,
}

impl FrameSnapshot {
    pub fn capture(session: &GameSession) -> Self {
        let cup = session.cup();
        Self {
            phase: session.phase(),
            blocks: session
                .blocks()
                .iter()
                .filter(|b| !b.deleted)
                .map(|b| BlockSprite {
                    id: b.id,
                    pos: b.pos,
                    rotation: b.rotation,
                    size: b.size,
                    kana: b.kana.clone(),
                    color: b.set.color(),
                })
                .collect(),
            cup_outline: cup.outline(),
            cup_chamfers: cup.chamfers(),
            score: session.score(),
            tier: session.score_tier(),
            high_score: session.high_scores().high_score,
            last_score: session.high_scores().last_score,
            typed: session.typed().to_string(),
            typed_on_track: session.is_prefix_of_live_block(),
        }
    }
}

/// Presentation sink
pub trait RenderSink {
    fn draw(&mut self, frame: &FrameSnapshot);
}

/// Format a 0xRRGGBB color as a CSS hex string
pub fn css_color(color: u32) -> String {
    format!("#{:06x}", color & 0xFF_FFFF)
}
