//! Char block entity

use glam::Vec2;

use super::physics::{PhysicsBody, PhysicsWorld};
use crate::lexicon::CharSet;

/// A falling kana glyph backed by a physics body
#[derive(Debug, Clone)]
pub struct CharBlock {
    pub id: u32,
    pub kana: String,
    /// Canonical reading
    pub romanization: String,
    /// Every accepted reading, canonical first
    pub accepted: Vec<String>,
    pub set: CharSet,
    /// Edge length (pixels)
    pub size: f32,
    /// Last position read back from the physics world (center)
    pub pos: Vec2,
    /// Last rotation read back from the physics world (radians)
    pub rotation: f32,
    pub deleted: bool,
    body: Option<PhysicsBody>,
}

impl CharBlock {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u32,
        kana: &str,
        romanization: &str,
        accepted: Vec<String>,
        set: CharSet,
        size: f32,
        pos: Vec2,
        body: PhysicsBody,
    ) -> Self {
        Self {
            id,
            kana: kana.to_string(),
            romanization: romanization.to_string(),
            accepted,
            set,
            size,
            pos,
            rotation: 0.0,
            deleted: false,
            body: Some(body),
        }
    }

    pub fn body(&self) -> Option<&PhysicsBody> {
        self.body.as_ref()
    }

    /// Whether `typed` is one of this block's readings (case-insensitive)
    pub fn accepts(&self, typed: &str) -> bool {
        !typed.is_empty() && self.accepted.iter().any(|r| r.eq_ignore_ascii_case(typed))
    }

    /// Whether `typed` is a prefix of one of this block's readings
    pub fn accepts_prefix(&self, typed: &str) -> bool {
        let typed = typed.to_lowercase();
        self.accepted.iter().any(|r| r.starts_with(&typed))
    }

    /// Copy the body's pose into the entity
    pub fn sync_from(&mut self, world: &PhysicsWorld) {
        if let Some((pos, rotation)) = self.body.as_ref().and_then(|b| world.body_position(b)) {
            self.pos = pos;
            self.rotation = rotation;
        }
    }

    /// Half-diagonal: the furthest any corner reaches from the center
    pub fn bounding_extent(&self) -> f32 {
        self.size * std::f32::consts::FRAC_1_SQRT_2
    }

    /// True once the block has fully left the bottom of the play area
    pub fn is_below(&self, play_height: f32) -> bool {
        self.pos.y > play_height + self.bounding_extent()
    }

    /// Mark deleted and remove the body from the world.
    /// Returns false if the block was already deleted.
    pub fn destroy(&mut self, world: &mut PhysicsWorld) -> bool {
        if self.deleted {
            return false;
        }
        self.deleted = true;
        if let Some(body) = self.body.take() {
            world.remove_body(&body);
        }
        true
    }
}
