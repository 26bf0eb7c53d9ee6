//! Physics world
//!
//! Wraps Rapier2D behind a small API: the cup is one fixed body, each
//! char block is one dynamic cuboid. Coordinates are pixels, y down.

use glam::Vec2;
use rapier2d::prelude::*;

use super::cup::Cup;
use crate::consts::*;

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn vec2_to_point(v: Vec2) -> nalgebra::Point2<f32> {
    nalgebra::Point2::new(v.x, v.y)
}

fn na_iso_to_pos_rot(iso: &nalgebra::Isometry2<f32>) -> (Vec2, f32) {
    let pos = Vec2::new(iso.translation.x, iso.translation.y);
    (pos, iso.rotation.angle())
}

/// Physical material of a collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            restitution: BLOCK_RESTITUTION,
            friction: BLOCK_FRICTION,
            density: BLOCK_DENSITY,
        }
    }
}

/// Handle to a body owned by the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
}

/// Rigid-body simulation with a static cup
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    cup_body: Option<PhysicsBody>,
}

impl PhysicsWorld {
    /// Create a world with the given gravity in matter-style units
    /// (positive is downward).
    pub fn new(gravity: f32) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = FRAME_DT;
        Self {
            gravity: vec2_to_na(Vec2::new(0.0, gravity * GRAVITY_SCALE)),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            cup_body: None,
        }
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = vec2_to_na(Vec2::new(0.0, gravity * GRAVITY_SCALE));
    }

    /// Gravity in px/s²
    pub fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity.x, self.gravity.y)
    }

    /// Install the cup walls and chamfers as one fixed body.
    /// Replaces any cup installed earlier.
    pub fn add_cup(&mut self, cup: &Cup) -> PhysicsBody {
        if let Some(old) = self.cup_body.take() {
            self.remove_body(&old);
        }

        let body_handle = self.bodies.insert(RigidBodyBuilder::fixed().build());
        let wall_radius = CUP_WALL_THICKNESS / 2.0;

        for (a, b) in cup.walls() {
            let wall = ColliderBuilder::capsule_from_endpoints(vec2_to_point(a), vec2_to_point(b), wall_radius)
                .friction(BLOCK_FRICTION)
                .restitution(BLOCK_RESTITUTION)
                .build();
            self.colliders
                .insert_with_parent(wall, body_handle, &mut self.bodies);
        }

        for [a, b, c] in cup.chamfers() {
            let chamfer = ColliderBuilder::triangle(vec2_to_point(a), vec2_to_point(b), vec2_to_point(c))
                .friction(BLOCK_FRICTION)
                .restitution(BLOCK_RESTITUTION)
                .build();
            self.colliders
                .insert_with_parent(chamfer, body_handle, &mut self.bodies);
        }

        let body = PhysicsBody { body_handle };
        self.cup_body = Some(body);
        body
    }

    /// Create a dynamic square block. The block id is stored in the
    /// body's `user_data`.
    pub fn add_block(&mut self, block_id: u32, position: Vec2, size: f32, velocity: Vec2, material: Material) -> PhysicsBody {
        let rb = RigidBodyBuilder::dynamic()
            .translation(vec2_to_na(position))
            .linvel(vec2_to_na(velocity))
            .ccd_enabled(true)
            .user_data(block_id as u128)
            .build();
        let body_handle = self.bodies.insert(rb);

        let half = size / 2.0;
        let collider = ColliderBuilder::cuboid(half, half)
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density)
            .build();
        self.colliders
            .insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody { body_handle }
    }

    /// Remove a body and its colliders. Returns false if it was already gone.
    pub fn remove_body(&mut self, body: &PhysicsBody) -> bool {
        self.bodies
            .remove(
                body.body_handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    #[cfg(test)]
    pub fn contains(&self, body: &PhysicsBody) -> bool {
        self.bodies.contains(body.body_handle)
    }

    /// Advance the simulation by one timestep
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Current position and rotation of a body
    pub fn body_position(&self, body: &PhysicsBody) -> Option<(Vec2, f32)> {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_iso_to_pos_rot(rb.position()))
    }

    /// Current linear velocity of a body
    #[cfg(test)]
    pub fn velocity(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| Vec2::new(rb.linvel().x, rb.linvel().y))
            .unwrap_or(Vec2::ZERO)
    }

    /// Number of rigid bodies, cup included
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
