//! Shared scene builders for the physics benchmarks.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg64Mcg;
use rein2d::{EntityDesc, PhysicsConfig, PhysicsEngine};

/// Side of the static container box every scene is built in.
pub const ARENA_SIZE: f32 = 2000.0;
pub const WALL_THICKNESS: f32 = 30.0;

fn arena() -> PhysicsEngine {
    let mut physics =
        PhysicsEngine::new(PhysicsConfig::default()).expect("default config is valid");
    let center = Vec2::splat(ARENA_SIZE * 0.5);
    physics.add_entity(EntityDesc::boxed(
        ARENA_SIZE,
        ARENA_SIZE,
        WALL_THICKNESS,
        center,
        0.0,
    ));
    physics
}

fn scatter(rng: &mut Pcg64Mcg) -> Vec2 {
    let margin = WALL_THICKNESS * 2.0;
    Vec2::new(
        rng.gen_range(margin..ARENA_SIZE - margin),
        rng.gen_range(margin..ARENA_SIZE - margin),
    )
}

/// `n` circles scattered inside the arena.
pub fn setup_circle_scene(n: usize) -> PhysicsEngine {
    let mut physics = arena();
    let mut rng = Pcg64Mcg::new(0xcafef00dd15ea5e5);
    for _ in 0..n {
        let radius = rng.gen_range(4.0..14.0);
        physics.add_entity(EntityDesc::circle(scatter(&mut rng), radius, 1.0));
    }
    physics
}

/// `n` bodies inside the arena, alternating circles and rotated rectangles.
pub fn setup_mixed_scene(n: usize) -> PhysicsEngine {
    let mut physics = arena();
    let mut rng = Pcg64Mcg::new(0x2545f4914f6cdd1d);
    for i in 0..n {
        let position = scatter(&mut rng);
        let desc = if i % 2 == 0 {
            EntityDesc::circle(position, rng.gen_range(4.0..14.0), 1.0)
        } else {
            EntityDesc::rect(position, rng.gen_range(10.0..50.0), rng.gen_range(10.0..50.0), 1.0)
                .with_rotation(rng.gen_range(0.0..360.0))
        };
        physics.add_entity(desc);
    }
    physics
}
