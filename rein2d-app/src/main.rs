//! Headless demo: drops a pile of rectangles and circles into a static box
//! and logs the scene as it settles.
//!
//! Usage: rein2d-app [FRAMES]
//! Set `RUST_LOG=debug` (or `trace`) to see engine events.

use anyhow::Context;
use glam::Vec2;
use log::info;
use rein2d::{EntityDesc, GroupKind, PhysicsConfig, PhysicsEngine, ShapeKind};

/// Fixed timestep and substep cap of the simulation loop.
struct LoopConfig {
    fixed_timestep: f32,
    max_substeps: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            max_substeps: 4,
        }
    }
}

/// Uneven frame times, as a real render loop would produce.
const FRAME_TIMES: [f32; 4] = [1.0 / 60.0, 1.0 / 30.0, 1.0 / 144.0, 1.0 / 60.0];
const LOG_EVERY: usize = 60;

fn build_scene(physics: &mut PhysicsEngine) {
    let rects = [
        (Vec2::new(230.0, 250.0), 50.0, 50.0),
        (Vec2::new(240.0, 200.0), 30.0, 30.0),
        (Vec2::new(200.0, 195.0), 20.0, 50.0),
        (Vec2::new(250.0, 190.0), 24.0, 14.0),
        (Vec2::new(150.0, 110.0), 18.0, 33.0),
        (Vec2::new(300.0, 150.0), 54.0, 108.0),
    ];
    for (position, width, height) in rects {
        physics.add_entity(EntityDesc::rect(position, width, height, 1.0));
    }

    let circles = [
        (Vec2::new(204.0, 115.0), 5.0),
        (Vec2::new(200.0, 100.0), 10.0),
        (Vec2::new(198.0, 105.0), 7.0),
        (Vec2::new(196.0, 90.0), 8.0),
        (Vec2::new(199.0, 55.0), 14.0),
        (Vec2::new(203.0, 70.0), 12.0),
    ];
    for (position, radius) in circles {
        physics.add_entity(EntityDesc::circle(position, radius, 1.0));
    }

    physics.add_entity(EntityDesc::boxed(
        450.0,
        450.0,
        30.0,
        Vec2::new(250.0, 250.0),
        0.0,
    ));
}

fn log_snapshot(physics: &PhysicsEngine, frame: usize) {
    info!(
        "frame {frame}: {} entities, {} contacts",
        physics.len(),
        physics.collisions().len()
    );
    for view in physics.entities() {
        match view.kind() {
            ShapeKind::Circle => info!(
                "  circle r={:.1} at ({:.2}, {:.2})",
                view.radius().unwrap_or_default(),
                view.position().x,
                view.position().y
            ),
            ShapeKind::Rect => info!(
                "  rect {:?} at ({:.2}, {:.2}) rot {:.2}",
                view.size().unwrap_or_default(),
                view.position().x,
                view.position().y,
                view.rotation()
            ),
            ShapeKind::Group | ShapeKind::Box => match view.group_kind() {
                Some(GroupKind::Box {
                    width,
                    height,
                    thickness,
                }) => info!("  box {width}x{height} (walls {thickness})"),
                _ => info!("  group of {} children", view.children().len()),
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let frames: usize = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("invalid frame count {arg:?}"))?,
        None => 600,
    };

    let config = LoopConfig::default();
    let mut physics = PhysicsEngine::new(PhysicsConfig::default())?;
    build_scene(&mut physics);

    let mut accumulator = 0.0;
    for frame in 0..frames {
        accumulator += FRAME_TIMES[frame % FRAME_TIMES.len()];
        let mut substeps = 0;
        while accumulator >= config.fixed_timestep && substeps < config.max_substeps {
            physics.update_entities(config.fixed_timestep);
            accumulator -= config.fixed_timestep;
            substeps += 1;
        }

        if frame % LOG_EVERY == 0 {
            log_snapshot(&physics, frame);
        }
    }
    log_snapshot(&physics, frames);

    Ok(())
}
