//! Physics engine benchmarks (criterion - wall-clock time).
//!
//! Run all:    cargo bench --manifest-path benchmarks/Cargo.toml --bench physics
//! Filter:     cargo bench --manifest-path benchmarks/Cargo.toml --bench physics -- intersection

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::Vec2;
use rein2d::geometry::{Circle, Polygon};
use rein2d::intersection::{circle_circle, circle_polygon, polygon_polygon};
use rein2d::physics::contact::CollisionData;
use rein2d::physics::solver::resolve_collision;
use rein2d::Body;
use rein2d_bench::*;

// ---------------------------------------------------------------------------
// Intersection predicates
// ---------------------------------------------------------------------------

fn bench_intersection(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("intersection/circle_circle");
        let a = Circle::new(Vec2::ZERO, 10.0);

        let hit = Circle::new(Vec2::new(15.0, 0.0), 10.0);
        group.bench_function("intersecting", |b| {
            b.iter(|| {
                let mut points = Vec::new();
                circle_circle(&a, &hit, &mut points)
            });
        });

        let miss = Circle::new(Vec2::new(50.0, 0.0), 10.0);
        group.bench_function("separated", |b| {
            b.iter(|| {
                let mut points = Vec::new();
                circle_circle(&a, &miss, &mut points)
            });
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("intersection/polygon_polygon");
        let a = Polygon::rect(20.0, 20.0, Vec2::ZERO);

        let hit = Polygon::rect(20.0, 20.0, Vec2::new(15.0, 5.0));
        group.bench_function("intersecting", |b| {
            b.iter(|| {
                let (mut p, mut n1, mut n2) = (Vec::new(), Vec::new(), Vec::new());
                polygon_polygon(&a, &hit, &mut p, &mut n1, &mut n2)
            });
        });

        let mut rotated = Polygon::rect(20.0, 20.0, Vec2::ZERO);
        rotated.rotate(45.0);
        rotated.move_by(Vec2::new(15.0, 0.0));
        group.bench_function("rotated", |b| {
            b.iter(|| {
                let (mut p, mut n1, mut n2) = (Vec::new(), Vec::new(), Vec::new());
                polygon_polygon(&a, &rotated, &mut p, &mut n1, &mut n2)
            });
        });

        let miss = Polygon::rect(20.0, 20.0, Vec2::new(50.0, 0.0));
        group.bench_function("separated", |b| {
            b.iter(|| {
                let (mut p, mut n1, mut n2) = (Vec::new(), Vec::new(), Vec::new());
                polygon_polygon(&a, &miss, &mut p, &mut n1, &mut n2)
            });
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("intersection/circle_polygon");
        let wall = Polygon::rect(100.0, 10.0, Vec2::new(0.0, 15.0));

        let hit = Circle::new(Vec2::new(0.0, 2.0), 10.0);
        group.bench_function("intersecting", |b| {
            b.iter(|| {
                let (mut p, mut n) = (Vec::new(), Vec::new());
                circle_polygon(&hit, &wall, &mut p, &mut n)
            });
        });

        let miss = Circle::new(Vec2::new(0.0, -50.0), 10.0);
        group.bench_function("separated", |b| {
            b.iter(|| {
                let (mut p, mut n) = (Vec::new(), Vec::new());
                circle_polygon(&miss, &wall, &mut p, &mut n)
            });
        });
        group.finish();
    }
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver/resolve_collision");
    let mut world = hecs::World::new();
    let collision = CollisionData {
        e1: world.spawn(()),
        e2: world.spawn(()),
        penetration: 2.0,
        hit_point: Vec2::new(3.0, 10.0),
        normal1: Vec2::Y,
        normal2: -Vec2::Y,
    };

    let mut ball = Body::new(Vec2::ZERO, 1.0);
    ball.linear_velocity = Vec2::new(1.0, 4.0);
    ball.angular_velocity = 3.0;

    group.bench_function("dynamic_static", |b| {
        let floor = Body::new_static(Vec2::new(0.0, 15.0));
        b.iter(|| {
            let (mut b1, mut b2) = (ball, floor);
            resolve_collision(&mut b1, &mut b2, &collision);
            (b1, b2)
        });
    });

    group.bench_function("dynamic_dynamic", |b| {
        let other = Body::new(Vec2::new(0.0, 15.0), 3.0);
        b.iter(|| {
            let (mut b1, mut b2) = (ball, other);
            resolve_collision(&mut b1, &mut b2, &collision);
            (b1, b2)
        });
    });
    group.finish();
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

fn bench_pipeline(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("pipeline/step");
        group.sample_size(30);
        for &n in &[10, 50, 100, 200] {
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
                b.iter_batched(
                    || setup_mixed_scene(n),
                    |mut physics| {
                        physics.update_entities(1.0 / 60.0);
                        physics
                    },
                    criterion::BatchSize::LargeInput,
                );
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("pipeline/sustained_10steps");
        group.sample_size(20);
        for &n in &[50, 100] {
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
                b.iter_batched(
                    || setup_circle_scene(n),
                    |mut physics| {
                        for _ in 0..10 {
                            physics.update_entities(1.0 / 60.0);
                        }
                        physics
                    },
                    criterion::BatchSize::LargeInput,
                );
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("pipeline/stages");
        let n = 100;

        group.bench_function("collect_collisions_100", |b| {
            let mut physics = setup_mixed_scene(n);
            b.iter(|| physics.collect_collisions());
        });

        group.bench_function("integrate_100", |b| {
            b.iter_batched(
                || setup_mixed_scene(n),
                |mut physics| {
                    physics.apply_gravity(1.0 / 60.0);
                    physics.advance_transformation();
                    physics
                },
                criterion::BatchSize::LargeInput,
            );
        });
        group.finish();
    }
}

criterion_group!(benches, bench_intersection, bench_solver, bench_pipeline);
criterion_main!(benches);
