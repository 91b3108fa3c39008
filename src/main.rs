//! Pod Racer demo
//!
//! Flies one pod around a seeded checkpoint course, aiming straight at the
//! next checkpoint each turn. Pass a JSON tuning file as the first argument to
//! override the engine constants.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use pod_racer::sim::first_collision;
use pod_racer::{Body, Decision, Pod, PointExt, Thrust, Tuning, Unit};

const COURSE_SEED: u64 = 0x5eed_cafe;
const CHECKPOINTS: usize = 4;
const DEMO_THRUST: i32 = 100;
const MAX_TURNS: u32 = 400;

fn main() {
    env_logger::init();
    log::info!("Pod Racer (demo) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::warn!("Could not load tuning from {path}: {e}; using defaults");
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    let course = generate_course(COURSE_SEED, CHECKPOINTS);
    log::info!("Course (seed {COURSE_SEED:#x}): {course:?}");

    let thrust = match Thrust::new(DEMO_THRUST, &tuning) {
        Ok(thrust) => thrust,
        Err(e) => {
            log::warn!("{e}; flying at full power instead");
            Thrust::Power(tuning.max_thrust)
        }
    };

    // Parked opponent sitting halfway along the first leg
    let opponent = Unit::at(course[0].lerp(course[1], 0.5), tuning.pod_radius);

    let mut pod = Pod::new(course[0], 0.0, &tuning);
    let mut next = 1;

    for turn in 1..=MAX_TURNS {
        let target = course[next];
        let decision = Decision::new(target, thrust);

        // Aim first so the collision check sees this turn's velocity
        pod.rotate(target);
        pod.boost(thrust.power());
        let bodies: [&dyn Body; 2] = [&pod, &opponent];
        if let Some(hit) = first_collision(&bodies) {
            log::info!("Turn {turn}: contact with opponent at t={:.3}", hit.dist);
        }
        pod.advance(pod_racer::consts::TURN_DURATION);
        pod.end();

        log::info!(
            "Turn {turn}: {decision} -> pos=({}, {}) angle={:.1} speed={:.1}",
            pod.unit.pos.x,
            pod.unit.pos.y,
            pod.angle,
            pod.unit.vel.length()
        );

        if PointExt::distance(pod.unit.pos, target) <= tuning.checkpoint_radius {
            log::info!("Turn {turn}: checkpoint {next} reached");
            pod.reset_timeout(&tuning);
            next += 1;
            if next == course.len() {
                println!("Course finished in {turn} turns");
                return;
            }
        }

        if pod.is_timed_out() {
            println!("Timed out on turn {turn} heading for checkpoint {next}");
            return;
        }
    }

    println!("Gave up after {MAX_TURNS} turns");
}

/// Seeded course: start point followed by the checkpoints
fn generate_course(seed: u64, checkpoints: usize) -> Vec<Vec2> {
    let mut rng = Pcg32::seed_from_u64(seed);
    (0..=checkpoints)
        .map(|_| {
            Vec2::new(
                rng.random_range(1000..15000) as f32,
                rng.random_range(1000..8000) as f32,
            )
        })
        .collect()
}
