//! One fixed physics step: scroll, jump, gravity, floor/ceiling clamp, spin

use std::f32::consts::FRAC_PI_2;

use super::state::{Attempt, GravityDir};
use crate::consts::*;
use crate::round_half_up;

/// Advance the attempt by one tick.
///
/// `jump` is the queued jump intent for this tick. It is honored only while
/// grounded; the caller drops it either way.
pub fn step(run: &mut Attempt, jump: bool) {
    run.camera_x += BASE_SPEED * run.speed_mult;

    let player = &mut run.player;
    let dir = player.gravity.sign();

    if jump && player.on_ground {
        player.vel_y = JUMP_VELOCITY * dir;
        player.on_ground = false;
    }

    player.vel_y += GRAVITY * dir;
    player.y += player.vel_y;

    let half = player.size / 2.0;
    match player.gravity {
        GravityDir::Normal => {
            if player.y + half >= GROUND_Y {
                player.y = GROUND_Y - half;
                player.vel_y = 0.0;
                player.on_ground = true;
            }
        }
        GravityDir::Inverted => {
            if player.y - half <= CEIL_Y {
                player.y = CEIL_Y + half;
                player.vel_y = 0.0;
                player.on_ground = true;
            }
        }
    }

    if player.on_ground {
        player.rotation = snap_rotation(player.rotation);
    } else {
        player.rotation += AIR_SPIN * dir;
    }
}

/// Nearest multiple of 90 degrees
pub fn snap_rotation(rotation: f32) -> f32 {
    round_half_up(rotation / FRAC_PI_2) * FRAC_PI_2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::World;

    fn attempt() -> Attempt {
        Attempt::new(World::new(Vec::new(), 7200.0))
    }

    #[test]
    fn test_resting_player_stays_put() {
        let mut run = attempt();
        run.player.rest_on_ground();
        let y = run.player.y;

        step(&mut run, false);

        assert_eq!(run.player.y, y);
        assert_eq!(run.player.vel_y, 0.0);
        assert!(run.player.on_ground);
    }

    #[test]
    fn test_camera_scrolls_with_speed_mult() {
        let mut run = attempt();
        step(&mut run, false);
        assert_eq!(run.camera_x, 6.0);

        run.speed_mult = 1.5;
        step(&mut run, false);
        assert_eq!(run.camera_x, 15.0);
    }

    #[test]
    fn test_grounded_jump() {
        let mut run = attempt();
        run.player.rest_on_ground();

        step(&mut run, true);

        assert!(!run.player.on_ground);
        assert!((run.player.vel_y - (-15.0 + 0.6)).abs() < 1e-5);
        assert!(run.player.y < GROUND_Y - run.player.size / 2.0);
    }

    #[test]
    fn test_airborne_jump_is_dropped() {
        let mut with_jump = attempt();
        let mut without = attempt();

        step(&mut with_jump, true);
        step(&mut without, false);

        assert_eq!(with_jump.player.vel_y, without.player.vel_y);
        assert_eq!(with_jump.player.y, without.player.y);
    }

    #[test]
    fn test_inverted_gravity_clamps_to_ceiling() {
        let mut run = attempt();
        run.player.gravity = GravityDir::Inverted;
        run.player.y = CEIL_Y + 30.0;
        run.player.vel_y = -10.0;

        step(&mut run, false);

        assert_eq!(run.player.y, CEIL_Y + run.player.size / 2.0);
        assert_eq!(run.player.vel_y, 0.0);
        assert!(run.player.on_ground);
    }

    #[test]
    fn test_inverted_jump_and_spin() {
        let mut run = attempt();
        run.player.gravity = GravityDir::Inverted;
        run.player.y = CEIL_Y + run.player.size / 2.0;
        run.player.on_ground = true;

        step(&mut run, true);

        assert!(!run.player.on_ground);
        assert!((run.player.vel_y - (15.0 - 0.6)).abs() < 1e-5);
        assert!(run.player.y > CEIL_Y + run.player.size / 2.0);
        assert!((run.player.rotation + AIR_SPIN).abs() < 1e-6);

        step(&mut run, false);
        assert!((run.player.rotation + 2.0 * AIR_SPIN).abs() < 1e-6);
    }

    #[test]
    fn test_air_spin_and_landing_snap() {
        let mut run = attempt();
        step(&mut run, false);
        assert!((run.player.rotation - AIR_SPIN).abs() < 1e-6);

        // Fall until landing; rotation ends on a quarter turn
        for _ in 0..200 {
            step(&mut run, false);
        }
        assert!(run.player.on_ground);
        let quarters = run.player.rotation / FRAC_PI_2;
        assert!((quarters - quarters.round()).abs() < 1e-4);
    }

    #[test]
    fn test_snap_rotation() {
        assert_eq!(snap_rotation(0.1), 0.0);
        assert!((snap_rotation(1.2) - FRAC_PI_2).abs() < 1e-6);
        assert!((snap_rotation(-1.2) + FRAC_PI_2).abs() < 1e-6);
    }
}
