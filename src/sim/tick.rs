//! Fixed timestep simulation tick
//!
//! Order while playing: physics, pad triggers, gravity portals, speed
//! portals, spike check (a death ends the tick), finish check.

use std::f32::consts::PI;

use super::collision;
use super::physics;
use super::state::{Attempt, Entity, EntityKind, GameState, GravityDir, Scene};
use crate::consts::*;

/// Input intent for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space, up arrow, click)
    pub jump: bool,
    /// Back to menu (escape)
    pub cancel: bool,
    /// Demo mode - the autopilot queues jumps
    pub autopilot: bool,
}

/// Advance the session by one fixed step
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.cancel {
        state.request_cancel();
    }
    if input.jump {
        state.request_jump();
    }

    if state.scene != Scene::Playing {
        return;
    }

    if input.autopilot && autopilot_wants_jump(&state.run) {
        state.jump_queued = true;
    }

    state.time_ticks += 1;

    let jump = std::mem::take(&mut state.jump_queued);
    physics::step(&mut state.run, jump);

    for trigger in [Trigger::Pad, Trigger::Gravity, Trigger::Speed] {
        apply_triggers(state, trigger);
    }

    if collision::spike_hit(&state.run.world, &state.run.player, state.run.camera_x) {
        state.restart_after_death();
        return;
    }

    if state.run.finish_reached() {
        state.complete_level();
    }
}

/// Non-hazard kinds, in the order they are scanned each tick
#[derive(Debug, Clone, Copy)]
enum Trigger {
    Pad,
    Gravity,
    Speed,
}

impl Trigger {
    fn kind(self) -> EntityKind {
        match self {
            Trigger::Pad => EntityKind::Pad,
            Trigger::Gravity => EntityKind::GravityPortal,
            Trigger::Speed => EntityKind::SpeedPortal,
        }
    }
}

/// Fire the effect of every trigger of this kind the player overlaps
fn apply_triggers(state: &mut GameState, trigger: Trigger) {
    let kind = trigger.kind();
    let hits: Vec<f32> = collision::triggered_by(
        &state.run.world,
        &state.run.player,
        state.run.camera_x,
        kind,
    )
    .map(Entity::speed_mult)
    .collect();

    for mult in hits {
        let run = &mut state.run;
        match trigger {
            Trigger::Pad => {
                run.player.vel_y = JUMP_VELOCITY * run.player.gravity.sign();
            }
            Trigger::Gravity => {
                run.player.gravity = run.player.gravity.flipped();
                run.player.rotation += PI;
            }
            Trigger::Speed => {
                run.speed_mult = mult;
            }
        }
        log::trace!("{} triggered at distance {:.0}", kind.as_str(), run.distance());
        state.emit_effect(kind.effect_color());
    }
}

/// Take-off window for the autopilot, measured from the cube's front edge to
/// a spike's left edge at baseline speed
const AUTOPILOT_WINDOW: (f32, f32) = (36.0, 66.0);

/// True when a grounded, upright player has a spike entering the take-off window
pub fn autopilot_wants_jump(run: &Attempt) -> bool {
    let player = &run.player;
    if !player.on_ground || player.gravity != GravityDir::Normal {
        return false;
    }
    let front = player.x + player.size / 2.0;
    let (near, far) = (
        AUTOPILOT_WINDOW.0 * run.speed_mult,
        AUTOPILOT_WINDOW.1 * run.speed_mult,
    );
    run.world
        .entities
        .iter()
        .filter(|e| e.kind.is_hazard())
        .map(|e| collision::entity_box(e, run.camera_x).min.x - front)
        .any(|gap| gap > near && gap <= far)
}
