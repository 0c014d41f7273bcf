//! Collision detection for the scrolling world
//!
//! Everything is an axis-aligned box. All tests run in camera space: the
//! player sits at its fixed screen x, entities at `entity.x - camera_x`.
//! Scans are exhaustive over the world and never depend on entity order.

use glam::Vec2;

use super::state::{BoxAnchor, Entity, EntityKind, Player, World};
use crate::consts::{GROUND_Y, TRIGGER_PROBE_SIZE};

/// Axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Square of side `side` centered on `center`
    pub fn centered(center: Vec2, side: f32) -> Self {
        let half = side / 2.0;
        Self {
            min: center - Vec2::splat(half),
            size: Vec2::splat(side),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Positive-area intersection; shared edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

/// Strict overlap test between two boxes given as (x, y, w, h)
#[allow(clippy::too_many_arguments)]
#[inline]
pub fn rects_overlap(
    ax: f32,
    ay: f32,
    aw: f32,
    ah: f32,
    bx: f32,
    by: f32,
    bw: f32,
    bh: f32,
) -> bool {
    Rect::new(ax, ay, aw, ah).overlaps(&Rect::new(bx, by, bw, bh))
}

/// Camera-space box of an entity, following its kind's anchor rule
pub fn entity_box(entity: &Entity, camera_x: f32) -> Rect {
    let left = match entity.kind.anchor() {
        BoxAnchor::LeftEdge => entity.x - camera_x,
        BoxAnchor::Centered => entity.x - camera_x - entity.w / 2.0,
    };
    Rect::new(left, GROUND_Y - entity.h, entity.w, entity.h)
}

/// Player box tested against spikes: the full cube
pub fn player_hazard_box(player: &Player) -> Rect {
    Rect::centered(Vec2::new(player.x, player.y), player.size)
}

/// Player box tested against pads and portals: a fixed 40x40 probe
pub fn player_trigger_box(player: &Player) -> Rect {
    Rect::centered(Vec2::new(player.x, player.y), TRIGGER_PROBE_SIZE)
}

/// True if the player touches any spike. Stops at the first hit.
pub fn spike_hit(world: &World, player: &Player, camera_x: f32) -> bool {
    let probe = player_hazard_box(player);
    world
        .entities
        .iter()
        .filter(|e| e.kind.is_hazard())
        .any(|e| probe.overlaps(&entity_box(e, camera_x)))
}

/// Every entity of `kind` overlapping the player's trigger probe this tick
pub fn triggered_by<'a>(
    world: &'a World,
    player: &Player,
    camera_x: f32,
    kind: EntityKind,
) -> impl Iterator<Item = &'a Entity> + use<'a> {
    let probe = player_trigger_box(player);
    world
        .entities
        .iter()
        .filter(move |e| e.kind == kind && probe.overlaps(&entity_box(e, camera_x)))
}
