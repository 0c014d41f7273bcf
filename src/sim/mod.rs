//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per call, no wall-clock time
//! - Seeded RNG only
//! - Exhaustive collision scans (entity order never matters)
//! - No rendering or platform dependencies

pub mod collision;
mod controller;
pub mod editor;
pub mod generator;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{Rect, rects_overlap, spike_hit, triggered_by};
pub use editor::{EditorCommand, EditorSession, PointerButton};
pub use generator::{
    BUILTIN_LEVELS, GeneratedLevel, LevelProfile, Pattern, PatternSource, RandomPatterns,
    ScriptedPatterns, Tier, generate_level,
};
pub use state::{
    Attempt, EffectColor, Entity, EntityKind, GameEvent, GameState, GravityDir, Player, Scene,
    World,
};
pub use tick::{TickInput, autopilot_wants_jump, tick};
