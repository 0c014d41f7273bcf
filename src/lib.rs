//! Cube Dash - A side-scrolling reflex platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, generator, editor, run controller)
//! - `clock`: Fixed-step accumulator for presentation-rate independence
//! - `renderer`: Renderer boundary plus a text renderer for headless runs
//! - `settings`: Data-driven configuration

pub mod clock;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use clock::FixedStep;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Ticks per second the content pacing was authored against.
    /// Level length and the physics feel both assume one tick per 60 Hz frame.
    pub const ASSUMED_TICKS_PER_SECOND: f32 = 60.0;
    /// Fixed simulation timestep matching the assumed tick rate
    pub const SIM_DT: f32 = 1.0 / ASSUMED_TICKS_PER_SECOND;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Viewport dimensions (pixels)
    pub const VIEWPORT_WIDTH: f32 = 1280.0;
    pub const VIEWPORT_HEIGHT: f32 = 720.0;

    /// Physics (per tick)
    pub const GRAVITY: f32 = 0.6;
    /// Baseline scroll speed in px/tick
    pub const BASE_SPEED: f32 = 6.0;
    pub const JUMP_VELOCITY: f32 = -15.0;
    /// Airborne spin in radians/tick
    pub const AIR_SPIN: f32 = 0.22;

    /// Floor line; every entity stands on it
    pub const GROUND_Y: f32 = 620.0;
    /// Ceiling line used while gravity is inverted
    pub const CEIL_Y: f32 = 100.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 48.0;
    /// Fixed screen-space x of the player's center
    pub const PLAYER_SCREEN_X: f32 = 200.0;
    pub const PLAYER_START_Y: f32 = 300.0;
    /// Query box used against pads and portals (not the render size)
    pub const TRIGGER_PROBE_SIZE: f32 = 40.0;

    /// Speed portal multiplier when none is configured
    pub const DEFAULT_SPEED_MULT: f32 = 1.2;

    /// Generator layout
    pub const LEVEL_START_X: f32 = 600.0;
    /// Patterns stop this far before the finish
    pub const FINISH_CLEARANCE: f32 = 500.0;
    /// Longest level the generator will lay out
    pub const MAX_LEVEL_SECONDS: u32 = 600;
    /// Identical draws tolerated before the generator steps to the next pattern
    pub const MAX_PATTERN_REDRAWS: u32 = 32;
    /// The run completes once the player is this close to the finish
    pub const FINISH_REACH: f32 = 100.0;

    /// Editor
    pub const EDITOR_GRID: f32 = 50.0;
    pub const EDITOR_PAN_STEP: f32 = 40.0;
    pub const EDITOR_PLACE_GUARD: f32 = 10.0;
    pub const EDITOR_DELETE_RADIUS: f32 = 25.0;
    /// Custom levels finish this far past the rightmost entity
    pub const CUSTOM_FINISH_PADDING: f32 = 600.0;
}

/// Round to nearest integer with halves going toward +infinity
#[inline]
pub fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

/// Snap a world coordinate to the nearest multiple of `grid`
#[inline]
pub fn snap_to_grid(value: f32, grid: f32) -> f32 {
    round_half_up(value / grid) * grid
}
