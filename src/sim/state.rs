//! Game state and core simulation types
//!
//! Everything one attempt needs is grouped in [`Attempt`] and rebuilt
//! wholesale on every (re)start. Session-scoped values (scene, attempt
//! counter, RNG stream, editor) live on [`GameState`].

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::editor::EditorSession;
use super::generator::{LevelProfile, default_levels};
use crate::consts::*;

/// Obstacle and trigger kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Spike,
    Pad,
    #[serde(rename = "gravity")]
    GravityPortal,
    #[serde(rename = "speed")]
    SpeedPortal,
}

/// Where an entity's collision box sits relative to its `x`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxAnchor {
    /// `x` is the left edge
    LeftEdge,
    /// `x` is the horizontal center
    Centered,
}

impl EntityKind {
    /// Bounding box (width, height). Shared by generator, editor placement
    /// and editor preview.
    pub fn size(self) -> Vec2 {
        match self {
            EntityKind::Spike => Vec2::new(50.0, 60.0),
            EntityKind::Pad => Vec2::new(70.0, 20.0),
            EntityKind::GravityPortal | EntityKind::SpeedPortal => Vec2::new(80.0, 120.0),
        }
    }

    pub fn anchor(self) -> BoxAnchor {
        match self {
            EntityKind::Spike => BoxAnchor::LeftEdge,
            _ => BoxAnchor::Centered,
        }
    }

    /// Spikes kill; everything else triggers an effect
    pub fn is_hazard(self) -> bool {
        self == EntityKind::Spike
    }

    /// Cosmetic color tag emitted when this kind triggers
    pub fn effect_color(self) -> EffectColor {
        match self {
            EntityKind::Spike => EffectColor::Spike,
            EntityKind::Pad => EffectColor::Pad,
            EntityKind::GravityPortal => EffectColor::GravityPortal,
            EntityKind::SpeedPortal => EffectColor::SpeedPortal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Spike => "spike",
            EntityKind::Pad => "pad",
            EntityKind::GravityPortal => "gravity",
            EntityKind::SpeedPortal => "speed",
        }
    }
}

/// An obstacle or trigger standing on the ground line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    /// World-space x (left edge for spikes, center otherwise)
    pub x: f32,
    pub w: f32,
    pub h: f32,
    /// Speed portals only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mult: Option<f32>,
}

impl Entity {
    pub fn new(kind: EntityKind, x: f32) -> Self {
        let size = kind.size();
        Self {
            kind,
            x,
            w: size.x,
            h: size.y,
            mult: None,
        }
    }

    pub fn speed_portal(x: f32, mult: f32) -> Self {
        Self {
            mult: Some(mult),
            ..Self::new(EntityKind::SpeedPortal, x)
        }
    }

    /// Multiplier applied when a speed portal triggers
    pub fn speed_mult(&self) -> f32 {
        self.mult.unwrap_or(DEFAULT_SPEED_MULT)
    }
}

/// Gravity orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GravityDir {
    #[default]
    Normal,
    Inverted,
}

impl GravityDir {
    /// +1 pulls toward the ground, -1 toward the ceiling
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            GravityDir::Normal => 1.0,
            GravityDir::Inverted => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            GravityDir::Normal => GravityDir::Inverted,
            GravityDir::Inverted => GravityDir::Normal,
        }
    }
}

/// The player's cube
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Screen-space x of the center. Constant during play: the world scrolls.
    pub x: f32,
    /// Vertical center
    pub y: f32,
    pub vel_y: f32,
    /// Radians, visual spin
    pub rotation: f32,
    pub on_ground: bool,
    pub gravity: GravityDir,
    pub size: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: PLAYER_SCREEN_X,
            y: PLAYER_START_Y,
            vel_y: 0.0,
            rotation: 0.0,
            on_ground: false,
            gravity: GravityDir::Normal,
            size: PLAYER_SIZE,
        }
    }
}

impl Player {
    /// Player center in world space for a given camera offset
    #[inline]
    pub fn world_x(&self, camera_x: f32) -> f32 {
        camera_x + self.x
    }

    /// Put the player at rest on the floor
    pub fn rest_on_ground(&mut self) {
        self.y = GROUND_Y - self.size / 2.0;
        self.vel_y = 0.0;
        self.on_ground = true;
    }
}

/// Entities plus the finish line for one attempt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Insertion order; never relied on for correctness
    pub entities: Vec<Entity>,
    /// World x of the finish marker
    pub finish_x: f32,
}

impl World {
    pub fn new(entities: Vec<Entity>, finish_x: f32) -> Self {
        Self { entities, finish_x }
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    /// Rightmost entity position, if any
    pub fn max_x(&self) -> Option<f32> {
        self.entities.iter().map(|e| e.x).reduce(f32::max)
    }
}

/// Per-attempt state. Constructed fresh on every start or restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    pub world: World,
    pub player: Player,
    /// World x mapped to the viewport's left edge
    pub camera_x: f32,
    /// Current scroll multiplier, changed only by speed portals
    pub speed_mult: f32,
}

impl Attempt {
    pub fn new(world: World) -> Self {
        Self {
            world,
            player: Player::default(),
            camera_x: 0.0,
            speed_mult: 1.0,
        }
    }

    /// Distance scrolled since the attempt began
    #[inline]
    pub fn distance(&self) -> f32 {
        self.camera_x
    }

    /// Finish line reached: player world x within reach of the marker
    pub fn finish_reached(&self) -> bool {
        self.player.world_x(self.camera_x) >= self.world.finish_x - FINISH_REACH
    }
}

/// Observable scene for the UI shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scene {
    #[default]
    Menu,
    Playing,
    Complete,
    Editor,
}

/// Color tags for cosmetic effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectColor {
    Spike,
    Pad,
    GravityPortal,
    SpeedPortal,
    Finish,
}

/// Events for the shell (effects, UI visibility). Never read by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Fire-and-forget cosmetic burst at a world position
    Effect { x: f32, y: f32, color: EffectColor },
    SceneChanged { from: Scene, to: Scene },
    /// The player hit a spike and the attempt restarted
    Died { distance: f32 },
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Hand out a generator on the next stream so every level build differs
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub scene: Scene,
    /// Index into `levels` of the current built-in level
    pub current_level: usize,
    /// Fresh built-in starts
    pub attempts: u32,
    pub is_custom_level: bool,
    /// Built-in level table
    pub levels: Vec<LevelProfile>,
    pub rng_state: RngState,
    /// Current attempt
    pub run: Attempt,
    /// Last playtested editor world, replayed on death
    pub custom_world: Option<World>,
    /// Present while the editor is open
    pub editor: Option<EditorSession>,
    /// Single-slot jump intent, consumed by the next tick
    pub jump_queued: bool,
    /// Record cosmetic effect events
    pub effects_enabled: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pending events for the shell
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session at the menu with the default level table
    pub fn new(seed: u64) -> Self {
        Self::with_levels(seed, default_levels())
    }

    pub fn with_levels(seed: u64, levels: Vec<LevelProfile>) -> Self {
        Self {
            scene: Scene::Menu,
            current_level: 0,
            attempts: 0,
            is_custom_level: false,
            levels,
            rng_state: RngState::new(seed),
            run: Attempt::new(World::default()),
            custom_world: None,
            editor: None,
            jump_queued: false,
            effects_enabled: true,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit_effect(&mut self, color: EffectColor) {
        if self.effects_enabled {
            let x = self.run.player.world_x(self.run.camera_x);
            let y = self.run.player.y;
            self.events.push(GameEvent::Effect { x, y, color });
        }
    }
}
