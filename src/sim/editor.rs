//! Level editor session
//!
//! Grid-snapped placement and removal over the same entity schema the
//! generator produces. The editor owns its own camera; playtesting hands a
//! copy of the authored world to the run controller.

use serde::{Deserialize, Serialize};

use super::state::{Entity, EntityKind, World};
use crate::consts::*;
use crate::snap_to_grid;

/// Discrete editor actions (keyboard shortcuts or panel buttons)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    SelectTool(EntityKind),
    PanLeft,
    PanRight,
    Playtest,
}

impl EditorCommand {
    /// Default key bindings
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            '1' => Some(EditorCommand::SelectTool(EntityKind::Spike)),
            '2' => Some(EditorCommand::SelectTool(EntityKind::Pad)),
            '3' => Some(EditorCommand::SelectTool(EntityKind::GravityPortal)),
            '4' => Some(EditorCommand::SelectTool(EntityKind::SpeedPortal)),
            'a' => Some(EditorCommand::PanLeft),
            'd' => Some(EditorCommand::PanRight),
            'p' => Some(EditorCommand::Playtest),
            _ => None,
        }
    }
}

/// Pointer buttons the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Place the selected tool
    Primary,
    /// Delete under the pointer
    Secondary,
}

/// Interactive authoring state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorSession {
    /// Independent of the gameplay camera
    pub camera_x: f32,
    pub grid: f32,
    pub selected: EntityKind,
    /// Ghost of what a click would place; recomputed on pointer move
    #[serde(skip)]
    pub preview: Option<Entity>,
    /// Authored entities in placement order
    pub entities: Vec<Entity>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            camera_x: 0.0,
            grid: EDITOR_GRID,
            selected: EntityKind::Spike,
            preview: None,
            entities: Vec::new(),
        }
    }

    /// Snapped world x under a viewport-relative pointer
    pub fn snap_pointer(&self, pointer_x: f32) -> f32 {
        snap_to_grid(self.camera_x + pointer_x, self.grid)
    }

    pub fn pointer_moved(&mut self, pointer_x: f32) {
        let x = self.snap_pointer(pointer_x);
        self.preview = Some(Entity::new(self.selected, x));
    }

    /// Click at a viewport-relative pointer position
    pub fn pointer_pressed(&mut self, pointer_x: f32, button: PointerButton) -> bool {
        self.pointer_moved(pointer_x);
        let x = self.snap_pointer(pointer_x);
        match button {
            PointerButton::Primary => self.place(x),
            PointerButton::Secondary => self.delete(x),
        }
    }

    /// Place the selected kind at the snapped `x`. Returns false if an entity
    /// already sits within the placement guard.
    pub fn place(&mut self, x: f32) -> bool {
        let x = snap_to_grid(x, self.grid);
        if self
            .entities
            .iter()
            .any(|e| (e.x - x).abs() < EDITOR_PLACE_GUARD)
        {
            return false;
        }
        self.entities.push(Entity::new(self.selected, x));
        log::debug!("Editor placed {} at {}", self.selected.as_str(), x);
        true
    }

    /// Remove the first entity within the delete radius of the snapped `x`
    pub fn delete(&mut self, x: f32) -> bool {
        let x = snap_to_grid(x, self.grid);
        match self
            .entities
            .iter()
            .position(|e| (e.x - x).abs() < EDITOR_DELETE_RADIUS)
        {
            Some(idx) => {
                let removed = self.entities.remove(idx);
                log::debug!("Editor removed {} at {}", removed.kind.as_str(), removed.x);
                true
            }
            None => false,
        }
    }

    pub fn switch_tool(&mut self, kind: EntityKind) {
        self.selected = kind;
        if let Some(x) = self.preview.as_ref().map(|p| p.x) {
            self.preview = Some(Entity::new(kind, x));
        }
    }

    /// Scroll the editor camera by `dx` pixels
    pub fn pan(&mut self, dx: f32) {
        self.camera_x += dx;
    }

    /// Apply a non-playtest command. Playtest needs the run controller and
    /// is handled there.
    pub fn apply(&mut self, command: EditorCommand) {
        match command {
            EditorCommand::SelectTool(kind) => self.switch_tool(kind),
            EditorCommand::PanLeft => self.pan(-EDITOR_PAN_STEP),
            EditorCommand::PanRight => self.pan(EDITOR_PAN_STEP),
            EditorCommand::Playtest => {}
        }
    }

    /// Snapshot the authored world. The finish sits a fixed distance past the
    /// rightmost entity; an empty session has nothing to play.
    pub fn playtest(&self) -> Option<World> {
        let max_x = self.entities.iter().map(|e| e.x).reduce(f32::max)?;
        Some(World::new(
            self.entities.clone(),
            max_x + CUSTOM_FINISH_PADDING,
        ))
    }
}
