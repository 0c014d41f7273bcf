//! Text renderer for headless runs and logs
//!
//! Draws the viewport as a strip of fixed-width columns: an upper row for
//! anything in the air, a lower row for whatever stands on the ground, and
//! the ground line itself.

use super::Renderer;
use crate::consts::{GROUND_Y, VIEWPORT_WIDTH};
use crate::sim::collision::entity_box;
use crate::sim::{Entity, EntityKind, GameState, Scene};

/// Pixels per text column
pub const COLUMN_WIDTH: f32 = 20.0;
/// Columns across the viewport
pub const COLUMNS: usize = (VIEWPORT_WIDTH / COLUMN_WIDTH) as usize;

/// Above this height (from the floor) the player is drawn in the upper row
const UPPER_ROW_HEIGHT: f32 = 60.0;

fn glyph(kind: EntityKind) -> char {
    match kind {
        EntityKind::Spike => '^',
        EntityKind::Pad => '_',
        EntityKind::GravityPortal => 'G',
        EntityKind::SpeedPortal => '>',
    }
}

fn column(screen_x: f32) -> Option<usize> {
    let col = (screen_x / COLUMN_WIDTH).floor();
    (col >= 0.0 && col < COLUMNS as f32).then_some(col as usize)
}

#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    frame: String,
}

impl TextRenderer {
    /// Last drawn frame
    pub fn frame(&self) -> &str {
        &self.frame
    }

    fn draw_entities(upper: &mut [char], lower: &mut [char], entities: &[Entity], camera_x: f32) {
        for entity in entities {
            let rect = entity_box(entity, camera_x);
            let Some(col) = column(rect.min.x + rect.size.x / 2.0) else {
                continue;
            };
            lower[col] = glyph(entity.kind);
            if rect.size.y > UPPER_ROW_HEIGHT {
                upper[col] = glyph(entity.kind);
            }
        }
    }
}

impl Renderer for TextRenderer {
    fn draw(&mut self, state: &GameState) {
        let mut upper = vec![' '; COLUMNS];
        let mut lower = vec![' '; COLUMNS];

        match state.scene {
            Scene::Menu => {
                self.frame = String::from("[menu]");
                return;
            }
            Scene::Editor => {
                if let Some(editor) = state.editor.as_ref() {
                    Self::draw_entities(&mut upper, &mut lower, &editor.entities, editor.camera_x);
                    if let Some(col) = editor
                        .preview
                        .as_ref()
                        .and_then(|p| column(entity_box(p, editor.camera_x).min.x + p.w / 2.0))
                    {
                        upper[col] = '+';
                    }
                }
            }
            Scene::Playing | Scene::Complete => {
                let run = &state.run;
                Self::draw_entities(&mut upper, &mut lower, &run.world.entities, run.camera_x);
                if let Some(col) = column(run.world.finish_x - run.camera_x) {
                    upper[col] = '|';
                    lower[col] = '|';
                }
                if let Some(col) = column(run.player.x) {
                    let height = GROUND_Y - (run.player.y + run.player.size / 2.0);
                    if height > UPPER_ROW_HEIGHT {
                        upper[col] = '#';
                    } else {
                        lower[col] = '#';
                    }
                }
            }
        }

        let ground: String = std::iter::repeat_n('=', COLUMNS).collect();
        self.frame = format!(
            "{}\n{}\n{}",
            upper.iter().collect::<String>(),
            lower.iter().collect::<String>(),
            ground
        );
    }
}
