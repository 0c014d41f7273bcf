//! Rendering boundary
//!
//! The simulation never waits on a renderer: a frame is drawn from the
//! current state after the tick and nothing flows back.

pub mod text;

pub use text::TextRenderer;

use crate::sim::GameState;

/// Draws one frame of the current session
pub trait Renderer {
    fn draw(&mut self, state: &GameState);
}
