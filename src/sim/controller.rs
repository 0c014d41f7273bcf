//! Run controller: scene transitions and attempt lifecycle
//!
//! Scenes: Menu, Playing, Complete, Editor. A death is not a scene; it
//! rebuilds the attempt in place and play continues.

use super::editor::{EditorCommand, EditorSession};
use super::generator::{RandomPatterns, generate_level};
use super::state::{Attempt, EffectColor, GameEvent, GameState, Scene, World};

impl GameState {
    fn set_scene(&mut self, to: Scene) {
        let from = self.scene;
        if from != to {
            log::info!("Scene {:?} -> {:?}", from, to);
            self.scene = to;
            self.events.push(GameEvent::SceneChanged { from, to });
        }
    }

    /// Generate a fresh layout for a built-in level on the next RNG stream
    fn build_builtin(&mut self, index: usize) -> Option<World> {
        let profile = *self.levels.get(index)?;
        let mut patterns = RandomPatterns::new(self.rng_state.next_rng());
        Some(generate_level(&profile, &mut patterns).world)
    }

    /// Start a built-in level from the menu or the complete screen. An
    /// unknown index routes to the menu.
    pub fn start_level(&mut self, index: usize) -> bool {
        if !matches!(self.scene, Scene::Menu | Scene::Complete) {
            log::debug!("Start of level {} ignored in {:?}", index, self.scene);
            return false;
        }
        let Some(world) = self.build_builtin(index) else {
            log::warn!(
                "Level {} does not exist ({} defined), returning to menu",
                index,
                self.levels.len()
            );
            self.go_menu();
            return false;
        };

        self.is_custom_level = false;
        self.custom_world = None;
        self.editor = None;
        self.current_level = index;
        self.attempts += 1;
        self.jump_queued = false;
        self.run = Attempt::new(world);
        log::info!("Starting level {} (attempt {})", index, self.attempts);
        self.set_scene(Scene::Playing);
        true
    }

    /// Leave whatever is running and show the menu. In-progress worlds and
    /// editor contents are discarded.
    pub fn go_menu(&mut self) {
        self.editor = None;
        self.is_custom_level = false;
        self.custom_world = None;
        self.jump_queued = false;
        self.run = Attempt::new(World::default());
        self.set_scene(Scene::Menu);
    }

    /// Open an empty editor from the menu
    pub fn open_editor(&mut self) -> bool {
        if self.scene != Scene::Menu {
            return false;
        }
        self.editor = Some(EditorSession::new());
        self.run = Attempt::new(World::default());
        self.set_scene(Scene::Editor);
        true
    }

    /// Route an editor command; playtest hands over to the run controller
    pub fn editor_command(&mut self, command: EditorCommand) -> bool {
        if command == EditorCommand::Playtest {
            return self.playtest();
        }
        match self.editor.as_mut() {
            Some(editor) if self.scene == Scene::Editor => {
                editor.apply(command);
                true
            }
            _ => false,
        }
    }

    /// Play the authored world. Ignored while the editor is empty.
    pub fn playtest(&mut self) -> bool {
        if self.scene != Scene::Editor {
            return false;
        }
        let Some(world) = self.editor.as_ref().and_then(EditorSession::playtest) else {
            log::debug!("Playtest ignored: nothing placed");
            return false;
        };

        log::info!(
            "Playtesting custom level: {} entities, finish at {}",
            world.entities.len(),
            world.finish_x
        );
        self.editor = None;
        self.is_custom_level = true;
        self.jump_queued = false;
        self.run = Attempt::new(world.clone());
        self.custom_world = Some(world);
        self.set_scene(Scene::Playing);
        true
    }

    /// Replay the finished run's source from the complete screen
    pub fn retry(&mut self) -> bool {
        if self.scene != Scene::Complete {
            return false;
        }
        if self.is_custom_level {
            let Some(world) = self.custom_world.clone() else {
                self.go_menu();
                return false;
            };
            self.jump_queued = false;
            self.run = Attempt::new(world);
            self.set_scene(Scene::Playing);
            true
        } else {
            self.start_level(self.current_level)
        }
    }

    /// Advance to the next built-in level, or the menu after the last one
    pub fn next_level(&mut self) -> bool {
        if self.scene != Scene::Complete {
            return false;
        }
        let next = self.current_level + 1;
        if self.is_custom_level || next >= self.levels.len() {
            self.go_menu();
            return false;
        }
        self.start_level(next)
    }

    /// Queue a jump for the next tick. Only honored while playing.
    pub fn request_jump(&mut self) {
        if self.scene == Scene::Playing {
            self.jump_queued = true;
        }
    }

    /// Back out to the menu from play or the editor
    pub fn request_cancel(&mut self) {
        if matches!(self.scene, Scene::Playing | Scene::Editor) {
            self.go_menu();
        }
    }

    /// Spike hit: rebuild the attempt from the same source. The attempt
    /// counter is left alone.
    pub(crate) fn restart_after_death(&mut self) {
        let distance = self.run.distance();
        let world = if self.is_custom_level {
            self.custom_world.clone()
        } else {
            self.build_builtin(self.current_level)
        };
        let Some(world) = world else {
            self.go_menu();
            return;
        };

        log::debug!("Died at distance {:.0}, restarting", distance);
        self.events.push(GameEvent::Died { distance });
        self.jump_queued = false;
        self.run = Attempt::new(world);
    }

    pub(crate) fn complete_level(&mut self) {
        log::info!(
            "Level complete after {:.0}px (attempt {})",
            self.run.distance(),
            self.attempts
        );
        self.emit_effect(EffectColor::Finish);
        self.set_scene(Scene::Complete);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EntityKind;

    #[test]
    fn test_start_level_counts_attempts() {
        let mut state = GameState::new(1);
        assert!(state.start_level(0));
        assert_eq!(state.scene, Scene::Playing);
        assert_eq!(state.attempts, 1);
        assert_eq!(state.run.world.finish_x, 7200.0);

        state.go_menu();
        assert!(state.start_level(1));
        assert_eq!(state.attempts, 2);
        assert_eq!(state.current_level, 1);
    }

    #[test]
    fn test_unknown_level_routes_to_menu() {
        let mut state = GameState::new(1);
        state.start_level(0);
        state.complete_level();
        assert!(!state.start_level(9));
        assert_eq!(state.scene, Scene::Menu);
        assert_eq!(state.attempts, 1);
    }

    #[test]
    fn test_start_level_only_from_menu_or_complete() {
        let mut state = GameState::new(1);
        assert!(state.start_level(0));
        let world = state.run.world.clone();
        assert!(!state.start_level(1));
        assert_eq!(state.attempts, 1);
        assert_eq!(state.current_level, 0);
        assert_eq!(state.run.world, world);

        state.go_menu();
        state.open_editor();
        if let Some(editor) = state.editor.as_mut() {
            editor.place(500.0);
        }
        assert!(!state.start_level(0));
        assert_eq!(state.scene, Scene::Editor);
        assert_eq!(state.editor.as_ref().map(|e| e.entities.len()), Some(1));
    }

    #[test]
    fn test_next_level_past_last_goes_to_menu() {
        let mut state = GameState::new(1);
        state.start_level(2);
        state.complete_level();
        assert!(!state.next_level());
        assert_eq!(state.scene, Scene::Menu);
    }

    #[test]
    fn test_next_level_advances() {
        let mut state = GameState::new(1);
        state.start_level(0);
        state.complete_level();
        assert!(state.next_level());
        assert_eq!(state.current_level, 1);
        assert_eq!(state.scene, Scene::Playing);
    }

    #[test]
    fn test_jump_only_queued_while_playing() {
        let mut state = GameState::new(1);
        state.request_jump();
        assert!(!state.jump_queued);

        state.start_level(0);
        state.request_jump();
        state.request_jump();
        assert!(state.jump_queued);
    }

    #[test]
    fn test_empty_playtest_is_rejected() {
        let mut state = GameState::new(1);
        assert!(state.open_editor());
        assert!(!state.editor_command(EditorCommand::Playtest));
        assert_eq!(state.scene, Scene::Editor);
    }

    #[test]
    fn test_editor_discarded_on_cancel() {
        let mut state = GameState::new(1);
        state.open_editor();
        if let Some(editor) = state.editor.as_mut() {
            editor.place(500.0);
        }
        state.request_cancel();
        assert_eq!(state.scene, Scene::Menu);
        assert!(state.editor.is_none());

        state.open_editor();
        assert_eq!(state.editor.as_ref().map(|e| e.entities.len()), Some(0));
    }

    #[test]
    fn test_custom_retry_replays_same_world() {
        let mut state = GameState::new(1);
        state.open_editor();
        if let Some(editor) = state.editor.as_mut() {
            editor.switch_tool(EntityKind::Pad);
            editor.place(800.0);
        }
        assert!(state.playtest());
        let world = state.run.world.clone();
        assert_eq!(state.attempts, 0);

        state.complete_level();
        assert!(state.retry());
        assert_eq!(state.run.world, world);
        assert_eq!(state.run.camera_x, 0.0);

        state.complete_level();
        assert!(!state.next_level());
        assert_eq!(state.scene, Scene::Menu);
    }

    #[test]
    fn test_scene_events() {
        let mut state = GameState::new(1);
        state.start_level(0);
        state.go_menu();
        let scenes: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::SceneChanged { from, to } => Some((from, to)),
                _ => None,
            })
            .collect();
        assert_eq!(
            scenes,
            vec![(Scene::Menu, Scene::Playing), (Scene::Playing, Scene::Menu)]
        );
    }
}
