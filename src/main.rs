//! Cube Dash entry point
//!
//! Native headless runner: plays every built-in level with the autopilot at
//! the configured frame rate and logs how each run went.
//!
//! Usage: `cube-dash [settings.json]` (log level via `RUST_LOG`)

use cube_dash::consts::{MAX_SUBSTEPS, SIM_DT};
use cube_dash::renderer::{Renderer, TextRenderer};
use cube_dash::sim::{GameEvent, GameState, Scene, TickInput, tick};
use cube_dash::{FixedStep, Settings};

/// Ticks between text frames in the debug log
const FRAME_LOG_INTERVAL: u64 = 60;

struct LevelReport {
    outcome: Scene,
    ticks: u64,
    deaths: u32,
    effects: u32,
}

fn run_level(
    state: &mut GameState,
    index: usize,
    settings: &Settings,
    renderer: &mut TextRenderer,
) -> Option<LevelReport> {
    if !state.start_level(index) {
        return None;
    }

    let mut clock = FixedStep::new(SIM_DT, MAX_SUBSTEPS);
    let frame_dt = 1.0 / settings.frame_rate;
    let input = TickInput {
        autopilot: settings.autopilot,
        ..Default::default()
    };
    let start_tick = state.time_ticks;
    let mut report = LevelReport {
        outcome: Scene::Playing,
        ticks: 0,
        deaths: 0,
        effects: 0,
    };

    while state.scene == Scene::Playing && report.ticks < settings.max_ticks {
        for _ in 0..clock.advance(frame_dt) {
            tick(state, &input);
            if state.scene != Scene::Playing {
                break;
            }
        }
        report.ticks = state.time_ticks - start_tick;

        for event in state.drain_events() {
            match event {
                GameEvent::Died { distance } => {
                    report.deaths += 1;
                    log::debug!("Level {}: died at {:.0}px", index, distance);
                }
                GameEvent::Effect { .. } => report.effects += 1,
                GameEvent::SceneChanged { .. } => {}
            }
        }

        renderer.draw(state);
        if report.ticks % FRAME_LOG_INTERVAL == 0 {
            log::debug!("tick {}\n{}", report.ticks, renderer.frame());
        }
    }

    report.outcome = state.scene;
    state.go_menu();
    Some(report)
}

fn main() {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&path).unwrap_or_else(|e| {
            log::error!("{}; falling back to defaults", e);
            Settings::default()
        }),
        None => Settings::default(),
    }
    .sanitized();

    log::info!(
        "Cube Dash (headless) starting: seed {}, {} levels, {} fps",
        settings.seed,
        settings.levels.len(),
        settings.frame_rate
    );

    let mut state = GameState::with_levels(settings.seed, settings.levels.clone());
    state.effects_enabled = settings.effects;
    let mut renderer = TextRenderer::default();

    for (index, profile) in settings.levels.iter().copied().enumerate() {
        match run_level(&mut state, index, &settings, &mut renderer) {
            Some(report) if report.outcome == Scene::Complete => log::info!(
                "Level {} ({}s {}): complete in {} ticks, {} deaths, {} effects",
                index,
                profile.seconds,
                profile.tier.as_str(),
                report.ticks,
                report.deaths,
                report.effects
            ),
            Some(report) => log::warn!(
                "Level {} ({}s {}): gave up after {} ticks, {} deaths",
                index,
                profile.seconds,
                profile.tier.as_str(),
                report.ticks,
                report.deaths
            ),
            None => log::error!("Level {} could not be started", index),
        }
    }

    log::info!("Total attempts: {}", state.attempts);
}
