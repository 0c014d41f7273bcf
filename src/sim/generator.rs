//! Procedural level generation
//!
//! A level is a row of hand-tuned patterns laid out left to right from a
//! cursor. Pattern ids are drawn from a [`PatternSource`] with immediate
//! repeats rejected, so the same source always yields the same layout.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{Entity, EntityKind, World};
use crate::consts::*;

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Normal,
    Hard,
    Insane,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Normal => "normal",
            Tier::Hard => "hard",
            Tier::Insane => "insane",
        }
    }

    /// Distance between patterns; smaller is denser
    pub fn gap(&self) -> f32 {
        match self {
            Tier::Normal => 260.0,
            Tier::Hard => 220.0,
            Tier::Insane => 200.0,
        }
    }

    /// Triple spikes and portal combos are withheld on normal
    pub fn allows_advanced(&self) -> bool {
        *self != Tier::Normal
    }

    /// Multiplier carried by speed portals in the portal combo
    pub fn combo_speed_mult(&self) -> f32 {
        match self {
            Tier::Insane => 1.4,
            _ => 1.2,
        }
    }
}

/// Length and difficulty of one level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProfile {
    pub seconds: u32,
    #[serde(alias = "difficulty")]
    pub tier: Tier,
}

impl LevelProfile {
    pub const fn new(seconds: u32, tier: Tier) -> Self {
        Self { seconds, tier }
    }

    /// World length at baseline speed and the assumed tick rate. Lengths
    /// past `MAX_LEVEL_SECONDS` are capped.
    pub fn target_distance(&self) -> f32 {
        self.seconds.min(MAX_LEVEL_SECONDS) as f32 * BASE_SPEED * ASSUMED_TICKS_PER_SECOND
    }
}

/// Built-in level table
pub const BUILTIN_LEVELS: [LevelProfile; 3] = [
    LevelProfile::new(20, Tier::Normal),
    LevelProfile::new(28, Tier::Hard),
    LevelProfile::new(35, Tier::Insane),
];

pub fn default_levels() -> Vec<LevelProfile> {
    BUILTIN_LEVELS.to_vec()
}

/// Pattern table indexed by id
pub const PATTERNS: [Pattern; 5] = [
    Pattern::SingleSpike,
    Pattern::DoubleSpike,
    Pattern::PadSpike,
    Pattern::TripleSpike,
    Pattern::PortalCombo,
];

/// Number of distinct pattern ids
pub const PATTERN_COUNT: u8 = PATTERNS.len() as u8;

/// Layout building blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pattern {
    SingleSpike,
    DoubleSpike,
    PadSpike,
    TripleSpike,
    PortalCombo,
}

impl Pattern {
    /// Ids wrap modulo `PATTERN_COUNT`
    pub fn from_id(id: u8) -> Self {
        PATTERNS[(id % PATTERN_COUNT) as usize]
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    /// Next pattern in id order, wrapping
    pub fn successor(self) -> Self {
        Self::from_id(self.id() + 1)
    }

    /// Push this pattern's entities at `x`, returning the cursor advance
    fn emit(self, x: f32, tier: Tier, out: &mut Vec<Entity>) -> f32 {
        let gap = tier.gap();
        match self {
            Pattern::SingleSpike => {
                out.push(Entity::new(EntityKind::Spike, x));
                gap
            }
            Pattern::DoubleSpike => {
                out.push(Entity::new(EntityKind::Spike, x));
                out.push(Entity::new(EntityKind::Spike, x + 60.0));
                gap + 60.0
            }
            Pattern::PadSpike => {
                out.push(Entity::new(EntityKind::Pad, x - 60.0));
                out.push(Entity::new(EntityKind::Spike, x + 40.0));
                gap
            }
            Pattern::TripleSpike => {
                out.push(Entity::new(EntityKind::Spike, x));
                if tier.allows_advanced() {
                    out.push(Entity::new(EntityKind::Spike, x + 55.0));
                    out.push(Entity::new(EntityKind::Spike, x + 110.0));
                }
                gap + 80.0
            }
            Pattern::PortalCombo => {
                if tier.allows_advanced() {
                    out.push(Entity::new(EntityKind::GravityPortal, x));
                    out.push(Entity::speed_portal(x + 250.0, tier.combo_speed_mult()));
                    250.0 + gap + 120.0
                } else {
                    gap + 120.0
                }
            }
        }
    }
}

/// Supplies raw pattern ids in `0..PATTERN_COUNT`.
///
/// Ids outside the range wrap. The generator redraws when an id repeats the
/// previous pattern; after `MAX_PATTERN_REDRAWS` repeats in a row it takes the
/// following pattern instead, so any source terminates.
pub trait PatternSource {
    fn next_id(&mut self) -> u8;
}

/// Uniform pattern ids from a seeded PCG stream
#[derive(Debug, Clone)]
pub struct RandomPatterns {
    rng: Pcg32,
}

impl RandomPatterns {
    pub fn new(rng: Pcg32) -> Self {
        Self { rng }
    }
}

impl PatternSource for RandomPatterns {
    fn next_id(&mut self) -> u8 {
        self.rng.random_range(0..PATTERN_COUNT)
    }
}

/// Replays a fixed id sequence in a loop
#[derive(Debug, Clone)]
pub struct ScriptedPatterns {
    ids: Vec<u8>,
    cursor: usize,
}

impl ScriptedPatterns {
    pub fn new(ids: Vec<u8>) -> Self {
        Self { ids, cursor: 0 }
    }
}

impl PatternSource for ScriptedPatterns {
    fn next_id(&mut self) -> u8 {
        if self.ids.is_empty() {
            return 0;
        }
        let id = self.ids[self.cursor % self.ids.len()];
        self.cursor += 1;
        id
    }
}

/// A generated world plus the accepted pattern sequence
#[derive(Debug, Clone)]
pub struct GeneratedLevel {
    pub world: World,
    pub patterns: Vec<Pattern>,
}

/// Build a level for `profile`, drawing pattern ids from `source`
pub fn generate_level(profile: &LevelProfile, source: &mut impl PatternSource) -> GeneratedLevel {
    let target = profile.target_distance();
    let mut entities = Vec::new();
    let mut patterns = Vec::new();
    let mut last: Option<Pattern> = None;
    let mut x = LEVEL_START_X;
    let mut redraws = 0;

    while x < target - FINISH_CLEARANCE {
        let mut pattern = Pattern::from_id(source.next_id());
        if last == Some(pattern) {
            if redraws < MAX_PATTERN_REDRAWS {
                redraws += 1;
                continue;
            }
            log::debug!("Pattern source stuck on {:?}, stepping past it", pattern);
            pattern = pattern.successor();
        }
        redraws = 0;
        last = Some(pattern);
        patterns.push(pattern);
        x += pattern.emit(x, profile.tier, &mut entities);
    }

    log::info!(
        "Generated {}s {} level: {} entities over {} patterns, finish at {}",
        profile.seconds,
        profile.tier.as_str(),
        entities.len(),
        patterns.len(),
        target
    );

    GeneratedLevel {
        world: World::new(entities, target),
        patterns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn test_normal_level_has_no_portals() {
        for seed in 0..16 {
            let mut source = RandomPatterns::new(Pcg32::seed_from_u64(seed));
            let level = generate_level(&LevelProfile::new(20, Tier::Normal), &mut source);

            assert_eq!(level.world.finish_x, 7200.0);
            assert_eq!(level.world.count(EntityKind::GravityPortal), 0);
            assert_eq!(level.world.count(EntityKind::SpeedPortal), 0);
            assert!(!level.world.entities.is_empty());
        }
    }

    #[test]
    fn test_scripted_layout() {
        let mut source = ScriptedPatterns::new(vec![0, 1, 2, 3, 4]);
        let level = generate_level(&LevelProfile::new(5, Tier::Hard), &mut source);
        // target 1800, patterns run while x < 1300
        let xs: Vec<(EntityKind, f32)> = level
            .world
            .entities
            .iter()
            .map(|e| (e.kind, e.x))
            .collect();
        assert_eq!(
            xs,
            vec![
                (EntityKind::Spike, 600.0),
                (EntityKind::Spike, 820.0),
                (EntityKind::Spike, 880.0),
                (EntityKind::Pad, 1040.0),
                (EntityKind::Spike, 1140.0),
            ]
        );
        assert_eq!(
            level.patterns,
            vec![Pattern::SingleSpike, Pattern::DoubleSpike, Pattern::PadSpike]
        );
    }

    #[test]
    fn test_repeats_are_redrawn() {
        let mut source = ScriptedPatterns::new(vec![0, 0, 0, 1]);
        let level = generate_level(&LevelProfile::new(5, Tier::Normal), &mut source);
        assert_eq!(
            level.patterns,
            vec![Pattern::SingleSpike, Pattern::DoubleSpike, Pattern::SingleSpike]
        );
        // cursor: 600 -> 860 -> 1180 -> 1440
        assert_eq!(level.world.entities.len(), 4);
    }

    #[test]
    fn test_normal_tier_gating_consumes_distance() {
        let mut source = ScriptedPatterns::new(vec![4, 3]);
        let level = generate_level(&LevelProfile::new(5, Tier::Normal), &mut source);
        // combo emits nothing but advances 380; triple degrades to one spike
        assert_eq!(level.patterns, vec![Pattern::PortalCombo, Pattern::TripleSpike]);
        assert_eq!(level.world.entities, vec![Entity::new(EntityKind::Spike, 980.0)]);
    }

    #[test]
    fn test_portal_combo_multipliers() {
        for (tier, mult) in [(Tier::Hard, 1.2), (Tier::Insane, 1.4)] {
            let mut source = ScriptedPatterns::new(vec![4, 0]);
            let level = generate_level(&LevelProfile::new(5, tier), &mut source);
            let portal = &level.world.entities[1];
            assert_eq!(level.world.entities[0], Entity::new(EntityKind::GravityPortal, 600.0));
            assert_eq!(portal.kind, EntityKind::SpeedPortal);
            assert_eq!(portal.x, 850.0);
            assert_eq!(portal.speed_mult(), mult);
        }
    }

    #[test]
    fn test_triple_spike_on_hard() {
        let mut source = ScriptedPatterns::new(vec![3, 0]);
        let level = generate_level(&LevelProfile::new(5, Tier::Hard), &mut source);
        let xs: Vec<f32> = level.world.entities.iter().take(3).map(|e| e.x).collect();
        assert_eq!(xs, vec![600.0, 655.0, 710.0]);
        // next pattern starts after gap + 80
        assert_eq!(level.world.entities[3].x, 900.0);
    }

    #[test]
    fn test_same_seed_same_level() {
        let profile = LevelProfile::new(35, Tier::Insane);
        let a = generate_level(&profile, &mut RandomPatterns::new(Pcg32::seed_from_u64(42)));
        let b = generate_level(&profile, &mut RandomPatterns::new(Pcg32::seed_from_u64(42)));
        assert_eq!(a.world, b.world);
    }

    #[test]
    fn test_stuck_source_still_terminates() {
        for script in [vec![], vec![2]] {
            let level = generate_level(
                &LevelProfile::new(20, Tier::Normal),
                &mut ScriptedPatterns::new(script),
            );
            assert_eq!(level.world.finish_x, 7200.0);
            assert!(level.patterns.len() > 1);
            for pair in level.patterns.windows(2) {
                assert_ne!(pair[0], pair[1]);
            }
        }

        let mut source = ScriptedPatterns::new(vec![2]);
        let level = generate_level(&LevelProfile::new(5, Tier::Normal), &mut source);
        assert_eq!(level.patterns[..2], [Pattern::PadSpike, Pattern::TripleSpike]);
    }

    #[test]
    fn test_ids_wrap() {
        assert_eq!(Pattern::from_id(7), Pattern::PadSpike);
        assert_eq!(Pattern::PortalCombo.successor(), Pattern::SingleSpike);
    }

    #[test]
    fn test_level_length_capped() {
        let capped = LevelProfile::new(MAX_LEVEL_SECONDS, Tier::Hard);
        let huge = LevelProfile::new(u32::MAX, Tier::Hard);
        assert_eq!(huge.target_distance(), capped.target_distance());
        let level = generate_level(&huge, &mut RandomPatterns::new(Pcg32::seed_from_u64(3)));
        assert_eq!(level.world.finish_x, 216_000.0);
    }

    #[test]
    fn test_profile_json_accepts_difficulty_alias() {
        let profile: LevelProfile =
            serde_json::from_str(r#"{"seconds":28,"difficulty":"hard"}"#).unwrap();
        assert_eq!(profile, LevelProfile::new(28, Tier::Hard));
    }

    proptest! {
        #[test]
        fn prop_no_consecutive_repeats(
            script in prop::collection::vec(0u8..PATTERN_COUNT, 2..24),
            tier_idx in 0usize..3,
        ) {
            prop_assume!(script.iter().any(|&id| id != script[0]));
            let tier = [Tier::Normal, Tier::Hard, Tier::Insane][tier_idx];
            let level = generate_level(
                &LevelProfile::new(20, tier),
                &mut ScriptedPatterns::new(script),
            );
            for pair in level.patterns.windows(2) {
                prop_assert_ne!(pair[0], pair[1]);
            }
            prop_assert_eq!(level.world.finish_x, 7200.0);
        }

        #[test]
        fn prop_entities_stay_before_finish(seed in any::<u64>()) {
            let profile = LevelProfile::new(28, Tier::Hard);
            let level = generate_level(&profile, &mut RandomPatterns::new(Pcg32::seed_from_u64(seed)));
            let max_x = level.world.max_x().unwrap_or(0.0);
            prop_assert!(max_x < level.world.finish_x);
        }
    }
}
