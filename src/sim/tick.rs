//! Per-frame simulation driver
//!
//! Wires the world, character, spawner, resolver and chaser together, in a
//! fixed order, and hands the frame's accumulated events to the UI
//! collaborator. The orchestrator is the only caller of cross-component
//! methods; every entity keeps a single owner.

use super::collision::{Outcome, resolve};
use super::input::InputIntent;
use super::player::{BuffKind, StatusEvent};
use super::spawn::Hit;
use super::state::GameState;

/// Everything the UI needs to know about one frame, drained once and never
/// persisted across frames
#[derive(Debug, Clone, Default)]
pub struct FrameEvents {
    /// Buff/debuff start and end notifications
    pub status: Vec<StatusEvent>,
    /// Coins banked this frame (contact and magnet combined)
    pub coins: u32,
    /// Powerups picked up this frame
    pub powerups: Vec<BuffKind>,
    /// Consequences of obstacle overlaps that resolved to anything
    pub impacts: Vec<Outcome>,
    /// The run ended this frame
    pub game_over: bool,
}

impl FrameEvents {
    /// Fold another tick's events in. A rendered frame may run several
    /// substeps; nothing from any of them is dropped.
    pub fn absorb(&mut self, mut other: FrameEvents) {
        self.status.append(&mut other.status);
        self.coins += other.coins;
        self.powerups.append(&mut other.powerups);
        self.impacts.append(&mut other.impacts);
        self.game_over |= other.game_over;
    }
}

/// Advance the simulation by one frame of `dt` seconds
pub fn tick(state: &mut GameState, intent: &mut InputIntent, dt: f32) -> FrameEvents {
    let mut events = FrameEvents::default();

    // Swipe holds expire on frame time even outside a run
    intent.tick_transients(dt);

    if !state.is_running() {
        return events;
    }

    state.world.update(dt);
    state.score.update(dt, state.world.speed);
    state.player.update(dt, intent, &state.config);
    state
        .spawner
        .update(dt, state.world.speed, state.world.distance, &mut state.rng);

    if let Some(buff) = state.spawner.check_powerup_contact(state.player.pos) {
        state.player.activate(buff);
        events.powerups.push(buff);
    }

    if state.player.has_magnet {
        let pulled = state.spawner.magnet_sweep(state.player.pos, dt);
        state.score.add_coins(pulled);
        events.coins += pulled;
    }

    match state.spawner.check_collisions(state.player.pos) {
        Some(Hit::Coin) => {
            state.score.add_coins(1);
            events.coins += 1;
        }
        Some(Hit::Obstacle { kind, index }) => {
            let outcome = resolve(
                kind,
                state.player.is_sliding(),
                state.player.has_shield,
                state.player.has_ward,
                state.chaser.chasing,
            );
            apply_outcome(state, outcome, index);
            if outcome != Outcome::SafePass {
                events.impacts.push(outcome);
            }
            if outcome == Outcome::Fatal {
                events.game_over = true;
            }
        }
        None => {}
    }

    state.chaser.update(dt, state.player.pos.x);
    state.flash.update(dt);

    events.status = state.player.drain_events();
    events
}

fn apply_outcome(state: &mut GameState, outcome: Outcome, index: usize) {
    match outcome {
        Outcome::SafePass => {}
        Outcome::Confused => {
            state.player.activate_confusion();
            state.spawner.remove_obstacle(index);
        }
        Outcome::Shielded => {
            state.spawner.remove_obstacle(index);
        }
        Outcome::WardSpent => {
            state.player.consume_ward();
            state.spawner.remove_obstacle(index);
        }
        Outcome::Chase => {
            state.chaser.start_chase();
            state.flash.trigger();
            state.spawner.remove_obstacle(index);
        }
        Outcome::Fatal => {
            state.game_over();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::spawn::{Obstacle, ObstacleKind};
    use crate::sim::state::{FlashState, GamePhase};
    use glam::Vec3;

    fn playing_state() -> GameState {
        let mut state = GameState::new(42);
        state.start();
        // Park the spawn cadence so tests control the arena contents
        state.spawner.spawn_timer = 1_000.0;
        state
    }

    fn plant(state: &mut GameState, kind: ObstacleKind, z: f32) {
        state.spawner.obstacles.push(Obstacle {
            kind,
            pos: Vec3::new(state.player.pos.x, 0.0, z),
            spin: 0.0,
            caption: None,
        });
    }

    #[test]
    fn paused_tick_changes_nothing_observable() {
        let mut state = playing_state();
        let mut intent = InputIntent::new();
        state.set_paused(true);

        let speed = state.world.speed;
        let distance = state.world.distance;
        let score = state.score.score;
        let lane = state.player.lane;
        let events = tick(&mut state, &mut intent, 0.5);

        assert_eq!(state.world.speed, speed);
        assert_eq!(state.world.distance, distance);
        assert_eq!(state.score.score, score);
        assert_eq!(state.player.lane, lane);
        assert!(events.status.is_empty());
        assert_eq!(events.coins, 0);
    }

    #[test]
    fn world_accelerates_and_score_accrues() {
        let mut state = playing_state();
        let mut intent = InputIntent::new();
        tick(&mut state, &mut intent, 1.0);
        assert!((state.world.speed - (START_SPEED + ACCELERATION)).abs() < 1e-4);
        assert!(state.score.score > 0.0);
    }

    #[test]
    fn coin_overlap_banks_exactly_one() {
        let mut state = playing_state();
        let mut intent = InputIntent::new();
        plant(&mut state, ObstacleKind::Coin, 0.0);
        plant(&mut state, ObstacleKind::Coin, -50.0);

        let events = tick(&mut state, &mut intent, 1.0 / 120.0);
        assert_eq!(events.coins, 1);
        assert_eq!(state.score.coins, 1);
        // The far coin is untouched
        assert_eq!(
            state
                .spawner
                .obstacles
                .iter()
                .filter(|o| o.kind == ObstacleKind::Coin)
                .count(),
            1
        );
    }

    #[test]
    fn first_hit_starts_chase_second_ends_run() {
        let mut state = playing_state();
        let mut intent = InputIntent::new();

        plant(&mut state, ObstacleKind::Van, 0.0);
        let events = tick(&mut state, &mut intent, 1.0 / 120.0);
        assert_eq!(events.impacts, vec![Outcome::Chase]);
        assert!(state.chaser.chasing);
        assert_eq!(state.chaser.timer, CHASE_DURATION - 1.0 / 120.0);
        assert!(state.flash.is_flashing());
        assert_eq!(state.phase, GamePhase::Playing);

        plant(&mut state, ObstacleKind::Billboard, 0.0);
        let events = tick(&mut state, &mut intent, 1.0 / 120.0);
        assert_eq!(events.impacts, vec![Outcome::Fatal]);
        assert!(events.game_over);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn shield_absorbs_hits_without_chase() {
        let mut state = playing_state();
        let mut intent = InputIntent::new();
        state.player.activate(BuffKind::Shield);

        plant(&mut state, ObstacleKind::Van, 0.0);
        let events = tick(&mut state, &mut intent, 1.0 / 120.0);
        assert_eq!(events.impacts, vec![Outcome::Shielded]);
        assert!(!state.chaser.chasing);
        assert!(state.spawner.obstacles.is_empty());
    }

    #[test]
    fn ward_spends_on_first_hit_only() {
        let mut state = playing_state();
        let mut intent = InputIntent::new();
        state.player.activate(BuffKind::Ward);

        plant(&mut state, ObstacleKind::Van, 0.0);
        let events = tick(&mut state, &mut intent, 1.0 / 120.0);
        assert_eq!(events.impacts, vec![Outcome::WardSpent]);
        assert!(!state.player.has_ward);

        plant(&mut state, ObstacleKind::Van, 0.0);
        let events = tick(&mut state, &mut intent, 1.0 / 120.0);
        assert_eq!(events.impacts, vec![Outcome::Chase]);
    }

    #[test]
    fn sliding_passes_cleanly_under_scaffold() {
        let mut state = playing_state();
        let mut intent = InputIntent::new();
        state.player.slide_timer = SLIDE_DURATION;

        plant(&mut state, ObstacleKind::Scaffold, 0.0);
        let events = tick(&mut state, &mut intent, 1.0 / 120.0);
        assert!(events.impacts.is_empty());
        assert!(!state.chaser.chasing);
        assert_eq!(state.spawner.obstacles.len(), 1, "safe pass leaves entity");
    }

    #[test]
    fn spill_confuses_and_is_removed() {
        let mut state = playing_state();
        let mut intent = InputIntent::new();

        plant(&mut state, ObstacleKind::Spill, 0.0);
        let events = tick(&mut state, &mut intent, 1.0 / 120.0);
        assert_eq!(events.impacts, vec![Outcome::Confused]);
        assert!(state.player.is_confused());
        assert!(state.spawner.obstacles.is_empty());
        // Start event reaches the UI the same frame
        assert!(
            events
                .status
                .iter()
                .any(|e| e.effect == crate::sim::player::EffectKind::Confusion)
        );
    }

    #[test]
    fn absorb_keeps_every_substep_event() {
        let mut state = playing_state();
        let mut intent = InputIntent::new();

        // Two substeps of one rendered frame, each with its own impact
        let mut frame = FrameEvents::default();
        plant(&mut state, ObstacleKind::Spill, 0.0);
        frame.absorb(tick(&mut state, &mut intent, 1.0 / 120.0));
        plant(&mut state, ObstacleKind::Van, 0.0);
        frame.absorb(tick(&mut state, &mut intent, 1.0 / 120.0));

        assert_eq!(frame.impacts, vec![Outcome::Confused, Outcome::Chase]);
        assert_eq!(frame.status.len(), 1, "confusion start survives the fold");
    }

    #[test]
    fn status_events_drain_exactly_once() {
        let mut state = playing_state();
        let mut intent = InputIntent::new();
        state.player.activate(BuffKind::Magnet);

        let events = tick(&mut state, &mut intent, 1.0 / 120.0);
        assert_eq!(events.status.len(), 1);
        let events = tick(&mut state, &mut intent, 1.0 / 120.0);
        assert!(events.status.is_empty());
    }

    #[test]
    fn magnet_collects_without_contact() {
        let mut state = playing_state();
        let mut intent = InputIntent::new();
        state.player.activate(BuffKind::Magnet);
        plant(&mut state, ObstacleKind::Coin, -6.0);

        let mut banked = 0;
        for _ in 0..120 {
            banked += tick(&mut state, &mut intent, 1.0 / 120.0).coins;
        }
        assert_eq!(banked, 1);
    }

    #[test]
    fn flash_clears_after_duration_of_ticks() {
        let mut state = playing_state();
        let mut intent = InputIntent::new();
        plant(&mut state, ObstacleKind::Van, 0.0);
        tick(&mut state, &mut intent, 1.0 / 120.0);
        assert!(state.flash.is_flashing());

        for _ in 0..((FLASH_DURATION * 120.0) as usize + 2) {
            tick(&mut state, &mut intent, 1.0 / 120.0);
        }
        assert_eq!(state.flash, FlashState::Normal);
    }
}
