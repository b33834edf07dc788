//! Player character: lane movement, jump/slide physics, status effects
//!
//! Owns its own motion and timers exclusively; collision consequences are
//! decided by the resolver, not here.

use glam::Vec3;

use super::input::{Direction, InputIntent};
use super::state::SimConfig;
use crate::consts::*;
use crate::ease_toward;

/// Temporary positive status effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuffKind {
    /// Invulnerability: standard hits destroy the obstacle with no consequence
    Shield,
    /// Pulls nearby coins toward the character
    Magnet,
    /// Absorbs exactly one standard hit, then expires
    Ward,
}

impl BuffKind {
    pub fn duration(self) -> f32 {
        match self {
            BuffKind::Shield => SHIELD_DURATION,
            BuffKind::Magnet => MAGNET_DURATION,
            BuffKind::Ward => WARD_DURATION,
        }
    }
}

/// Every effect that shows up in the status HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Shield,
    Magnet,
    Ward,
    Confusion,
}

impl EffectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EffectKind::Shield => "shield",
            EffectKind::Magnet => "magnet",
            EffectKind::Ward => "ward",
            EffectKind::Confusion => "confusion",
        }
    }
}

impl From<BuffKind> for EffectKind {
    fn from(buff: BuffKind) -> Self {
        match buff {
            BuffKind::Shield => EffectKind::Shield,
            BuffKind::Magnet => EffectKind::Magnet,
            BuffKind::Ward => EffectKind::Ward,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPhase {
    Started,
    Ended,
}

/// Status change, queued for the UI collaborator and drained once per frame
#[derive(Debug, Clone, Copy)]
pub struct StatusEvent {
    pub phase: StatusPhase,
    pub effect: EffectKind,
    /// Full duration at activation; 0 for end events
    pub duration: f32,
}

#[derive(Debug, Clone)]
pub struct Player {
    /// Lane index, always in [0, 2]
    pub lane: usize,
    pub pos: Vec3,
    pub vel_y: f32,
    pub grounded: bool,
    /// Sliding while > 0
    pub slide_timer: f32,

    pub has_shield: bool,
    pub has_magnet: bool,
    pub has_ward: bool,
    pub shield_timer: f32,
    pub magnet_timer: f32,
    pub ward_timer: f32,
    pub confusion_timer: f32,

    /// Run-cycle phase for the render collaborator
    pub run_phase: f32,

    events: Vec<StatusEvent>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            lane: 1,
            pos: Vec3::ZERO,
            vel_y: 0.0,
            grounded: true,
            slide_timer: 0.0,
            has_shield: false,
            has_magnet: false,
            has_ward: false,
            shield_timer: 0.0,
            magnet_timer: 0.0,
            ward_timer: 0.0,
            confusion_timer: 0.0,
            run_phase: 0.0,
            events: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// World x of the current lane target
    pub fn target_x(&self) -> f32 {
        LANE_X[self.lane]
    }

    pub fn is_sliding(&self) -> bool {
        self.slide_timer > 0.0
    }

    pub fn is_confused(&self) -> bool {
        self.confusion_timer > 0.0
    }

    /// Activate (or re-arm) a buff and queue the start event
    pub fn activate(&mut self, buff: BuffKind) {
        let duration = buff.duration();
        match buff {
            BuffKind::Shield => {
                self.has_shield = true;
                self.shield_timer = duration;
            }
            BuffKind::Magnet => {
                self.has_magnet = true;
                self.magnet_timer = duration;
            }
            BuffKind::Ward => {
                self.has_ward = true;
                self.ward_timer = duration;
            }
        }
        self.events.push(StatusEvent {
            phase: StatusPhase::Started,
            effect: buff.into(),
            duration,
        });
    }

    /// Activate (or re-arm) the input-inversion debuff
    pub fn activate_confusion(&mut self) {
        self.confusion_timer = CONFUSION_DURATION;
        self.events.push(StatusEvent {
            phase: StatusPhase::Started,
            effect: EffectKind::Confusion,
            duration: CONFUSION_DURATION,
        });
    }

    /// Spend the ward on a hit. No-op if not active.
    pub fn consume_ward(&mut self) {
        if self.has_ward {
            self.has_ward = false;
            self.ward_timer = 0.0;
            self.push_end(EffectKind::Ward);
        }
    }

    /// Drained exactly once per frame by the orchestrator
    pub fn drain_events(&mut self) -> Vec<StatusEvent> {
        std::mem::take(&mut self.events)
    }

    fn push_end(&mut self, effect: EffectKind) {
        self.events.push(StatusEvent {
            phase: StatusPhase::Ended,
            effect,
            duration: 0.0,
        });
    }

    pub fn update(&mut self, dt: f32, intent: &mut InputIntent, cfg: &SimConfig) {
        self.tick_status(dt);

        // Read every edge exactly once, then cross-assign under confusion
        let mut move_left = intent.take_pressed(Direction::Left);
        let mut move_right = intent.take_pressed(Direction::Right);
        let mut jump = intent.take_pressed(Direction::Up);
        let mut slide = intent.take_pressed(Direction::Down);
        if self.is_confused() {
            std::mem::swap(&mut move_left, &mut move_right);
            std::mem::swap(&mut jump, &mut slide);
        }

        // Lane switching, clamped to the three lanes
        if move_left && self.lane > 0 {
            self.lane -= 1;
        }
        if move_right && self.lane < 2 {
            self.lane += 1;
        }
        self.pos.x = ease_toward(self.pos.x, self.target_x(), LANE_GAIN, dt);

        if jump && self.grounded {
            self.vel_y = JUMP_FORCE;
            self.grounded = false;
        }

        if self.slide_timer > 0.0 {
            self.slide_timer -= dt;
            if self.slide_timer <= 0.0 {
                self.slide_timer = 0.0;
                // The lowered floor leaves with the slide; stand back up
                if self.grounded {
                    self.pos.y = 0.0;
                }
            }
        }
        if slide {
            if self.grounded {
                self.slide_timer = SLIDE_DURATION;
            } else if cfg.air_slide {
                // Slide-cancel: convert the jump into a fast controlled drop
                self.slide_timer = SLIDE_DURATION;
                self.vel_y = self.vel_y.min(-JUMP_FORCE * 0.5);
            }
        }

        if !self.grounded {
            self.vel_y += GRAVITY * dt;
            self.pos.y += self.vel_y * dt;

            let ground_y = if self.is_sliding() { SLIDE_GROUND_Y } else { 0.0 };
            if self.pos.y <= ground_y {
                self.pos.y = ground_y;
                self.vel_y = 0.0;
                self.grounded = true;
            }
        }

        if self.grounded && !self.is_sliding() {
            self.run_phase += dt * 10.0;
        }
    }

    /// Count down every status timer; each expiry emits exactly one end event
    fn tick_status(&mut self, dt: f32) {
        if self.has_shield {
            self.shield_timer -= dt;
            if self.shield_timer <= 0.0 {
                self.shield_timer = 0.0;
                self.has_shield = false;
                self.push_end(EffectKind::Shield);
            }
        }
        if self.has_magnet {
            self.magnet_timer -= dt;
            if self.magnet_timer <= 0.0 {
                self.magnet_timer = 0.0;
                self.has_magnet = false;
                self.push_end(EffectKind::Magnet);
            }
        }
        if self.has_ward {
            self.ward_timer -= dt;
            if self.ward_timer <= 0.0 {
                self.ward_timer = 0.0;
                self.has_ward = false;
                self.push_end(EffectKind::Ward);
            }
        }
        if self.confusion_timer > 0.0 {
            self.confusion_timer -= dt;
            if self.confusion_timer <= 0.0 {
                self.confusion_timer = 0.0;
                self.push_end(EffectKind::Confusion);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::Direction;

    fn cfg() -> SimConfig {
        SimConfig::default()
    }

    #[test]
    fn lane_index_clamped_at_edges() {
        let mut player = Player::new();
        let mut intent = InputIntent::new();

        intent.press(Direction::Left);
        player.update(0.016, &mut intent, &cfg());
        assert_eq!(player.lane, 0);

        // Further left presses are a no-op at lane 0
        intent.release(Direction::Left);
        intent.press(Direction::Left);
        player.update(0.016, &mut intent, &cfg());
        assert_eq!(player.lane, 0);
    }

    #[test]
    fn lateral_position_converges_without_overshoot() {
        let mut player = Player::new();
        let mut intent = InputIntent::new();
        intent.press(Direction::Right);
        player.update(0.001, &mut intent, &cfg());
        assert_eq!(player.lane, 2);

        let target = player.target_x();
        let mut prev_gap = (target - player.pos.x).abs();
        for _ in 0..2000 {
            player.update(0.005, &mut intent, &cfg());
            let gap = (target - player.pos.x).abs();
            assert!(gap <= prev_gap + f32::EPSILON, "approach must be monotonic");
            assert!(player.pos.x <= target + f32::EPSILON, "must not overshoot");
            prev_gap = gap;
        }
        assert!(prev_gap < 1e-3);
    }

    #[test]
    fn jump_only_while_grounded() {
        let mut player = Player::new();
        let mut intent = InputIntent::new();

        intent.press(Direction::Up);
        player.update(0.016, &mut intent, &cfg());
        assert!(!player.grounded);
        assert!(player.vel_y > 0.0);

        // Mid-air up press is ignored
        intent.release(Direction::Up);
        intent.press(Direction::Up);
        let vel_before = player.vel_y;
        player.update(0.016, &mut intent, &cfg());
        assert!(player.vel_y < vel_before);
    }

    #[test]
    fn jump_arc_returns_to_ground() {
        let mut player = Player::new();
        let mut intent = InputIntent::new();
        intent.press(Direction::Up);

        let mut peak: f32 = 0.0;
        for _ in 0..600 {
            player.update(1.0 / 120.0, &mut intent, &cfg());
            peak = peak.max(player.pos.y);
        }
        assert!(peak > 1.0);
        assert!(player.grounded);
        assert_eq!(player.pos.y, 0.0);
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn slide_sets_timer_and_lowers_ground() {
        let mut player = Player::new();
        let mut intent = InputIntent::new();
        intent.press(Direction::Down);
        player.update(0.0, &mut intent, &cfg());
        assert_eq!(player.slide_timer, SLIDE_DURATION);
        assert!(player.is_sliding());

        // A falling character clamps to the slide-lowered ground level
        player.grounded = false;
        player.pos.y = 0.1;
        player.vel_y = -5.0;
        for _ in 0..4 {
            player.update(0.05, &mut intent, &cfg());
        }
        assert!(player.grounded);
        assert_eq!(player.pos.y, SLIDE_GROUND_Y);
    }

    #[test]
    fn slide_end_restores_standing_ground_level() {
        let mut player = Player::new();
        let mut intent = InputIntent::new();
        intent.press(Direction::Down);
        player.update(0.016, &mut intent, &cfg());
        assert!(player.is_sliding());

        // Land on the lowered floor mid-slide
        player.grounded = false;
        player.pos.y = 0.1;
        player.vel_y = -5.0;
        for _ in 0..4 {
            player.update(0.05, &mut intent, &cfg());
        }
        assert_eq!(player.pos.y, SLIDE_GROUND_Y);

        // Once the slide lapses the character stands at street level again
        for _ in 0..20 {
            player.update(0.05, &mut intent, &cfg());
        }
        assert!(!player.is_sliding());
        assert!(player.grounded);
        assert_eq!(player.pos.y, 0.0);
    }

    #[test]
    fn air_slide_gated_by_config() {
        let mut intent = InputIntent::new();

        let mut player = Player::new();
        player.grounded = false;
        player.pos.y = 1.0;
        intent.press(Direction::Down);
        player.update(0.016, &mut intent, &cfg());
        assert!(!player.is_sliding(), "air slide disabled by default");

        let mut player = Player::new();
        player.grounded = false;
        player.pos.y = 1.0;
        player.vel_y = 5.0;
        intent.release(Direction::Down);
        intent.press(Direction::Down);
        let air_cfg = SimConfig { air_slide: true };
        player.update(0.016, &mut intent, &air_cfg);
        assert!(player.is_sliding());
        assert!(player.vel_y < 0.0, "slide-cancel forces a drop");
    }

    #[test]
    fn buff_expires_once_with_end_event() {
        let mut player = Player::new();
        let mut intent = InputIntent::new();

        player.activate(BuffKind::Shield);
        let events = player.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].effect, EffectKind::Shield);
        assert_eq!(events[0].duration, SHIELD_DURATION);

        player.update(SHIELD_DURATION + 0.1, &mut intent, &cfg());
        assert!(!player.has_shield);
        assert_eq!(player.shield_timer, 0.0);
        let events = player.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].phase, StatusPhase::Ended);

        // Timer stays at zero, no repeated end events
        player.update(1.0, &mut intent, &cfg());
        assert!(player.drain_events().is_empty());
    }

    #[test]
    fn reactivation_rearms_instead_of_stacking() {
        let mut player = Player::new();
        let mut intent = InputIntent::new();
        player.activate(BuffKind::Magnet);
        player.update(MAGNET_DURATION - 1.0, &mut intent, &cfg());
        player.activate(BuffKind::Magnet);
        assert_eq!(player.magnet_timer, MAGNET_DURATION);
    }

    #[test]
    fn confusion_swaps_edges_without_double_consume() {
        let mut player = Player::new();
        let mut intent = InputIntent::new();
        player.activate_confusion();
        player.drain_events();

        // A left press must move the confused player right
        intent.press(Direction::Left);
        player.update(0.016, &mut intent, &cfg());
        assert_eq!(player.lane, 2);

        // The edge was consumed by the swap; nothing left for later frames
        assert!(!intent.take_pressed(Direction::Left));
        assert!(!intent.take_pressed(Direction::Right));
    }

    proptest::proptest! {
        /// No input sequence can push the character out of the corridor or
        /// below the slide floor
        #[test]
        fn motion_stays_within_bounds(presses in proptest::collection::vec(0usize..4, 0..200)) {
            let mut player = Player::new();
            let mut intent = InputIntent::new();
            for p in presses {
                let dir = Direction::ALL[p];
                intent.press(dir);
                player.update(1.0 / 60.0, &mut intent, &SimConfig::default());
                intent.release(dir);
                proptest::prop_assert!((0..=2).contains(&player.lane));
                proptest::prop_assert!(player.pos.x >= LANE_X[0] - 1e-3);
                proptest::prop_assert!(player.pos.x <= LANE_X[2] + 1e-3);
                proptest::prop_assert!(player.pos.y >= SLIDE_GROUND_Y - 1e-3);
            }
        }
    }

    #[test]
    fn ward_consumed_once() {
        let mut player = Player::new();
        player.activate(BuffKind::Ward);
        player.drain_events();

        player.consume_ward();
        assert!(!player.has_ward);
        let events = player.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].phase, StatusPhase::Ended);

        // Second consume is a no-op
        player.consume_ward();
        assert!(player.drain_events().is_empty());
    }
}
