//! Game lifecycle and aggregate simulation state

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::chase::Chaser;
use super::player::Player;
use super::score::ScoreBoard;
use super::spawn::Spawner;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, nothing simulating
    Start,
    Playing,
    /// Run ended; waiting for reset
    GameOver,
}

/// Run-time policy switches
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimConfig {
    /// Allow starting a slide mid-air (converts the jump into a fast drop)
    pub air_slide: bool,
}

/// Corridor scroll state: speed ramps up forever, distance is its integral
#[derive(Debug, Clone)]
pub struct World {
    pub speed: f32,
    pub distance: f32,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            speed: START_SPEED,
            distance: 0.0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn update(&mut self, dt: f32) {
        self.speed += ACCELERATION * dt;
        self.distance += self.speed * dt;
    }
}

/// Damage flash, driven by the tick so a reset can never race a stale timer.
/// Presentation only; the render collaborator reads it, nothing else does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlashState {
    Normal,
    Flashing { remaining: f32 },
}

impl FlashState {
    pub fn trigger(&mut self) {
        *self = FlashState::Flashing {
            remaining: FLASH_DURATION,
        };
    }

    pub fn update(&mut self, dt: f32) {
        if let FlashState::Flashing { remaining } = self {
            *remaining -= dt;
            if *remaining <= 0.0 {
                *self = FlashState::Normal;
            }
        }
    }

    pub fn is_flashing(&self) -> bool {
        matches!(self, FlashState::Flashing { .. })
    }
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Independent of phase; suspends all advancement while set
    pub paused: bool,
    pub config: SimConfig,
    pub world: World,
    pub player: Player,
    pub spawner: Spawner,
    pub chaser: Chaser,
    pub score: ScoreBoard,
    pub flash: FlashState,
    /// Deduction taken at run end, for the game-over screen
    pub final_tax: Option<u32>,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            paused: false,
            config: SimConfig::default(),
            world: World::new(),
            player: Player::new(),
            spawner: Spawner::new(),
            chaser: Chaser::new(),
            score: ScoreBoard::new(),
            flash: FlashState::Normal,
            final_tax: None,
        }
    }

    /// Begin a fresh run from the title or game-over screen
    pub fn start(&mut self) {
        self.world.reset();
        self.player.reset();
        self.spawner.reset();
        self.chaser.reset();
        self.score.reset();
        self.flash = FlashState::Normal;
        self.final_tax = None;
        self.phase = GamePhase::Playing;
    }

    /// Back to the title screen without starting a run
    pub fn reset(&mut self) {
        self.start();
        self.phase = GamePhase::Start;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing && !self.paused
    }

    /// End the run: applies the one-time final tax. Idempotent.
    pub fn game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.final_tax = Some(self.score.apply_final_tax());
        log::info!(
            "run over: score {} coins {} tax {}",
            self.score.display_score(),
            self.score.coins,
            self.final_tax.unwrap_or(0)
        );
    }
}
