//! Procedural spawner and the obstacle/powerup registries
//!
//! Spawn cadence is tied to world speed so obstacle spacing stays constant in
//! distance, not time. Entities live in dense arenas and are removed by
//! swap-and-pop; the spawner is their only owner.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::player::BuffKind;
use crate::consts::*;

/// Closed set of obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Tall sign holder blocking the whole lane; dodge only
    Billboard,
    /// Parked van; blocks the lane
    Van,
    /// Vendor cart, open underneath; slide under it
    Cart,
    /// Scaffolding with a high crossbar; slide under it
    Scaffold,
    /// Chemical spill; touching it inverts controls
    Spill,
    /// Collectible currency
    Coin,
}

/// Weighted spawn table: cumulative probability, kind. Coin is the residual
/// bucket. Adding a type means adding a row here and one in `policy`.
const SPAWN_TABLE: [(f32, ObstacleKind); 5] = [
    (0.25, ObstacleKind::Billboard),
    (0.45, ObstacleKind::Van),
    (0.60, ObstacleKind::Cart),
    (0.75, ObstacleKind::Scaffold),
    (0.85, ObstacleKind::Spill),
];

/// Billboard captions by distance band. Cosmetic only.
const CAPTIONS_EARLY: [&str; 3] = ["GRAND OPENING", "FRESH BAGELS", "BIG SALE TODAY"];
const CAPTIONS_MID: [&str; 3] = ["ROAD WORK AHEAD", "DETOUR", "LANE CLOSED"];
const CAPTIONS_LATE: [&str; 4] = ["LAST EXIT", "NO THRU TRAFFIC", "DEAD END", "TURN BACK"];

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub pos: Vec3,
    /// Y-rotation for the render collaborator (coins spin)
    pub spin: f32,
    /// Billboard caption, if any
    pub caption: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct Powerup {
    pub kind: BuffKind,
    pub pos: Vec3,
    pub spin: f32,
}

/// Result of a collision query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A coin overlapped; it has already been removed from the arena
    Coin,
    /// A non-coin obstacle overlaps; resolution and removal are the caller's
    Obstacle { kind: ObstacleKind, index: usize },
}

#[derive(Debug, Clone)]
pub struct Spawner {
    pub obstacles: Vec<Obstacle>,
    pub powerups: Vec<Powerup>,
    pub(crate) spawn_timer: f32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            powerups: Vec::new(),
            spawn_timer: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.powerups.clear();
        self.spawn_timer = 0.0;
    }

    /// Advance spawn cadence and every live entity; recycle what passed the
    /// character.
    pub fn update(&mut self, dt: f32, speed: f32, distance: f32, rng: &mut Pcg32) {
        self.spawn_timer -= dt;
        if self.spawn_timer <= 0.0 {
            self.spawn_roll(distance, rng);
            // Faster spawns at higher speed: constant spacing in distance
            self.spawn_timer = BASE_SPAWN_INTERVAL / (speed / REFERENCE_SPEED);
        }

        let advance = speed * dt;
        let mut i = 0;
        while i < self.obstacles.len() {
            let obstacle = &mut self.obstacles[i];
            obstacle.pos.z += advance;
            if obstacle.kind == ObstacleKind::Coin {
                obstacle.spin += 2.0 * dt;
            }
            if obstacle.pos.z > DESPAWN_Z {
                self.obstacles.swap_remove(i);
            } else {
                i += 1;
            }
        }

        let mut i = 0;
        while i < self.powerups.len() {
            let powerup = &mut self.powerups[i];
            powerup.pos.z += advance;
            powerup.spin += 3.0 * dt;
            if powerup.pos.z > DESPAWN_Z {
                self.powerups.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// One spawn decision: a powerup (small chance) or an obstacle, never both
    fn spawn_roll(&mut self, distance: f32, rng: &mut Pcg32) {
        let lane_x = LANE_X[rng.random_range(0..LANE_X.len())];

        if rng.random::<f32>() < POWERUP_CHANCE {
            self.spawn_powerup(lane_x, rng);
            return;
        }

        let roll: f32 = rng.random();
        let kind = SPAWN_TABLE
            .iter()
            .find(|(cumulative, _)| roll < *cumulative)
            .map(|(_, kind)| *kind)
            .unwrap_or(ObstacleKind::Coin);

        if kind == ObstacleKind::Coin {
            // A short staggered run of individually tracked coins
            let count = rng.random_range(3..6);
            for i in 0..count {
                self.obstacles.push(Obstacle {
                    kind: ObstacleKind::Coin,
                    pos: Vec3::new(lane_x, 1.0, SPAWN_Z - i as f32 * COIN_SPACING),
                    spin: 0.0,
                    caption: None,
                });
            }
            return;
        }

        let caption = (kind == ObstacleKind::Billboard).then(|| caption_for(distance, rng));
        self.obstacles.push(Obstacle {
            kind,
            pos: Vec3::new(lane_x, 0.0, SPAWN_Z),
            spin: 0.0,
            caption,
        });
    }

    fn spawn_powerup(&mut self, lane_x: f32, rng: &mut Pcg32) {
        let kind = match rng.random_range(0..3) {
            0 => BuffKind::Shield,
            1 => BuffKind::Magnet,
            _ => BuffKind::Ward,
        };
        self.powerups.push(Powerup {
            kind,
            pos: Vec3::new(lane_x, 1.0, SPAWN_Z),
            spin: 0.0,
        });
    }

    /// Geometric overlap query against the obstacle arena.
    ///
    /// Reports at most one overlap. Coins are consumed here; everything else
    /// is left in place for policy resolution by the caller. Whether a
    /// reported overlap is "narratively" a hit (slide-under types) is the
    /// caller's call, not ours.
    pub fn check_collisions(&mut self, player_pos: Vec3) -> Option<Hit> {
        for i in (0..self.obstacles.len()).rev() {
            let pos = self.obstacles[i].pos;
            if (pos.z - player_pos.z).abs() < HIT_RANGE_Z
                && (pos.x - player_pos.x).abs() < HIT_RANGE_X
            {
                let kind = self.obstacles[i].kind;
                if kind == ObstacleKind::Coin {
                    self.obstacles.swap_remove(i);
                    return Some(Hit::Coin);
                }
                return Some(Hit::Obstacle { kind, index: i });
            }
        }
        None
    }

    /// Powerup contact check; contact always activates, so the entity is
    /// removed here.
    pub fn check_powerup_contact(&mut self, player_pos: Vec3) -> Option<BuffKind> {
        for i in (0..self.powerups.len()).rev() {
            let pos = self.powerups[i].pos;
            if (pos.z - player_pos.z).abs() < HIT_RANGE_X
                && (pos.x - player_pos.x).abs() < HIT_RANGE_X
            {
                let kind = self.powerups[i].kind;
                self.powerups.swap_remove(i);
                return Some(kind);
            }
        }
        None
    }

    /// Magnet effect: pull every coin in range toward the character, consume
    /// the ones that arrive. Returns how many were consumed. Bypasses the
    /// normal collision gate.
    pub fn magnet_sweep(&mut self, player_pos: Vec3, dt: f32) -> u32 {
        let mut collected = 0;
        let mut i = 0;
        while i < self.obstacles.len() {
            if self.obstacles[i].kind != ObstacleKind::Coin {
                i += 1;
                continue;
            }
            let dist = self.obstacles[i].pos.distance(player_pos);
            if dist < MAGNET_CONSUME_RADIUS {
                self.obstacles.swap_remove(i);
                collected += 1;
                continue;
            }
            if dist < MAGNET_RADIUS {
                let dir = (player_pos - self.obstacles[i].pos).normalize_or_zero();
                self.obstacles[i].pos += dir * MAGNET_PULL_SPEED * dt;
            }
            i += 1;
        }
        collected
    }

    /// Destroy one obstacle after policy resolution. No-op on a stale index.
    pub fn remove_obstacle(&mut self, index: usize) {
        if index < self.obstacles.len() {
            self.obstacles.swap_remove(index);
        }
    }
}

fn caption_for(distance: f32, rng: &mut Pcg32) -> &'static str {
    if distance < 1000.0 {
        CAPTIONS_EARLY[rng.random_range(0..CAPTIONS_EARLY.len())]
    } else if distance < 2000.0 {
        CAPTIONS_MID[rng.random_range(0..CAPTIONS_MID.len())]
    } else {
        CAPTIONS_LATE[rng.random_range(0..CAPTIONS_LATE.len())]
    }
}
