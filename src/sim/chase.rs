//! Chase antagonist state machine
//!
//! Dormant far behind the camera, chasing close behind the character. A
//! second qualifying hit while chasing is fatal, but that judgement belongs
//! to the collision resolver; this component only runs the pursuit.

use glam::Vec3;

use crate::consts::*;
use crate::ease_toward;

#[derive(Debug, Clone)]
pub struct Chaser {
    pub chasing: bool,
    /// Seconds of chase remaining
    pub timer: f32,
    pub pos: Vec3,
    /// Run-cycle phase for the render collaborator
    pub run_phase: f32,
}

impl Default for Chaser {
    fn default() -> Self {
        Self::new()
    }
}

impl Chaser {
    pub fn new() -> Self {
        Self {
            chasing: false,
            timer: 0.0,
            pos: Vec3::new(0.0, 0.0, CHASER_HIDDEN_Z),
            run_phase: 0.0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Enter (or re-arm) the chase; the countdown always restarts at full
    pub fn start_chase(&mut self) {
        self.chasing = true;
        self.timer = CHASE_DURATION;
    }

    pub fn update(&mut self, dt: f32, player_x: f32) {
        if self.chasing {
            self.timer -= dt;
            if self.timer <= 0.0 {
                self.timer = 0.0;
                self.chasing = false;
            }
        }

        let target_z = if self.chasing {
            CHASER_CHASE_Z
        } else {
            CHASER_HIDDEN_Z
        };
        self.pos.z = ease_toward(self.pos.z, target_z, CHASER_Z_GAIN, dt);
        // Lateral pursuit lags behind the character visibly
        self.pos.x = ease_toward(self.pos.x, player_x, CHASER_X_GAIN, dt);

        if self.chasing {
            self.run_phase += dt * 12.0;
            self.pos.y = (self.run_phase * 2.0).sin().abs() * 0.1;
        }
    }
}
