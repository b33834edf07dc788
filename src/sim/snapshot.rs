//! Render handoff
//!
//! The simulation never touches the scene graph. Once per animation frame the
//! front-end captures a [`SceneFrame`] and ships it across the boundary as
//! JSON; the page's scene layer owns meshes, materials and the camera.

use serde::Serialize;

use super::player::EffectKind;
use super::spawn::ObstacleKind;
use super::state::GameState;

impl ObstacleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Billboard => "billboard",
            ObstacleKind::Van => "van",
            ObstacleKind::Cart => "cart",
            ObstacleKind::Scaffold => "scaffold",
            ObstacleKind::Spill => "spill",
            ObstacleKind::Coin => "coin",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorPose {
    pub pos: [f32; 3],
    /// Run-cycle phase for limb animation
    pub run_phase: f32,
    pub sliding: bool,
    pub grounded: bool,
    pub confused: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChaserPose {
    pub pos: [f32; 3],
    pub chasing: bool,
    pub run_phase: f32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySprite {
    pub kind: &'static str,
    pub pos: [f32; 3],
    pub spin: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<&'static str>,
}

/// One frame's worth of scene state, in simulation coordinates
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneFrame {
    pub player: ActorPose,
    pub chaser: ChaserPose,
    pub obstacles: Vec<EntitySprite>,
    pub powerups: Vec<EntitySprite>,
    pub flash: bool,
    pub speed: f32,
}

impl SceneFrame {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        Self {
            player: ActorPose {
                pos: player.pos.to_array(),
                run_phase: player.run_phase,
                sliding: player.is_sliding(),
                grounded: player.grounded,
                confused: player.is_confused(),
            },
            chaser: ChaserPose {
                pos: state.chaser.pos.to_array(),
                chasing: state.chaser.chasing,
                run_phase: state.chaser.run_phase,
            },
            obstacles: state
                .spawner
                .obstacles
                .iter()
                .map(|o| EntitySprite {
                    kind: o.kind.as_str(),
                    pos: o.pos.to_array(),
                    spin: o.spin,
                    caption: o.caption,
                })
                .collect(),
            powerups: state
                .spawner
                .powerups
                .iter()
                .map(|p| EntitySprite {
                    kind: EffectKind::from(p.kind).as_str(),
                    pos: p.pos.to_array(),
                    spin: p.spin,
                    caption: None,
                })
                .collect(),
            flash: state.flash.is_flashing(),
            speed: state.world.speed,
        }
    }
}
