//! Collision resolution policy
//!
//! One table row per obstacle kind; the resolver consults it uniformly, so a
//! new kind is a new row, not a new branch. The resolver itself is pure: it
//! maps (kind, character state, chaser state) to an outcome, and the
//! orchestrator applies the side effects.

use super::spawn::ObstacleKind;

/// How a kind reacts to overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnHit {
    /// Standard hit precedence (shield / ward / chase / fatal)
    Standard,
    /// Inverts the character's controls; ignores slide and buffs
    Confuse,
}

#[derive(Debug, Clone, Copy)]
pub struct Policy {
    /// Sliding under this kind is a clean pass
    pub safe_when_sliding: bool,
    pub on_hit: OnHit,
}

/// Per-kind policy table
pub fn policy(kind: ObstacleKind) -> Policy {
    match kind {
        ObstacleKind::Billboard => Policy {
            safe_when_sliding: false,
            on_hit: OnHit::Standard,
        },
        ObstacleKind::Van => Policy {
            safe_when_sliding: false,
            on_hit: OnHit::Standard,
        },
        ObstacleKind::Cart => Policy {
            safe_when_sliding: true,
            on_hit: OnHit::Standard,
        },
        ObstacleKind::Scaffold => Policy {
            safe_when_sliding: true,
            on_hit: OnHit::Standard,
        },
        ObstacleKind::Spill => Policy {
            safe_when_sliding: false,
            on_hit: OnHit::Confuse,
        },
        // Coins are consumed by the overlap query and never reach the resolver
        ObstacleKind::Coin => Policy {
            safe_when_sliding: false,
            on_hit: OnHit::Standard,
        },
    }
}

/// Resolved consequence of a non-coin overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No state change, entity stays
    SafePass,
    /// Confusion debuff; entity removed
    Confused,
    /// Shield absorbed the hit; entity removed
    Shielded,
    /// Ward consumed; entity removed
    WardSpent,
    /// First unshielded hit: chase starts, entity removed, flash signaled
    Chase,
    /// Hit while already chased: run over
    Fatal,
}

/// Standard hit precedence, in fixed order
pub fn resolve(
    kind: ObstacleKind,
    sliding: bool,
    has_shield: bool,
    has_ward: bool,
    chasing: bool,
) -> Outcome {
    let policy = policy(kind);
    if policy.safe_when_sliding && sliding {
        return Outcome::SafePass;
    }
    if policy.on_hit == OnHit::Confuse {
        return Outcome::Confused;
    }
    if has_shield {
        Outcome::Shielded
    } else if has_ward {
        Outcome::WardSpent
    } else if chasing {
        Outcome::Fatal
    } else {
        Outcome::Chase
    }
}
