//! Player identity and best score
//!
//! Persisted in LocalStorage, separate from skin selection. The id is minted
//! once on first load and reused for every leaderboard submission.

use serde::{Deserialize, Serialize};

/// Local player record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Stable id for leaderboard submissions
    pub player_id: String,
    /// Display name; empty until the player sets one
    pub name: String,
    /// Optional social handle shown on the leaderboard
    pub social: String,
    pub best_score: u32,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            player_id: mint_player_id(),
            name: String::new(),
            social: String::new(),
            best_score: 0,
        }
    }
}

impl PlayerProfile {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "lane_rush_profile";

    /// Record a finished run; returns true when it set a new best
    pub fn record_score(&mut self, score: u32) -> bool {
        if score > self.best_score {
            self.best_score = score;
            self.save();
            true
        } else {
            false
        }
    }

    pub fn set_identity(&mut self, name: &str, social: &str) {
        self.name = name.trim().to_string();
        self.social = social.trim().to_string();
        self.save();
    }

    /// Load the profile from LocalStorage, minting a fresh one on first run
    /// (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(profile) = serde_json::from_str(&json) {
                    log::info!("Loaded player profile from LocalStorage");
                    return profile;
                }
            }
        }

        log::info!("Minting new player profile");
        let profile = Self::default();
        profile.save();
        profile
    }

    /// Save the profile to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// Browser-grade UUID where available, seeded fallback elsewhere
#[cfg(target_arch = "wasm32")]
fn mint_player_id() -> String {
    web_sys::window()
        .map(|w| w.crypto())
        .and_then(|c| c.ok())
        .map(|c| c.random_uuid())
        .unwrap_or_else(|| format!("anon-{:016x}", rand::random::<u64>()))
}

#[cfg(not(target_arch = "wasm32"))]
fn mint_player_id() -> String {
    format!("anon-{:016x}", rand::random::<u64>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_score_keeps_the_maximum() {
        let mut profile = PlayerProfile::default();
        assert!(profile.record_score(100));
        assert!(!profile.record_score(50));
        assert_eq!(profile.best_score, 100);
        assert!(profile.record_score(150));
        assert_eq!(profile.best_score, 150);
    }

    #[test]
    fn tied_score_is_not_a_new_best() {
        let mut profile = PlayerProfile::default();
        profile.record_score(100);
        assert!(!profile.record_score(100));
    }

    #[test]
    fn identity_is_trimmed() {
        let mut profile = PlayerProfile::default();
        profile.set_identity("  Ada ", " @ada\n");
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.social, "@ada");
    }

    #[test]
    fn minted_ids_are_distinct() {
        let a = PlayerProfile::default();
        let b = PlayerProfile::default();
        assert_ne!(a.player_id, b.player_id);
        assert!(!a.player_id.is_empty());
    }
}
