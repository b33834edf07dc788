//! Skin catalog and selection
//!
//! A small fixed catalog; ownership and the equipped choice persist in
//! LocalStorage. Purchases draw on the run's coin ledger.

use serde::{Deserialize, Serialize};

use crate::sim::ScoreBoard;

/// One purchasable character skin. Colors are packed 0xRRGGBB for the scene
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skin {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: u32,
    pub jacket: u32,
    pub trousers: u32,
}

pub static CATALOG: [Skin; 4] = [
    Skin {
        id: "courier",
        name: "Courier",
        cost: 0,
        jacket: 0x2b6cb0,
        trousers: 0x1a202c,
    },
    Skin {
        id: "hi-vis",
        name: "Hi-Vis",
        cost: 50,
        jacket: 0xf6e05e,
        trousers: 0x2d3748,
    },
    Skin {
        id: "midnight",
        name: "Midnight",
        cost: 120,
        jacket: 0x1a202c,
        trousers: 0x4a5568,
    },
    Skin {
        id: "parade",
        name: "Parade",
        cost: 250,
        jacket: 0xc53030,
        trousers: 0xf7fafc,
    },
];

/// Ownership and selection state; the catalog itself is compiled in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    owned: Vec<String>,
    equipped: String,
}

impl Default for Shop {
    fn default() -> Self {
        Self {
            owned: vec![CATALOG[0].id.to_string()],
            equipped: CATALOG[0].id.to_string(),
        }
    }
}

impl Shop {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "lane_rush_shop";

    pub fn skin(id: &str) -> Option<&'static Skin> {
        CATALOG.iter().find(|s| s.id == id)
    }

    pub fn owns(&self, id: &str) -> bool {
        self.owned.iter().any(|owned| owned == id)
    }

    pub fn equipped(&self) -> &'static Skin {
        Self::skin(&self.equipped).unwrap_or(&CATALOG[0])
    }

    /// Buy a catalog skin with run coins. Already-owned skins and unknown ids
    /// are rejected without spending.
    pub fn purchase(&mut self, id: &str, score: &mut ScoreBoard) -> bool {
        let Some(skin) = Self::skin(id) else {
            return false;
        };
        if self.owns(id) || !score.spend_coins(skin.cost) {
            return false;
        }
        self.owned.push(skin.id.to_string());
        self.save();
        true
    }

    /// Equip an owned skin; returns false and keeps the current one otherwise
    pub fn equip(&mut self, id: &str) -> bool {
        if self.owns(id) && Self::skin(id).is_some() {
            self.equipped = id.to_string();
            self.save();
            true
        } else {
            false
        }
    }

    /// Load shop state from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(shop) = serde_json::from_str(&json) {
                    return shop;
                }
            }
        }

        Self::default()
    }

    /// Save shop state to LocalStorage (WASM only)
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
