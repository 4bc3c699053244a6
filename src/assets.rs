//! Sprite identifiers and loaded image handles
//!
//! The simulation never touches pixel data. Renderers look up a handle per
//! [`SpriteId`]; a sprite that failed to load has no handle and is drawn as
//! a placeholder.

use std::collections::HashMap;

use crate::sim::{FruitKind, ItemKind};

/// Every sprite the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SpriteId {
    Player,
    Enemy,
    FruitApple,
    FruitGrapes,
    FruitOrange,
    FruitWatermelon,
    PotionHide,
    PotionSpeed,
}

impl SpriteId {
    pub const ALL: [SpriteId; 8] = [
        SpriteId::Player,
        SpriteId::Enemy,
        SpriteId::FruitApple,
        SpriteId::FruitGrapes,
        SpriteId::FruitOrange,
        SpriteId::FruitWatermelon,
        SpriteId::PotionHide,
        SpriteId::PotionSpeed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SpriteId::Player => "player",
            SpriteId::Enemy => "enemy",
            SpriteId::FruitApple => "fruit_apple",
            SpriteId::FruitGrapes => "fruit_grapes",
            SpriteId::FruitOrange => "fruit_orange",
            SpriteId::FruitWatermelon => "fruit_watermelon",
            SpriteId::PotionHide => "potion_hide",
            SpriteId::PotionSpeed => "potion_speed",
        }
    }

    /// Image path relative to the page
    pub fn path(&self) -> String {
        format!("img/{}.png", self.name())
    }

    pub fn for_item(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Fruit(FruitKind::Apple) => SpriteId::FruitApple,
            ItemKind::Fruit(FruitKind::Grapes) => SpriteId::FruitGrapes,
            ItemKind::Fruit(FruitKind::Orange) => SpriteId::FruitOrange,
            ItemKind::Fruit(FruitKind::Watermelon) => SpriteId::FruitWatermelon,
            ItemKind::HidePotion => SpriteId::PotionHide,
            ItemKind::SpeedPotion => SpriteId::PotionSpeed,
        }
    }

    /// Inverse of `as u32` (used when reading instance buffers back)
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// Loaded sprite handles keyed by [`SpriteId`]
#[derive(Debug)]
pub struct AssetRegistry<H> {
    loaded: HashMap<SpriteId, H>,
    failed: Vec<SpriteId>,
}

impl<H> AssetRegistry<H> {
    pub fn new() -> Self {
        Self {
            loaded: HashMap::with_capacity(SpriteId::ALL.len()),
            failed: Vec::new(),
        }
    }

    /// Record a successfully loaded sprite
    pub fn insert(&mut self, id: SpriteId, handle: H) {
        self.failed.retain(|f| *f != id);
        self.loaded.insert(id, handle);
    }

    /// Record a sprite that could not be loaded; the game keeps going
    pub fn mark_failed(&mut self, id: SpriteId, reason: &str) {
        log::warn!("Failed to load sprite {} ({}): {}", id.name(), id.path(), reason);
        self.loaded.remove(&id);
        if !self.failed.contains(&id) {
            self.failed.push(id);
        }
    }

    /// Handle for a sprite, or `None` if it should be drawn as a placeholder
    pub fn get(&self, id: SpriteId) -> Option<&H> {
        self.loaded.get(&id)
    }

    pub fn failed(&self) -> &[SpriteId] {
        &self.failed
    }

    /// Every sprite has either loaded or failed
    pub fn is_settled(&self) -> bool {
        SpriteId::ALL
            .iter()
            .all(|id| self.loaded.contains_key(id) || self.failed.contains(id))
    }
}

impl<H> Default for AssetRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_item_has_a_sprite() {
        for fruit in FruitKind::ALL {
            let id = SpriteId::for_item(ItemKind::Fruit(fruit));
            assert!(id.name().starts_with("fruit_"));
        }
        assert_eq!(SpriteId::for_item(ItemKind::HidePotion).path(), "img/potion_hide.png");
    }

    #[test]
    fn index_round_trips() {
        for id in SpriteId::ALL {
            assert_eq!(SpriteId::from_index(id as u32), Some(id));
        }
        assert_eq!(SpriteId::from_index(42), None);
    }

    #[test]
    fn missing_sprite_becomes_placeholder() {
        let mut registry: AssetRegistry<&'static str> = AssetRegistry::new();
        for id in SpriteId::ALL {
            if id == SpriteId::Enemy {
                registry.mark_failed(id, "404");
            } else {
                registry.insert(id, id.name());
            }
        }
        assert!(registry.is_settled());
        assert_eq!(registry.get(SpriteId::Enemy), None);
        assert_eq!(registry.get(SpriteId::Player), Some(&"player"));
        assert_eq!(registry.failed(), &[SpriteId::Enemy]);

        registry.insert(SpriteId::Enemy, "enemy");
        assert!(registry.failed().is_empty());
    }
}
