//! Item spawning and the respawn policy

use glam::Vec2;
use rand::Rng;

use super::state::{FruitKind, GameState, Item, ItemKind, SpawnKind};
use crate::Field;

/// Place a new item of `kind` at a random spot inset from the field edges
pub fn spawn(state: &mut GameState, kind: SpawnKind, field: Field) {
    let kind = match kind {
        SpawnKind::Fruit => {
            let idx = state.rng.random_range(0..FruitKind::ALL.len());
            ItemKind::Fruit(FruitKind::ALL[idx])
        }
        SpawnKind::HidePotion => ItemKind::HidePotion,
        SpawnKind::SpeedPotion => ItemKind::SpeedPotion,
    };

    let margin = state.tuning.spawn_margin;
    let pos = Vec2::new(
        random_inset(&mut state.rng, field.width, margin),
        random_inset(&mut state.rng, field.height, margin),
    );

    let id = state.next_item_id();
    state.items.push(Item {
        id,
        kind,
        pos,
        size: state.tuning.item_size,
    });
}

/// Uniform coordinate in `[margin, extent - margin)`; the midpoint when the
/// field is too small to fit the margin on both sides
fn random_inset(rng: &mut impl Rng, extent: f32, margin: f32) -> f32 {
    let span = extent - 2.0 * margin;
    if span <= 0.0 {
        return extent.max(0.0) / 2.0;
    }
    margin + rng.random::<f32>() * span
}

/// Independent respawn draws after a single pickup
pub fn respawn_after_pickup(state: &mut GameState, field: Field) {
    let fruit = state.tuning.respawn_fruit_chance;
    let hide = state.tuning.respawn_hide_chance;
    let speed = state.tuning.respawn_speed_chance;

    if state.rng.random_bool(fruit) {
        spawn(state, SpawnKind::Fruit, field);
    }
    if state.rng.random_bool(hide) {
        spawn(state, SpawnKind::HidePotion, field);
    }
    if state.rng.random_bool(speed) {
        spawn(state, SpawnKind::SpeedPotion, field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    #[test]
    fn spawned_items_respect_margin() {
        let field = Field::new(300.0, 200.0);
        let mut state = GameState::new(42, field);
        for _ in 0..200 {
            spawn(&mut state, SpawnKind::Fruit, field);
        }
        for item in &state.items {
            assert!(item.pos.x >= 20.0 && item.pos.x <= 280.0, "x = {}", item.pos.x);
            assert!(item.pos.y >= 20.0 && item.pos.y <= 180.0, "y = {}", item.pos.y);
        }
    }

    #[test]
    fn fruit_varieties_all_appear() {
        let field = Field::default();
        let mut state = GameState::new(9, field);
        for _ in 0..200 {
            spawn(&mut state, SpawnKind::Fruit, field);
        }
        for fruit in FruitKind::ALL {
            assert!(
                state.items.iter().any(|i| i.kind == ItemKind::Fruit(fruit)),
                "missing {:?}",
                fruit
            );
        }
    }

    #[test]
    fn tiny_field_spawns_at_center() {
        let field = Field::new(30.0, 30.0);
        let mut state = GameState::new(1, field);
        spawn(&mut state, SpawnKind::HidePotion, field);
        let item = state.items.last().unwrap();
        assert_eq!(item.pos, Vec2::new(15.0, 15.0));
    }

    #[test]
    fn certain_respawn_spawns_all_three() {
        let field = Field::default();
        let tuning = Tuning {
            respawn_fruit_chance: 1.0,
            respawn_hide_chance: 1.0,
            respawn_speed_chance: 1.0,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(5, field, tuning);
        state.items.clear();
        respawn_after_pickup(&mut state, field);
        assert_eq!(state.items.len(), 3);
        assert_eq!(state.count_items(ItemKind::is_fruit), 1);
        assert_eq!(state.count_items(ItemKind::is_potion), 2);
    }

    #[test]
    fn zero_chance_spawns_nothing() {
        let field = Field::default();
        let tuning = Tuning {
            respawn_fruit_chance: 0.0,
            respawn_hide_chance: 0.0,
            respawn_speed_chance: 0.0,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(5, field, tuning);
        state.items.clear();
        for _ in 0..50 {
            respawn_after_pickup(&mut state, field);
        }
        assert!(state.items.is_empty());
    }
}
