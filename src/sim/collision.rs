//! Distance tests between the player, the enemy and items
//!
//! All entities are treated as circles around their centers; the sprites are
//! square but the thresholds are tuned to feel fair with round art.

use glam::Vec2;

use super::state::{Enemy, Item, Player};
use crate::Tuning;

/// Whether the enemy has reached the player
pub fn enemy_catches_player(player: &Player, enemy: &Enemy, tuning: &Tuning) -> bool {
    let limit = (player.size + enemy.size) * tuning.catch_factor;
    player.center().distance(enemy.center()) < limit
}

/// Whether the player's center is within pickup range of an item
pub fn player_reaches_item(player: &Player, item: &Item, tuning: &Tuning) -> bool {
    within(player.center(), item.pos, tuning.pickup_radius)
}

/// Strict circle test (`distance < radius`)
#[inline]
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ItemKind;

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y), &Tuning::default())
    }

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy::new(Vec2::new(x, y), &Tuning::default())
    }

    #[test]
    fn catch_threshold() {
        let tuning = Tuning::default();
        // Threshold is (32 + 32) * 0.45 = 28.8
        assert!(enemy_catches_player(&player_at(0.0, 0.0), &enemy_at(28.0, 0.0), &tuning));
        assert!(!enemy_catches_player(&player_at(0.0, 0.0), &enemy_at(29.0, 0.0), &tuning));
        assert!(!enemy_catches_player(&player_at(0.0, 0.0), &enemy_at(20.0, 25.0), &tuning));
    }

    #[test]
    fn pickup_measured_from_player_center() {
        let tuning = Tuning::default();
        let player = player_at(100.0, 100.0);
        let near = Item {
            id: 1,
            kind: ItemKind::HidePotion,
            pos: Vec2::new(116.0 + 34.0, 116.0),
            size: 32.0,
        };
        let far = Item {
            pos: Vec2::new(116.0 + 35.0, 116.0),
            ..near.clone()
        };
        assert!(player_reaches_item(&player, &near, &tuning));
        assert!(!player_reaches_item(&player, &far, &tuning));
    }
}
