//! Enemy pursuit with imperfect information
//!
//! The enemy only sees the player while the player is visible. While hidden,
//! it keeps walking to the last place it saw the player.

use glam::Vec2;

use super::state::{Enemy, Player};
use crate::step_toward;

/// Update the enemy's belief about where the player is and return the target
pub fn update_target(enemy: &mut Enemy, player: &Player) -> Vec2 {
    if player.hidden {
        *enemy.last_known_target.get_or_insert(player.pos)
    } else {
        enemy.last_known_target = Some(player.pos);
        player.pos
    }
}

/// Walk toward `target` by at most the enemy's speed.
/// Within `arrive_distance` the enemy stays put.
pub fn step_enemy(enemy: &mut Enemy, target: Vec2, arrive_distance: f32) {
    if enemy.pos.distance(target) > arrive_distance {
        enemy.pos = step_toward(enemy.pos, target, enemy.speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    #[test]
    fn visible_player_is_tracked() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::new(Vec2::new(0.0, 0.0), &tuning);
        let mut player = Player::new(Vec2::new(50.0, 40.0), &tuning);
        assert_eq!(update_target(&mut enemy, &player), Vec2::new(50.0, 40.0));
        player.pos = Vec2::new(70.0, 40.0);
        assert_eq!(update_target(&mut enemy, &player), Vec2::new(70.0, 40.0));
        assert_eq!(enemy.last_known_target, Some(Vec2::new(70.0, 40.0)));
    }

    #[test]
    fn hidden_player_freezes_target() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::new(Vec2::ZERO, &tuning);
        let mut player = Player::new(Vec2::new(50.0, 40.0), &tuning);
        update_target(&mut enemy, &player);

        player.hidden = true;
        player.pos = Vec2::new(300.0, 300.0);
        assert_eq!(update_target(&mut enemy, &player), Vec2::new(50.0, 40.0));
        player.pos = Vec2::new(10.0, 500.0);
        assert_eq!(update_target(&mut enemy, &player), Vec2::new(50.0, 40.0));
    }

    #[test]
    fn hidden_without_memory_uses_current_position_once() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::new(Vec2::ZERO, &tuning);
        let mut player = Player::new(Vec2::new(90.0, 90.0), &tuning);
        player.hidden = true;
        assert_eq!(update_target(&mut enemy, &player), Vec2::new(90.0, 90.0));
        player.pos = Vec2::new(200.0, 10.0);
        assert_eq!(update_target(&mut enemy, &player), Vec2::new(90.0, 90.0));
    }

    #[test]
    fn step_is_capped_by_speed() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::new(Vec2::ZERO, &tuning);
        step_enemy(&mut enemy, Vec2::new(100.0, 0.0), 1.0);
        assert!((enemy.pos.x - tuning.enemy_speed).abs() < 1e-6);
        assert_eq!(enemy.pos.y, 0.0);
    }

    #[test]
    fn step_does_not_overshoot_close_target() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::new(Vec2::ZERO, &tuning);
        step_enemy(&mut enemy, Vec2::new(1.5, 0.0), 1.0);
        assert_eq!(enemy.pos, Vec2::new(1.5, 0.0));
    }

    #[test]
    fn rests_within_arrive_distance() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::new(Vec2::ZERO, &tuning);
        step_enemy(&mut enemy, Vec2::new(0.6, 0.6), 1.0);
        assert_eq!(enemy.pos, Vec2::ZERO);
    }
}
