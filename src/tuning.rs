//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives in [`Tuning`]. The
//! defaults match `crate::consts`; a JSON document may override any subset.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player_size: f32,
    pub enemy_size: f32,
    pub item_size: f32,

    pub player_base_speed: f32,
    pub speed_boost_factor: f32,
    pub enemy_speed: f32,
    pub enemy_arrive_distance: f32,

    pub catch_factor: f32,
    pub pickup_radius: f32,

    pub fruit_reward: u32,
    pub hide_duration_ms: f64,
    pub speed_duration_ms: f64,

    pub respawn_fruit_chance: f64,
    pub respawn_hide_chance: f64,
    pub respawn_speed_chance: f64,

    pub spawn_margin: f32,
    pub initial_fruit: usize,
    pub initial_hide_potions: usize,
    pub initial_speed_potions: usize,

    /// Player start as fractions of the field
    pub player_start: (f32, f32),
    /// Enemy start as fractions of the field
    pub enemy_start: (f32, f32),
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_size: ENTITY_SIZE,
            enemy_size: ENTITY_SIZE,
            item_size: ITEM_SIZE,

            player_base_speed: PLAYER_BASE_SPEED,
            speed_boost_factor: SPEED_BOOST_FACTOR,
            enemy_speed: ENEMY_SPEED,
            enemy_arrive_distance: ENEMY_ARRIVE_DISTANCE,

            catch_factor: CATCH_FACTOR,
            pickup_radius: PICKUP_RADIUS,

            fruit_reward: FRUIT_REWARD,
            hide_duration_ms: HIDE_DURATION_MS,
            speed_duration_ms: SPEED_DURATION_MS,

            respawn_fruit_chance: RESPAWN_FRUIT_CHANCE,
            respawn_hide_chance: RESPAWN_HIDE_CHANCE,
            respawn_speed_chance: RESPAWN_SPEED_CHANCE,

            spawn_margin: SPAWN_MARGIN,
            initial_fruit: INITIAL_FRUIT,
            initial_hide_potions: INITIAL_HIDE_POTIONS,
            initial_speed_potions: INITIAL_SPEED_POTIONS,

            player_start: PLAYER_START,
            enemy_start: ENEMY_START,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Parse a tuning document, falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Invalid tuning JSON ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Clamp values the simulation cannot work with
    pub fn sanitized(mut self) -> Self {
        self.player_size = self.player_size.max(1.0);
        self.enemy_size = self.enemy_size.max(1.0);
        self.item_size = self.item_size.max(1.0);
        self.player_base_speed = self.player_base_speed.max(0.0);
        self.speed_boost_factor = self.speed_boost_factor.max(0.0);
        self.enemy_speed = self.enemy_speed.max(0.0);
        self.enemy_arrive_distance = self.enemy_arrive_distance.max(0.0);
        self.catch_factor = self.catch_factor.max(0.0);
        self.pickup_radius = self.pickup_radius.max(0.0);
        self.hide_duration_ms = self.hide_duration_ms.max(0.0);
        self.speed_duration_ms = self.speed_duration_ms.max(0.0);
        self.respawn_fruit_chance = self.respawn_fruit_chance.clamp(0.0, 1.0);
        self.respawn_hide_chance = self.respawn_hide_chance.clamp(0.0, 1.0);
        self.respawn_speed_chance = self.respawn_speed_chance.clamp(0.0, 1.0);
        self.spawn_margin = self.spawn_margin.max(0.0);
        self.player_start = clamp_fraction(self.player_start);
        self.enemy_start = clamp_fraction(self.enemy_start);
        self
    }
}

fn clamp_fraction((x, y): (f32, f32)) -> (f32, f32) {
    (x.clamp(0.0, 1.0), y.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "pickup_radius": 30.0 }"#).unwrap();
        assert_eq!(tuning.pickup_radius, 30.0);
        assert_eq!(tuning.fruit_reward, 5);
        assert_eq!(tuning.enemy_speed, ENEMY_SPEED);
    }

    #[test]
    fn invalid_json_falls_back() {
        let tuning = Tuning::from_json_or_default("{ not json");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn sanitize_clamps_probabilities_and_sizes() {
        let tuning = Tuning::from_json(
            r#"{ "respawn_fruit_chance": 3.0, "player_size": -4.0, "enemy_start": [2.0, -1.0] }"#,
        )
        .unwrap();
        assert_eq!(tuning.respawn_fruit_chance, 1.0);
        assert_eq!(tuning.player_size, 1.0);
        assert_eq!(tuning.enemy_start, (1.0, 0.0));
    }
}
