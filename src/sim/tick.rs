//! Per-frame simulation step
//!
//! Core game loop that advances the simulation once per display frame.

use glam::Vec2;

use super::chase::{step_enemy, update_target};
use super::collision::{enemy_catches_player, player_reaches_item};
use super::spawn::respawn_after_pickup;
use super::state::{GameEvent, GamePhase, GameState, ItemKind};
use crate::Field;

/// Input snapshot for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held direction, each axis in {-1, 0, 1}
    pub direction: Vec2,
}

impl TickInput {
    pub fn from_direction(direction: Vec2) -> Self {
        Self { direction }
    }
}

/// Advance the game by one frame at timestamp `now` (ms) on `field`
pub fn advance(state: &mut GameState, input: &TickInput, now: f64, field: Field) {
    state.events.clear();

    if state.phase == GamePhase::GameOver {
        return;
    }

    state.frame += 1;

    // Status effects
    let tuning = &state.tuning;
    state.player.expire_effects(now, tuning);

    // Player movement
    state.player.apply_direction(input.direction, field);

    // Enemy pursuit
    let target = update_target(&mut state.enemy, &state.player);
    step_enemy(&mut state.enemy, target, state.tuning.enemy_arrive_distance);

    // Catch check (a hidden player can't be caught)
    if !state.player.hidden && enemy_catches_player(&state.player, &state.enemy, &state.tuning) {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::Caught { score: state.score });
        log::info!("Caught after {} frames with score {}", state.frame, state.score);
        return;
    }

    collect_items(state, now, field);
}

/// Resolve every item within reach, then run respawn draws per pickup
fn collect_items(state: &mut GameState, now: f64, field: Field) {
    let player = &state.player;
    let tuning = &state.tuning;
    let mut picked: Vec<ItemKind> = Vec::new();
    state.items.retain(|item| {
        if player_reaches_item(player, item, tuning) {
            picked.push(item.kind);
            false
        } else {
            true
        }
    });

    for kind in picked {
        match kind {
            ItemKind::Fruit(fruit) => {
                state.score += state.tuning.fruit_reward;
                state.events.push(GameEvent::ItemCollected { fruit });
            }
            ItemKind::HidePotion => {
                state.player.hidden = true;
                state.player.hide_until = now + state.tuning.hide_duration_ms;
                state.events.push(GameEvent::PowerUpCollected { kind });
                log::debug!("Hidden until {}", state.player.hide_until);
            }
            ItemKind::SpeedPotion => {
                let until = now + state.tuning.speed_duration_ms;
                state.player.sped_up_until = Some(until);
                state.events.push(GameEvent::PowerUpCollected { kind });
                log::debug!("Speed boost until {}", until);
            }
        }
        respawn_after_pickup(state, field);
    }
}
