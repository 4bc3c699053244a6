//! Idle/demo mode steering
//!
//! Heads for the nearest item and runs from the enemy when it gets close.
//! Output is snapped to the same {-1, 0, 1} grid the keyboard produces.

use glam::Vec2;

use super::state::GameState;

/// Enemy distance (center to center) that triggers fleeing
pub const DANGER_RADIUS: f32 = 140.0;

/// Components below this (after normalizing) snap to zero
const AXIS_DEADZONE: f32 = 0.38;

/// Pick a direction for the player this frame
pub fn steer(state: &GameState) -> Vec2 {
    let me = state.player.center();
    let mut desired = Vec2::ZERO;

    let nearest = state.items.iter().min_by(|a, b| {
        a.pos
            .distance_squared(me)
            .partial_cmp(&b.pos.distance_squared(me))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    if let Some(item) = nearest {
        desired += (item.pos - me).normalize_or_zero();
    }

    // Hidden players don't need to run
    if !state.player.hidden {
        let away = me - state.enemy.center();
        let dist = away.length();
        if dist < DANGER_RADIUS {
            let urgency = (DANGER_RADIUS / dist.max(1.0)).min(4.0);
            desired += away.normalize_or_zero() * urgency;
        }
    }

    snap(desired)
}

fn snap(v: Vec2) -> Vec2 {
    let v = v.normalize_or_zero();
    Vec2::new(snap_axis(v.x), snap_axis(v.y))
}

fn snap_axis(c: f32) -> f32 {
    if c > AXIS_DEADZONE {
        1.0
    } else if c < -AXIS_DEADZONE {
        -1.0
    } else {
        0.0
    }
}
