//! Input state and helpers for keyboard and d-pad control.
//!
//! Platform code updates this state on key/touch events; the frame loop
//! reads one [`TickInput`] snapshot from it per frame.

use glam::Vec2;

use crate::sim::{GameState, TickInput, steer};

/// Logical direction a key or d-pad button maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What a key press means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    /// Start a new round (only honored after game over)
    Restart,
    /// Toggle the autopilot
    ToggleIdle,
}

/// Map a DOM `KeyboardEvent.key` value to an action (case-insensitive)
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key.to_ascii_lowercase().as_str() {
        "arrowup" | "w" => Some(KeyAction::Move(Direction::Up)),
        "arrowdown" | "s" => Some(KeyAction::Move(Direction::Down)),
        "arrowleft" | "a" => Some(KeyAction::Move(Direction::Left)),
        "arrowright" | "d" => Some(KeyAction::Move(Direction::Right)),
        "r" => Some(KeyAction::Restart),
        "i" => Some(KeyAction::ToggleIdle),
        _ => None,
    }
}

/// On-screen d-pad button element IDs
pub const DPAD_BUTTONS: [(&str, Direction); 4] = [
    ("dpad-up", Direction::Up),
    ("dpad-down", Direction::Down),
    ("dpad-left", Direction::Left),
    ("dpad-right", Direction::Right),
];

/// Held state per direction.
///
/// Keyboard and d-pad are tracked separately so releasing a d-pad button
/// doesn't cancel a key that is still held.
#[derive(Default, Debug, Clone, Copy)]
pub struct InputState {
    keys: [bool; 4],
    pad: [bool; 4],
    pub idle_mode: bool,
}

fn slot(dir: Direction) -> usize {
    match dir {
        Direction::Up => 0,
        Direction::Down => 1,
        Direction::Left => 2,
        Direction::Right => 3,
    }
}

impl InputState {
    pub fn set_key(&mut self, dir: Direction, held: bool) {
        self.keys[slot(dir)] = held;
    }

    pub fn set_pad(&mut self, dir: Direction, held: bool) {
        self.pad[slot(dir)] = held;
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        self.keys[slot(dir)] || self.pad[slot(dir)]
    }

    /// Handle a key event; returns the action so callers can react to
    /// one-shot commands like restart
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> Option<KeyAction> {
        let action = key_action(key)?;
        match action {
            KeyAction::Move(dir) => self.set_key(dir, pressed),
            KeyAction::ToggleIdle if pressed => {
                self.idle_mode = !self.idle_mode;
                log::info!("Idle mode: {}", self.idle_mode);
            }
            _ => {}
        }
        Some(action)
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.keys = [false; 4];
        self.pad = [false; 4];
    }

    /// Held keys as a vector with each axis in {-1, 0, 1}
    pub fn direction(&self) -> Vec2 {
        let mut d = Vec2::ZERO;
        if self.is_held(Direction::Up) {
            d.y -= 1.0;
        }
        if self.is_held(Direction::Down) {
            d.y += 1.0;
        }
        if self.is_held(Direction::Left) {
            d.x -= 1.0;
        }
        if self.is_held(Direction::Right) {
            d.x += 1.0;
        }
        d
    }

    /// Snapshot for one simulation frame; in idle mode the autopilot
    /// picks the direction instead of the held keys
    pub fn snapshot(&self, state: &GameState) -> TickInput {
        if self.idle_mode {
            TickInput::from_direction(steer(state))
        } else {
            TickInput::from_direction(self.direction())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Field;
    use crate::sim::{Item, ItemKind};

    #[test]
    fn wasd_and_arrows_map_alike() {
        assert_eq!(key_action("W"), key_action("ArrowUp"));
        assert_eq!(key_action("d"), Some(KeyAction::Move(Direction::Right)));
        assert_eq!(key_action("R"), Some(KeyAction::Restart));
        assert_eq!(key_action("Shift"), None);
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut input = InputState::default();
        input.handle_key("ArrowLeft", true);
        input.handle_key("d", true);
        input.handle_key("w", true);
        assert_eq!(input.direction(), Vec2::new(0.0, -1.0));

        input.handle_key("ArrowLeft", false);
        assert_eq!(input.direction(), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn pad_release_keeps_key_held() {
        let mut input = InputState::default();
        input.handle_key("ArrowDown", true);
        input.set_pad(Direction::Down, true);
        input.set_pad(Direction::Down, false);
        assert!(input.is_held(Direction::Down));
    }

    #[test]
    fn idle_toggles_on_press_only() {
        let mut input = InputState::default();
        input.handle_key("i", true);
        input.handle_key("i", false);
        assert!(input.idle_mode);
        input.handle_key("I", true);
        assert!(!input.idle_mode);
    }

    #[test]
    fn idle_snapshot_follows_autopilot() {
        let mut state = GameState::new(5, Field::default());
        state.items.clear();
        state.player.pos = Vec2::new(100.0, 100.0);
        state.enemy.pos = Vec2::new(700.0, 500.0);
        let id = state.next_item_id();
        state.items.push(Item {
            id,
            kind: ItemKind::HidePotion,
            pos: Vec2::new(400.0, 116.0),
            size: 32.0,
        });

        let mut input = InputState::default();
        input.handle_key("ArrowLeft", true);
        assert_eq!(input.snapshot(&state).direction, Vec2::new(-1.0, 0.0));

        input.handle_key("i", true);
        assert_eq!(input.snapshot(&state).direction, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn clear_releases_everything() {
        let mut input = InputState::default();
        input.handle_key("a", true);
        input.set_pad(Direction::Up, true);
        input.clear();
        assert_eq!(input.direction(), Vec2::ZERO);
    }
}
