//! Fruit Chase - A top-down fruit collecting arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, enemy AI, pickups, game state)
//! - `renderer`: Draw list construction and the Canvas 2D backend
//! - `audio`: Sound effects triggered by simulation events
//! - `input`: Held-key state and direction snapshots
//! - `assets`: Sprite identifiers and loaded handles
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod audio;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

use audio::{AudioSink, play_events};
use renderer::{Frame, Renderer};
use sim::{GameState, TickInput};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Player and enemy bounding box edge (pixels)
    pub const ENTITY_SIZE: f32 = 32.0;
    /// Item sprite edge (pixels)
    pub const ITEM_SIZE: f32 = 32.0;

    /// Player speed without boost (pixels per frame)
    pub const PLAYER_BASE_SPEED: f32 = 2.5;
    /// Speed potion multiplier
    pub const SPEED_BOOST_FACTOR: f32 = 1.6;
    /// Enemy speed (pixels per frame)
    pub const ENEMY_SPEED: f32 = 1.8;
    /// Enemy stops moving once this close to its target
    pub const ENEMY_ARRIVE_DISTANCE: f32 = 1.0;

    /// Catch distance is (player size + enemy size) * this
    pub const CATCH_FACTOR: f32 = 0.45;
    /// Pickup distance from the player's center to an item
    pub const PICKUP_RADIUS: f32 = 35.0;

    /// Score per fruit
    pub const FRUIT_REWARD: u32 = 5;
    /// Invisibility duration (ms)
    pub const HIDE_DURATION_MS: f64 = 5000.0;
    /// Speed boost duration (ms)
    pub const SPEED_DURATION_MS: f64 = 4000.0;

    /// Respawn chances, each drawn independently per pickup
    pub const RESPAWN_FRUIT_CHANCE: f64 = 0.8;
    pub const RESPAWN_HIDE_CHANCE: f64 = 0.05;
    pub const RESPAWN_SPEED_CHANCE: f64 = 0.05;

    /// Items never spawn closer than this to a field edge
    pub const SPAWN_MARGIN: f32 = 20.0;

    /// Initial item set
    pub const INITIAL_FRUIT: usize = 5;
    pub const INITIAL_HIDE_POTIONS: usize = 1;
    pub const INITIAL_SPEED_POTIONS: usize = 1;

    /// Start positions as fractions of the field
    pub const PLAYER_START: (f32, f32) = (0.1, 0.2);
    pub const ENEMY_START: (f32, f32) = (0.8, 0.5);
}

/// Current playable area in pixels (changes on resize)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Top-left position range for a box of `size` that keeps it fully inside
    #[inline]
    pub fn max_corner(&self, size: f32) -> Vec2 {
        Vec2::new((self.width - size).max(0.0), (self.height - size).max(0.0))
    }

    /// Clamp a box's top-left corner so the box stays on the field
    #[inline]
    pub fn clamp_corner(&self, pos: Vec2, size: f32) -> Vec2 {
        pos.clamp(Vec2::ZERO, self.max_corner(size))
    }

    /// Point at fractional coordinates (0..1) of the field
    #[inline]
    pub fn at_fraction(&self, fx: f32, fy: f32) -> Vec2 {
        Vec2::new(self.width * fx, self.height * fy)
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Move `from` toward `to` by at most `max_step`
#[inline]
pub fn step_toward(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist <= max_step || dist == 0.0 {
        to
    } else {
        from + delta / dist * max_step
    }
}

/// One pass of the frame loop: simulate, notify audio, render
pub fn run_frame(
    state: &mut GameState,
    input: &TickInput,
    now: f64,
    field: Field,
    renderer: &mut dyn Renderer,
    audio: &mut dyn AudioSink,
) {
    sim::advance(state, input, now, field);
    play_events(audio, &state.events);
    renderer.render(&Frame::build(state, field));
}
