//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn::spawn;
use crate::{Field, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player moving, enemy chasing
    Active,
    /// Player was caught; only a restart leaves this phase
    GameOver,
}

/// Cosmetic fruit variety (no gameplay effect)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FruitKind {
    Apple,
    Grapes,
    Orange,
    Watermelon,
}

impl FruitKind {
    pub const ALL: [FruitKind; 4] = [
        FruitKind::Apple,
        FruitKind::Grapes,
        FruitKind::Orange,
        FruitKind::Watermelon,
    ];
}

/// Collectible item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Fruit(FruitKind),
    HidePotion,
    SpeedPotion,
}

impl ItemKind {
    pub fn is_fruit(&self) -> bool {
        matches!(self, ItemKind::Fruit(_))
    }

    pub fn is_potion(&self) -> bool {
        !self.is_fruit()
    }
}

/// Which kind of item the spawn policy should create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKind {
    /// A fruit with a random cosmetic variety
    Fruit,
    HidePotion,
    SpeedPotion,
}

/// A collectible item. `pos` is the item's center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    pub pos: Vec2,
    pub size: f32,
}

/// The player's avatar. `pos` is the top-left corner of its box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
    pub base_speed: f32,
    /// Speed applied this frame (base or boosted)
    pub speed: f32,
    /// Invisible to the enemy
    pub hidden: bool,
    /// Timestamp (ms) the invisibility ends
    pub hide_until: f64,
    /// Timestamp (ms) of the last moment the speed boost applies
    pub sped_up_until: Option<f64>,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            size: tuning.player_size,
            base_speed: tuning.player_base_speed,
            speed: tuning.player_base_speed,
            hidden: false,
            hide_until: 0.0,
            sped_up_until: None,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// The boost still applies at the deadline itself
    pub fn is_boosted(&self, now: f64) -> bool {
        self.sped_up_until.is_some_and(|until| now <= until)
    }

    /// Clear invisibility once its window has elapsed
    pub fn expire_effects(&mut self, now: f64, tuning: &Tuning) {
        if self.hidden && now >= self.hide_until {
            self.hidden = false;
            log::debug!("Invisibility expired at {}", now);
        }
        self.speed = if self.is_boosted(now) {
            self.base_speed * tuning.speed_boost_factor
        } else {
            self.base_speed
        };
    }

    /// Move by a {-1,0,1}² direction, normalized so diagonals are not faster
    pub fn apply_direction(&mut self, direction: Vec2, field: Field) {
        let dir = direction.normalize_or_zero();
        self.pos += dir * self.speed;
        self.pos = field.clamp_corner(self.pos, self.size);
    }
}

/// The chasing enemy. `pos` is the top-left corner of its box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    /// Last place the player was seen while visible (top-left corner)
    pub last_known_target: Option<Vec2>,
}

impl Enemy {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            size: tuning.enemy_size,
            speed: tuning.enemy_speed,
            last_known_target: None,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// Something the frontend should react to (sound, HUD flash)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Fruit collected
    ItemCollected { fruit: FruitKind },
    /// Potion collected
    PowerUpCollected { kind: ItemKind },
    /// Enemy reached the visible player
    Caught { score: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u32,
    pub player: Player,
    pub enemy: Enemy,
    /// Active items (sorted by id)
    pub items: Vec<Item>,
    /// Events produced by the most recent advance
    pub events: Vec<GameEvent>,
    /// Frames advanced since the last reset
    pub frame: u64,
    /// Next item ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh game on `field` with default tuning
    pub fn new(seed: u64, field: Field) -> Self {
        Self::with_tuning(seed, field, Tuning::default())
    }

    pub fn with_tuning(seed: u64, field: Field, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(Vec2::ZERO, &tuning),
            enemy: Enemy::new(Vec2::ZERO, &tuning),
            tuning,
            phase: GamePhase::Active,
            score: 0,
            items: Vec::new(),
            events: Vec::new(),
            frame: 0,
            next_id: 1,
        };
        state.reset(field);
        state
    }

    /// Allocate a new item ID
    pub fn next_item_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Start a new round: entities to their start spots, fresh item set
    pub fn reset(&mut self, field: Field) {
        self.score = 0;
        self.phase = GamePhase::Active;
        self.frame = 0;
        self.events.clear();

        let (px, py) = self.tuning.player_start;
        let (ex, ey) = self.tuning.enemy_start;
        self.player = Player::new(field.at_fraction(px, py), &self.tuning);
        self.player.pos = field.clamp_corner(self.player.pos, self.player.size);
        self.enemy = Enemy::new(field.at_fraction(ex, ey), &self.tuning);
        self.enemy.pos = field.clamp_corner(self.enemy.pos, self.enemy.size);

        self.items.clear();
        for _ in 0..self.tuning.initial_fruit {
            spawn(self, SpawnKind::Fruit, field);
        }
        for _ in 0..self.tuning.initial_hide_potions {
            spawn(self, SpawnKind::HidePotion, field);
        }
        for _ in 0..self.tuning.initial_speed_potions {
            spawn(self, SpawnKind::SpeedPotion, field);
        }

        log::info!(
            "Round reset on {}x{} field with {} items",
            field.width,
            field.height,
            self.items.len()
        );
    }

    /// Restart command: only honored after the player was caught
    pub fn request_restart(&mut self, field: Field) -> bool {
        if !self.is_game_over() {
            return false;
        }
        self.reset(field);
        true
    }

    pub fn count_items(&self, pred: impl Fn(&ItemKind) -> bool) -> usize {
        self.items.iter().filter(|item| pred(&item.kind)).count()
    }
}
