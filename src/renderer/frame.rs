//! Per-frame draw list built from the game state
//!
//! Renderers are read-only consumers: they get a [`Frame`] and never touch
//! the simulation.

use bytemuck::{Pod, Zeroable};

use crate::Field;
use crate::assets::SpriteId;
use crate::sim::{GamePhase, GameState};

/// One sprite to draw, laid out for direct upload to a GPU buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Top-left x, top-left y, width, height (pixels)
    pub rect: [f32; 4],
    pub alpha: f32,
    /// `SpriteId as u32`
    pub sprite: u32,
}

impl SpriteInstance {
    pub fn new(sprite: SpriteId, x: f32, y: f32, size: f32, alpha: f32) -> Self {
        Self {
            rect: [x, y, size, size],
            alpha,
            sprite: sprite as u32,
        }
    }

    pub fn sprite_id(&self) -> Option<SpriteId> {
        SpriteId::from_index(self.sprite)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// A line of text in screen space
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font: &'static str,
    pub align: TextAlign,
    pub color: [f32; 4],
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.133, 0.133, 0.2, 1.0]; // #223
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.6];
    pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const HIDDEN_TEXT: [f32; 4] = [0.6, 0.8, 1.0, 1.0];
    /// Fill for sprites whose image failed to load
    pub const PLACEHOLDER: [f32; 4] = [1.0, 0.0, 1.0, 1.0];

    /// CSS `rgba()` string for canvas fill styles
    pub fn css(c: [f32; 4]) -> String {
        let ch = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("rgba({},{},{},{})", ch(c[0]), ch(c[1]), ch(c[2]), c[3])
    }
}

/// Player alpha while invisible to the enemy
pub const HIDDEN_ALPHA: f32 = 0.5;

/// Everything a renderer needs for one frame, in draw order
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub background: [f32; 4],
    pub sprites: Vec<SpriteInstance>,
    /// Score and status text
    pub hud: Vec<TextLine>,
    /// Dimming color drawn over the scene on game over
    pub overlay: Option<[f32; 4]>,
    /// Text drawn on top of the overlay
    pub overlay_text: Vec<TextLine>,
}

impl Frame {
    pub fn build(state: &GameState, field: Field) -> Self {
        let mut sprites = Vec::with_capacity(state.items.len() + 2);

        // Items are positioned by their centers
        for item in &state.items {
            let half = item.size / 2.0;
            sprites.push(SpriteInstance::new(
                SpriteId::for_item(item.kind),
                item.pos.x - half,
                item.pos.y - half,
                item.size,
                1.0,
            ));
        }

        let player = &state.player;
        let alpha = if player.hidden { HIDDEN_ALPHA } else { 1.0 };
        sprites.push(SpriteInstance::new(
            SpriteId::Player,
            player.pos.x,
            player.pos.y,
            player.size,
            alpha,
        ));

        let enemy = &state.enemy;
        sprites.push(SpriteInstance::new(
            SpriteId::Enemy,
            enemy.pos.x,
            enemy.pos.y,
            enemy.size,
            1.0,
        ));

        let mut hud = vec![TextLine {
            text: format!("Score: {}", state.score),
            x: 12.0,
            y: 28.0,
            font: "20px Arial",
            align: TextAlign::Left,
            color: colors::TEXT,
        }];
        if player.hidden {
            hud.push(TextLine {
                text: "(HIDDEN)".to_string(),
                x: 12.0,
                y: 52.0,
                font: "16px Arial",
                align: TextAlign::Left,
                color: colors::HIDDEN_TEXT,
            });
        }

        let (overlay, overlay_text) = if state.phase == GamePhase::GameOver {
            let cx = field.width / 2.0;
            let cy = field.height / 2.0;
            (
                Some(colors::OVERLAY),
                vec![
                    TextLine {
                        text: format!("CAUGHT! Score: {}", state.score),
                        x: cx,
                        y: cy,
                        font: "30px Impact",
                        align: TextAlign::Center,
                        color: colors::TEXT,
                    },
                    TextLine {
                        text: "Press R to restart".to_string(),
                        x: cx,
                        y: cy + 30.0,
                        font: "16px Arial",
                        align: TextAlign::Center,
                        color: colors::TEXT,
                    },
                ],
            )
        } else {
            (None, Vec::new())
        };

        Self {
            width: field.width,
            height: field.height,
            background: colors::BACKGROUND,
            sprites,
            hud,
            overlay,
            overlay_text,
        }
    }

    /// Sprite instances as raw bytes
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sprites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const FIELD: Field = Field::new(640.0, 480.0);

    #[test]
    fn draw_order_items_player_enemy() {
        let state = GameState::new(5, FIELD);
        let frame = Frame::build(&state, FIELD);
        assert_eq!(frame.sprites.len(), state.items.len() + 2);
        let n = frame.sprites.len();
        assert_eq!(frame.sprites[n - 2].sprite_id(), Some(SpriteId::Player));
        assert_eq!(frame.sprites[n - 1].sprite_id(), Some(SpriteId::Enemy));
        assert!(frame.overlay.is_none());
        assert_eq!(frame.hud.len(), 1);
    }

    #[test]
    fn items_are_drawn_centered() {
        let state = GameState::new(5, FIELD);
        let frame = Frame::build(&state, FIELD);
        let item = &state.items[0];
        let rect = frame.sprites[0].rect;
        assert_eq!(Vec2::new(rect[0], rect[1]), item.pos - Vec2::splat(16.0));
    }

    #[test]
    fn hidden_player_is_translucent() {
        let mut state = GameState::new(5, FIELD);
        state.player.hidden = true;
        let frame = Frame::build(&state, FIELD);
        let player = frame
            .sprites
            .iter()
            .find(|s| s.sprite_id() == Some(SpriteId::Player))
            .unwrap();
        assert_eq!(player.alpha, HIDDEN_ALPHA);
        assert!(frame.hud.iter().any(|t| t.text == "(HIDDEN)"));
    }

    #[test]
    fn game_over_overlay() {
        let mut state = GameState::new(5, FIELD);
        state.score = 35;
        state.phase = GamePhase::GameOver;
        let frame = Frame::build(&state, FIELD);
        assert_eq!(frame.overlay, Some(colors::OVERLAY));
        assert_eq!(frame.overlay_text[0].text, "CAUGHT! Score: 35");
        assert_eq!(frame.overlay_text[0].x, 320.0);
    }

    #[test]
    fn instance_bytes_match_layout() {
        let state = GameState::new(5, FIELD);
        let frame = Frame::build(&state, FIELD);
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 24);
        assert_eq!(frame.instance_bytes().len(), frame.sprites.len() * 24);
    }

    #[test]
    fn css_colors() {
        assert_eq!(colors::css(colors::OVERLAY), "rgba(0,0,0,0.6)");
    }
}
