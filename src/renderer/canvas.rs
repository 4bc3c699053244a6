//! Canvas 2D backend

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::frame::{Frame, SpriteInstance, TextAlign, TextLine, colors};
use super::Renderer;
use crate::assets::AssetRegistry;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    sprites: AssetRegistry<HtmlImageElement>,
    pub show_hud: bool,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, sprites: AssetRegistry<HtmlImageElement>) -> Self {
        Self {
            ctx,
            sprites,
            show_hud: true,
        }
    }

    fn draw_sprite(&self, instance: &SpriteInstance) {
        let [x, y, w, h] = instance.rect.map(f64::from);
        self.ctx.set_global_alpha(instance.alpha as f64);

        let image = instance.sprite_id().and_then(|id| self.sprites.get(id));
        match image {
            Some(img) => {
                if let Err(e) = self
                    .ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h)
                {
                    log::warn!("drawImage failed: {:?}", e);
                }
            }
            None => {
                // Missing sprite: draw a flat placeholder instead
                self.ctx.set_fill_style_str(&colors::css(colors::PLACEHOLDER));
                self.ctx.fill_rect(x, y, w, h);
            }
        }

        self.ctx.set_global_alpha(1.0);
    }

    fn draw_text(&self, line: &TextLine) {
        self.ctx.set_fill_style_str(&colors::css(line.color));
        self.ctx.set_font(line.font);
        self.ctx.set_text_align(match line.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        let _ = self.ctx.fill_text(&line.text, line.x as f64, line.y as f64);
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, frame: &Frame) {
        let (w, h) = (frame.width as f64, frame.height as f64);

        self.ctx.set_fill_style_str(&colors::css(frame.background));
        self.ctx.fill_rect(0.0, 0.0, w, h);

        for instance in &frame.sprites {
            self.draw_sprite(instance);
        }

        if self.show_hud {
            for line in &frame.hud {
                self.draw_text(line);
            }
        }

        if let Some(overlay) = frame.overlay {
            self.ctx.set_fill_style_str(&colors::css(overlay));
            self.ctx.fill_rect(0.0, 0.0, w, h);
        }
        for line in &frame.overlay_text {
            self.draw_text(line);
        }
    }
}
