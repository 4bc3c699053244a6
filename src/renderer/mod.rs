//! Rendering module
//!
//! The game state is turned into a [`Frame`] draw list each frame; backends
//! implement [`Renderer`] to put it on screen. The web build draws with the
//! Canvas 2D context.

pub mod frame;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use frame::{Frame, SpriteInstance, TextAlign, TextLine, colors};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

/// A read-only consumer of frames
pub trait Renderer {
    fn render(&mut self, frame: &Frame);
}

/// Renderer for headless runs: logs the HUD whenever it changes
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_hud: Vec<String>,
    pub frames: u64,
}

impl Renderer for LogRenderer {
    fn render(&mut self, frame: &Frame) {
        self.frames += 1;
        let hud: Vec<String> = frame
            .hud
            .iter()
            .chain(frame.overlay_text.iter())
            .map(|line| line.text.clone())
            .collect();
        if hud != self.last_hud {
            log::info!("[frame {}] {}", self.frames, hud.join(" | "));
            self.last_hud = hud;
        }
    }
}
