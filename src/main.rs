//! Fruit Chase entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent,
    };

    use fruit_chase::assets::{AssetRegistry, SpriteId};
    use fruit_chase::audio::{AudioManager, AudioSink};
    use fruit_chase::input::{DPAD_BUTTONS, InputState, KeyAction};
    use fruit_chase::renderer::CanvasRenderer;
    use fruit_chase::sim::GameState;
    use fruit_chase::{Field, Settings, run_frame};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        field: Field,
        canvas: HtmlCanvasElement,
        renderer: CanvasRenderer,
        audio: AudioManager,
        settings: Settings,
    }

    impl Game {
        /// Match the canvas to the window and remember the new field size
        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let w = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0);
            let h = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(600.0);
            self.canvas.set_width(w as u32);
            self.canvas.set_height(h as u32);
            self.field = Field::new(w as f32, h as f32);
            log::debug!("Field resized to {}x{}", w, h);
        }

        fn frame(&mut self, now: f64) {
            let input = self.input.snapshot(&self.state);
            run_frame(
                &mut self.state,
                &input,
                now,
                self.field,
                &mut self.renderer,
                &mut self.audio,
            );
        }

        fn key(&mut self, key: &str, pressed: bool) {
            if !pressed {
                self.input.handle_key(key, false);
                return;
            }
            // Any key press counts as the user gesture browsers want
            self.audio.resume();
            if let Some(KeyAction::Restart) = self.input.handle_key(key, true) {
                if self.state.request_restart(self.field) {
                    log::info!("Restarted");
                }
            }
        }
    }

    /// Load every sprite; failures are logged and leave a placeholder
    async fn load_sprites() -> AssetRegistry<HtmlImageElement> {
        let mut registry = AssetRegistry::new();
        for id in SpriteId::ALL {
            let img = match HtmlImageElement::new() {
                Ok(img) => img,
                Err(e) => {
                    registry.mark_failed(id, &format!("{:?}", e));
                    continue;
                }
            };
            img.set_src(&id.path());
            match JsFuture::from(img.decode()).await {
                Ok(_) => registry.insert(id, img),
                Err(e) => registry.mark_failed(id, &format!("{:?}", e)),
            }
        }
        log::info!(
            "Sprites loaded ({} missing)",
            registry.failed().len()
        );
        registry
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Fruit Chase starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        canvas.set_tab_index(0);

        let sprites = load_sprites().await;

        // Preferences may be given as JSON on the canvas element
        let settings =
            Settings::from_json_or_default(canvas.get_attribute("data-settings").as_deref());
        let mut renderer = CanvasRenderer::new(ctx, sprites);
        renderer.show_hud = settings.show_hud;
        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);

        if !settings.show_dpad {
            if let Some(dpad) = document.get_element_by_id("dpad") {
                let _ = dpad.class_list().add_1("hidden");
            }
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, Field::default()),
            input: InputState::default(),
            field: Field::default(),
            canvas,
            renderer,
            audio,
            settings,
        }));
        {
            let mut g = game.borrow_mut();
            g.resize();
            let field = g.field;
            g.state.reset(field);
        }
        log::info!("Game initialized with seed: {}", seed);

        setup_canvas_focus(game.clone());
        setup_keyboard(game.clone());
        setup_dpad(game.clone());
        setup_window_events(game.clone());

        request_animation_frame(game);
        log::info!("Fruit Chase running!");
    }

    /// Clicking the canvas gives it keyboard focus and unlocks audio
    fn setup_canvas_focus(game: Rc<RefCell<Game>>) {
        let canvas = game.borrow().canvas.clone();
        let target = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            if let Err(e) = target.focus() {
                log::warn!("Canvas focus failed: {:?}", e);
            }
            game.borrow().audio.resume();
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().key(&event.key(), true);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().key(&event.key(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// On-screen d-pad for touch devices
    fn setup_dpad(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for (id, dir) in DPAD_BUTTONS {
            let Some(button) = document.get_element_by_id(id) else {
                continue;
            };

            let bind = |events: &[&str], held: bool| {
                let game = game.clone();
                let button_clone = button.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    g.input.set_pad(dir, held);
                    if held {
                        g.audio.resume();
                        let _ = button_clone.class_list().add_1("active");
                    } else {
                        let _ = button_clone.class_list().remove_1("active");
                    }
                });
                let options = web_sys::AddEventListenerOptions::new();
                options.set_passive(false);
                for name in events {
                    let _ = button.add_event_listener_with_callback_and_add_event_listener_options(
                        name,
                        closure.as_ref().unchecked_ref(),
                        &options,
                    );
                }
                closure.forget();
            };

            bind(&["touchstart", "mousedown"], true);
            bind(&["touchend", "touchcancel", "mouseup", "mouseleave"], false);
        }
    }

    fn setup_window_events(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Resize (and screen rotation)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().resize();
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Losing focus would otherwise leave keys stuck down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.input.clear();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ = window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                let muted = g.settings.muted;
                g.audio.set_muted(muted);
            });
            let _ = window
                .add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: the autopilot plays one round and the HUD is logged
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use fruit_chase::audio::NullAudio;
    use fruit_chase::renderer::LogRenderer;
    use fruit_chase::sim::{GameState, TickInput, steer};
    use fruit_chase::{Field, Tuning, run_frame};

    /// Simulated display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after two minutes of game time
    const MAX_FRAMES: u64 = 60 * 120;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Fruit Chase (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let field = Field::default();
    let mut state = GameState::with_tuning(seed, field, tuning);
    let mut renderer = LogRenderer::default();
    let mut audio = NullAudio;

    let mut frame = 0;
    while frame < MAX_FRAMES && !state.is_game_over() {
        let input = TickInput::from_direction(steer(&state));
        run_frame(
            &mut state,
            &input,
            frame as f64 * FRAME_MS,
            field,
            &mut renderer,
            &mut audio,
        );
        frame += 1;
    }

    println!(
        "seed {}: score {} after {} frames ({})",
        seed,
        state.score,
        frame,
        if state.is_game_over() { "caught" } else { "survived" }
    );
}
