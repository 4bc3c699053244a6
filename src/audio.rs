//! Sound effects for simulation events
//!
//! The simulation only emits [`GameEvent`]s; this module turns them into
//! fire-and-forget sounds. On the web the sounds are procedurally generated
//! with the Web Audio API - no external files needed.

use crate::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Fruit collected
    Collect,
    /// Potion collected
    PowerUp,
    /// Player caught
    GameOver,
}

impl SoundEffect {
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::ItemCollected { .. } => SoundEffect::Collect,
            GameEvent::PowerUpCollected { .. } => SoundEffect::PowerUp,
            GameEvent::Caught { .. } => SoundEffect::GameOver,
        }
    }
}

/// Anything that can play a sound effect. Playing never fails and never
/// feeds back into the simulation.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);

    /// Apply volume/mute preferences
    fn apply_settings(&mut self, _settings: &Settings) {}
}

/// Play the sound for every event of the last frame
pub fn play_events(sink: &mut dyn AudioSink, events: &[GameEvent]) {
    for event in events {
        sink.play(SoundEffect::for_event(event));
    }
}

/// Silent sink for native builds and headless runs
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("(silent) {:?}", effect);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};
    use crate::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        settings: Settings,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                settings: Settings::default(),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                if ctx.state() == web_sys::AudioContextState::Suspended {
                    if let Err(e) = ctx.resume() {
                        log::warn!("Audio resume failed: {:?}", e);
                    }
                }
            }
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.settings.muted = muted;
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short sine ping starting at `start` (seconds from now)
        fn ping(&self, ctx: &AudioContext, freq: f32, start: f64, duration: f64, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time() + start;

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + duration).ok();
        }

        /// Fruit - bright two-tone ding
        fn play_collect(&self, ctx: &AudioContext, vol: f32) {
            self.ping(ctx, 880.0, 0.0, 0.1, vol * 0.3);
            self.ping(ctx, 1760.0, 0.05, 0.2, vol * 0.3);
        }

        /// Potion - rising sawtooth sweep
        fn play_power_up(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(200.0, t).ok();
            osc.frequency().linear_ramp_to_value_at_time(800.0, t + 0.3).ok();
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.3).ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }

        /// Caught - falling triangle crash
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(150.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(10.0, t + 0.5)
                .ok();
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.5).ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }
    }

    impl AudioSink for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.settings.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            self.resume();

            match effect {
                SoundEffect::Collect => self.play_collect(ctx, vol),
                SoundEffect::PowerUp => self.play_power_up(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
            }
        }

        fn apply_settings(&mut self, settings: &Settings) {
            self.settings = settings.clone().sanitized();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FruitKind, ItemKind};

    #[derive(Default)]
    struct Recorder(Vec<SoundEffect>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect) {
            self.0.push(effect);
        }
    }

    #[test]
    fn events_map_to_sounds() {
        let events = [
            GameEvent::ItemCollected {
                fruit: FruitKind::Apple,
            },
            GameEvent::PowerUpCollected {
                kind: ItemKind::SpeedPotion,
            },
            GameEvent::Caught { score: 10 },
        ];
        let mut recorder = Recorder::default();
        play_events(&mut recorder, &events);
        assert_eq!(
            recorder.0,
            vec![SoundEffect::Collect, SoundEffect::PowerUp, SoundEffect::GameOver]
        );
    }

    #[test]
    fn no_events_no_sounds() {
        let mut recorder = Recorder::default();
        play_events(&mut recorder, &[]);
        assert!(recorder.0.is_empty());
    }
}
