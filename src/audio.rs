//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use crate::sim::{GameEvent, Scene};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Knife thrown
    Throw,
    /// Knife struck another knife
    Collide,
    /// Knife stuck in the target
    Thud,
    /// Target split apart
    Broken,
    /// All levels cleared
    Pass,
    /// Out of lives
    GameOver,
}

impl SoundEffect {
    /// Sound triggered by a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Throw => Some(SoundEffect::Throw),
            GameEvent::Collide => Some(SoundEffect::Collide),
            GameEvent::KnifeStuck { .. } => Some(SoundEffect::Thud),
            GameEvent::Broken => Some(SoundEffect::Broken),
            GameEvent::SceneChanged(Scene::Pass) => Some(SoundEffect::Pass),
            GameEvent::SceneChanged(Scene::Over) => Some(SoundEffect::GameOver),
            GameEvent::SceneChanged(_)
            | GameEvent::LifeLost { .. }
            | GameEvent::LevelCleared { .. }
            | GameEvent::CountdownExpired => None,
        }
    }
}

/// One note of a jingle: frequency (Hz), start offset and length (seconds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub freq: f32,
    pub at: f64,
    pub len: f64,
}

const fn note(freq: f32, at: f64, len: f64) -> Note {
    Note { freq, at, len }
}

/// C major arpeggio ending on a long high C
const PASS_JINGLE: [Note; 5] = [
    note(523.25, 0.0, 0.12),
    note(659.25, 0.08, 0.12),
    note(783.99, 0.16, 0.12),
    note(987.77, 0.24, 0.12),
    note(1046.5, 0.32, 0.6),
];

/// A minor walk down, last note dragged out
const GAME_OVER_JINGLE: [Note; 4] = [
    note(440.0, 0.0, 0.3),
    note(392.0, 0.28, 0.3),
    note(349.23, 0.56, 0.3),
    note(220.0, 0.84, 0.8),
];

impl SoundEffect {
    /// Note sequence for the multi-note effects; empty for one-shot sounds
    pub fn jingle(self) -> &'static [Note] {
        match self {
            SoundEffect::Pass => &PASS_JINGLE,
            SoundEffect::GameOver => &GAME_OVER_JINGLE,
            SoundEffect::Throw | SoundEffect::Collide | SoundEffect::Thud | SoundEffect::Broken => {
                &[]
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{Note, SoundEffect};
    use crate::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let vol = self.volume;

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Throw => self.play_throw(ctx, vol),
                SoundEffect::Collide => self.play_collide(ctx, vol),
                SoundEffect::Thud => self.play_thud(ctx, vol),
                SoundEffect::Broken => self.play_broken(ctx, vol),
                SoundEffect::Pass => self.play_pass(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
            }
        }

        // === Sound generators ===

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

        /// Throw - quick whoosh up
        fn play_throw(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 250.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency().set_value_at_time(250.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(900.0, t + 0.12)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.18).ok();
        }

        /// Collide - metallic clang
        fn play_collide(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.frequency().set_value_at_time(900.0, t).ok();
                osc.frequency().set_value_at_time(650.0, t + 0.04).ok();
                osc.frequency().set_value_at_time(1200.0, t + 0.08).ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.3).ok();
            }

            // Ring
            if let Some((osc, gain)) = self.create_osc(ctx, 2400.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.15, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.55).ok();
            }
        }

        /// Thud - knife biting into wood
        fn play_thud(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 160.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.frequency().set_value_at_time(160.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(60.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.12).ok();
        }

        /// Broken - crackling split
        fn play_broken(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.35, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.frequency().set_value_at_time(120.0, t).ok();
                osc.frequency().set_value_at_time(1800.0, t + 0.02).ok();
                osc.frequency().set_value_at_time(150.0, t + 0.05).ok();
                osc.frequency().set_value_at_time(1400.0, t + 0.08).ok();
                osc.frequency().set_value_at_time(90.0, t + 0.12).ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.35).ok();
            }

            // Bass thump
            if let Some((osc, gain)) = self.create_osc(ctx, 70.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.4, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.25).ok();
            }
        }

        /// Pass - rising arpeggio with a held top note
        fn play_pass(&self, ctx: &AudioContext, vol: f32) {
            self.play_jingle(ctx, vol, SoundEffect::Pass.jingle(), OscillatorType::Square, 0.18);
        }

        /// Game over - slow minor fall
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            self.play_jingle(ctx, vol, SoundEffect::GameOver.jingle(), OscillatorType::Sawtooth, 0.2);
        }

        fn play_jingle(
            &self,
            ctx: &AudioContext,
            vol: f32,
            notes: &[Note],
            osc_type: OscillatorType,
            level: f32,
        ) {
            let start = ctx.current_time();
            for note in notes {
                let Some((osc, gain)) = self.create_osc(ctx, note.freq, osc_type) else {
                    continue;
                };
                let t = start + note.at;
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain()
                    .linear_ramp_to_value_at_time(vol * level, t + 0.02)
                    .ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + note.len)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + note.len + 0.05).ok();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_sounds() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Throw), Some(SoundEffect::Throw));
        assert_eq!(SoundEffect::for_event(&GameEvent::Collide), Some(SoundEffect::Collide));
        assert_eq!(SoundEffect::for_event(&GameEvent::Broken), Some(SoundEffect::Broken));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::SceneChanged(Scene::Over)),
            Some(SoundEffect::GameOver)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::SceneChanged(Scene::Play)), None);
        assert_eq!(SoundEffect::for_event(&GameEvent::CountdownExpired), None);
    }

    #[test]
    fn test_jingles_rise_and_fall() {
        let pass = SoundEffect::Pass.jingle();
        assert!(pass.windows(2).all(|w| w[1].freq > w[0].freq && w[1].at > w[0].at));

        let over = SoundEffect::GameOver.jingle();
        assert!(over.windows(2).all(|w| w[1].freq < w[0].freq && w[1].at > w[0].at));

        // Resolve on a held note
        assert!(pass.last().is_some_and(|n| n.len > pass[0].len));
        assert!(over.last().is_some_and(|n| n.len > over[0].len));

        assert!(SoundEffect::Throw.jingle().is_empty());
    }
}
