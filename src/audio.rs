//! Audio feedback using the Web Audio API
//!
//! Short synthesized tone bursts - no external files needed. Audio is
//! strictly optional: if no context can be created the game stays silent.

use crate::sim::GameEvent;

/// A single square-wave tone burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Hz
    pub frequency: f32,
    /// Seconds
    pub duration: f64,
    /// Starting gain before the exponential fade
    pub gain: f32,
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Upward impulse
    Flap,
    /// Obstacle passed
    Score,
    /// Session ended
    Crash,
    /// Confirmation when sound is switched on
    Unmute,
}

impl SoundEffect {
    pub fn tone(self) -> Tone {
        let (frequency, duration) = match self {
            SoundEffect::Flap => (1200.0, 0.05),
            SoundEffect::Score => (700.0, 0.05),
            SoundEffect::Crash => (220.0, 0.12),
            SoundEffect::Unmute => (660.0, 0.05),
        };
        Tone {
            frequency,
            duration,
            gain: 0.05,
        }
    }

    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flapped => Some(SoundEffect::Flap),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::Crashed { .. } => Some(SoundEffect::Crash),
            GameEvent::Started => None,
        }
    }
}

/// Level the gain envelope decays to
const FADE_FLOOR: f32 = 0.0001;

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<web_sys::AudioContext>,
    #[cfg(target_arch = "wasm32")]
    ctx_failed: bool,
    master_volume: f32,
    enabled: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    /// The audio context is created lazily on the first sound, which
    /// always follows a user gesture.
    pub fn new() -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx: None,
            #[cfg(target_arch = "wasm32")]
            ctx_failed: false,
            master_volume: 1.0,
            enabled: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Global sound toggle
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.enabled { self.master_volume } else { 0.0 }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.play_tone(effect.tone(), vol);
    }

    #[cfg(target_arch = "wasm32")]
    fn context(&mut self) -> Option<&web_sys::AudioContext> {
        if self.ctx.is_none() && !self.ctx_failed {
            self.ctx = web_sys::AudioContext::new().ok();
            if self.ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
                self.ctx_failed = true;
            }
        }
        self.ctx.as_ref()
    }

    #[cfg(target_arch = "wasm32")]
    fn play_tone(&mut self, tone: Tone, vol: f32) {
        let Some(ctx) = self.context() else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let Ok(osc) = ctx.create_oscillator() else { return };
        let Ok(gain) = ctx.create_gain() else { return };

        osc.set_type(web_sys::OscillatorType::Square);
        osc.frequency().set_value(tone.frequency);
        if osc.connect_with_audio_node(&gain).is_err()
            || gain.connect_with_audio_node(&ctx.destination()).is_err()
        {
            return;
        }

        let t = ctx.current_time();
        gain.gain().set_value_at_time(tone.gain * vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(FADE_FLOOR, t + tone.duration)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + tone.duration).ok();
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn play_tone(&mut self, tone: Tone, vol: f32) {
        log::debug!(
            "Tone {} Hz for {:.2}s at {:.3}",
            tone.frequency,
            tone.duration,
            tone.gain * vol
        );
    }
}
