//! Frame driver
//!
//! `Game` sits between the platform and the simulation: it queues input
//! actions, turns frame timestamps into clamped ticks, persists the best
//! score and settings, and turns simulation events into sound.

use crate::audio::{AudioManager, SoundEffect};
use crate::best_score::BestScore;
use crate::platform::{Action, FrameClock, KeyValueStore};
use crate::settings::Settings;
use crate::share;
use crate::sim::{GameEvent, Phase, TickInput, World, tick};
use crate::tuning::Tuning;

/// Game instance holding all state
pub struct Game<S: KeyValueStore> {
    pub world: World,
    pub settings: Settings,
    store: S,
    best: BestScore,
    audio: AudioManager,
    clock: FrameClock,
    /// One-shot inputs waiting for the next tick
    input: TickInput,
}

impl<S: KeyValueStore> Game<S> {
    /// Load persisted state from `store` and wait on the start screen
    pub fn new(seed: u64, tuning: Tuning, store: S) -> Self {
        let best = BestScore::load(&store);
        let settings = Settings::load(&store);

        let mut audio = AudioManager::new();
        audio.set_enabled(settings.sound_enabled);
        audio.set_master_volume(settings.master_volume);

        Self {
            world: World::new(seed, tuning, best.value()),
            settings,
            store,
            best,
            audio,
            clock: FrameClock::new(),
            input: TickInput::default(),
        }
    }

    pub fn best(&self) -> u32 {
        self.best.value()
    }

    pub fn score(&self) -> u32 {
        self.world.session.score
    }

    pub fn phase(&self) -> Phase {
        self.world.phase()
    }

    /// Give back the store (e.g. to reopen a game against it)
    pub fn into_store(self) -> S {
        self.store
    }

    /// Queue or perform a user action
    pub fn handle(&mut self, action: Action) {
        match action {
            Action::Flap => self.input.flap = true,
            Action::TogglePause => self.input.pause = true,
            Action::Play => {
                if self.world.phase() == Phase::Start {
                    self.input.flap = true;
                }
            }
            Action::Restart => self.input.restart = true,
            Action::ToggleMute => {
                let enabled = self.settings.toggle_sound();
                self.audio.set_enabled(enabled);
                self.settings.save(&mut self.store);
                if enabled {
                    self.audio.play(SoundEffect::Unmute);
                }
            }
            Action::Share => share::open_share(self.world.session.score),
        }
    }

    /// The page went into the background: pause a running session and
    /// restart frame timing so the return frame is not one long step
    pub fn page_hidden(&mut self) {
        if self.world.is_running() && !self.input.pause {
            self.input.pause = true;
            log::info!("Auto-paused (page hidden)");
        }
        self.clock.reset();
    }

    /// Sprite image finished loading with the given natural size
    pub fn sprite_loaded(&mut self, width: f32, height: f32) {
        let scale = self.world.tuning.sprite_scale;
        self.world.sprite.set_source_size(width, height, scale);
    }

    /// Run one display frame at timestamp `now_ms`, returning what happened
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let dt = self.clock.frame_dt(now_ms);
        let input = std::mem::take(&mut self.input);
        tick(&mut self.world, &input, dt);

        let events = self.world.drain_events();
        for event in &events {
            if let GameEvent::Crashed {
                score,
                new_best: true,
                ..
            } = event
            {
                if self.best.record(*score) {
                    self.best.save(&mut self.store);
                }
            }
            if let Some(effect) = SoundEffect::for_event(event) {
                self.audio.play(effect);
            }
        }
        events
    }
}
