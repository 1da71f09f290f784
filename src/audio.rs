//! Audio routing
//!
//! The sim never touches an audio device; it reports events and owns the
//! music fade level. This module turns those into playback calls on a
//! host-provided backend, applying the user's volume preferences.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A missile detonating against the player
    Explosion,
}

/// Playback seam implemented by the host framework.
///
/// All volumes arrive pre-computed in 0..1; the backend only plays.
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32);
    fn start_music(&mut self, volume: f32);
    fn set_music_volume(&mut self, volume: f32);
    fn stop_music(&mut self);
}

/// Backend that plays nothing; used headless and in tests.
#[derive(Debug, Default)]
pub struct NullBackend;

impl AudioBackend for NullBackend {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
    fn start_music(&mut self, _volume: f32) {}
    fn set_music_volume(&mut self, _volume: f32) {}
    fn stop_music(&mut self) {}
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    last_music_volume: f32,
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            last_music_volume: 0.0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Music level scaled by user preferences; `level` is the sim's own fade
    /// scalar.
    fn effective_music_volume(&self, level: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume * level
        }
    }

    /// Begin looping the background music at full level.
    pub fn start_music(&mut self) {
        let vol = self.effective_music_volume(1.0);
        self.backend.start_music(vol);
        self.last_music_volume = vol;
    }

    /// React to this tick's simulation events.
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Detonation => self.play(SoundEffect::Explosion),
                GameEvent::MusicStopped => self.backend.stop_music(),
                GameEvent::Restarted => self.start_music(),
                GameEvent::DifficultyRaised { .. } | GameEvent::RunEnded { .. } => {}
            }
        }
    }

    /// Push the sim's music fade level to the backend when it changes.
    pub fn sync_music(&mut self, level: f32) {
        let vol = self.effective_music_volume(level);
        if (vol - self.last_music_volume).abs() > f32::EPSILON {
            self.backend.set_music_volume(vol);
            self.last_music_volume = vol;
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_sfx_volume();
        if vol <= 0.0 {
            return;
        }
        log::debug!("sfx {:?} at volume {:.2}", effect, vol);
        self.backend.play(effect, vol);
    }
}
