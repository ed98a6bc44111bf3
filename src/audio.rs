//! Audio identifiers and the volume-aware audio manager
//!
//! Everything is fire-and-forget: the game never waits on a sound or reads
//! anything back from the player.

use crate::settings::Settings;

/// Short one-shot effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits a paddle
    PaddleHit,
}

impl SoundEffect {
    pub fn resource(&self) -> &'static str {
        match self {
            SoundEffect::PaddleHit => "resources/audio/paddle_hit.wav",
        }
    }
}

/// Looping background tracks, one per screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Menu,
    Match,
    Results,
}

impl Track {
    pub fn resource(&self) -> &'static str {
        match self {
            Track::Menu => "resources/audio/menu.ogg",
            Track::Match => "resources/audio/match.ogg",
            Track::Results => "resources/audio/results.ogg",
        }
    }
}

/// Backend that actually makes noise
pub trait AudioPlayer {
    /// Start looping `track`, replacing whatever was playing
    fn play_track(&mut self, track: Track, volume: f32);
    fn stop_track(&mut self);
    /// Play a one-shot effect; effects may overlap freely
    fn play_effect(&mut self, effect: SoundEffect, volume: f32);
}

/// Audio manager for the game
pub struct AudioManager {
    player: Box<dyn AudioPlayer>,
    master_volume: f32,
    music_volume: f32,
    sfx_volume: f32,
    muted: bool,
    current_track: Option<Track>,
}

impl AudioManager {
    pub fn new(player: Box<dyn AudioPlayer>, settings: &Settings) -> Self {
        Self {
            player,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
            current_track: None,
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.stop_music();
        }
    }

    fn music_level(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    fn sfx_level(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Loop `track` in the background, replacing the current one
    pub fn play_music(&mut self, track: Track) {
        let vol = self.music_level();
        if vol <= 0.0 {
            return;
        }
        log::debug!("Looping {} at {:.2}", track.resource(), vol);
        self.player.play_track(track, vol);
        self.current_track = Some(track);
    }

    pub fn stop_music(&mut self) {
        if self.current_track.take().is_some() {
            self.player.stop_track();
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.sfx_level();
        if vol <= 0.0 {
            return;
        }
        self.player.play_effect(effect, vol);
    }

    pub fn current_track(&self) -> Option<Track> {
        self.current_track
    }
}
