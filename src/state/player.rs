/// Music player state
///
/// Transport logic over a fixed playlist. The actual audio output sits behind
/// [`PlaybackSource`]; every track change reloads the source before any play
/// request is issued.
use tracing::{debug, info, warn};

use super::data::{Playlist, Song};
use crate::error::MuseumResult;
use crate::media::assets::resolve_asset;

/// Something that can play one track at a time
pub trait PlaybackSource {
    /// Load a track and rewind to its start. Playback does not begin.
    fn load(&mut self, src: &str) -> MuseumResult<()>;
    /// Start or resume playback of the loaded track
    fn play(&mut self) -> MuseumResult<()>;
    fn pause(&mut self);
    /// Elapsed time in seconds
    fn position(&self) -> f64;
    /// Total length in seconds, when known
    fn duration(&self) -> Option<f64>;
    /// The loaded track played through to its end
    fn finished(&self) -> bool;
}

/// Last playback failure, kept for on-screen diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackError {
    pub message: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct PlayerState {
    playlist: Playlist,
    asset_base: Option<String>,
    index: usize,
    playing: bool,
    elapsed: f64,
    duration: Option<f64>,
    error: Option<PlaybackError>,
}

impl PlayerState {
    pub fn new(playlist: Playlist, asset_base: Option<String>) -> Self {
        Self {
            playlist,
            asset_base,
            index: 0,
            playing: false,
            elapsed: 0.0,
            duration: None,
            error: None,
        }
    }

    pub fn playlist(&self) -> &[Song] {
        self.playlist.songs()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn error(&self) -> Option<&PlaybackError> {
        self.error.as_ref()
    }

    /// The current song with its `src` resolved against the asset base
    pub fn current_song(&self) -> Song {
        let song = &self.playlist.songs()[self.index];
        Song {
            src: resolve_asset(self.asset_base.as_deref(), &song.src),
            ..song.clone()
        }
    }

    /// Load the first track without playing it
    pub fn attach(&mut self, source: &mut dyn PlaybackSource) {
        self.reload(source);
    }

    pub fn toggle_play_pause(&mut self, source: &mut dyn PlaybackSource) {
        if self.playing {
            source.pause();
            self.playing = false;
        } else {
            self.start(source);
        }
    }

    /// Advance with wraparound and keep playing
    pub fn next(&mut self, source: &mut dyn PlaybackSource) {
        let next = if self.index + 1 >= self.playlist.len() { 0 } else { self.index + 1 };
        self.playing = true;
        self.change_track(next, source);
    }

    /// Step back with wraparound; the playing flag is left alone
    pub fn previous(&mut self, source: &mut dyn PlaybackSource) {
        let previous = if self.index == 0 { self.playlist.len() - 1 } else { self.index - 1 };
        self.change_track(previous, source);
    }

    /// Pick a track from the playlist drawer
    pub fn select(&mut self, index: usize, source: &mut dyn PlaybackSource) {
        if index >= self.playlist.len() {
            return;
        }
        self.playing = true;
        self.change_track(index, source);
    }

    pub fn on_ended(&mut self, source: &mut dyn PlaybackSource) {
        debug!("Track {} ended", self.index);
        self.next(source);
    }

    pub fn on_time_update(&mut self, secs: f64) {
        self.elapsed = secs;
    }

    pub fn on_duration_change(&mut self, secs: Option<f64>) {
        self.duration = secs;
    }

    /// Record a source failure; the playing flag is not touched
    pub fn on_error(&mut self, message: impl std::fmt::Display) {
        let url = self.current_song().src;
        warn!("🔇 Audio error for {}: {}", url, message);
        self.error = Some(PlaybackError {
            message: format!("Error loading audio: {}", message),
            url,
        });
    }

    /// Pull time and end-of-track events from the source
    pub fn poll(&mut self, source: &mut dyn PlaybackSource) {
        if self.playing && source.finished() {
            self.on_ended(source);
            return;
        }
        self.on_time_update(source.position());
        self.on_duration_change(source.duration());
    }

    fn change_track(&mut self, index: usize, source: &mut dyn PlaybackSource) {
        self.index = index;
        self.elapsed = 0.0;
        let song = &self.playlist.songs()[index];
        info!("🎵 Now playing: {} by {}", song.title, song.artist);

        if self.reload(source) && self.playing {
            self.start(source);
        }
    }

    /// Returns whether the source accepted the track
    fn reload(&mut self, source: &mut dyn PlaybackSource) -> bool {
        self.error = None;
        self.duration = None;
        let src = self.current_song().src;
        match source.load(&src) {
            Ok(()) => {
                self.duration = source.duration();
                true
            }
            Err(e) => {
                self.on_error(e);
                false
            }
        }
    }

    fn start(&mut self, source: &mut dyn PlaybackSource) {
        match source.play() {
            Ok(()) => self.playing = true,
            Err(e) => {
                warn!("⚠️  Error playing audio: {}", e);
                self.playing = false;
            }
        }
    }
}

/// `m:ss`; anything that is not a finite, non-negative number shows as `0:00`
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "0:00".to_string();
    }
    let minutes = (secs / 60.0).floor() as u64;
    let seconds = (secs % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, seconds)
}

/// Fill ratio for the progress bar, in `[0, 1]`
pub fn progress_fraction(elapsed: f64, duration: Option<f64>) -> f32 {
    match duration {
        Some(total) if total.is_finite() && total > 0.0 && elapsed.is_finite() => {
            (elapsed / total).clamp(0.0, 1.0) as f32
        }
        _ => 0.0,
    }
}
