/// Audio output for the music player
///
/// `RodioSource` plays one decoded file at a time on the default output
/// device. A fresh `Sink` is created per track so position and queue state
/// always start from zero.
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use tracing::{info, warn};

use crate::error::{MuseumError, MuseumResult};
use crate::state::player::PlaybackSource;

pub struct RodioSource {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    total: Option<f64>,
}

impl RodioSource {
    /// Open the default output device
    pub fn new() -> MuseumResult<Self> {
        let (stream, handle) = OutputStream::try_default()?;
        info!("🔊 Audio output ready");
        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
            total: None,
        })
    }
}

impl PlaybackSource for RodioSource {
    fn load(&mut self, src: &str) -> MuseumResult<()> {
        // Dropping the previous sink stops whatever was playing
        self.sink = None;
        self.total = None;

        let file = File::open(src)?;
        let decoder = Decoder::new(BufReader::new(file))?;
        self.total = decoder.total_duration().map(|d| d.as_secs_f64());

        let sink = Sink::try_new(&self.handle)?;
        sink.pause();
        sink.append(decoder);
        self.sink = Some(sink);
        Ok(())
    }

    fn play(&mut self) -> MuseumResult<()> {
        let sink = self
            .sink
            .as_ref()
            .ok_or_else(|| MuseumError::Playback("no track loaded".to_string()))?;
        sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn position(&self) -> f64 {
        self.sink.as_ref().map_or(0.0, |sink| sink.get_pos().as_secs_f64())
    }

    fn duration(&self) -> Option<f64> {
        self.total
    }

    fn finished(&self) -> bool {
        self.sink.as_ref().is_some_and(|sink| sink.empty())
    }
}

/// Stand-in used when there is no audio device; never starts playback
#[derive(Debug, Default)]
pub struct SilentSource {
    loaded: Option<String>,
}

impl PlaybackSource for SilentSource {
    fn load(&mut self, src: &str) -> MuseumResult<()> {
        self.loaded = Some(src.to_string());
        Ok(())
    }

    fn play(&mut self) -> MuseumResult<()> {
        Err(MuseumError::Playback("no audio output device".to_string()))
    }

    fn pause(&mut self) {}

    fn position(&self) -> f64 {
        0.0
    }

    fn duration(&self) -> Option<f64> {
        None
    }

    fn finished(&self) -> bool {
        false
    }
}

/// Real output when available, silence otherwise
pub fn open_output() -> Box<dyn PlaybackSource> {
    match RodioSource::new() {
        Ok(source) => Box::new(source),
        Err(e) => {
            warn!("⚠️  No audio output, music is disabled: {}", e);
            Box::new(SilentSource::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::default_playlist;
    use crate::state::player::PlayerState;

    #[test]
    fn test_silent_source_never_claims_playing() {
        let mut source = SilentSource::default();
        let mut player = PlayerState::new(default_playlist(), None);
        player.attach(&mut source);
        assert_eq!(source.loaded.as_deref(), Some("./Pistol - Cigarettes After Sex.mp3"));

        player.toggle_play_pause(&mut source);
        assert!(!player.is_playing());
        assert!(player.error().is_none());
    }
}
