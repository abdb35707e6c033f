/// Carousel controller
///
/// Owns the slide list, the current index and the auto-advance timer state.
/// The timer itself is an iced subscription; this module only decides whether
/// it should run and hands out a generation number so that ticks from a
/// canceled timer are ignored.
use std::time::Duration;
use tracing::{debug, info};

use super::data::{default_images, ImageRecord};
use super::library::GalleryStore;

/// Default auto-advance interval
pub const SLIDE_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct CarouselState {
    images: Vec<ImageRecord>,
    index: usize,
    loaded: bool,
    auto_play: bool,
    /// Bumped every time the timer must be canceled and restarted
    generation: u64,
}

impl Default for CarouselState {
    fn default() -> Self {
        Self::new()
    }
}

impl CarouselState {
    pub fn new() -> Self {
        Self {
            images: default_images(),
            index: 0,
            loaded: false,
            auto_play: true,
            generation: 0,
        }
    }

    /// Read the gallery once. Defaults stay in place when the store is empty.
    pub fn mount(&mut self, store: &dyn GalleryStore) {
        let stored = store.load();
        if stored.is_empty() {
            info!("🎞️  Gallery empty, showing {} default slides", self.images.len());
        } else {
            info!("🎞️  Loaded {} memories from the gallery", stored.len());
            self.images = stored;
            self.index = 0;
        }
        self.loaded = true;
        self.restart_timer();
    }

    /// Take a fresh list after the store changed
    pub fn reload(&mut self, images: Vec<ImageRecord>) {
        if images.is_empty() {
            return;
        }
        let length_changed = images.len() != self.images.len();
        self.images = images;
        if self.index >= self.images.len() {
            self.index = self.images.len() - 1;
        }
        self.loaded = true;
        if length_changed {
            self.restart_timer();
        }
    }

    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    pub fn current(&self) -> Option<&ImageRecord> {
        self.images.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_auto_playing(&self) -> bool {
        self.auto_play
    }

    pub fn next(&mut self) {
        let count = self.images.len();
        if count == 0 {
            return;
        }
        self.index = next_index(self.index, count);
    }

    pub fn previous(&mut self) {
        let count = self.images.len();
        if count == 0 {
            return;
        }
        self.index = previous_index(self.index, count);
    }

    /// Jump to a slide; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) {
        if index < self.images.len() {
            self.index = index;
        }
    }

    pub fn toggle_auto_play(&mut self) {
        self.auto_play = !self.auto_play;
        self.restart_timer();
    }

    pub fn set_auto_play(&mut self, auto_play: bool) {
        if self.auto_play != auto_play {
            self.toggle_auto_play();
        }
    }

    /// Generation of the timer that should be running, if any
    pub fn timer(&self) -> Option<u64> {
        if self.loaded && self.auto_play && !self.images.is_empty() {
            Some(self.generation)
        } else {
            None
        }
    }

    /// One auto-advance tick from the timer with the given generation
    pub fn tick(&mut self, generation: u64) {
        if self.timer() != Some(generation) {
            debug!("Dropping stale slide tick (generation {})", generation);
            return;
        }
        self.next();
    }

    fn restart_timer(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

/// `(index + 1) mod count`; `count` must be non-zero
pub fn next_index(index: usize, count: usize) -> usize {
    (index + 1) % count
}

/// `(index - 1 + count) mod count`; `count` must be non-zero
pub fn previous_index(index: usize, count: usize) -> usize {
    (index + count - 1) % count
}
