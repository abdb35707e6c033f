/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the storage layer and the UI layer.
use serde::{Deserialize, Serialize};

/// Represents a single memory shown in the carousel
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ImageRecord {
    /// Creation timestamp in milliseconds, doubles as the unique ID
    pub id: i64,
    /// Relative asset path or a `data:` URL with the embedded image
    pub src: String,
    /// Alternative text
    pub alt: String,
    /// Caption rendered under the slide
    pub caption: String,
}

impl ImageRecord {
    pub fn new(id: i64, src: impl Into<String>, alt: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            id,
            src: src.into(),
            alt: alt.into(),
            caption: caption.into(),
        }
    }
}

/// A track in the static playlist
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub id: u32,
    pub title: String,
    pub artist: String,
    /// Asset-relative file name, resolved against the configured base path
    pub src: String,
}

impl Song {
    fn new(id: u32, title: &str, artist: &str, src: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            artist: artist.to_string(),
            src: src.to_string(),
        }
    }
}

const PLACEHOLDER_SRC: &str = "/placeholder.svg?height=600&width=800";

/// Built-in slides shown until the gallery has at least one memory
pub fn default_images() -> Vec<ImageRecord> {
    vec![
        ImageRecord::new(1, PLACEHOLDER_SRC, "Memory 1", "Our first date"),
        ImageRecord::new(2, PLACEHOLDER_SRC, "Memory 2", "Summer vacation"),
        ImageRecord::new(3, PLACEHOLDER_SRC, "Memory 3", "Anniversary celebration"),
    ]
}

/// An ordered list of songs that always holds at least one track
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    songs: Vec<Song>,
}

impl Playlist {
    /// `None` when `songs` is empty
    pub fn new(songs: Vec<Song>) -> Option<Self> {
        if songs.is_empty() {
            None
        } else {
            Some(Self { songs })
        }
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }
}

/// The hardcoded playlist
pub fn default_playlist() -> Playlist {
    Playlist {
        songs: vec![
            Song::new(1, "Pistol", "Cigarettes After Sex", "Pistol - Cigarettes After Sex.mp3"),
            Song::new(2, "Sweet", "Cigarettes After Sex", "Sweet - Cigarettes After Sex.mp3"),
            Song::new(3, "Heavy", "The Marias", "The Marias - Heavy (Official Audio).mp3"),
            Song::new(4, "No One Noticed", "The Marias", "The Marias - No One Noticed (Visualizer).mp3"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_uses_plain_field_names() {
        let record = ImageRecord::new(1700000000000, "data:image/png;base64,AAAA", "Memory", "Our special moment");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], 1700000000000i64);
        assert_eq!(json["src"], "data:image/png;base64,AAAA");
        assert_eq!(json["alt"], "Memory");
        assert_eq!(json["caption"], "Our special moment");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(default_images().len(), 3);
        let playlist = default_playlist();
        assert_eq!(playlist.len(), 4);
        assert_eq!(playlist.songs()[2].artist, "The Marias");
    }

    #[test]
    fn test_playlist_cannot_be_empty() {
        assert!(Playlist::new(Vec::new()).is_none());
        let single = Playlist::new(vec![Song::new(9, "Solo", "Someone", "solo.mp3")]).unwrap();
        assert_eq!(single.len(), 1);
    }
}
