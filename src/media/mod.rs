/// Media collaborators
///
/// This module handles:
/// - Converting picked image files into embeddable `data:` URLs
/// - Resolving asset paths against the configured base path
/// - Audio output for the music player

pub mod assets;
pub mod audio;
pub mod encode;
