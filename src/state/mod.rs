/// State management module
///
/// This module handles all application state, including:
/// - Local key/value storage and the gallery repository (library.rs)
/// - Shared data structures (data.rs)
/// - The carousel controller (carousel.rs)
/// - The add-memory form (form.rs)
/// - Music player transport (player.rs)
/// - Transient notifications (notify.rs)

pub mod carousel;
pub mod data;
pub mod form;
pub mod library;
pub mod notify;
pub mod player;
