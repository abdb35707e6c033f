/// View layer
///
/// One module per page section. Each exposes a `view` function building an
/// iced `Element` from the matching piece of state in `crate::state`.
use iced::Color;

pub mod carousel;
pub mod form;
pub mod player;
pub mod progress;
pub mod toast;

/// Accent used for buttons, the active slide dot and the progress fill
pub const PINK: Color = Color::from_rgb(1.0, 0.82, 0.875);
pub const TRACK_GREY: Color = Color::from_rgb(0.95, 0.95, 0.95);
pub const ERROR_RED: Color = Color::from_rgb(0.73, 0.11, 0.11);
pub const MUTED: Color = Color::from_rgb(0.45, 0.45, 0.45);
