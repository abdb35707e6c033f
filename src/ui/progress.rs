/// Track progress bar
/// Thin horizontal bar filled up to the playback fraction
use iced::widget::canvas;
use iced::{Point, Rectangle, Size};

use super::{PINK, TRACK_GREY};
use crate::Message;

#[derive(Debug, Clone, Copy)]
pub struct ProgressBar {
    /// Filled share in `[0, 1]`
    pub fraction: f32,
}

impl canvas::Program<Message> for ProgressBar {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        frame.fill_rectangle(Point::ORIGIN, bounds.size(), TRACK_GREY);

        let filled = bounds.width * self.fraction.clamp(0.0, 1.0);
        if filled > 0.0 {
            frame.fill_rectangle(Point::ORIGIN, Size::new(filled, bounds.height), PINK);
        }

        vec![frame.into_geometry()]
    }
}
