/// Carousel view and the decoded slide cache
use iced::widget::image::Handle;
use iced::widget::{button, column, container, horizontal_space, image, row, text};
use iced::{Alignment, ContentFit, Element, Length};
use iced_aw::Wrap;
use ::image::ImageFormat;
use std::collections::HashMap;

use super::MUTED;
use crate::media::assets::{resolve_asset, without_query};
use crate::media::encode::decode_data_url;
use crate::state::carousel::CarouselState;
use crate::state::data::ImageRecord;
use crate::Message;

/// Image handles for the current slide list, keyed by record id.
///
/// Built once per list change so `data:` URLs are not decoded every frame.
#[derive(Debug, Default)]
pub struct SlideCache {
    handles: HashMap<i64, Handle>,
}

impl SlideCache {
    pub fn rebuild(&mut self, images: &[ImageRecord], asset_base: Option<&str>) {
        self.handles = images
            .iter()
            .filter_map(|record| Some((record.id, slide_handle(&record.src, asset_base)?)))
            .collect();
    }

    pub fn get(&self, id: i64) -> Option<&Handle> {
        self.handles.get(&id)
    }
}

/// Embedded images are decoded in memory, raster asset paths are loaded from
/// disk. Anything the image widget cannot draw (SVG placeholders) has no handle
/// and the slide shows its alt text instead.
pub fn slide_handle(src: &str, asset_base: Option<&str>) -> Option<Handle> {
    if let Some((_, bytes)) = decode_data_url(src) {
        return Some(Handle::from_bytes(bytes));
    }

    let path = resolve_asset(asset_base, without_query(src));
    ImageFormat::from_path(&path).ok()?;
    Some(Handle::from_path(path))
}

pub fn view<'a>(carousel: &'a CarouselState, slides: &'a SlideCache) -> Element<'a, Message> {
    if !carousel.is_loaded() {
        return centered(text("Loading..."));
    }

    let Some(current) = carousel.current() else {
        return centered(
            text("No images added yet. Add your first memory below!").color(MUTED),
        );
    };

    let picture: Element<'a, Message> = match slides.get(current.id) {
        Some(handle) => image(handle.clone())
            .content_fit(ContentFit::Cover)
            .width(Length::Fill)
            .height(Length::Fixed(360.0))
            .into(),
        None => container(text(&current.alt).color(MUTED))
            .width(Length::Fill)
            .height(Length::Fixed(360.0))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    };

    let navigation = row![
        button(text("‹").size(24))
            .on_press(Message::PreviousSlide)
            .style(button::secondary),
        horizontal_space(),
        button(text("›").size(24))
            .on_press(Message::NextSlide)
            .style(button::secondary),
    ]
    .align_y(Alignment::Center);

    let dots: Vec<Element<'a, Message>> = (0..carousel.len())
        .map(|index| {
            let active = index == carousel.index();
            button(text(if active { "●" } else { "○" }).size(12))
                .on_press(Message::SelectSlide(index))
                .style(if active { button::primary } else { button::text })
                .padding(2)
                .into()
        })
        .collect();

    let slideshow_label = if carousel.is_auto_playing() {
        "Pause Slideshow"
    } else {
        "Play Slideshow"
    };

    column![
        picture,
        text(&current.caption).size(20),
        navigation,
        Wrap::with_elements(dots).spacing(6.0),
        button(text(slideshow_label).size(14))
            .on_press(Message::ToggleSlideshow)
            .style(button::secondary),
    ]
    .spacing(12)
    .align_x(Alignment::Center)
    .into()
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fixed(256.0))
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
