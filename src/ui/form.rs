/// Add-memory form view
use iced::widget::image::Handle;
use iced::widget::{button, column, container, image, row, text, text_input};
use iced::{Alignment, ContentFit, Element, Length};

use super::MUTED;
use crate::state::form::{AddMemoryForm, Selection};
use crate::Message;

pub fn view<'a>(form: &'a AddMemoryForm, preview: Option<&'a Handle>) -> Element<'a, Message> {
    let picker = button(
        column![
            text("⇪").size(24).color(MUTED),
            text("Click to select an image").size(14).color(MUTED),
        ]
        .align_x(Alignment::Center),
    )
    .on_press(Message::PickImage)
    .style(button::secondary)
    .width(Length::Fill)
    .padding(24);

    let selection: Element<'a, Message> = match (form.selection(), preview) {
        (Selection::Converting(_), _) => text("Preparing preview...").color(MUTED).into(),
        (Selection::FileSelected { name, .. }, Some(handle)) => row![
            image(handle.clone())
                .content_fit(ContentFit::Cover)
                .width(Length::Fill)
                .height(Length::Fixed(180.0)),
            column![
                button(text("✕"))
                    .on_press(Message::ClearForm)
                    .style(button::danger),
                text(name.as_str()).size(11).color(MUTED),
            ]
            .spacing(4),
        ]
        .spacing(8)
        .into(),
        _ => column![].into(),
    };

    let caption = text_input("describe our memory my love", form.caption())
        .on_input(Message::CaptionChanged)
        .padding(10);

    let submit = button(text("Add to Our Museum"))
        .on_press_maybe(form.can_submit().then_some(Message::SubmitMemory))
        .style(button::primary)
        .width(Length::Fill);

    container(
        column![
            text("Add New Memories").size(24),
            text("Upload Image").size(14),
            picker,
            selection,
            text("Caption").size(14),
            caption,
            submit,
        ]
        .spacing(12),
    )
    .padding(24)
    .width(Length::Fill)
    .into()
}
