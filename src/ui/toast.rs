/// Notification stack shown at the top of the window
use iced::widget::{button, column, horizontal_space, row, text, Column};
use iced::{Alignment, Element};

use super::{ERROR_RED, MUTED};
use crate::state::notify::{NotificationQueue, Variant};
use crate::Message;

pub fn view(queue: &NotificationQueue) -> Element<'_, Message> {
    let items = queue.iter().map(|notification| {
        let title_color = match notification.variant {
            Variant::Default => MUTED,
            Variant::Destructive => ERROR_RED,
        };
        row![
            column![
                text(notification.title.as_str()).size(14).color(title_color),
                text(notification.description.as_str()).size(13),
            ]
            .spacing(2),
            horizontal_space(),
            button(text("✕").size(12))
                .on_press(Message::DismissNotification(notification.id))
                .style(button::text),
        ]
        .align_y(Alignment::Center)
        .padding(8)
        .into()
    });

    Column::with_children(items).spacing(4).into()
}
