/// Music player bar and playlist drawer
use iced::widget::{button, canvas, column, container, horizontal_space, row, text, Column};
use iced::{Alignment, Element, Length};

use super::progress::ProgressBar;
use super::{ERROR_RED, MUTED};
use crate::state::player::{format_time, progress_fraction, PlayerState};
use crate::Message;

pub fn view(player: &PlayerState, playlist_open: bool) -> Element<'_, Message> {
    let song = player.current_song();

    let mut content = Column::new().spacing(4).padding([8, 16]);

    // Diagnostics only show up after a failure
    if let Some(error) = player.error() {
        content = content.push(
            column![
                text(error.message.clone()).size(14).color(ERROR_RED),
                text(format!("Current URL: {}", error.url)).size(12).color(ERROR_RED),
            ]
            .spacing(2),
        );
    }

    let play_label = if player.is_playing() { "⏸" } else { "▶" };
    let times = format!(
        "{} - {}",
        format_time(player.elapsed()),
        format_time(player.duration().unwrap_or(f64::NAN)),
    );

    let bar = row![
        text("♪ Now Playing:").size(12).color(MUTED),
        text(song.title).size(14),
        text(format!("by {}", song.artist)).size(12).color(MUTED),
        horizontal_space(),
        button(text("⏮").size(14))
            .on_press(Message::PreviousTrack)
            .style(button::secondary),
        button(text(play_label).size(16))
            .on_press(Message::TogglePlay)
            .style(button::primary),
        button(text("⏭").size(14))
            .on_press(Message::NextTrack)
            .style(button::secondary),
        text(times).size(12),
        button(text("☰").size(14))
            .on_press(Message::TogglePlaylist)
            .style(button::text),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let progress = canvas(ProgressBar {
        fraction: progress_fraction(player.elapsed(), player.duration()),
    })
    .width(Length::Fill)
    .height(Length::Fixed(4.0));

    content = content.push(bar).push(progress);

    if playlist_open {
        content = content.push(drawer(player));
    }

    container(content).width(Length::Fill).into()
}

/// "Our favorite songs"
fn drawer(player: &PlayerState) -> Element<'_, Message> {
    let entries = player.playlist().iter().enumerate().map(|(index, song)| {
        let style = if index == player.index() {
            button::primary
        } else {
            button::text
        };
        button(
            column![
                text(song.title.as_str()).size(14),
                text(song.artist.as_str()).size(11).color(MUTED),
            ]
            .spacing(2),
        )
        .on_press(Message::SelectTrack(index))
        .style(style)
        .width(Length::Fill)
        .into()
    });

    column![
        text("Playlist").size(18),
        text("Our favorite songs").size(12).color(MUTED),
        Column::with_children(entries).spacing(4),
    ]
    .spacing(6)
    .padding([8, 0])
    .into()
}
