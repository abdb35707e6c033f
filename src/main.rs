use iced::widget::image::Handle;
use iced::widget::{column, container, scrollable, text};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod media;
mod state;
mod ui;

use config::AppConfig;
use error::MuseumError;
use media::audio::open_output;
use media::encode::{decode_data_url, encode_data_url, IMAGE_EXTENSIONS};
use state::carousel::CarouselState;
use state::data::default_playlist;
use state::form::{AddMemoryForm, MSG_ADDED};
use state::library::{Gallery, KeyValueStorage, MemoryStorage, SqliteStorage};
use state::notify::NotificationQueue;
use state::player::{PlaybackSource, PlayerState};
use ui::carousel::SlideCache;

/// How often the player pulls position and end-of-track from the audio sink
const PLAYER_POLL: Duration = Duration::from_millis(250);

/// Main application state
struct MemoryMuseum {
    config: AppConfig,
    /// The persisted memories
    gallery: Gallery<Box<dyn KeyValueStorage>>,
    carousel: CarouselState,
    slides: SlideCache,
    form: AddMemoryForm,
    /// Decoded preview of the selected image
    preview: Option<Handle>,
    player: PlayerState,
    audio: Box<dyn PlaybackSource>,
    playlist_open: bool,
    notifications: NotificationQueue,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    PreviousSlide,
    NextSlide,
    SelectSlide(usize),
    ToggleSlideshow,
    /// Auto-advance tick carrying the timer generation
    SlideTick(u64),

    /// User clicked the image picker
    PickImage,
    /// Background conversion of the picked file finished
    ImageEncoded(PathBuf, Result<String, Arc<MuseumError>>),
    CaptionChanged(String),
    ClearForm,
    SubmitMemory,

    TogglePlay,
    NextTrack,
    PreviousTrack,
    SelectTrack(usize),
    TogglePlaylist,
    PlayerTick,

    DismissNotification(u64),
    ExpireNotifications(Instant),
}

impl MemoryMuseum {
    /// Create a new instance of the application
    fn new(config: AppConfig) -> (Self, Task<Message>) {
        let gallery = Gallery::new(open_storage(&config));

        let mut carousel = CarouselState::new();
        carousel.set_auto_play(!config.no_autoplay);
        carousel.mount(&gallery);

        let mut slides = SlideCache::default();
        slides.rebuild(carousel.images(), config.asset_base.as_deref());

        let mut audio = open_output();
        let mut player = PlayerState::new(default_playlist(), config.asset_base.clone());
        player.attach(audio.as_mut());

        let mut notifications = NotificationQueue::new();
        notifications.subscribe(|n| info!("🔔 {}: {}", n.title, n.description));

        info!("🎨 Memory Museum initialized with {} slides", carousel.len());

        (
            MemoryMuseum {
                config,
                gallery,
                carousel,
                slides,
                form: AddMemoryForm::new(),
                preview: None,
                player,
                audio,
                playlist_open: false,
                notifications,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PreviousSlide => self.carousel.previous(),
            Message::NextSlide => self.carousel.next(),
            Message::SelectSlide(index) => self.carousel.select(index),
            Message::ToggleSlideshow => self.carousel.toggle_auto_play(),
            Message::SlideTick(generation) => self.carousel.tick(generation),

            Message::PickImage => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title("Select a memory")
                    .add_filter("Images", IMAGE_EXTENSIONS)
                    .pick_file();

                if let Some(path) = file {
                    self.form.begin_selection(path.clone());
                    self.preview = None;

                    // Conversion runs in the background, submit stays disabled meanwhile
                    return Task::perform(encode_data_url(path.clone()), move |result| {
                        Message::ImageEncoded(path.clone(), result.map_err(Arc::new))
                    });
                }
            }
            Message::ImageEncoded(path, result) => {
                match self.form.file_converted(path, result) {
                    Ok(()) => {
                        self.preview = self
                            .form
                            .preview()
                            .and_then(decode_data_url)
                            .map(|(_, bytes)| Handle::from_bytes(bytes));
                    }
                    Err(e) => {
                        self.notifications.error(format!("Could not read that image: {}", e));
                    }
                }
            }
            Message::CaptionChanged(caption) => self.form.set_caption(caption),
            Message::ClearForm => {
                self.form.clear();
                self.preview = None;
            }
            Message::SubmitMemory => {
                let now = Utc::now().timestamp_millis();
                match self.form.submit(&self.gallery, now) {
                    Ok(records) => {
                        self.preview = None;
                        self.notifications.success(MSG_ADDED);
                        // The store handed back the new list, no need to re-read it
                        self.carousel.reload(records);
                        self.slides
                            .rebuild(self.carousel.images(), self.config.asset_base.as_deref());
                    }
                    Err(e) => {
                        warn!("⚠️  Error saving memory: {}", e);
                        self.notifications.error(e.user_message());
                    }
                }
            }

            Message::TogglePlay => self.player.toggle_play_pause(self.audio.as_mut()),
            Message::NextTrack => self.player.next(self.audio.as_mut()),
            Message::PreviousTrack => self.player.previous(self.audio.as_mut()),
            Message::SelectTrack(index) => self.player.select(index, self.audio.as_mut()),
            Message::TogglePlaylist => self.playlist_open = !self.playlist_open,
            Message::PlayerTick => self.player.poll(self.audio.as_mut()),

            Message::DismissNotification(id) => self.notifications.dismiss(id),
            Message::ExpireNotifications(now) => self.notifications.expire(now),
        }

        Task::none()
    }

    /// Timers: slideshow, player polling and notification expiry
    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = Vec::new();

        // Keyed by generation: a new generation cancels the old timer
        if let Some(generation) = self.carousel.timer() {
            subscriptions.push(
                iced::time::every(self.config.slide_interval())
                    .with(generation)
                    .map(|(generation, _)| Message::SlideTick(generation)),
            );
        }

        if self.player.is_playing() {
            subscriptions.push(iced::time::every(PLAYER_POLL).map(|_| Message::PlayerTick));
        }

        if !self.notifications.is_empty() {
            subscriptions.push(
                iced::time::every(Duration::from_secs(1)).map(Message::ExpireNotifications),
            );
        }

        Subscription::batch(subscriptions)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let header = column![
            text("Austin + Hannah").size(48),
            text("🩷🩷🩷").size(20),
        ]
        .spacing(8)
        .align_x(Alignment::Center);

        let page = column![
            ui::toast::view(&self.notifications),
            header,
            ui::carousel::view(&self.carousel, &self.slides),
            ui::form::view(&self.form, self.preview.as_ref()),
        ]
        .spacing(32)
        .padding(40)
        .align_x(Alignment::Center);

        column![
            ui::player::view(&self.player, self.playlist_open),
            scrollable(container(page).width(Length::Fill).center_x(Length::Fill)),
        ]
        .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// SQLite storage in the data directory, or memory when that is unavailable
fn open_storage(config: &AppConfig) -> Box<dyn KeyValueStorage> {
    let dir = config.data_dir.clone().or_else(SqliteStorage::default_dir);

    match dir.map(|dir| SqliteStorage::open(&dir)) {
        Some(Ok(storage)) => Box::new(storage),
        Some(Err(e)) => {
            warn!("⚠️  Could not open storage, memories will not persist: {}", e);
            Box::new(MemoryStorage::default())
        }
        None => {
            warn!("⚠️  No data directory found, memories will not persist");
            Box::new(MemoryStorage::default())
        }
    }
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> iced::Result {
    let config = AppConfig::parse();
    init_logging(&config.log);

    iced::application(
        "Memory Museum",
        MemoryMuseum::update,
        MemoryMuseum::view,
    )
    .subscription(MemoryMuseum::subscription)
    .theme(MemoryMuseum::theme)
    .centered()
    .run_with(move || MemoryMuseum::new(config))
}
