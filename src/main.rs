use iced::widget::{column, container, image, text, text_input, Column, Space};
use iced::{Alignment, Length};
use iced::{Element, Subscription, Task, Theme};
use std::sync::Arc;
use tracing::{debug, info, warn};

mod config;
mod museum;
mod state;
mod ui;

use config::Config;
use museum::{fetch_artworks, search_object_ids, MetClient, MuseumApi};
use state::data::ArtworkRecord;
use state::debounce::{Debouncer, Ticket};
use state::gallery::{BatchRequest, Gallery, Generation};
use ui::eyes::{EyesKey, EyesSignal, EyesTracker};
use ui::picture::{load_picture, Picture};

/// Main application state
struct BlindMuseum {
    config: Config,
    /// The museum collection the app browses
    api: Arc<dyn MuseumApi>,
    /// Text in the search box
    query: String,
    /// Debounced query waiting to be searched
    search: Debouncer<String>,
    gallery: Gallery,
    /// Prepared thumbnail of the current artwork
    picture: Option<Picture>,
    /// URL of the thumbnail being downloaded, if any
    picture_loading: Option<String>,
    /// Ctrl state behind the eyes flag
    eyes: EyesTracker,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User edited the search box
    QueryChanged(String),
    /// The debounce window of a query edit has elapsed
    SearchDue(Ticket),
    /// A search finished with the matching object IDs
    SearchComplete(Ticket, Result<Vec<String>, String>),
    /// A detail batch finished
    BatchComplete(Generation, Result<Vec<ArtworkRecord>, String>),
    /// A thumbnail finished downloading
    PictureLoaded(String, Result<Picture, String>),
    /// The eyes closed (true) or opened (false)
    EyesChanged(bool),
    /// Keyboard activity that drives the eyes flag
    EyesKey(EyesKey),
}

impl BlindMuseum {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = Config::default();

        // The app has nothing to show without an HTTP client
        let client = MetClient::new(config.clone()).expect("Failed to create HTTP client");

        info!("🎨 Blind Museum starting with query {:?}", config.seed_query);
        Self::with_api(config, Arc::new(client))
    }

    /// Build the app around any museum API and schedule the seed search
    fn with_api(config: Config, api: Arc<dyn MuseumApi>) -> (Self, Task<Message>) {
        let mut app = BlindMuseum {
            query: config.seed_query.clone(),
            search: Debouncer::new(config.debounce),
            // The eyes start open, which counts as the first opening
            gallery: Gallery::new(config.batch_size(), false),
            picture: None,
            picture_loading: None,
            eyes: EyesTracker::default(),
            config,
            api,
        };

        let query = app.query.clone();
        let task = app.schedule_search(query);
        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::QueryChanged(query) => {
                self.query = query.clone();
                self.schedule_search(query)
            }
            Message::SearchDue(ticket) => {
                let Some(query) = self.search.fire(ticket) else {
                    return Task::none();
                };

                let api = self.api.clone();
                Task::perform(
                    async move {
                        search_object_ids(api.as_ref(), &query)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    move |result| Message::SearchComplete(ticket, result),
                )
            }
            Message::SearchComplete(ticket, result) => {
                if !self.search.is_current(ticket) {
                    debug!("Dropping stale search result");
                    return Task::none();
                }

                match result {
                    Ok(ids) => {
                        let request = self.gallery.replace_identifiers(ids);
                        Task::batch([self.fetch_batch(request), self.refresh_picture()])
                    }
                    Err(e) => {
                        warn!("⚠️  Search failed: {}", e);
                        Task::none()
                    }
                }
            }
            Message::BatchComplete(generation, result) => match result {
                Ok(records) => {
                    let request = self.gallery.complete_batch(generation, records);
                    Task::batch([self.fetch_batch(request), self.refresh_picture()])
                }
                Err(e) => {
                    warn!("⚠️  Artwork batch failed: {}", e);
                    self.gallery.fail_batch(generation);
                    Task::none()
                }
            },
            Message::PictureLoaded(url, result) => {
                if self.picture_loading.as_deref() == Some(url.as_str()) {
                    self.picture_loading = None;
                }

                match result {
                    Ok(picture) if self.current_url() == Some(url.as_str()) => {
                        self.picture = Some(picture);
                    }
                    Ok(_) => debug!("Dropping picture no longer shown: {}", url),
                    Err(e) => warn!("⚠️  Failed to load picture {}: {}", url, e),
                }
                Task::none()
            }
            Message::EyesChanged(closed) => {
                if closed == self.gallery.eyes_closed() {
                    return Task::none();
                }

                let request = self.gallery.set_eyes_closed(closed);
                Task::batch([self.fetch_batch(request), self.refresh_picture()])
            }
            Message::EyesKey(key) => match self.eyes.on_key(key) {
                Some(EyesSignal::Close) => self.update(Message::EyesChanged(true)),
                Some(EyesSignal::Open) => self.update(Message::EyesChanged(false)),
                Some(EyesSignal::Cancel) => {
                    debug!("Ctrl used as a shortcut, eyes stay open");
                    self.gallery.cancel_close();
                    Task::none()
                }
                None => Task::none(),
            },
        }
    }

    /// Restart the debounce window for `query`. An empty query cancels any
    /// pending search.
    fn schedule_search(&mut self, query: String) -> Task<Message> {
        if query.is_empty() {
            self.search.cancel();
            return Task::none();
        }

        let ticket = self.search.schedule(query);
        let window = self.search.window();
        Task::perform(
            async move { tokio::time::sleep(window).await },
            move |_| Message::SearchDue(ticket),
        )
    }

    fn fetch_batch(&self, request: Option<BatchRequest>) -> Task<Message> {
        let Some(BatchRequest { generation, ids }) = request else {
            return Task::none();
        };

        let api = self.api.clone();
        Task::perform(
            async move {
                fetch_artworks(api.as_ref(), &ids)
                    .await
                    .map_err(|e| e.to_string())
            },
            move |result| Message::BatchComplete(generation, result),
        )
    }

    fn current_url(&self) -> Option<&str> {
        self.gallery.current().map(|a| a.thumbnail_url.as_str())
    }

    /// Make sure the picture matches the current artwork, downloading it if
    /// needed. The download starts while the eyes are still open.
    fn refresh_picture(&mut self) -> Task<Message> {
        let Some(url) = self.current_url().map(str::to_string) else {
            self.picture = None;
            return Task::none();
        };

        if self.picture.as_ref().is_some_and(|p| p.url == url) {
            return Task::none();
        }
        self.picture = None;

        if self.picture_loading.as_deref() == Some(url.as_str()) {
            return Task::none();
        }
        self.picture_loading = Some(url.clone());

        let api = self.api.clone();
        let max_width = self.config.picture_max_width;
        Task::perform(
            {
                let url = url.clone();
                async move { load_picture(api, url, max_width).await.map_err(|e| e.to_string()) }
            },
            move |result| Message::PictureLoaded(url.clone(), result),
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let width = self.config.input_max_width as f32;
        let eyes_closed = self.gallery.eyes_closed();

        let search = text_input("Search for an art piece", &self.query)
            .id(text_input::Id::new("search"))
            .on_input(Message::QueryChanged)
            .padding(10)
            .width(Length::Fixed(width));

        let instructions = (!eyes_closed).then(|| {
            column![
                text(
                    "Please close your eyes to fully immerse yourself in the blind museum experience."
                )
                .size(20),
                text("Hold Ctrl to close your eyes, release it to open them.").size(14),
            ]
            .spacing(6)
            .max_width(width)
        });

        // Hidden pictures keep their space so the layout does not jump
        let picture: Element<Message> = match &self.picture {
            Some(picture) if eyes_closed => image(picture.handle.clone())
                .width(Length::Fixed(picture.width as f32))
                .height(Length::Fixed(picture.height as f32))
                .into(),
            Some(picture) => Space::new(
                Length::Fixed(picture.width as f32),
                Length::Fixed(picture.height as f32),
            )
            .into(),
            None => Space::new(Length::Shrink, Length::Shrink).into(),
        };

        let content: Column<Message> = Column::new()
            .push(search)
            .push_maybe(instructions)
            .push(picture)
            .spacing(20)
            .padding(40)
            .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        ui::eyes::subscription()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn configure_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> iced::Result {
    configure_logging();

    iced::application("Blind Museum", BlindMuseum::update, BlindMuseum::view)
        .subscription(BlindMuseum::subscription)
        .theme(BlindMuseum::theme)
        .centered()
        .run_with(BlindMuseum::new)
}
