// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

mod map;
mod style;

use airmap_core::config::{AtlasConfig, ConfigStore};
use airmap_core::geography::Geography;
use airmap_core::render::{CountryButton, DetailPanel, UploadPrompt};
use airmap_core::session::LoadOutcome;
use airmap_core::{ingest, AirportId, IngestError, Scene, Session};
use anyhow::Context;
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{
    button, canvas, center, column, container, mouse_area, opaque, row, scrollable, stack, text,
    Space,
};
use iced::{
    event, keyboard, window, Element, Event, Length, Padding, Subscription, Task, Theme,
};
use log::{info, warn};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::PathBuf;
use std::sync::Arc;

use crate::map::AirportMap;
use crate::style::palette;

fn main() -> iced::Result {
    let config = match ConfigStore::new().load_or_init() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Using default settings: {:#}", e);
            AtlasConfig::default()
        }
    };

    let _ = TermLogger::init(
        config.log_level_filter(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    iced::application("AirMap", App::update, App::view)
        .theme(|_| Theme::Dark)
        .subscription(App::subscription)
        .run_with(move || App::new(config))
}

/// Bytes of a chosen file, or the reason they could not be read.
type FileContents = Result<Arc<Vec<u8>>, String>;

#[derive(Debug, Clone)]
enum Message {
    PickFile,
    FileDropped(PathBuf),
    FileRead(Option<(String, FileContents)>),
    GeographyLoaded(Result<Arc<Geography>, String>),
    SelectCountry(String),
    MarkerHovered(Option<AirportId>),
    MarkerClicked(AirportId),
    DismissDetail,
}

struct App {
    session: Session,
    config: AtlasConfig,
    geography: Arc<Geography>,
    hovered: Option<AirportId>,
    /// Set while a file is being read so a second pick doesn't race the first.
    reading: bool,
    status: String,
}

impl App {
    fn new(config: AtlasConfig) -> (Self, Task<Message>) {
        let path = config.geography_path.clone();
        let app = Self {
            session: Session::new(),
            config,
            geography: Arc::new(Geography::default()),
            hovered: None,
            reading: false,
            status: String::new(),
        };

        (
            app,
            Task::perform(load_geography(path), Message::GeographyLoaded),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFile => {
                if self.session.state().uploaded || self.reading {
                    return Task::none();
                }
                self.reading = true;
                Task::perform(pick_csv(), Message::FileRead)
            }
            Message::FileDropped(path) => {
                if self.session.state().uploaded || self.reading {
                    info!("Ignoring dropped file {}", path.display());
                    return Task::none();
                }
                self.reading = true;
                Task::perform(read_csv(path), |read| Message::FileRead(Some(read)))
            }
            Message::FileRead(None) => {
                // Dialog cancelled; the upload control stays up.
                self.reading = false;
                Task::none()
            }
            Message::FileRead(Some((source, contents))) => {
                self.reading = false;
                let result = match contents {
                    Ok(bytes) => ingest(bytes.as_slice()),
                    Err(e) => Err(IngestError::Io(std::io::Error::other(e))),
                };
                if self.session.load(&source, result) == LoadOutcome::Loaded {
                    self.hovered = None;
                }
                Task::none()
            }
            Message::GeographyLoaded(Ok(geography)) => {
                info!("World outlines — regions={}", geography.regions.len());
                self.status = format!("{} regions", geography.regions.len());
                self.geography = geography;
                Task::none()
            }
            Message::GeographyLoaded(Err(e)) => {
                warn!("Drawing without country outlines: {}", e);
                self.status = "No country outlines".to_string();
                Task::none()
            }
            Message::SelectCountry(code) => {
                self.hovered = None;
                self.session.marker_left();
                self.session.select_country(&code);
                Task::none()
            }
            Message::MarkerHovered(Some(id)) => {
                self.hovered = Some(id);
                self.session.marker_entered(id);
                Task::none()
            }
            Message::MarkerHovered(None) => {
                self.hovered = None;
                self.session.marker_left();
                Task::none()
            }
            Message::MarkerClicked(id) => {
                self.session.marker_clicked(id);
                Task::none()
            }
            Message::DismissDetail => {
                self.session.dismiss_detail();
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let scene = Scene::derive(&self.session);

        let title = text("World airports").size(24).color(palette::TEXT_PRIMARY);
        let source = text(self.session.source().unwrap_or("").to_string())
            .size(13)
            .color(palette::TEXT_SECONDARY);
        let status = text(self.status.clone())
            .size(13)
            .color(palette::TEXT_SECONDARY);
        let header = row![title, source, Space::with_width(Length::Fill), status]
            .spacing(16)
            .align_y(iced::Alignment::Center);

        let body: Element<'_, Message> = match &scene.upload {
            Some(prompt) => self.view_upload(prompt),
            None => {
                let map_area: Element<'_, Message> = match scene.map {
                    Some(map) => {
                        let program = AirportMap {
                            country: self
                                .session
                                .state()
                                .selected_country
                                .clone()
                                .unwrap_or_default(),
                            markers: map.markers,
                            hovered: self.hovered,
                            selected: self.session.state().selected_airport,
                            tooltip: scene.tooltip.clone(),
                            geography: Arc::clone(&self.geography),
                            min_marker_px: self.config.min_marker_px,
                        };
                        column![
                            text(map.title).size(20).color(palette::TEXT_PRIMARY),
                            container(canvas(program).width(Length::Fill).height(Length::Fill))
                                .style(style::container_card)
                                .padding(2),
                        ]
                        .spacing(8)
                        .into()
                    }
                    None => center(
                        text("Pick a country to see its airports")
                            .size(16)
                            .color(palette::TEXT_SECONDARY),
                    )
                    .into(),
                };

                column![view_countries(&scene.countries), map_area]
                    .spacing(12)
                    .into()
            }
        };

        let content = container(column![header, body].spacing(16).padding(20))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(style::container_main_content);

        match scene.detail {
            Some(detail) => modal(content, view_detail(detail), Message::DismissDetail),
            None => content.into(),
        }
    }

    fn view_upload(&self, prompt: &UploadPrompt) -> Element<'_, Message> {
        let label = if self.reading {
            "Reading…"
        } else {
            "Choose CSV…"
        };
        let mut pick = button(text(label).size(15))
            .padding([10, 20])
            .style(style::button_primary);
        if !self.reading {
            pick = pick.on_press(Message::PickFile);
        }

        let mut card = column![
            pick,
            text(prompt.hint).size(14).color(palette::TEXT_SECONDARY),
            text("or drop an airport CSV onto this window")
                .size(12)
                .color(palette::TEXT_SECONDARY),
        ]
        .spacing(12)
        .align_x(iced::Alignment::Center);

        if let Some(err) = &prompt.error {
            card = card.push(text(err.clone()).size(13).color(palette::ERROR));
        }

        center(container(card).padding(32).style(style::container_card)).into()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            keyboard::on_key_press(|key, _modifiers| match key {
                keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::DismissDetail),
                _ => None,
            }),
            event::listen_with(|event, _status, _window| match event {
                Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
                _ => None,
            }),
        ])
    }
}

fn view_countries<'a>(countries: &[CountryButton]) -> Element<'a, Message> {
    let buttons = countries.iter().map(|country| {
        button(
            column![
                text(country.label.clone()).size(14),
                text(format!("{} · {}", country.code, country.airports))
                    .size(11)
                    .color(palette::TEXT_SECONDARY),
            ]
            .spacing(2),
        )
        .padding([6, 12])
        .style(style::button_country(country.selected))
        .on_press(Message::SelectCountry(country.code.clone()))
        .into()
    });

    scrollable(row(buttons).spacing(8).padding(Padding {
        bottom: 12.0,
        ..Padding::ZERO
    }))
        .direction(Direction::Horizontal(Scrollbar::new()))
        .width(Length::Fill)
        .into()
}

fn view_detail<'a>(detail: DetailPanel) -> Element<'a, Message> {
    let card = column![
        text(detail.title.clone()).size(20).color(palette::TEXT_PRIMARY),
        text(detail.city_line()).size(14).color(palette::TEXT_SECONDARY),
        text(detail.elevation_line())
            .size(14)
            .color(palette::TEXT_SECONDARY),
        button(text("Close").size(14))
            .padding([8, 16])
            .style(style::button_primary)
            .on_press(Message::DismissDetail),
    ]
    .spacing(10);

    container(card)
        .padding(24)
        .width(360)
        .style(style::container_card)
        .into()
}

fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(style::container_backdrop)).on_press(on_blur)
        )
    ]
    .into()
}

async fn pick_csv() -> Option<(String, FileContents)> {
    let handle = rfd::AsyncFileDialog::new()
        .add_filter("Airport CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file()
        .await?;

    let name = handle.file_name();
    let bytes = handle.read().await;
    Some((name, Ok(Arc::new(bytes))))
}

async fn read_csv(path: PathBuf) -> (String, FileContents) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let contents = std::fs::read(&path)
        .with_context(|| format!("Failed to read {}", path.display()))
        .map(Arc::new)
        .map_err(|e| format!("{:#}", e));
    (name, contents)
}

async fn load_geography(path: PathBuf) -> Result<Arc<Geography>, String> {
    Geography::load(&path)
        .with_context(|| format!("Failed to load outlines from {}", path.display()))
        .map(Arc::new)
        .map_err(|e| format!("{:#}", e))
}
