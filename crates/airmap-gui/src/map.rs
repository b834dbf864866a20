use crate::style::palette;
use crate::Message;
use airmap_core::geography::Geography;
use airmap_core::projection::Viewport;
use airmap_core::render::{drawn_radius, hit_test, Marker};
use airmap_core::AirportId;
use iced::widget::canvas::{self, event, Cache, Frame, Geometry, Path, Stroke};
use iced::{mouse, Pixels, Point, Rectangle, Renderer, Size, Theme};
use std::cell::Cell;
use std::sync::Arc;

/// Presses that move less than this are clicks rather than drags.
const CLICK_SLOP: f32 = 5.0;
const GRATICULE_STEP: usize = 30;

/// Map of one country's airports on top of the world borders.
pub struct AirportMap {
    /// Selected country code. Changing it re-frames the camera.
    pub country: String,
    pub markers: Vec<Marker>,
    pub hovered: Option<AirportId>,
    pub selected: Option<AirportId>,
    pub tooltip: Option<String>,
    pub geography: Arc<Geography>,
    pub min_marker_px: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct BorderKey {
    viewport: Viewport,
    size: Size,
    regions: usize,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    press: Point,
    last: Point,
    moved: bool,
}

#[derive(Default)]
pub struct MapState {
    viewport: Option<Viewport>,
    framed_for: Option<String>,
    drag: Option<Drag>,
    borders: Cache,
    border_key: Cell<Option<BorderKey>>,
}

fn dims(bounds: Rectangle) -> (f64, f64) {
    (bounds.width as f64, bounds.height as f64)
}

fn to_point((x, y): (f64, f64)) -> Point {
    Point::new(x as f32, y as f32)
}

impl AirportMap {
    fn framed(&self, size: (f64, f64)) -> Viewport {
        Viewport::framing(self.markers.iter().map(|m| (m.longitude, m.latitude)), size)
    }

    /// Camera for this frame: the user's pan/zoom if it belongs to the current
    /// country, otherwise a fresh framing of the markers.
    fn viewport(&self, state: &MapState, size: (f64, f64)) -> Viewport {
        match state.viewport {
            Some(vp) if state.framed_for.as_deref() == Some(self.country.as_str()) => vp,
            _ => self.framed(size),
        }
    }

    fn sync(&self, state: &mut MapState, size: (f64, f64)) -> Viewport {
        let vp = self.viewport(state, size);
        if state.framed_for.as_deref() != Some(self.country.as_str()) {
            state.framed_for = Some(self.country.clone());
            state.drag = None;
        }
        state.viewport = Some(vp);
        vp
    }

    fn marker_at(&self, vp: &Viewport, size: (f64, f64), cursor: Point) -> Option<AirportId> {
        hit_test(
            &self.markers,
            vp,
            size,
            (cursor.x as f64, cursor.y as f64),
            self.min_marker_px,
        )
    }

    fn ring_path(vp: &Viewport, size: (f64, f64), ring: &[(f64, f64)]) -> Path {
        Path::new(|b| {
            let mut points = ring
                .iter()
                .map(|&(lon, lat)| to_point(vp.lonlat_to_screen(lon, lat, size)));
            if let Some(first) = points.next() {
                b.move_to(first);
                for p in points {
                    b.line_to(p);
                }
                b.close();
            }
        })
    }

    fn draw_base(&self, frame: &mut Frame, vp: &Viewport, size: (f64, f64)) {
        frame.fill_rectangle(Point::ORIGIN, frame.size(), palette::OCEAN);

        let graticule = || {
            Stroke::default()
                .with_width(1.0)
                .with_color(palette::GRATICULE)
        };
        for lon in (-180..=180).step_by(GRATICULE_STEP) {
            let line = Path::line(
                to_point(vp.lonlat_to_screen(lon as f64, 85.0, size)),
                to_point(vp.lonlat_to_screen(lon as f64, -85.0, size)),
            );
            frame.stroke(&line, graticule());
        }
        for lat in (-60..=60).step_by(GRATICULE_STEP) {
            let line = Path::line(
                to_point(vp.lonlat_to_screen(-180.0, lat as f64, size)),
                to_point(vp.lonlat_to_screen(180.0, lat as f64, size)),
            );
            frame.stroke(&line, graticule());
        }

        let edge = || {
            Stroke::default()
                .with_width(0.8)
                .with_color(palette::LAND_EDGE)
        };
        for region in &self.geography.regions {
            for ring in &region.rings {
                frame.stroke(&Self::ring_path(vp, size, ring), edge());
            }
        }
    }

    fn draw_overlay(
        &self,
        frame: &mut Frame,
        vp: &Viewport,
        size: (f64, f64),
        cursor: Option<Point>,
    ) {
        for region in &self.geography.regions {
            if region.iso_a2.as_deref() == Some(self.country.as_str()) {
                for ring in &region.rings {
                    frame.fill(&Self::ring_path(vp, size, ring), palette::LAND_HIGHLIGHT);
                }
            }
        }

        for marker in &self.markers {
            let center = to_point(vp.lonlat_to_screen(marker.longitude, marker.latitude, size));
            let active = self.hovered == Some(marker.id) || self.selected == Some(marker.id);
            let radius = drawn_radius(marker.radius, self.min_marker_px) as f32;
            let color = if active {
                palette::MARKER_ACTIVE
            } else {
                palette::MARKER
            };
            frame.fill(&Path::circle(center, radius), color);
        }

        if let (Some(label), Some(pos)) = (self.tooltip.as_deref(), cursor) {
            let text_size = 13.0;
            let width = label.chars().count() as f32 * 7.2 + 16.0;
            let height = text_size + 12.0;
            // Keep the tooltip inside the canvas near the right and bottom edges.
            let x = (pos.x + 14.0).min(frame.width() - width).max(0.0);
            let y = (pos.y + 14.0).min(frame.height() - height).max(0.0);

            frame.fill_rectangle(Point::new(x, y), Size::new(width, height), palette::TOOLTIP_BG);
            frame.fill_text(canvas::Text {
                content: label.to_string(),
                position: Point::new(x + 8.0, y + 6.0),
                color: palette::TEXT_PRIMARY,
                size: Pixels(text_size),
                ..canvas::Text::default()
            });
        }
    }
}

impl canvas::Program<Message> for AirportMap {
    type State = MapState;

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        let size = dims(bounds);
        let mut vp = self.sync(state, size);
        let position = cursor.position_in(bounds);

        match event {
            canvas::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                if let Some(p) = position {
                    let d = match delta {
                        mouse::ScrollDelta::Lines { y, .. } => y as f64,
                        mouse::ScrollDelta::Pixels { y, .. } => y as f64 / 100.0,
                    };
                    vp.zoom_at(d * 0.25, (p.x as f64, p.y as f64), size);
                    state.viewport = Some(vp);
                    return (event::Status::Captured, None);
                }
            }
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(p) = position {
                    state.drag = Some(Drag {
                        press: p,
                        last: p,
                        moved: false,
                    });
                    return (event::Status::Captured, None);
                }
            }
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if let Some(drag) = state.drag.take() {
                    if drag.moved {
                        return (event::Status::Captured, None);
                    }
                    let clicked = position.and_then(|p| self.marker_at(&vp, size, p));
                    return (event::Status::Captured, clicked.map(Message::MarkerClicked));
                }
            }
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                if let (Some(drag), Some(p)) = (state.drag.as_mut(), position) {
                    if !drag.moved && p.distance(drag.press) >= CLICK_SLOP {
                        drag.moved = true;
                    }
                    if drag.moved {
                        let delta = p - drag.last;
                        drag.last = p;
                        vp.pan((delta.x as f64, delta.y as f64));
                        state.viewport = Some(vp);
                        return (event::Status::Captured, None);
                    }
                }

                let hit = position.and_then(|p| self.marker_at(&vp, size, p));
                if hit != self.hovered {
                    return (event::Status::Captured, Some(Message::MarkerHovered(hit)));
                }
            }
            canvas::Event::Mouse(mouse::Event::CursorLeft) => {
                state.drag = None;
                if self.hovered.is_some() {
                    return (event::Status::Captured, Some(Message::MarkerHovered(None)));
                }
            }
            _ => {}
        }

        (event::Status::Ignored, None)
    }

    fn draw(
        &self,
        state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let size = dims(bounds);
        let vp = self.viewport(state, size);

        let key = BorderKey {
            viewport: vp,
            size: bounds.size(),
            regions: self.geography.regions.len(),
        };
        if state.border_key.get() != Some(key) {
            state.borders.clear();
            state.border_key.set(Some(key));
        }

        let base = state
            .borders
            .draw(renderer, bounds.size(), |frame| self.draw_base(frame, &vp, size));

        let mut overlay = Frame::new(renderer, bounds.size());
        self.draw_overlay(&mut overlay, &vp, size, cursor.position_in(bounds));

        vec![base, overlay.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        match state.drag {
            Some(drag) if drag.moved => mouse::Interaction::Grabbing,
            _ if self.hovered.is_some() => mouse::Interaction::Pointer,
            _ if cursor.is_over(bounds) => mouse::Interaction::Grab,
            _ => mouse::Interaction::default(),
        }
    }
}
