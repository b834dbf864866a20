// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Pure derivation of what the window should show for a given [`Session`].
//!
//! Nothing here mutates state; the GUI calls [`Scene::derive`] on every view.

use crate::airport::{AirportId, AirportRecord};
use crate::countries::display_name;
use crate::projection::Viewport;
use crate::session::Session;
use serde::Serialize;

pub const UPLOAD_HINT: &str = "Waiting, until file is uploaded";
/// Largest marker radius, reached at 300 m elevation.
pub const MAX_MARKER_RADIUS: f64 = 3.0;
/// Screen pixels per unit of [`Marker::radius`].
pub const MARKER_PX_PER_UNIT: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadPrompt {
    pub hint: &'static str,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryButton {
    pub code: String,
    pub label: String,
    pub airports: usize,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub id: AirportId,
    pub longitude: f64,
    pub latitude: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    pub title: String,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPanel {
    pub title: String,
    pub city: String,
    pub elevation: String,
}

impl DetailPanel {
    pub fn from_record(airport: &AirportRecord) -> Self {
        Self {
            title: airport.name.clone(),
            city: airport.municipality.clone(),
            elevation: format_elevation(airport.elevation_m),
        }
    }

    pub fn city_line(&self) -> String {
        format!("City: {}", self.city)
    }

    pub fn elevation_line(&self) -> String {
        format!("Height above sea level: {}", self.elevation)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub upload: Option<UploadPrompt>,
    pub countries: Vec<CountryButton>,
    pub map: Option<MapScene>,
    pub tooltip: Option<String>,
    pub detail: Option<DetailPanel>,
}

impl Scene {
    pub fn derive(session: &Session) -> Self {
        let state = session.state();
        let dataset = session.dataset();

        let upload = (!state.uploaded).then(|| UploadPrompt {
            hint: UPLOAD_HINT,
            error: state.upload_error.clone(),
        });

        let countries = dataset
            .map(|d| {
                d.groups()
                    .iter()
                    .map(|g| CountryButton {
                        code: g.code.clone(),
                        label: display_name(&g.code).to_string(),
                        airports: g.members.len(),
                        selected: state.selected_country.as_deref() == Some(g.code.as_str()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let map = match (state.selected_country.as_deref(), dataset) {
            (Some(code), Some(d)) if !d.is_empty() => Some(MapScene {
                title: display_name(code).to_string(),
                markers: d
                    .group(code)
                    .filter_map(|(id, airport)| marker_for(id, airport))
                    .collect(),
            }),
            _ => None,
        };

        Self {
            upload,
            countries,
            map,
            tooltip: state.hover_label.clone(),
            detail: session.selected_airport().map(DetailPanel::from_record),
        }
    }
}

fn marker_for(id: AirportId, airport: &AirportRecord) -> Option<Marker> {
    let (longitude, latitude) = airport.coordinates()?;
    Some(Marker {
        id,
        longitude,
        latitude,
        radius: marker_radius(airport.elevation_m),
    })
}

/// `min(elevation * 0.01, 3)`, floored at zero. Unknown elevation gets 0.
pub fn marker_radius(elevation_m: Option<f64>) -> f64 {
    elevation_m
        .map(|e| (e * 0.01).clamp(0.0, MAX_MARKER_RADIUS))
        .unwrap_or(0.0)
}

pub fn format_elevation(elevation_m: Option<f64>) -> String {
    match elevation_m {
        Some(e) => format!("{}m", e),
        None => "n/a".to_string(),
    }
}

/// On-screen radius of a marker, never smaller than `min_radius_px` so that
/// low-lying airports stay visible and clickable.
pub fn drawn_radius(radius: f64, min_radius_px: f64) -> f64 {
    (radius * MARKER_PX_PER_UNIT).max(min_radius_px)
}

/// Marker under `cursor`, if any. Each marker is hit inside its
/// [`drawn_radius`]; overlapping markers resolve to the nearest centre.
pub fn hit_test(
    markers: &[Marker],
    viewport: &Viewport,
    size: (f64, f64),
    cursor: (f64, f64),
    min_radius_px: f64,
) -> Option<AirportId> {
    markers
        .iter()
        .filter_map(|m| {
            let (sx, sy) = viewport.lonlat_to_screen(m.longitude, m.latitude, size);
            let dist = (sx - cursor.0).hypot(sy - cursor.1);
            (dist <= drawn_radius(m.radius, min_radius_px)).then_some((m.id, dist))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}
