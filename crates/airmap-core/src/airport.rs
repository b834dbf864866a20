// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};

pub const FEET_TO_METERS: f64 = 0.3048;

/// Position of a record inside its [`Dataset`](crate::ingest::Dataset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AirportId(pub usize);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    pub ident: String,
    pub name: String,
    /// Already converted from feet and rounded to 2 decimals.
    pub elevation_m: Option<f64>,
    pub country_code: String,
    pub municipality: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
}

impl AirportRecord {
    /// Both coordinates parsed, i.e. the record can be placed on the map.
    pub fn is_plottable(&self) -> bool {
        self.longitude.is_some() && self.latitude.is_some()
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.longitude.zip(self.latitude)
    }

    /// Text shown while the pointer rests on the airport's marker.
    pub fn hover_label(&self) -> String {
        format!("{}, {}", self.name, self.municipality)
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn feet_to_meters(feet: f64) -> f64 {
    round2(feet * FEET_TO_METERS)
}

/// Lenient numeric field parsing. Blank, garbage and non-finite text all map to `None`.
pub fn parse_number(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feet_to_meters_rounds_to_two_places() {
        assert_eq!(feet_to_meters(1000.0), 304.8);
        assert_eq!(feet_to_meters(362.0), 110.34);
        assert_eq!(feet_to_meters(0.0), 0.0);
        assert_eq!(feet_to_meters(-210.0), -64.01);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 20.967 "), Some(20.967));
        assert_eq!(parse_number("-100"), Some(-100.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("n/a"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_hover_label_joins_name_and_city() {
        let airport = AirportRecord {
            ident: "EPWA".to_string(),
            name: "Warsaw Chopin".to_string(),
            elevation_m: Some(110.34),
            country_code: "PL".to_string(),
            municipality: "Warsaw".to_string(),
            longitude: Some(20.967),
            latitude: Some(52.166),
        };
        assert_eq!(airport.hover_label(), "Warsaw Chopin, Warsaw");
        assert!(airport.is_plottable());
        assert_eq!(airport.coordinates(), Some((20.967, 52.166)));
    }
}
