// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeographyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid GeoJSON: {0}")]
    NotFeatureCollection(String),
}

/// A ring of (lon, lat) positions.
pub type Ring = Vec<(f64, f64)>;

#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: Option<String>,
    /// ISO 3166-1 alpha-2, when the feature carries one.
    pub iso_a2: Option<String>,
    pub rings: Vec<Ring>,
}

/// Country outlines drawn underneath the airport markers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geography {
    pub regions: Vec<Region>,
}

impl Geography {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GeographyError> {
        let content = fs::read_to_string(path.as_ref())?;
        let geography = Self::parse(&content)?;
        info!(
            "Loaded geography — path={} regions={}",
            path.as_ref().display(),
            geography.regions.len()
        );
        Ok(geography)
    }

    /// Reads the `Polygon` and `MultiPolygon` features of a GeoJSON
    /// `FeatureCollection`. Other geometry types are skipped.
    pub fn parse(content: &str) -> Result<Self, GeographyError> {
        let parsed: Value = serde_json::from_str(content)?;

        if parsed["type"].as_str() != Some("FeatureCollection") {
            return Err(GeographyError::NotFeatureCollection(
                "top-level type is not FeatureCollection".to_string(),
            ));
        }
        let features = parsed["features"].as_array().ok_or_else(|| {
            GeographyError::NotFeatureCollection("missing 'features' array".to_string())
        })?;

        let mut regions = Vec::with_capacity(features.len());
        for feature in features {
            let geometry = &feature["geometry"];
            let rings = match geometry["type"].as_str() {
                Some("Polygon") => polygon_rings(&geometry["coordinates"]),
                Some("MultiPolygon") => geometry["coordinates"]
                    .as_array()
                    .map(|polys| polys.iter().flat_map(polygon_rings).collect())
                    .unwrap_or_default(),
                other => {
                    debug!("Skipping feature with geometry type {:?}", other);
                    continue;
                }
            };
            if rings.is_empty() {
                continue;
            }

            let props = &feature["properties"];
            regions.push(Region {
                name: string_prop(props, &["name", "NAME", "ADMIN"]),
                iso_a2: string_prop(props, &["iso_a2", "ISO_A2"]),
                rings,
            });
        }

        Ok(Self { regions })
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

fn string_prop(props: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| props[*k].as_str())
        .map(str::to_string)
}

fn polygon_rings(coordinates: &Value) -> Vec<Ring> {
    coordinates
        .as_array()
        .map(|rings| {
            rings
                .iter()
                .filter_map(|ring| {
                    let points: Ring = ring
                        .as_array()?
                        .iter()
                        .filter_map(|pos| {
                            let pos = pos.as_array()?;
                            Some((pos.first()?.as_f64()?, pos.get(1)?.as_f64()?))
                        })
                        .collect();
                    (points.len() >= 2).then_some(points)
                })
                .collect()
        })
        .unwrap_or_default()
}
