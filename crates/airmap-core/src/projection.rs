// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Web-Mercator math and the pan/zoom camera used by the map.
//!
//! World coordinates are normalized to `0.0..=1.0` on both axes, with `(0, 0)`
//! at 180°W / 85.05°N. Screen coordinates are pixels relative to the top-left
//! corner of the map widget.

use std::f64::consts::PI;

/// Pixels covered by the whole world at zoom 0.
pub const TILE_SIZE: f64 = 256.0;
pub const MAX_LATITUDE: f64 = 85.0511;
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 14.0;
/// Framing a single airport (or a tight cluster) never zooms in past this.
const MAX_FRAME_ZOOM: f64 = 8.0;

pub fn project(lon: f64, lat: f64) -> (f64, f64) {
    let x = (lon + 180.0) / 360.0;
    let lat_rad = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0;
    (x, y)
}

pub fn unproject(x: f64, y: f64) -> (f64, f64) {
    let lon = x * 360.0 - 180.0;
    let n = PI - 2.0 * PI * y;
    let lat = n.sinh().atan().to_degrees();
    (lon, lat)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// World coordinate shown at the middle of the screen.
    pub center: (f64, f64),
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: (0.5, 0.5),
            zoom: MIN_ZOOM,
        }
    }
}

impl Viewport {
    /// Whole world, scaled to fit `size`.
    pub fn world(size: (f64, f64)) -> Self {
        let fit = size.0.min(size.1).max(1.0) / TILE_SIZE;
        Self {
            center: (0.5, 0.5),
            zoom: fit.log2().clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    /// Centers on the bounding box of `points` (lon, lat) and zooms so that it
    /// fills roughly 80% of `size`. Falls back to [`Viewport::world`] when
    /// there is nothing to frame.
    pub fn framing<I>(points: I, size: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut min = (f64::INFINITY, f64::INFINITY);
        let mut max = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        let mut any = false;

        for (lon, lat) in points {
            if !lon.is_finite() || !lat.is_finite() {
                continue;
            }
            let (x, y) = project(lon, lat);
            min = (min.0.min(x), min.1.min(y));
            max = (max.0.max(x), max.1.max(y));
            any = true;
        }

        if !any {
            return Self::world(size);
        }

        let span_x = (max.0 - min.0).max(1e-9);
        let span_y = (max.1 - min.1).max(1e-9);
        let scale = (size.0 / span_x).min(size.1 / span_y) * 0.8;
        let zoom = (scale / TILE_SIZE)
            .log2()
            .clamp(Self::world(size).zoom, MAX_FRAME_ZOOM.max(Self::world(size).zoom));

        Self {
            center: ((min.0 + max.0) / 2.0, (min.1 + max.1) / 2.0),
            zoom,
        }
    }

    /// Pixels per world unit.
    pub fn scale(&self) -> f64 {
        TILE_SIZE * 2.0f64.powf(self.zoom)
    }

    pub fn to_screen(&self, world: (f64, f64), size: (f64, f64)) -> (f64, f64) {
        let scale = self.scale();
        (
            (world.0 - self.center.0) * scale + size.0 / 2.0,
            (world.1 - self.center.1) * scale + size.1 / 2.0,
        )
    }

    pub fn to_world(&self, screen: (f64, f64), size: (f64, f64)) -> (f64, f64) {
        let scale = self.scale();
        (
            self.center.0 + (screen.0 - size.0 / 2.0) / scale,
            self.center.1 + (screen.1 - size.1 / 2.0) / scale,
        )
    }

    pub fn lonlat_to_screen(&self, lon: f64, lat: f64, size: (f64, f64)) -> (f64, f64) {
        self.to_screen(project(lon, lat), size)
    }

    /// Moves the camera by a screen-space drag delta.
    pub fn pan(&mut self, delta: (f64, f64)) {
        let scale = self.scale();
        self.center = (
            (self.center.0 - delta.0 / scale).clamp(0.0, 1.0),
            (self.center.1 - delta.1 / scale).clamp(0.0, 1.0),
        );
    }

    /// Zooms by `levels`, keeping the world point under `cursor` in place.
    pub fn zoom_at(&mut self, levels: f64, cursor: (f64, f64), size: (f64, f64)) {
        let anchor = self.to_world(cursor, size);
        let new_zoom = (self.zoom + levels).clamp(MIN_ZOOM, MAX_ZOOM);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }
        self.zoom = new_zoom;

        let scale = self.scale();
        self.center = (
            (anchor.0 - (cursor.0 - size.0 / 2.0) / scale).clamp(0.0, 1.0),
            (anchor.1 - (cursor.1 - size.1 / 2.0) / scale).clamp(0.0, 1.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_project_corners() {
        let (x, y) = project(0.0, 0.0);
        assert!(close(x, 0.5) && close(y, 0.5));

        let (x, _) = project(-180.0, 0.0);
        assert!(close(x, 0.0));

        // Poles are clamped rather than blowing up to infinity.
        let (_, y) = project(0.0, 90.0);
        assert!(y.is_finite());
        assert!(y < 0.001);
    }

    #[test]
    fn test_project_unproject_round_trip() {
        for &(lon, lat) in &[(20.967, 52.166), (-100.0, 40.0), (151.2, -33.9)] {
            let (x, y) = project(lon, lat);
            let (lon2, lat2) = unproject(x, y);
            assert!(close(lon, lon2), "lon {} vs {}", lon, lon2);
            assert!(close(lat, lat2), "lat {} vs {}", lat, lat2);
        }
    }

    #[test]
    fn test_screen_world_inverse() {
        let vp = Viewport {
            center: (0.3, 0.4),
            zoom: 3.5,
        };
        let size = (800.0, 600.0);
        let screen = vp.to_screen((0.31, 0.39), size);
        let world = vp.to_world(screen, size);
        assert!(close(world.0, 0.31) && close(world.1, 0.39));

        // Center maps to the middle of the widget.
        let mid = vp.to_screen(vp.center, size);
        assert!(close(mid.0, 400.0) && close(mid.1, 300.0));
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let size = (1024.0, 768.0);
        let mut vp = Viewport::world(size);
        let cursor = (700.0, 200.0);
        let before = vp.to_world(cursor, size);
        vp.zoom_at(1.5, cursor, size);
        let after = vp.to_world(cursor, size);
        assert!(close(before.0, after.0) && close(before.1, after.1));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let size = (800.0, 600.0);
        let mut vp = Viewport::world(size);
        vp.zoom_at(100.0, (400.0, 300.0), size);
        assert_eq!(vp.zoom, MAX_ZOOM);
        vp.zoom_at(-100.0, (400.0, 300.0), size);
        assert_eq!(vp.zoom, MIN_ZOOM);
    }

    #[test]
    fn test_pan_moves_opposite_to_drag() {
        let mut vp = Viewport {
            center: (0.5, 0.5),
            zoom: 2.0,
        };
        vp.pan((102.4, 0.0));
        assert!(vp.center.0 < 0.5);
        assert!(close(vp.center.1, 0.5));
    }

    #[test]
    fn test_framing_centers_on_points() {
        let size = (800.0, 600.0);
        let points = [(14.0, 49.0), (24.0, 55.0)];
        let vp = Viewport::framing(points, size);
        let world = Viewport::world(size);
        assert!(vp.zoom > world.zoom);

        for (lon, lat) in points {
            let (sx, sy) = vp.lonlat_to_screen(lon, lat, size);
            assert!((0.0..=size.0).contains(&sx));
            assert!((0.0..=size.1).contains(&sy));
        }
    }

    #[test]
    fn test_framing_without_points_shows_world() {
        let size = (800.0, 600.0);
        let empty: [(f64, f64); 0] = [];
        assert_eq!(Viewport::framing(empty, size), Viewport::world(size));
        assert_eq!(
            Viewport::framing([(f64::NAN, 1.0)], size),
            Viewport::world(size)
        );
    }
}
