//! Viewport camera mapping world kilometres to screen pixels.
//!
//! # Architecture
//!
//! The camera stores the world point at the centre of the viewport
//! (`offset`), a zoom factor and the viewport size. The effective scale is
//! `zoom * pixels_per_km`, so at zoom 1 the whole 40000 km world spans
//! 800 px.
//!
//! # Example
//!
//! ```
//! use glam::DVec2;
//! use naval_war_core::camera::Camera;
//! use naval_war_core::config::SimConfig;
//!
//! let config = SimConfig::default();
//! let camera = Camera::new(&config.camera, config.world.size());
//!
//! // The world centre sits in the middle of the viewport.
//! let centre = camera.world_to_screen(DVec2::new(20_000.0, 10_000.0));
//! assert_eq!(centre, DVec2::new(700.0, 450.0));
//! ```

use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::CameraConfig;

/// Zoomable, pannable view onto the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    zoom: f64,
    offset: DVec2,
    viewport: DVec2,
    pixels_per_km: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl Camera {
    /// Creates a camera at zoom 1 centred on a world of `world_size`.
    #[must_use]
    pub fn new(config: &CameraConfig, world_size: DVec2) -> Self {
        Self {
            zoom: 1.0,
            offset: world_size * 0.5,
            viewport: config.viewport,
            pixels_per_km: config.pixels_per_km,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
        }
    }

    /// Current zoom factor.
    #[must_use]
    pub const fn zoom(&self) -> f64 {
        self.zoom
    }

    /// World point at the viewport centre.
    #[must_use]
    pub const fn offset(&self) -> DVec2 {
        self.offset
    }

    /// Viewport size in pixels.
    #[must_use]
    pub const fn viewport(&self) -> DVec2 {
        self.viewport
    }

    /// Pixels per km at the current zoom.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.zoom * self.pixels_per_km
    }

    /// Maps a world point to screen pixels.
    #[must_use]
    pub fn world_to_screen(&self, world: DVec2) -> DVec2 {
        (world - self.offset) * self.scale() + self.viewport * 0.5
    }

    /// Maps a screen pixel to a world point.
    #[must_use]
    pub fn screen_to_world(&self, screen: DVec2) -> DVec2 {
        (screen - self.viewport * 0.5) / self.scale() + self.offset
    }

    /// Drags the view by `delta` screen pixels; content follows the cursor.
    pub fn pan(&mut self, delta: DVec2) {
        self.offset -= delta / self.scale();
    }

    /// Multiplies the zoom by `factor`, keeping the world point under
    /// `screen_point` fixed on screen.
    ///
    /// The resulting zoom is clamped to the configured bounds, with the
    /// upper bound winning if they are inverted. Non-positive or non-finite
    /// factors are ignored.
    pub fn zoom_at(&mut self, screen_point: DVec2, factor: f64) {
        if !(factor > 0.0 && factor.is_finite()) {
            return;
        }
        let anchor = self.screen_to_world(screen_point);
        self.zoom = (self.zoom * factor).max(self.min_zoom).min(self.max_zoom);
        self.offset = anchor - (screen_point - self.viewport * 0.5) / self.scale();
        trace!(zoom = self.zoom, "camera zoomed");
    }

    /// Updates the viewport after a window resize.
    pub fn resize(&mut self, viewport: DVec2) {
        self.viewport = viewport;
    }
}
