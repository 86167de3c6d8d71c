//! A self-contained zoomable view of the remote framebuffer.
//!
//! The embedding UI normally owns the canvas and implements [`Viewport`]
//! itself.  [`ZoomViewport`] is the standalone version used by the replay
//! tool and the integration tests: a zoom factor clamped to configured
//! limits plus the remote position shown at the screen's top-left corner.
//!
//! # Coordinates (for beginners)
//!
//! With zoom `z` and view origin `o` (a remote position), a screen point `s`
//! shows remote point `o + s / z`.  Zooming around a focus keeps the remote
//! point under the focus where it was, so the origin moves instead.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;
use touchpad_core::Point;

use crate::application::ports::Viewport;
use crate::infrastructure::config::DisplayConfig;

#[derive(Debug, Clone, Copy)]
struct View {
    zoom: f32,
    origin: Point,
}

/// Zoom factor and view origin behind a mutex.
#[derive(Debug)]
pub struct ZoomViewport {
    view: Mutex<View>,
    min_zoom: f32,
    max_zoom: f32,
}

impl ZoomViewport {
    /// Creates a viewport at `zoom`, clamped to `[min_zoom, max_zoom]`.
    ///
    /// Limits given in the wrong order are swapped.
    pub fn new(zoom: f32, min_zoom: f32, max_zoom: f32) -> Self {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        Self {
            view: Mutex::new(View {
                zoom: zoom.clamp(min_zoom, max_zoom),
                origin: Point::default(),
            }),
            min_zoom,
            max_zoom,
        }
    }

    pub fn from_config(display: &DisplayConfig) -> Self {
        Self::new(display.scale, display.min_scale, display.max_scale)
    }

    fn lock(&self) -> MutexGuard<'_, View> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Remote position shown at the screen's top-left corner.
    pub fn origin(&self) -> Point {
        self.lock().origin
    }
}

impl Viewport for ZoomViewport {
    fn current_scale(&self) -> f32 {
        self.lock().zoom
    }

    fn adjust_scale(&self, factor: f32, focus: Point) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let mut view = self.lock();
        let old = view.zoom;
        let new = (old * factor).clamp(self.min_zoom, self.max_zoom);
        view.origin = Point::new(
            view.origin.x + focus.x / old - focus.x / new,
            view.origin.y + focus.y / old - focus.y / new,
        );
        view.zoom = new;
        debug!(zoom = new, "viewport zoom adjusted");
    }

    fn to_remote(&self, screen: Point) -> Point {
        let view = self.lock();
        Point::new(
            view.origin.x + screen.x / view.zoom,
            view.origin.y + screen.y / view.zoom,
        )
    }
}
