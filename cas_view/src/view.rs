// view.rs - Interaction state of the simulation view

use egui::{Pos2, Vec2};
use log::debug;

use crate::config::ZoomConfig;

/// Discrete zoom level.
///
/// The scale is always recomputed from the integral exponent, so any number
/// of steps in followed by the same number of steps out lands exactly on the
/// starting scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    config: ZoomConfig,
    exponent: i32,
    scale: f32,
    previous_scale: f32,
}

/// Absorbs the rounding of `min_scale * base^n` when `max_scale` sits on a
/// step. A step accepted within the tolerance lands on `max_scale` itself.
const SCALE_TOLERANCE: f32 = 1e-6;

impl Zoom {
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            config,
            exponent: 0,
            scale: config.min_scale,
            previous_scale: config.min_scale,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn previous_scale(&self) -> f32 {
        self.previous_scale
    }

    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    pub fn min_scale(&self) -> f32 {
        self.config.min_scale
    }

    pub fn max_scale(&self) -> f32 {
        self.config.max_scale
    }

    fn scale_at(&self, exponent: i32) -> f32 {
        self.config.min_scale * self.config.base.powi(exponent)
    }

    /// Zooms in one step. Returns false at the upper bound.
    pub fn step_in(&mut self) -> bool {
        if self.scale >= self.config.max_scale {
            return false;
        }
        let next = self.scale_at(self.exponent + 1);
        if next > self.config.max_scale * (1.0 + SCALE_TOLERANCE) {
            return false;
        }
        self.exponent += 1;
        self.scale = next.min(self.config.max_scale);
        debug!("Zoom in: exponent {}, scale {}", self.exponent, self.scale);
        true
    }

    /// Zooms out one step. Returns false at the lower bound.
    pub fn step_out(&mut self) -> bool {
        if self.exponent <= 0 {
            return false;
        }
        self.exponent -= 1;
        self.scale = self.scale_at(self.exponent);
        debug!("Zoom out: exponent {}, scale {}", self.exponent, self.scale);
        true
    }

    pub fn scale_changed(&self) -> bool {
        self.scale != self.previous_scale
    }

    pub fn settle(&mut self) {
        self.previous_scale = self.scale;
    }
}

/// Pan, zoom and inspector state. Replaced wholesale on reset.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub offset: Vec2,
    pub zoom: Zoom,
    pub inspector: bool,
    /// Where the last pointer press landed, in screen space.
    pub press_anchor: Pos2,
    /// Screen point whose cell the inspector outlines.
    pub inspected: Pos2,
    pub just_reset: bool,
}

impl ViewState {
    pub fn new(zoom: ZoomConfig) -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: Zoom::new(zoom),
            inspector: false,
            press_anchor: Pos2::ZERO,
            inspected: Pos2::ZERO,
            just_reset: true,
        }
    }

    pub fn scale(&self) -> f32 {
        self.zoom.scale()
    }
}

/// Progress of the incremental history pass.
///
/// `x` is the last column drawn in history row `y`, `-1` when none of it has
/// been drawn yet. Only moves forward until the view is refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderCursor {
    pub x: isize,
    pub y: usize,
}

impl Default for RenderCursor {
    fn default() -> Self {
        Self { x: -1, y: 0 }
    }
}

impl RenderCursor {
    pub fn next_column(&mut self) -> usize {
        self.x += 1;
        self.x as usize
    }

    pub fn next_line(&mut self) {
        self.y += 1;
        self.x = -1;
    }

    /// Whether every cell of a row of `len` cells has been drawn.
    pub fn has_drawn(&self, len: usize) -> bool {
        self.x >= len as isize - 1
    }
}
