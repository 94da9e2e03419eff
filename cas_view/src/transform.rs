// transform.rs - Per-frame pan and zoom transform

//! Derives the grid-to-screen transform for a frame from the [`ViewState`].
//!
//! Three cases, checked in order:
//! 1. Just reset: a grid smaller than the viewport is centered on that axis.
//!    A larger grid keeps its offset, which after a reset is zero.
//! 2. Scale changed since the last frame: the view moves relative to the
//!    viewport center `c`. Zooming out moves the offset halfway towards it,
//!    `offset + (c - offset) / 2`; zooming in reflects it, `offset - (c - offset)`.
//!    Only the direction of the change counts, not the zoom base or the number
//!    of steps since the last frame. The inspected point gets the same shift.
//! 3. Otherwise the offset is left alone.

use egui::{Pos2, Rect, Vec2};
use log::debug;

use crate::view::ViewState;

/// Affine grid-to-screen mapping: `screen = offset + grid * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransform {
    pub offset: Vec2,
    pub scale: f32,
}

impl FrameTransform {
    pub fn to_screen(&self, grid: Pos2) -> Pos2 {
        Pos2::new(
            self.offset.x + grid.x * self.scale,
            self.offset.y + grid.y * self.scale,
        )
    }

    pub fn rect_to_screen(&self, grid: Rect) -> Rect {
        Rect::from_min_max(self.to_screen(grid.min), self.to_screen(grid.max))
    }

    pub fn to_grid(&self, screen: Pos2) -> Pos2 {
        Pos2::new(
            (screen.x - self.offset.x) / self.scale,
            (screen.y - self.offset.y) / self.scale,
        )
    }
}

pub struct TransformEngine;

impl TransformEngine {
    /// Computes this frame's transform and settles the state for the next
    /// frame: clears `just_reset` and records the scale as the previous one.
    ///
    /// `grid_extent` is the unscaled size of the whole grid; an axis of
    /// unknown length (a universe without an absolute limit) should be
    /// `f32::INFINITY`, which never centers.
    pub fn compute_frame_transform(
        view: &mut ViewState,
        viewport: Vec2,
        grid_extent: Vec2,
    ) -> FrameTransform {
        let scale = view.scale();

        if view.just_reset {
            let empty = viewport - grid_extent * scale;
            if empty.x > 0.0 {
                view.offset.x = empty.x / 2.0;
            }
            if empty.y > 0.0 {
                view.offset.y = empty.y / 2.0;
            }
            debug!("Centered after reset: offset {:?}", view.offset);
        } else if view.zoom.scale_changed() {
            let center = viewport / 2.0;
            let shift = if view.zoom.scale() < view.zoom.previous_scale() {
                (center - view.offset) / 2.0
            } else {
                view.offset - center
            };

            view.offset += shift;
            view.inspected += shift;
            debug!(
                "Re-centered for zoom {} -> {}: offset {:?}, inspected {:?}",
                view.zoom.previous_scale(),
                view.zoom.scale(),
                view.offset,
                view.inspected
            );
        }

        view.just_reset = false;
        view.zoom.settle();

        FrameTransform {
            offset: view.offset,
            scale,
        }
    }
}
