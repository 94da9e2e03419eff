// inspector.rs - Cell neighborhood overlay

//! Outlines an inspected cell together with the two cells of the previous
//! generation it was computed from.
//!
//! ```text
//! P1---P2---P3---P4
//! |    |    |    |
//! P10--P9---P6---P5
//!      |    |
//!      P8---P7
//! ```
//!
//! The row is periodic: the left parent of column 0 is column `W - 1` and
//! the right parent of column `W - 1` is column 0. At either edge the
//! wrapped parent is drawn where it really sits, at the opposite side of
//! the grid, and the outline becomes two open pieces instead of one ring.

use egui::{Color32, Pos2};

use crate::surface::DrawingSurface;
use crate::transform::FrameTransform;
use crate::universe::TimeBounds;

/// Integral grid coordinates of a cell. Row 0 is the initial condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellCoord {
    pub x: i64,
    pub y: i64,
}

/// Line segments in grid space outlining a cell and its parents.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub cell: CellCoord,
    /// Columns of the two parent cells in row `cell.y - 1`.
    pub left_neighbor: usize,
    pub right_neighbor: usize,
    pub segments: Vec<(Pos2, Pos2)>,
}

pub struct NeighborhoodInspector;

impl NeighborhoodInspector {
    /// Cell under a screen point. Fractions are truncated toward zero, so
    /// points up to one cell left of or above the grid still land on column
    /// or row 0.
    pub fn locate(screen: Pos2, transform: FrameTransform, cell_size: f32) -> CellCoord {
        let scaled = transform.scale * cell_size;
        CellCoord {
            x: ((screen.x - transform.offset.x) / scaled).trunc() as i64,
            y: ((screen.y - transform.offset.y) / scaled).trunc() as i64,
        }
    }

    /// Outline of `cell` and its parents, or `None` when the cell cannot be
    /// inspected: it lies outside the row, on the initial condition, or past
    /// the last generation.
    pub fn outline(cell: CellCoord, bounds: TimeBounds, cell_size: f32) -> Option<Outline> {
        let width = bounds.relative as i64;
        if cell.x < 0 || cell.x >= width || cell.y <= 0 {
            return None;
        }
        if let Some(limit) = bounds.absolute {
            if cell.y > limit as i64 + 1 {
                return None;
            }
        }

        let s = cell_size;
        let cx = cell.x as f32 * s;
        let cy = cell.y as f32 * s;
        let top = cy - s;
        let bottom = cy + s;

        let p2 = Pos2::new(cx, top);
        let p3 = Pos2::new(cx + s, top);
        let p6 = Pos2::new(cx + s, cy);
        let p7 = Pos2::new(cx + s, bottom);
        let p8 = Pos2::new(cx, bottom);
        let p9 = Pos2::new(cx, cy);

        let last = bounds.relative - 1;
        let column = cell.x as usize;

        let (left_neighbor, right_neighbor, segments) = if column == 0 {
            // Left parent wraps to the far right.
            let wrapped = cx + s * width as f32 - s;
            let p1 = Pos2::new(wrapped, top);
            let p10 = Pos2::new(wrapped, cy);
            let p4 = Pos2::new(cx + 2.0 * s, top);
            let p5 = Pos2::new(cx + 2.0 * s, cy);
            let segments = vec![
                (p1, Pos2::new(p1.x + s, top)),
                (p2, p3),
                (p3, p4),
                (p4, p5),
                (p5, p6),
                (p6, p7),
                (p7, p8),
                (p8, p9),
                (p10, Pos2::new(p10.x + s, cy)),
                (p10, p1),
            ];
            (last, (column + 1) % bounds.relative, segments)
        } else if column == last {
            // Right parent wraps to the far left.
            let p1 = Pos2::new(cx - s, top);
            let p10 = Pos2::new(cx - s, cy);
            let p4 = Pos2::new(s, top);
            let p5 = Pos2::new(s, cy);
            let segments = vec![
                (p1, p2),
                (p2, p3),
                (Pos2::new(0.0, top), p4),
                (p4, p5),
                (p5, Pos2::new(0.0, cy)),
                (p6, p7),
                (p7, p8),
                (p8, p9),
                (p9, p10),
                (p10, p1),
            ];
            (column - 1, 0, segments)
        } else {
            let p1 = Pos2::new(cx - s, top);
            let p10 = Pos2::new(cx - s, cy);
            let p4 = Pos2::new(cx + 2.0 * s, top);
            let p5 = Pos2::new(cx + 2.0 * s, cy);
            let segments = vec![
                (p1, p2),
                (p2, p3),
                (p3, p4),
                (p4, p5),
                (p5, p6),
                (p6, p7),
                (p7, p8),
                (p8, p9),
                (p9, p10),
                (p10, p1),
            ];
            (column - 1, column + 1, segments)
        };

        Some(Outline {
            cell,
            left_neighbor,
            right_neighbor,
            segments,
        })
    }

    /// Strokes an outline on screen. `width` is in grid units.
    pub fn draw(
        outline: &Outline,
        transform: FrameTransform,
        color: Color32,
        width: f32,
        surface: &mut dyn DrawingSurface,
    ) {
        let screen_width = width * transform.scale;
        for &(from, to) in &outline.segments {
            surface.stroke_line(transform.to_screen(from), transform.to_screen(to), color, screen_width);
        }
    }
}

/// Pulsing highlight color of the inspector outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glow {
    intensity: u8,
    rising: bool,
    step: u8,
}

impl Glow {
    pub fn new(step: u8) -> Self {
        Self {
            intensity: 0,
            rising: true,
            step,
        }
    }

    /// Advances one frame and returns the color to stroke with.
    pub fn tick(&mut self) -> Color32 {
        if self.rising {
            match self.intensity.checked_add(self.step) {
                Some(next) => self.intensity = next,
                None => {
                    self.intensity = u8::MAX;
                    self.rising = false;
                }
            }
        } else {
            match self.intensity.checked_sub(self.step) {
                Some(next) => self.intensity = next,
                None => {
                    self.intensity = 0;
                    self.rising = true;
                }
            }
        }
        self.color()
    }

    pub fn color(&self) -> Color32 {
        Color32::from_rgb(255, self.intensity, self.intensity)
    }
}
