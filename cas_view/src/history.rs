// history.rs - Incremental drawing of the generation history

//! Draws the ever-growing history a bounded amount at a time.
//!
//! History rows are drawn once and left on the retained surface. A
//! [`RenderCursor`] remembers how far drawing got, and each frame completes
//! at most `row_budget` more rows. The initial condition and the row still
//! being produced are cheap (one row each) and are redrawn every frame.
//!
//! Grid row 0 holds the initial condition, history row `i` sits on grid row
//! `i + 1` and the current row directly below the last history row.

use egui::{Color32, Pos2, Rect, Vec2};
use log::trace;

use crate::config::ColorScheme;
use crate::surface::DrawingSurface;
use crate::transform::FrameTransform;
use crate::universe::{Cell, CellState, Universe};
use crate::view::RenderCursor;

/// Paints whole cells through a frame transform.
pub struct CellPainter<'a> {
    surface: &'a mut dyn DrawingSurface,
    transform: FrameTransform,
    cell_size: f32,
    dead: Color32,
    alive: Color32,
    /// Screen-space inset on each side, leaving a background grid line.
    inset: f32,
    painted: usize,
}

impl<'a> CellPainter<'a> {
    pub fn new(
        surface: &'a mut dyn DrawingSurface,
        transform: FrameTransform,
        cell_size: f32,
        colors: &ColorScheme,
        gridline_threshold: f32,
    ) -> Self {
        let inset = if transform.scale > gridline_threshold {
            transform.scale / 2.0
        } else {
            0.0
        };
        Self {
            surface,
            transform,
            cell_size,
            dead: colors.dead,
            alive: colors.alive,
            inset,
            painted: 0,
        }
    }

    /// Screen rectangle covered by grid cell (`column`, `row`).
    pub fn cell_rect(&self, column: usize, row: usize) -> Rect {
        let min = Pos2::new(column as f32 * self.cell_size, row as f32 * self.cell_size);
        let grid = Rect::from_min_size(min, Vec2::splat(self.cell_size));
        self.transform.rect_to_screen(grid).shrink(self.inset)
    }

    pub fn paint(&mut self, column: usize, row: usize, state: CellState) {
        let color = match state {
            CellState::Dead => self.dead,
            CellState::Alive => self.alive,
        };
        let rect = self.cell_rect(column, row);
        self.surface.fill_rect(rect, color);
        self.painted += 1;
    }

    pub fn paint_row(&mut self, cells: &[Cell], row: usize) {
        for (column, cell) in cells.iter().enumerate() {
            self.paint(column, row, cell.state);
        }
    }

    pub fn painted(&self) -> usize {
        self.painted
    }
}

/// Per-frame progress of the history pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryStats {
    pub rows_completed: usize,
    pub cells_painted: usize,
}

pub struct IncrementalHistoryRenderer {
    cursor: RenderCursor,
    row_budget: usize,
}

impl IncrementalHistoryRenderer {
    pub fn new(row_budget: usize) -> Self {
        Self {
            cursor: RenderCursor::default(),
            row_budget,
        }
    }

    pub fn cursor(&self) -> RenderCursor {
        self.cursor
    }

    /// Forgets all progress; the next frame starts again from the first
    /// history row.
    pub fn reset(&mut self) {
        self.cursor = RenderCursor::default();
    }

    pub fn render_frame(&mut self, universe: &dyn Universe, painter: &mut CellPainter<'_>) -> HistoryStats {
        let painted_before = painter.painted();

        painter.paint_row(universe.initial_condition(), 0);

        let history = universe.history();
        let mut rows_completed = 0;
        if !history.is_empty() {
            while history.len() > self.cursor.y && rows_completed < self.row_budget {
                self.draw_remaining(&history[self.cursor.y], painter);
                self.cursor.next_line();
                rows_completed += 1;
            }

            // Budget ran out one row short of the end: finish that row's
            // cells without counting it, so the newest row is never left
            // blank for a whole frame.
            if self.cursor.y == history.len() - 1 {
                self.draw_remaining(&history[self.cursor.y], painter);
            }
        }

        let current = universe.current();
        if !current.is_empty() {
            painter.paint_row(current, history.len() + 1);
        }

        trace!(
            "History pass: {} rows completed, cursor ({}, {}) of {} rows",
            rows_completed,
            self.cursor.x,
            self.cursor.y,
            history.len()
        );

        HistoryStats {
            rows_completed,
            cells_painted: painter.painted() - painted_before,
        }
    }

    fn draw_remaining(&mut self, row: &[Cell], painter: &mut CellPainter<'_>) {
        while !self.cursor.has_drawn(row.len()) {
            let column = self.cursor.next_column();
            painter.paint(column, self.cursor.y + 1, row[column].state);
        }
    }
}
