// canvas.rs - Retained pixel buffer the simulation view draws on

use cas_view::{CursorShape, DrawingSurface};
use egui::{Color32, ColorImage, Pos2, Rect, Vec2};

/// RGBA raster that keeps its pixels between frames and is uploaded to a
/// texture after each frame.
pub struct PixelCanvas {
    width: usize,
    height: usize,
    pixels: Vec<Color32>,
    cursor: CursorShape,
}

impl PixelCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color32::BLACK; width * height],
            cursor: CursorShape::Default,
        }
    }

    pub fn size(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    /// Drops the content; the view redraws everything after a resize.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Color32::BLACK; width * height];
    }

    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    pub fn to_image(&self) -> ColorImage {
        ColorImage {
            size: [self.width, self.height],
            pixels: self.pixels.clone(),
        }
    }

    /// Pixel span covered by `[min, max)`, at least one pixel wide when the
    /// span is not empty, clipped to `[0, limit)`.
    fn span(min: f32, max: f32, limit: usize) -> Option<(usize, usize)> {
        if max <= min || max <= 0.0 || min >= limit as f32 {
            return None;
        }
        let start = min.round().max(0.0) as usize;
        let end = (max.round() as usize).max(start + 1).min(limit);
        (start < end).then_some((start, end))
    }
}

impl DrawingSurface for PixelCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        let Some((x0, x1)) = Self::span(rect.min.x, rect.max.x, self.width) else {
            return;
        };
        let Some((y0, y1)) = Self::span(rect.min.y, rect.max.y, self.height) else {
            return;
        };
        for y in y0..y1 {
            let row = y * self.width;
            self.pixels[row + x0..row + x1].fill(color);
        }
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, color: Color32, width: f32) {
        // Stamp a square brush every half pixel along the line.
        let brush = Vec2::splat(width.max(1.0) / 2.0);
        let steps = ((to - from).length() * 2.0).ceil().max(1.0) as usize;
        for step in 0..=steps {
            let center = from + (to - from) * (step as f32 / steps as f32);
            self.fill_rect(Rect::from_min_max(center - brush, center + brush), color);
        }
    }

    fn set_cursor_shape(&mut self, shape: CursorShape) {
        self.cursor = shape;
    }

    fn clear(&mut self, color: Color32) {
        self.pixels.fill(color);
    }
}
