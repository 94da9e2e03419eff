// surface.rs - Drawing capability consumed by the renderer

//! The renderer never talks to a toolkit directly. It issues screen-space
//! commands to a [`DrawingSurface`] supplied by the host for the duration of
//! one frame. The surface is expected to retain its pixels between frames,
//! since history rows are drawn only once.

use egui::{Color32, Pos2, Rect};

/// Pointer shape hint for the host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    #[default]
    Default,
    Move,
    Crosshair,
}

pub trait DrawingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color32);
    fn stroke_line(&mut self, from: Pos2, to: Pos2, color: Color32, width: f32);
    fn set_cursor_shape(&mut self, shape: CursorShape);
    fn clear(&mut self, color: Color32);
}

/// One recorded call on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color32 },
    StrokeLine { from: Pos2, to: Pos2, color: Color32, width: f32 },
    SetCursor(CursorShape),
    Clear(Color32),
}

/// Surface that only remembers what was asked of it.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn fills(&self) -> impl Iterator<Item = (&Rect, &Color32)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillRect { rect, color } => Some((rect, color)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (&Pos2, &Pos2)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::StrokeLine { from, to, .. } => Some((from, to)),
            _ => None,
        })
    }

    pub fn fill_count(&self) -> usize {
        self.fills().count()
    }
}

impl DrawingSurface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, color: Color32, width: f32) {
        self.commands.push(DrawCommand::StrokeLine { from, to, color, width });
    }

    fn set_cursor_shape(&mut self, shape: CursorShape) {
        self.commands.push(DrawCommand::SetCursor(shape));
    }

    fn clear(&mut self, color: Color32) {
        self.commands.push(DrawCommand::Clear(color));
    }
}
