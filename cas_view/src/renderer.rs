// renderer.rs - Frame lifecycle of the simulation view

//! [`SimulationView`] is what the host drives: it receives the viewport
//! size, input events and one `render_frame` call per display refresh, and
//! turns them into draw commands on the host's [`DrawingSurface`].
//!
//! Per frame: transform, history pass, inspector overlay. Input events
//! arriving between frames only update state; anything that moves already
//! drawn pixels schedules a refresh, which clears the surface at the start
//! of the next frame and restarts the history pass.

use anyhow::{anyhow, Result};
use egui::{Pos2, Vec2};
use log::{debug, info, trace};

use crate::config::ViewConfig;
use crate::history::{CellPainter, HistoryStats, IncrementalHistoryRenderer};
use crate::input::{InputController, InputOutcome, Interaction};
use crate::inspector::{Glow, NeighborhoodInspector};
use crate::surface::{CursorShape, DrawingSurface};
use crate::transform::{FrameTransform, TransformEngine};
use crate::universe::{TimeBounds, UniverseHandle};
use crate::view::{RenderCursor, ViewState};

/// What a frame ended up showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No universe, or one without an initial condition. The host shows its
    /// placeholder instead.
    Welcome,
    Drawn(FrameStats),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub rows_completed: usize,
    pub cells_painted: usize,
    pub inspector_drawn: bool,
}

pub struct SimulationView {
    config: ViewConfig,
    viewport: Vec2,
    view: ViewState,
    history: IncrementalHistoryRenderer,
    input: InputController,
    glow: Glow,
    universe: Option<UniverseHandle>,
    clear_pending: bool,
}

impl SimulationView {
    pub fn new(config: ViewConfig) -> Self {
        let viewport = Vec2::new(config.viewport.width, config.viewport.height);
        Self {
            viewport,
            view: ViewState::new(config.zoom),
            history: IncrementalHistoryRenderer::new(config.feedback_rate),
            input: InputController::new(config.keys, config.inspector),
            glow: Glow::new(config.colors.inspector_glow_step),
            universe: None,
            clear_pending: true,
            config,
        }
    }

    /// Sets the viewport size. The surface is assumed to be new or resized,
    /// so everything is drawn again.
    pub fn setup(&mut self, width: f32, height: f32) {
        info!("Simulation view set up at {}x{}", width, height);
        self.viewport = Vec2::new(width, height);
        self.refresh();
    }

    pub fn set_universe(&mut self, universe: UniverseHandle) {
        info!("Universe bound to simulation view");
        self.universe = Some(universe);
        self.refresh();
    }

    /// Back to the initial view: zoomed out, centered, inspector off,
    /// everything redrawn.
    pub fn reset(&mut self) {
        info!("Simulation view reset");
        self.view = ViewState::new(self.config.zoom);
        self.input = InputController::new(self.config.keys, self.config.inspector);
        self.refresh();
    }

    pub fn on_pointer_down(&mut self, x: f32, y: f32) {
        let outcome = self.input.on_pointer_down(&mut self.view, Pos2::new(x, y));
        self.apply(outcome);
    }

    pub fn on_pointer_up(&mut self, x: f32, y: f32) {
        let outcome = self.input.on_pointer_up(&mut self.view, Pos2::new(x, y));
        self.apply(outcome);
    }

    pub fn on_key(&mut self, key: char) {
        let outcome = self.input.on_key(&mut self.view, key);
        self.apply(outcome);
    }

    pub fn render_frame(&mut self, surface: &mut dyn DrawingSurface) -> Result<FrameOutcome> {
        if self.clear_pending {
            surface.clear(self.config.colors.background);
            self.clear_pending = false;
        }

        let Some(handle) = self.universe.clone() else {
            return Ok(FrameOutcome::Welcome);
        };
        let universe = handle
            .read()
            .map_err(|_| anyhow!("universe lock poisoned by its producer"))?;
        if !universe.is_space_available() {
            return Ok(FrameOutcome::Welcome);
        }

        let bounds = universe.time_bounds();
        let extent = grid_extent(self.config.cell_size, bounds);
        let transform = TransformEngine::compute_frame_transform(&mut self.view, self.viewport, extent);

        let HistoryStats {
            rows_completed,
            cells_painted,
        } = {
            let mut painter = CellPainter::new(
                &mut *surface,
                transform,
                self.config.cell_size,
                &self.config.colors,
                self.config.gridline_threshold,
            );
            self.history.render_frame(&*universe, &mut painter)
        };
        drop(universe);

        let inspector_drawn = self.draw_inspector(transform, bounds, surface);

        let stats = FrameStats {
            rows_completed,
            cells_painted,
            inspector_drawn,
        };
        trace!("Frame drawn: {:?}", stats);
        Ok(FrameOutcome::Drawn(stats))
    }

    pub fn cursor(&self) -> RenderCursor {
        self.history.cursor()
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn interaction(&self) -> Interaction {
        self.input.state()
    }

    fn apply(&mut self, outcome: InputOutcome) {
        if outcome == InputOutcome::Refresh {
            self.refresh();
        }
    }

    fn refresh(&mut self) {
        debug!("Refresh: cursor was {:?}", self.history.cursor());
        self.history.reset();
        self.clear_pending = true;
    }

    fn draw_inspector(
        &mut self,
        transform: FrameTransform,
        bounds: TimeBounds,
        surface: &mut dyn DrawingSurface,
    ) -> bool {
        if !self.view.inspector {
            surface.set_cursor_shape(CursorShape::Move);
            return false;
        }
        surface.set_cursor_shape(CursorShape::Crosshair);

        let cell_size = self.config.cell_size;
        let cell = NeighborhoodInspector::locate(self.view.inspected, transform, cell_size);
        let Some(outline) = NeighborhoodInspector::outline(cell, bounds, cell_size) else {
            return false;
        };
        let color = self.glow.tick();
        let width = cell_size * self.config.inspector.stroke_ratio;
        NeighborhoodInspector::draw(&outline, transform, color, width, surface);
        true
    }
}

/// Unscaled size of the grid: the initial row plus every generation up to
/// the absolute limit. A running universe has no known height.
fn grid_extent(cell_size: f32, bounds: TimeBounds) -> Vec2 {
    let height = match bounds.absolute {
        Some(limit) => (limit + 1) as f32 * cell_size,
        None => f32::INFINITY,
    };
    Vec2::new(bounds.relative as f32 * cell_size, height)
}
