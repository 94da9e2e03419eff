//! Interactive view of a one-dimensional cellular automaton.
//!
//! Generations are stacked top to bottom (row 0 is the initial condition),
//! cells left to right. The history keeps growing while the simulation runs,
//! so it is drawn incrementally onto a surface that keeps its pixels between
//! frames. The view can be panned, zoomed in discrete steps, and an
//! inspector can outline any cell together with its two parents.

pub mod config;
pub mod history;
pub mod input;
pub mod inspector;
pub mod renderer;
pub mod surface;
pub mod transform;
pub mod universe;
pub mod view;

pub use config::ViewConfig;
pub use renderer::{FrameOutcome, FrameStats, SimulationView};
pub use surface::{CursorShape, DrawingSurface};
pub use universe::{Cell, CellState, Row, Space, TimeBounds, Universe, UniverseHandle};
