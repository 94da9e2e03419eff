// universe.rs - Cell rows produced by the simulation engine

//! Read side of the simulation data consumed by the view.
//!
//! The view never produces cells. A producer (the rule engine) owns a
//! [`Space`] and publishes rows into it, the view reads it once per frame
//! through a [`UniverseHandle`].
//!
//! Producer contract, assumed and not checked here:
//! * every row in the history has exactly `relative` cells,
//! * the current row never holds more than `relative` cells,
//! * a row is published whole and never mutated afterwards.

use std::sync::{Arc, RwLock};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Binary state of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    Dead = 0,
    Alive = 1,
}

impl CellState {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive { CellState::Alive } else { CellState::Dead }
    }
}

impl TryFrom<u8> for CellState {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(CellState::Dead),
            1 => Ok(CellState::Alive),
            other => bail!("cell state must be 0 or 1, got {}", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub column: usize,
    pub state: CellState,
}

impl Cell {
    pub fn new(column: usize, state: CellState) -> Self {
        Self { column, state }
    }
}

pub type Row = Vec<Cell>;

/// Absolute and relative time limits of a universe.
///
/// `relative` is the row width `W` and the period of the horizontal wrap.
/// `absolute` is the number of generations to run, `None` while running
/// without a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBounds {
    pub absolute: Option<usize>,
    pub relative: usize,
}

/// What the view needs from a simulation.
pub trait Universe {
    fn initial_condition(&self) -> &[Cell];
    fn history(&self) -> &[Row];
    fn current(&self) -> &[Cell];
    fn time_bounds(&self) -> TimeBounds;

    /// A universe without an initial condition has nothing to show yet.
    fn is_space_available(&self) -> bool {
        !self.initial_condition().is_empty()
    }
}

pub type UniverseHandle = Arc<RwLock<dyn Universe + Send + Sync>>;

/// Append-only store of generations.
#[derive(Debug, Clone)]
pub struct Space {
    initial: Row,
    history: Vec<Row>,
    current: Row,
    bounds: TimeBounds,
}

impl Space {
    pub fn new(initial: Row, absolute: Option<usize>) -> Self {
        let bounds = TimeBounds {
            absolute,
            relative: initial.len(),
        };
        Self {
            initial,
            history: Vec::new(),
            current: Vec::new(),
            bounds,
        }
    }

    /// Builds a space from raw `0`/`1` states.
    pub fn from_states(states: &[u8], absolute: Option<usize>) -> Result<Self> {
        Ok(Self::new(row_from_states(states)?, absolute))
    }

    /// Appends a cell to the row being produced.
    pub fn push_current(&mut self, state: CellState) {
        let column = self.current.len();
        self.current.push(Cell::new(column, state));
    }

    /// Publishes the current row as the next history entry.
    pub fn commit_current(&mut self) {
        let row = std::mem::take(&mut self.current);
        self.history.push(row);
    }

    #[cfg(test)]
    pub(crate) fn push_row(&mut self, row: Row) {
        self.history.push(row);
    }

    /// The row the next generation is computed from.
    pub fn last_row(&self) -> &[Cell] {
        self.history.last().unwrap_or(&self.initial)
    }

    pub fn generation(&self) -> usize {
        self.history.len()
    }

    pub fn is_finished(&self) -> bool {
        self.bounds
            .absolute
            .is_some_and(|limit| self.history.len() >= limit)
    }
}

impl Universe for Space {
    fn initial_condition(&self) -> &[Cell] {
        &self.initial
    }

    fn history(&self) -> &[Row] {
        &self.history
    }

    fn current(&self) -> &[Cell] {
        &self.current
    }

    fn time_bounds(&self) -> TimeBounds {
        self.bounds
    }
}

pub fn row_from_states(states: &[u8]) -> Result<Row> {
    states
        .iter()
        .enumerate()
        .map(|(column, &value)| Ok(Cell::new(column, CellState::try_from(value)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn states_outside_binary_alphabet_are_rejected() {
        assert!(CellState::try_from(2).is_err());
        assert!(Space::from_states(&[0, 1, 7], None).is_err());
    }

    #[test]
    fn commit_moves_current_into_history() {
        let mut space = Space::from_states(&[0, 1, 0], Some(2)).unwrap();
        space.push_current(CellState::Alive);
        space.push_current(CellState::Dead);
        assert_eq!(space.current().len(), 2);
        assert!(space.history().is_empty());

        space.push_current(CellState::Alive);
        space.commit_current();
        assert!(space.current().is_empty());
        assert_eq!(space.history().len(), 1);
        assert_eq!(space.history()[0][2], Cell::new(2, CellState::Alive));
        assert!(!space.is_finished());

        space.push_row(row_from_states(&[1, 1, 1]).unwrap());
        assert!(space.is_finished());
        assert_eq!(space.last_row()[0].state, CellState::Alive);
    }

    #[test]
    fn empty_initial_condition_has_no_space() {
        let space = Space::new(Vec::new(), None);
        assert!(!space.is_space_available());
        assert_eq!(space.time_bounds().relative, 0);
    }
}
