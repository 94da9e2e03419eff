// automaton.rs - Demo elementary automaton feeding the view
//
// Each generation is produced one cell at a time with a cooperative yield
// between cells, so the view sees the current row grow.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use anyhow::{anyhow, Result};
use cas_view::universe::Row;
use cas_view::{Cell, CellState, Space};
use log::{debug, info};

use crate::settings::{InitialPattern, SimulationSettings};

/// How long a paused producer sleeps before checking again.
const PAUSE_POLL: Duration = Duration::from_millis(50);

/// Wolfram elementary rule: bit `4l + 2c + r` of the rule number is the next
/// state of a cell whose neighborhood is `(l, c, r)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementaryRule(pub u8);

impl ElementaryRule {
    pub fn next_state(self, left: CellState, center: CellState, right: CellState) -> CellState {
        let index = left.value() << 2 | center.value() << 1 | right.value();
        CellState::from((self.0 >> index) & 1 == 1)
    }

    /// Next state of `column` in a periodic row.
    pub fn next_cell(self, row: &[CellState], column: usize) -> CellState {
        let width = row.len();
        let left = row[(column + width - 1) % width];
        let right = row[(column + 1) % width];
        self.next_state(left, row[column], right)
    }
}

pub fn initial_row(settings: &SimulationSettings) -> Row {
    let width = settings.width;
    let states: Vec<CellState> = match settings.initial {
        InitialPattern::Single => (0..width).map(|i| CellState::from(i == width / 2)).collect(),
        InitialPattern::Random { seed } => {
            let mut hasher = DefaultHasher::new();
            seed.hash(&mut hasher);
            let mut state = hasher.finish();
            (0..width)
                .map(|_| {
                    state = state.wrapping_mul(1103515245).wrapping_add(12345);
                    CellState::from((state >> 16) % 2 == 1)
                })
                .collect()
        }
    };
    states
        .into_iter()
        .enumerate()
        .map(|(column, state)| Cell::new(column, state))
        .collect()
}

pub fn new_space(settings: &SimulationSettings) -> Space {
    Space::new(initial_row(settings), settings.absolute_limit)
}

/// Feeds a [`Space`] with generations of an elementary rule.
pub struct ElementaryProducer {
    rule: ElementaryRule,
    row_interval: Duration,
    running: Arc<AtomicBool>,
}

impl ElementaryProducer {
    pub fn new(settings: &SimulationSettings, running: Arc<AtomicBool>) -> Self {
        Self {
            rule: ElementaryRule(settings.rule),
            row_interval: settings.row_interval(),
            running,
        }
    }

    /// Runs the automaton until the absolute limit is reached. While
    /// `running` is false the producer idles between rows.
    pub async fn run(self, space: Arc<RwLock<Space>>) -> Result<()> {
        info!("Producer started with rule {}", self.rule.0);
        loop {
            if !self.running.load(Ordering::Relaxed) {
                tokio::time::sleep(PAUSE_POLL).await;
                continue;
            }

            let previous: Vec<CellState> = {
                let space = space.read().map_err(|_| anyhow!("space lock poisoned"))?;
                if space.is_finished() {
                    info!("Producer finished after {} generations", space.generation());
                    return Ok(());
                }
                space.last_row().iter().map(|cell| cell.state).collect()
            };

            for column in 0..previous.len() {
                let state = self.rule.next_cell(&previous, column);
                space
                    .write()
                    .map_err(|_| anyhow!("space lock poisoned"))?
                    .push_current(state);
                tokio::task::yield_now().await; // Let the view see the partial row.
            }

            let generation = {
                let mut space = space.write().map_err(|_| anyhow!("space lock poisoned"))?;
                space.commit_current();
                space.generation()
            };
            debug!("Generation {} published", generation);

            if !self.row_interval.is_zero() {
                tokio::time::sleep(self.row_interval).await;
            }
        }
    }
}
