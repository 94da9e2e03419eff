// input.rs - Pointer and key handling

use egui::Pos2;
use log::debug;

use crate::config::{InspectorConfig, KeyBindings};
use crate::view::ViewState;

/// What the last completed gesture did. Status only: the inspector flag at
/// release time decides what a release does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// The last release moved the view.
    Panning,
    /// The last release picked a cell for the inspector overlay.
    Inspecting,
}

/// Result of an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Unchanged,
    /// Previously drawn pixels are stale: clear the surface and redraw the
    /// history from the start.
    Refresh,
}

pub struct InputController {
    keys: KeyBindings,
    inspector: InspectorConfig,
    state: Interaction,
}

impl InputController {
    pub fn new(keys: KeyBindings, inspector: InspectorConfig) -> Self {
        Self {
            keys,
            inspector,
            state: Interaction::Idle,
        }
    }

    pub fn state(&self) -> Interaction {
        self.state
    }

    pub fn on_pointer_down(&mut self, view: &mut ViewState, at: Pos2) -> InputOutcome {
        view.press_anchor = at;
        InputOutcome::Unchanged
    }

    /// The inspector flag at release time decides between picking and
    /// panning, even if it was toggled while the pointer was down.
    pub fn on_pointer_up(&mut self, view: &mut ViewState, at: Pos2) -> InputOutcome {
        if view.inspector {
            view.inspected = view.press_anchor;
            self.state = Interaction::Inspecting;
            debug!("Inspecting point {:?}", view.inspected);
        } else {
            let delta = at - view.press_anchor;
            view.offset += delta;
            // Keep the subject on the same cell for a later inspector toggle.
            view.inspected += delta;
            self.state = Interaction::Panning;
            debug!("Panned by {:?} to {:?}", delta, view.offset);
        }
        InputOutcome::Refresh
    }

    pub fn on_key(&mut self, view: &mut ViewState, key: char) -> InputOutcome {
        if key == self.keys.zoom_out {
            if view.zoom.step_out() {
                return InputOutcome::Refresh;
            }
        } else if key == self.keys.zoom_in {
            if view.zoom.step_in() {
                return InputOutcome::Refresh;
            }
        } else if key == self.keys.toggle_inspector && self.inspector.available {
            view.inspector = !view.inspector;
            debug!("Inspector {}", if view.inspector { "on" } else { "off" });
            // The overlay appears at the next release; turning it off must
            // wipe the one already drawn.
            if !view.inspector {
                self.state = Interaction::Idle;
                return InputOutcome::Refresh;
            }
        }
        InputOutcome::Unchanged
    }
}
