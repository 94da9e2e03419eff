use std::sync::{Arc, RwLock};

use cas_view::input::Interaction;
use cas_view::surface::{DrawCommand, RecordingSurface};
use cas_view::universe::row_from_states;
use cas_view::view::RenderCursor;
use cas_view::{CursorShape, FrameOutcome, SimulationView, Space, ViewConfig};
use egui::{Color32, Pos2, Vec2};
use test_log::test;

fn view_with(space: Space) -> (SimulationView, Arc<RwLock<Space>>) {
    let shared = Arc::new(RwLock::new(space));
    let mut view = SimulationView::new(ViewConfig::default());
    view.setup(582.0, 582.0);
    view.set_universe(shared.clone());
    (view, shared)
}

/// Publishes a row the way a producer does, one cell at a time.
fn publish(space: &mut Space, states: &[u8]) {
    for cell in row_from_states(states).unwrap() {
        space.push_current(cell.state);
    }
    space.commit_current();
}

fn space_with_rows(rows: usize, limit: Option<usize>) -> Space {
    let mut space = Space::from_states(&[0, 1, 0], limit).unwrap();
    for i in 0..rows {
        let state = (i % 2) as u8;
        publish(&mut space, &[state, state, 1 - state]);
    }
    space
}

fn drawn(outcome: FrameOutcome) -> cas_view::FrameStats {
    match outcome {
        FrameOutcome::Drawn(stats) => stats,
        FrameOutcome::Welcome => panic!("expected a drawn frame"),
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn no_universe_shows_welcome() {
    let mut view = SimulationView::new(ViewConfig::default());
    view.setup(582.0, 582.0);
    let mut surface = RecordingSurface::new();

    assert_eq!(view.render_frame(&mut surface).unwrap(), FrameOutcome::Welcome);
    assert_eq!(surface.commands, vec![DrawCommand::Clear(Color32::from_gray(204))]);
}

#[test]
fn empty_initial_condition_shows_welcome() {
    let (mut view, _space) = view_with(Space::new(Vec::new(), None));
    let mut surface = RecordingSurface::new();

    assert_eq!(view.render_frame(&mut surface).unwrap(), FrameOutcome::Welcome);
    assert_eq!(surface.fill_count(), 0);
}

#[test]
fn initial_condition_alone_is_one_centered_row() {
    let (mut view, _space) = view_with(space_with_rows(0, None));
    let mut surface = RecordingSurface::new();

    let stats = drawn(view.render_frame(&mut surface).unwrap());
    assert_eq!(stats.cells_painted, 3);

    let fills: Vec<_> = surface.fills().map(|(rect, color)| (*rect, *color)).collect();
    let colors: Vec<_> = fills.iter().map(|(_, color)| *color).collect();
    assert_eq!(colors, vec![Color32::WHITE, Color32::BLACK, Color32::WHITE]);
    for (i, (rect, _)) in fills.iter().enumerate() {
        // 100 units per cell at the minimum scale of 0.01.
        assert!(approx(rect.width(), 1.0) && approx(rect.height(), 1.0), "{:?}", rect);
        // (582 - 3) / 2 horizontally; the running universe is not centered vertically.
        assert!(approx(rect.min.x, 289.5 + i as f32), "{:?}", rect);
        assert!(approx(rect.min.y, 0.0), "{:?}", rect);
    }
}

#[test]
fn one_history_row_is_drawn_in_one_frame() {
    let mut space = Space::from_states(&[0, 1, 0], None).unwrap();
    publish(&mut space, &[1, 0, 1]);
    let (mut view, _space) = view_with(space);
    let mut surface = RecordingSurface::new();

    drawn(view.render_frame(&mut surface).unwrap());

    assert_eq!(view.cursor().y, 1);
    let colors: Vec<_> = surface.fills().map(|(_, color)| *color).collect();
    assert_eq!(
        colors,
        vec![
            Color32::WHITE,
            Color32::BLACK,
            Color32::WHITE,
            Color32::BLACK,
            Color32::WHITE,
            Color32::BLACK
        ]
    );
}

#[test]
fn long_history_takes_several_frames() {
    let (mut view, _space) = view_with(space_with_rows(200, None));
    let mut surface = RecordingSurface::new();

    view.render_frame(&mut surface).unwrap();
    assert_eq!(view.cursor().y, 60);

    for _ in 0..3 {
        let before = view.cursor().y;
        view.render_frame(&mut surface).unwrap();
        assert!(view.cursor().y - before <= 60);
    }
    assert_eq!(view.cursor().y, 200);

    view.render_frame(&mut surface).unwrap();
    assert_eq!(view.cursor().y, 200);
}

#[test]
fn rows_published_between_frames_are_picked_up() {
    let (mut view, space) = view_with(space_with_rows(1, None));
    let mut surface = RecordingSurface::new();
    view.render_frame(&mut surface).unwrap();
    assert_eq!(view.cursor().y, 1);

    {
        let mut space = space.write().unwrap();
        publish(&mut space, &[1, 1, 1]);
        space.push_current(cas_view::CellState::Alive);
    }
    let stats = drawn(view.render_frame(&mut surface).unwrap());
    assert_eq!(view.cursor().y, 2);
    // Initial row, the new history row and the single current cell.
    assert_eq!(stats.cells_painted, 3 + 3 + 1);
}

#[test]
fn reset_clears_before_drawing_again() {
    let (mut view, _space) = view_with(space_with_rows(10, Some(10)));
    let mut surface = RecordingSurface::new();
    view.render_frame(&mut surface).unwrap();
    view.render_frame(&mut surface).unwrap();
    assert_eq!(view.cursor().y, 10);

    view.reset();
    assert_eq!(view.cursor(), RenderCursor { x: -1, y: 0 });

    surface.take();
    view.render_frame(&mut surface).unwrap();
    assert_eq!(surface.commands[0], DrawCommand::Clear(Color32::from_gray(204)));
    assert!(matches!(surface.commands[1], DrawCommand::FillRect { .. }));

    // No refresh pending: the following frame draws over what is there.
    surface.take();
    view.render_frame(&mut surface).unwrap();
    assert!(!surface.commands.iter().any(|c| matches!(c, DrawCommand::Clear(_))));
}

#[test]
fn reset_after_zoom_restores_scale_and_centering() {
    let (mut view, _space) = view_with(space_with_rows(0, Some(10)));
    let mut surface = RecordingSurface::new();
    view.render_frame(&mut surface).unwrap();
    // (582 - 3) / 2 and (582 - 11) / 2
    let centered = Vec2::new(289.5, 285.5);
    assert!((view.view_state().offset - centered).length() < 1e-3);

    view.on_key('2');
    view.render_frame(&mut surface).unwrap();
    assert_eq!(view.view_state().scale(), 0.02);
    assert!((view.view_state().offset - centered).length() > 1.0);

    view.reset();
    view.render_frame(&mut surface).unwrap();
    assert_eq!(view.view_state().scale(), 0.01);
    assert!((view.view_state().offset - centered).length() < 1e-3);
}

#[test]
fn two_zoom_steps_before_a_frame_shift_once() {
    let (mut view, _space) = view_with(space_with_rows(0, Some(10)));
    let mut surface = RecordingSurface::new();
    view.render_frame(&mut surface).unwrap();
    assert!((view.view_state().offset - Vec2::new(289.5, 285.5)).length() < 1e-3);

    view.on_key('2');
    view.on_key('2');
    surface.take();
    view.render_frame(&mut surface).unwrap();

    assert_eq!(view.view_state().scale(), 0.04);
    // Reflected across the center (291, 291) once.
    let offset = view.view_state().offset;
    assert!((offset - Vec2::new(288.0, 280.0)).length() < 1e-3, "{:?}", offset);
    let (first, _) = surface.fills().next().unwrap();
    assert!(approx(first.min.x, 288.0) && approx(first.min.y, 280.0), "{:?}", first);
}

#[test]
fn zoom_round_trip_through_keys_is_exact() {
    let (mut view, _space) = view_with(space_with_rows(0, None));
    let mut surface = RecordingSurface::new();
    let start = view.view_state().scale();

    for _ in 0..5 {
        view.on_key('2');
        view.render_frame(&mut surface).unwrap();
    }
    for _ in 0..5 {
        view.on_key('1');
        view.render_frame(&mut surface).unwrap();
    }
    assert_eq!(view.view_state().scale(), start);
}

#[test]
fn pan_moves_grid_and_restarts_history() {
    let (mut view, _space) = view_with(space_with_rows(5, Some(10)));
    let mut surface = RecordingSurface::new();
    view.render_frame(&mut surface).unwrap();
    let before = view.view_state().offset;

    view.on_pointer_down(100.0, 100.0);
    assert_eq!(view.interaction(), Interaction::Idle);
    view.on_pointer_up(110.0, 95.0);
    assert_eq!(view.interaction(), Interaction::Panning);
    assert_eq!(view.cursor(), RenderCursor::default());
    assert_eq!(view.view_state().offset, before + Vec2::new(10.0, -5.0));

    surface.take();
    view.render_frame(&mut surface).unwrap();
    assert!(matches!(surface.commands[0], DrawCommand::Clear(_)));
    let (first, _) = surface.fills().next().unwrap();
    assert!(approx(first.min.x, before.x + 10.0));
    assert!(approx(first.min.y, before.y - 5.0));
}

#[test]
fn inspector_outlines_the_released_cell() {
    let (mut view, _space) = view_with(space_with_rows(5, Some(10)));
    let mut surface = RecordingSurface::new();
    view.render_frame(&mut surface).unwrap();
    assert!(surface.commands.contains(&DrawCommand::SetCursor(CursorShape::Move)));

    view.on_key('3');
    // Cell (1, 2): offset (289.5, 285.5), one pixel per cell.
    view.on_pointer_down(291.0, 288.0);
    view.on_pointer_up(291.0, 288.0);

    surface.take();
    let stats = drawn(view.render_frame(&mut surface).unwrap());
    assert!(stats.inspector_drawn);
    assert!(surface.commands.contains(&DrawCommand::SetCursor(CursorShape::Crosshair)));
    assert_eq!(surface.lines().count(), 10);

    // P1 of cell (1, 2) is the corner of cell (0, 1).
    let (from, _) = surface.lines().next().unwrap();
    assert!((*from - Pos2::new(289.5, 286.5)).length() < 1e-3, "{:?}", from);

    // Pointing at the initial condition draws nothing.
    view.on_pointer_down(291.0, 285.7);
    view.on_pointer_up(291.0, 285.7);
    surface.take();
    let stats = drawn(view.render_frame(&mut surface).unwrap());
    assert!(!stats.inspector_drawn);
    assert_eq!(surface.lines().count(), 0);
}

#[test]
fn turning_inspector_off_wipes_overlay() {
    let (mut view, _space) = view_with(space_with_rows(5, Some(10)));
    let mut surface = RecordingSurface::new();
    view.render_frame(&mut surface).unwrap();

    view.on_key('3');
    view.render_frame(&mut surface).unwrap();
    assert_eq!(view.cursor().y, 5);

    view.on_key('3');
    assert_eq!(view.cursor(), RenderCursor::default());
    surface.take();
    view.render_frame(&mut surface).unwrap();
    assert!(matches!(surface.commands[0], DrawCommand::Clear(_)));
}

#[test]
fn poisoned_universe_is_an_error() {
    let (mut view, space) = view_with(space_with_rows(1, None));
    let producer = space.clone();
    let _ = std::thread::spawn(move || {
        let _guard = producer.write().unwrap();
        panic!("producer crashed while publishing");
    })
    .join();

    let mut surface = RecordingSurface::new();
    assert!(view.render_frame(&mut surface).is_err());
}
