use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::timing::clock::ManualClock;

const ZIGZAG: [(f64, f64); 6] = [
    (0.0, 0.0),
    (10.0, 0.0),
    (10.0, 10.0),
    (20.0, 10.0),
    (20.0, 20.0),
    (30.0, 20.0),
];

fn engine(motion_ms: f64, aux_ms: f64) -> (RouteAnimationEngine, ManualClock) {
    let clock = ManualClock::new();
    let config = EngineConfig {
        motion_delay_ms: motion_ms,
        aux_delay_ms: aux_ms,
        home: Point::new(90.0, 320.0),
        ..EngineConfig::default()
    };
    let engine = RouteAnimationEngine::with_parts(
        config,
        Box::new(clock.clone()),
        Box::new(ArclenSampler::default()),
    )
    .unwrap();
    (engine, clock)
}

fn place_all(engine: &mut RouteAnimationEngine) {
    for (x, y) in ZIGZAG {
        assert!(engine.add_point(Point::new(x, y)).accepted);
    }
}

fn aux_counter(engine: &mut RouteAnimationEngine) -> Rc<Cell<u32>> {
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    engine.on_auxiliary_start(move || c.set(c.get() + 1));
    count
}

#[test]
fn idle_marker_sits_at_home() {
    let (engine, _) = engine(1000.0, 500.0);
    let r = engine.current_render();
    assert_eq!(r.state, EngineState::Idle);
    assert_eq!(r.position, Point::new(90.0, 320.0));
    assert_eq!(r.display_angle, 0.0);
    assert!(r.curve.is_none());
    assert!(r.path_data.is_none());
    assert!(r.show_waypoints);
    assert_eq!(r.prompt.as_deref(), Some("Click to set START point (1/6)"));
    assert!(!engine.needs_frames());
}

#[test]
fn collecting_marker_follows_first_waypoint() {
    let (mut engine, _) = engine(1000.0, 500.0);
    engine.add_point(Point::new(40.0, 50.0));
    let r = engine.current_render();
    assert_eq!(r.state, EngineState::Collecting(1));
    assert_eq!(r.position, Point::new(40.0, 50.0));
    assert_eq!(r.display_angle, 0.0);

    engine.add_point(Point::new(40.0, 10.0));
    let r = engine.current_render();
    assert_eq!(r.state, EngineState::Collecting(2));
    assert!((r.position - Point::new(40.0, 50.0)).hypot() < 1e-9);
    // Heading straight up (-90°) stays unflipped at the boundary.
    assert!((r.display_angle + 90.0).abs() < 1e-6);
    assert!(r.path_data.is_some());
    assert_eq!(r.total_length, 40.0);
    assert_eq!(r.prompt.as_deref(), Some("Click to set MIDDLE point (3/6)"));
}

#[test]
fn sixth_point_arms_and_seventh_is_ignored() {
    let (mut engine, _) = engine(1000.0, 500.0);
    place_all(&mut engine);
    assert_eq!(engine.state(), EngineState::Armed);
    assert!(engine.needs_frames());

    let outcome = engine.add_point(Point::new(99.0, 99.0));
    assert!(!outcome.accepted);
    assert_eq!(engine.waypoints().len(), 6);
    assert_eq!(engine.state(), EngineState::Armed);
    assert!(engine.current_render().prompt.is_none());
}

#[test]
fn armed_timeline_runs_to_finish() {
    let (mut engine, clock) = engine(1000.0, 500.0);
    let aux = aux_counter(&mut engine);
    place_all(&mut engine);

    clock.set(Millis(499.0));
    engine.tick();
    assert_eq!(aux.get(), 0);
    clock.set(Millis(500.0));
    engine.tick();
    assert_eq!(aux.get(), 1);
    assert_eq!(engine.state(), EngineState::Armed);

    clock.set(Millis(1000.0));
    engine.tick();
    assert_eq!(engine.state(), EngineState::Running);
    assert_eq!(engine.progress(), 0.0);
    assert!(!engine.current_render().show_waypoints);

    clock.set(Millis(5000.0));
    engine.tick();
    assert_eq!(engine.progress(), 0.5);

    clock.set(Millis(9000.0));
    engine.tick();
    assert_eq!(engine.state(), EngineState::Finished);
    assert_eq!(engine.progress(), 1.0);
    assert!(!engine.needs_frames());
    assert_eq!(aux.get(), 1);

    let r = engine.current_render();
    assert!((r.position - Point::new(30.0, 20.0)).hypot() < 1e-3);
    assert_eq!(r.display_angle, 0.0);
    assert!(!r.flipped);
}

#[test]
fn late_first_frame_measures_from_motion_deadline() {
    let (mut engine, clock) = engine(1000.0, 500.0);
    let aux = aux_counter(&mut engine);
    place_all(&mut engine);

    clock.set(Millis(5000.0));
    engine.tick();
    assert_eq!(aux.get(), 1);
    assert_eq!(engine.state(), EngineState::Running);
    assert_eq!(engine.progress(), 0.5);
}

#[test]
fn redo_requires_complete_route() {
    let (mut engine, _) = engine(1000.0, 500.0);
    engine.add_point(Point::new(1.0, 1.0));
    assert!(!engine.redo());
    assert_eq!(engine.state(), EngineState::Collecting(1));
    assert!(!engine.needs_frames());
}

#[test]
fn redo_after_finish_rearms_same_curve() {
    let (mut engine, clock) = engine(1000.0, 500.0);
    let aux = aux_counter(&mut engine);
    place_all(&mut engine);
    clock.set(Millis(9000.0));
    engine.tick();
    assert_eq!(engine.state(), EngineState::Finished);
    let curve = engine.curve().cloned();

    assert!(engine.redo());
    assert_eq!(engine.state(), EngineState::Armed);
    assert_eq!(engine.progress(), 0.0);
    assert_eq!(engine.curve().cloned(), curve);
    assert_eq!(engine.next_deadline(), Some(Millis(9500.0)));

    clock.set(Millis(18_000.0));
    engine.tick();
    assert_eq!(engine.state(), EngineState::Finished);
    assert_eq!(aux.get(), 2);
}

#[test]
fn redo_while_running_restarts_delays() {
    let (mut engine, clock) = engine(1000.0, 500.0);
    place_all(&mut engine);
    clock.set(Millis(3000.0));
    engine.tick();
    assert_eq!(engine.state(), EngineState::Running);

    assert!(engine.redo());
    assert_eq!(engine.state(), EngineState::Armed);
    clock.set(Millis(3999.0));
    engine.tick();
    assert_eq!(engine.state(), EngineState::Armed);
    assert_eq!(engine.progress(), 0.0);
}

#[test]
fn reset_cancels_pending_auxiliary() {
    let (mut engine, clock) = engine(1000.0, 500.0);
    let aux = aux_counter(&mut engine);
    place_all(&mut engine);

    engine.reset();
    assert_eq!(engine.state(), EngineState::Collecting(1));
    assert_eq!(engine.waypoints(), &[Point::new(0.0, 0.0)]);
    assert!(engine.curve().is_none());
    assert!(!engine.needs_frames());

    clock.set(Millis(20_000.0));
    engine.tick();
    assert_eq!(aux.get(), 0);
    assert_eq!(engine.state(), EngineState::Collecting(1));
}

#[test]
fn reset_mid_run_stops_the_marker() {
    let (mut engine, clock) = engine(0.0, 0.0);
    place_all(&mut engine);
    clock.set(Millis(2000.0));
    engine.tick();
    assert!(engine.progress() > 0.0);

    engine.reset();
    assert_eq!(engine.progress(), 0.0);
    let r = engine.current_render();
    assert_eq!(r.position, Point::new(0.0, 0.0));
    assert!(r.show_waypoints);
}

#[test]
fn last_signal_wins_between_add_and_reset() {
    let (mut engine, _) = engine(1000.0, 500.0);
    engine.add_point(Point::new(1.0, 1.0));
    engine.add_point(Point::new(2.0, 2.0));

    engine.reset();
    engine.add_point(Point::new(3.0, 3.0));
    assert_eq!(engine.state(), EngineState::Collecting(2));
    assert_eq!(engine.waypoints(), &[Point::new(1.0, 1.0), Point::new(3.0, 3.0)]);

    engine.add_point(Point::new(4.0, 4.0));
    engine.reset();
    assert_eq!(engine.state(), EngineState::Collecting(1));
}

#[test]
fn reset_on_empty_engine_stays_idle() {
    let (mut engine, _) = engine(1000.0, 500.0);
    engine.reset();
    assert_eq!(engine.state(), EngineState::Idle);
}

#[test]
fn render_listener_sees_each_transition() {
    let (mut engine, clock) = engine(1000.0, 500.0);
    let seen: Rc<RefCell<Vec<EngineState>>> = Rc::default();
    let sink = seen.clone();
    engine.on_render(move |snap| sink.borrow_mut().push(snap.state));

    place_all(&mut engine);
    for t in [1000.0, 3000.0, 9000.0] {
        clock.set(Millis(t));
        engine.tick();
    }

    let mut states = seen.borrow().clone();
    states.dedup();
    assert_eq!(
        states,
        vec![
            EngineState::Collecting(1),
            EngineState::Collecting(2),
            EngineState::Collecting(3),
            EngineState::Collecting(4),
            EngineState::Collecting(5),
            EngineState::Armed,
            EngineState::Running,
            EngineState::Finished,
        ]
    );
}

#[test]
fn invalid_config_is_rejected_and_previous_kept() {
    let bad = EngineConfig {
        motion_delay_ms: -5.0,
        ..EngineConfig::default()
    };
    assert!(RouteAnimationEngine::with_parts(
        bad.clone(),
        Box::new(ManualClock::new()),
        Box::new(ArclenSampler::default()),
    )
    .is_err());

    let (mut engine, _) = engine(1000.0, 500.0);
    place_all(&mut engine);
    assert!(engine.redo_with(bad).is_err());
    assert_eq!(engine.config().motion_delay(), Millis(1000.0));
}

#[test]
fn redo_with_applies_new_delays() {
    let (mut engine, clock) = engine(1000.0, 500.0);
    place_all(&mut engine);
    let cfg = EngineConfig {
        motion_delay_ms: 200.0,
        aux_delay_ms: 100.0,
        ..engine.config().clone()
    };
    assert!(engine.redo_with(cfg).unwrap());

    clock.set(Millis(200.0));
    engine.tick();
    assert_eq!(engine.state(), EngineState::Running);
}

#[test]
fn snapping_rounds_placed_waypoints() {
    let (mut engine, _) = engine(1000.0, 500.0);
    engine.add_point(Point::new(10.4, 19.6));
    assert_eq!(engine.waypoints(), &[Point::new(10.0, 20.0)]);
}
