//! End-to-end sessions driven through the public API

use blob_sallad::consts::{JOIN_GROWTH, SIM_DT};
use blob_sallad::settings::Settings;
use blob_sallad::sim::{BlobId, Direction, PointerEvent, SimState, TickInput, tick};
use blob_sallad::{Vector2, from_pixels};

fn state() -> SimState {
    SimState::new(&Settings::default()).unwrap()
}

fn run(state: &mut SimState, input: &TickInput, ticks: usize) {
    for _ in 0..ticks {
        tick(state, input, SIM_DT);
    }
}

#[test]
fn test_split_then_join() {
    let mut s = state();
    assert!(s.split());

    let radii: Vec<f64> = s.population.active().map(|(_, b)| b.radius()).collect();
    assert_eq!(radii.len(), 2);
    for r in radii {
        assert!((r - 0.3).abs() < 1e-12);
    }
    assert_eq!(s.population.tethers().mutual_pairs(), 1);

    run(&mut s, &TickInput::default(), 30);

    assert!(s.join());
    let (_, survivor) = s.population.active().next().unwrap();
    let expected = JOIN_GROWTH * (0.3f64 * 0.3 + 0.3 * 0.3).sqrt();
    assert!((survivor.radius() - expected).abs() < 1e-9);
    assert_eq!(s.population.active_count(), 1);
    assert!(s.population.tethers().is_empty());
}

#[test]
fn test_every_pair_is_tethered_after_splits() {
    let mut s = state();
    for _ in 0..4 {
        assert!(s.split());
    }
    assert_eq!(s.population.active_count(), 5);
    assert_eq!(s.population.tethers().mutual_pairs(), 10);
}

#[test]
fn test_join_reuses_slot_on_next_split() {
    let mut s = state();
    s.split();
    s.split();
    run(&mut s, &TickInput::default(), 10);
    s.join();
    let vacant = s
        .population
        .slots()
        .iter()
        .position(Option::is_none)
        .unwrap();

    s.split();
    assert!(s.population.get(BlobId(vacant)).is_some());
    assert_eq!(s.population.slot_count(), 3);
}

#[test]
fn test_blobs_stay_in_arena() {
    let mut s = state();
    for _ in 0..3 {
        s.split();
    }
    for direction in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
        s.nudge(direction, 120.0);
        run(&mut s, &TickInput::default(), 40);
    }

    let b = s.boundary;
    for (_, blob) in s.population.active() {
        for p in blob.points() {
            assert!(p.current.x >= b.left - 0.1 && p.current.x <= b.right + 0.1);
            assert!(p.current.y >= b.top - 0.1 && p.current.y <= b.bottom + 0.1);
        }
    }
}

#[test]
fn test_pixel_drag() {
    let mut s = state();
    let scale = Settings::default().scale_factor;

    let press = TickInput {
        pointer: Some(PointerEvent::Press(from_pixels(Vector2::new(200.0, 200.0), scale))),
        ..Default::default()
    };
    tick(&mut s, &press, SIM_DT);
    assert_eq!(s.population.selected(), Some(BlobId(0)));

    let drag = TickInput {
        pointer: Some(PointerEvent::Move(from_pixels(Vector2::new(320.0, 160.0), scale))),
        ..Default::default()
    };
    tick(&mut s, &drag, SIM_DT);
    run(&mut s, &TickInput::default(), 5);

    let center = s.population.get(BlobId(0)).unwrap().center_position();
    assert!((center - Vector2::new(1.6, 0.8)).length() < 0.05);
}

#[test]
fn test_gravity_off_blob_floats() {
    let mut s = state();
    s.toggle_gravity();
    run(&mut s, &TickInput::default(), 40);
    let center = s.population.get(BlobId(0)).unwrap().center_position();
    assert!((center - Vector2::new(1.0, 1.0)).length() < 1e-9);
}

#[test]
fn test_same_seed_same_session() {
    let session = || {
        let mut s = state();
        s.split();
        s.split();
        s.nudge(Direction::Right, 120.0);
        run(&mut s, &TickInput::default(), 30);
        s.nudge(Direction::Up, 50.0);
        run(&mut s, &TickInput::default(), 30);
        s.join();
        run(&mut s, &TickInput::default(), 30);
        serde_json::to_string(&s.snapshot()).unwrap()
    };
    assert_eq!(session(), session());
}
