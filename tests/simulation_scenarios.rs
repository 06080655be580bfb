mod common;

use common::{nonzero_weights, small_config, visualize_path};
use walkgrid::feedback;
use walkgrid::selector::select_start;
use walkgrid::walk::walk_from;
use walkgrid::{
    AcceptanceFilter, Grid, MemorySink, Path, PathError, Phase, Position, Rejection,
    ScriptedDraws, Simulation, SubmitError, Verdict,
};

/// Grid where the walk from (1,1) upward is forced to stop at (1,0)
fn boxed_in_grid() -> Grid {
    let mut grid = Grid::new(3);
    grid.mark_occupied(Position::new(0, 0));
    grid.mark_occupied(Position::new(2, 0));
    grid
}

#[test]
fn test_forced_two_cell_walk_is_accepted() {
    let mut grid = boxed_in_grid();
    // uniform x, uniform y, then "up" (index 0 of [Up, Down, Left, Right])
    let mut draws = ScriptedDraws::new([1, 1, 0]);
    let start = select_start(&grid, grid.total_weight(), &mut draws);
    assert_eq!(start, Position::new(1, 1));

    let path = walk_from(&mut grid, start, &mut draws);
    assert_eq!(
        path.coords(),
        &[Position::new(1, 1), Position::new(1, 0)],
        "\n{}",
        visualize_path(&grid, &path)
    );

    let mut sim = Simulation::new(small_config(3, 2, 1), ScriptedDraws::default()).unwrap();
    let mut sink = MemorySink::default();
    assert_eq!(sim.submit(path.clone(), &mut sink).unwrap(), Verdict::Accepted);

    assert_eq!(sim.accepted(), &[path.clone()]);
    assert_eq!(sim.accepted_count(), 1);
    assert_eq!(
        nonzero_weights(sim.grid()),
        vec![(Position::new(1, 0), 1), (Position::new(1, 1), 1)]
    );
    assert_eq!(sink.walks, vec![(1, path)]);
}

#[test]
fn test_forced_walk_through_components() {
    let mut grid = boxed_in_grid();
    let mut draws = ScriptedDraws::new([1, 1, 0]);
    let start = select_start(&grid, 0, &mut draws);
    let path = walk_from(&mut grid, start, &mut draws);

    let mut filter = AcceptanceFilter::new(2);
    assert!(filter.evaluate(&path).is_accepted());
    filter.record(path.clone());
    feedback::apply(&mut grid, &path);

    assert_eq!(filter.accepted(), &[path]);
    assert_eq!(grid.weight(Position::new(1, 1)), 1);
    assert_eq!(grid.weight(Position::new(1, 0)), 1);
    assert_eq!(grid.total_weight(), 2);
}

#[test]
fn test_stuck_start_is_rejected_without_side_effects() {
    let mut grid = Grid::new(3);
    for x in 0..3 {
        for y in 0..3 {
            if (x, y) != (1, 1) {
                grid.mark_occupied(Position::new(x, y));
            }
        }
    }
    let path = walk_from(&mut grid, Position::new(1, 1), &mut ScriptedDraws::default());
    assert_eq!(path.len(), 1);

    let mut sim = Simulation::new(small_config(3, 2, 1), ScriptedDraws::default()).unwrap();
    let mut sink = MemorySink::default();
    assert_eq!(
        sim.submit(path, &mut sink).unwrap(),
        Verdict::Rejected(Rejection::TooShort)
    );
    assert_eq!(sim.accepted_count(), 0);
    assert_eq!(sim.grid().total_weight(), 0);
    assert!(sink.walks.is_empty());
}

#[test]
fn test_single_cell_grid_never_fills_quota() {
    let mut config = small_config(1, 2, 1);
    config.walk.max_attempts = 25;
    let mut sim = Simulation::from_config(config).unwrap();
    let mut sink = MemorySink::default();
    let summary = sim.run(&mut sink);

    assert_eq!(summary.accepted, 0);
    assert_eq!(summary.attempts, 25);
    assert_eq!(summary.rejected_short, 25);
    assert!(!summary.quota_reached);
    assert_eq!(sim.grid().total_weight(), 0);
    // weights are still persisted at the end
    assert_eq!(sink.weights.map(|g| g.total_weight()), Some(0));
}

#[test]
fn test_resubmitted_walk_is_a_duplicate() {
    let path = Path::from_cells(vec![
        Position::new(0, 0),
        Position::new(0, 1),
        Position::new(1, 1),
    ]);
    let mut sim = Simulation::new(small_config(3, 3, 5), ScriptedDraws::default()).unwrap();
    let mut sink = MemorySink::default();

    assert_eq!(sim.submit(path.clone(), &mut sink).unwrap(), Verdict::Accepted);
    assert_eq!(
        sim.submit(path, &mut sink).unwrap(),
        Verdict::Rejected(Rejection::Duplicate)
    );
    assert_eq!(sim.accepted_count(), 1);
    assert_eq!(sim.grid().total_weight(), 3);
    assert_eq!(sim.attempts(), 2);
    assert_eq!(sim.summary().rejected_duplicate, 1);
}

#[test]
fn test_scripted_run_replays_exactly() {
    let script: Vec<usize> = (0..500).map(|i| (i * 7 + 3) % 11).collect();
    let run = |script: Vec<usize>| {
        // once the script runs dry every draw is 0, so cap the retries
        let mut config = small_config(5, 4, 3);
        config.walk.max_attempts = 2_000;
        let mut sim = Simulation::new(config, ScriptedDraws::new(script)).unwrap();
        let summary = sim.run(&mut MemorySink::default());
        (summary, sim.accepted().to_vec())
    };
    let (summary_a, walks_a) = run(script.clone());
    let (summary_b, walks_b) = run(script);
    assert_eq!(summary_a, summary_b);
    assert_eq!(walks_a, walks_b);
}

#[test]
fn test_submit_refuses_malformed_walks() {
    let p = Position::new;
    let mut sim = Simulation::new(small_config(3, 2, 1), ScriptedDraws::default()).unwrap();
    let mut sink = MemorySink::default();

    let cases = vec![
        (Path::default(), PathError::Empty),
        (
            Path::from_cells(vec![p(0, 0), p(5, 5), p(0, 0)]),
            PathError::OutOfBounds(p(5, 5)),
        ),
        (
            Path::from_cells(vec![p(0, 0), p(2, 2)]),
            PathError::NotAdjacent { from: p(0, 0), to: p(2, 2) },
        ),
        (
            Path::from_cells(vec![p(0, 0), p(0, 1), p(0, 0)]),
            PathError::Repeated(p(0, 0)),
        ),
    ];
    for (path, expected) in cases {
        assert_eq!(
            sim.submit(path, &mut sink),
            Err(SubmitError::InvalidPath(expected))
        );
    }

    assert_eq!(sim.attempts(), 0);
    assert_eq!(sim.accepted_count(), 0);
    assert_eq!(sim.grid().total_weight(), 0);
    assert!(sink.walks.is_empty());
}

#[test]
fn test_submit_stops_at_quota() {
    let p = Position::new;
    let mut sim = Simulation::new(small_config(3, 2, 1), ScriptedDraws::default()).unwrap();
    let mut sink = MemorySink::default();

    let first = Path::from_cells(vec![p(1, 1), p(1, 0)]);
    assert_eq!(sim.submit(first, &mut sink), Ok(Verdict::Accepted));

    let second = Path::from_cells(vec![p(2, 2), p(2, 1)]);
    assert_eq!(
        sim.submit(second, &mut sink),
        Err(SubmitError::QuotaReached { quota: 1 })
    );
    assert_eq!(sim.accepted_count(), 1);
    assert_eq!(sim.grid().total_weight(), 2);
    assert_eq!(sink.walks.len(), 1);
}

#[test]
fn test_submit_only_between_attempts() {
    let p = Position::new;
    let mut sim = Simulation::new(small_config(3, 2, 2), ScriptedDraws::default()).unwrap();
    let mut sink = MemorySink::default();

    assert_eq!(sim.advance(&mut sink), Phase::ComputeWeight);
    let path = Path::from_cells(vec![p(1, 1), p(1, 0)]);
    assert_eq!(
        sim.submit(path, &mut sink),
        Err(SubmitError::NotBetweenAttempts { phase: Phase::ComputeWeight })
    );
    assert_eq!(sim.phase(), Phase::ComputeWeight);
    assert_eq!(sim.grid().total_weight(), 0);
}

#[test]
fn test_empty_grid_config_is_refused() {
    let config = small_config(0, 2, 1);
    assert!(matches!(
        Simulation::new(config.clone(), ScriptedDraws::default()),
        Err(walkgrid::ConfigError::Invalid { field: "grid.size", .. })
    ));
    assert!(Simulation::from_config(config).is_err());
}
