//! End-to-end properties of the distributed engine, checked against the
//! sequential reference.

use halolife_core::{Grid, RankEngine, RunSummary};
use halolife_env::LocalWorld;
use halolife_sim::{InitialBoard, LifeWorld, SequentialLife, SimConfig};
use proptest::prelude::*;
use std::sync::Arc;

async fn run_distributed(grid: &Grid, procs: usize, max_generations: u64) -> (Grid, RunSummary) {
    let world = LifeWorld::new(SimConfig::new(grid.size(), max_generations).with_procs(procs)).unwrap();
    let outcome = world
        .run(InitialBoard::Explicit(Arc::new(grid.clone())))
        .await
        .unwrap();
    (outcome.grid, outcome.summary)
}

fn reference(grid: &Grid, generations: u64) -> Grid {
    let mut oracle = SequentialLife::new(grid.clone());
    oracle.advance_by(generations);
    oracle.grid().clone()
}

fn r_pentomino(n: usize) -> Grid {
    let mut grid = Grid::new(n);
    let (r, c) = (n / 2, n / 2);
    for (dr, dc) in [(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)] {
        grid.set(r + dr - 1, c + dc - 1, true);
    }
    grid
}

#[tokio::test]
async fn blinker_scenario_single_process() {
    let start = Grid::from_pattern(
        "
        ....
        .***
        ....
        ....
        ",
    )
    .unwrap();

    let (grid, summary) = run_distributed(&start, 1, 1).await;

    assert_eq!(summary.generations, 1);
    for row in 0..4 {
        for col in 0..4 {
            let expected = col == 2 && row <= 2;
            assert_eq!(grid.is_alive(row, col), expected, "cell ({row},{col})");
        }
    }
}

#[tokio::test]
async fn single_process_matches_reference_every_generation() {
    let start = r_pentomino(16);
    let comm = LocalWorld::new(1).into_communicators().remove(0);
    let mut engine = RankEngine::new(comm, start.size()).unwrap();
    engine.load(&start).unwrap();
    let mut oracle = SequentialLife::new(start);

    for generation in 1..=30 {
        engine.advance().await.unwrap();
        oracle.step();

        let grid = engine.gather().await.unwrap().unwrap();
        assert_eq!(&grid, oracle.grid(), "generation {generation}");
    }
}

#[tokio::test]
async fn final_board_is_independent_of_process_count() {
    let start = r_pentomino(20);
    let (baseline, _) = run_distributed(&start, 1, 25).await;
    assert_eq!(baseline, reference(&start, 25));

    for procs in [2, 3, 5, 7, 20] {
        let (grid, summary) = run_distributed(&start, procs, 25).await;
        assert_eq!(grid, baseline, "procs = {procs}");
        assert_eq!(grid, reference(&start, summary.generations));
    }
}

#[tokio::test]
async fn dead_board_converges_after_one_generation() {
    for procs in 1..=5 {
        let (grid, summary) = run_distributed(&Grid::new(10), procs, 50).await;
        assert_eq!(
            summary,
            RunSummary {
                generations: 1,
                converged: true
            },
            "procs = {procs}"
        );
        assert_eq!(grid.population(), 0);
    }
}

#[tokio::test]
async fn stable_board_stops_before_the_cap() {
    let block = Grid::from_pattern(
        "
        ......
        ......
        ..**..
        ..**..
        ......
        ......
        ",
    )
    .unwrap();

    for procs in [1, 2, 3, 6] {
        let (grid, summary) = run_distributed(&block, procs, 1000).await;
        assert!(summary.converged, "procs = {procs}");
        assert!(summary.generations < 1000);
        assert_eq!(grid, block);
    }
}

fn board_and_world() -> impl Strategy<Value = (Grid, usize, u64)> {
    (3usize..14).prop_flat_map(|n| {
        (
            prop::collection::vec(0u8..2, n * n),
            1usize..=n.min(6),
            0u64..12,
        )
            .prop_map(move |(cells, procs, gens)| (Grid::from_cells(n, cells).unwrap(), procs, gens))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_distributed_matches_reference((grid, procs, gens) in board_and_world()) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let (result, summary) = runtime.block_on(run_distributed(&grid, procs, gens));

        prop_assert!(summary.generations <= gens);
        prop_assert!(summary.converged || summary.generations == gens);
        prop_assert_eq!(result, reference(&grid, summary.generations));
    }
}
