use std::collections::HashSet;

use broadside::grid::{self, Coord};
use broadside::targeting::{diagonal_order, Bias, DiagonalTactic, RandomTactic};
use broadside::{
    BeliefGrid, CellState, Heatmap, Strategy, TacticKind, TargetingConfig, TargetingEngine, TargetingError,
};

fn engine(kind: TacticKind) -> TargetingEngine {
    TargetingEngine::with_kind(kind, TargetingConfig::default(), 42)
}

fn queue_of(engine: &TargetingEngine) -> HashSet<Coord> {
    engine.hunt().queue().iter().copied().collect()
}

#[test]
fn test_single_hit_queues_four_neighbours() {
    let mut e = engine(TacticKind::Random);
    e.observe((3, 3), true, false).unwrap();
    assert!(e.is_hunting());
    let expected: HashSet<Coord> = [(2, 3), (4, 3), (3, 2), (3, 4)].into_iter().collect();
    assert_eq!(queue_of(&e), expected);
    assert_eq!(e.hunt().hits(), &[(3, 3)]);
}

#[test]
fn test_colinear_hits_extend_the_line() {
    let mut e = engine(TacticKind::Adaptive);
    e.observe((3, 3), true, false).unwrap();
    e.observe((3, 4), true, false).unwrap();
    let expected: HashSet<Coord> = [(3, 2), (3, 5)].into_iter().collect();
    assert_eq!(queue_of(&e), expected);
    assert_eq!(e.hunt().queue().len(), 2);
}

#[test]
fn test_vertical_line_skips_tried_end() {
    let mut e = engine(TacticKind::Random);
    e.observe((0, 6), false, false).unwrap();
    e.observe((1, 6), true, false).unwrap();
    e.observe((2, 6), true, false).unwrap();
    assert_eq!(e.hunt().queue().iter().copied().collect::<Vec<_>>(), vec![(3, 6)]);
}

#[test]
fn test_scattered_hits_probe_latest() {
    let mut e = engine(TacticKind::Random);
    e.observe((2, 2), true, false).unwrap();
    e.observe((6, 7), true, false).unwrap();
    let expected: HashSet<Coord> = grid::neighbors4((6, 7)).collect();
    assert_eq!(queue_of(&e), expected);
}

#[test]
fn test_hunt_shots_come_from_queue() {
    for kind in TacticKind::ALL {
        let mut e = engine(kind);
        e.observe((5, 5), true, false).unwrap();
        let shot = e.next_shot().unwrap();
        assert!(
            grid::neighbors4((5, 5)).any(|c| c == shot),
            "{:?} left the hunt for {:?}",
            kind,
            shot
        );
    }
}

#[test]
fn test_sunk_single_cell_floods_buffer() {
    let mut e = engine(TacticKind::Adaptive);
    e.observe((0, 5), true, true).unwrap();

    let belief = e.belief();
    assert_eq!(belief.cell((0, 5)), CellState::Sunk);
    for cell in [(0, 4), (0, 6), (1, 4), (1, 5), (1, 6)] {
        assert_eq!(belief.cell(cell), CellState::Miss, "{:?}", cell);
    }
    assert_eq!(belief.count(CellState::Miss), 5);
    assert_eq!(belief.remaining().iter().filter(|&&l| l == 1).count(), 3);
    assert_eq!(belief.ships_remaining(), 9);
    assert!(!e.is_hunting());
}

#[test]
fn test_sunk_chain_is_rebuilt_from_hits() {
    let mut e = engine(TacticKind::Random);
    e.observe((2, 2), true, false).unwrap();
    e.observe((4, 2), true, false).unwrap();
    e.observe((3, 2), true, true).unwrap();

    let belief = e.belief();
    for r in 2..=4 {
        assert_eq!(belief.cell((r, 2)), CellState::Sunk);
    }
    // 5x3 box minus the hull
    assert_eq!(belief.count(CellState::Miss), 12);
    assert_eq!(belief.remaining().iter().filter(|&&l| l == 3).count(), 1);
    assert_eq!(belief.sunk().len(), 1);
    assert_eq!(belief.sunk()[0].length, 3);
    assert!(e.hunt().queue().is_empty());
    assert!(e.hunt().hits().is_empty());
}

#[test]
fn test_hunt_ends_when_queue_runs_dry() {
    let mut e = engine(TacticKind::Random);
    e.observe((0, 0), true, false).unwrap();
    e.observe((1, 0), false, false).unwrap();
    e.observe((0, 1), false, false).unwrap();
    assert!(!e.is_hunting());

    e.next_shot().unwrap();
    assert!(e.hunt().hits().is_empty());
}

#[test]
fn test_edge_bias_after_border_kills() {
    let mut e = engine(TacticKind::Adaptive);
    e.observe((0, 0), true, true).unwrap();
    e.observe((9, 9), true, true).unwrap();

    match e.tactic() {
        Strategy::Adaptive(t) => assert_eq!(t.bias(), Bias::Edge),
        other => panic!("unexpected tactic {:?}", other),
    }
    let shot = e.next_shot().unwrap();
    assert!(grid::is_border(shot), "{:?} is not on the border", shot);
}

#[test]
fn test_edge_bias_wears_off_after_misses() {
    let config = TargetingConfig::default();
    let mut e = engine(TacticKind::Adaptive);
    e.observe((0, 0), true, true).unwrap();
    e.observe((9, 9), true, true).unwrap();
    for _ in 0..config.edge_miss_limit {
        e.next_shot().unwrap();
        e.shot_result(false, false).unwrap();
    }
    match e.tactic() {
        Strategy::Adaptive(t) => assert_eq!(t.bias(), Bias::None),
        other => panic!("unexpected tactic {:?}", other),
    }
}

#[test]
fn test_half_bias_wears_off_after_misses() {
    let config = TargetingConfig::default();
    let mut e = engine(TacticKind::Adaptive);
    e.observe((3, 2), true, true).unwrap();
    e.observe((6, 1), true, false).unwrap();
    e.observe((6, 2), true, true).unwrap();

    for _ in 1..config.half_miss_limit {
        let shot = e.next_shot().unwrap();
        assert!(shot.1 < 5, "{:?} is not in the left half", shot);
        e.shot_result(false, false).unwrap();
    }
    match e.tactic() {
        Strategy::Adaptive(t) => assert_eq!(t.bias(), Bias::Half(grid::Side::Left)),
        other => panic!("unexpected tactic {:?}", other),
    }

    e.next_shot().unwrap();
    e.shot_result(false, false).unwrap();
    match e.tactic() {
        Strategy::Adaptive(t) => assert_eq!(t.bias(), Bias::None),
        other => panic!("unexpected tactic {:?}", other),
    }
}

#[test]
fn test_border_bonus_after_dry_spell() {
    let config = TargetingConfig {
        pattern_inference: false,
        border_bonus: 1000,
        ..TargetingConfig::default()
    };
    let mut e = TargetingEngine::with_kind(TacticKind::Adaptive, config, 12);
    let inland = [(4, 4), (4, 5), (5, 4), (5, 5), (3, 3), (6, 6), (2, 7)];
    assert!(inland.len() > config.border_bonus_streak);
    for cell in inland {
        e.observe(cell, false, false).unwrap();
    }
    assert_eq!(e.state().miss_streak(), inland.len());

    let shot = e.next_shot().unwrap();
    assert!(grid::is_border(shot), "{:?} is not on the border", shot);
}

#[test]
fn test_half_bias_after_one_sided_kills() {
    let mut e = engine(TacticKind::Adaptive);
    e.observe((3, 2), true, true).unwrap();
    e.observe((6, 1), true, false).unwrap();
    e.observe((6, 2), true, true).unwrap();
    match e.tactic() {
        Strategy::Adaptive(t) => assert_eq!(t.bias(), Bias::Half(grid::Side::Left)),
        other => panic!("unexpected tactic {:?}", other),
    }
    let shot = e.next_shot().unwrap();
    assert!(shot.1 < 5, "{:?} is not in the left half", shot);
}

#[test]
fn test_pattern_inference_can_be_disabled() {
    let config = TargetingConfig {
        pattern_inference: false,
        ..TargetingConfig::default()
    };
    let mut e = TargetingEngine::with_kind(TacticKind::Adaptive, config, 3);
    e.observe((0, 0), true, true).unwrap();
    e.observe((9, 9), true, true).unwrap();
    match e.tactic() {
        Strategy::Adaptive(t) => assert_eq!(t.bias(), Bias::None),
        other => panic!("unexpected tactic {:?}", other),
    }
}

#[test]
fn test_heatmap_choice_is_a_maximum() {
    let config = TargetingConfig {
        pattern_inference: false,
        ..TargetingConfig::default()
    };
    let mut e = TargetingEngine::with_kind(TacticKind::Adaptive, config, 8);
    for cell in [(4, 4), (5, 5), (0, 3), (7, 1)] {
        e.observe(cell, false, false).unwrap();
    }
    let heat = Heatmap::compute(e.belief());
    let untried = !*e.state().tried();
    let best = heat.max_over(&untried).unwrap();
    let shot = e.next_shot().unwrap();
    assert_eq!(heat.weight(shot), best);
}

#[test]
fn test_rubber_band_uses_live_cells() {
    let config = TargetingConfig {
        rubber_band: true,
        ..TargetingConfig::default()
    };
    let mut e = TargetingEngine::with_kind(TacticKind::Adaptive, config, 5);
    for c in 0..10 {
        e.observe((0, c), false, false).unwrap();
    }
    let mut provider = || -> Vec<Coord> { vec![(0, 3), (7, 7)] };
    assert_eq!(e.next_shot_with(&mut provider).unwrap(), (7, 7));
}

#[test]
fn test_rubber_band_without_provider_falls_back() {
    let config = TargetingConfig {
        rubber_band: true,
        ..TargetingConfig::default()
    };
    let mut e = TargetingEngine::with_kind(TacticKind::Adaptive, config, 5);
    for c in 0..10 {
        e.observe((0, c), false, false).unwrap();
    }
    let shot = e.next_shot().unwrap();
    assert!(!e.state().is_tried(shot));
}

#[test]
fn test_diagonal_sweep_then_heatmap() {
    let mut e = TargetingEngine::seeded(DiagonalTactic::new(TargetingConfig::default()), 1);
    let order = diagonal_order();
    assert_eq!(order[0], (4, 4));
    assert_eq!(order.len(), 20);

    // Patience is twice the longest ship afloat.
    for expected in &order[..8] {
        assert_eq!(e.next_shot().unwrap(), *expected);
        e.shot_result(false, false).unwrap();
    }
    assert!(!e.tactic().in_heatmap_mode());
    e.next_shot().unwrap();
    assert!(e.tactic().in_heatmap_mode());
}

#[test]
fn test_diagonal_patience_shrinks_with_fleet() {
    let mut e = TargetingEngine::seeded(DiagonalTactic::new(TargetingConfig::default()), 1);
    e.observe((9, 0), true, false).unwrap();
    e.observe((8, 0), true, false).unwrap();
    e.observe((7, 0), true, false).unwrap();
    e.observe((6, 0), true, true).unwrap();
    assert_eq!(e.belief().max_remaining(), 3);

    for _ in 0..6 {
        e.next_shot().unwrap();
        e.shot_result(false, false).unwrap();
    }
    e.next_shot().unwrap();
    assert!(e.tactic().in_heatmap_mode());
}

#[test]
fn test_random_skips_buffer_until_nothing_else() {
    let mut e = TargetingEngine::seeded(RandomTactic::new(), 17);
    e.observe((5, 5), true, true).unwrap();
    let buffer: HashSet<Coord> = grid::neighbors8((5, 5)).collect();

    for _ in 0..91 {
        let shot = e.next_shot().unwrap();
        assert!(!buffer.contains(&shot), "{:?} is a known-empty cell", shot);
        e.shot_result(false, false).unwrap();
    }
    let shot = e.next_shot().unwrap();
    assert!(buffer.contains(&shot));
}

#[test]
fn test_exhaustion_is_an_error() {
    let mut e = engine(TacticKind::Random);
    let mut seen = HashSet::new();
    for _ in 0..100 {
        let shot = e.next_shot().unwrap();
        assert!(seen.insert(shot), "{:?} fired twice", shot);
        e.shot_result(false, false).unwrap();
    }
    assert_eq!(e.belief().count(CellState::Unknown), 0);
    assert_eq!(e.next_shot(), Err(TargetingError::BoardExhausted));
}

#[test]
fn test_result_needs_a_pending_shot() {
    let mut e = engine(TacticKind::Diagonal);
    assert_eq!(e.shot_result(true, false), Err(TargetingError::NoPendingShot));

    let first = e.next_shot().unwrap();
    assert_eq!(e.next_shot().unwrap(), first);
    e.shot_result(false, false).unwrap();
    assert_eq!(e.shot_result(false, false), Err(TargetingError::NoPendingShot));
    assert_eq!(e.observe(first, false, false), Err(TargetingError::AlreadyTried(first)));
    assert_eq!(
        e.observe((10, 2), false, false),
        Err(TargetingError::OutOfBounds((10, 2)))
    );
}

#[test]
fn test_sunk_without_hit_is_a_miss() {
    let mut e = engine(TacticKind::Random);
    e.observe((4, 4), false, true).unwrap();
    assert_eq!(e.belief().cell((4, 4)), CellState::Miss);
    assert_eq!(e.belief().ships_remaining(), 10);
}

#[test]
fn test_observed_wreck_withdraws_pending_shot() {
    let mut e = TargetingEngine::seeded(DiagonalTactic::new(TargetingConfig::default()), 2);
    assert_eq!(e.next_shot().unwrap(), (4, 4));

    // Unrelated outcomes keep the proposal.
    e.observe((0, 0), false, false).unwrap();
    assert_eq!(e.pending(), Some((4, 4)));

    // A wreck next door proves it empty.
    e.observe((4, 5), true, true).unwrap();
    assert_eq!(e.belief().cell((4, 4)), CellState::Miss);
    assert_eq!(e.pending(), None);

    let shot = e.next_shot().unwrap();
    assert_ne!(shot, (4, 4));
    assert_eq!(e.belief().cell(shot), CellState::Unknown);
    e.shot_result(false, false).unwrap();
}

#[test]
fn test_heatmap_off_board_weighs_nothing() {
    let heat = Heatmap::compute(&BeliefGrid::new());
    assert_eq!(heat.weight((10, 0)), 0);
    assert_eq!(heat[(0, 10)], 0);
    assert!(heat.weight((4, 4)) > heat.weight((0, 0)));
}
