use std::collections::HashSet;

use broadside::targeting::{AdaptiveTactic, DiagonalTactic};
use broadside::{
    Board, CellState, FleetGenerator, Heatmap, PlacementPolicy, Tactic, TacticKind,
    TargetingConfig, TargetingEngine, TargetingError, FLEET,
};
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = TacticKind> {
    prop::sample::select(TacticKind::ALL.to_vec())
}

fn policy_strategy() -> impl Strategy<Value = PlacementPolicy> {
    prop::sample::select(PlacementPolicy::ALL.to_vec())
}

fn board(policy: PlacementPolicy, seed: u64) -> Board {
    let ships = FleetGenerator::seeded(policy, seed)
        .generate_placement(&FLEET)
        .unwrap();
    Board::new(ships).unwrap()
}

fn config(rubber_band: bool) -> TargetingConfig {
    TargetingConfig {
        rubber_band,
        ..TargetingConfig::default()
    }
}

/// Play a whole match and check, on every turn the heatmap decides, that
/// the chosen cell carries the highest weight among untried cells.
fn heatmap_turns_pick_a_maximum<T, F>(
    mut engine: TargetingEngine<T>,
    mut defender: Board,
    heatmap_decides: F,
) -> Result<(), TestCaseError>
where
    T: Tactic,
    F: Fn(&TargetingEngine<T>) -> bool,
{
    while !defender.all_sunk() {
        let decides = !engine.is_hunting() && heatmap_decides(&engine);
        let heat = Heatmap::compute(engine.belief());
        let best = heat.max_over(&!*engine.state().tried()).unwrap_or(0);
        let shot = engine.next_shot().unwrap();
        if decides && best > 0 {
            prop_assert_eq!(heat.weight(shot), best, "{:?} is not a heatmap maximum", shot);
        }
        let outcome = defender.guess(shot).unwrap();
        engine.shot_result(outcome.is_hit(), outcome.is_sunk()).unwrap();
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn every_cell_is_fired_at_once(
        seed in any::<u64>(),
        kind in kind_strategy(),
        policy in policy_strategy(),
        rubber_band in any::<bool>(),
    ) {
        let mut defender = board(policy, seed);
        let mut engine = TargetingEngine::with_kind(kind, config(rubber_band), seed);
        let mut seen = HashSet::new();

        // Keep firing past the last sink so the whole grid gets covered.
        for _ in 0..100 {
            let shot = engine.next_shot_with(&mut defender).unwrap();
            prop_assert!(seen.insert(shot), "{:?} fired twice", shot);
            let outcome = defender.guess(shot).unwrap();
            engine.shot_result(outcome.is_hit(), outcome.is_sunk()).unwrap();

            for &(r, c) in engine.hunt().queue() {
                prop_assert!(r < 10 && c < 10);
                prop_assert!(!engine.state().is_tried((r, c)));
                prop_assert_eq!(engine.belief().cell((r, c)), CellState::Unknown);
            }
            if outcome.is_sunk() {
                prop_assert!(!engine.is_hunting());
                prop_assert!(engine.hunt().hits().is_empty());
            }
        }

        prop_assert!(defender.all_sunk());
        prop_assert_eq!(engine.belief().count(CellState::Unknown), 0);
        prop_assert_eq!(engine.belief().count(CellState::Hit), 0);
        prop_assert_eq!(engine.belief().count(CellState::Sunk), broadside::TOTAL_SHIP_CELLS);
        prop_assert_eq!(engine.belief().ships_remaining(), 0);
        prop_assert_eq!(engine.next_shot(), Err(TargetingError::BoardExhausted));
    }

    #[test]
    fn same_seed_same_shots(seed in any::<u64>(), kind in kind_strategy()) {
        let play = || {
            let mut defender = board(PlacementPolicy::Random, seed);
            let mut engine = TargetingEngine::with_kind(kind, TargetingConfig::default(), seed);
            let mut shots = Vec::new();
            while !defender.all_sunk() {
                let shot = engine.next_shot().unwrap();
                let outcome = defender.guess(shot).unwrap();
                engine.shot_result(outcome.is_hit(), outcome.is_sunk()).unwrap();
                shots.push(shot);
            }
            shots
        };
        prop_assert_eq!(play(), play());
    }

    #[test]
    fn known_empty_cells_are_never_fired_early(seed in any::<u64>(), kind in kind_strategy()) {
        let mut defender = board(PlacementPolicy::Coastal, seed);
        let mut engine = TargetingEngine::with_kind(kind, TargetingConfig::default(), seed);
        while !defender.all_sunk() {
            let open = engine.state().open_cells();
            let shot = engine.next_shot().unwrap();
            if !open.is_empty() {
                prop_assert!(open.contains(shot.0, shot.1), "{:?} was already known", shot);
            }
            let outcome = defender.guess(shot).unwrap();
            engine.shot_result(outcome.is_hit(), outcome.is_sunk()).unwrap();
        }
    }

    #[test]
    fn diagonal_heatmap_mode_picks_maximum(seed in any::<u64>(), policy in policy_strategy()) {
        let engine = TargetingEngine::seeded(DiagonalTactic::new(TargetingConfig::default()), seed);
        heatmap_turns_pick_a_maximum(engine, board(policy, seed), |e| e.tactic().in_heatmap_mode())?;
    }

    #[test]
    fn plain_adaptive_picks_maximum(seed in any::<u64>(), policy in policy_strategy()) {
        let config = TargetingConfig {
            pattern_inference: false,
            border_bonus: 0,
            ..TargetingConfig::default()
        };
        let engine = TargetingEngine::seeded(AdaptiveTactic::new(config), seed);
        heatmap_turns_pick_a_maximum(engine, board(policy, seed), |_| true)?;
    }
}
