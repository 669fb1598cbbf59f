//! Shared helpers for unit and integration tests.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::ElectoralConfig;
use crate::model::*;
use crate::scenario::Scenario;
use crate::sim::election::run_election;
use crate::sim::turn::run_campaign_turn;

// ---------------------------------------------------------------------------
// Game drivers
// ---------------------------------------------------------------------------

/// Demo state after `turns` AI-only campaign turns with a seeded RNG.
pub fn campaigned_demo(turns: u32, seed: u64) -> GameState {
    let config = ElectoralConfig::default();
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut state = Scenario::belgian_demo().build();
    for _ in 0..turns {
        state = run_campaign_turn(state, None, &config, &mut rng).0;
    }
    state
}

/// Demo state straight after an election on the untouched ledger.
pub fn elected_demo() -> GameState {
    run_election(Scenario::belgian_demo().build(), &ElectoralConfig::default()).0
}

// ---------------------------------------------------------------------------
// Assertions
// ---------------------------------------------------------------------------

/// Panic unless every constituency's contesting shares sum to 100 and none
/// is negative.
pub fn assert_ledger_balanced(state: &GameState) {
    for c in &state.constituencies {
        let snapshot = state.polling_snapshot(c.id);
        if snapshot.is_empty() {
            continue;
        }
        let total: f64 = snapshot.iter().map(|(_, s)| s).sum();
        assert!(
            (total - 100.0).abs() < POLLING_TOLERANCE,
            "{} sums to {total}",
            c.name
        );
        for (party, share) in snapshot {
            assert!(share >= 0.0, "party {party} negative in {}: {share}", c.name);
        }
    }
}

/// Kinds in the log, oldest first.
pub fn log_kinds(state: &GameState) -> Vec<EventKind> {
    state.log.iter().map(|e| e.kind.clone()).collect()
}
