//! Election day: turn the final polling ledger into seats.

use std::collections::BTreeMap;

use super::seats::{allocate, elect_candidates};
use crate::config::ElectoralConfig;
use crate::id::{ConstituencyId, PartyId};
use crate::model::{EventKind, GameState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElectionResult {
    pub by_constituency: BTreeMap<ConstituencyId, BTreeMap<PartyId, u32>>,
    /// National seat totals for every party in the state, including zeroes.
    pub totals: BTreeMap<PartyId, u32>,
}

impl ElectionResult {
    pub fn seats_of(&self, party_id: PartyId) -> u32 {
        self.totals.get(&party_id).copied().unwrap_or(0)
    }

    /// The party that can govern alone, if any.
    pub fn majority_party(&self, config: &ElectoralConfig) -> Option<PartyId> {
        self.totals
            .iter()
            .find(|&(_, &seats)| seats >= config.majority())
            .map(|(&id, _)| id)
    }

    /// Parties by seat count, largest first. Ties keep party ID order.
    pub fn ranking(&self) -> Vec<(PartyId, u32)> {
        let mut ranking: Vec<(PartyId, u32)> = self.totals.iter().map(|(&id, &s)| (id, s)).collect();
        ranking.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranking
    }
}

/// Seats every party would win if the election were held now. Does not
/// touch the state.
pub fn project_seats(state: &GameState, config: &ElectoralConfig) -> ElectionResult {
    let mut result = ElectionResult {
        by_constituency: BTreeMap::new(),
        totals: state.parties.iter().map(|p| (p.id, 0)).collect(),
    };
    for constituency in &state.constituencies {
        let snapshot = state.polling_snapshot(constituency.id);
        let seats = allocate(&snapshot, constituency.seats, config.threshold_pct);
        for (&party_id, &n) in &seats {
            *result.totals.entry(party_id).or_insert(0) += n;
        }
        result.by_constituency.insert(constituency.id, seats);
    }
    result
}

/// Hold the election: write seats and elected candidates into every party,
/// dissolve the sitting government and drop bills still in the pipeline.
pub fn run_election(mut state: GameState, config: &ElectoralConfig) -> (GameState, ElectionResult) {
    let result = project_seats(&state, config);

    if state.chamber_size() != config.total_seats {
        tracing::debug!(
            chamber = state.chamber_size(),
            configured = config.total_seats,
            "constituency apportionment differs from configured chamber size"
        );
    }

    for party in state.parties.iter_mut() {
        party.constituency_seats.clear();
        for (&constituency_id, seats) in &result.by_constituency {
            if let Some(&n) = seats.get(&party.id) {
                party.constituency_seats.insert(constituency_id, n);
                elect_candidates(party, constituency_id, n);
            }
        }
        party.total_seats = party.constituency_seats.values().sum();
    }

    state.government = None;
    state.bills.retain(|b| b.status.is_final());

    let summary = result
        .ranking()
        .iter()
        .filter(|&&(_, seats)| seats > 0)
        .map(|&(id, seats)| format!("{} {seats}", state.party_name(id)))
        .collect::<Vec<_>>()
        .join(", ");
    let winners: Vec<PartyId> = result
        .ranking()
        .iter()
        .filter(|&&(_, seats)| seats > 0)
        .map(|&(id, _)| id)
        .collect();
    state.add_event(
        EventKind::Election,
        format!("Election held in turn {}: {summary}", state.turn),
        winners,
    );
    tracing::info!(turn = state.turn, %summary, "election held");

    (state, result)
}
