//! Polling ledger: per-constituency vote shares held on each `Party`.
//!
//! Every mutation is zero-sum inside one constituency and ends with a
//! renormalization, so the contesting parties' shares always add up to 100.
//! Constituencies never influence each other.

use crate::id::{ConstituencyId, PartyId};
use crate::model::{GameState, Party};

/// Shift `party_id`'s share in one constituency by `delta` points.
///
/// The opposite change is split evenly over the other contesting parties
/// (floored at 0), then the constituency is renormalized to 100. A party
/// that does not contest the constituency leaves the state untouched.
pub fn apply_delta(
    mut state: GameState,
    constituency_id: ConstituencyId,
    party_id: PartyId,
    delta: f64,
) -> GameState {
    shift_share(&mut state.parties, constituency_id, party_id, delta);
    state
}

/// Apply the same delta independently in every constituency the party contests.
pub fn apply_national_delta(mut state: GameState, party_id: PartyId, delta: f64) -> GameState {
    shift_share_everywhere(&mut state.parties, party_id, delta);
    state
}

/// In-place form of [`apply_national_delta`]. Returns the number of
/// constituencies touched.
pub(crate) fn shift_share_everywhere(parties: &mut [Party], party_id: PartyId, delta: f64) -> usize {
    let constituencies: Vec<ConstituencyId> = parties
        .iter()
        .find(|p| p.id == party_id)
        .map(|p| p.constituency_polling.keys().copied().collect())
        .unwrap_or_default();
    if constituencies.is_empty() {
        tracing::warn!(party_id, "national polling delta for party contesting nowhere ignored");
    }
    constituencies
        .into_iter()
        .filter(|&cid| shift_share(parties, cid, party_id, delta))
        .count()
}

/// In-place form of [`apply_delta`]. Returns `false` when the call was ignored.
pub(crate) fn shift_share(
    parties: &mut [Party],
    constituency_id: ConstituencyId,
    party_id: PartyId,
    delta: f64,
) -> bool {
    if !delta.is_finite() {
        tracing::warn!(constituency_id, party_id, delta, "non-finite polling delta ignored");
        return false;
    }
    let eligible: Vec<usize> = parties
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_eligible_in(constituency_id))
        .map(|(i, _)| i)
        .collect();
    let Some(&target) = eligible.iter().find(|&&i| parties[i].id == party_id) else {
        tracing::warn!(
            constituency_id,
            party_id,
            "polling delta for party not contesting constituency ignored"
        );
        return false;
    };

    if let Some(share) = parties[target].constituency_polling.get_mut(&constituency_id) {
        *share = (*share + delta).max(0.0);
    }

    // Single contester: nobody to take from.
    if eligible.len() > 1 {
        let per_peer = delta / (eligible.len() - 1) as f64;
        for &i in eligible.iter().filter(|&&i| i != target) {
            if let Some(share) = parties[i].constituency_polling.get_mut(&constituency_id) {
                *share = (*share - per_peer).max(0.0);
            }
        }
    }

    renormalize(parties, constituency_id);
    tracing::debug!(constituency_id, party_id, delta, "polling delta applied");
    true
}

/// Rescale the contesting parties' shares in a constituency so they sum to 100.
///
/// If every share is zero the constituency is split evenly.
pub fn renormalize(parties: &mut [Party], constituency_id: ConstituencyId) {
    let total: f64 = parties
        .iter()
        .filter_map(|p| p.polling_in(constituency_id))
        .sum();
    let count = parties
        .iter()
        .filter(|p| p.is_eligible_in(constituency_id))
        .count();
    if count == 0 {
        return;
    }
    for party in parties.iter_mut() {
        if let Some(share) = party.constituency_polling.get_mut(&constituency_id) {
            *share = if total > 0.0 {
                *share / total * 100.0
            } else {
                100.0 / count as f64
            };
        }
    }
}

/// Population-weighted national vote share of a party across all constituencies.
pub fn national_share(state: &GameState, party_id: PartyId) -> f64 {
    let Some(party) = state.party(party_id) else {
        return 0.0;
    };
    let total_population: f64 = state.constituencies.iter().map(|c| c.population as f64).sum();
    if total_population <= 0.0 {
        return 0.0;
    }
    state
        .constituencies
        .iter()
        .map(|c| party.polling_in(c.id).unwrap_or(0.0) * c.population as f64)
        .sum::<f64>()
        / total_population
}
