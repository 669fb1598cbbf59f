//! Ideological friction between parties and between a party and a platform.
//!
//! Friction is a salience-weighted mean of position gaps on the issues both
//! sides have a stance on, on a 0-100 scale. No shared issues means 0
//! (indifference, not conflict).

use crate::config::ElectoralConfig;
use crate::id::PartyId;
use crate::model::{CoalitionProposal, GameState, Party, Stance};

/// Friction between two parties. Each shared issue is weighted by the mean
/// of both saliences. Symmetric.
pub fn friction_between(a: &Party, b: &Party) -> f64 {
    stance_friction(&a.stances, &b.stances)
}

/// Pairwise friction over two stance sets. Symmetric.
pub fn stance_friction(a: &[Stance], b: &[Stance]) -> f64 {
    // Summed in issue order so swapping the operands gives bit-identical results.
    let mut shared: Vec<(&Stance, &Stance)> = a
        .iter()
        .filter_map(|stance| find_stance(b, &stance.issue_id).map(|other| (stance, other)))
        .collect();
    shared.sort_by(|x, y| x.0.issue_id.cmp(&y.0.issue_id));

    let mut weighted = 0.0;
    let mut weights = 0.0;
    for (stance, other) in shared {
        let weight = (stance.salience + other.salience) / 2.0;
        weighted += (stance.position - other.position).abs() * weight;
        weights += weight;
    }
    if weights <= 0.0 {
        return 0.0;
    }
    weighted / weights
}

/// Friction a party feels toward a proposed platform, weighted by the
/// party's own salience only.
pub fn friction_of(party: &Party, proposal: &[Stance]) -> f64 {
    let mut weighted = 0.0;
    let mut total_salience = 0.0;
    for stance in &party.stances {
        let Some(offered) = find_stance(proposal, &stance.issue_id) else {
            continue;
        };
        weighted += (stance.position - offered.position).abs() * stance.salience;
        total_salience += stance.salience;
    }
    if total_salience <= 0.0 {
        return 0.0;
    }
    weighted / (total_salience * 100.0) * 100.0
}

/// Friction of a whole coalition: the worst pair. Unknown partners are
/// skipped; fewer than two known partners means no friction.
pub fn coalition_friction(state: &GameState, partners: &[PartyId]) -> f64 {
    let parties: Vec<&Party> = partners.iter().filter_map(|&id| state.party(id)).collect();
    let mut worst: f64 = 0.0;
    for (i, a) in parties.iter().enumerate() {
        for b in &parties[i + 1..] {
            worst = worst.max(friction_between(a, b));
        }
    }
    worst
}

/// Raw friction minus the ministry sweetener, floored at 0.
pub fn sweetened(raw: f64, ministries: u32, per_ministry: f64) -> f64 {
    (raw - f64::from(ministries) * per_ministry).max(0.0)
}

/// Friction `party` feels toward `proposal` after its ministry offer.
pub fn effective_friction(party: &Party, proposal: &CoalitionProposal, config: &ElectoralConfig) -> f64 {
    sweetened(
        friction_of(party, &proposal.policy_stances),
        proposal.ministries_for(party.id),
        config.sweetener_per_ministry,
    )
}

/// Whether an AI-controlled party signs up to the proposal.
pub fn accepts_offer(party: &Party, proposal: &CoalitionProposal, config: &ElectoralConfig) -> bool {
    effective_friction(party, proposal, config) < party.negotiation_threshold
}

fn find_stance<'a>(stances: &'a [Stance], issue_id: &str) -> Option<&'a Stance> {
    stances.iter().find(|s| s.issue_id == issue_id)
}
