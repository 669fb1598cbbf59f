//! Coalition formation: find workable coalitions, draft a common platform
//! and turn an accepted proposal into a government.

use std::collections::{BTreeMap, BTreeSet};

use super::friction::{accepts_offer, coalition_friction, effective_friction};
use super::government::{GovernmentRejection, coalition_seats, install_government, validate};
use crate::config::ElectoralConfig;
use crate::id::PartyId;
use crate::model::{CoalitionProposal, GameState, Party, Stance};

/// Parties considered when enumerating coalitions. Larger chambers keep
/// only the biggest parties.
const MAX_ENUMERATED_PARTIES: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub enum FormationOutcome {
    Formed,
    /// A government is still in office. Only an election or a collapse
    /// clears the way for the next one.
    AlreadyGoverned { partners: Vec<PartyId> },
    Invalid(GovernmentRejection),
    /// An AI partner found the offer too far from its own positions.
    Declined {
        party_id: PartyId,
        friction: f64,
        threshold: f64,
    },
}

/// A coalition that reaches the majority and would lose it without any
/// single one of its partners.
#[derive(Debug, Clone, PartialEq)]
pub struct CoalitionOption {
    pub partners: Vec<PartyId>,
    pub seats: u32,
    pub friction: f64,
}

/// Minimal winning coalitions among seated, non-extremist parties, least
/// friction first, then fewest seats.
pub fn minimal_winning_coalitions(state: &GameState, config: &ElectoralConfig) -> Vec<CoalitionOption> {
    let mut pool: Vec<&Party> = state
        .parties
        .iter()
        .filter(|p| p.total_seats > 0 && !p.is_extremist)
        .collect();
    pool.sort_by(|a, b| b.total_seats.cmp(&a.total_seats).then(a.id.cmp(&b.id)));
    pool.truncate(MAX_ENUMERATED_PARTIES);

    let majority = config.majority();
    let mut options = Vec::new();
    for mask in 1u32..(1 << pool.len()) {
        let members: Vec<&Party> = pool
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, p)| *p)
            .collect();
        let seats: u32 = members.iter().map(|p| p.total_seats).sum();
        if seats < majority {
            continue;
        }
        if members.iter().any(|p| seats - p.total_seats >= majority) {
            continue;
        }
        let mut partners: Vec<PartyId> = members.iter().map(|p| p.id).collect();
        partners.sort_unstable();
        options.push(CoalitionOption {
            friction: coalition_friction(state, &partners),
            partners,
            seats,
        });
    }

    options.sort_by(|a, b| {
        a.friction
            .total_cmp(&b.friction)
            .then(a.seats.cmp(&b.seats))
            .then(a.partners.cmp(&b.partners))
    });
    options
}

/// Draft a common platform: for every issue any partner has a stance on,
/// the seat-weighted mean position and mean salience of the partners that
/// care about it. Issues come out in alphabetical order.
pub fn draft_platform(state: &GameState, partners: &[PartyId]) -> Vec<Stance> {
    let distinct: BTreeSet<PartyId> = partners.iter().copied().collect();
    let parties: Vec<&Party> = distinct.iter().filter_map(|&id| state.party(id)).collect();

    // issue -> (weighted position sum, weight sum, salience sum, count)
    let mut acc: BTreeMap<&str, (f64, f64, f64, u32)> = BTreeMap::new();
    for party in &parties {
        let weight = f64::from(party.total_seats.max(1));
        for stance in &party.stances {
            let entry = acc.entry(stance.issue_id.as_str()).or_insert((0.0, 0.0, 0.0, 0));
            entry.0 += stance.position * weight;
            entry.1 += weight;
            entry.2 += stance.salience;
            entry.3 += 1;
        }
    }

    acc.into_iter()
        .map(|(issue, (position_sum, weight_sum, salience_sum, count))| {
            Stance::new(issue, position_sum / weight_sum, salience_sum / f64::from(count))
        })
        .collect()
}

/// Validate the proposal, collect acceptance from every AI partner and,
/// if all agree, install the government. The state is unchanged unless
/// the outcome is `Formed`.
///
/// Refused while a government is in office: one government per election
/// cycle, or until the sitting one collapses.
pub fn form_government(
    state: GameState,
    proposal: &CoalitionProposal,
    config: &ElectoralConfig,
) -> (GameState, FormationOutcome) {
    if let Some(sitting) = &state.government {
        tracing::warn!(partners = ?sitting.partners, "formation attempted with a government in office");
        let outcome = FormationOutcome::AlreadyGoverned {
            partners: sitting.partners.clone(),
        };
        return (state, outcome);
    }
    if let Err(rejection) = validate(proposal, &state, config) {
        tracing::debug!(%rejection, "coalition proposal invalid");
        return (state, FormationOutcome::Invalid(rejection));
    }

    let distinct: BTreeSet<PartyId> = proposal.partners.iter().copied().collect();
    for party in distinct
        .iter()
        .filter_map(|&id| state.party(id))
        .filter(|p| !p.is_player)
    {
        if !accepts_offer(party, proposal, config) {
            let friction = effective_friction(party, proposal, config);
            tracing::debug!(party_id = party.id, friction, "coalition offer declined");
            let outcome = FormationOutcome::Declined {
                party_id: party.id,
                friction,
                threshold: party.negotiation_threshold,
            };
            return (state, outcome);
        }
    }

    tracing::debug!(
        seats = coalition_seats(&state, &proposal.partners),
        "coalition proposal accepted"
    );
    let state = install_government(state, proposal, config);
    (state, FormationOutcome::Formed)
}
