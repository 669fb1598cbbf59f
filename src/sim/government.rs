//! Institutional rules for forming a government, and the government's
//! stability afterwards.
//!
//! Validity is institutional (seats, cordon sanitaire, cabinet parity);
//! whether AI partners actually want in is decided in `formation`.

use std::collections::BTreeSet;

use crate::config::ElectoralConfig;
use crate::id::PartyId;
use crate::model::{CoalitionProposal, EventKind, GameState, Government, Language};

/// Why a coalition proposal cannot form a government. The first failing
/// rule is reported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GovernmentRejection {
    #[error("a majority requires {required} seats but the coalition holds {actual}")]
    NoMajority { required: u32, actual: u32 },
    #[error("{name} is excluded from government by the cordon sanitaire")]
    ExtremistPartner { party_id: PartyId, name: String },
    #[error("the cabinet must have as many Dutch- as French-speaking ministers ({dutch} Dutch, {french} French)")]
    CabinetImbalance { dutch: u32, french: u32 },
}

/// Seats held by the distinct partners of a proposal. Unknown parties hold none.
pub fn coalition_seats(state: &GameState, partners: &[PartyId]) -> u32 {
    let distinct: BTreeSet<PartyId> = partners.iter().copied().collect();
    distinct
        .iter()
        .filter_map(|&id| state.party(id))
        .map(|p| p.total_seats)
        .sum()
}

/// Check a proposal against the institutional rules, in order:
/// majority, cordon sanitaire, cabinet parity. Pure; calling it twice on
/// the same inputs gives the same answer.
pub fn validate(
    proposal: &CoalitionProposal,
    state: &GameState,
    config: &ElectoralConfig,
) -> Result<(), GovernmentRejection> {
    let required = config.majority();
    let actual = coalition_seats(state, &proposal.partners);
    if actual < required {
        return Err(GovernmentRejection::NoMajority { required, actual });
    }

    if let Some(extremist) = proposal
        .partners
        .iter()
        .filter_map(|&id| state.party(id))
        .find(|p| p.is_extremist)
    {
        return Err(GovernmentRejection::ExtremistPartner {
            party_id: extremist.id,
            name: extremist.name.clone(),
        });
    }

    // The prime minister is not part of the count.
    let dutch = count_language(proposal, Language::Dutch);
    let french = count_language(proposal, Language::French);
    if dutch != french {
        return Err(GovernmentRejection::CabinetImbalance { dutch, french });
    }

    Ok(())
}

fn count_language(proposal: &CoalitionProposal, language: Language) -> u32 {
    proposal
        .ministers
        .iter()
        .filter(|m| m.language == language)
        .count() as u32
}

/// Install a government from an accepted proposal. The caller is expected
/// to have validated it. A sitting government is replaced without ceremony;
/// [`form_government`](super::formation::form_government) is the guarded
/// entry point.
pub fn install_government(
    mut state: GameState,
    proposal: &CoalitionProposal,
    config: &ElectoralConfig,
) -> GameState {
    let names: Vec<String> = proposal
        .partners
        .iter()
        .map(|&id| state.party_name(id))
        .collect();
    state.government = Some(Government {
        partners: proposal.partners.clone(),
        prime_minister: proposal.prime_minister.clone(),
        ministers: proposal.ministers.clone(),
        agreement: proposal.policy_stances.clone(),
        stability: config.baseline_stability.clamp(0.0, 100.0),
        formed_turn: state.turn,
    });
    state.add_event(
        EventKind::GovernmentFormed,
        format!("Government formed by {}", names.join(", ")),
        proposal.partners.clone(),
    );
    tracing::info!(partners = ?proposal.partners, "government installed");
    state
}

/// Move government stability by `delta`, clamped to 0-100. A government
/// that reaches 0 collapses. Without a government this does nothing.
pub fn adjust_stability(mut state: GameState, delta: f64) -> GameState {
    let Some(government) = state.government.as_mut() else {
        return state;
    };
    government.stability = (government.stability + delta).clamp(0.0, 100.0);
    collapse_if_unstable(state)
}

/// Dissolve the government if its stability has hit 0.
pub fn collapse_if_unstable(mut state: GameState) -> GameState {
    let collapsed = state
        .government
        .as_ref()
        .is_some_and(|g| g.stability <= 0.0);
    if collapsed {
        let partners = state
            .government
            .take()
            .map(|g| g.partners)
            .unwrap_or_default();
        state.add_event(
            EventKind::GovernmentCollapsed,
            format!("The government collapsed in turn {}", state.turn),
            partners,
        );
        tracing::info!(turn = state.turn, "government collapsed");
    }
    state
}
