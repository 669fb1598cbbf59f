//! Campaign choices for parties the player does not control.

use super::campaign::profile;
use crate::config::ElectoralConfig;
use crate::id::{ConstituencyId, PartyId};
use crate::model::{CampaignAction, GameState, Medium, Party};

/// Pick this turn's action for an AI party: the most expensive medium it can
/// afford at standard price, aimed where its share sits closest to the
/// threshold. Deterministic. `None` for the player party, unknown parties
/// and parties that contest nowhere.
pub fn choose_action(state: &GameState, party_id: PartyId, config: &ElectoralConfig) -> Option<CampaignAction> {
    let party = state.party(party_id)?;
    if party.is_player {
        return None;
    }
    let constituency_id = battleground(party, config.threshold_pct)?;
    let medium = most_expensive_affordable(party.campaign_funds)?;
    Some(CampaignAction {
        actor: party.id,
        medium,
        cost: profile(medium).standard_cost,
        constituency_id,
        target_demographic: None,
    })
}

/// Contested constituency with the smallest distance between the party's
/// share and the threshold. Lowest id wins ties.
pub fn battleground(party: &Party, threshold_pct: f64) -> Option<ConstituencyId> {
    let mut best: Option<(ConstituencyId, f64)> = None;
    for (&id, &share) in &party.constituency_polling {
        let gap = (share - threshold_pct).abs();
        if best.is_none_or(|(_, best_gap)| gap < best_gap) {
            best = Some((id, gap));
        }
    }
    best.map(|(id, _)| id)
}

fn most_expensive_affordable(funds: f64) -> Option<Medium> {
    let mut best: Option<(Medium, f64)> = None;
    for &medium in Medium::ALL {
        let cost = profile(medium).standard_cost;
        if cost > funds {
            continue;
        }
        if best.is_none_or(|(_, best_cost)| cost > best_cost) {
            best = Some((medium, cost));
        }
    }
    best.map(|(medium, _)| medium)
}
