//! Random campaign events: scandals, endorsements and the like, rolled once
//! per campaign turn.

use rand::{Rng, RngCore};

use super::polling::shift_share_everywhere;
use crate::id::PartyId;
use crate::model::{EventKind, GameState};

/// Chance that anything happens in a given turn.
pub const TRIGGER_CHANCE: f64 = 0.35;

/// Entry in the campaign event table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CampaignEventDef {
    pub name: &'static str,
    pub weight: u32,
    /// National polling delta for the party hit by the event.
    pub delta: f64,
    /// `{party}` is replaced by the party name.
    pub template: &'static str,
}

pub const CAMPAIGN_EVENTS: &[CampaignEventDef] = &[
    CampaignEventDef {
        name: "scandal",
        weight: 2,
        delta: -3.0,
        template: "A funding scandal engulfs {party}",
    },
    CampaignEventDef {
        name: "endorsement",
        weight: 3,
        delta: 2.0,
        template: "A popular union leader endorses {party}",
    },
    CampaignEventDef {
        name: "economic_news",
        weight: 3,
        delta: -1.5,
        template: "Grim economic figures are pinned on {party}",
    },
    CampaignEventDef {
        name: "viral_moment",
        weight: 2,
        delta: 2.5,
        template: "A clip of {party}'s candidate goes viral",
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct RolledEvent {
    pub name: &'static str,
    pub party_id: PartyId,
    pub delta: f64,
    pub event_id: u64,
}

/// Weighted pick from [`CAMPAIGN_EVENTS`].
pub fn select_event(rng: &mut dyn RngCore) -> &'static CampaignEventDef {
    let total: u32 = CAMPAIGN_EVENTS.iter().map(|e| e.weight).sum();
    let roll = rng.random_range(0..total);
    let mut cumulative = 0;
    for def in CAMPAIGN_EVENTS {
        cumulative += def.weight;
        if roll < cumulative {
            return def;
        }
    }
    &CAMPAIGN_EVENTS[0]
}

/// Maybe fire a campaign event against one contesting party. The event's
/// delta goes through the polling ledger in every constituency the party
/// contests.
pub fn roll_campaign_event(mut state: GameState, rng: &mut dyn RngCore) -> (GameState, Option<RolledEvent>) {
    if rng.random::<f64>() >= TRIGGER_CHANCE {
        return (state, None);
    }
    let contesting: Vec<PartyId> = state
        .parties
        .iter()
        .filter(|p| !p.constituency_polling.is_empty())
        .map(|p| p.id)
        .collect();
    if contesting.is_empty() {
        return (state, None);
    }
    let party_id = contesting[rng.random_range(0..contesting.len())];
    let def = select_event(rng);

    shift_share_everywhere(&mut state.parties, party_id, def.delta);
    let description = def.template.replace("{party}", &state.party_name(party_id));
    let event_id = state.add_event(EventKind::CampaignEvent, description, vec![party_id]);
    tracing::debug!(event = def.name, party_id, delta = def.delta, "campaign event fired");

    let rolled = RolledEvent {
        name: def.name,
        party_id,
        delta: def.delta,
        event_id,
    };
    (state, Some(rolled))
}
