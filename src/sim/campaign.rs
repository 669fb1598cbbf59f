//! Campaign actions: what a rally, an ad or a debate does to a party's
//! standing, and how that lands in the polling ledger.
//!
//! An action runs as validate -> compute effect -> apply -> record. Only
//! rallies and debates roll dice, once per action.

use rand::{Rng, RngCore};

use super::polling::{shift_share, shift_share_everywhere};
use crate::model::{
    ActionResult, CampaignAction, CampaignStats, Candidate, Constituency, EventKind, GameState,
    Medium,
};

/// Awareness gains fade to nothing as awareness approaches this level.
const AWARENESS_CEILING: f64 = 80.0;
/// Gaffe odds at neutral charisma.
const GAFFE_BASE_CHANCE: f64 = 0.12;
/// Stumble odds at neutral expertise.
const STUMBLE_BASE_CHANCE: f64 = 0.20;
/// Debate win odds at neutral expertise.
const DEBATE_WIN_BASE_CHANCE: f64 = 0.35;
const DEBATE_WIN_MAX_CHANCE: f64 = 0.80;
/// No amount of skill removes the downside entirely.
const MIN_RISK: f64 = 0.02;
/// Polling points per point of weighted campaign-stat change.
const POLLING_SCALE: f64 = 0.25;

/// Fixed per-medium numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediumProfile {
    pub awareness: f64,
    pub favorability: f64,
    pub enthusiasm: f64,
    /// Share of the electorate reached even on a zero budget.
    pub base_reach: f64,
    /// Extra share reached per 1000 spent.
    pub reach_per_thousand: f64,
    pub max_reach: f64,
    /// Reaches every constituency the actor contests.
    pub national: bool,
    /// Price of a standard buy, used by AI parties.
    pub standard_cost: f64,
}

pub fn profile(medium: Medium) -> MediumProfile {
    match medium {
        Medium::DoorToDoor => MediumProfile {
            awareness: 2.0,
            favorability: 3.0,
            enthusiasm: 4.0,
            base_reach: 0.01,
            reach_per_thousand: 0.02,
            max_reach: 0.15,
            national: false,
            standard_cost: 500.0,
        },
        Medium::Rally => MediumProfile {
            awareness: 3.0,
            favorability: 2.0,
            enthusiasm: 6.0,
            base_reach: 0.02,
            reach_per_thousand: 0.015,
            max_reach: 0.20,
            national: false,
            standard_cost: 2_000.0,
        },
        Medium::TvAd => MediumProfile {
            awareness: 6.0,
            favorability: 2.0,
            enthusiasm: 1.0,
            base_reach: 0.05,
            reach_per_thousand: 0.01,
            max_reach: 0.60,
            national: true,
            standard_cost: 10_000.0,
        },
        Medium::SocialMedia => MediumProfile {
            awareness: 4.0,
            favorability: 1.5,
            enthusiasm: 3.0,
            base_reach: 0.05,
            reach_per_thousand: 0.03,
            max_reach: 0.40,
            national: true,
            standard_cost: 3_000.0,
        },
        Medium::Newspaper => MediumProfile {
            awareness: 3.0,
            favorability: 2.5,
            enthusiasm: 1.0,
            base_reach: 0.03,
            reach_per_thousand: 0.01,
            max_reach: 0.30,
            national: false,
            standard_cost: 1_500.0,
        },
        Medium::Debate => MediumProfile {
            awareness: 5.0,
            favorability: 4.0,
            enthusiasm: 3.0,
            base_reach: 0.20,
            reach_per_thousand: 0.0,
            max_reach: 0.50,
            national: true,
            standard_cost: 0.0,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignOutcome {
    Normal,
    Gaffe,
    DebateWin,
    DebateStumble,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CampaignEffect {
    pub awareness_change: f64,
    pub favorability_change: f64,
    pub enthusiasm_change: f64,
    /// Share of the electorate reached, 0-1.
    pub estimated_reach: f64,
    pub cost_per_vote: f64,
    pub outcome: CampaignOutcome,
}

impl CampaignEffect {
    /// Polling points the action is worth.
    pub fn polling_delta(&self) -> f64 {
        (self.favorability_change * 0.5 + self.enthusiasm_change * 0.3 + self.awareness_change * 0.2)
            * POLLING_SCALE
    }
}

/// `1 + (skill - 5) / 10`: 5 is neutral, 1 gives 0.6, 10 gives 1.5.
pub fn skill_multiplier(skill: f64) -> f64 {
    1.0 + (skill.clamp(1.0, 10.0) - 5.0) / 10.0
}

/// Share of the electorate an action reaches at a given spend.
pub fn estimated_reach(medium: Medium, cost: f64) -> f64 {
    let p = profile(medium);
    (p.base_reach + p.reach_per_thousand * cost.max(0.0) / 1000.0).min(p.max_reach)
}

/// Compute what an action would do. Rallies and debates draw one random
/// number from `rng`; other media draw nothing.
///
/// `lead_candidate` drives rally charisma (neutral when absent);
/// `party_expertise` is the mean expertise of the party's elected list
/// and drives debate odds.
pub fn effect(
    action: &CampaignAction,
    stats: &CampaignStats,
    constituency: &Constituency,
    lead_candidate: Option<&Candidate>,
    party_expertise: f64,
    rng: &mut dyn RngCore,
) -> CampaignEffect {
    let p = profile(action.medium);
    let reach = estimated_reach(action.medium, action.cost);
    let intensity = if p.max_reach > 0.0 { reach / p.max_reach } else { 0.0 };
    let scale = 0.5 + 0.5 * intensity;
    let saturation = (1.0 - stats.awareness / AWARENESS_CEILING).max(0.0);
    let targeting = action
        .target_demographic
        .map(|group| (1.0 + (constituency.demographics.weight(group) - 0.25) * 2.0).clamp(0.5, 1.5))
        .unwrap_or(1.0);

    let mut awareness = p.awareness * scale * saturation;
    let mut favorability = p.favorability * scale * targeting;
    let mut enthusiasm = p.enthusiasm * scale * targeting;
    let mut outcome = CampaignOutcome::Normal;

    match action.medium {
        Medium::Rally | Medium::DoorToDoor => {
            let charisma = skill_multiplier(lead_candidate.map(|c| c.charisma).unwrap_or(5.0));
            favorability *= charisma;
            enthusiasm *= charisma;
            if action.medium == Medium::Rally {
                let gaffe_chance = (GAFFE_BASE_CHANCE / charisma).max(MIN_RISK);
                if rng.random::<f64>() < gaffe_chance {
                    outcome = CampaignOutcome::Gaffe;
                    favorability = -favorability * 1.5;
                    enthusiasm *= 0.25;
                }
            }
        }
        Medium::Debate => {
            let expertise = skill_multiplier(party_expertise);
            let stumble_chance = (STUMBLE_BASE_CHANCE / expertise).max(MIN_RISK);
            let win_chance = (DEBATE_WIN_BASE_CHANCE * expertise).min(DEBATE_WIN_MAX_CHANCE);
            let roll = rng.random::<f64>();
            if roll < stumble_chance {
                outcome = CampaignOutcome::DebateStumble;
                // Weak debaters fall harder.
                favorability = -favorability * (2.0 / expertise);
                enthusiasm = -enthusiasm * 0.5;
            } else if roll < stumble_chance + win_chance {
                outcome = CampaignOutcome::DebateWin;
                favorability *= 2.0 * expertise;
                enthusiasm *= 1.5 * expertise;
            } else {
                favorability *= 0.5 * expertise;
                enthusiasm *= 0.5;
                awareness *= 0.75;
            }
        }
        Medium::TvAd | Medium::SocialMedia | Medium::Newspaper => {}
    }

    let voters = reach * constituency.population as f64;
    let cost_per_vote = if action.cost <= 0.0 || voters <= 0.0 {
        0.0
    } else {
        action.cost / voters
    };

    CampaignEffect {
        awareness_change: awareness,
        favorability_change: favorability,
        enthusiasm_change: enthusiasm,
        estimated_reach: reach,
        cost_per_vote,
        outcome,
    }
}

/// Run a campaign action end to end. A failed validation leaves the state
/// untouched and returns `Failed`.
pub fn apply_campaign_action(
    state: GameState,
    action: &CampaignAction,
    rng: &mut dyn RngCore,
) -> (GameState, ActionResult) {
    let constituency = match validate_action(&state, action) {
        Ok(c) => c,
        Err(reason) => {
            tracing::debug!(actor = action.actor, %reason, "campaign action refused");
            return (state, ActionResult::Failed { reason });
        }
    };
    let computed = compute_effect(&state, action, &constituency, rng);
    let (state, touched) = apply_effect(state, action, &constituency, &computed);
    record_action(state, action, &computed, touched)
}

/// Validation step: actor, budget and target. Returns the constituency
/// used for reach and demographics.
fn validate_action(state: &GameState, action: &CampaignAction) -> Result<Constituency, String> {
    let Some(party) = state.party(action.actor) else {
        return Err(format!("party {} does not exist", action.actor));
    };
    if !action.cost.is_finite() || action.cost < 0.0 {
        return Err(format!("invalid cost {}", action.cost));
    }
    if action.cost > party.campaign_funds {
        return Err(format!(
            "{} cannot afford {:.0} (funds {:.0})",
            party.name, action.cost, party.campaign_funds
        ));
    }
    if profile(action.medium).national {
        // Reach is priced against the named constituency when it is contested,
        // otherwise the first one the party runs in.
        let id = if party.is_eligible_in(action.constituency_id) {
            Some(action.constituency_id)
        } else {
            party.constituency_polling.keys().next().copied()
        };
        return id
            .and_then(|id| state.constituency(id).cloned())
            .ok_or_else(|| format!("{} does not contest any constituency", party.name));
    }
    let Some(constituency) = state.constituency(action.constituency_id) else {
        return Err(format!("constituency {} does not exist", action.constituency_id));
    };
    if !party.is_eligible_in(constituency.id) {
        return Err(format!("{} does not run in {}", party.name, constituency.name));
    }
    Ok(constituency.clone())
}

fn compute_effect(
    state: &GameState,
    action: &CampaignAction,
    constituency: &Constituency,
    rng: &mut dyn RngCore,
) -> CampaignEffect {
    let party = state.party(action.actor);
    let lead = party.and_then(|p| p.lead_candidate(constituency.id));
    let expertise = party.map(|p| p.average_expertise()).unwrap_or(5.0);
    let stats = party.map(|p| p.campaign).unwrap_or_default();
    effect(action, &stats, constituency, lead, expertise, rng)
}

/// Application step: push the polling delta through the ledger and move the
/// party's gauges. Returns the number of constituencies touched.
fn apply_effect(
    mut state: GameState,
    action: &CampaignAction,
    constituency: &Constituency,
    computed: &CampaignEffect,
) -> (GameState, usize) {
    let delta = computed.polling_delta();
    let touched = if profile(action.medium).national {
        shift_share_everywhere(&mut state.parties, action.actor, delta)
    } else {
        usize::from(shift_share(&mut state.parties, constituency.id, action.actor, delta))
    };
    if let Some(party) = state.party_mut(action.actor) {
        let stats = &mut party.campaign;
        stats.awareness = (stats.awareness + computed.awareness_change).clamp(0.0, 100.0);
        stats.favorability = (stats.favorability + computed.favorability_change).clamp(0.0, 100.0);
        stats.enthusiasm = (stats.enthusiasm + computed.enthusiasm_change).clamp(0.0, 100.0);
        party.campaign_funds -= action.cost;
    }
    (state, touched)
}

fn record_action(
    mut state: GameState,
    action: &CampaignAction,
    computed: &CampaignEffect,
    touched: usize,
) -> (GameState, ActionResult) {
    let name = state.party_name(action.actor);
    let (kind, description) = match computed.outcome {
        CampaignOutcome::Normal => (
            EventKind::CampaignAction,
            format!("{name} ran a {} campaign", action.medium),
        ),
        CampaignOutcome::Gaffe => (EventKind::Gaffe, format!("{name}'s rally ended in a gaffe")),
        CampaignOutcome::DebateWin => (EventKind::DebateWin, format!("{name} won the debate")),
        CampaignOutcome::DebateStumble => (
            EventKind::DebateStumble,
            format!("{name} stumbled in the debate"),
        ),
    };
    let event_id = state.add_event(kind, description, vec![action.actor]);
    let polling_delta = computed.polling_delta();
    tracing::debug!(
        actor = action.actor,
        medium = %action.medium,
        polling_delta,
        constituencies = touched,
        "campaign action applied"
    );
    (
        state,
        ActionResult::Success {
            event_id,
            polling_delta,
        },
    )
}
