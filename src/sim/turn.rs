//! One campaign turn: the player moves, every AI party moves, the news
//! cycle gets a roll, and the clock advances.

use rand::RngCore;

use super::ai::choose_action;
use super::campaign::apply_campaign_action;
use super::events::{RolledEvent, roll_campaign_event};
use crate::config::ElectoralConfig;
use crate::id::PartyId;
use crate::model::{ActionResult, CampaignAction, GameState};

/// What happened during a turn. Refused actions show up as `Failed`
/// results; they do not stop the turn.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TurnReport {
    pub turn: u32,
    pub player: Option<ActionResult>,
    pub ai: Vec<(PartyId, ActionResult)>,
    pub event: Option<RolledEvent>,
}

pub fn run_campaign_turn(
    state: GameState,
    player_action: Option<&CampaignAction>,
    config: &ElectoralConfig,
    rng: &mut dyn RngCore,
) -> (GameState, TurnReport) {
    let mut report = TurnReport {
        turn: state.turn,
        ..TurnReport::default()
    };

    let mut state = state;
    if let Some(action) = player_action {
        let (next, result) = apply_campaign_action(state, action, rng);
        state = next;
        report.player = Some(result);
    }

    let ai_parties: Vec<PartyId> = state
        .parties
        .iter()
        .filter(|p| !p.is_player)
        .map(|p| p.id)
        .collect();
    for party_id in ai_parties {
        let Some(action) = choose_action(&state, party_id, config) else {
            continue;
        };
        let (next, result) = apply_campaign_action(state, &action, rng);
        state = next;
        report.ai.push((party_id, result));
    }

    let (mut state, event) = roll_campaign_event(state, rng);
    report.event = event;

    state.turn += 1;
    tracing::debug!(
        turn = report.turn,
        ai_actions = report.ai.len(),
        event = report.event.as_ref().map(|e| e.name),
        "campaign turn finished"
    );
    (state, report)
}
