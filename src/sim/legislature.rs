//! Bills: proposal, floor vote and consequences.
//!
//! Passage rule: a simple majority of votes cast (`yes > no`); abstentions
//! do not count either way. This is the only rule the engine uses.

use super::government::adjust_stability;
use crate::config::ElectoralConfig;
use crate::id::{BillId, PartyId};
use crate::model::{
    Bill, BillEffects, BillStatus, EventKind, GameState, LegislativeRecord, Party, VoteChoice,
    VoteTally,
};

/// Position assumed for a party with no stance on the bill's issue.
const NEUTRAL_POSITION: f64 = 50.0;
/// Opposition parties vote for bills closer than this to their position.
const OPPOSITION_NEAR: f64 = 15.0;
/// Opposition parties vote against bills farther than this.
const OPPOSITION_FAR: f64 = 25.0;
/// Coalition discipline: score bonus for governing parties.
const COALITION_ALIGNMENT_BONUS: f64 = 40.0;
/// Score magnitude a governing party needs to vote rather than abstain.
const COALITION_DECISIVE_SCORE: f64 = 15.0;

/// Distance between a party's position on the bill's issue and the bill's target.
pub fn distance_to_bill(party: &Party, bill: &Bill) -> f64 {
    let position = party
        .stance_on(&bill.issue_id)
        .map(|s| s.position)
        .unwrap_or(NEUTRAL_POSITION);
    (position - bill.target_position).abs()
}

/// How one party votes on a bill.
///
/// The sponsor always votes for its own bill. Governing parties score
/// the alignment bonus minus their distance to the bill; opposition
/// parties go by distance alone.
pub fn party_vote(party: &Party, bill: &Bill, in_government: bool) -> VoteChoice {
    if party.id == bill.sponsor {
        return VoteChoice::For;
    }
    let distance = distance_to_bill(party, bill);
    if in_government {
        let score = COALITION_ALIGNMENT_BONUS - distance;
        if score >= COALITION_DECISIVE_SCORE {
            VoteChoice::For
        } else if score <= -COALITION_DECISIVE_SCORE {
            VoteChoice::Against
        } else {
            VoteChoice::Abstain
        }
    } else if distance < OPPOSITION_NEAR {
        VoteChoice::For
    } else if distance > OPPOSITION_FAR {
        VoteChoice::Against
    } else {
        VoteChoice::Abstain
    }
}

/// Seat-weighted floor vote. Only parties holding seats take part. Pure.
pub fn tally(bill: &Bill, state: &GameState) -> VoteTally {
    let mut result = VoteTally {
        yes: 0,
        no: 0,
        abstain: 0,
        passed: false,
        per_party: Default::default(),
    };
    for party in state.parties.iter().filter(|p| p.total_seats > 0) {
        let in_government = state
            .government
            .as_ref()
            .is_some_and(|g| g.is_partner(party.id));
        let choice = party_vote(party, bill, in_government);
        match choice {
            VoteChoice::For => result.yes += party.total_seats,
            VoteChoice::Against => result.no += party.total_seats,
            VoteChoice::Abstain => result.abstain += party.total_seats,
        }
        result.per_party.insert(party.id, choice);
    }
    result.passed = result.yes > result.no;
    result
}

/// Put a new bill on the order paper. Returns its ID.
pub fn propose_bill(
    mut state: GameState,
    sponsor: PartyId,
    title: &str,
    issue_id: &str,
    target_position: f64,
    effects: BillEffects,
) -> (GameState, BillId) {
    if state.party(sponsor).is_none() {
        tracing::warn!(sponsor, "bill proposed by unknown party");
    }
    let id = state.id_gen.next_id();
    state.bills.push(Bill {
        id,
        title: title.to_string(),
        issue_id: issue_id.to_string(),
        target_position,
        sponsor,
        status: BillStatus::Proposed,
        effects,
        votes: None,
    });
    let sponsor_name = state.party_name(sponsor);
    state.add_event(
        EventKind::BillProposed,
        format!("{sponsor_name} proposed \"{title}\""),
        vec![sponsor],
    );
    (state, id)
}

/// Move a proposed bill onto the floor. It stays `Voting` until
/// [`resolve_bill`] decides it. Anything but a proposed bill is left alone.
pub fn open_vote(mut state: GameState, bill_id: BillId) -> GameState {
    match state.bill_mut(bill_id) {
        Some(bill) if bill.status == BillStatus::Proposed => {
            bill.status = BillStatus::Voting;
            tracing::debug!(bill_id, "bill on the floor");
        }
        Some(bill) => {
            tracing::warn!(bill_id, status = %bill.status, "only proposed bills can go to the floor");
        }
        None => tracing::warn!(bill_id, "unknown bill cannot go to the floor"),
    }
    state
}

/// Put a bill to the vote and apply the consequences. A bill still at
/// `Proposed` is opened for voting first.
///
/// Passed: budget, approval and government stability move by the bill's
/// effects. Rejected: the government loses the configured stability
/// penalty. Either way a record is appended to the legislative history.
/// Unknown or already decided bills are ignored and yield `None`.
pub fn resolve_bill(
    state: GameState,
    bill_id: BillId,
    config: &ElectoralConfig,
) -> (GameState, Option<VoteTally>) {
    let Some(bill) = state.bill(bill_id).cloned() else {
        tracing::warn!(bill_id, "vote on unknown bill ignored");
        return (state, None);
    };
    if bill.status.is_final() {
        tracing::warn!(bill_id, status = %bill.status, "vote on decided bill ignored");
        return (state, None);
    }

    let mut state = open_vote(state, bill_id);
    let votes = tally(&bill, &state);
    let status = if votes.passed {
        BillStatus::Passed
    } else {
        BillStatus::Rejected
    };
    if let Some(stored) = state.bill_mut(bill_id) {
        stored.status = status;
        stored.votes = Some(votes.clone());
    }

    state.history.push(LegislativeRecord {
        bill_id,
        title: bill.title.clone(),
        sponsor: bill.sponsor,
        status,
        yes: votes.yes,
        no: votes.no,
        abstain: votes.abstain,
        turn: state.turn,
    });

    let (kind, verb) = if votes.passed {
        (EventKind::BillPassed, "passed")
    } else {
        (EventKind::BillRejected, "was rejected")
    };
    state.add_event(
        kind,
        format!(
            "\"{}\" {verb} ({} for, {} against, {} abstaining)",
            bill.title, votes.yes, votes.no, votes.abstain
        ),
        vec![bill.sponsor],
    );
    tracing::debug!(bill_id, yes = votes.yes, no = votes.no, passed = votes.passed, "bill resolved");

    let state = if votes.passed {
        apply_effects(state, &bill.effects)
    } else {
        adjust_stability(state, -config.rejection_stability_penalty)
    };
    (state, Some(votes))
}

fn apply_effects(mut state: GameState, effects: &BillEffects) -> GameState {
    state.budget += effects.budget;
    state.approval = (state.approval + effects.approval).clamp(0.0, 100.0);
    adjust_stability(state, effects.stability)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CoalitionProposal, Stance};
    use crate::scenario::Scenario;
    use crate::sim::government::install_government;

    struct Floor {
        state: GameState,
        sponsor: PartyId,
        partner: PartyId,
        opposition: PartyId,
        undecided: PartyId,
    }

    /// Sponsor and partner govern; positions on "pensions" are given per party.
    fn floor(positions: [f64; 4], seats: [u32; 4]) -> Floor {
        let mut s = Scenario::new();
        let sponsor = s
            .party("Sponsor")
            .seats(seats[0])
            .stances(vec![Stance::new("pensions", positions[0], 5.0)])
            .id();
        let partner = s
            .party("Partner")
            .seats(seats[1])
            .stances(vec![Stance::new("pensions", positions[1], 5.0)])
            .id();
        let opposition = s
            .party("Opposition")
            .seats(seats[2])
            .stances(vec![Stance::new("pensions", positions[2], 5.0)])
            .id();
        let undecided = s
            .party("Undecided")
            .seats(seats[3])
            .stances(vec![Stance::new("pensions", positions[3], 5.0)])
            .id();
        let config = ElectoralConfig::with_total_seats(150);
        let state = install_government(
            s.build(),
            &CoalitionProposal::new(vec![sponsor, partner]),
            &config,
        );
        Floor {
            state,
            sponsor,
            partner,
            opposition,
            undecided,
        }
    }

    #[test]
    fn coalition_sponsor_for_and_distant_opposition_against() {
        let t = floor([100.0, 100.0, -100.0, 70.0], [50, 30, 40, 30]);
        let (state, bill_id) =
            propose_bill(t.state, t.sponsor, "Raise pensions", "pensions", 80.0, BillEffects::default());
        let votes = tally(state.bill(bill_id).unwrap(), &state);

        assert_eq!(votes.per_party[&t.sponsor], VoteChoice::For);
        assert_eq!(votes.per_party[&t.partner], VoteChoice::For);
        assert_eq!(votes.per_party[&t.opposition], VoteChoice::Against);
        assert_eq!(votes.per_party[&t.undecided], VoteChoice::For);
        assert_eq!((votes.yes, votes.no, votes.abstain), (110, 40, 0));
        assert!(votes.passed);
    }

    #[test]
    fn opposition_bands() {
        let bill = Bill {
            id: 1,
            title: "t".to_string(),
            issue_id: "tax".to_string(),
            target_position: 50.0,
            sponsor: 999,
            status: BillStatus::Proposed,
            effects: BillEffects::default(),
            votes: None,
        };
        let mut s = Scenario::new();
        let near = s.party("Near").stances(vec![Stance::new("tax", 60.0, 5.0)]).id();
        let mid = s.party("Mid").stances(vec![Stance::new("tax", 70.0, 5.0)]).id();
        let far = s.party("Far").stances(vec![Stance::new("tax", 80.0, 5.0)]).id();
        let silent = s.party("Silent").id();
        let state = s.build();

        let vote = |id| party_vote(state.party(id).unwrap(), &bill, false);
        assert_eq!(vote(near), VoteChoice::For);
        assert_eq!(vote(mid), VoteChoice::Abstain);
        assert_eq!(vote(far), VoteChoice::Against);
        // No stance: treated as 50, right on target.
        assert_eq!(vote(silent), VoteChoice::For);
    }

    #[test]
    fn coalition_discipline_stretches_tolerance() {
        let t = floor([80.0, 50.0, 50.0, 0.0], [40, 40, 40, 30]);
        let (state, bill_id) =
            propose_bill(t.state, t.sponsor, "Pensions", "pensions", 80.0, BillEffects::default());
        let votes = tally(state.bill(bill_id).unwrap(), &state);

        // Distance 30: a partner abstains, the opposition votes against.
        assert_eq!(votes.per_party[&t.partner], VoteChoice::Abstain);
        assert_eq!(votes.per_party[&t.opposition], VoteChoice::Against);
        assert_eq!(votes.per_party[&t.undecided], VoteChoice::Against);
        assert_eq!((votes.yes, votes.no, votes.abstain), (40, 70, 40));
        assert!(!votes.passed);
    }

    #[test]
    fn tie_between_for_and_against_fails() {
        let t = floor([80.0, 0.0, 0.0, 0.0], [40, 0, 40, 0]);
        let (state, bill_id) =
            propose_bill(t.state, t.sponsor, "Pensions", "pensions", 80.0, BillEffects::default());
        let votes = tally(state.bill(bill_id).unwrap(), &state);
        assert_eq!(votes.yes, votes.no);
        assert!(!votes.passed);
    }

    #[test]
    fn passing_applies_effects_and_records_history() {
        let t = floor([100.0, 90.0, -100.0, 70.0], [50, 30, 40, 30]);
        let config = ElectoralConfig::with_total_seats(150);
        let effects = BillEffects {
            budget: -2.5,
            approval: 4.0,
            stability: 10.0,
        };
        let (state, bill_id) = propose_bill(t.state, t.sponsor, "Raise pensions", "pensions", 80.0, effects);
        let (state, votes) = resolve_bill(state, bill_id, &config);

        assert!(votes.unwrap().passed);
        assert_eq!(state.bill(bill_id).unwrap().status, BillStatus::Passed);
        assert_eq!(state.budget, -2.5);
        assert_eq!(state.approval, 54.0);
        assert_eq!(state.government.as_ref().unwrap().stability, 60.0);
        let record = state.history.last().unwrap();
        assert_eq!(record.sponsor, t.sponsor);
        assert_eq!(record.status, BillStatus::Passed);
        assert_eq!(state.log.last().unwrap().kind, EventKind::BillPassed);
    }

    #[test]
    fn rejection_costs_stability() {
        let t = floor([80.0, 50.0, 0.0, 0.0], [20, 20, 60, 50]);
        let config = ElectoralConfig::with_total_seats(150);
        let effects = BillEffects {
            budget: 100.0,
            ..BillEffects::default()
        };
        let (state, bill_id) = propose_bill(t.state, t.sponsor, "Pensions", "pensions", 80.0, effects);
        let (state, votes) = resolve_bill(state, bill_id, &config);

        assert!(!votes.unwrap().passed);
        assert_eq!(state.bill(bill_id).unwrap().status, BillStatus::Rejected);
        assert_eq!(state.budget, 0.0);
        assert_eq!(state.government.as_ref().unwrap().stability, 45.0);
        assert_eq!(state.history.last().unwrap().status, BillStatus::Rejected);
    }

    #[test]
    fn floor_vote_moves_through_voting() {
        let t = floor([100.0, 90.0, -100.0, 70.0], [50, 30, 40, 30]);
        let config = ElectoralConfig::with_total_seats(150);
        let (state, bill_id) =
            propose_bill(t.state, t.sponsor, "Pensions", "pensions", 80.0, BillEffects::default());

        let state = open_vote(state, bill_id);
        assert_eq!(state.bill(bill_id).unwrap().status, BillStatus::Voting);
        // Opening twice changes nothing.
        let state = open_vote(state, bill_id);
        assert_eq!(state.bill(bill_id).unwrap().status, BillStatus::Voting);

        let (state, votes) = resolve_bill(state, bill_id, &config);
        assert!(votes.unwrap().passed);
        assert_eq!(state.bill(bill_id).unwrap().status, BillStatus::Passed);

        // A decided bill cannot be reopened.
        let state = open_vote(state, bill_id);
        assert_eq!(state.bill(bill_id).unwrap().status, BillStatus::Passed);
    }

    #[test]
    fn decided_or_unknown_bills_are_ignored() {
        let t = floor([100.0, 90.0, -100.0, 70.0], [50, 30, 40, 30]);
        let config = ElectoralConfig::with_total_seats(150);
        let (state, bill_id) =
            propose_bill(t.state, t.sponsor, "Pensions", "pensions", 80.0, BillEffects::default());
        let (state, _) = resolve_bill(state, bill_id, &config);
        let history_len = state.history.len();

        let (state, again) = resolve_bill(state, bill_id, &config);
        assert!(again.is_none());
        assert_eq!(state.history.len(), history_len);

        let (_, missing) = resolve_bill(state, 9_999, &config);
        assert!(missing.is_none());
    }
}
