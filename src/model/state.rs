use serde::{Deserialize, Serialize};

use super::bill::{Bill, LegislativeRecord};
use super::coalition::Government;
use super::constituency::Constituency;
use super::event::{Event, EventKind};
use super::party::Party;
use crate::id::{BillId, ConstituencyId, IdGenerator, PartyId};

/// Allowed drift of a constituency's polling total away from 100.
pub const POLLING_TOLERANCE: f64 = 1e-6;

/// Ways a state can break the engine's invariants. Only reachable through
/// hand-edited or corrupted saves; the engine itself never produces them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("polling in constituency {constituency_id} sums to {total}, expected 100")]
    PollingTotal {
        constituency_id: ConstituencyId,
        total: f64,
    },
    #[error("party {party_id} has negative polling {share} in constituency {constituency_id}")]
    NegativePolling {
        party_id: PartyId,
        constituency_id: ConstituencyId,
        share: f64,
    },
    #[error("party {party_id} polls in unknown constituency {constituency_id}")]
    UnknownConstituency {
        party_id: PartyId,
        constituency_id: ConstituencyId,
    },
    #[error("party {party_id} reports {total_seats} seats but its constituencies add up to {sum}")]
    SeatTotalMismatch {
        party_id: PartyId,
        total_seats: u32,
        sum: u32,
    },
    #[error("constituency {constituency_id} hands out {allocated} seats but only has {available}")]
    OverAllocated {
        constituency_id: ConstituencyId,
        allocated: u32,
        available: u32,
    },
    #[error("government partner {party_id} does not exist")]
    UnknownPartner { party_id: PartyId },
}

/// The whole game: everything the UI renders and the save file stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub turn: u32,
    /// Parties in scenario order. Seat-allocation tie-breaks follow this order.
    pub parties: Vec<Party>,
    pub constituencies: Vec<Constituency>,
    #[serde(default)]
    pub government: Option<Government>,
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub history: Vec<LegislativeRecord>,
    #[serde(default)]
    pub log: Vec<Event>,
    #[serde(default)]
    pub budget: f64,
    /// Public approval of the government, 0-100.
    #[serde(default = "default_approval")]
    pub approval: f64,
    #[serde(default)]
    pub id_gen: IdGenerator,
}

fn default_approval() -> f64 {
    50.0
}

impl GameState {
    pub fn new(parties: Vec<Party>, constituencies: Vec<Constituency>) -> Self {
        Self {
            turn: 0,
            parties,
            constituencies,
            government: None,
            bills: Vec::new(),
            history: Vec::new(),
            log: Vec::new(),
            budget: 0.0,
            approval: default_approval(),
            id_gen: IdGenerator::new(),
        }
    }

    pub fn party(&self, id: PartyId) -> Option<&Party> {
        self.parties.iter().find(|p| p.id == id)
    }

    pub fn party_mut(&mut self, id: PartyId) -> Option<&mut Party> {
        self.parties.iter_mut().find(|p| p.id == id)
    }

    pub fn party_name(&self, id: PartyId) -> String {
        self.party(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("party {id}"))
    }

    pub fn constituency(&self, id: ConstituencyId) -> Option<&Constituency> {
        self.constituencies.iter().find(|c| c.id == id)
    }

    pub fn bill(&self, id: BillId) -> Option<&Bill> {
        self.bills.iter().find(|b| b.id == id)
    }

    pub fn bill_mut(&mut self, id: BillId) -> Option<&mut Bill> {
        self.bills.iter_mut().find(|b| b.id == id)
    }

    pub fn player_party(&self) -> Option<&Party> {
        self.parties.iter().find(|p| p.is_player)
    }

    /// Seats in the chamber, from the constituency apportionment.
    pub fn chamber_size(&self) -> u32 {
        self.constituencies.iter().map(|c| c.seats).sum()
    }

    /// `(party, share)` for every party contesting the constituency, in party order.
    pub fn polling_snapshot(&self, constituency_id: ConstituencyId) -> Vec<(PartyId, f64)> {
        self.parties
            .iter()
            .filter_map(|p| p.polling_in(constituency_id).map(|share| (p.id, share)))
            .collect()
    }

    /// Append to the game log. Returns the event ID.
    pub fn add_event(&mut self, kind: EventKind, description: String, parties: Vec<PartyId>) -> u64 {
        let id = self.id_gen.next_id();
        self.log.push(Event {
            id,
            kind,
            turn: self.turn,
            description,
            parties,
        });
        id
    }

    /// Check the invariants a freshly computed state always satisfies.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for party in &self.parties {
            for (&constituency_id, &share) in &party.constituency_polling {
                if self.constituency(constituency_id).is_none() {
                    return Err(InvariantViolation::UnknownConstituency {
                        party_id: party.id,
                        constituency_id,
                    });
                }
                if share < 0.0 {
                    return Err(InvariantViolation::NegativePolling {
                        party_id: party.id,
                        constituency_id,
                        share,
                    });
                }
            }
            let sum: u32 = party.constituency_seats.values().sum();
            if sum != party.total_seats {
                return Err(InvariantViolation::SeatTotalMismatch {
                    party_id: party.id,
                    total_seats: party.total_seats,
                    sum,
                });
            }
        }

        for constituency in &self.constituencies {
            let snapshot = self.polling_snapshot(constituency.id);
            if !snapshot.is_empty() {
                let total: f64 = snapshot.iter().map(|(_, share)| share).sum();
                if (total - 100.0).abs() > POLLING_TOLERANCE {
                    return Err(InvariantViolation::PollingTotal {
                        constituency_id: constituency.id,
                        total,
                    });
                }
            }
            let allocated: u32 = self
                .parties
                .iter()
                .filter_map(|p| p.constituency_seats.get(&constituency.id))
                .sum();
            if allocated > constituency.seats {
                return Err(InvariantViolation::OverAllocated {
                    constituency_id: constituency.id,
                    allocated,
                    available: constituency.seats,
                });
            }
        }

        if let Some(government) = &self.government {
            if let Some(&party_id) = government
                .partners
                .iter()
                .find(|&&id| self.party(id).is_none())
            {
                return Err(InvariantViolation::UnknownPartner { party_id });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Scenario;

    #[test]
    fn add_event_stamps_turn_and_assigns_ids() {
        let mut state = Scenario::new().build();
        state.turn = 3;
        let first = state.add_event(EventKind::Election, "Election held".to_string(), vec![]);
        let second = state.add_event(EventKind::BillProposed, "Bill".to_string(), vec![]);
        assert!(second > first);
        assert_eq!(state.log.len(), 2);
        assert_eq!(state.log[0].turn, 3);
    }

    #[test]
    fn snapshot_lists_only_contesting_parties() {
        let mut s = Scenario::new();
        let c1 = s.add_constituency("Antwerp", 10);
        let c2 = s.add_constituency("Liège", 10);
        let a = s.party("A").id();
        let b = s.party("B").id();
        s.set_polling(c1, &[(a, 60.0), (b, 40.0)]);
        s.set_polling(c2, &[(b, 100.0)]);
        let state = s.build();

        assert_eq!(state.polling_snapshot(c1), vec![(a, 60.0), (b, 40.0)]);
        assert_eq!(state.polling_snapshot(c2), vec![(b, 100.0)]);
    }

    #[test]
    fn fresh_scenario_passes_invariants() {
        let state = Scenario::belgian_demo().build();
        assert_eq!(state.check_invariants(), Ok(()));
    }

    #[test]
    fn polling_drift_is_detected() {
        let mut state = Scenario::belgian_demo().build();
        let constituency_id = state.constituencies[0].id;
        let party = state
            .parties
            .iter_mut()
            .find(|p| p.is_eligible_in(constituency_id))
            .unwrap();
        *party.constituency_polling.get_mut(&constituency_id).unwrap() += 1.0;

        assert!(matches!(
            state.check_invariants(),
            Err(InvariantViolation::PollingTotal { .. })
        ));
    }

    #[test]
    fn seat_total_mismatch_is_detected() {
        let mut state = Scenario::belgian_demo().build();
        state.parties[0].total_seats = 7;
        assert!(matches!(
            state.check_invariants(),
            Err(InvariantViolation::SeatTotalMismatch { .. })
        ));
    }
}
