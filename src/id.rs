use serde::{Deserialize, Serialize};

/// Party identifier. Assigned by the scenario, stable for the whole game.
pub type PartyId = u64;
/// Constituency identifier.
pub type ConstituencyId = u64;
/// Candidate identifier, unique across all party lists.
pub type CandidateId = u64;
/// Bill identifier.
pub type BillId = u64;

/// Monotonic ID generator for objects created during play (bills, events).
///
/// Serialized with the game state so a restored save keeps handing out
/// fresh IDs instead of reusing ones already on record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids() {
        let mut id_gen = IdGenerator::new();
        assert_eq!(id_gen.next_id(), 1);
        assert_eq!(id_gen.next_id(), 2);
        assert_eq!(IdGenerator::default().next_id(), 1);
    }

    #[test]
    fn survives_serde_round_trip() {
        let mut id_gen = IdGenerator::new();
        id_gen.next_id();
        id_gen.next_id();
        let json = serde_json::to_string(&id_gen).unwrap();
        let mut restored: IdGenerator = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.next_id(), 3);
    }
}
