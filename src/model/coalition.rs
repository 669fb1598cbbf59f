use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::party::{Language, Stance};
use crate::id::{CandidateId, PartyId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Minister {
    pub candidate_id: CandidateId,
    pub party_id: PartyId,
    pub portfolio: String,
    pub language: Language,
}

/// A coalition offer on the negotiating table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoalitionProposal {
    /// Partners in negotiation order; the first is the formateur.
    pub partners: Vec<PartyId>,
    /// Common platform the partners sign up to.
    #[serde(default)]
    pub policy_stances: Vec<Stance>,
    /// Ministries offered per partner.
    #[serde(default)]
    pub ministries: BTreeMap<PartyId, u32>,
    #[serde(default)]
    pub prime_minister: Option<Minister>,
    #[serde(default)]
    pub ministers: Vec<Minister>,
}

impl CoalitionProposal {
    pub fn new(partners: Vec<PartyId>) -> Self {
        Self {
            partners,
            ..Self::default()
        }
    }

    pub fn ministries_for(&self, party_id: PartyId) -> u32 {
        self.ministries.get(&party_id).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Government {
    pub partners: Vec<PartyId>,
    pub prime_minister: Option<Minister>,
    pub ministers: Vec<Minister>,
    /// Coalition agreement.
    pub agreement: Vec<Stance>,
    /// 0-100. The government falls at 0.
    pub stability: f64,
    pub formed_turn: u32,
}

impl Government {
    pub fn is_partner(&self, party_id: PartyId) -> bool {
        self.partners.contains(&party_id)
    }
}
