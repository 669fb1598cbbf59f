use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::{BillId, PartyId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BillStatus {
    Proposed,
    Voting,
    Passed,
    Rejected,
}

string_enum!(BillStatus {
    Proposed => "proposed",
    Voting => "voting",
    Passed => "passed",
    Rejected => "rejected",
});

impl BillStatus {
    pub fn is_final(&self) -> bool {
        matches!(self, BillStatus::Passed | BillStatus::Rejected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum VoteChoice {
    For,
    Against,
    Abstain,
}

string_enum!(VoteChoice {
    For => "for",
    Against => "against",
    Abstain => "abstain",
});

/// What happens to the country when a bill passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BillEffects {
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub approval: f64,
    #[serde(default)]
    pub stability: f64,
}

/// Seat-weighted outcome of a floor vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteTally {
    pub yes: u32,
    pub no: u32,
    pub abstain: u32,
    pub passed: bool,
    pub per_party: BTreeMap<PartyId, VoteChoice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    pub title: String,
    pub issue_id: String,
    /// Position the bill moves policy to, on the same 0-100 scale as stances.
    pub target_position: f64,
    pub sponsor: PartyId,
    pub status: BillStatus,
    #[serde(default)]
    pub effects: BillEffects,
    #[serde(default)]
    pub votes: Option<VoteTally>,
}

/// Sponsor-attributed entry in the legislative history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegislativeRecord {
    pub bill_id: BillId,
    pub title: String,
    pub sponsor: PartyId,
    pub status: BillStatus,
    pub yes: u32,
    pub no: u32,
    pub abstain: u32,
    pub turn: u32,
}
