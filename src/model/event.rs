use serde::{Deserialize, Serialize};

use crate::id::PartyId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EventKind {
    CampaignAction,
    Gaffe,
    DebateWin,
    DebateStumble,
    CampaignEvent,
    Election,
    GovernmentFormed,
    GovernmentCollapsed,
    BillProposed,
    BillPassed,
    BillRejected,
    Custom(String),
}

string_enum_open!(EventKind, "event kind", {
    CampaignAction => "campaign_action",
    Gaffe => "gaffe",
    DebateWin => "debate_win",
    DebateStumble => "debate_stumble",
    CampaignEvent => "campaign_event",
    Election => "election",
    GovernmentFormed => "government_formed",
    GovernmentCollapsed => "government_collapsed",
    BillProposed => "bill_proposed",
    BillPassed => "bill_passed",
    BillRejected => "bill_rejected",
});

/// Entry in the game log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub kind: EventKind,
    pub turn: u32,
    pub description: String,
    /// Parties the event is about, most relevant first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parties: Vec<PartyId>,
}
