//! Campaign action types.
//!
//! The turn driver hands a `CampaignAction` to the engine; the engine
//! answers with an `ActionResult`.

use serde::{Deserialize, Serialize};

use super::constituency::Demographic;
use crate::id::{ConstituencyId, PartyId};

/// Campaign channel. Determines base effect, reach and scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Medium {
    DoorToDoor,
    Rally,
    TvAd,
    SocialMedia,
    Newspaper,
    Debate,
}

string_enum!(Medium {
    DoorToDoor => "door_to_door",
    Rally => "rally",
    TvAd => "tv_ad",
    SocialMedia => "social_media",
    Newspaper => "newspaper",
    Debate => "debate",
});

/// Party-level campaign gauges, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CampaignStats {
    pub awareness: f64,
    pub favorability: f64,
    pub enthusiasm: f64,
}

impl Default for CampaignStats {
    fn default() -> Self {
        Self {
            awareness: 30.0,
            favorability: 50.0,
            enthusiasm: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignAction {
    pub actor: PartyId,
    pub medium: Medium,
    /// Money spent on the action.
    pub cost: f64,
    /// Constituency the action is aimed at. Ignored for national media,
    /// which reach every constituency the actor contests.
    pub constituency_id: ConstituencyId,
    #[serde(default)]
    pub target_demographic: Option<Demographic>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    Success { event_id: u64, polling_delta: f64 },
    Failed { reason: String },
}

impl ActionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_spell_in_snake_case() {
        for medium in Medium::ALL {
            let json = serde_json::to_string(medium).unwrap();
            let back: Medium = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *medium);
        }
        assert_eq!(serde_json::to_string(&Medium::TvAd).unwrap(), "\"tv_ad\"");
    }

    #[test]
    fn unknown_medium_is_refused() {
        let err = serde_json::from_str::<Medium>("\"radio\"").unwrap_err();
        assert!(err.to_string().contains("unknown Medium: radio"), "{err}");
    }
}
