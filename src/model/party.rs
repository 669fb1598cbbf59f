use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::campaign::CampaignStats;
use crate::id::{CandidateId, ConstituencyId, PartyId};

/// One of the country's language communities. Only Dutch and French count
/// toward cabinet parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Language {
    Dutch,
    French,
    German,
}

string_enum!(Language {
    Dutch => "dutch",
    French => "french",
    German => "german",
});

/// Two-axis ideology, each axis in [-10, 10].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Ideology {
    pub economic: f64,
    pub social: f64,
}

impl Ideology {
    pub fn new(economic: f64, social: f64) -> Self {
        Self {
            economic: economic.clamp(-10.0, 10.0),
            social: social.clamp(-10.0, 10.0),
        }
    }
}

/// How strongly (`salience`, 0-10) and in which direction (`position`, 0-100)
/// a party cares about an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stance {
    pub issue_id: String,
    pub position: f64,
    pub salience: f64,
}

impl Stance {
    pub fn new(issue_id: impl Into<String>, position: f64, salience: f64) -> Self {
        Self {
            issue_id: issue_id.into(),
            position,
            salience,
        }
    }
}

/// A name on a party's ranked list in one constituency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub constituency_id: ConstituencyId,
    /// 1 = list puller.
    pub list_position: u32,
    pub language: Language,
    /// 1-10, 5 is neutral.
    pub charisma: f64,
    /// 1-10, 5 is neutral.
    pub expertise: f64,
    #[serde(default)]
    pub elected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub id: PartyId,
    pub name: String,
    pub color: String,
    pub language: Language,
    pub ideology: Ideology,
    #[serde(default)]
    pub stances: Vec<Stance>,
    #[serde(default)]
    pub is_extremist: bool,
    /// Largest proposal friction this party will still sign up to.
    pub negotiation_threshold: f64,
    /// Vote share per contested constituency. A party is eligible in exactly
    /// the constituencies that have an entry here.
    #[serde(default)]
    pub constituency_polling: BTreeMap<ConstituencyId, f64>,
    #[serde(default)]
    pub constituency_seats: BTreeMap<ConstituencyId, u32>,
    #[serde(default)]
    pub total_seats: u32,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub campaign: CampaignStats,
    #[serde(default)]
    pub campaign_funds: f64,
    /// Controlled by the player rather than the AI.
    #[serde(default)]
    pub is_player: bool,
}

impl Party {
    pub fn stance_on(&self, issue_id: &str) -> Option<&Stance> {
        self.stances.iter().find(|s| s.issue_id == issue_id)
    }

    pub fn is_eligible_in(&self, constituency_id: ConstituencyId) -> bool {
        self.constituency_polling.contains_key(&constituency_id)
    }

    pub fn polling_in(&self, constituency_id: ConstituencyId) -> Option<f64> {
        self.constituency_polling.get(&constituency_id).copied()
    }

    /// List for a constituency, ordered by list position.
    pub fn list_for(&self, constituency_id: ConstituencyId) -> Vec<&Candidate> {
        let mut list: Vec<&Candidate> = self
            .candidates
            .iter()
            .filter(|c| c.constituency_id == constituency_id)
            .collect();
        list.sort_by_key(|c| (c.list_position, c.id));
        list
    }

    /// Candidate heading the list in a constituency.
    pub fn lead_candidate(&self, constituency_id: ConstituencyId) -> Option<&Candidate> {
        self.list_for(constituency_id).into_iter().next()
    }

    pub fn elected_candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter().filter(|c| c.elected)
    }

    /// Mean expertise over elected candidates, falling back to the whole
    /// list before anyone has been elected. Neutral (5.0) for an empty list.
    pub fn average_expertise(&self) -> f64 {
        let elected: Vec<f64> = self.elected_candidates().map(|c| c.expertise).collect();
        let pool: Vec<f64> = if elected.is_empty() {
            self.candidates.iter().map(|c| c.expertise).collect()
        } else {
            elected
        };
        if pool.is_empty() {
            return 5.0;
        }
        pool.iter().sum::<f64>() / pool.len() as f64
    }
}
