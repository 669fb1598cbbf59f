use serde::{Deserialize, Serialize};

use crate::id::ConstituencyId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Region {
    Flanders,
    Wallonia,
    Brussels,
}

string_enum!(Region {
    Flanders => "flanders",
    Wallonia => "wallonia",
    Brussels => "brussels",
});

/// Voter group a campaign action can be aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Demographic {
    Youth,
    Retirees,
    Workers,
    UpperClass,
}

string_enum!(Demographic {
    Youth => "youth",
    Retirees => "retirees",
    Workers => "workers",
    UpperClass => "upper_class",
});

/// Share of the electorate per demographic group. Sums to roughly 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    pub youth: f64,
    pub retirees: f64,
    pub workers: f64,
    pub upper_class: f64,
}

impl Demographics {
    pub fn weight(&self, group: Demographic) -> f64 {
        match group {
            Demographic::Youth => self.youth,
            Demographic::Retirees => self.retirees,
            Demographic::Workers => self.workers,
            Demographic::UpperClass => self.upper_class,
        }
    }
}

impl Default for Demographics {
    fn default() -> Self {
        Self {
            youth: 0.25,
            retirees: 0.25,
            workers: 0.25,
            upper_class: 0.25,
        }
    }
}

/// Electoral district. Fixed for the whole campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constituency {
    pub id: ConstituencyId,
    pub name: String,
    pub region: Region,
    /// Seats apportioned to this district.
    pub seats: u32,
    /// Voter count, used as the population proxy for cost-per-vote.
    pub population: u64,
    #[serde(default)]
    pub demographics: Demographics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demographic_weight_lookup() {
        let d = Demographics {
            youth: 0.1,
            retirees: 0.4,
            workers: 0.3,
            upper_class: 0.2,
        };
        assert_eq!(d.weight(Demographic::Retirees), 0.4);
        assert_eq!(d.weight(Demographic::UpperClass), 0.2);
    }

    #[test]
    fn region_round_trips_through_string() {
        for region in Region::ALL {
            let s: String = (*region).into();
            assert_eq!(Region::try_from(s).unwrap(), *region);
        }
    }
}
