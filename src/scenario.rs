use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::ElectoralConfig;
use crate::id::{CandidateId, ConstituencyId, PartyId};
use crate::model::*;
use crate::sim::polling::renormalize;
use crate::sim::turn::run_campaign_turn;

// -- Builder-style ref types --

/// Typed reference to a party in a [`Scenario`], enabling chained field mutation.
///
/// Created by [`Scenario::party`] (creation) or [`Scenario::party_mut`] (mutation).
/// Call [`.id()`](PartyRef::id) to terminate the chain and extract the party ID.
pub struct PartyRef<'a> {
    scenario: &'a mut Scenario,
    index: usize,
}

impl<'a> PartyRef<'a> {
    fn data_mut(&mut self) -> &mut Party {
        &mut self.scenario.parties[self.index]
    }

    /// Seats held in the chamber. Only the national total is set.
    pub fn seats(mut self, v: u32) -> Self { self.data_mut().total_seats = v; self }
    pub fn stances(mut self, v: Vec<Stance>) -> Self { self.data_mut().stances = v; self }
    pub fn stance(mut self, issue: &str, position: f64, salience: f64) -> Self {
        self.data_mut().stances.push(Stance::new(issue, position, salience));
        self
    }
    pub fn negotiation_threshold(mut self, v: f64) -> Self { self.data_mut().negotiation_threshold = v; self }
    pub fn extremist(mut self, v: bool) -> Self { self.data_mut().is_extremist = v; self }
    pub fn player(mut self, v: bool) -> Self { self.data_mut().is_player = v; self }
    pub fn funds(mut self, v: f64) -> Self { self.data_mut().campaign_funds = v; self }
    pub fn language(mut self, v: Language) -> Self { self.data_mut().language = v; self }
    pub fn ideology(mut self, economic: f64, social: f64) -> Self { self.data_mut().ideology = Ideology::new(economic, social); self }
    pub fn color(mut self, v: &str) -> Self { self.data_mut().color = v.to_string(); self }

    /// Escape hatch: apply an arbitrary closure to the party.
    pub fn with(mut self, f: impl FnOnce(&mut Party)) -> Self { f(self.data_mut()); self }

    /// Terminate the chain and return the party ID.
    pub fn id(self) -> PartyId { self.scenario.parties[self.index].id }
}

// -- Scenario --

/// Builder for game states in tests and demos.
///
/// Parties come out in creation order, which is also the seat-allocation
/// tie-break order.
pub struct Scenario {
    parties: Vec<Party>,
    constituencies: Vec<Constituency>,
    next_party: PartyId,
    next_constituency: ConstituencyId,
    next_candidate: CandidateId,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario {
    pub fn new() -> Self {
        Self {
            parties: Vec::new(),
            constituencies: Vec::new(),
            next_party: 1,
            next_constituency: 1,
            next_candidate: 1,
        }
    }

    // -- Creation --

    /// Add a constituency in Flanders with a population proportional to its seats.
    pub fn add_constituency(&mut self, name: &str, seats: u32) -> ConstituencyId {
        self.add_constituency_with(name, seats, |_| {})
    }

    pub fn add_constituency_with(
        &mut self,
        name: &str,
        seats: u32,
        modify: impl FnOnce(&mut Constituency),
    ) -> ConstituencyId {
        let id = self.next_constituency;
        self.next_constituency += 1;
        let mut constituency = Constituency {
            id,
            name: name.to_string(),
            region: Region::Flanders,
            seats,
            population: u64::from(seats) * 75_000,
            demographics: Demographics::default(),
        };
        modify(&mut constituency);
        self.constituencies.push(constituency);
        id
    }

    /// Create a party and return a ref for chained setup. It contests no
    /// constituency until [`set_polling`](Scenario::set_polling) says so.
    pub fn party(&mut self, name: &str) -> PartyRef<'_> {
        let id = self.next_party;
        self.next_party += 1;
        self.parties.push(Party {
            id,
            name: name.to_string(),
            color: "#808080".to_string(),
            language: Language::Dutch,
            ideology: Ideology::default(),
            stances: Vec::new(),
            is_extremist: false,
            negotiation_threshold: 30.0,
            constituency_polling: Default::default(),
            constituency_seats: Default::default(),
            total_seats: 0,
            candidates: Vec::new(),
            campaign: CampaignStats::default(),
            campaign_funds: 0.0,
            is_player: false,
        });
        let index = self.parties.len() - 1;
        PartyRef {
            scenario: self,
            index,
        }
    }

    /// Ref to an existing party.
    ///
    /// # Panics
    /// If no party has the ID.
    pub fn party_mut(&mut self, id: PartyId) -> PartyRef<'_> {
        let index = self
            .parties
            .iter()
            .position(|p| p.id == id)
            .unwrap_or_else(|| panic!("no party with id {id}"));
        PartyRef {
            scenario: self,
            index,
        }
    }

    /// ID of the party with the given name.
    ///
    /// # Panics
    /// If no party has the name.
    pub fn party_id(&self, name: &str) -> PartyId {
        self.parties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.id)
            .unwrap_or_else(|| panic!("no party named {name}"))
    }

    /// Set the listed parties' shares in a constituency, making them
    /// eligible there, then renormalize the constituency to 100.
    pub fn set_polling(&mut self, constituency_id: ConstituencyId, shares: &[(PartyId, f64)]) {
        for &(party_id, share) in shares {
            if let Some(party) = self.parties.iter_mut().find(|p| p.id == party_id) {
                party.constituency_polling.insert(constituency_id, share);
            }
        }
        renormalize(&mut self.parties, constituency_id);
    }

    /// Append a candidate to the bottom of a party's list in a constituency.
    pub fn add_candidate(&mut self, party: PartyId, constituency_id: ConstituencyId, name: &str) -> CandidateId {
        self.add_candidate_with(party, constituency_id, name, |_| {})
    }

    pub fn add_candidate_with(
        &mut self,
        party: PartyId,
        constituency_id: ConstituencyId,
        name: &str,
        modify: impl FnOnce(&mut Candidate),
    ) -> CandidateId {
        let id = self.next_candidate;
        self.next_candidate += 1;
        let Some(party) = self.parties.iter_mut().find(|p| p.id == party) else {
            return id;
        };
        let list_position = party
            .candidates
            .iter()
            .filter(|c| c.constituency_id == constituency_id)
            .count() as u32
            + 1;
        let mut candidate = Candidate {
            id,
            name: name.to_string(),
            constituency_id,
            list_position,
            language: party.language,
            charisma: 5.0,
            expertise: 5.0,
            elected: false,
        };
        modify(&mut candidate);
        party.candidates.push(candidate);
        id
    }

    // -- Finishing --

    pub fn build(self) -> GameState {
        GameState::new(self.parties, self.constituencies)
    }

    /// Build the state and play `turns` campaign turns with AI parties only.
    pub fn run_turns(self, turns: u32, config: &ElectoralConfig, seed: u64) -> GameState {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut state = self.build();
        for _ in 0..turns {
            state = run_campaign_turn(state, None, config, &mut rng).0;
        }
        state
    }

    // -- Presets --

    /// A 150-seat chamber over eleven provinces with the main Flemish and
    /// francophone parties. CD&V is the player party; Vlaams Belang sits
    /// behind the cordon sanitaire.
    pub fn belgian_demo() -> Self {
        let mut s = Scenario::new();

        let flemish = [
            s.add_province("Antwerp", 24, Region::Flanders, 1_900_000),
            s.add_province("East Flanders", 20, Region::Flanders, 1_550_000),
            s.add_province("West Flanders", 16, Region::Flanders, 1_220_000),
            s.add_province("Flemish Brabant", 15, Region::Flanders, 1_180_000),
            s.add_province("Limburg", 12, Region::Flanders, 890_000),
        ];
        let brussels = s.add_province("Brussels", 16, Region::Brussels, 1_240_000);
        let walloon = [
            s.add_province("Hainaut", 18, Region::Wallonia, 1_350_000),
            s.add_province("Liège", 14, Region::Wallonia, 1_110_000),
            s.add_province("Namur", 6, Region::Wallonia, 500_000),
            s.add_province("Walloon Brabant", 5, Region::Wallonia, 410_000),
            s.add_province("Luxembourg", 4, Region::Wallonia, 290_000),
        ];

        let nva = s
            .party("N-VA")
            .color("#ffed00")
            .ideology(5.0, 4.0)
            .funds(20_000.0)
            .negotiation_threshold(25.0)
            .stance("state_reform", 90.0, 9.0)
            .stance("taxes", 25.0, 7.0)
            .stance("migration", 75.0, 6.0)
            .stance("pensions", 40.0, 4.0)
            .id();
        let vb = s
            .party("Vlaams Belang")
            .color("#1a1a1a")
            .ideology(3.0, 9.0)
            .funds(15_000.0)
            .extremist(true)
            .stance("migration", 95.0, 10.0)
            .stance("state_reform", 100.0, 8.0)
            .stance("pensions", 60.0, 4.0)
            .id();
        let vooruit = s
            .party("Vooruit")
            .color("#ff2900")
            .ideology(-5.0, -3.0)
            .funds(12_000.0)
            .stance("pensions", 80.0, 9.0)
            .stance("taxes", 75.0, 6.0)
            .stance("climate", 65.0, 5.0)
            .id();
        let cdv = s
            .party("CD&V")
            .color("#f5822a")
            .ideology(0.0, 2.0)
            .funds(15_000.0)
            .player(true)
            .stance("pensions", 60.0, 6.0)
            .stance("state_reform", 55.0, 5.0)
            .stance("taxes", 45.0, 5.0)
            .id();
        let openvld = s
            .party("Open VLD")
            .color("#003d6d")
            .ideology(6.0, -4.0)
            .funds(12_000.0)
            .stance("taxes", 15.0, 9.0)
            .stance("pensions", 35.0, 5.0)
            .stance("climate", 45.0, 3.0)
            .id();
        let groen = s
            .party("Groen")
            .color("#01b33d")
            .ideology(-4.0, -6.0)
            .funds(8_000.0)
            .stance("climate", 95.0, 10.0)
            .stance("migration", 20.0, 6.0)
            .stance("taxes", 70.0, 4.0)
            .id();
        let ps = s
            .party("PS")
            .color("#e30613")
            .language(Language::French)
            .ideology(-6.0, -2.0)
            .funds(18_000.0)
            .stance("pensions", 90.0, 10.0)
            .stance("taxes", 80.0, 7.0)
            .stance("state_reform", 30.0, 5.0)
            .id();
        let mr = s
            .party("MR")
            .color("#0047ab")
            .language(Language::French)
            .ideology(6.0, 2.0)
            .funds(18_000.0)
            .stance("taxes", 10.0, 9.0)
            .stance("pensions", 35.0, 6.0)
            .stance("migration", 65.0, 5.0)
            .stance("state_reform", 25.0, 4.0)
            .id();
        let engages = s
            .party("Les Engagés")
            .color("#00e6d2")
            .language(Language::French)
            .ideology(1.0, 1.0)
            .funds(12_000.0)
            .stance("pensions", 60.0, 6.0)
            .stance("climate", 60.0, 5.0)
            .stance("state_reform", 35.0, 4.0)
            .id();
        let ecolo = s
            .party("Ecolo")
            .color("#3aaa35")
            .language(Language::French)
            .ideology(-4.0, -6.0)
            .funds(8_000.0)
            .stance("climate", 95.0, 10.0)
            .stance("migration", 20.0, 6.0)
            .id();
        let pvda = s
            .party("PVDA-PTB")
            .color("#aa0000")
            .ideology(-9.0, -3.0)
            .funds(6_000.0)
            .negotiation_threshold(15.0)
            .stance("pensions", 100.0, 9.0)
            .stance("taxes", 95.0, 9.0)
            .id();

        let flemish_polling = [
            (nva, 25.0),
            (vb, 26.0),
            (vooruit, 14.0),
            (cdv, 12.0),
            (openvld, 8.0),
            (groen, 8.0),
            (pvda, 7.0),
        ];
        let walloon_polling = [
            (ps, 27.0),
            (mr, 29.0),
            (engages, 21.0),
            (ecolo, 9.0),
            (pvda, 14.0),
        ];
        let brussels_polling = [
            (mr, 21.0),
            (ps, 22.0),
            (pvda, 20.0),
            (ecolo, 10.0),
            (engages, 8.0),
            (nva, 3.0),
            (vb, 2.0),
            (groen, 5.0),
            (vooruit, 4.0),
            (openvld, 3.0),
            (cdv, 2.0),
        ];

        for (i, &c) in flemish.iter().enumerate() {
            s.set_polling(c, &tilted(&flemish_polling, i));
        }
        for (i, &c) in walloon.iter().enumerate() {
            s.set_polling(c, &tilted(&walloon_polling, i));
        }
        s.set_polling(brussels, &brussels_polling);

        s.add_lists();
        s
    }

    fn add_province(&mut self, name: &str, seats: u32, region: Region, population: u64) -> ConstituencyId {
        self.add_constituency_with(name, seats, |c| {
            c.region = region;
            c.population = population;
            if region == Region::Brussels {
                c.demographics = Demographics {
                    youth: 0.32,
                    retirees: 0.18,
                    workers: 0.32,
                    upper_class: 0.18,
                };
            }
        })
    }

    /// Four-name lists for every party in every constituency it contests,
    /// with skills spread deterministically.
    fn add_lists(&mut self) {
        let mut entries = Vec::new();
        for party in &self.parties {
            for &c in party.constituency_polling.keys() {
                let place = self
                    .constituencies
                    .iter()
                    .find(|k| k.id == c)
                    .map(|k| k.name.clone())
                    .unwrap_or_default();
                entries.push((party.id, party.name.clone(), c, place));
            }
        }

        for (party, name, constituency, place) in entries {
            for n in 1..=4u64 {
                let seed = party * 7 + constituency * 3 + n;
                self.add_candidate_with(party, constituency, &format!("{name} {place} #{n}"), |c| {
                    c.charisma = 3.0 + (seed % 6) as f64;
                    c.expertise = 3.0 + ((seed * 5) % 6) as f64;
                });
            }
        }
    }
}

/// Shift a regional baseline a little per province so constituencies differ.
/// The first party gains what the last one loses.
fn tilted(base: &[(PartyId, f64)], index: usize) -> Vec<(PartyId, f64)> {
    let mut shares = base.to_vec();
    let tilt = (index as f64 - 2.0) * 1.5;
    if let Some(first) = shares.first_mut() {
        first.1 += tilt;
    }
    if let Some(last) = shares.last_mut() {
        last.1 = (last.1 - tilt).max(0.5);
    }
    shares
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_chamber_has_150_seats_and_balanced_ledger() {
        let state = Scenario::belgian_demo().build();
        assert_eq!(state.chamber_size(), 150);
        assert_eq!(state.check_invariants(), Ok(()));
        assert_eq!(state.player_party().map(|p| p.name.as_str()), Some("CD&V"));
        assert!(state.parties.iter().any(|p| p.is_extremist));
    }

    #[test]
    fn every_contested_constituency_has_a_list() {
        let state = Scenario::belgian_demo().build();
        for party in &state.parties {
            for &c in party.constituency_polling.keys() {
                let list = party.list_for(c);
                assert_eq!(list.len(), 4, "{} in {c}", party.name);
                assert_eq!(list[0].list_position, 1);
            }
        }
    }

    #[test]
    fn set_polling_renormalizes() {
        let mut s = Scenario::new();
        let c = s.add_constituency("Ghent", 10);
        let a = s.party("A").id();
        let b = s.party("B").id();
        s.set_polling(c, &[(a, 30.0), (b, 30.0)]);
        let state = s.build();
        assert_eq!(state.polling_snapshot(c), vec![(a, 50.0), (b, 50.0)]);
    }

    #[test]
    fn candidates_are_appended_to_the_list() {
        let mut s = Scenario::new();
        let c = s.add_constituency("Namur", 6);
        let a = s.party("A").language(Language::French).id();
        let first = s.add_candidate(a, c, "First");
        let second = s.add_candidate(a, c, "Second");
        let state = s.build();
        let list = state.party(a).unwrap().list_for(c);
        assert_eq!(list.iter().map(|c| c.id).collect::<Vec<_>>(), vec![first, second]);
        assert_eq!(list[1].list_position, 2);
        assert_eq!(list[0].language, Language::French);
    }

    #[test]
    fn party_mut_edits_existing_party() {
        let mut s = Scenario::new();
        let a = s.party("A").id();
        s.party_mut(a).seats(12).funds(500.0);
        let state = s.build();
        assert_eq!(state.party(a).unwrap().total_seats, 12);
        assert_eq!(state.party(a).unwrap().campaign_funds, 500.0);
    }

    #[test]
    fn run_turns_is_deterministic() {
        let config = ElectoralConfig::default();
        let a = Scenario::belgian_demo().run_turns(3, &config, 5);
        let b = Scenario::belgian_demo().run_turns(3, &config, 5);
        assert_eq!(a, b);
        assert_eq!(a.turn, 3);
    }
}
