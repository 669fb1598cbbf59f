//! D'Hondt seat allocation with an electoral threshold.
//!
//! Pure: the same snapshot always gives the same seats, so the same code
//! serves the real election and non-mutating seat projections.

use std::collections::BTreeMap;

use crate::id::{ConstituencyId, PartyId};
use crate::model::Party;

/// Share of the constituency vote (percent) below which a party wins nothing.
pub const DEFAULT_THRESHOLD_PCT: f64 = 5.0;

/// Allocate `total_seats` among the parties of one constituency.
///
/// `snapshot` is `(party, polling share)` in iteration order. Parties whose
/// share of the snapshot total is strictly below `threshold_pct` get no
/// seats, but their votes still count toward that total. Each seat goes to
/// the largest `share / (seats_won + 1)`; on an exact tie the party that
/// comes first in `snapshot` wins.
///
/// Every party in the snapshot appears in the result. If nobody clears the
/// threshold no seats are handed out.
pub fn allocate(
    snapshot: &[(PartyId, f64)],
    total_seats: u32,
    threshold_pct: f64,
) -> BTreeMap<PartyId, u32> {
    let mut seats: BTreeMap<PartyId, u32> = snapshot.iter().map(|&(id, _)| (id, 0)).collect();

    let total_votes: f64 = snapshot.iter().map(|&(_, share)| share.max(0.0)).sum();
    if total_votes <= 0.0 {
        return seats;
    }

    let eligible: Vec<(PartyId, f64)> = snapshot
        .iter()
        .filter(|&&(_, share)| share.max(0.0) / total_votes * 100.0 >= threshold_pct)
        .map(|&(id, share)| (id, share.max(0.0)))
        .collect();
    if eligible.is_empty() {
        tracing::debug!(total_seats, threshold_pct, "no party cleared the threshold");
        return seats;
    }

    let mut won = vec![0u32; eligible.len()];
    for _ in 0..total_seats {
        let mut best: Option<(usize, f64)> = None;
        for (i, &(_, votes)) in eligible.iter().enumerate() {
            let quotient = votes / f64::from(won[i] + 1);
            match best {
                Some((_, best_quotient)) if quotient <= best_quotient => {}
                _ => best = Some((i, quotient)),
            }
        }
        if let Some((i, _)) = best {
            won[i] += 1;
        }
    }

    for (&(id, _), &n) in eligible.iter().zip(&won) {
        seats.insert(id, n);
    }
    seats
}

/// Mark the top `seats` names on a party's list in `constituency_id` as
/// elected and everyone else on that list as not elected.
pub fn elect_candidates(party: &mut Party, constituency_id: ConstituencyId, seats: u32) {
    let mut order: Vec<(u32, u64, usize)> = party
        .candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| c.constituency_id == constituency_id)
        .map(|(i, c)| (c.list_position, c.id, i))
        .collect();
    order.sort();
    for (rank, &(_, _, i)) in order.iter().enumerate() {
        party.candidates[i].elected = (rank as u32) < seats;
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::model::{Candidate, Ideology, Language};

    fn seats_of(result: &BTreeMap<PartyId, u32>, ids: &[PartyId]) -> Vec<u32> {
        ids.iter().map(|id| result[id]).collect()
    }

    #[test]
    fn textbook_three_party_split() {
        let result = allocate(&[(1, 50.0), (2, 30.0), (3, 20.0)], 10, 5.0);
        assert_eq!(seats_of(&result, &[1, 2, 3]), vec![5, 3, 2]);
    }

    #[test]
    fn below_threshold_gets_nothing() {
        let result = allocate(&[(1, 60.0), (2, 36.0), (3, 4.0)], 20, 5.0);
        assert_eq!(result[&3], 0);
        assert_eq!(result[&1] + result[&2], 20);
    }

    #[test]
    fn threshold_uses_constituency_total() {
        // Raw shares sum to 50, so party 3's 3 points are 6% of the vote.
        let result = allocate(&[(1, 30.0), (2, 17.0), (3, 3.0)], 40, 5.0);
        assert!(result[&3] > 0);
    }

    #[test]
    fn exact_tie_goes_to_first_in_order() {
        let result = allocate(&[(7, 50.0), (3, 50.0)], 1, 5.0);
        assert_eq!(result[&7], 1);
        assert_eq!(result[&3], 0);

        let result = allocate(&[(3, 50.0), (7, 50.0)], 1, 5.0);
        assert_eq!(result[&3], 1);
    }

    #[test]
    fn nobody_over_the_threshold_leaves_the_seats_empty() {
        let result = allocate(&[(1, 35.0), (2, 35.0), (3, 30.0)], 10, 40.0);
        assert_eq!(seats_of(&result, &[1, 2, 3]), vec![0, 0, 0]);
        assert_eq!(result.values().sum::<u32>(), 0);
    }

    #[test]
    fn empty_or_zero_snapshot_hands_out_nothing() {
        assert!(allocate(&[], 5, 5.0).is_empty());
        let result = allocate(&[(1, 0.0), (2, 0.0)], 5, 5.0);
        assert_eq!(seats_of(&result, &[1, 2]), vec![0, 0]);
    }

    #[test]
    fn seats_always_sum_to_total() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..200 {
            let n = rng.random_range(2..8);
            let snapshot: Vec<(PartyId, f64)> = (0..n)
                .map(|i| (i as PartyId, rng.random_range(5.0..40.0)))
                .collect();
            let total_seats = rng.random_range(1..30);
            let result = allocate(&snapshot, total_seats, 0.0);
            assert_eq!(result.values().sum::<u32>(), total_seats);
        }
    }

    #[test]
    fn raising_a_share_never_costs_seats() {
        let mut rng = SmallRng::seed_from_u64(23);
        for _ in 0..100 {
            let others: Vec<f64> = (0..4).map(|_| rng.random_range(1.0..30.0)).collect();
            let total_seats = rng.random_range(3..25);
            let mut previous = 0;
            for step in 0..20 {
                let ours = 2.0 + step as f64 * 3.0;
                let mut snapshot = vec![(0, ours)];
                snapshot.extend(others.iter().enumerate().map(|(i, &s)| (i as PartyId + 1, s)));
                let seats = allocate(&snapshot, total_seats, 5.0)[&0];
                assert!(seats >= previous, "share {ours}: {seats} < {previous}");
                previous = seats;
            }
        }
    }

    #[test]
    fn same_snapshot_same_result() {
        let snapshot = [(1, 33.3), (2, 33.3), (3, 33.4)];
        assert_eq!(allocate(&snapshot, 7, 5.0), allocate(&snapshot, 7, 5.0));
    }

    #[test]
    fn elect_candidates_follows_list_order() {
        let candidate = |id: u64, constituency_id: u64, list_position: u32| Candidate {
            id,
            name: format!("C{id}"),
            constituency_id,
            list_position,
            language: Language::French,
            charisma: 5.0,
            expertise: 5.0,
            elected: true,
        };
        let mut party = Party {
            id: 1,
            name: "PS".to_string(),
            color: "#ff0000".to_string(),
            language: Language::French,
            ideology: Ideology::new(-6.0, -2.0),
            stances: Vec::new(),
            is_extremist: false,
            negotiation_threshold: 30.0,
            constituency_polling: BTreeMap::new(),
            constituency_seats: BTreeMap::new(),
            total_seats: 0,
            candidates: vec![
                candidate(10, 1, 3),
                candidate(11, 1, 1),
                candidate(12, 1, 2),
                candidate(13, 2, 1),
            ],
            campaign: Default::default(),
            campaign_funds: 0.0,
            is_player: false,
        };

        elect_candidates(&mut party, 1, 2);

        let elected: Vec<u64> = party.elected_candidates().map(|c| c.id).collect();
        // Candidate 13 sits on another constituency's list and is left alone.
        assert_eq!(elected, vec![11, 12, 13]);
    }
}
