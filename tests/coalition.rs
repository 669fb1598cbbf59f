use parliament_sim::config::ElectoralConfig;
use parliament_sim::model::{CoalitionProposal, EventKind, Language, Minister};
use parliament_sim::sim::formation::draft_platform;
use parliament_sim::sim::friction::friction_between;
use parliament_sim::sim::{
    FormationOutcome, GovernmentRejection, form_government, minimal_winning_coalitions, run_election, validate,
};
use parliament_sim::testutil;

#[test]
fn coalition_options_respect_cordon_and_majority() {
    let state = testutil::elected_demo();
    let config = ElectoralConfig::default();
    let options = minimal_winning_coalitions(&state, &config);
    assert!(!options.is_empty());
    for option in &options {
        assert!(option.seats >= config.majority());
        assert!(
            option
                .partners
                .iter()
                .all(|&id| !state.party(id).unwrap().is_extremist)
        );
    }
}

#[test]
fn pairwise_friction_is_symmetric_across_the_demo() {
    let state = testutil::elected_demo();
    for a in &state.parties {
        for b in &state.parties {
            assert_eq!(friction_between(a, b), friction_between(b, a));
        }
    }
}

#[test]
fn well_sweetened_best_option_forms_a_government() {
    let state = testutil::elected_demo();
    let config = ElectoralConfig::default();
    let best = minimal_winning_coalitions(&state, &config).remove(0);

    let mut proposal = CoalitionProposal::new(best.partners.clone());
    proposal.policy_stances = draft_platform(&state, &best.partners);
    for &id in &best.partners {
        proposal.ministries.insert(id, 10);
    }

    let (state, outcome) = form_government(state, &proposal, &config);
    assert_eq!(outcome, FormationOutcome::Formed);
    let government = state.government.as_ref().unwrap();
    assert_eq!(government.partners, best.partners);
    assert_eq!(government.stability, config.baseline_stability);
    assert_eq!(state.log.last().unwrap().kind, EventKind::GovernmentFormed);
}

#[test]
fn extremist_in_proposal_is_named() {
    let state = testutil::elected_demo();
    let config = ElectoralConfig::default();
    let vb = state.parties.iter().find(|p| p.is_extremist).unwrap();
    let everyone: Vec<u64> = state.parties.iter().map(|p| p.id).collect();

    let err = validate(&CoalitionProposal::new(everyone), &state, &config).unwrap_err();
    assert_eq!(
        err,
        GovernmentRejection::ExtremistPartner {
            party_id: vb.id,
            name: vb.name.clone()
        }
    );
    assert!(err.to_string().contains("Vlaams Belang"));
}

#[test]
fn unbalanced_cabinet_is_refused_with_counts() {
    let state = testutil::elected_demo();
    let config = ElectoralConfig::default();
    let best = minimal_winning_coalitions(&state, &config).remove(0);
    let mut proposal = CoalitionProposal::new(best.partners.clone());
    proposal.ministers = (0..3)
        .map(|i| Minister {
            candidate_id: i,
            party_id: best.partners[0],
            portfolio: format!("portfolio {i}"),
            language: Language::Dutch,
        })
        .collect();

    let (_, outcome) = form_government(state, &proposal, &config);
    assert_eq!(
        outcome,
        FormationOutcome::Invalid(GovernmentRejection::CabinetImbalance { dutch: 3, french: 0 })
    );
}

#[test]
fn one_government_per_election_cycle() {
    let state = testutil::elected_demo();
    let config = ElectoralConfig::default();
    let best = minimal_winning_coalitions(&state, &config).remove(0);
    let mut proposal = CoalitionProposal::new(best.partners.clone());
    proposal.policy_stances = draft_platform(&state, &best.partners);
    for &id in &best.partners {
        proposal.ministries.insert(id, 10);
    }

    let (state, outcome) = form_government(state, &proposal, &config);
    assert_eq!(outcome, FormationOutcome::Formed);
    let formed_events = state.log.len();

    let (state, outcome) = form_government(state, &proposal, &config);
    assert_eq!(
        outcome,
        FormationOutcome::AlreadyGoverned {
            partners: best.partners.clone()
        }
    );
    assert_eq!(state.log.len(), formed_events);

    // A fresh election dissolves the government and reopens formation.
    let (state, _) = run_election(state, &config);
    assert!(state.government.is_none());
    let (state, outcome) = form_government(state, &proposal, &config);
    assert_eq!(outcome, FormationOutcome::Formed);
    assert!(state.government.is_some());
}
