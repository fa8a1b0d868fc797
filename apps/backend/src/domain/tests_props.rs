use proptest::prelude::*;

use crate::domain::test_gens;
use crate::domain::{resolve, MatchState, Outcome, RoundState, Slot};

fn open_round() -> RoundState {
    RoundState {
        id: 1,
        match_id: 1,
        round_no: 1,
        participant_one_id: 1,
        participant_two_id: 2,
        hand_one: Slot::Unplayed,
        hand_two: Slot::Unplayed,
        winner_id: None,
        finished: false,
    }
}

proptest! {
    #![proptest_config(test_gens::proptest_config())]

    /// Swapping the arguments swaps the outcome.
    #[test]
    fn prop_resolve_is_antisymmetric(a in test_gens::hand(), b in test_gens::hand()) {
        prop_assert_eq!(resolve(a, b), resolve(b, a).inverse());
        prop_assert_eq!(resolve(a, b) == Outcome::Draw, a == b);
    }

    /// Whatever arrives, each seat is written at most once, the round finishes
    /// exactly when both seats are filled, and rejected calls change nothing.
    #[test]
    fn prop_round_accepts_one_hand_per_seat(subs in test_gens::submissions()) {
        let mut round = open_round();
        let mut resolutions = 0;

        for (pid, hand) in subs {
            let before = round.clone();
            match round.record_hand(pid, hand) {
                Ok(Some(_)) => resolutions += 1,
                Ok(None) => {}
                Err(_) => prop_assert_eq!(&round, &before),
            }
            if before.hand_one.is_played() {
                prop_assert_eq!(round.hand_one, before.hand_one);
            }
            if before.hand_two.is_played() {
                prop_assert_eq!(round.hand_two, before.hand_two);
            }
            prop_assert_eq!(
                round.finished,
                round.hand_one.is_played() && round.hand_two.is_played()
            );
        }
        prop_assert!(resolutions <= 1);
    }

    /// Exactly N resolutions finish a match of N rounds; scores never
    /// exceed the resolved count and never decrease.
    #[test]
    fn prop_match_finishes_after_exactly_n(
        outcomes in prop::collection::vec(test_gens::outcome(), 1..12)
    ) {
        let total = outcomes.len() as i32;
        let mut m = MatchState {
            id: 1,
            total_rounds: total,
            current_round: 1,
            participant_one_id: 1,
            participant_two_id: 2,
            score_one: 0,
            score_two: 0,
            winner_id: None,
            finished: false,
        };

        for (i, outcome) in outcomes.iter().enumerate() {
            prop_assert!(!m.finished);
            let (s1, s2) = (m.score_one, m.score_two);
            m.apply_resolution(*outcome).unwrap();

            prop_assert!(m.score_one >= s1 && m.score_two >= s2);
            prop_assert!(m.score_one + m.score_two <= m.resolved_rounds());
            prop_assert_eq!(m.current_round, i as i32 + 2);
            prop_assert_eq!(m.finished, m.current_round > m.total_rounds);
        }

        prop_assert!(m.finished);
        let expected_winner = match m.score_one.cmp(&m.score_two) {
            std::cmp::Ordering::Greater => Some(1),
            std::cmp::Ordering::Less => Some(2),
            std::cmp::Ordering::Equal => None,
        };
        prop_assert_eq!(m.winner_id, expected_winner);
    }
}
