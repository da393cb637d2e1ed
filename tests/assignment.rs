#![forbid(unsafe_code)]
use rand::rngs::StdRng;
use rand::SeedableRng;
use secret_santa::{
    assign, AssignError, AssignOptions, AssignmentEngine, Participant, ParticipantId, Registry,
    Strategy,
};
use std::collections::HashSet;

fn registry(names: &[&str]) -> Registry {
    Registry::new(
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Participant::new(*n, format!("+1555000{i:04}")))
            .collect(),
    )
}

fn options(strategy: Strategy) -> AssignOptions {
    AssignOptions {
        strategy,
        ..AssignOptions::default()
    }
}

const STRATEGIES: [Strategy; 3] = [Strategy::Permutation, Strategy::Cycle, Strategy::Greedy];

#[test]
fn nobody_draws_themselves_and_everyone_is_drawn_once() {
    for strategy in STRATEGIES {
        for size in 2..12usize {
            let names: Vec<String> = (0..size).map(|i| format!("P{i}")).collect();
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            let reg = registry(&names);
            for seed in 0..20u64 {
                let mut engine = AssignmentEngine::seeded(seed, options(strategy));
                let assignment = engine.assign(&reg).unwrap();
                assert_eq!(assignment.len(), size);
                assert!(assignment.is_derangement());

                let mut receivers = HashSet::new();
                for (giver, receiver) in assignment.pairs() {
                    assert_ne!(giver.id, receiver.id, "{strategy}: self assignment");
                    assert!(receivers.insert(receiver.id.clone()), "{strategy}: drawn twice");
                }
                let all: HashSet<ParticipantId> =
                    reg.participants().iter().map(|p| p.id.clone()).collect();
                assert_eq!(receivers, all);
            }
        }
    }
}

#[test]
fn two_participants_swap() {
    let reg = registry(&["Alice", "Bob"]);
    for strategy in STRATEGIES {
        for seed in 0..10u64 {
            let mut engine = AssignmentEngine::seeded(seed, options(strategy));
            let assignment = engine.assign(&reg).unwrap();
            assert_eq!(assignment.receiver_of(0).unwrap().display_name, "Bob");
            assert_eq!(assignment.receiver_of(1).unwrap().display_name, "Alice");
        }
    }
}

#[test]
fn single_participant_is_rejected() {
    let reg = registry(&["Alice"]);
    let mut rng = StdRng::seed_from_u64(1);
    let err = assign(&reg, &mut rng).unwrap_err();
    assert_eq!(err, AssignError::InsufficientParticipants { count: 1 });

    let empty = Registry::default();
    let err = assign(&empty, &mut rng).unwrap_err();
    assert_eq!(err, AssignError::InsufficientParticipants { count: 0 });
}

#[test]
fn same_seed_same_assignment() {
    let reg = registry(&["Alice", "Bob", "Carol", "Dave", "Eve"]);
    for strategy in STRATEGIES {
        let draw = |seed: u64| -> Vec<usize> {
            let mut engine = AssignmentEngine::seeded(seed, options(strategy));
            let assignment = engine.assign(&reg).unwrap();
            (0..reg.len())
                .map(|i| assignment.receiver_index(i).unwrap())
                .collect()
        };
        assert_eq!(draw(42), draw(42));
        assert_eq!(draw(7), draw(7));
    }
}

#[test]
fn single_greedy_pass_either_succeeds_or_stalls() {
    let reg = registry(&["Alice", "Bob", "Carol"]);
    let opts = AssignOptions {
        strategy: Strategy::Greedy,
        max_attempts: 1,
    };
    let mut stalled = 0;
    for seed in 0..200u64 {
        match AssignmentEngine::seeded(seed, opts).assign(&reg) {
            Ok(assignment) => assert!(assignment.is_derangement()),
            Err(AssignError::AssignmentStalled { attempts }) => {
                assert_eq!(attempts, 1);
                stalled += 1;
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    // Alice -> Bob puis Bob -> Alice laisse Carol seule (probabilité 1/4).
    assert!(stalled > 0);
    assert!(stalled < 200);
}

#[test]
fn greedy_with_retries_recovers_from_dead_ends() {
    let reg = registry(&["Alice", "Bob", "Carol"]);
    for seed in 0..200u64 {
        let assignment = AssignmentEngine::seeded(seed, options(Strategy::Greedy))
            .assign(&reg)
            .unwrap();
        assert!(assignment.is_derangement());
    }
}

#[test]
fn duplicate_identities_are_never_paired() {
    let reg = Registry::new(vec![
        Participant::new("Alice", "+15550001"),
        Participant::new("Alice", "+15550001"),
        Participant::new("Bob", "+15550002"),
        Participant::new("Carol", "+15550003"),
    ]);
    assert_eq!(reg.duplicate_ids().len(), 1);
    for strategy in STRATEGIES {
        for seed in 0..20u64 {
            let assignment = AssignmentEngine::seeded(seed, options(strategy))
                .assign(&reg)
                .unwrap();
            for (giver, receiver) in assignment.pairs() {
                assert_ne!(giver.id, receiver.id);
            }
        }
    }
}

#[test]
fn majority_identity_is_infeasible() {
    let reg = Registry::new(vec![
        Participant::new("Alice", "+15550001"),
        Participant::new("Alice", "+15550001"),
        Participant::new("Bob", "+15550002"),
    ]);
    let err = AssignmentEngine::seeded(0, AssignOptions::default())
        .assign(&reg)
        .unwrap_err();
    assert!(matches!(
        err,
        AssignError::Infeasible {
            count: 2,
            total: 3,
            ..
        }
    ));
}

#[test]
fn receiver_lookup_by_id() {
    let reg = registry(&["Alice", "Bob", "Carol"]);
    let assignment = AssignmentEngine::seeded(3, AssignOptions::default())
        .assign(&reg)
        .unwrap();
    let alice = &reg.participants()[0];
    let by_id = assignment.receiver_of_id(&alice.id).unwrap();
    assert_eq!(Some(by_id), assignment.receiver_of(0));
    assert!(assignment.receiver_of(3).is_none());
}

#[test]
fn identity_is_a_content_hash() {
    let a = Participant::new("Alice", "+15550001");
    let b = Participant::new("Alice", "+15550001");
    let c = Participant::new("Alice", "+15550002");
    assert_eq!(a.id, b.id);
    assert_ne!(a.id, c.id);
    assert_eq!(a.id.as_str().len(), 64);
    assert!(a.id.as_str().chars().all(|ch| ch.is_ascii_hexdigit()));
}

#[test]
fn strategy_parses_from_cli_names() {
    assert_eq!("permutation".parse::<Strategy>().unwrap(), Strategy::Permutation);
    assert_eq!("Cycle".parse::<Strategy>().unwrap(), Strategy::Cycle);
    assert_eq!("greedy".parse::<Strategy>().unwrap(), Strategy::Greedy);
    assert!("round-robin".parse::<Strategy>().is_err());
}

#[test]
fn half_duplicated_registry_always_gets_an_assignment() {
    // deux identités, cinq fois chacune : 1 permutation valide sur 252
    let mut people = Vec::new();
    for _ in 0..5 {
        people.push(Participant::new("Alice", "+15550001"));
        people.push(Participant::new("Bob", "+15550002"));
    }
    let reg = Registry::new(people);
    for strategy in [Strategy::Permutation, Strategy::Cycle] {
        let opts = AssignOptions {
            strategy,
            max_attempts: 1,
        };
        for seed in 0..100u64 {
            let assignment = AssignmentEngine::seeded(seed, opts).assign(&reg).unwrap();
            assert!(assignment.is_derangement(), "{strategy} seed {seed}");
            for (giver, receiver) in assignment.pairs() {
                assert_ne!(giver.id, receiver.id);
            }
        }
    }
}

#[test]
fn mixed_duplicates_fall_back_without_stalling() {
    let reg = Registry::new(vec![
        Participant::new("Alice", "+15550001"),
        Participant::new("Alice", "+15550001"),
        Participant::new("Alice", "+15550001"),
        Participant::new("Bob", "+15550002"),
        Participant::new("Bob", "+15550002"),
        Participant::new("Carol", "+15550003"),
    ]);
    for seed in 0..100u64 {
        let opts = AssignOptions {
            strategy: Strategy::Cycle,
            max_attempts: 1,
        };
        let assignment = AssignmentEngine::seeded(seed, opts).assign(&reg).unwrap();
        assert!(assignment.is_derangement());
    }
}

#[test]
fn short_id_never_splits_a_character() {
    let hashed = ParticipantId::derive("Alice", "+15550001");
    assert_eq!(hashed.short(), &hashed.as_str()[..12]);

    // octet 12 au milieu d'un 'é'
    let odd: ParticipantId = serde_json::from_str("\"aéééééé\"").unwrap();
    assert_eq!(odd.short(), "aéééééé");
    let tiny: ParticipantId = serde_json::from_str("\"abc\"").unwrap();
    assert_eq!(tiny.short(), "abc");
}
