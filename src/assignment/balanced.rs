use crate::model::Registry;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

/// Construction séquentielle qui ne peut pas échouer sur un registre faisable.
///
/// Les participants de même identité forment une classe. À chaque étape il
/// reste `m` donneurs et `m` receveurs ; l'appariement reste possible tant que
/// chaque classe vérifie `donneurs + receveurs <= m`. Un candidat n'est retenu
/// que s'il conserve cette borne, puis on tire uniformément parmi eux.
pub(super) fn attempt<R: Rng>(registry: &Registry, rng: &mut R) -> Option<Vec<usize>> {
    let people = registry.participants();
    let total = people.len();

    let mut classes = HashMap::new();
    let class_of: Vec<usize> = people
        .iter()
        .map(|p| {
            let next = classes.len();
            *classes.entry(&p.id).or_insert(next)
        })
        .collect();

    let mut givers_left = vec![0usize; classes.len()];
    for &c in &class_of {
        givers_left[c] += 1;
    }
    let mut receivers_left = givers_left.clone();
    let mut chosen = vec![false; total];
    let mut receivers = Vec::with_capacity(total);

    for (giver, &gc) in class_of.iter().enumerate() {
        givers_left[gc] -= 1;
        let remaining = total - giver - 1;
        let candidates: Vec<usize> = (0..total)
            .filter(|&r| !chosen[r] && class_of[r] != gc)
            .filter(|&r| {
                let rc = class_of[r];
                (0..givers_left.len()).all(|c| {
                    givers_left[c] + receivers_left[c] - usize::from(c == rc) <= remaining
                })
            })
            .collect();
        let &idx = candidates.choose(rng)?;
        chosen[idx] = true;
        receivers_left[class_of[idx]] -= 1;
        receivers.push(idx);
    }

    Some(receivers)
}
