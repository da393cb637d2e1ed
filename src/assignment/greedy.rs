use crate::model::Registry;
use rand::Rng;

/// Une passe gloutonne, dans l'ordre du registre.
///
/// Pour chaque donneur, on tire un indice uniforme sur toute la liste et on
/// rejette les candidats déjà choisis ou de même identité. Renvoie `None` quand
/// il ne reste plus aucun candidat acceptable pour un donneur.
pub(super) fn attempt<R: Rng>(registry: &Registry, rng: &mut R) -> Option<Vec<usize>> {
    let people = registry.participants();
    let total = people.len();
    let mut chosen = vec![false; total];
    let mut receivers = Vec::with_capacity(total);

    for giver in people {
        let acceptable = |idx: usize| !chosen[idx] && people[idx].id != giver.id;
        if !(0..total).any(|idx| acceptable(idx)) {
            tracing::debug!(giver = giver.id.short(), "greedy pass stalled");
            return None;
        }
        let idx = loop {
            let idx = rng.gen_range(0..total);
            if acceptable(idx) {
                break idx;
            }
        };
        chosen[idx] = true;
        receivers.push(idx);
    }

    Some(receivers)
}
