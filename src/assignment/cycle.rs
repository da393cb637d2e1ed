use super::util;
use crate::model::Registry;
use rand::Rng;

/// Algorithme de Sattolo : `receivers` décrit un cycle unique de longueur n.
///
/// Aucun indice n'est fixe ; le rejet ne concerne que les identités dupliquées
/// qui se retrouvent appariées.
pub(super) fn attempt<R: Rng>(registry: &Registry, rng: &mut R) -> Option<Vec<usize>> {
    let mut receivers: Vec<usize> = (0..registry.len()).collect();
    let mut i = receivers.len();
    while i > 1 {
        i -= 1;
        let j = rng.gen_range(0..i);
        receivers.swap(i, j);
    }
    util::is_derangement(registry, &receivers).then_some(receivers)
}
