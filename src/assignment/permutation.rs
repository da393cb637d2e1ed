use super::util;
use crate::model::Registry;
use rand::seq::SliceRandom;
use rand::Rng;

/// Une tentative : mélange complet des indices, rejeté s'il reste un point fixe.
pub(super) fn attempt<R: Rng>(registry: &Registry, rng: &mut R) -> Option<Vec<usize>> {
    let mut receivers: Vec<usize> = (0..registry.len()).collect();
    receivers.shuffle(rng);
    util::is_derangement(registry, &receivers).then_some(receivers)
}
