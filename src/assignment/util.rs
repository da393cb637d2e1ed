use super::AssignError;
use crate::model::Registry;

/// Refuse les registres pour lesquels aucun tirage valide n'existe.
pub(super) fn check_feasible(registry: &Registry) -> Result<(), AssignError> {
    let total = registry.len();
    if total < 2 {
        return Err(AssignError::InsufficientParticipants { count: total });
    }
    // Hall : une identité présente plus de n/2 fois ne peut pas être appariée.
    let largest = registry
        .identity_counts()
        .into_iter()
        .max_by_key(|(_, count)| *count);
    if let Some((id, count)) = largest {
        if count * 2 > total {
            return Err(AssignError::Infeasible {
                id: id.clone(),
                count,
                total,
            });
        }
    }
    Ok(())
}

/// `receivers[giver] = receiver` est-il une bijection sans auto-attribution ?
pub(crate) fn is_derangement(registry: &Registry, receivers: &[usize]) -> bool {
    let people = registry.participants();
    if receivers.len() != people.len() {
        return false;
    }
    let mut seen = vec![false; people.len()];
    for (giver, &receiver) in receivers.iter().enumerate() {
        let Some(slot) = seen.get_mut(receiver) else {
            return false;
        };
        if *slot {
            return false;
        }
        *slot = true;
        if people[giver].id == people[receiver].id {
            return false;
        }
    }
    true
}
