mod balanced;
mod cycle;
mod greedy;
mod permutation;
mod types;
mod util;

pub use types::{AssignError, AssignOptions, Strategy};

use crate::model::{Participant, ParticipantId, Registry};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Résultat d'un tirage : pour chaque donneur (ordre du registre), l'indice
/// de son receveur. N'existe qu'en mémoire le temps d'une exécution.
#[derive(Debug, Clone)]
pub struct Assignment<'r> {
    registry: &'r Registry,
    receivers: Vec<usize>,
}

impl<'r> Assignment<'r> {
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }
    pub fn len(&self) -> usize {
        self.receivers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }
    pub fn receiver_index(&self, giver: usize) -> Option<usize> {
        self.receivers.get(giver).copied()
    }
    pub fn receiver_of(&self, giver: usize) -> Option<&'r Participant> {
        let registry = self.registry;
        self.receiver_index(giver).and_then(|idx| registry.get(idx))
    }
    /// Receveur du premier donneur portant cet identifiant.
    pub fn receiver_of_id(&self, id: &ParticipantId) -> Option<&'r Participant> {
        let giver = self
            .registry
            .participants()
            .iter()
            .position(|p| &p.id == id)?;
        self.receiver_of(giver)
    }
    /// Couples `(donneur, receveur)` dans l'ordre du registre.
    pub fn pairs(&self) -> impl Iterator<Item = (&'r Participant, &'r Participant)> + '_ {
        let people = self.registry.participants();
        self.receivers
            .iter()
            .enumerate()
            .map(move |(giver, &receiver)| (&people[giver], &people[receiver]))
    }
    pub fn is_derangement(&self) -> bool {
        util::is_derangement(self.registry, &self.receivers)
    }
}

/// Moteur de tirage : possède la source d'aléa et les options.
#[derive(Debug)]
pub struct AssignmentEngine<R = StdRng> {
    rng: R,
    opts: AssignOptions,
}

impl AssignmentEngine<StdRng> {
    /// Tirage reproductible : même graine, même résultat.
    pub fn seeded(seed: u64, opts: AssignOptions) -> Self {
        Self::new(StdRng::seed_from_u64(seed), opts)
    }
    pub fn from_entropy(opts: AssignOptions) -> Self {
        Self::new(StdRng::from_entropy(), opts)
    }
}

impl<R: Rng> AssignmentEngine<R> {
    pub fn new(rng: R, opts: AssignOptions) -> Self {
        Self { rng, opts }
    }

    pub fn options(&self) -> AssignOptions {
        self.opts
    }

    /// Tire un receveur distinct et différent de lui-même pour chaque participant.
    ///
    /// Chaque tentative est complète ; on en enchaîne au plus `max_attempts`.
    /// Ensuite `Permutation` et `Cycle` se rabattent sur une construction
    /// équilibrée qui aboutit toujours ; `Greedy` renvoie
    /// [`AssignError::AssignmentStalled`].
    pub fn assign<'r>(&mut self, registry: &'r Registry) -> Result<Assignment<'r>, AssignError> {
        util::check_feasible(registry)?;

        let attempts = self.opts.max_attempts.max(1);
        for attempt in 1..=attempts {
            let receivers = match self.opts.strategy {
                Strategy::Permutation => permutation::attempt(registry, &mut self.rng),
                Strategy::Cycle => cycle::attempt(registry, &mut self.rng),
                Strategy::Greedy => greedy::attempt(registry, &mut self.rng),
            };
            match receivers {
                Some(receivers) => {
                    debug_assert!(util::is_derangement(registry, &receivers));
                    tracing::debug!(
                        strategy = %self.opts.strategy,
                        attempt,
                        participants = registry.len(),
                        "assignment found"
                    );
                    return Ok(Assignment {
                        registry,
                        receivers,
                    });
                }
                None => {
                    tracing::debug!(strategy = %self.opts.strategy, attempt, "attempt rejected");
                }
            }
        }

        // Identités dupliquées : le rejet peut ne jamais aboutir, on construit.
        if self.opts.strategy != Strategy::Greedy {
            if let Some(receivers) = balanced::attempt(registry, &mut self.rng) {
                debug_assert!(util::is_derangement(registry, &receivers));
                tracing::debug!(
                    strategy = %self.opts.strategy,
                    attempts,
                    "rejection sampling exhausted, balanced construction used"
                );
                return Ok(Assignment {
                    registry,
                    receivers,
                });
            }
        }

        Err(AssignError::AssignmentStalled { attempts })
    }
}

/// Tirage avec les options par défaut et une source d'aléa fournie.
pub fn assign<'r, R: Rng>(registry: &'r Registry, rng: &mut R) -> Result<Assignment<'r>, AssignError> {
    AssignmentEngine::new(rng, AssignOptions::default()).assign(registry)
}
