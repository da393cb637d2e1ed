use crate::model::ParticipantId;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Stratégie de tirage utilisée par une tentative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Permutation uniforme, rejetée tant qu'elle a un point fixe.
    #[default]
    Permutation,
    /// Cycle unique (Sattolo) passant par tous les participants.
    Cycle,
    /// Tirage séquentiel glouton : un receveur aléatoire par participant.
    Greedy,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Permutation => "permutation",
            Strategy::Cycle => "cycle",
            Strategy::Greedy => "greedy",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permutation" | "shuffle" => Ok(Strategy::Permutation),
            "cycle" | "sattolo" => Ok(Strategy::Cycle),
            "greedy" => Ok(Strategy::Greedy),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

/// Options de tirage
#[derive(Debug, Clone, Copy)]
pub struct AssignOptions {
    pub strategy: Strategy,
    /// Nombre maximal de tentatives complètes avant abandon (0 est traité comme 1).
    pub max_attempts: u32,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Permutation,
            max_attempts: 1000,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    #[error("at least 2 participants are required, got {count}")]
    InsufficientParticipants { count: usize },
    #[error("identity {id} is shared by {count} of {total} participants, no assignment can avoid self pairing")]
    Infeasible {
        id: ParticipantId,
        count: usize,
        total: usize,
    },
    #[error("assignment stalled: no valid assignment found after {attempts} attempt(s)")]
    AssignmentStalled { attempts: u32 },
}
