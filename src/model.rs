use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Identifiant fort pour Participant, dérivé du nom et du contact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Empreinte SHA-256 (hex) de `display_name || contact`.
    ///
    /// Deux participants avec le même nom et le même numéro obtiennent le
    /// même identifiant : ils sont alors considérés comme une seule identité.
    pub fn derive(display_name: &str, contact: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(display_name.as_bytes());
        hasher.update(contact.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    /// Préfixe court pour les logs.
    pub fn short(&self) -> &str {
        self.0.get(..12).unwrap_or(&self.0)
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Participant au tirage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
    pub contact: String,
}

impl Participant {
    pub fn new<N: Into<String>, C: Into<String>>(display_name: N, contact: C) -> Self {
        let display_name = display_name.into();
        let contact = contact.into();
        Self {
            id: ParticipantId::derive(&display_name, &contact),
            display_name,
            contact,
        }
    }
}

/// Enregistrement brut tel qu'il apparaît dans le fichier de configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    #[serde(alias = "name", alias = "display_name")]
    pub full_name: String,
    #[serde(alias = "phone", alias = "contact")]
    pub ph_number: String,
}

impl ParticipantRecord {
    pub fn new<N: Into<String>, P: Into<String>>(full_name: N, ph_number: P) -> Self {
        Self {
            full_name: full_name.into(),
            ph_number: ph_number.into(),
        }
    }

    /// Valide les champs (non vides après trim) et construit le participant.
    pub fn into_participant(self) -> Result<Participant, String> {
        let name = self.full_name.trim();
        let number = self.ph_number.trim();
        if name.is_empty() {
            return Err("full_name cannot be empty".to_string());
        }
        if number.is_empty() {
            return Err(format!("ph_number cannot be empty for {name}"));
        }
        Ok(Participant::new(name, number))
    }
}

/// Registre ordonné des participants ; l'ordre est celui des notifications.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    participants: Vec<Participant>,
}

impl Registry {
    pub fn new(participants: Vec<Participant>) -> Self {
        Self { participants }
    }

    /// Construit le registre depuis la configuration, en conservant l'ordre.
    pub fn from_records(records: Vec<ParticipantRecord>) -> anyhow::Result<Self> {
        let mut participants = Vec::with_capacity(records.len());
        for (idx, rec) in records.into_iter().enumerate() {
            let p = rec
                .into_participant()
                .map_err(|e| anyhow::anyhow!("invalid participant #{}: {e}", idx + 1))?;
            participants.push(p);
        }
        let registry = Self::new(participants);
        for (id, count) in registry.duplicate_ids() {
            tracing::warn!(id = id.short(), count, "participants share the same identity");
        }
        Ok(registry)
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }
    pub fn len(&self) -> usize {
        self.participants.len()
    }
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
    pub fn get(&self, index: usize) -> Option<&Participant> {
        self.participants.get(index)
    }
    pub fn find_by_id<'a>(&'a self, id: &ParticipantId) -> Option<&'a Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    /// Identités portées par plusieurs entrées, triées par identifiant.
    pub fn duplicate_ids(&self) -> Vec<(ParticipantId, usize)> {
        let mut out: Vec<(ParticipantId, usize)> = self
            .identity_counts()
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, count)| (id.clone(), count))
            .collect();
        out.sort();
        out
    }

    pub(crate) fn identity_counts(&self) -> HashMap<&ParticipantId, usize> {
        let mut counts = HashMap::new();
        for p in &self.participants {
            *counts.entry(&p.id).or_insert(0) += 1;
        }
        counts
    }
}
