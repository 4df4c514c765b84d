// ============================================================================
// Enum : RequestStatus
// ============================================================================
// Cycle de vie d'une requête asynchrone suivie par le store
//
// idle → loading → { succeeded, failed }
//
// CONCEPT RUST : Enum comme state machine
// - Un seul état à la fois, le compilateur force l'exhaustivité des match
// - Copy : l'enum est petit, on le copie au lieu de l'emprunter
// ============================================================================

use serde::{Deserialize, Serialize};

/// État d'une requête (chargement, authentification, reset de mot de passe)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Aucune requête lancée
    #[default]
    Idle,
    /// Requête en cours
    Loading,
    /// Terminée avec succès
    Succeeded,
    /// Terminée en erreur (le message est stocké à côté dans le slice)
    Failed,
}

impl RequestStatus {
    /// Vrai tant que les données ne sont pas arrivées (idle ou loading)
    ///
    /// L'écran des marchés affiche un indicateur de chargement dans ces deux cas.
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Idle | RequestStatus::Loading)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Idle => "idle",
            RequestStatus::Loading => "loading",
            RequestStatus::Succeeded => "succeeded",
            RequestStatus::Failed => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(RequestStatus::default(), RequestStatus::Idle);
        assert!(RequestStatus::Idle.is_pending());
        assert!(RequestStatus::Loading.is_pending());
        assert!(!RequestStatus::Failed.is_pending());
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&RequestStatus::Succeeded).unwrap();
        assert_eq!(json, "\"succeeded\"");
    }
}
