// ============================================================================
// Module : storage
// ============================================================================
// Port de persistance clé → valeur JSON (équivalent du localStorage)
//
// CONCEPTS RUST :
// 1. Trait objet (dyn KeyValueStore) : le même code de slice fonctionne
//    avec un stockage mémoire (tests) ou fichier (application)
// 2. Send + Sync : le store est partagé entre le thread UI et le worker
// 3. Génériques avec bornes de trait : load_json<T: DeserializeOwned>
// ============================================================================

pub mod file;    // Un fichier JSON par clé
pub mod memory;  // HashMap protégée par un Mutex

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Clé de la watchlist : tableau d'ids de coins
pub const WATCHLIST_KEY: &str = "user_watchlist";

/// Clé du portfolio : tableau de {id, coinId, amount, avgBuyPrice}
pub const PORTFOLIO_KEY: &str = "user_portfolio";

/// Clé des settings : l'objet complet
pub const SETTINGS_KEY: &str = "user_settings";

/// Clé de la session : {id, email, name, avatar} ou absente
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Stockage durable clé → chaîne
///
/// Les écritures sont synchrones : quand set_raw retourne Ok, la valeur
/// est relisible immédiatement.
pub trait KeyValueStore: Send + Sync {
    /// Lit la valeur brute (None si la clé est absente)
    fn get_raw(&self, key: &str) -> Result<Option<String>>;

    /// Écrit (ou remplace) la valeur brute
    fn set_raw(&self, key: &str, value: &str) -> Result<()>;

    /// Supprime la clé (aucune erreur si elle est absente)
    fn remove(&self, key: &str) -> Result<()>;
}

/// Lit et désérialise une valeur JSON
///
/// # Retourne
/// * `Ok(None)` - clé absente
/// * `Err(_)` - lecture impossible ou JSON incompatible avec T
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = store.get_raw(key)? else {
        return Ok(None);
    };

    let value = serde_json::from_str(&raw)
        .with_context(|| format!("Contenu invalide pour la clé '{}'", key))?;
    Ok(Some(value))
}

/// Sérialise et écrit une valeur JSON
pub fn save_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)
        .with_context(|| format!("Échec de la sérialisation de '{}'", key))?;
    store.set_raw(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_helpers() {
        let store = MemoryStore::new();

        let missing: Option<Vec<String>> = load_json(&store, WATCHLIST_KEY).unwrap();
        assert!(missing.is_none());

        let ids = vec!["bitcoin".to_string(), "solana".to_string()];
        save_json(&store, WATCHLIST_KEY, &ids).unwrap();

        assert_eq!(
            store.get_raw(WATCHLIST_KEY).unwrap().as_deref(),
            Some(r#"["bitcoin","solana"]"#)
        );
        let loaded: Option<Vec<String>> = load_json(&store, WATCHLIST_KEY).unwrap();
        assert_eq!(loaded, Some(ids));
    }

    #[test]
    fn test_incompatible_json_is_an_error() {
        let store = MemoryStore::new();
        store.set_raw(WATCHLIST_KEY, "{not json").unwrap();

        let result: Result<Option<Vec<String>>> = load_json(&store, WATCHLIST_KEY);
        assert!(result.is_err());
    }
}
