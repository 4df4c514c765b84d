// ============================================================================
// Service : UserService
// ============================================================================
// Lecture/écriture des données utilisateur dans le stockage local
//
// CONCEPT : Valeurs par défaut au premier lancement
// - Clé absente → snapshot par défaut (watchlist et portfolio de démo)
// - Clé illisible (ancien format incompatible) → warning + défaut
//   (on réinitialise, on ne migre pas)
// ============================================================================

use std::sync::Arc;

use anyhow::Result;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::models::{PortfolioItem, UserSettings};
use crate::storage::{self, KeyValueStore, PORTFOLIO_KEY, SETTINGS_KEY, WATCHLIST_KEY};

/// Watchlist de démonstration
pub fn default_watchlist() -> Vec<String> {
    ["bitcoin", "ethereum", "solana"].iter().map(|s| s.to_string()).collect()
}

/// Portfolio de démonstration
pub fn default_portfolio() -> Vec<PortfolioItem> {
    vec![
        PortfolioItem {
            id: "1".to_string(),
            coin_id: "bitcoin".to_string(),
            amount: 0.5,
            avg_buy_price: 55000.0,
        },
        PortfolioItem {
            id: "2".to_string(),
            coin_id: "ethereum".to_string(),
            amount: 5.0,
            avg_buy_price: 2800.0,
        },
    ]
}

#[derive(Clone)]
pub struct UserService {
    storage: Arc<dyn KeyValueStore>,
}

impl UserService {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Lit une clé, ou None si absente ou illisible
    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match storage::load_json(self.storage.as_ref(), key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = ?e, "Discarding unreadable stored value, using defaults");
                None
            }
        }
    }

    pub fn get_watchlist(&self) -> Vec<String> {
        self.read(WATCHLIST_KEY).unwrap_or_else(default_watchlist)
    }

    pub fn update_watchlist(&self, watchlist: &[String]) -> Result<()> {
        storage::save_json(self.storage.as_ref(), WATCHLIST_KEY, watchlist)
    }

    pub fn get_portfolio(&self) -> Vec<PortfolioItem> {
        self.read(PORTFOLIO_KEY).unwrap_or_else(default_portfolio)
    }

    pub fn update_portfolio(&self, portfolio: &[PortfolioItem]) -> Result<()> {
        storage::save_json(self.storage.as_ref(), PORTFOLIO_KEY, portfolio)
    }

    /// Settings stockés (None au premier lancement)
    pub fn get_settings(&self) -> Option<UserSettings> {
        self.read(SETTINGS_KEY)
    }

    pub fn save_settings(&self, settings: &UserSettings) -> Result<()> {
        storage::save_json(self.storage.as_ref(), SETTINGS_KEY, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_defaults_when_empty() {
        let svc = UserService::new(Arc::new(MemoryStore::new()));
        assert_eq!(svc.get_watchlist(), default_watchlist());
        assert_eq!(svc.get_portfolio().len(), 2);
        assert!(svc.get_settings().is_none());
    }

    #[test]
    fn test_stored_values_win() {
        let store = Arc::new(MemoryStore::new());
        let svc = UserService::new(store.clone());

        svc.update_watchlist(&["pepe".to_string()]).unwrap();
        svc.update_portfolio(&[]).unwrap();

        assert_eq!(svc.get_watchlist(), vec!["pepe".to_string()]);
        assert!(svc.get_portfolio().is_empty());
    }

    #[test]
    fn test_incompatible_record_resets_to_default() {
        let store = Arc::new(MemoryStore::new());
        // Ancien schéma : avgBuyPrice renommé, amount en texte
        store
            .set_raw(PORTFOLIO_KEY, r#"[{"id":"1","coinId":"bitcoin","amount":"lots","buyPrice":3}]"#)
            .unwrap();

        let svc = UserService::new(store);
        assert_eq!(svc.get_portfolio(), default_portfolio());
    }
}
