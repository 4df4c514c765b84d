// ============================================================================
// Module : store
// ============================================================================
// Store central de l'application, découpé en slices indépendants
//
// CONCEPT : Dispatch / reduce
// - L'état n'est modifié que par dispatch(action)
// - Chaque action est routée vers le slice qui la possède
// - Les lecteurs (UI, ticker) ne voient que des états complets : une
//   action est appliquée entièrement sous le même verrou
// ============================================================================

pub mod auth;       // Session utilisateur
pub mod community;  // Posts et sujets
pub mod crypto;     // Données de marché
pub mod thunks;     // Opérations async (pending → fulfilled/rejected)
pub mod user;       // Watchlist, portfolio, settings

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;

use crate::api::UserService;
use crate::models::{PortfolioSummary, Theme};

pub use auth::{AuthAction, AuthState};
pub use community::{CommunityAction, CommunityState};
pub use crypto::{CryptoAction, CryptoState};
pub use user::{UserAction, UserSlice};

/// Toutes les actions de l'application
#[derive(Debug, Clone)]
pub enum Action {
    Crypto(CryptoAction),
    Auth(AuthAction),
    Community(CommunityAction),
    User(UserAction),
}

impl From<CryptoAction> for Action {
    fn from(action: CryptoAction) -> Self {
        Action::Crypto(action)
    }
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Action::Auth(action)
    }
}

impl From<CommunityAction> for Action {
    fn from(action: CommunityAction) -> Self {
        Action::Community(action)
    }
}

impl From<UserAction> for Action {
    fn from(action: UserAction) -> Self {
        Action::User(action)
    }
}

pub struct Store {
    pub crypto: CryptoState,
    pub auth: AuthState,
    pub community: CommunityState,
    pub user: UserSlice,
}

/// Store partagé entre le thread UI, le worker et le ticker
///
/// CONCEPT RUST : Arc<Mutex<T>>
/// - Arc : plusieurs propriétaires (compteur de références atomique)
/// - Mutex : un seul accès à la fois
/// - Le verrou n'est JAMAIS tenu pendant un .await
pub type SharedStore = Arc<Mutex<Store>>;

impl Store {
    /// Crée le store ; le slice user est initialisé depuis le stockage
    pub fn new(user_service: UserService) -> Self {
        Self {
            crypto: CryptoState::new(),
            auth: AuthState::new(),
            community: CommunityState::default(),
            user: UserSlice::load(user_service),
        }
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    /// Applique une action
    ///
    /// Seules les actions user peuvent échouer (écriture dans le stockage).
    pub fn dispatch(&mut self, action: impl Into<Action>) -> Result<()> {
        match action.into() {
            Action::Crypto(action) => self.crypto.reduce(action),
            Action::Auth(action) => self.auth.reduce(action),
            Action::Community(action) => self.community.reduce(action),
            Action::User(action) => return self.user.reduce(action),
        }
        Ok(())
    }

    /// Valorisation du portfolio aux prix courants
    pub fn portfolio_summary(&self) -> PortfolioSummary {
        crate::models::portfolio::valuate(&self.user.portfolio, &self.crypto.coins)
    }

    pub fn theme(&self) -> Theme {
        self.user.settings.theme
    }
}

/// Message d'erreur d'un rejet, ou `fallback` s'il est vide
pub(crate) fn message_or(error: String, fallback: &str) -> String {
    if error.trim().is_empty() {
        fallback.to_string()
    } else {
        error
    }
}

/// Verrouille le store partagé
///
/// Un panic pendant un reduce ne laisse pas d'état à moitié écrit qui
/// serait pire que l'état précédent : on récupère le guard.
pub fn lock(store: &SharedStore) -> MutexGuard<'_, Store> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use super::*;
    use crate::storage::MemoryStore;

    /// Store vide sur un stockage en mémoire
    pub fn store() -> Store {
        Store::new(UserService::new(Arc::new(MemoryStore::new())))
    }
}
