// ============================================================================
// Module : api
// ============================================================================
// Services mock qui simulent un backend : données générées ou lues depuis
// le stockage local, renvoyées après un délai réseau artificiel.
//
// Ce sont les points de substitution d'un vrai backend : le store ne
// connaît que leurs signatures async.
// ============================================================================

pub mod auth;       // Connexion, inscription, session
pub mod community;  // Posts et sujets tendance
pub mod crypto;     // Coins, exchanges, stats, highlights
pub mod seed;       // Tables de départ et générateurs
pub mod user;       // Watchlist, portfolio, settings (stockage local)

use std::sync::Arc;
use std::time::Duration;

use crate::storage::KeyValueStore;

// Re-export des services
pub use auth::AuthService;
pub use community::CommunityService;
pub use crypto::CryptoService;
pub use user::UserService;

/// Latence artificielle des services mock
///
/// CONCEPT : Délai injectable
/// - factor = 1.0 : délais d'origine (500 ms pour les coins, etc.)
/// - factor = 0.0 : aucun délai (tests)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Latency {
    factor: f64,
}

impl Latency {
    pub fn new(factor: f64) -> Self {
        Self {
            factor: factor.max(0.0),
        }
    }

    /// Réponses immédiates
    pub fn instant() -> Self {
        Self { factor: 0.0 }
    }

    /// Durée effective pour un délai de base en millisecondes
    pub fn scaled(&self, base_ms: u64) -> Duration {
        Duration::from_secs_f64(base_ms as f64 * self.factor / 1000.0)
    }

    /// Attend le délai simulé (sans bloquer le thread)
    pub async fn wait(&self, base_ms: u64) {
        let delay = self.scaled(base_ms);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Ensemble des services consommés par le store
///
/// Clone est peu coûteux : les services partagent leurs données via Arc.
#[derive(Clone)]
pub struct Services {
    pub crypto: CryptoService,
    pub auth: AuthService,
    pub community: CommunityService,
}

impl Services {
    pub fn new(storage: Arc<dyn KeyValueStore>, latency: Latency) -> Self {
        Self {
            crypto: CryptoService::new(latency),
            auth: AuthService::new(storage, latency),
            community: CommunityService::new(latency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_scaling() {
        assert_eq!(Latency::new(1.0).scaled(500), Duration::from_millis(500));
        assert_eq!(Latency::new(0.5).scaled(800), Duration::from_millis(400));
        assert!(Latency::instant().scaled(1000).is_zero());
        assert!(Latency::new(-2.0).scaled(1000).is_zero());
    }
}
