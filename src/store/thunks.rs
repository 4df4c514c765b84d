// ============================================================================
// Thunks : opérations asynchrones du store
// ============================================================================
// Chaque thunk suit le même schéma :
//   1. dispatch(Pending)               (verrou pris puis relâché)
//   2. appel du service mock           (.await, SANS verrou)
//   3. dispatch(Fulfilled | Rejected)  (verrou pris puis relâché)
//
// CONCEPT RUST : MutexGuard et .await
// - Un std::sync::MutexGuard n'est pas Send : s'il traversait un .await,
//   la future ne pourrait plus être envoyée sur le runtime multi-thread
// - commit() prend le verrou dans une fonction synchrone, ce qui garantit
//   qu'il est relâché avant le prochain .await
//
// Les promesses en vol ne sont pas annulées : un résultat tardif est
// simplement appliqué (ou ignoré par le garde anti-périmé du détail).
// ============================================================================

use tracing::{error, instrument, warn};

use crate::api::Services;
use crate::store::{
    lock, Action, AuthAction, CommunityAction, CryptoAction, SharedStore,
};

/// Applique une action sous le verrou
fn commit(store: &SharedStore, action: impl Into<Action>) {
    if let Err(e) = lock(store).dispatch(action) {
        error!(error = ?e, "Dispatch failed");
    }
}

// ============================================================================
// Crypto
// ============================================================================

#[instrument(skip_all)]
pub async fn fetch_coins(store: &SharedStore, services: &Services) {
    commit(store, CryptoAction::FetchCoinsPending);
    match services.crypto.get_coins().await {
        Ok(coins) => commit(store, CryptoAction::FetchCoinsFulfilled(coins)),
        Err(e) => {
            warn!(error = %e, "fetch_coins rejected");
            commit(store, CryptoAction::FetchCoinsRejected(e.to_string()));
        }
    }
}

#[instrument(skip(store, services))]
pub async fn fetch_coin_by_id(store: &SharedStore, services: &Services, id: &str) {
    commit(store, CryptoAction::FetchCoinByIdPending(id.to_string()));
    match services.crypto.get_coin_by_id(id).await {
        Ok(coin) => commit(
            store,
            CryptoAction::FetchCoinByIdFulfilled {
                id: id.to_string(),
                coin,
            },
        ),
        Err(e) => {
            warn!(error = %e, "fetch_coin_by_id rejected");
            commit(
                store,
                CryptoAction::FetchCoinByIdRejected {
                    id: id.to_string(),
                    error: e.to_string(),
                },
            );
        }
    }
}

#[instrument(skip_all)]
pub async fn fetch_exchanges(store: &SharedStore, services: &Services) {
    commit(store, CryptoAction::FetchExchangesPending);
    match services.crypto.get_exchanges().await {
        Ok(exchanges) => commit(store, CryptoAction::FetchExchangesFulfilled(exchanges)),
        Err(e) => commit(store, CryptoAction::FetchExchangesRejected(e.to_string())),
    }
}

#[instrument(skip_all)]
pub async fn fetch_global_stats(store: &SharedStore, services: &Services) {
    commit(store, CryptoAction::FetchGlobalStatsPending);
    match services.crypto.get_global_stats().await {
        Ok(stats) => commit(store, CryptoAction::FetchGlobalStatsFulfilled(stats)),
        Err(e) => commit(store, CryptoAction::FetchGlobalStatsRejected(e.to_string())),
    }
}

#[instrument(skip_all)]
pub async fn fetch_market_highlights(store: &SharedStore, services: &Services) {
    commit(store, CryptoAction::FetchHighlightsPending);
    match services.crypto.get_market_highlights().await {
        Ok(highlights) => commit(store, CryptoAction::FetchHighlightsFulfilled(highlights)),
        Err(e) => commit(store, CryptoAction::FetchHighlightsRejected(e.to_string())),
    }
}

// ============================================================================
// Auth
// ============================================================================

#[instrument(skip(store, services, password))]
pub async fn login(store: &SharedStore, services: &Services, email: &str, password: &str) {
    commit(store, AuthAction::LoginPending);
    match services.auth.login(email, password).await {
        Ok(user) => commit(store, AuthAction::LoginFulfilled(user)),
        Err(e) => commit(store, AuthAction::LoginRejected(e.to_string())),
    }
}

#[instrument(skip(store, services, password))]
pub async fn register(store: &SharedStore, services: &Services, name: &str, email: &str, password: &str) {
    commit(store, AuthAction::RegisterPending);
    match services.auth.register(name, email, password).await {
        Ok(user) => commit(store, AuthAction::RegisterFulfilled(user)),
        Err(e) => commit(store, AuthAction::RegisterRejected(e.to_string())),
    }
}

#[instrument(skip(store, services))]
pub async fn request_password_reset(store: &SharedStore, services: &Services, email: &str) {
    commit(store, AuthAction::PasswordResetPending);
    match services.auth.request_password_reset(email).await {
        Ok(()) => commit(store, AuthAction::PasswordResetFulfilled),
        Err(e) => commit(store, AuthAction::PasswordResetRejected(e.to_string())),
    }
}

/// Déconnexion : la session locale est toujours effacée
#[instrument(skip_all)]
pub async fn logout(store: &SharedStore, services: &Services) {
    if let Err(e) = services.auth.logout().await {
        warn!(error = ?e, "Stored session could not be removed");
    }
    commit(store, AuthAction::LogoutFulfilled);
}

/// Restaure la session stockée au démarrage
pub fn check_auth(store: &SharedStore, services: &Services) {
    let user = services.auth.current_user();
    commit(store, AuthAction::CheckAuthFulfilled(user));
}

// ============================================================================
// Community
// ============================================================================

#[instrument(skip_all)]
pub async fn fetch_posts(store: &SharedStore, services: &Services) {
    commit(store, CommunityAction::FetchPostsPending);
    match services.community.get_posts().await {
        Ok(posts) => commit(store, CommunityAction::FetchPostsFulfilled(posts)),
        Err(e) => commit(store, CommunityAction::FetchPostsRejected(e.to_string())),
    }
}

/// Sujets tendance (un échec est seulement journalisé)
#[instrument(skip_all)]
pub async fn fetch_trending_topics(store: &SharedStore, services: &Services) {
    match services.community.get_trending_topics().await {
        Ok(topics) => commit(store, CommunityAction::FetchTrendingTopicsFulfilled(topics)),
        Err(e) => warn!(error = %e, "fetch_trending_topics rejected"),
    }
}

/// Chargement initial de l'écran Markets
pub async fn load_market(store: &SharedStore, services: &Services) {
    tokio::join!(
        fetch_coins(store, services),
        fetch_global_stats(store, services),
        fetch_market_highlights(store, services),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::Latency;
    use crate::models::RequestStatus;
    use crate::storage::MemoryStore;
    use crate::store::fixtures;

    fn setup() -> (SharedStore, Services) {
        let services = Services::new(Arc::new(MemoryStore::new()), Latency::instant());
        (fixtures::store().into_shared(), services)
    }

    #[tokio::test]
    async fn test_load_market() {
        let (store, services) = setup();
        load_market(&store, &services).await;

        let state = lock(&store);
        assert_eq!(state.crypto.status, RequestStatus::Succeeded);
        assert_eq!(state.crypto.coins[0].id, "bitcoin");
        assert!(state.crypto.global_stats.is_some());
        assert_eq!(state.crypto.highlights_status, RequestStatus::Succeeded);
    }

    #[tokio::test]
    async fn test_fetch_coin_by_id() {
        let (store, services) = setup();
        fetch_coin_by_id(&store, &services, "ethereum").await;
        {
            let state = lock(&store);
            assert_eq!(state.crypto.detail_status, RequestStatus::Succeeded);
            assert_eq!(state.crypto.selected_coin.as_ref().map(|c| c.symbol.as_str()), Some("ETH"));
        }

        fetch_coin_by_id(&store, &services, "does-not-exist").await;
        let state = lock(&store);
        assert_eq!(state.crypto.detail_status, RequestStatus::Succeeded);
        assert!(state.crypto.selected_coin.is_none());
        assert!(state.crypto.error.is_none());
    }

    #[tokio::test]
    async fn test_login_error_then_success() {
        let (store, services) = setup();

        login(&store, &services, "me@example.com", "error").await;
        {
            let state = lock(&store);
            assert_eq!(state.auth.status, RequestStatus::Failed);
            assert_eq!(state.auth.error.as_deref(), Some("Invalid credentials"));
            assert!(!state.auth.is_authenticated);
        }

        login(&store, &services, "me@example.com", "secret").await;
        let state = lock(&store);
        assert!(state.auth.is_authenticated);
        assert!(state.auth.error.is_none());
        assert_eq!(state.auth.user.as_ref().map(|u| u.email.as_str()), Some("me@example.com"));
    }

    #[tokio::test]
    async fn test_session_restore_and_logout() {
        let (store, services) = setup();

        check_auth(&store, &services);
        assert!(!lock(&store).auth.is_authenticated);

        register(&store, &services, "Ada", "ada@example.com", "pw").await;
        // Un nouveau store sur le même stockage retrouve la session
        let restored = fixtures::store().into_shared();
        check_auth(&restored, &services);
        assert!(lock(&restored).auth.is_authenticated);

        logout(&restored, &services).await;
        assert!(!lock(&restored).auth.is_authenticated);
        assert!(services.auth.current_user().is_none());
    }

    #[tokio::test]
    async fn test_register_and_reset_rejections() {
        let (store, services) = setup();

        register(&store, &services, "Bob", "error@example.com", "pw").await;
        assert_eq!(lock(&store).auth.error.as_deref(), Some("Email already exists"));

        request_password_reset(&store, &services, "not-an-email").await;
        let state = lock(&store);
        assert_eq!(state.auth.password_reset_status, RequestStatus::Failed);
        assert_eq!(state.auth.error.as_deref(), Some("Invalid email address"));
    }

    #[tokio::test]
    async fn test_community_feed() {
        let (store, services) = setup();
        fetch_posts(&store, &services).await;
        fetch_trending_topics(&store, &services).await;

        let state = lock(&store);
        assert_eq!(state.community.status, RequestStatus::Succeeded);
        assert!(!state.community.posts.is_empty());
        assert!(!state.community.trending_topics.is_empty());
    }
}
