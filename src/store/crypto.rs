// ============================================================================
// Slice : crypto
// ============================================================================
// Snapshot autoritaire des données de marché : coins, détail sélectionné,
// exchanges, statistiques globales, highlights.
//
// CONCEPTS :
// 1. Reducer : toute modification passe par reduce(action)
// 2. Un statut par ressource (idle → loading → succeeded/failed)
// 3. Données périmées mais disponibles : un échec garde les données
//    précédentes et enregistre seulement le message
// ============================================================================

use std::collections::HashMap;

use tracing::{debug, warn};

use super::message_or;
use crate::models::{Coin, Exchange, GlobalStats, HighlightsPatch, MarketHighlights, RequestStatus};

/// Actions du slice crypto
#[derive(Debug, Clone)]
pub enum CryptoAction {
    FetchCoinsPending,
    FetchCoinsFulfilled(Vec<Coin>),
    FetchCoinsRejected(String),

    /// Début du chargement d'un détail (mémorise l'id demandé)
    FetchCoinByIdPending(String),
    /// Résultat d'un détail ; coin = None si l'id est inconnu
    FetchCoinByIdFulfilled { id: String, coin: Option<Coin> },
    FetchCoinByIdRejected { id: String, error: String },
    ClearSelectedCoin,

    FetchExchangesPending,
    FetchExchangesFulfilled(Vec<Exchange>),
    FetchExchangesRejected(String),

    FetchGlobalStatsPending,
    FetchGlobalStatsFulfilled(GlobalStats),
    FetchGlobalStatsRejected(String),

    FetchHighlightsPending,
    FetchHighlightsFulfilled(MarketHighlights),
    FetchHighlightsRejected(String),

    /// Nouveaux prix (map creuse coin id → prix)
    UpdatePrices(HashMap<String, f64>),
    /// Merge superficiel des métriques de highlights
    UpdateHighlights(HighlightsPatch),
}

/// État du slice crypto
#[derive(Debug, Clone, Default)]
pub struct CryptoState {
    /// Coins dans l'ordre du rang (jamais retriés par le ticker)
    pub coins: Vec<Coin>,
    pub status: RequestStatus,

    pub selected_coin: Option<Coin>,
    pub detail_status: RequestStatus,
    /// Id du dernier détail demandé
    pub requested_coin_id: Option<String>,

    pub exchanges: Vec<Exchange>,
    pub exchanges_status: RequestStatus,

    pub global_stats: Option<GlobalStats>,
    pub global_stats_status: RequestStatus,

    pub highlights: Option<MarketHighlights>,
    pub highlights_status: RequestStatus,

    /// Dernier message d'erreur
    pub error: Option<String>,
}

impl CryptoState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applique une action à l'état
    pub fn reduce(&mut self, action: CryptoAction) {
        match action {
            CryptoAction::FetchCoinsPending => {
                self.status = RequestStatus::Loading;
            }
            CryptoAction::FetchCoinsFulfilled(coins) => {
                self.status = RequestStatus::Succeeded;
                self.coins = coins;
            }
            CryptoAction::FetchCoinsRejected(error) => {
                self.status = RequestStatus::Failed;
                self.error = Some(message_or(error, "Failed to fetch coins"));
            }

            CryptoAction::FetchCoinByIdPending(id) => {
                self.detail_status = RequestStatus::Loading;
                self.requested_coin_id = Some(id);
            }
            CryptoAction::FetchCoinByIdFulfilled { id, coin } => {
                if !self.is_current_request(&id) {
                    debug!(coin_id = %id, "Dropping stale coin detail");
                    return;
                }
                self.detail_status = RequestStatus::Succeeded;
                self.selected_coin = coin;
            }
            CryptoAction::FetchCoinByIdRejected { id, error } => {
                if !self.is_current_request(&id) {
                    debug!(coin_id = %id, "Dropping stale coin detail error");
                    return;
                }
                self.detail_status = RequestStatus::Failed;
                self.error = Some(message_or(error, "Failed to fetch coin details"));
            }
            CryptoAction::ClearSelectedCoin => {
                self.selected_coin = None;
                self.detail_status = RequestStatus::Idle;
                self.requested_coin_id = None;
            }

            CryptoAction::FetchExchangesPending => {
                self.exchanges_status = RequestStatus::Loading;
            }
            CryptoAction::FetchExchangesFulfilled(exchanges) => {
                self.exchanges_status = RequestStatus::Succeeded;
                self.exchanges = exchanges;
            }
            CryptoAction::FetchExchangesRejected(error) => {
                self.exchanges_status = RequestStatus::Failed;
                self.error = Some(message_or(error, "Failed to fetch exchanges"));
            }

            CryptoAction::FetchGlobalStatsPending => {
                self.global_stats_status = RequestStatus::Loading;
            }
            CryptoAction::FetchGlobalStatsFulfilled(stats) => {
                self.global_stats_status = RequestStatus::Succeeded;
                self.global_stats = Some(stats);
            }
            CryptoAction::FetchGlobalStatsRejected(error) => {
                self.global_stats_status = RequestStatus::Failed;
                self.error = Some(message_or(error, "Failed to fetch global stats"));
            }

            CryptoAction::FetchHighlightsPending => {
                self.highlights_status = RequestStatus::Loading;
            }
            CryptoAction::FetchHighlightsFulfilled(highlights) => {
                self.highlights_status = RequestStatus::Succeeded;
                self.highlights = Some(highlights);
            }
            CryptoAction::FetchHighlightsRejected(error) => {
                self.highlights_status = RequestStatus::Failed;
                self.error = Some(message_or(error, "Failed to fetch market highlights"));
            }

            CryptoAction::UpdatePrices(prices) => self.update_prices(&prices),
            CryptoAction::UpdateHighlights(patch) => {
                // Sans highlights chargés, il n'y a rien à fusionner
                if let Some(highlights) = self.highlights.as_mut() {
                    highlights.merge(patch);
                }
            }
        }
    }

    fn is_current_request(&self, id: &str) -> bool {
        self.requested_coin_id.as_deref() == Some(id)
    }

    /// Applique la map de prix à la liste et au détail sélectionné
    ///
    /// Les coins absents de la map ne sont pas touchés, l'ordre est conservé.
    fn update_prices(&mut self, prices: &HashMap<String, f64>) {
        for coin in self.coins.iter_mut() {
            if let Some(&price) = prices.get(&coin.id) {
                if !coin.apply_price(price) {
                    warn!(coin_id = %coin.id, price, "Ignoring invalid price update");
                }
            }
        }

        if let Some(selected) = self.selected_coin.as_mut() {
            if let Some(&price) = prices.get(&selected.id) {
                selected.apply_price(price);
            }
        }
    }

    /// Recherche un coin chargé par id
    pub fn coin(&self, id: &str) -> Option<&Coin> {
        self.coins.iter().find(|c| c.id == id)
    }

    /// Recherche un coin par symbole (insensible à la casse)
    pub fn coin_by_symbol(&self, symbol: &str) -> Option<&Coin> {
        self.coins.iter().find(|c| c.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Coins de la watchlist, dans l'ordre du rang
    pub fn watchlist_coins<'a>(&'a self, watchlist: &'a [String]) -> impl Iterator<Item = &'a Coin> + 'a {
        self.coins.iter().filter(move |c| watchlist.contains(&c.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::coin::fixtures::coin;
    use crate::models::market::fixtures::highlights;
    use crate::models::StatusMetric;

    fn loaded() -> CryptoState {
        let mut state = CryptoState::new();
        state.reduce(CryptoAction::FetchCoinsPending);
        state.reduce(CryptoAction::FetchCoinsFulfilled(vec![
            coin("bitcoin", 1, 64230.50),
            coin("ethereum", 2, 3450.20),
            coin("solana", 3, 145.60),
        ]));
        state
    }

    #[test]
    fn test_fetch_coins_lifecycle() {
        let mut state = CryptoState::new();
        assert_eq!(state.status, RequestStatus::Idle);

        state.reduce(CryptoAction::FetchCoinsPending);
        assert_eq!(state.status, RequestStatus::Loading);

        state.reduce(CryptoAction::FetchCoinsFulfilled(vec![coin("bitcoin", 1, 1.0)]));
        assert_eq!(state.status, RequestStatus::Succeeded);
        assert_eq!(state.coins.len(), 1);
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let mut state = loaded();
        state.reduce(CryptoAction::FetchCoinsPending);
        state.reduce(CryptoAction::FetchCoinsRejected("boom".to_string()));

        assert_eq!(state.status, RequestStatus::Failed);
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert_eq!(state.coins.len(), 3);
    }

    #[test]
    fn test_empty_error_uses_fallback_message() {
        let mut state = CryptoState::new();
        state.reduce(CryptoAction::FetchExchangesRejected(String::new()));
        assert_eq!(state.error.as_deref(), Some("Failed to fetch exchanges"));
    }

    #[test]
    fn test_update_prices_is_sparse_and_keeps_order() {
        let mut state = loaded();
        state.reduce(CryptoAction::FetchCoinByIdPending("ethereum".to_string()));
        state.reduce(CryptoAction::FetchCoinByIdFulfilled {
            id: "ethereum".to_string(),
            coin: Some(coin("ethereum", 2, 3450.20)),
        });

        let prices = HashMap::from([("ethereum".to_string(), 3460.0), ("unknown".to_string(), 5.0)]);
        state.reduce(CryptoAction::UpdatePrices(prices));

        let ids: Vec<_> = state.coins.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["bitcoin", "ethereum", "solana"]);
        assert_eq!(state.coins[0].price, 64230.50);
        assert_eq!(state.coins[1].price, 3460.0);
        assert_eq!(state.coins[2].price, 145.60);
        assert_eq!(state.selected_coin.as_ref().unwrap().price, 3460.0);
    }

    #[test]
    fn test_invalid_prices_are_ignored() {
        let mut state = loaded();
        let prices = HashMap::from([("bitcoin".to_string(), -1.0)]);
        state.reduce(CryptoAction::UpdatePrices(prices));
        assert_eq!(state.coins[0].price, 64230.50);
    }

    #[test]
    fn test_unknown_coin_detail_is_not_an_error() {
        let mut state = loaded();
        state.reduce(CryptoAction::FetchCoinByIdPending("nope".to_string()));
        state.reduce(CryptoAction::FetchCoinByIdFulfilled {
            id: "nope".to_string(),
            coin: None,
        });
        assert_eq!(state.detail_status, RequestStatus::Succeeded);
        assert!(state.selected_coin.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_stale_detail_is_dropped() {
        let mut state = loaded();
        state.reduce(CryptoAction::FetchCoinByIdPending("bitcoin".to_string()));
        state.reduce(CryptoAction::FetchCoinByIdPending("solana".to_string()));

        // La réponse pour bitcoin arrive après la demande pour solana
        state.reduce(CryptoAction::FetchCoinByIdFulfilled {
            id: "bitcoin".to_string(),
            coin: Some(coin("bitcoin", 1, 1.0)),
        });
        assert!(state.selected_coin.is_none());
        assert_eq!(state.detail_status, RequestStatus::Loading);

        // Et après un clear, plus rien n'est accepté
        state.reduce(CryptoAction::ClearSelectedCoin);
        state.reduce(CryptoAction::FetchCoinByIdFulfilled {
            id: "solana".to_string(),
            coin: Some(coin("solana", 3, 1.0)),
        });
        assert!(state.selected_coin.is_none());
        assert_eq!(state.detail_status, RequestStatus::Idle);
    }

    #[test]
    fn test_update_highlights_merges() {
        let mut state = loaded();

        // Sans highlights : no-op
        state.reduce(CryptoAction::UpdateHighlights(HighlightsPatch::default()));
        assert!(state.highlights.is_none());

        state.reduce(CryptoAction::FetchHighlightsFulfilled(highlights()));
        state.reduce(CryptoAction::UpdateHighlights(HighlightsPatch {
            crypto_rsi: Some(StatusMetric {
                value: 51.0,
                status: "Neutral".to_string(),
            }),
            ..Default::default()
        }));

        let h = state.highlights.as_ref().unwrap();
        assert_eq!(h.crypto_rsi.value, 51.0);
        assert_eq!(h.fear_and_greed.value, 25.0);
    }

    #[test]
    fn test_watchlist_coins_in_rank_order() {
        let state = loaded();
        let watchlist = vec!["solana".to_string(), "bitcoin".to_string()];
        let ids: Vec<_> = state.watchlist_coins(&watchlist).map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["bitcoin", "solana"]);
        assert_eq!(state.coin_by_symbol("Ethereum").map(|c| c.rank), Some(2));
    }
}
