// ============================================================================
// Service mock : CryptoService
// ============================================================================
// Fournit coins, exchanges, statistiques globales et highlights
//
// Les données sont générées une seule fois à la construction du service
// (comme une "base" en mémoire), puis renvoyées après un délai simulé.
// ============================================================================

use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use rand::Rng;
use tracing::{debug, instrument};

use super::seed::{build_coins, build_exchanges, generate_history};
use super::Latency;
use crate::models::{
    Coin, Exchange, FearAndGreed, GlobalStats, HistoricalPoint, MarketHighlights, StatusMetric,
    TrendMetric,
};

/// Base de données mock (immuable après construction)
#[derive(Debug)]
struct MarketData {
    coins: Vec<Coin>,
    exchanges: Vec<Exchange>,
    market_cap_history: Vec<HistoricalPoint>,
    index_history: Vec<HistoricalPoint>,
}

/// Service de données de marché
#[derive(Debug, Clone)]
pub struct CryptoService {
    data: Arc<MarketData>,
    latency: Latency,
}

impl CryptoService {
    /// Génère les données avec un RNG système
    pub fn new(latency: Latency) -> Self {
        Self::with_rng(latency, Utc::now().date_naive(), &mut rand::rng())
    }

    /// Génère les données avec un RNG et une date fournis (tests déterministes)
    pub fn with_rng<R: Rng>(latency: Latency, today: NaiveDate, rng: &mut R) -> Self {
        let data = MarketData {
            coins: build_coins(today, rng),
            exchanges: build_exchanges(today, rng),
            market_cap_history: generate_history(3_100_000_000_000.0, 20, today, rng),
            index_history: generate_history(200.0, 20, today, rng),
        };
        debug!(coins = data.coins.len(), exchanges = data.exchanges.len(), "Mock market data generated");
        Self {
            data: Arc::new(data),
            latency,
        }
    }

    /// Liste des coins, triée par rang
    #[instrument(skip(self))]
    pub async fn get_coins(&self) -> Result<Vec<Coin>> {
        self.latency.wait(500).await;
        Ok(self.data.coins.clone())
    }

    /// Détail d'un coin (None si l'id est inconnu : ce n'est pas une erreur)
    #[instrument(skip(self))]
    pub async fn get_coin_by_id(&self, id: &str) -> Result<Option<Coin>> {
        self.latency.wait(400).await;
        Ok(self.data.coins.iter().find(|c| c.id == id).cloned())
    }

    #[instrument(skip(self))]
    pub async fn get_exchanges(&self) -> Result<Vec<Exchange>> {
        self.latency.wait(500).await;
        Ok(self.data.exchanges.clone())
    }

    /// Statistiques globales (réponse immédiate)
    #[instrument(skip(self))]
    pub async fn get_global_stats(&self) -> Result<GlobalStats> {
        Ok(GlobalStats {
            total_market_cap: 2_450_000_000_000.0,
            total_volume_24h: 85_000_000_000.0,
            btc_dominance: 52.1,
            eth_dominance: 17.4,
            active_cryptos: 9845,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_market_highlights(&self) -> Result<MarketHighlights> {
        self.latency.wait(500).await;
        Ok(MarketHighlights {
            market_cap: TrendMetric {
                value: 3_140_000_000_000.0,
                change: -1.34,
                history: self.data.market_cap_history.clone(),
            },
            top_index: TrendMetric {
                value: 196.22,
                change: -1.42,
                history: self.data.index_history.clone(),
            },
            fear_and_greed: FearAndGreed {
                value: 25.0,
                sentiment: "Fear".to_string(),
                history: vec![30.0, 28.0, 25.0, 26.0, 25.0],
            },
            altcoin_season: StatusMetric {
                value: 23.0,
                status: "Bitcoin Season".to_string(),
            },
            crypto_rsi: StatusMetric {
                value: 48.97,
                status: "Neutral".to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn service() -> CryptoService {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        CryptoService::with_rng(Latency::instant(), today, &mut StdRng::seed_from_u64(42))
    }

    #[tokio::test]
    async fn test_get_coins_and_detail() {
        let svc = service();
        let coins = svc.get_coins().await.unwrap();
        assert_eq!(coins[0].id, "bitcoin");
        assert_eq!(coins[0].price, 64230.50);

        let eth = svc.get_coin_by_id("ethereum").await.unwrap();
        assert_eq!(eth.map(|c| c.symbol), Some("ETH".to_string()));

        let missing = svc.get_coin_by_id("nope").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_the_same_data() {
        let svc = service();
        let other = svc.clone();
        assert_eq!(svc.get_coins().await.unwrap(), other.get_coins().await.unwrap());
    }

    #[tokio::test]
    async fn test_highlights_snapshot() {
        let h = service().get_market_highlights().await.unwrap();
        assert_eq!(h.fear_and_greed.value, 25.0);
        assert_eq!(h.crypto_rsi.value, 48.97);
        assert_eq!(h.market_cap.history.len(), 21);
    }

    #[tokio::test]
    async fn test_exchanges_and_stats() {
        let svc = service();
        let exchanges = svc.get_exchanges().await.unwrap();
        assert_eq!(exchanges[0].name, "Binance");
        assert_eq!(exchanges[0].history.len(), 8);

        let stats = svc.get_global_stats().await.unwrap();
        assert_eq!(stats.active_cryptos, 9845);
    }
}
