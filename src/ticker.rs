// ============================================================================
// Module : ticker
// ============================================================================
// Simulation d'un flux de marché "temps réel" sans source de données
//
// CONCEPTS :
// 1. Fonctions pures : price_updates() et highlights_patch() calculent
//    un résultat à partir de l'état et d'un RNG, sans rien modifier
// 2. Temps virtuel : MarketTicker::advance(durée) fait avancer une
//    horloge interne ; les tests n'attendent jamais le temps réel
// 3. RNG injectable : StdRng::seed_from_u64 dans les tests
//
// Cycle d'un tick :
//   1. 8 coins tirés AVEC remise, chacun perturbé de ±0.5 %
//   2. dispatch(UpdatePrices)
//   3. si des highlights sont chargés : dispatch(UpdateHighlights)
// ============================================================================

use std::collections::HashMap;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::models::market::{rsi_status, sentiment_label};
use crate::models::{Coin, FearAndGreed, HighlightsPatch, MarketHighlights, StatusMetric, TrendMetric};
use crate::store::{lock, CryptoAction, SharedStore, Store};

/// Paramètres de la simulation
#[derive(Debug, Clone, PartialEq)]
pub struct TickerConfig {
    /// Période entre deux ticks
    pub interval: Duration,
    /// Nombre de tirages par tick (avec remise)
    pub coins_per_tick: usize,
    /// Amplitude relative de la perturbation de prix (0.005 = ±0.5 %)
    pub price_volatility: f64,
    pub market_cap_volatility: f64,
    pub index_volatility: f64,
    /// Probabilité par tick que le RSI bouge
    pub rsi_move_chance: f64,
    /// Amplitude absolue d'un mouvement du RSI
    pub rsi_step: f64,
    pub fear_greed_move_chance: f64,
    pub fear_greed_step: f64,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(2000),
            coins_per_tick: 8,
            price_volatility: 0.005,
            market_cap_volatility: 0.001,
            index_volatility: 0.002,
            rsi_move_chance: 0.1,
            rsi_step: 2.0,
            fear_greed_move_chance: 0.1,
            fear_greed_step: 3.0,
        }
    }
}

/// Tirage uniforme dans [-amplitude, +amplitude]
fn jitter<R: Rng>(rng: &mut R, amplitude: f64) -> f64 {
    if amplitude <= 0.0 {
        return 0.0;
    }
    rng.random_range(-amplitude..=amplitude)
}

/// Calcule les nouveaux prix d'un tick (map creuse coin id → prix)
///
/// Tirage avec remise : un coin tiré deux fois reçoit la dernière
/// perturbation, toujours calculée depuis son prix avant le tick.
pub fn price_updates<R: Rng>(coins: &[Coin], config: &TickerConfig, rng: &mut R) -> HashMap<String, f64> {
    let mut updates = HashMap::with_capacity(config.coins_per_tick);
    if coins.is_empty() {
        return updates;
    }

    for _ in 0..config.coins_per_tick {
        let coin = &coins[rng.random_range(0..coins.len())];
        let change = 1.0 + jitter(rng, config.price_volatility);
        updates.insert(coin.id.clone(), coin.price * change);
    }
    updates
}

/// Calcule le patch des quatre métriques animées
pub fn highlights_patch<R: Rng>(highlights: &MarketHighlights, config: &TickerConfig, rng: &mut R) -> HighlightsPatch {
    let market_cap = TrendMetric {
        value: highlights.market_cap.value * (1.0 + jitter(rng, config.market_cap_volatility)),
        ..highlights.market_cap.clone()
    };

    let top_index = TrendMetric {
        value: highlights.top_index.value * (1.0 + jitter(rng, config.index_volatility)),
        ..highlights.top_index.clone()
    };

    let mut rsi = highlights.crypto_rsi.value;
    if rng.random_bool(config.rsi_move_chance) {
        rsi = (rsi + jitter(rng, config.rsi_step)).clamp(0.0, 100.0);
    }

    let mut fear_greed = highlights.fear_and_greed.value;
    if rng.random_bool(config.fear_greed_move_chance) {
        fear_greed = (fear_greed + jitter(rng, config.fear_greed_step)).round().clamp(0.0, 100.0);
    }

    HighlightsPatch {
        market_cap: Some(market_cap),
        top_index: Some(top_index),
        fear_and_greed: Some(FearAndGreed {
            value: fear_greed,
            sentiment: sentiment_label(fear_greed).to_string(),
            history: highlights.fear_and_greed.history.clone(),
        }),
        altcoin_season: None,
        crypto_rsi: Some(StatusMetric {
            value: rsi,
            status: rsi_status(rsi).to_string(),
        }),
    }
}

// ============================================================================
// MarketTicker
// ============================================================================

/// Tâche planifiable qui anime les prix et les highlights
///
/// CONCEPT : Armement
/// - Le ticker n'est armé que tant qu'au moins un coin est chargé
/// - Liste vide → désarmé, le temps accumulé est oublié
/// - Dès que des coins arrivent, il se réarme et repart de zéro
pub struct MarketTicker<R: Rng = StdRng> {
    config: TickerConfig,
    rng: R,
    /// Temps accumulé depuis le dernier tick
    pending: Duration,
    armed: bool,
    ticks: u64,
}

impl MarketTicker<StdRng> {
    /// Ticker avec un RNG initialisé par l'OS
    pub fn new(config: TickerConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }
}

impl<R: Rng> MarketTicker<R> {
    pub fn with_rng(config: TickerConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            pending: Duration::ZERO,
            armed: false,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &TickerConfig {
        &self.config
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Temps restant avant le prochain tick (intervalle complet si désarmé)
    pub fn until_next_tick(&self) -> Duration {
        if self.armed {
            self.config.interval.saturating_sub(self.pending)
        } else {
            self.config.interval
        }
    }

    /// Nombre total de ticks exécutés
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Fait avancer l'horloge virtuelle et exécute les ticks échus
    ///
    /// Retourne le nombre de ticks exécutés pendant cet appel.
    pub fn advance(&mut self, elapsed: Duration, store: &mut Store) -> usize {
        if store.crypto.coins.is_empty() {
            if self.armed {
                debug!("No coins loaded, ticker disarmed");
            }
            self.armed = false;
            self.pending = Duration::ZERO;
            return 0;
        }

        if !self.armed {
            debug!(coins = store.crypto.coins.len(), "Coins available, ticker armed");
            self.armed = true;
            self.pending = Duration::ZERO;
        }

        self.pending += elapsed;
        let mut fired = 0;
        while self.pending >= self.config.interval {
            self.pending -= self.config.interval;
            self.tick(store);
            fired += 1;

            if self.config.interval.is_zero() {
                break;
            }
        }
        fired
    }

    /// Exécute un tick immédiatement
    ///
    /// Prix d'abord, puis highlights, dans deux dispatches successifs.
    /// Sans coin chargé, rien n'est dispatché.
    pub fn tick(&mut self, store: &mut Store) -> bool {
        if store.crypto.coins.is_empty() {
            return false;
        }

        let prices = price_updates(&store.crypto.coins, &self.config, &mut self.rng);
        if let Err(e) = store.dispatch(CryptoAction::UpdatePrices(prices)) {
            warn!(error = ?e, "Price tick rejected");
        }

        let patch = store
            .crypto
            .highlights
            .as_ref()
            .map(|highlights| highlights_patch(highlights, &self.config, &mut self.rng));
        if let Some(patch) = patch {
            if let Err(e) = store.dispatch(CryptoAction::UpdateHighlights(patch)) {
                warn!(error = ?e, "Highlights tick rejected");
            }
        }

        self.ticks += 1;
        true
    }
}

/// Scrutation de la liste des coins tant que le ticker est désarmé
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Boucle du ticker sur le runtime tokio
///
/// CONCEPT RUST : tokio::time::Instant
/// - Le temps réellement écoulé est mesuré et passé à advance()
/// - Désarmé : on scrute toutes les IDLE_POLL sans compter le temps, le
///   premier tick tombe donc un intervalle complet après l'arrivée des coins
/// - Le retard est plafonné à un intervalle : pas de rafale de rattrapage
///   si le runtime a été occupé
/// - Le verrou est pris dans un bloc, relâché avant le prochain .await
pub async fn run_ticker<R: Rng + Send>(store: SharedStore, mut ticker: MarketTicker<R>) {
    let period = ticker.config().interval.max(Duration::from_millis(1));
    info!(interval_ms = period.as_millis() as u64, "Market ticker started");

    let mut last = tokio::time::Instant::now();
    loop {
        let wait = if ticker.is_armed() {
            ticker.until_next_tick().max(Duration::from_millis(1))
        } else {
            IDLE_POLL
        };
        tokio::time::sleep(wait).await;

        let now = tokio::time::Instant::now();
        let elapsed = if ticker.is_armed() { (now - last).min(period) } else { Duration::ZERO };
        last = now;

        {
            let mut state = lock(&store);
            ticker.advance(elapsed, &mut state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::coin::fixtures::coin;
    use crate::models::market::fixtures::highlights;
    use crate::store::fixtures;

    fn seeded(seed: u64) -> MarketTicker<StdRng> {
        MarketTicker::with_rng(TickerConfig::default(), StdRng::seed_from_u64(seed))
    }

    fn store_with(coins: Vec<Coin>) -> Store {
        let mut store = fixtures::store();
        store.dispatch(CryptoAction::FetchCoinsFulfilled(coins)).unwrap();
        store
    }

    fn many_coins() -> Vec<Coin> {
        (1..=35).map(|rank| coin(&format!("coin-{}", rank), rank, 100.0 * rank as f64)).collect()
    }

    #[test]
    fn test_price_updates_stay_within_half_percent() {
        let coins = many_coins();
        let config = TickerConfig::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let updates = price_updates(&coins, &config, &mut rng);
            assert!(!updates.is_empty() && updates.len() <= 8);
            for (id, price) in updates {
                let before = coins.iter().find(|c| c.id == id).unwrap().price;
                assert!(price >= before * 0.995 - 1e-9, "{} fell to {}", id, price);
                assert!(price <= before * 1.005 + 1e-9, "{} rose to {}", id, price);
            }
        }
    }

    #[test]
    fn test_unsampled_coins_are_unchanged() {
        let mut store = store_with(many_coins());
        let before = store.crypto.coins.clone();
        let mut ticker = seeded(42);

        // Même graine : on rejoue le tirage pour connaître les coins touchés
        let sampled = price_updates(&before, &TickerConfig::default(), &mut StdRng::seed_from_u64(42));
        assert!(ticker.tick(&mut store));

        for (old, new) in before.iter().zip(&store.crypto.coins) {
            assert_eq!(old.id, new.id);
            if sampled.contains_key(&old.id) {
                assert_eq!(new.price, sampled[&old.id]);
            } else {
                assert_eq!(new.price, old.price);
            }
        }
    }

    #[test]
    fn test_single_bitcoin_scenario() {
        for seed in 0..50 {
            let mut store = store_with(vec![coin("bitcoin", 1, 64230.50)]);
            seeded(seed).tick(&mut store);

            let price = store.crypto.coins[0].price;
            assert!((63909.35..=64551.65).contains(&price), "seed {}: {}", seed, price);
        }
    }

    #[test]
    fn test_highlights_stay_bounded() {
        let config = TickerConfig {
            rsi_move_chance: 1.0,
            fear_greed_move_chance: 1.0,
            ..TickerConfig::default()
        };
        let mut store = store_with(many_coins());
        let mut start = highlights();
        start.crypto_rsi.value = 99.5;
        start.fear_and_greed.value = 1.0;
        store.dispatch(CryptoAction::FetchHighlightsFulfilled(start)).unwrap();

        let mut ticker = MarketTicker::with_rng(config, StdRng::seed_from_u64(3));
        for _ in 0..2000 {
            ticker.tick(&mut store);
            let h = store.crypto.highlights.as_ref().unwrap();
            assert!((0.0..=100.0).contains(&h.crypto_rsi.value));
            assert!((0.0..=100.0).contains(&h.fear_and_greed.value));
            assert_eq!(h.fear_and_greed.value, h.fear_and_greed.value.round());
            assert_eq!(h.fear_and_greed.sentiment, sentiment_label(h.fear_and_greed.value));
            assert_eq!(h.crypto_rsi.status, rsi_status(h.crypto_rsi.value));
        }
        assert_eq!(ticker.ticks(), 2000);
    }

    #[test]
    fn test_highlights_patch_bounds() {
        let start = highlights();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let patch = highlights_patch(&start, &TickerConfig::default(), &mut rng);
            let cap = patch.market_cap.unwrap().value;
            let index = patch.top_index.unwrap().value;
            assert!((cap / start.market_cap.value - 1.0).abs() <= 0.001 + 1e-12);
            assert!((index / start.top_index.value - 1.0).abs() <= 0.002 + 1e-12);
            assert!(patch.altcoin_season.is_none());
        }
    }

    #[test]
    fn test_no_tick_without_coins() {
        let mut store = fixtures::store();
        store.dispatch(CryptoAction::FetchHighlightsFulfilled(highlights())).unwrap();
        let before = store.crypto.highlights.clone();
        let mut ticker = seeded(1);

        assert_eq!(ticker.advance(Duration::from_secs(60), &mut store), 0);
        assert!(!ticker.is_armed());
        assert_eq!(store.crypto.highlights, before);
        assert!(!ticker.tick(&mut store));
    }

    #[test]
    fn test_virtual_time_and_rearm() {
        let mut store = fixtures::store();
        let mut ticker = seeded(5);

        assert_eq!(ticker.advance(Duration::from_secs(10), &mut store), 0);

        // Les coins arrivent : le temps passé à vide ne compte pas
        store
            .dispatch(CryptoAction::FetchCoinsFulfilled(vec![coin("bitcoin", 1, 64230.50)]))
            .unwrap();
        assert_eq!(ticker.advance(Duration::from_millis(1500), &mut store), 0);
        assert!(ticker.is_armed());
        assert_eq!(ticker.advance(Duration::from_millis(500), &mut store), 1);
        assert_eq!(ticker.advance(Duration::from_millis(4100), &mut store), 2);

        // La liste redevient vide : désarmé
        store.dispatch(CryptoAction::FetchCoinsFulfilled(Vec::new())).unwrap();
        assert_eq!(ticker.advance(Duration::from_secs(5), &mut store), 0);
        assert!(!ticker.is_armed());
        assert_eq!(ticker.ticks(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_ticker_on_paused_clock() {
        let shared = store_with(vec![coin("bitcoin", 1, 64230.50)]).into_shared();
        let handle = tokio::spawn(run_ticker(shared.clone(), seeded(9)));

        tokio::time::sleep(Duration::from_millis(4500)).await;
        handle.abort();

        let price = lock(&shared).crypto.coins[0].price;
        assert_ne!(price, 64230.50);
        assert!(price > 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_ticker_waits_full_interval_after_coins_arrive() {
        let shared = fixtures::store().into_shared();
        let handle = tokio::spawn(run_ticker(shared.clone(), seeded(11)));

        tokio::time::sleep(Duration::from_millis(1900)).await;
        lock(&shared)
            .dispatch(CryptoAction::FetchCoinsFulfilled(vec![coin("bitcoin", 1, 64230.50)]))
            .unwrap();

        // Un intervalle complet doit s'écouler depuis l'arrivée des coins
        tokio::time::sleep(Duration::from_millis(1800)).await;
        assert_eq!(lock(&shared).crypto.coins[0].price, 64230.50);

        tokio::time::sleep(Duration::from_millis(400)).await;
        handle.abort();
        assert_ne!(lock(&shared).crypto.coins[0].price, 64230.50);
    }

    #[test]
    fn test_until_next_tick() {
        let mut store = store_with(vec![coin("bitcoin", 1, 64230.50)]);
        let mut ticker = seeded(3);
        assert_eq!(ticker.until_next_tick(), Duration::from_millis(2000));

        ticker.advance(Duration::from_millis(1200), &mut store);
        assert_eq!(ticker.until_next_tick(), Duration::from_millis(800));
    }
}
