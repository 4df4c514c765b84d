// ============================================================================
// Module : config
// ============================================================================
// Configuration de l'application, par ordre de priorité croissante :
//   1. valeurs par défaut
//   2. fichier coinboard.toml (optionnel, répertoire courant)
//   3. variables d'environnement COINBOARD_* (ex: COINBOARD_PAGE_SIZE,
//      COINBOARD_TICKER__INTERVAL_MS pour les clés imbriquées)
//
// Un fichier .env est chargé au démarrage (dotenvy) avant la lecture.
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::api::Latency;
use crate::storage::FileStore;
use crate::ticker::TickerConfig;

/// Paramètres du ticker exposés à la configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TickerSettings {
    pub interval_ms: u64,
    pub coins_per_tick: usize,
    pub price_volatility: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Répertoire du stockage local (None → répertoire de données du système)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    pub log_dir: PathBuf,
    /// Multiplicateur des délais des services mock
    pub latency_factor: f64,
    /// Nombre de coins par page sur l'écran Markets
    pub page_size: usize,
    pub ticker: TickerSettings,
}

impl AppConfig {
    /// Charge la configuration complète (fichier + environnement)
    pub fn load() -> Result<Self> {
        let builder = Self::defaults()?
            .add_source(File::with_name("coinboard").required(false))
            .add_source(
                Environment::with_prefix("COINBOARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        Self::build(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let defaults = TickerConfig::default();
        let builder = Config::builder()
            .set_default("log_dir", "logs")?
            .set_default("latency_factor", 1.0)?
            .set_default("page_size", 10)?
            .set_default("ticker.interval_ms", defaults.interval.as_millis() as u64)?
            .set_default("ticker.coins_per_tick", defaults.coins_per_tick as u64)?
            .set_default("ticker.price_volatility", defaults.price_volatility)?;
        Ok(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: AppConfig = builder
            .build()
            .context("Impossible de lire la configuration")?
            .try_deserialize()
            .context("Configuration invalide")?;
        config.validate()?;
        Ok(config)
    }

    /// Rejette les valeurs qui rendraient l'application inutilisable
    pub fn validate(&self) -> Result<()> {
        if self.ticker.interval_ms == 0 {
            anyhow::bail!("ticker.interval_ms doit être strictement positif");
        }
        if self.ticker.coins_per_tick == 0 {
            anyhow::bail!("ticker.coins_per_tick doit être strictement positif");
        }
        if !(0.0..1.0).contains(&self.ticker.price_volatility) {
            anyhow::bail!(
                "ticker.price_volatility doit être dans [0, 1) (reçu {})",
                self.ticker.price_volatility
            );
        }
        if !self.latency_factor.is_finite() || self.latency_factor < 0.0 {
            anyhow::bail!("latency_factor doit être positif ou nul (reçu {})", self.latency_factor);
        }
        if self.page_size == 0 {
            anyhow::bail!("page_size doit être strictement positif");
        }
        Ok(())
    }

    /// Répertoire de stockage effectif
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(FileStore::default_dir)
    }

    pub fn latency(&self) -> Latency {
        Latency::new(self.latency_factor)
    }

    pub fn ticker_config(&self) -> TickerConfig {
        TickerConfig {
            interval: Duration::from_millis(self.ticker.interval_ms),
            coins_per_tick: self.ticker.coins_per_tick,
            price_volatility: self.ticker.price_volatility,
            ..TickerConfig::default()
        }
    }

    #[cfg(test)]
    fn from_toml(toml: &str) -> Result<Self> {
        Self::build(Self::defaults()?.add_source(File::from_str(toml, config::FileFormat::Toml)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.latency_factor, 1.0);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert!(config.data_dir.is_none());
        assert_eq!(config.ticker_config(), TickerConfig::default());
        assert_eq!(config.latency(), Latency::default());
    }

    #[test]
    fn test_file_overrides() {
        let config = AppConfig::from_toml(
            r#"
            data_dir = "/tmp/coinboard-test"
            latency_factor = 0.0
            page_size = 25

            [ticker]
            interval_ms = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.resolved_data_dir(), Some(PathBuf::from("/tmp/coinboard-test")));
        assert_eq!(config.page_size, 25);
        assert_eq!(config.latency(), Latency::instant());

        let ticker = config.ticker_config();
        assert_eq!(ticker.interval, Duration::from_millis(500));
        assert_eq!(ticker.coins_per_tick, 8);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for toml in [
            "[ticker]\ninterval_ms = 0",
            "page_size = 0",
            "latency_factor = -1.0",
            "[ticker]\nprice_volatility = 1.5",
        ] {
            assert!(AppConfig::from_toml(toml).is_err(), "accepted: {}", toml);
        }
    }
}
