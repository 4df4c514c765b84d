// ============================================================================
// Module : market
// ============================================================================
// Métriques agrégées du marché : statistiques globales et "highlights"
// (market cap, indice composite, fear & greed, altcoin season, RSI)
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::HistoricalPoint;

/// Statistiques globales affichées dans le bandeau
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_market_cap: f64,
    pub total_volume_24h: f64,
    pub btc_dominance: f64,
    pub eth_dominance: f64,
    pub active_cryptos: u32,
}

/// Métrique avec variation et historique (market cap, indice)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendMetric {
    pub value: f64,
    pub change: f64,
    pub history: Vec<HistoricalPoint>,
}

/// Indice Fear & Greed (0-100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FearAndGreed {
    pub value: f64,
    pub sentiment: String,
    /// Dernières valeurs journalières
    pub history: Vec<f64>,
}

/// Métrique bornée avec un libellé de statut (altcoin season, RSI)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMetric {
    pub value: f64,
    pub status: String,
}

/// Snapshot des highlights du marché
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketHighlights {
    pub market_cap: TrendMetric,
    pub top_index: TrendMetric,
    pub fear_and_greed: FearAndGreed,
    pub altcoin_season: StatusMetric,
    pub crypto_rsi: StatusMetric,
}

/// Mise à jour partielle des highlights
///
/// CONCEPT : Partial update avec Option
/// - Some(metric) : remplace l'objet entier (merge superficiel)
/// - None : l'objet existant est conservé
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightsPatch {
    pub market_cap: Option<TrendMetric>,
    pub top_index: Option<TrendMetric>,
    pub fear_and_greed: Option<FearAndGreed>,
    pub altcoin_season: Option<StatusMetric>,
    pub crypto_rsi: Option<StatusMetric>,
}

impl MarketHighlights {
    /// Applique un patch : chaque objet présent remplace l'existant
    pub fn merge(&mut self, patch: HighlightsPatch) {
        if let Some(market_cap) = patch.market_cap {
            self.market_cap = market_cap;
        }
        if let Some(top_index) = patch.top_index {
            self.top_index = top_index;
        }
        if let Some(fear_and_greed) = patch.fear_and_greed {
            self.fear_and_greed = fear_and_greed;
        }
        if let Some(altcoin_season) = patch.altcoin_season {
            self.altcoin_season = altcoin_season;
        }
        if let Some(crypto_rsi) = patch.crypto_rsi {
            self.crypto_rsi = crypto_rsi;
        }
    }
}

/// Libellé de sentiment pour une valeur Fear & Greed
pub fn sentiment_label(value: f64) -> &'static str {
    if value < 25.0 {
        "Extreme Fear"
    } else if value < 45.0 {
        "Fear"
    } else if value < 55.0 {
        "Neutral"
    } else if value < 75.0 {
        "Greed"
    } else {
        "Extreme Greed"
    }
}

/// Libellé de statut pour une valeur de RSI
pub fn rsi_status(value: f64) -> &'static str {
    if value < 30.0 {
        "Oversold"
    } else if value > 70.0 {
        "Overbought"
    } else {
        "Neutral"
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn highlights() -> MarketHighlights {
        MarketHighlights {
            market_cap: TrendMetric {
                value: 3_140_000_000_000.0,
                change: -1.34,
                history: Vec::new(),
            },
            top_index: TrendMetric {
                value: 196.22,
                change: -1.42,
                history: Vec::new(),
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
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::highlights;
    use super::*;

    #[test]
    fn test_merge_replaces_only_present_objects() {
        let mut h = highlights();
        let patch = HighlightsPatch {
            crypto_rsi: Some(StatusMetric {
                value: 75.0,
                status: "Overbought".to_string(),
            }),
            ..Default::default()
        };

        h.merge(patch);

        assert_eq!(h.crypto_rsi.value, 75.0);
        assert_eq!(h.top_index.value, 196.22);
        assert_eq!(h.fear_and_greed.value, 25.0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(sentiment_label(10.0), "Extreme Fear");
        assert_eq!(sentiment_label(50.0), "Neutral");
        assert_eq!(sentiment_label(90.0), "Extreme Greed");
        assert_eq!(rsi_status(20.0), "Oversold");
        assert_eq!(rsi_status(48.97), "Neutral");
        assert_eq!(rsi_status(80.0), "Overbought");
    }
}
