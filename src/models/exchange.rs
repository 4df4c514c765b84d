// ============================================================================
// Structure : Exchange
// ============================================================================
// Plateforme d'échange classée sur l'écran "Exchanges"
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::HistoricalPoint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    pub id: String,
    pub rank: u32,
    pub name: String,

    /// Score de confiance (0-10)
    pub score: f64,

    pub volume_24h: f64,
    pub avg_liquidity: f64,
    pub weekly_visits: u64,
    pub markets: u32,
    pub coins: u32,

    /// Devises fiat acceptées (ex: ["USD", "EUR"])
    pub fiat_supported: Vec<String>,

    pub image: String,

    /// Historique du volume sur 7 jours
    pub history: Vec<HistoricalPoint>,
}

impl Exchange {
    /// Liste des devises fiat, séparées par des virgules
    pub fn fiat_list(&self) -> String {
        self.fiat_supported.join(", ")
    }
}
