// ============================================================================
// Structure : Coin
// ============================================================================
// Représente une cryptomonnaie listée sur le tableau des marchés
//
// CONCEPTS RUST :
// 1. #[serde(rename_all = "camelCase")] : les champs Rust en snake_case sont
//    (dé)sérialisés en camelCase, comme les données d'origine
// 2. NaiveDate : date sans timezone (l'historique est journalier)
//
// Seul le champ `price` évolue après la création (via le ticker).
// Market cap, volume et variations sont des champs d'affichage figés.
// ============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Un point de l'historique des prix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    /// Jour du point (format ISO "2024-05-01" en JSON)
    pub date: NaiveDate,
    pub price: f64,
}

/// Fenêtre de variation affichée dans le tableau
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeWindow {
    OneHour,
    OneDay,
    SevenDays,
}

impl ChangeWindow {
    pub fn label(&self) -> &'static str {
        match self {
            ChangeWindow::OneHour => "1h",
            ChangeWindow::OneDay => "24h",
            ChangeWindow::SevenDays => "7d",
        }
    }
}

/// Cryptomonnaie avec ses métriques de marché
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    /// Identifiant stable (ex: "bitcoin")
    pub id: String,

    /// Rang statique (issu des données de départ, jamais recalculé)
    pub rank: u32,

    pub name: String,

    /// Symbole (ex: "BTC")
    pub symbol: String,

    /// Prix courant en USD, toujours > 0
    pub price: f64,

    pub market_cap: f64,
    pub volume_24h: f64,
    pub circulating_supply: f64,

    pub percent_change_1h: f64,
    pub percent_change_24h: f64,
    pub percent_change_7d: f64,

    /// Historique journalier, de longueur fixe
    pub history: Vec<HistoricalPoint>,

    /// URL du logo
    pub image: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Catégories (DeFi, Meme, Layer 1, ...)
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Coin {
    /// Remplace le prix courant
    ///
    /// CONCEPT : Invariant protégé par la méthode
    /// - Un prix non fini ou <= 0 est refusé (retourne false)
    /// - Le prix précédent reste en place dans ce cas
    pub fn apply_price(&mut self, price: f64) -> bool {
        if price.is_finite() && price > 0.0 {
            self.price = price;
            true
        } else {
            false
        }
    }

    /// Variation en pourcentage pour une fenêtre donnée
    pub fn percent_change(&self, window: ChangeWindow) -> f64 {
        match window {
            ChangeWindow::OneHour => self.percent_change_1h,
            ChangeWindow::OneDay => self.percent_change_24h,
            ChangeWindow::SevenDays => self.percent_change_7d,
        }
    }

    /// Convertit une quantité de coin en USD au prix courant
    pub fn to_usd(&self, amount: f64) -> f64 {
        amount * self.price
    }

    /// Convertit un montant USD en quantité de coin
    ///
    /// Le prix étant toujours > 0, la division est sûre.
    pub fn from_usd(&self, usd: f64) -> f64 {
        usd / self.price
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Coin minimal pour les tests (pas d'historique)
    pub fn coin(id: &str, rank: u32, price: f64) -> Coin {
        Coin {
            id: id.to_string(),
            rank,
            name: id.to_string(),
            symbol: id.to_uppercase(),
            price,
            market_cap: price * 1_000_000.0,
            volume_24h: price * 50_000.0,
            circulating_supply: 1_000_000.0,
            percent_change_1h: 0.1,
            percent_change_24h: -1.2,
            percent_change_7d: 4.5,
            history: Vec::new(),
            image: String::new(),
            description: None,
            tags: vec!["PoS".to_string()],
        }
    }
}
