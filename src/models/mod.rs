// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module public (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod coin;       // Cryptomonnaies et historique des prix
pub mod community;  // Posts et sujets du fil communautaire
pub mod exchange;   // Plateformes d'échange
pub mod market;     // Statistiques globales et highlights
pub mod portfolio;  // Lots du portfolio et valorisation
pub mod status;     // Statut des requêtes asynchrones
pub mod user;       // Session, settings

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use coinboard::models::coin::Coin;
// On peut faire : use coinboard::models::Coin;
pub use coin::{ChangeWindow, Coin, HistoricalPoint};
pub use community::{Author, Post, Topic};
pub use exchange::Exchange;
pub use market::{
    FearAndGreed, GlobalStats, HighlightsPatch, MarketHighlights, StatusMetric, TrendMetric,
};
pub use portfolio::{PortfolioItem, PortfolioSummary, PositionValuation};
pub use status::RequestStatus;
pub use user::{NotificationPreferences, SecuritySettings, SettingsPatch, Theme, User, UserSettings};
