// ============================================================================
// Slice : user (watchlist / portfolio / settings)
// ============================================================================
// Préférences et avoirs locaux, indépendants de tout compte serveur
//
// CONCEPT : Persister puis valider
// - Chaque action calcule la nouvelle collection complète
// - Elle est écrite dans le stockage AVANT de remplacer l'état en mémoire
// - Si l'écriture échoue, l'état reste inchangé et l'erreur remonte :
//   mémoire et stockage ne divergent jamais
// ============================================================================

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::UserService;
use crate::models::{PortfolioItem, SettingsPatch, UserSettings};

#[derive(Debug, Clone)]
pub enum UserAction {
    /// Ajoute ou retire un coin de la watchlist
    ToggleWatchlist(String),
    AddPortfolioItem(PortfolioItem),
    /// Retire un lot par son id (pas par coin id)
    RemovePortfolioItem(String),
    UpdateSettings(SettingsPatch),
}

/// Slice utilisateur avec son accès au stockage
pub struct UserSlice {
    pub watchlist: Vec<String>,
    pub portfolio: Vec<PortfolioItem>,
    pub settings: UserSettings,
    service: UserService,
}

impl UserSlice {
    /// Initialise depuis le stockage, sinon depuis le snapshot par défaut
    pub fn load(service: UserService) -> Self {
        let mut watchlist = service.get_watchlist();
        dedup_keep_order(&mut watchlist);

        let portfolio = service.get_portfolio();
        let settings = service.get_settings().unwrap_or_default();

        debug!(
            watchlist = watchlist.len(),
            portfolio = portfolio.len(),
            theme = settings.theme.label(),
            "User slice loaded"
        );

        Self {
            watchlist,
            portfolio,
            settings,
            service,
        }
    }

    pub fn reduce(&mut self, action: UserAction) -> Result<()> {
        match action {
            UserAction::ToggleWatchlist(coin_id) => self.toggle_watchlist(&coin_id),
            UserAction::AddPortfolioItem(item) => self.add_portfolio_item(item),
            UserAction::RemovePortfolioItem(id) => self.remove_portfolio_item(&id),
            UserAction::UpdateSettings(patch) => self.update_settings(patch),
        }
    }

    pub fn is_watched(&self, coin_id: &str) -> bool {
        self.watchlist.iter().any(|id| id == coin_id)
    }

    fn toggle_watchlist(&mut self, coin_id: &str) -> Result<()> {
        let next: Vec<String> = if self.is_watched(coin_id) {
            self.watchlist.iter().filter(|id| *id != coin_id).cloned().collect()
        } else {
            let mut next = self.watchlist.clone();
            next.push(coin_id.to_string());
            next
        };

        self.service
            .update_watchlist(&next)
            .context("Échec de la sauvegarde de la watchlist")?;

        info!(coin_id, watched = !self.is_watched(coin_id), "Watchlist toggled");
        self.watchlist = next;
        Ok(())
    }

    fn add_portfolio_item(&mut self, item: PortfolioItem) -> Result<()> {
        let mut next = self.portfolio.clone();
        info!(lot_id = %item.id, coin_id = %item.coin_id, amount = item.amount, "Portfolio lot added");
        next.push(item);

        self.service
            .update_portfolio(&next)
            .context("Échec de la sauvegarde du portfolio")?;
        self.portfolio = next;
        Ok(())
    }

    fn remove_portfolio_item(&mut self, id: &str) -> Result<()> {
        let next: Vec<PortfolioItem> = self.portfolio.iter().filter(|item| item.id != id).cloned().collect();

        self.service
            .update_portfolio(&next)
            .context("Échec de la sauvegarde du portfolio")?;

        info!(lot_id = id, removed = next.len() != self.portfolio.len(), "Portfolio lot removed");
        self.portfolio = next;
        Ok(())
    }

    /// Seul chemin de modification du thème, de la langue, de la devise
    /// et du profil
    fn update_settings(&mut self, patch: SettingsPatch) -> Result<()> {
        let next = self.settings.merged(patch);

        self.service
            .save_settings(&next)
            .context("Échec de la sauvegarde des settings")?;

        info!(theme = next.theme.label(), currency = %next.currency, language = %next.language, "Settings updated");
        self.settings = next;
        Ok(())
    }
}

/// Supprime les doublons en gardant la première occurrence
fn dedup_keep_order(ids: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}
