// ============================================================================
// Module : portfolio
// ============================================================================
// Lignes du portfolio et valorisation
//
// CONCEPT : Donnée stockée vs donnée dérivée
// - PortfolioItem est stocké (quantité + prix d'achat moyen)
// - La valorisation est recalculée à chaque affichage depuis Coin.price,
//   elle n'est jamais persistée
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::Coin;

/// Une ligne (un "lot") du portfolio
///
/// L'id est généré côté client : un utilisateur peut détenir plusieurs
/// lots du même coin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub id: String,
    pub coin_id: String,
    pub amount: f64,
    pub avg_buy_price: f64,
}

impl PortfolioItem {
    /// Crée un lot avec un identifiant unique (uuid v4)
    pub fn new(coin_id: impl Into<String>, amount: f64, avg_buy_price: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            coin_id: coin_id.into(),
            amount,
            avg_buy_price,
        }
    }

    pub fn cost_basis(&self) -> f64 {
        self.amount * self.avg_buy_price
    }
}

/// Valorisation d'un lot au prix courant
#[derive(Debug, Clone, PartialEq)]
pub struct PositionValuation {
    pub item: PortfolioItem,
    /// Nom/symbole du coin si connu
    pub coin_name: Option<String>,
    pub coin_symbol: Option<String>,
    pub current_price: f64,
    pub current_value: f64,
    pub profit: f64,
    pub profit_percent: f64,
}

/// Totaux du portfolio
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortfolioSummary {
    pub positions: Vec<PositionValuation>,
    pub total_balance: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    pub total_profit_percent: f64,
}

fn percent_of(gain: f64, base: f64) -> f64 {
    if base > 0.0 {
        gain / base * 100.0
    } else {
        0.0
    }
}

/// Valorise le portfolio à partir des prix courants
///
/// Un lot dont le coin n'est pas (encore) chargé est valorisé à 0.
pub fn valuate(portfolio: &[PortfolioItem], coins: &[Coin]) -> PortfolioSummary {
    let mut summary = PortfolioSummary::default();

    for item in portfolio {
        let coin = coins.iter().find(|c| c.id == item.coin_id);
        let current_price = coin.map(|c| c.price).unwrap_or(0.0);
        let current_value = current_price * item.amount;
        let cost = item.cost_basis();

        summary.total_balance += current_value;
        summary.total_cost += cost;

        summary.positions.push(PositionValuation {
            item: item.clone(),
            coin_name: coin.map(|c| c.name.clone()),
            coin_symbol: coin.map(|c| c.symbol.clone()),
            current_price,
            current_value,
            profit: current_value - cost,
            profit_percent: percent_of(current_value - cost, cost),
        });
    }

    summary.total_profit = summary.total_balance - summary.total_cost;
    summary.total_profit_percent = percent_of(summary.total_profit, summary.total_cost);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::coin::fixtures::coin;

    #[test]
    fn test_new_items_get_distinct_ids() {
        let a = PortfolioItem::new("bitcoin", 1.0, 100.0);
        let b = PortfolioItem::new("bitcoin", 1.0, 100.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_valuate() {
        let coins = vec![coin("bitcoin", 1, 60000.0), coin("ethereum", 2, 3000.0)];
        let portfolio = vec![
            PortfolioItem {
                id: "1".to_string(),
                coin_id: "bitcoin".to_string(),
                amount: 0.5,
                avg_buy_price: 55000.0,
            },
            PortfolioItem {
                id: "2".to_string(),
                coin_id: "ethereum".to_string(),
                amount: 5.0,
                avg_buy_price: 2800.0,
            },
        ];

        let summary = valuate(&portfolio, &coins);

        assert_eq!(summary.positions.len(), 2);
        assert_eq!(summary.total_balance, 30000.0 + 15000.0);
        assert_eq!(summary.total_cost, 27500.0 + 14000.0);
        assert_eq!(summary.total_profit, 3500.0);
        assert!((summary.positions[0].profit_percent - 9.0909).abs() < 1e-3);
    }

    #[test]
    fn test_unknown_coin_is_valued_at_zero() {
        let portfolio = vec![PortfolioItem::new("ghost", 3.0, 10.0)];
        let summary = valuate(&portfolio, &[]);

        assert_eq!(summary.total_balance, 0.0);
        assert_eq!(summary.total_profit, -30.0);
        assert_eq!(summary.positions[0].coin_name, None);
    }

    #[test]
    fn test_zero_cost_gives_zero_percent() {
        let coins = vec![coin("airdrop", 1, 5.0)];
        let portfolio = vec![PortfolioItem::new("airdrop", 10.0, 0.0)];
        let summary = valuate(&portfolio, &coins);
        assert_eq!(summary.total_profit_percent, 0.0);
    }

    #[test]
    fn test_storage_shape() {
        let item = PortfolioItem {
            id: "1".to_string(),
            coin_id: "bitcoin".to_string(),
            amount: 0.5,
            avg_buy_price: 55000.0,
        };
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(
            json,
            r#"{"id":"1","coinId":"bitcoin","amount":0.5,"avgBuyPrice":55000.0}"#
        );
    }
}
