// ============================================================================
// Données de départ des services mock
// ============================================================================
// Tables statiques (coins, exchanges) hydratées avec des valeurs aléatoires
// réalistes : variations, volume, historique en marche aléatoire
// ============================================================================

use chrono::{Days, NaiveDate};
use rand::Rng;

use crate::models::{Coin, Exchange, HistoricalPoint};

/// Nombre de points journaliers générés avant le point du jour
pub const COIN_HISTORY_POINTS: u64 = 20;

/// (id, nom, symbole, prix, market cap en milliards, id d'image CMC, description)
type CoinSeed = (&'static str, &'static str, &'static str, f64, f64, u32, Option<&'static str>);

const COIN_SEEDS: &[CoinSeed] = &[
    ("bitcoin", "Bitcoin", "BTC", 64230.50, 1264.0, 1, Some("Bitcoin is a decentralized cryptocurrency originally described in a 2008 whitepaper by a person, or group of people, using the alias Satoshi Nakamoto.")),
    ("ethereum", "Ethereum", "ETH", 3450.20, 415.0, 1027, Some("Ethereum is a decentralized open-source blockchain system that features its own cryptocurrency, Ether.")),
    ("tether", "Tether", "USDT", 1.00, 103.0, 825, Some("Tether (USDT) is a stablecoin, a type of cryptocurrency which aims to keep cryptocurrency valuations stable.")),
    ("binance-coin", "BNB", "BNB", 590.10, 87.0, 1839, Some("BNB is the cryptocurrency coin that powers the Binance ecosystem.")),
    ("solana", "Solana", "SOL", 145.60, 65.0, 5426, Some("Solana is a highly functional open source project that banks on blockchain technology's permissionless nature to provide decentralized finance (DeFi) solutions.")),
    ("usdc", "USDC", "USDC", 1.00, 32.0, 3408, None),
    ("xrp", "XRP", "XRP", 0.62, 34.0, 52, None),
    ("dogecoin", "Dogecoin", "DOGE", 0.16, 23.0, 74, None),
    ("toncoin", "Toncoin", "TON", 6.50, 22.0, 11419, None),
    ("cardano", "Cardano", "ADA", 0.45, 16.0, 2010, None),
    ("shiba-inu", "Shiba Inu", "SHIB", 0.000025, 14.7, 5994, None),
    ("avalanche", "Avalanche", "AVAX", 47.50, 17.8, 5805, None),
    ("tron", "TRON", "TRX", 0.12, 10.5, 1958, None),
    ("polkadot", "Polkadot", "DOT", 8.50, 12.1, 6636, None),
    ("bitcoin-cash", "Bitcoin Cash", "BCH", 480.20, 9.4, 1831, None),
    ("chainlink", "Chainlink", "LINK", 18.20, 10.7, 1975, None),
    ("near-protocol", "NEAR Protocol", "NEAR", 6.80, 7.1, 6535, None),
    ("polygon", "Polygon", "MATIC", 0.95, 9.3, 3890, None),
    ("litecoin", "Litecoin", "LTC", 85.40, 6.3, 2, None),
    ("dai", "Dai", "DAI", 1.00, 5.3, 4943, None),
    ("uniswap", "Uniswap", "UNI", 11.50, 6.9, 7083, None),
    ("internet-computer", "Internet Computer", "ICP", 16.50, 7.6, 8916, None),
    ("ethereum-classic", "Ethereum Classic", "ETC", 30.50, 4.4, 1321, None),
    ("aptos", "Aptos", "APT", 14.20, 5.6, 21794, None),
    ("stacks", "Stacks", "STX", 2.80, 4.1, 4847, None),
    ("render", "Render", "RNDR", 10.20, 3.9, 5690, None),
    ("arbitrum", "Arbitrum", "ARB", 1.45, 3.8, 11841, None),
    ("cosmos", "Cosmos", "ATOM", 11.20, 4.3, 3794, None),
    ("maker", "Maker", "MKR", 3200.00, 2.9, 1518, None),
    ("optimism", "Optimism", "OP", 3.50, 3.5, 11840, None),
    ("injective", "Injective", "INJ", 35.40, 3.3, 4846, None),
    ("pepe", "Pepe", "PEPE", 0.000007, 2.9, 24478, None),
    ("fetch-ai", "Fetch.ai", "FET", 2.80, 2.3, 3773, None),
    ("aave", "Aave", "AAVE", 110.00, 1.6, 7278, None),
    ("the-sandbox", "The Sandbox", "SAND", 0.60, 1.3, 6210, None),
];

/// (id, nom, score, volume 24h, liquidité, visites, marchés, coins, fiat, id d'image)
type ExchangeSeed = (&'static str, &'static str, f64, f64, f64, u64, u32, u32, &'static [&'static str], u32);

const EXCHANGE_SEEDS: &[ExchangeSeed] = &[
    ("binance", "Binance", 9.9, 15_400_000_000.0, 850.0, 14_500_000, 1650, 450, &["USD", "EUR", "GBP", "AUD", "BRL"], 270),
    ("coinbase", "Coinbase Exchange", 8.5, 2_100_000_000.0, 780.0, 350_000, 550, 245, &["USD", "EUR", "GBP"], 89),
    ("bybit", "Bybit", 8.1, 4_500_000_000.0, 650.0, 4_100_000, 850, 550, &["USD", "EUR", "TRY", "RUB"], 521),
    ("okx", "OKX", 7.9, 3_200_000_000.0, 620.0, 2_800_000, 720, 340, &["USD", "CNY", "EUR"], 294),
    ("kraken", "Kraken", 7.8, 850_000_000.0, 710.0, 1_200_000, 680, 230, &["USD", "EUR", "CAD", "GBP", "JPY"], 24),
    ("kucoin", "KuCoin", 7.2, 1_100_000_000.0, 580.0, 1_900_000, 1400, 850, &["USD", "EUR", "GBP"], 311),
    ("gate-io", "Gate.io", 6.9, 950_000_000.0, 520.0, 1_500_000, 1800, 1700, &["USD", "CNY", "KRW"], 302),
    ("bitfinex", "Bitfinex", 6.5, 220_000_000.0, 690.0, 650_000, 450, 180, &["USD", "EUR", "GBP", "JPY"], 37),
];

/// Génère un historique journalier en marche aléatoire
///
/// - `points` jours avant `today`, variation de ±5% par pas
/// - Le dernier point (aujourd'hui) vaut exactement `start_price`
/// - Longueur totale : points + 1
pub fn generate_history<R: Rng>(
    start_price: f64,
    points: u64,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<HistoricalPoint> {
    let mut current = start_price;
    let mut history = Vec::with_capacity(points as usize + 1);

    for days_ago in (1..=points).rev() {
        let date = today.checked_sub_days(Days::new(days_ago)).unwrap_or(today);
        let change = (rng.random::<f64>() - 0.5) * 0.10;
        current *= 1.0 + change;
        history.push(HistoricalPoint { date, price: current });
    }

    history.push(HistoricalPoint { date: today, price: start_price });
    history
}

fn in_list(symbol: &str, list: &[&str]) -> bool {
    list.iter().any(|candidate| *candidate == symbol)
}

/// Catégories déduites du symbole
pub fn tags_for(symbol: &str, name: &str) -> Vec<String> {
    let s = symbol.to_uppercase();
    let n = name.to_lowercase();

    let mut tags: Vec<&str> = Vec::new();

    if in_list(&s, &["BTC", "LTC", "BCH", "DOGE", "BSV", "ZEC", "DASH", "ETC", "RVN"]) {
        tags.extend(["Mineable", "PoW"]);
    } else {
        tags.push("PoS");
    }
    if in_list(&s, &["ETH", "SOL", "ADA", "AVAX", "DOT", "NEAR", "MATIC", "TRX", "BNB", "ATOM", "FTM", "ALGO", "SUI", "APT", "SEI"]) {
        tags.extend(["Smart Contracts", "Layer 1"]);
    }
    if in_list(&s, &["UNI", "AAVE", "MKR", "CAKE", "CRV", "COMP", "1INCH", "SNX", "RUNE", "LDO", "INJ"]) {
        tags.extend(["DeFi", "DEX", "DAO"]);
    }
    if in_list(&s, &["DOGE", "SHIB", "PEPE", "BONK", "FLOKI", "WIF"]) {
        tags.push("Meme");
    }
    if in_list(&s, &["USDT", "USDC", "DAI", "FDUSD", "TUSD"]) {
        tags.push("Stablecoin");
    }
    if in_list(&s, &["AXS", "SAND", "MANA", "GALA", "ENJ", "IMX", "BEAM"]) || n.contains("game") {
        tags.extend(["Gaming", "Metaverse", "NFT"]);
    }
    if in_list(&s, &["FET", "RNDR", "AGIX", "OCEAN", "NEAR", "TAO"]) {
        tags.push("AI");
    }
    if in_list(&s, &["ARB", "OP", "MATIC", "MNT", "IMX", "STX"]) {
        tags.push("Layer 2");
    }
    if tags == ["PoS"] {
        tags.push("Utility Token");
    }

    tags.into_iter().map(String::from).collect()
}

/// Hydrate la table des coins (rang = position dans la table)
pub fn build_coins<R: Rng>(today: NaiveDate, rng: &mut R) -> Vec<Coin> {
    COIN_SEEDS
        .iter()
        .enumerate()
        .map(|(index, &(id, name, symbol, price, market_cap_b, cmc_id, description))| {
            let market_cap = market_cap_b * 1_000_000_000.0;
            Coin {
                id: id.to_string(),
                rank: index as u32 + 1,
                name: name.to_string(),
                symbol: symbol.to_string(),
                price,
                market_cap,
                // Volume entre 3% et 10% de la market cap
                volume_24h: market_cap * (0.03 + rng.random::<f64>() * 0.07),
                circulating_supply: market_cap / price,
                percent_change_1h: (rng.random::<f64>() - 0.5) * 2.0,
                percent_change_24h: (rng.random::<f64>() - 0.5) * 10.0,
                percent_change_7d: (rng.random::<f64>() - 0.5) * 20.0,
                history: generate_history(price, COIN_HISTORY_POINTS, today, rng),
                image: format!("https://s2.coinmarketcap.com/static/img/coins/64x64/{}.png", cmc_id),
                description: Some(
                    description
                        .map(String::from)
                        .unwrap_or_else(|| format!("{} ({}) is a popular cryptocurrency asset.", name, symbol)),
                ),
                tags: tags_for(symbol, name),
            }
        })
        .collect()
}

/// Hydrate la table des exchanges avec 7 jours d'historique de volume
pub fn build_exchanges<R: Rng>(today: NaiveDate, rng: &mut R) -> Vec<Exchange> {
    EXCHANGE_SEEDS
        .iter()
        .enumerate()
        .map(|(index, &(id, name, score, volume, liquidity, visits, markets, coins, fiat, image_id))| Exchange {
            id: id.to_string(),
            rank: index as u32 + 1,
            name: name.to_string(),
            score,
            volume_24h: volume,
            avg_liquidity: liquidity,
            weekly_visits: visits,
            markets,
            coins,
            fiat_supported: fiat.iter().map(|f| f.to_string()).collect(),
            image: format!("https://s2.coinmarketcap.com/static/img/exchanges/64x64/{}.png", image_id),
            history: generate_history(volume, 7, today, rng),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_history_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let history = generate_history(100.0, 20, today(), &mut rng);

        assert_eq!(history.len(), 21);
        assert_eq!(history.last().unwrap().price, 100.0);
        assert_eq!(history.last().unwrap().date, today());
        assert_eq!(history[0].date, NaiveDate::from_ymd_opt(2024, 5, 12).unwrap());
        assert!(history.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_coins_ranked_and_unique() {
        let mut rng = StdRng::seed_from_u64(1);
        let coins = build_coins(today(), &mut rng);

        assert!(coins.len() > 20);
        for (i, coin) in coins.iter().enumerate() {
            assert_eq!(coin.rank as usize, i + 1);
            assert!(coin.price > 0.0);
            assert!(coin.volume_24h >= coin.market_cap * 0.03);
        }
        let mut ids: Vec<_> = coins.iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), coins.len());
    }

    #[test]
    fn test_tags() {
        assert_eq!(tags_for("BTC", "Bitcoin"), vec!["Mineable", "PoW"]);
        assert!(tags_for("ETH", "Ethereum").contains(&"Layer 1".to_string()));
        assert_eq!(tags_for("XRP", "XRP"), vec!["PoS", "Utility Token"]);
        assert!(tags_for("DOGE", "Dogecoin").contains(&"Meme".to_string()));
    }
}
