// ============================================================================
// Service mock : CommunityService
// ============================================================================
// Fil social statique (posts + sujets tendance)
// ============================================================================

use anyhow::Result;
use tracing::instrument;

use super::Latency;
use crate::models::{Author, Post, Topic};

fn author(id: &str, name: &str, handle: &str, color: &str, is_verified: bool) -> Author {
    Author {
        id: id.to_string(),
        name: name.to_string(),
        handle: handle.to_string(),
        avatar: format!(
            "https://ui-avatars.com/api/?name={}&background={}&color=fff",
            name.replace(' ', "+"),
            color
        ),
        is_verified,
    }
}

#[allow(clippy::too_many_arguments)]
fn post(
    id: &str,
    author: Author,
    content: &str,
    timestamp: &str,
    likes: u64,
    comments: u64,
    reposts: u64,
    coins: &[&str],
    is_liked: bool,
) -> Post {
    Post {
        id: id.to_string(),
        author,
        content: content.to_string(),
        image: None,
        timestamp: timestamp.to_string(),
        likes,
        comments,
        reposts,
        coins: coins.iter().map(|c| c.to_string()).collect(),
        is_liked,
    }
}

fn mock_posts() -> Vec<Post> {
    let mut vitalik = post(
        "p2",
        author("a2", "Vitalik Buterin", "@VitalikButerin", "627EEA", true),
        "Just published a new roadmap for Ethereum scaling. Layer 2 solutions are looking more promising than ever.",
        "5h ago",
        28_000,
        1_200,
        5_600,
        &["ETH"],
        true,
    );
    vitalik.image = Some("https://images.unsplash.com/photo-1622630998477-20aa696fa4f5".to_string());

    vec![
        post(
            "p1",
            author("a1", "Bitcoin Archive", "@BTC_Archive", "F7931A", true),
            "Bitcoin has officially broken the $64k resistance level! Next stop $70k? #Bitcoin #Crypto",
            "2h ago",
            12_500,
            450,
            1_200,
            &["BTC"],
            false,
        ),
        vitalik,
        post(
            "p3",
            author("a3", "Solana Legend", "@SolanaLegend", "14F195", false),
            "$SOL volume is flipping ETH on decentralized exchanges today. The meme coin season on Solana is bringing massive liquidity.",
            "15m ago",
            850,
            120,
            200,
            &["SOL"],
            false,
        ),
        post(
            "p4",
            author("a4", "Crypto Whale", "@CryptoWhale", "000", true),
            "Just bought the dip. Accumulating more Altcoins before the major altseason begins. My top picks are $DOT, $ADA and $AVAX.",
            "1d ago",
            5_400,
            890,
            450,
            &["DOT", "ADA", "AVAX"],
            false,
        ),
        post(
            "p5",
            author("a5", "CZ", "@cz_binance", "F3BA2F", true),
            "Funds are SAFU.",
            "2d ago",
            45_000,
            2_300,
            8_900,
            &["BNB"],
            true,
        ),
    ]
}

fn mock_topics() -> Vec<Topic> {
    [
        ("t1", "Bitcoin", 125_000, true),
        ("t2", "SolanaSummer", 45_000, true),
        ("t3", "Airdrop", 32_000, true),
        ("t4", "Memecoins", 28_000, false),
        ("t5", "Regulation", 15_000, false),
        ("t6", "ETF", 56_000, true),
    ]
    .into_iter()
    .map(|(id, name, posts_count, is_trending)| Topic {
        id: id.to_string(),
        name: name.to_string(),
        posts_count,
        is_trending,
    })
    .collect()
}

#[derive(Debug, Clone)]
pub struct CommunityService {
    latency: Latency,
}

impl CommunityService {
    pub fn new(latency: Latency) -> Self {
        Self { latency }
    }

    #[instrument(skip(self))]
    pub async fn get_posts(&self) -> Result<Vec<Post>> {
        self.latency.wait(600).await;
        Ok(mock_posts())
    }

    #[instrument(skip(self))]
    pub async fn get_trending_topics(&self) -> Result<Vec<Topic>> {
        self.latency.wait(400).await;
        Ok(mock_topics())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_feed() {
        let svc = CommunityService::new(Latency::instant());
        let posts = svc.get_posts().await.unwrap();
        assert_eq!(posts.len(), 5);
        assert_eq!(posts[1].author.handle, "@VitalikButerin");
        assert!(posts[1].image.is_some());

        let topics = svc.get_trending_topics().await.unwrap();
        assert_eq!(topics.iter().filter(|t| t.is_trending).count(), 4);
    }
}
