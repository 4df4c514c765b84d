// ============================================================================
// Module : community
// ============================================================================
// Fil social : posts et sujets tendance (données statiques)
// ============================================================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub name: String,
    /// Pseudo (ex: "@BTC_Archive")
    pub handle: String,
    pub avatar: String,
    pub is_verified: bool,
}

/// Un post du fil communautaire
///
/// Les compteurs sont de l'affichage pur, aucune interaction ne les modifie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author: Author,
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Horodatage relatif déjà formaté (ex: "2h ago")
    pub timestamp: String,
    pub likes: u64,
    pub comments: u64,
    pub reposts: u64,
    /// Symboles mentionnés (ex: ["BTC"])
    pub coins: Vec<String>,
    #[serde(default)]
    pub is_liked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub posts_count: u64,
    pub is_trending: bool,
}
