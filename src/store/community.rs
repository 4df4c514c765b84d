// ============================================================================
// Slice : community
// ============================================================================

use crate::models::{Post, RequestStatus, Topic};

#[derive(Debug, Clone)]
pub enum CommunityAction {
    FetchPostsPending,
    FetchPostsFulfilled(Vec<Post>),
    FetchPostsRejected(String),
    /// Les sujets n'ont pas de statut : seul le succès est suivi
    FetchTrendingTopicsFulfilled(Vec<Topic>),
}

#[derive(Debug, Clone, Default)]
pub struct CommunityState {
    pub posts: Vec<Post>,
    pub trending_topics: Vec<Topic>,
    pub status: RequestStatus,
    pub error: Option<String>,
}

impl CommunityState {
    pub fn reduce(&mut self, action: CommunityAction) {
        match action {
            CommunityAction::FetchPostsPending => {
                self.status = RequestStatus::Loading;
            }
            CommunityAction::FetchPostsFulfilled(posts) => {
                self.status = RequestStatus::Succeeded;
                self.posts = posts;
            }
            CommunityAction::FetchPostsRejected(error) => {
                self.status = RequestStatus::Failed;
                self.error = Some(if error.trim().is_empty() {
                    "Failed to fetch posts".to_string()
                } else {
                    error
                });
            }
            CommunityAction::FetchTrendingTopicsFulfilled(topics) => {
                self.trending_topics = topics;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_posts() {
        let mut state = CommunityState::default();
        state.reduce(CommunityAction::FetchPostsPending);
        state.reduce(CommunityAction::FetchPostsRejected(String::new()));
        assert_eq!(state.status, RequestStatus::Failed);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch posts"));
    }
}
