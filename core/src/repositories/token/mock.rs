//! Mock implementation of SessionTokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::session_token::SessionToken;
use crate::errors::DomainError;

use super::r#trait::SessionTokenRepository;

/// Mock session token repository for testing
pub struct MockSessionTokenRepository {
    tokens: Arc<RwLock<HashMap<String, SessionToken>>>,
}

impl MockSessionTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored tokens, regardless of freshness
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }
}

impl Default for MockSessionTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionTokenRepository for MockSessionTokenRepository {
    async fn insert(&self, token: SessionToken) -> Result<SessionToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        // Check for duplicate
        if tokens.contains_key(&token.token) {
            return Err(DomainError::Validation {
                message: "Token value already exists".to_string(),
            });
        }

        tokens.insert(token.token.clone(), token.clone());
        Ok(token)
    }

    async fn find(&self, value: &str) -> Result<Option<SessionToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(value).cloned())
    }

    async fn touch(
        &self,
        value: &str,
        now: DateTime<Utc>,
        cutoff: DateTime<Utc>,
    ) -> Result<Option<Uuid>, DomainError> {
        // Write lock for the whole check-and-refresh, mirroring the single
        // UPDATE statement of the real implementation
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(value) {
            Some(token) if token.is_live(cutoff) => {
                token.touch(now);
                Ok(Some(token.user_id))
            }
            _ => Ok(None),
        }
    }

    async fn delete(&self, value: &str) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;
        Ok(tokens.remove(value).is_some())
    }

    async fn delete_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let initial_count = tokens.len();

        tokens.retain(|_, token| token.user_id != user_id);

        Ok(initial_count - tokens.len())
    }

    async fn delete_unused_since(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let initial_count = tokens.len();

        tokens.retain(|_, token| token.last_used_at >= cutoff);

        Ok(initial_count - tokens.len())
    }
}
