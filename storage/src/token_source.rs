use std::error::Error;
use std::fmt::Debug;
use std::sync::Arc;

/// Supplies the value of the `X-StorageApi-Token` header.
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync + Debug {
    /// token returns the valid token
    async fn token(&self) -> Result<String, Box<dyn Error + Send + Sync>>;
}

pub trait TokenSourceProvider: Send + Sync + Debug {
    /// token returns the token source implementation
    fn token_source(&self) -> Arc<dyn TokenSource>;
}

/// A token that never changes, as issued in the project settings.
#[derive(Clone)]
pub struct StaticTokenSource {
    token: String,
}

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

impl Debug for StaticTokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // never print the token itself
        f.debug_struct("StaticTokenSource").finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl TokenSource for StaticTokenSource {
    async fn token(&self) -> Result<String, Box<dyn Error + Send + Sync>> {
        Ok(self.token.clone())
    }
}

impl TokenSourceProvider for StaticTokenSource {
    fn token_source(&self) -> Arc<dyn TokenSource> {
        Arc::new(self.clone())
    }
}
