use error_stack::{Result, ResultExt};
use std::sync::Arc;
use thiserror::Error;

use crate::config;
use crate::feed::FeedStore;
use crate::gateway::{GatewayError, HttpGateway};
use crate::pages::{PostDetail, UserProfile};
use crate::types::{PostId, UserId};

#[derive(Debug, Clone)]
pub struct App {
    pub config: Arc<config::Settings>,
    pub gateway: HttpGateway,
}

#[derive(Debug, Error)]
#[error("Failed to initialize App struct")]
pub struct AppError;

impl App {
    #[tracing::instrument(skip_all)]
    pub fn new(cfg: config::Settings) -> Result<Self, AppError> {
        let gateway = HttpGateway::from_config(&cfg.api).change_context(AppError)?;
        Ok(Self {
            config: Arc::new(cfg),
            gateway,
        })
    }
}

impl App {
    /// Creates a new feed store. Stores share nothing but the HTTP
    /// client, so every caller gets independent feed state.
    #[must_use]
    pub fn feed_store(&self) -> FeedStore<HttpGateway> {
        FeedStore::new(self.gateway.clone(), self.config.feed.page_size)
    }

    pub async fn post_detail(&self, id: PostId) -> Result<PostDetail, GatewayError> {
        PostDetail::load(&self.gateway, id).await
    }

    pub async fn user_profile(&self, id: UserId) -> Result<UserProfile, GatewayError> {
        UserProfile::load(&self.gateway, id).await
    }
}
