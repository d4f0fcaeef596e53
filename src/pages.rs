//! Loaders for the post and user detail pages.
//!
//! Both load their primary resource first and fail if it is missing.
//! Secondary data is fetched afterwards in sequence and degrades to an
//! empty value when it cannot be loaded.
use error_stack::Result;
use tracing::warn;

use crate::gateway::{Gateway, GatewayError};
use crate::types::{Comment, Post, PostId, User, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetail {
    pub post: Post,
    pub comments: Vec<Comment>,
    /// `None` if the author could not be loaded.
    pub author: Option<User>,
}

impl PostDetail {
    #[tracing::instrument(skip(gateway), name = "pages.post_detail")]
    pub async fn load<G: Gateway>(gateway: &G, post_id: PostId) -> Result<Self, GatewayError> {
        let post = gateway.fetch_post(post_id).await?;

        let comments = gateway.fetch_comments(post_id).await.unwrap_or_else(|error| {
            warn!(?error, "could not load comments");
            Vec::new()
        });

        let author = match gateway.fetch_user(post.user_id).await {
            Ok(user) => Some(user),
            Err(error) => {
                warn!(?error, user_id = %post.user_id, "could not load post author");
                None
            }
        };

        Ok(Self {
            post,
            comments,
            author,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user: User,
    pub posts: Vec<Post>,
}

impl UserProfile {
    #[tracing::instrument(skip(gateway), name = "pages.user_profile")]
    pub async fn load<G: Gateway>(gateway: &G, user_id: UserId) -> Result<Self, GatewayError> {
        let user = gateway.fetch_user(user_id).await?;
        let posts = gateway.fetch_user_posts(user_id).await.unwrap_or_else(|error| {
            warn!(?error, "could not load posts of user");
            Vec::new()
        });

        Ok(Self { user, posts })
    }
}
