//! Read-only access to the remote post/comment/user API.
//!
//! Every operation is exactly one request and one response. There are
//! no retries and nothing is cached here; callers decide what to keep.
use error_stack::Result;
use std::future::Future;
use thiserror::Error;

use crate::types::{Comment, Post, PostId, PostsPage, User, UserId};

mod http;
pub use self::http::{GatewayInitError, HttpGateway};

/// Failure taxonomy of the remote data source.
///
/// An empty result is not an error; it is a valid response with no
/// matching items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum GatewayError {
    /// Transport failure, a non-success status or an unreadable body.
    #[error("Could not fetch data from the remote API")]
    Network,
    /// The request was valid but the resource does not exist.
    #[error("Requested resource does not exist")]
    NotFound,
}

/// Parameters of a single page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub limit: u64,
    pub skip: u64,
    /// Server-side search term; `None` lists every post.
    pub search: Option<String>,
}

impl PageQuery {
    /// Returns the search term if it should change the request shape.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|term| !term.trim().is_empty())
    }
}

pub trait Gateway: Send + Sync {
    /// Fetches one page of posts. The returned list replaces whatever
    /// the caller held before; it is never merged.
    fn fetch_posts_page(
        &self,
        query: PageQuery,
    ) -> impl Future<Output = Result<PostsPage, GatewayError>> + Send;

    fn fetch_post(&self, id: PostId) -> impl Future<Output = Result<Post, GatewayError>> + Send;

    fn fetch_comments(
        &self,
        post_id: PostId,
    ) -> impl Future<Output = Result<Vec<Comment>, GatewayError>> + Send;

    fn fetch_user(&self, id: UserId) -> impl Future<Output = Result<User, GatewayError>> + Send;

    fn fetch_user_posts(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Post>, GatewayError>> + Send;

    /// Scans the whole catalog so every tag in use can be listed.
    ///
    /// This only scales to small catalogs; a larger deployment would
    /// need a tag index maintained by the server.
    fn fetch_all_posts_for_tag_index(
        &self,
    ) -> impl Future<Output = Result<Vec<Post>, GatewayError>> + Send;
}
