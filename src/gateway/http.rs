use error_stack::{Report, Result, ResultExt};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::{Gateway, GatewayError, PageQuery};
use crate::config;
use crate::types::comment::CommentsEnvelope;
use crate::types::{Comment, Post, PostId, PostsPage, User, UserId};

/// [`Gateway`] talking to a DummyJSON-compatible HTTP API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: Url,
}

#[derive(Debug, Error)]
#[error("Failed to initialize HTTP gateway")]
pub struct GatewayInitError;

/// How a non-success status of a request should be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    /// Listing endpoints: any non-success status is a network failure.
    Listing,
    /// Single resources: `404` means the resource does not exist.
    Single,
}

impl HttpGateway {
    const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

    pub fn from_config(config: &config::Api) -> Result<Self, GatewayInitError> {
        let mut builder = reqwest::Client::builder().user_agent(Self::USER_AGENT);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .change_context(GatewayInitError)
            .attach_printable("could not build HTTP client")?;

        Self::new(client, config.base_url.clone())
    }

    pub fn new(client: reqwest::Client, base_url: Url) -> Result<Self, GatewayInitError> {
        if base_url.cannot_be_a_base() {
            return Err(Report::new(GatewayInitError)
                .attach_printable(format!("{base_url} cannot be used as a base URL")));
        }
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, keeping any path prefix
    /// the base URL already has.
    fn endpoint<I>(&self, segments: I) -> Url
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        // checked in `HttpGateway::new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn posts_page_url(&self, query: &PageQuery) -> Url {
        let mut url = match query.search_term() {
            Some(term) => {
                let mut url = self.endpoint(["posts", "search"]);
                url.query_pairs_mut().append_pair("q", term);
                url
            }
            None => self.endpoint(["posts"]),
        };

        url.query_pairs_mut()
            .append_pair("limit", &query.limit.to_string())
            .append_pair("skip", &query.skip.to_string());

        url
    }

    #[tracing::instrument(skip_all, fields(%url))]
    async fn get_json<T: DeserializeOwned>(&self, url: Url, lookup: Lookup) -> Result<T, GatewayError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .change_context(GatewayError::Network)
            .attach_printable_lazy(|| format!("GET {url}"))?;

        let status = response.status();
        debug!(%status, "received response");

        if !status.is_success() {
            let context = if status == StatusCode::NOT_FOUND && lookup == Lookup::Single {
                GatewayError::NotFound
            } else {
                GatewayError::Network
            };
            return Err(Report::new(context).attach_printable(format!("GET {url} returned {status}")));
        }

        response
            .json::<T>()
            .await
            .change_context(GatewayError::Network)
            .attach_printable_lazy(|| format!("malformed response body from {url}"))
    }
}

impl Gateway for HttpGateway {
    async fn fetch_posts_page(&self, query: PageQuery) -> Result<PostsPage, GatewayError> {
        let url = self.posts_page_url(&query);
        self.get_json(url, Lookup::Listing).await
    }

    async fn fetch_post(&self, id: PostId) -> Result<Post, GatewayError> {
        let id = id.to_string();
        let url = self.endpoint(["posts", id.as_str()]);
        self.get_json(url, Lookup::Single).await
    }

    async fn fetch_comments(&self, post_id: PostId) -> Result<Vec<Comment>, GatewayError> {
        let post_id = post_id.to_string();
        let url = self.endpoint(["posts", post_id.as_str(), "comments"]);
        let envelope: CommentsEnvelope = self.get_json(url, Lookup::Single).await?;
        Ok(envelope.comments)
    }

    async fn fetch_user(&self, id: UserId) -> Result<User, GatewayError> {
        let id = id.to_string();
        let url = self.endpoint(["users", id.as_str()]);
        self.get_json(url, Lookup::Single).await
    }

    async fn fetch_user_posts(&self, user_id: UserId) -> Result<Vec<Post>, GatewayError> {
        let user_id = user_id.to_string();
        let url = self.endpoint(["posts", "user", user_id.as_str()]);
        let page: PostsPage = self.get_json(url, Lookup::Single).await?;
        Ok(page.posts)
    }

    async fn fetch_all_posts_for_tag_index(&self) -> Result<Vec<Post>, GatewayError> {
        // `limit=0` asks the API for the entire catalog
        let mut url = self.endpoint(["posts"]);
        url.query_pairs_mut().append_pair("limit", "0");

        let page: PostsPage = self.get_json(url, Lookup::Listing).await?;
        Ok(page.posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(base: &str) -> HttpGateway {
        HttpGateway::new(reqwest::Client::new(), Url::parse(base).unwrap()).unwrap()
    }

    #[test]
    fn plain_list_url_shape() {
        let gateway = gateway("https://dummyjson.com");
        let url = gateway.posts_page_url(&PageQuery {
            limit: 10,
            skip: 20,
            search: None,
        });
        assert_eq!(url.as_str(), "https://dummyjson.com/posts?limit=10&skip=20");
    }

    #[test]
    fn search_url_shape() {
        let gateway = gateway("https://dummyjson.com/");
        let url = gateway.posts_page_url(&PageQuery {
            limit: 10,
            skip: 0,
            search: Some("cat & dog".into()),
        });
        assert_eq!(
            url.as_str(),
            "https://dummyjson.com/posts/search?q=cat+%26+dog&limit=10&skip=0"
        );
    }

    #[test]
    fn endpoints_keep_base_path_prefix() {
        let gateway = gateway("http://localhost:8080/api/v1");
        let url = gateway.endpoint(["posts", "7", "comments"]);
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/posts/7/comments");
    }

    #[test]
    fn rejects_urls_that_cannot_be_a_base() {
        let url = Url::parse("mailto:someone@example.com").unwrap();
        assert!(HttpGateway::new(reqwest::Client::new(), url).is_err());
    }
}
