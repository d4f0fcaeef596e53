use error_stack::{Report, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

use crate::gateway::{Gateway, GatewayError, PageQuery};
use crate::types::{Comment, CommentAuthor, Id, Post, PostId, PostsPage, Reactions, User, UserId};

#[must_use]
pub fn post(id: u64, likes: u64, tags: &[&str]) -> Post {
    Post {
        id: Id::new(id),
        title: format!("Post {id}"),
        body: format!("Body of post {id}"),
        user_id: Id::new(1),
        tags: tags.iter().map(ToString::to_string).collect(),
        reactions: Reactions::new(likes, 0),
    }
}

/// Builds `count` posts with ids `1..=count`. Every fifth post has
/// "love" in its title and tags rotate through a small vocabulary.
#[must_use]
pub fn catalog(count: u64) -> Vec<Post> {
    (1..=count)
        .map(|id| {
            let tags: &[&str] = match id % 3 {
                0 => &["history", "crime"],
                1 => &["love"],
                _ => &["mystery"],
            };
            let mut post = post(id, id * 7 % 50, tags);
            post.user_id = Id::new(id % 4 + 1);
            if id % 5 == 0 {
                post.title = format!("A love story {id}");
            }
            post
        })
        .collect()
}

#[must_use]
pub fn user(id: u64, first_name: &str, last_name: &str) -> User {
    User {
        id: Id::new(id),
        first_name: first_name.into(),
        last_name: last_name.into(),
        username: first_name.to_lowercase(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        image: format!("https://example.com/{id}.png"),
        gender: None,
        phone: None,
        birth_date: None,
        address: None,
    }
}

#[must_use]
pub fn comment(id: u64, post_id: u64, author: &User, body: &str) -> Comment {
    Comment {
        id: Id::new(id),
        body: body.into(),
        post_id: Id::new(post_id),
        user: CommentAuthor {
            id: author.id,
            username: author.username.clone(),
            image: None,
        },
    }
}

/// In-memory [`Gateway`] that records every page query it receives.
///
/// A page request can be held back with [`FakeGateway::hold_page`] until
/// the returned sender fires, which lets tests decide in which order
/// overlapping responses arrive.
#[derive(Debug, Default)]
pub struct FakeGateway {
    pub catalog: Vec<Post>,
    pub users: Vec<User>,
    pub comments: Vec<Comment>,

    pub fail_pages: AtomicBool,
    pub fail_tags: AtomicBool,
    pub fail_comments: AtomicBool,
    pub fail_user_posts: AtomicBool,

    queries: Mutex<Vec<PageQuery>>,
    holds: Mutex<HashMap<u64, oneshot::Receiver<()>>>,
    tag_index_calls: AtomicUsize,
}

impl FakeGateway {
    #[must_use]
    pub fn with_catalog(catalog: Vec<Post>) -> Self {
        Self {
            catalog,
            ..Default::default()
        }
    }

    /// Delays the response to the page request starting at `skip`.
    pub fn hold_page(&self, skip: u64) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.holds.lock().unwrap().insert(skip, rx);
        tx
    }

    pub fn queries(&self) -> Vec<PageQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn tag_index_calls(&self) -> usize {
        self.tag_index_calls.load(Ordering::SeqCst)
    }

    fn network_error(what: &str) -> Report<GatewayError> {
        Report::new(GatewayError::Network).attach_printable(format!("fake {what} failure"))
    }
}

impl Gateway for FakeGateway {
    async fn fetch_posts_page(&self, query: PageQuery) -> Result<PostsPage, GatewayError> {
        self.queries.lock().unwrap().push(query.clone());

        let hold = self.holds.lock().unwrap().remove(&query.skip);
        if let Some(hold) = hold {
            _ = hold.await;
        }

        if self.fail_pages.load(Ordering::SeqCst) {
            return Err(Self::network_error("page"));
        }

        let matching = self
            .catalog
            .iter()
            .filter(|post| match query.search_term() {
                Some(term) => post.title.to_lowercase().contains(&term.to_lowercase()),
                None => true,
            })
            .collect::<Vec<_>>();

        Ok(PostsPage {
            total: matching.len() as u64,
            posts: matching
                .into_iter()
                .skip(usize::try_from(query.skip).unwrap_or(usize::MAX))
                .take(usize::try_from(query.limit).unwrap_or(usize::MAX))
                .cloned()
                .collect(),
        })
    }

    async fn fetch_post(&self, id: PostId) -> Result<Post, GatewayError> {
        self.catalog
            .iter()
            .find(|post| post.id == id)
            .cloned()
            .ok_or_else(|| Report::new(GatewayError::NotFound))
    }

    async fn fetch_comments(&self, post_id: PostId) -> Result<Vec<Comment>, GatewayError> {
        if self.fail_comments.load(Ordering::SeqCst) {
            return Err(Self::network_error("comments"));
        }
        Ok(self
            .comments
            .iter()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn fetch_user(&self, id: UserId) -> Result<User, GatewayError> {
        self.users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| Report::new(GatewayError::NotFound))
    }

    async fn fetch_user_posts(&self, user_id: UserId) -> Result<Vec<Post>, GatewayError> {
        if self.fail_user_posts.load(Ordering::SeqCst) {
            return Err(Self::network_error("user posts"));
        }
        Ok(self
            .catalog
            .iter()
            .filter(|post| post.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn fetch_all_posts_for_tag_index(&self) -> Result<Vec<Post>, GatewayError> {
        self.tag_index_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_tags.load(Ordering::SeqCst) {
            return Err(Self::network_error("tag index"));
        }
        Ok(self.catalog.clone())
    }
}
