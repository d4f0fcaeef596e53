use error_stack::Report;
use std::collections::BTreeSet;
use std::num::NonZeroU64;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use super::pagination::Pagination;
use super::view::{derive_view, SortMode};
use crate::gateway::{Gateway, GatewayError, PageQuery};
use crate::types::Post;

/// Holds one fetched page of posts plus the search, tag and sort
/// parameters applied to it.
///
/// The displayed sequence is never stored: it is derived from the raw
/// page on every read, so it cannot drift from its inputs.
///
/// Every page request gets a token from a monotonically increasing
/// counter. When requests overlap, only the response carrying the most
/// recent token is applied and older ones are dropped, whichever order
/// they complete in.
#[derive(Debug)]
pub struct FeedStore<G> {
    gateway: G,
    page_size: NonZeroU64,
    state: Mutex<FeedState>,
}

#[derive(Debug, Default)]
struct FeedState {
    raw_page: Vec<Post>,
    total_count: u64,
    current_page: u64,
    /// Whether `total_count` comes from a response yet.
    total_known: bool,

    search_term: String,
    sort_mode: SortMode,
    selected_tags: BTreeSet<String>,
    all_tags: BTreeSet<String>,

    is_loading: bool,
    last_error: Option<FetchFailure>,
    latest_request: u64,
}

/// What happened to a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadOutcome {
    /// The response was applied.
    Loaded,
    /// The request failed; the previous page is still shown.
    Failed,
    /// A newer request was issued meanwhile, so this response was dropped.
    Stale,
    /// The page does not exist; the shown page is unchanged.
    OutOfRange,
}

/// Summary of the last failed page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: GatewayError,
    pub message: String,
}

impl FetchFailure {
    fn from_report(report: &Report<GatewayError>) -> Self {
        Self {
            kind: *report.current_context(),
            message: format!("{report:#}"),
        }
    }
}

/// Read-only copy of everything a view needs to render the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSnapshot {
    pub posts: Vec<Post>,
    pub pagination: Pagination,
    pub search_term: String,
    pub sort_mode: SortMode,
    pub selected_tags: BTreeSet<String>,
    pub all_tags: BTreeSet<String>,
    pub is_loading: bool,
    pub last_error: Option<FetchFailure>,
}

impl<G: Gateway> FeedStore<G> {
    #[must_use]
    pub fn new(gateway: G, page_size: NonZeroU64) -> Self {
        Self {
            gateway,
            page_size,
            state: Mutex::new(FeedState {
                current_page: 1,
                ..Default::default()
            }),
        }
    }

    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Fetches `page` with the current search term.
    ///
    /// Page `0` is never requested, and once the total is known neither
    /// is any page past the last one. Before that, a page past the end
    /// is only detected from the response, which then just updates the
    /// total. Failures never surface as errors; they are kept in
    /// [`FeedSnapshot::last_error`].
    #[tracing::instrument(skip(self), name = "feed.load_page")]
    pub async fn load_page(&self, page: u64) -> LoadOutcome {
        {
            let state = self.lock();
            let pagination = state.pagination(self.page_size);
            if page == 0 || (state.total_known && !pagination.contains(page)) {
                debug!(total_pages = pagination.total_pages(), "requested page is out of range");
                return LoadOutcome::OutOfRange;
            }
        }
        self.fetch_page(page).await
    }

    /// Changes the server-side search term and starts over at page 1.
    /// Surrounding whitespace is dropped, so a blank term lists every post.
    #[tracing::instrument(skip(self), name = "feed.search")]
    pub async fn search(&self, term: &str) -> LoadOutcome {
        {
            let mut state = self.lock();
            term.trim().clone_into(&mut state.search_term);
            state.current_page = 1;
        }
        self.fetch_page(1).await
    }

    /// Fetches the current page again, typically after a failure.
    #[tracing::instrument(skip(self), name = "feed.reload")]
    pub async fn reload(&self) -> LoadOutcome {
        let page = self.lock().current_page.max(1);
        self.fetch_page(page).await
    }

    /// Collects every tag used across the catalog into the tag list.
    ///
    /// The tag list only feeds the filter choices, so a failure here is
    /// logged and otherwise ignored.
    #[tracing::instrument(skip(self), name = "feed.load_all_tags")]
    pub async fn load_all_tags(&self) {
        match self.gateway.fetch_all_posts_for_tag_index().await {
            Ok(posts) => {
                let mut state = self.lock();
                for post in posts {
                    state.all_tags.extend(post.tags);
                }
                debug!(tags = state.all_tags.len(), "loaded tag vocabulary");
            }
            Err(error) => {
                warn!(?error, "could not load tag vocabulary");
            }
        }
    }

    pub fn set_sort_mode(&self, mode: SortMode) {
        self.lock().sort_mode = mode;
    }

    pub fn set_selected_tags<I>(&self, tags: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.lock().selected_tags = tags.into_iter().map(Into::into).collect();
    }

    /// Selects `tag` if it is not selected yet, deselects it otherwise.
    pub fn toggle_tag(&self, tag: &str) {
        let mut state = self.lock();
        if !state.selected_tags.remove(tag) {
            state.selected_tags.insert(tag.to_string());
        }
    }

    /// Drops the tag selection and goes back to the API's ordering.
    pub fn clear_filters(&self) {
        let mut state = self.lock();
        state.selected_tags.clear();
        state.sort_mode = SortMode::Default;
    }

    /// The filtered and sorted posts of the current page.
    #[must_use]
    pub fn posts(&self) -> Vec<Post> {
        let state = self.lock();
        derive_view(&state.raw_page, &state.selected_tags, state.sort_mode)
    }

    #[must_use]
    pub fn pagination(&self) -> Pagination {
        self.lock().pagination(self.page_size)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().is_loading
    }

    #[must_use]
    pub fn last_error(&self) -> Option<FetchFailure> {
        self.lock().last_error.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> FeedSnapshot {
        let state = self.lock();
        FeedSnapshot {
            posts: derive_view(&state.raw_page, &state.selected_tags, state.sort_mode),
            pagination: state.pagination(self.page_size),
            search_term: state.search_term.clone(),
            sort_mode: state.sort_mode,
            selected_tags: state.selected_tags.clone(),
            all_tags: state.all_tags.clone(),
            is_loading: state.is_loading,
            last_error: state.last_error.clone(),
        }
    }
}

impl<G: Gateway> FeedStore<G> {
    async fn fetch_page(&self, page: u64) -> LoadOutcome {
        let (token, query) = {
            let mut state = self.lock();
            state.latest_request += 1;
            state.is_loading = true;
            state.last_error = None;

            let query = PageQuery {
                limit: self.page_size.get(),
                skip: (page - 1).saturating_mul(self.page_size.get()),
                search: Some(state.search_term.clone()).filter(|term| !term.is_empty()),
            };
            (state.latest_request, query)
        };

        let result = self.gateway.fetch_posts_page(query).await;

        let mut state = self.lock();
        if token != state.latest_request {
            debug!(token, latest = state.latest_request, "dropping stale page response");
            return LoadOutcome::Stale;
        }

        state.is_loading = false;
        match result {
            Ok(response)
                if page > 1 && !Pagination::new(response.total, self.page_size, page).contains(page) =>
            {
                debug!(page, total = response.total, "requested page is past the last page");
                state.total_count = response.total;
                state.total_known = true;
                LoadOutcome::OutOfRange
            }
            Ok(response) => {
                info!(page, total = response.total, posts = response.posts.len(), "loaded page");
                state.raw_page = response.posts;
                state.total_count = response.total;
                state.current_page = page;
                state.total_known = true;
                LoadOutcome::Loaded
            }
            Err(error) => {
                warn!(?error, page, "could not load page");
                state.last_error = Some(FetchFailure::from_report(&error));
                LoadOutcome::Failed
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        // the state is plain data, a panic mid-update cannot leave it unusable
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FeedState {
    fn pagination(&self, page_size: NonZeroU64) -> Pagination {
        Pagination::new(self.total_count, page_size, self.current_page)
    }
}
