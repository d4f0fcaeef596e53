use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

use crate::types::Post;

/// Client-side ordering applied to the fetched page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Keeps the order the remote API returned.
    #[default]
    Default,
    ByLikesDescending,
    /// Newest first, using the post id as a stand-in for creation time.
    /// The API has no timestamps so this is only an approximation.
    ByRecencyProxyDescending,
}

impl Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::ByLikesDescending => f.write_str("likes"),
            Self::ByRecencyProxyDescending => f.write_str("recent"),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown {0:?} sort mode, expected one of: default, likes, recent")]
pub struct InvalidSortMode(String);

impl FromStr for SortMode {
    type Err = InvalidSortMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_lowercase();
        match s.as_str() {
            "default" => Ok(Self::Default),
            "likes" => Ok(Self::ByLikesDescending),
            "recent" | "date" => Ok(Self::ByRecencyProxyDescending),
            _ => Err(InvalidSortMode(s)),
        }
    }
}

/// Computes the displayed sequence from the fetched page.
///
/// A post survives the filter when no tags are selected or when it
/// shares at least one tag with the selection. Sorting is stable, so
/// ties keep the relative order of `raw_page`.
#[must_use]
pub fn derive_view(raw_page: &[Post], selected_tags: &BTreeSet<String>, sort_mode: SortMode) -> Vec<Post> {
    let mut view = raw_page
        .iter()
        .filter(|post| selected_tags.is_empty() || post.has_any_tag(selected_tags))
        .cloned()
        .collect::<Vec<_>>();

    match sort_mode {
        SortMode::Default => {}
        SortMode::ByLikesDescending => view.sort_by_key(|post| Reverse(post.reactions.likes)),
        SortMode::ByRecencyProxyDescending => view.sort_by_key(|post| Reverse(post.id)),
    }

    view
}
