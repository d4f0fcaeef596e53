use serde::{Deserialize, Serialize};

use super::Post;

/// One page of posts together with the total number of posts matching
/// the query, independent of the page size.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PostsPage {
    pub posts: Vec<Post>,
    #[serde(default)]
    pub total: u64,
}
