use serde::Deserialize;
use std::num::NonZeroU64;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Feed {
    /// Number of posts requested per page. It stays fixed for the
    /// lifetime of a feed store.
    ///
    /// **Environment variables**:
    /// - `FEEDVIEW_FEED_PAGE_SIZE`
    pub page_size: NonZeroU64,
}

impl Feed {
    const DEFAULT_PAGE_SIZE: u64 = 10;

    const fn default_page_size() -> NonZeroU64 {
        match NonZeroU64::new(Self::DEFAULT_PAGE_SIZE) {
            Some(n) => n,
            None => panic!("DEFAULT_PAGE_SIZE is accidentally set to 0"),
        }
    }
}

impl Default for Feed {
    fn default() -> Self {
        Self {
            page_size: Self::default_page_size(),
        }
    }
}
