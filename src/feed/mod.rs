pub mod pagination;
pub mod store;
pub mod view;

pub use self::pagination::{PageItem, Pagination};
pub use self::store::{FeedSnapshot, FeedStore, FetchFailure, LoadOutcome};
pub use self::view::{derive_view, InvalidSortMode, SortMode};
