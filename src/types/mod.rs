pub mod comment;
pub mod id;
pub mod page;
pub mod post;
pub mod user;

pub use comment::{Comment, CommentAuthor};
pub use id::Id;
pub use page::PostsPage;
pub use post::{Post, Reactions};
pub use user::{Address, User};

pub type PostId = Id<id::marker::PostMarker>;
pub type UserId = Id<id::marker::UserMarker>;
pub type CommentId = Id<id::marker::CommentMarker>;
