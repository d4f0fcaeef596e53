use serde::{Deserialize, Serialize};

use super::{CommentId, PostId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub body: String,
    pub post_id: PostId,
    pub user: CommentAuthor,
}

/// Minimal user reference embedded in every comment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommentAuthor {
    pub id: UserId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Envelope of `GET /posts/{id}/comments`.
#[derive(Debug, Deserialize)]
pub(crate) struct CommentsEnvelope {
    pub comments: Vec<Comment>,
}
