use serde::{Deserialize, Serialize};
use std::fmt;

use super::id::marker::{PostMarker, UserMarker};
use super::Id;

/// A single feed item as the remote API returns it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Id<PostMarker>,
    pub title: String,
    pub body: String,
    pub user_id: Id<UserMarker>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reactions: Reactions,
}

impl Post {
    /// Whether this post carries at least one of the given tags.
    #[must_use]
    pub fn has_any_tag<'a, I>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        tags.into_iter().any(|wanted| self.tags.contains(wanted))
    }
}

/// Normalized reaction counters of a post.
///
/// Older payloads report reactions as a single aggregate number while
/// newer ones send a `{ likes, dislikes }` object. Both deserialize into
/// this pair; a bare number counts as likes, and absent fields are zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Reactions {
    pub likes: u64,
    pub dislikes: u64,
}

impl Reactions {
    #[must_use]
    pub const fn new(likes: u64, dislikes: u64) -> Self {
        Self { likes, dislikes }
    }
}

impl fmt::Display for Reactions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} likes | {} dislikes", self.likes, self.dislikes)
    }
}

impl<'de> Deserialize<'de> for Reactions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{Error as DeError, MapAccess, Unexpected};

        struct Visitor;

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = Reactions;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a reaction count or a { likes, dislikes } object")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: DeError,
            {
                Ok(Reactions::new(v, 0))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: DeError,
            {
                let likes = u64::try_from(v)
                    .map_err(|_| DeError::invalid_value(Unexpected::Signed(v), &self))?;

                self.visit_u64(likes)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: DeError,
            {
                Ok(Reactions::default())
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: DeError,
            {
                Ok(Reactions::default())
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut reactions = Reactions::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "likes" => reactions.likes = map.next_value::<Option<u64>>()?.unwrap_or(0),
                        "dislikes" => {
                            reactions.dislikes = map.next_value::<Option<u64>>()?.unwrap_or(0);
                        }
                        _ => {
                            map.next_value::<serde::de::IgnoredAny>()?;
                        }
                    }
                }
                Ok(reactions)
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}
