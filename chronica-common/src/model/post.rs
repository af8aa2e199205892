use crate::model::Id;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Image shown for posts submitted without one.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/400x200?text=Historical+Blogs";

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

/// A stored blog post. Immutable once created; there is no update or delete.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Id<PostMarker>,
    pub title: String,
    pub content: String,
    pub image_url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

/// Client-supplied fields for post creation. The store assigns `id`, fills
/// `date` with the creation time when absent, and applies the placeholder
/// image when `image_url` is absent or blank.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<OffsetDateTime>,
}

impl CreatePost {
    #[must_use]
    pub fn image_url_or_placeholder(&self) -> String {
        match self.image_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url.to_owned(),
            _ => PLACEHOLDER_IMAGE_URL.to_owned(),
        }
    }
}
