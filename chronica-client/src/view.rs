use chronica_common::model::{
    Id,
    post::{PLACEHOLDER_IMAGE_URL, Post, PostMarker},
};

/// Longest card excerpt before truncation kicks in.
pub const EXCERPT_CHARS: usize = 150;

/// The post-list view.
///
/// `Empty` (no posts at all) and `NoMatches` (a search found nothing) are
/// distinct empty states with their own copy.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ListState {
    Loading,
    Loaded(Vec<BlogCard>),
    Empty,
    NoMatches,
}

impl ListState {
    #[must_use]
    pub fn from_posts(posts: &[Post]) -> Self {
        if posts.is_empty() {
            Self::Empty
        } else {
            Self::Loaded(posts.iter().map(BlogCard::new).collect())
        }
    }
}

/// One rendered post card: image, title, truncated excerpt, and the detail
/// trigger (the post id).
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BlogCard {
    pub id: Id<PostMarker>,
    pub title: String,
    pub excerpt: String,
    pub image_url: String,
}

impl BlogCard {
    #[must_use]
    pub fn new(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            excerpt: excerpt(&post.content),
            image_url: post.image_url.clone(),
        }
    }

    /// Swaps in the placeholder when the card's image fails to load.
    pub fn on_image_error(&mut self) {
        self.image_url = PLACEHOLDER_IMAGE_URL.to_owned();
    }
}

/// First [`EXCERPT_CHARS`] characters of the content, with an ellipsis marker
/// only when something was actually cut.
#[must_use]
pub fn excerpt(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();

    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
