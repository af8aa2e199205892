use crate::{
    api::BlogApi,
    forms::{ContactForm, PostForm},
    notify::{NotificationCenter, Severity},
    overlay::{Key, OverlayHost},
    search::{DEBOUNCE_DELAY, SearchDebouncer, normalize, post_matches},
    view::{BlogCard, ListState},
};
use chronica_common::model::{
    Id,
    post::{Post, PostMarker},
};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::warn;

/// The client application. Constructed once at startup; owns the transient
/// copy of the fetched post list and every piece of view state.
pub struct BlogController<A> {
    api: A,
    posts: Vec<Post>,
    list: ListState,
    pub notifications: NotificationCenter,
    pub overlay: OverlayHost,
    debouncer: SearchDebouncer,
    search_rx: UnboundedReceiver<String>,
}

impl<A: BlogApi> BlogController<A> {
    #[must_use]
    pub fn new(api: A) -> Self {
        let (debouncer, search_rx) = SearchDebouncer::new(DEBOUNCE_DELAY);

        Self {
            api,
            posts: Vec::new(),
            list: ListState::Loading,
            notifications: NotificationCenter::new(),
            overlay: OverlayHost::new(),
            debouncer,
            search_rx,
        }
    }

    #[must_use]
    pub fn list(&self) -> &ListState {
        &self.list
    }

    /// Initial page load, also re-run after a successful post creation.
    /// Fetch failures notify and degrade to the empty state.
    pub async fn load_posts(&mut self) {
        self.list = ListState::Loading;

        match self.api.fetch_posts().await {
            Ok(posts) => {
                self.list = ListState::from_posts(&posts);
                self.posts = posts;
            }
            Err(e) => {
                warn!("Error loading blogs: {e}");
                self.notifications.push(e.to_string(), Severity::Error);
                self.posts.clear();
                self.list = ListState::Empty;
            }
        }
    }

    /// Blog-form submission: on success, notify, reset the form, and refresh
    /// the list; on failure, notify and leave the form intact.
    pub async fn submit_post(&mut self, form: &mut PostForm) {
        match self.api.create_post(&form.to_create_post()).await {
            Ok(_) => {
                self.notifications
                    .push("Blog posted successfully!", Severity::Success);
                form.reset();
                self.load_posts().await;
            }
            Err(e) => {
                warn!("Error posting blog: {e}");
                self.notifications.push(e.to_string(), Severity::Error);
            }
        }
    }

    /// Contact-form submission. Write-only: no list refresh on success.
    pub async fn submit_contact(&mut self, form: &mut ContactForm) {
        match self.api.send_contact(&form.to_message()).await {
            Ok(()) => {
                self.notifications
                    .push("Message sent successfully!", Severity::Success);
                form.reset();
            }
            Err(e) => {
                warn!("Error sending message: {e}");
                self.notifications.push(e.to_string(), Severity::Error);
            }
        }
    }

    /// A keystroke in the search box. The lookup itself fires through
    /// [`Self::next_search`] once input has been quiet for the debounce
    /// delay.
    pub fn on_search_input(&mut self, term: impl Into<String>) {
        self.debouncer.input(term);
    }

    /// Waits for the next debounced search term and runs its lookup.
    /// Returns `false` once no further dispatch can arrive.
    pub async fn next_search(&mut self) -> bool {
        match self.search_rx.recv().await {
            Some(term) => {
                self.run_search(&term).await;
                true
            }
            None => false,
        }
    }

    async fn run_search(&mut self, term: &str) {
        let normalized = normalize(term);

        let posts = match self.api.fetch_posts().await {
            Ok(posts) => posts,
            Err(e) => {
                warn!("Error searching blogs: {e}");
                self.notifications
                    .push("Error searching blogs", Severity::Error);
                // Keep whatever is currently on screen.
                return;
            }
        };
        self.posts = posts;

        if normalized.is_empty() {
            self.list = ListState::from_posts(&self.posts);
            return;
        }

        let matching: Vec<BlogCard> = self
            .posts
            .iter()
            .filter(|post| post_matches(post, &normalized))
            .map(BlogCard::new)
            .collect();
        self.list = if matching.is_empty() {
            ListState::NoMatches
        } else {
            ListState::Loaded(matching)
        };
    }

    /// "Read more" on a card.
    pub fn open_detail(&mut self, id: Id<PostMarker>) {
        if let Some(post) = self.posts.iter().find(|post| post.id == id) {
            self.overlay.open(post);
        }
    }

    pub fn on_key(&mut self, key: Key) {
        self.overlay.on_key(key);
    }
}
