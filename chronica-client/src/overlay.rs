use chronica_common::model::post::Post;
use time::{OffsetDateTime, macros::format_description};

/// Keys the overlay reacts to.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Key {
    Escape,
    Other,
}

/// Handle for a registered page-level key listener.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ListenerId(u64);

/// The full-screen detail view for one post.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct DetailOverlay {
    pub title: String,
    pub content: String,
    pub formatted_date: String,
    pub image_url: String,
    listener: ListenerId,
}

/// Owns the detail overlay and the page state it borrows: the key-listener
/// registry and the background scroll lock.
///
/// Each open registers exactly one key listener, and every dismissal path
/// (close control, click outside, Escape) unregisters that same listener, so
/// repeated open/close cycles leave nothing behind.
pub struct OverlayHost {
    next_listener: u64,
    key_listeners: Vec<ListenerId>,
    scroll_locked: bool,
    open: Option<DetailOverlay>,
}

impl OverlayHost {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_listener: 0,
            key_listeners: Vec::new(),
            scroll_locked: false,
            open: None,
        }
    }

    pub fn open(&mut self, post: &Post) {
        // Only one overlay at a time.
        self.close();

        let listener = self.register_listener();
        self.open = Some(DetailOverlay {
            title: post.title.clone(),
            content: post.content.clone(),
            formatted_date: format_long_date(post.date),
            image_url: post.image_url.clone(),
            listener,
        });
        self.scroll_locked = true;
    }

    /// The close control and click-outside dismissal both land here.
    pub fn close(&mut self) {
        if let Some(overlay) = self.open.take() {
            self.unregister_listener(overlay.listener);
            self.scroll_locked = false;
        }
    }

    pub fn on_key(&mut self, key: Key) {
        if key != Key::Escape {
            return;
        }

        let listening = self
            .open
            .as_ref()
            .is_some_and(|overlay| self.key_listeners.contains(&overlay.listener));
        if listening {
            self.close();
        }
    }

    #[must_use]
    pub fn overlay(&self) -> Option<&DetailOverlay> {
        self.open.as_ref()
    }

    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    #[must_use]
    pub fn key_listener_count(&self) -> usize {
        self.key_listeners.len()
    }

    fn register_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.key_listeners.push(id);
        id
    }

    fn unregister_listener(&mut self, id: ListenerId) {
        self.key_listeners.retain(|listener| *listener != id);
    }
}

impl Default for OverlayHost {
    fn default() -> Self {
        Self::new()
    }
}

/// "January 2, 2006" style date shown in the detail view.
#[must_use]
pub fn format_long_date(date: OffsetDateTime) -> String {
    let format = format_description!("[month repr:long] [day padding:none], [year]");

    date.format(&format).unwrap_or_default()
}
