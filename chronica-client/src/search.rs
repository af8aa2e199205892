use chronica_common::model::post::Post;
use std::time::Duration;
use tokio::{sync::mpsc, task::JoinHandle, time};

/// Quiet period after the last keystroke before a lookup fires.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Search terms are trimmed and lowercased before matching.
#[must_use]
pub fn normalize(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Case-insensitive substring match against title or content. Expects a
/// [`normalize`]d term.
#[must_use]
pub fn post_matches(post: &Post, normalized_term: &str) -> bool {
    post.title.to_lowercase().contains(normalized_term)
        || post.content.to_lowercase().contains(normalized_term)
}

/// Delays search dispatch until input has been quiet for the configured
/// delay. A new input aborts the pending dispatch and reschedules it, so at
/// most one lookup fires per quiet period.
pub struct SearchDebouncer {
    delay: Duration,
    tx: mpsc::UnboundedSender<String>,
    pending: Option<JoinHandle<()>>,
}

impl SearchDebouncer {
    #[must_use]
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    pub fn input(&mut self, term: impl Into<String>) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let tx = self.tx.clone();
        let term = term.into();
        // Anchor the quiet period at the keystroke itself, not at the first
        // poll of the spawned task.
        let deadline = time::Instant::now() + self.delay;
        self.pending = Some(tokio::spawn(async move {
            time::sleep_until(deadline).await;
            // The receiver may be gone during shutdown; nothing to do then.
            let _ = tx.send(term);
        }));
    }
}
