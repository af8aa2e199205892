use crate::{
    client::{BlogStore, DbError, Result},
    record::{ContactRecord, PostRecord},
};
use async_trait::async_trait;
use chronica_common::model::{
    contact::{Contact, ContactMessage},
    post::{CreatePost, Post},
};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// In-memory [`BlogStore`] with the same defaulting and ordering behavior as
/// the MongoDB client. Used by tests in place of a running server.
#[derive(Default)]
pub struct MemoryStore {
    posts: Mutex<Vec<PostRecord>>,
    contacts: Mutex<Vec<ContactRecord>>,
    unreachable: AtomicBool,
    reject_writes: AtomicBool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation fail as if the server were down.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::Relaxed);
    }

    /// Makes subsequent writes fail the way the store rejects a bad
    /// document, while reads keep working.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::Relaxed);
    }

    pub async fn contact_count(&self) -> usize {
        self.contacts.lock().await.len()
    }

    fn check_reachable(&self) -> Result<()> {
        if self.unreachable.load(Ordering::Relaxed) {
            Err(DbError::Unavailable)
        } else {
            Ok(())
        }
    }

    fn check_writable(&self) -> Result<()> {
        if self.reject_writes.load(Ordering::Relaxed) {
            Err(DbError::Mongo(mongodb::error::Error::custom(
                "simulated write rejection",
            )))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        self.check_reachable()?;

        let mut records = self.posts.lock().await.clone();
        records.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(records.into_iter().map(Post::from).collect())
    }

    async fn create_post(&self, post: &CreatePost) -> Result<Post> {
        self.check_reachable()?;
        self.check_writable()?;

        let record = PostRecord::new(post);
        self.posts.lock().await.push(record.clone());

        Ok(record.into())
    }

    async fn create_contact(&self, message: &ContactMessage) -> Result<Contact> {
        self.check_reachable()?;
        self.check_writable()?;

        let record = ContactRecord::new(message);
        self.contacts.lock().await.push(record.clone());

        Ok(record.into())
    }
}
