use crate::record::{ContactRecord, PostRecord};
use async_trait::async_trait;
use chronica_common::model::{
    contact::{Contact, ContactMessage},
    post::{CreatePost, Post},
};
use futures::TryStreamExt;
use mongodb::{Client, Collection, Database, bson::doc};
use thiserror::Error;

pub type Result<T, E = DbError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database connection string does not name a database")]
    MissingDatabaseName,
    #[error("Database connection not available")]
    Unavailable,
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

impl DbError {
    /// True when the failure is the store being unreachable, as opposed to a
    /// problem with the operation itself. Unreachability is a server-side
    /// condition on every route; a write that the store rejects is the
    /// client's payload.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        match self {
            DbError::Unavailable => true,
            DbError::MissingDatabaseName => false,
            DbError::Mongo(error) => matches!(
                *error.kind,
                mongodb::error::ErrorKind::ServerSelection { .. }
                    | mongodb::error::ErrorKind::Io(_)
            ),
        }
    }
}

/// Persistence seam for the API service.
///
/// Implemented by the MongoDB-backed [`DbClient`] and by
/// [`MemoryStore`](crate::memory::MemoryStore) so the service can be
/// exercised without a running server.
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// All posts, ordered by `date` descending.
    async fn list_posts(&self) -> Result<Vec<Post>>;

    /// Applies the image and date defaults, assigns an id, and persists.
    async fn create_post(&self, post: &CreatePost) -> Result<Post>;

    /// Persists the message verbatim and assigns an id.
    async fn create_contact(&self, message: &ContactMessage) -> Result<Contact>;
}

pub struct DbClient {
    database: Database,
}

impl DbClient {
    /// Builds a client from a connection string. The driver connects lazily,
    /// so this succeeds while the server is down and individual operations
    /// report the failure instead; the process keeps serving static assets.
    pub async fn connect(uri: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let database = client
            .default_database()
            .ok_or(DbError::MissingDatabaseName)?;

        Ok(Self { database })
    }

    fn blogs(&self) -> Collection<PostRecord> {
        self.database.collection("blogs")
    }

    fn contacts(&self) -> Collection<ContactRecord> {
        self.database.collection("contacts")
    }
}

#[async_trait]
impl BlogStore for DbClient {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        let records: Vec<PostRecord> = self
            .blogs()
            .find(doc! {})
            .sort(doc! { "date": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(records.into_iter().map(Post::from).collect())
    }

    async fn create_post(&self, post: &CreatePost) -> Result<Post> {
        let record = PostRecord::new(post);
        self.blogs().insert_one(&record).await?;

        Ok(record.into())
    }

    async fn create_contact(&self, message: &ContactMessage) -> Result<Contact> {
        let record = ContactRecord::new(message);
        self.contacts().insert_one(&record).await?;

        Ok(record.into())
    }
}
