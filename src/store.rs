use async_trait::async_trait;
use mongodb::{Client, Collection, bson::oid::ObjectId};

use crate::config::Settings;
use crate::db_mongo::{self, models::Entry, queries};
use crate::error::Result;

/// The collection operations an interactive session needs.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Remove every document. Safe to call on an empty or missing collection.
    async fn drop_all(&self) -> Result<()>;

    /// Insert a new entry and return the generated id.
    async fn insert(&self, input: &str) -> Result<ObjectId>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Entry>>;

    /// Every stored entry, in whatever order the backend returns them.
    async fn find_all(&self) -> Result<Vec<Entry>>;

    /// Release the underlying connection.
    async fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// A [`DocumentStore`] backed by one MongoDB collection. Owns the client.
pub struct MongoStore {
    client: Client,
    collection: Collection<Entry>,
}

impl MongoStore {
    pub async fn connect(settings: &Settings) -> Result<Self> {
        tracing::info!(
            "Connecting to {} ({}.{})",
            settings.redacted_uri(),
            settings.database_name,
            settings.collection_name
        );
        let client = db_mongo::create_client(&settings.uri(), settings.connect_timeout).await?;
        let collection =
            db_mongo::get_collection(&client, &settings.database_name, &settings.collection_name);

        Ok(Self { client, collection })
    }

    pub fn namespace(&self) -> String {
        self.collection.namespace().to_string()
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn drop_all(&self) -> Result<()> {
        tracing::info!("Dropping collection {}", self.namespace());
        queries::drop_entries(&self.collection).await
    }

    async fn insert(&self, input: &str) -> Result<ObjectId> {
        queries::insert_entry(&self.collection, input).await
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Entry>> {
        queries::get_entry_by_id(&self.collection, id).await
    }

    async fn find_all(&self) -> Result<Vec<Entry>> {
        queries::get_all_entries(&self.collection).await
    }

    async fn close(self) -> Result<()> {
        self.client.shutdown().await;
        tracing::info!("MongoDB connection closed");
        Ok(())
    }
}
