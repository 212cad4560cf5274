use mongodb::{Collection, bson::{doc, oid::ObjectId}};

use super::models::Entry;
use crate::error::{Error, Result};

pub async fn drop_entries(collection: &Collection<Entry>) -> Result<()> {
    // dropping a missing collection is a no-op on the server
    collection.drop().await?;
    Ok(())
}

pub async fn insert_entry(collection: &Collection<Entry>, input: &str) -> Result<ObjectId> {
    let result = collection.insert_one(Entry::new(input)).await?;

    result
        .inserted_id
        .as_object_id()
        .ok_or(Error::UnexpectedId(result.inserted_id))
}

pub async fn get_entry_by_id(
    collection: &Collection<Entry>,
    id: ObjectId,
) -> Result<Option<Entry>> {
    let entry = collection.find_one(doc! { "_id": id }).await?;

    Ok(entry)
}

pub async fn get_all_entries(collection: &Collection<Entry>) -> Result<Vec<Entry>> {
    let mut cursor = collection.find(doc! {}).await?;

    let mut entries = Vec::new();
    while cursor.advance().await? {
        entries.push(cursor.deserialize_current()?);
    }

    Ok(entries)
}
