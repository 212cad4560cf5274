use mongodb::bson::{Bson, oid::ObjectId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid value `{value}` for {key}: {reason}")]
    Config {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to connect to MongoDB at {uri}")]
    Connect {
        uri: String,
        #[source]
        source: mongodb::error::Error,
    },

    #[error(transparent)]
    Database(#[from] mongodb::error::Error),

    #[error("insert returned a non-ObjectId _id: {0}")]
    UnexpectedId(Bson),

    #[error("document {0} was not found right after being inserted")]
    MissingDocument(ObjectId),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
