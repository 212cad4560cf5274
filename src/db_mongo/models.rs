use std::fmt;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// One line of user input as stored in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub input: String,
}

impl Entry {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            id: None,
            input: input.into(),
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(
                f,
                "{{ \"_id\": ObjectId(\"{}\"), \"input\": {:?} }}",
                id, self.input
            ),
            None => write!(f, "{{ \"input\": {:?} }}", self.input),
        }
    }
}
