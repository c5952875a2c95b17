use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use super::record::{Attributes, Timestamped};
use super::stamp::Stamp;

#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub created_at: Stamp,
    pub updated_at: Stamp,
}

impl Article {
    pub fn new(title: impl Into<String>, created_at: Stamp, updated_at: Stamp) -> Self {
        Self { id: Uuid::new_v4(), title: title.into(), created_at, updated_at }
    }
}

impl Timestamped for Article {
    fn created_at(&self) -> Stamp {
        self.created_at.clone()
    }

    fn updated_at(&self) -> Stamp {
        self.updated_at.clone()
    }
}

impl Attributes for Article {
    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(json!(self.id)),
            "title" => Some(json!(self.title)),
            "created_at" => Some(json!(self.created_at)),
            "updated_at" => Some(json!(self.updated_at)),
            _ => None,
        }
    }
}
