use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a record stands relative to the visitor's previous visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Novelty {
    /// Nothing changed since the previous visit.
    Standard,
    /// Created since the previous visit.
    New,
    /// Existed before the previous visit, modified since.
    Updated,
}

/// Classifies a record from its stamps. Ties go to `New`/`Updated`: a record
/// touched exactly at the previous visit counts as unseen.
pub fn classify<T>(created_at: &T, updated_at: &T, prev_visit: &T) -> Novelty
where
    T: PartialOrd + ?Sized,
{
    if updated_at < prev_visit {
        Novelty::Standard
    } else if created_at >= prev_visit {
        Novelty::New
    } else {
        Novelty::Updated
    }
}

/// What callers get back for each state. Defaults to `null`, `"new"`, `"updated"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoveltyValues {
    pub standard: Value,
    pub new: Value,
    pub updated: Value,
}

impl Default for NoveltyValues {
    fn default() -> Self {
        Self {
            standard: Value::Null,
            new: Value::from("new"),
            updated: Value::from("updated"),
        }
    }
}

impl NoveltyValues {
    pub fn value(&self, novelty: Novelty) -> &Value {
        match novelty {
            Novelty::Standard => &self.standard,
            Novelty::New => &self.new,
            Novelty::Updated => &self.updated,
        }
    }
}
