use serde_json::Value;

use super::stamp::Stamp;

/// A record whose creation and last update are known.
///
/// Stamps must be in the same representation as the configured
/// [`TimestampFormat`](super::stamp::TimestampFormat).
pub trait Timestamped {
    fn created_at(&self) -> Stamp;
    fn updated_at(&self) -> Stamp;
}

/// By-name read access to a record's own fields.
pub trait Attributes {
    /// `None` when the record has no such attribute.
    fn attribute(&self, name: &str) -> Option<Value>;

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}
