use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::config::NoveltySettings;
use crate::domain::novelty::{classify, Novelty};
use crate::domain::record::{Attributes, Timestamped};
use crate::services::visit::VisitTracker;

/// Gives timestamped records a read-only novelty attribute.
#[derive(Debug, Clone)]
pub struct NoveltyBehavior {
    settings: Arc<NoveltySettings>,
}

impl NoveltyBehavior {
    pub fn new(settings: Arc<NoveltySettings>) -> Self {
        Self { settings }
    }

    pub fn attribute_name(&self) -> &str {
        &self.settings.novelty_attribute
    }

    pub fn classify<R>(&self, record: &R, tracker: &mut VisitTracker) -> Novelty
    where
        R: Timestamped + ?Sized,
    {
        let prev = tracker.previous_visit();
        let created_at = record.created_at();
        let updated_at = record.updated_at();
        if !created_at.same_kind(&prev) || !updated_at.same_kind(&prev) {
            warn!(
                %created_at, %updated_at, prev_visit = %prev,
                format = self.settings.timestamp_format.describe(),
                "record stamps do not match the configured timestamp format"
            );
        }
        classify(&created_at, &updated_at, &prev)
    }

    /// The configured value for the record's novelty.
    pub fn novelty<R>(&self, record: &R, tracker: &mut VisitTracker) -> Value
    where
        R: Timestamped + ?Sized,
    {
        let novelty = self.classify(record, tracker);
        self.settings.novelty_values.value(novelty).clone()
    }

    pub fn can_get<R>(&self, record: &R, name: &str) -> bool
    where
        R: Attributes + ?Sized,
    {
        name == self.attribute_name() || record.has_attribute(name)
    }

    /// Looks up `name` on the record, answering the novelty attribute itself and
    /// leaving every other name to the record. `None` means not found.
    pub fn attribute<R>(&self, record: &R, name: &str, tracker: &mut VisitTracker) -> Option<Value>
    where
        R: Timestamped + Attributes + ?Sized,
    {
        if name == self.attribute_name() {
            return Some(self.novelty(record, tracker));
        }
        record.attribute(name)
    }
}
