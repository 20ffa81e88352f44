//! Count request descriptor

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caller-built description of a remote count.
///
/// Collections and types keep the order they were given in; both are
/// replaced wholesale by their setters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountRequest {
    collections: Vec<String>,
    types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    routing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preference: Option<String>,
}

impl CountRequest {
    /// Count over every collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the target collections.
    pub fn with_collections<I, S>(mut self, collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_collections(collections);
        self
    }

    /// Replace the filtering types.
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_types(types);
        self
    }

    /// Restrict the count to documents matching `query`.
    pub fn with_query(mut self, query: Value) -> Self {
        self.query = Some(query);
        self
    }

    /// Only count documents scoring at least `min_score`.
    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = Some(min_score);
        self
    }

    /// Route the count to the shards owning `routing`.
    pub fn with_routing(mut self, routing: impl Into<String>) -> Self {
        self.routing = Some(routing.into());
        self
    }

    /// Replica preference, e.g. `_local`.
    pub fn with_preference(mut self, preference: impl Into<String>) -> Self {
        self.preference = Some(preference.into());
        self
    }

    pub(crate) fn set_collections<I, S>(&mut self, collections: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collections = collections.into_iter().map(Into::into).collect();
    }

    pub(crate) fn set_types<I, S>(&mut self, types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
    }

    pub(crate) fn push_collection(&mut self, collection: impl Into<String>) {
        self.collections.push(collection.into());
    }

    pub(crate) fn push_type(&mut self, type_: impl Into<String>) {
        self.types.push(type_.into());
    }

    pub(crate) fn set_query(&mut self, query: Value) {
        self.query = Some(query);
    }

    pub(crate) fn set_min_score(&mut self, min_score: f32) {
        self.min_score = Some(min_score);
    }

    pub(crate) fn set_routing(&mut self, routing: impl Into<String>) {
        self.routing = Some(routing.into());
    }

    pub(crate) fn set_preference(&mut self, preference: impl Into<String>) {
        self.preference = Some(preference.into());
    }

    /// Target collections, in insertion order.
    pub fn collections(&self) -> &[String] {
        &self.collections
    }

    /// Filtering types, in insertion order.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Query restricting the count, if any.
    pub fn query(&self) -> Option<&Value> {
        self.query.as_ref()
    }

    /// Minimum score a document needs to be counted.
    pub fn min_score(&self) -> Option<f32> {
        self.min_score
    }

    /// Shard routing value.
    pub fn routing(&self) -> Option<&str> {
        self.routing.as_deref()
    }

    /// Replica preference.
    pub fn preference(&self) -> Option<&str> {
        self.preference.as_deref()
    }

    /// Human-readable description used in errors and profiling labels.
    ///
    /// `"<operation> request[ on collections 'a,b'][ on types 't1,t2']"`; a
    /// clause only appears when its list is non-empty.
    ///
    /// ```
    /// use sonde_search::CountRequest;
    ///
    /// let request = CountRequest::new().with_collections(["a", "b"]);
    /// assert_eq!(request.describe("count"), "count request on collections 'a,b'");
    /// ```
    pub fn describe(&self, operation: &str) -> String {
        let mut message = format!("{operation} request");
        if !self.collections.is_empty() {
            message.push_str(&format!(" on collections '{}'", self.collections.join(",")));
        }
        if !self.types.is_empty() {
            message.push_str(&format!(" on types '{}'", self.types.join(",")));
        }
        message
    }
}
