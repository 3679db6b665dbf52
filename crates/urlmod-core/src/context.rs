//! Request contexts handed to the hooks by the host.
//!
//! Hosts attach fields this layer knows nothing about. Those land in `extra`
//! and travel unchanged into any deferred call, so a deferral never loses
//! information.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::format::ModuleFormat;

/// Context accompanying a resolve request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentContext {
    /// Locator of the importing module, if the host knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_locator: Option<String>,

    /// Export conditions the host resolves with.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<String>,

    /// Import attributes written on the import statement.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub import_attributes: BTreeMap<String, String>,

    /// Host fields unknown to this layer.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ParentContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the importing module's locator.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_locator = Some(parent.into());
        self
    }

    /// Add an export condition.
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    /// Set an import attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.import_attributes.insert(key.into(), value.into());
        self
    }

    /// Attach an opaque host field.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn parent_locator(&self) -> Option<&str> {
        self.parent_locator.as_deref()
    }

    /// Same context with the parent locator removed; every other field kept.
    pub fn without_parent(mut self) -> Self {
        self.parent_locator = None;
        self
    }
}

/// Context accompanying a load request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadContext {
    /// Format the host already expects, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ModuleFormat>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub import_attributes: BTreeMap<String, String>,

    /// Host fields unknown to this layer.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LoadContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: ModuleFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.import_attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
