use serde::{Deserialize, Serialize};

/// A resource path pattern. Matching is done by `native-image`; here it is
/// opaque data with set semantics.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub pattern: String,
}

impl ResourceEntry {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

/// A resource bundle base name, e.g. `org.apache.cxf.Messages`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceBundleEntry {
    pub name: String,
}

impl ResourceBundleEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Content of `resources.arthur.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcesModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<ResourceEntry>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundles: Option<Vec<ResourceBundleEntry>>,
}

impl ResourcesModel {
    pub fn is_empty(&self) -> bool {
        self.resources.is_none() && self.bundles.is_none()
    }
}
