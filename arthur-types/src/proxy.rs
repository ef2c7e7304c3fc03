use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The interfaces one synthesized proxy type implements.
///
/// Equality is set equality: `{A, B}` and `{B, A}` are the same proxy.
/// Serializes as a sorted JSON array of class names.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DynamicProxyModel {
    classes: BTreeSet<String>,
}

impl DynamicProxyModel {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        classes.into_iter().collect()
    }

    pub fn classes(&self) -> &BTreeSet<String> {
        &self.classes
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for DynamicProxyModel {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            classes: iter.into_iter().map(Into::into).collect(),
        }
    }
}
