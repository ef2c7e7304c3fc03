use crate::error::ClassResolutionError;
use crate::hierarchy::Hierarchy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// The universal root type; never part of a hierarchy walk.
pub const OBJECT_CLASS: &str = "java.lang.Object";

/// Structural view of one compiled class. Identity is `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationInfo>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodInfo>,
}

impl ClassInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            superclass: None,
            interfaces: Vec::new(),
            annotations: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_superclass(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_annotation(mut self, annotation: AnnotationInfo) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_method(mut self, method: MethodInfo) -> Self {
        self.methods.push(method);
        self
    }

    pub fn annotation(&self, name: &str) -> Option<&AnnotationInfo> {
        self.annotations.iter().find(|a| a.name == name)
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotation(name).is_some()
    }

    /// Superclass first, then interfaces in declaration order.
    pub fn super_types(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.superclass
            .iter()
            .chain(self.interfaces.iter())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, serde_json::Value>,
}

impl AnnotationInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodInfo {
    /// Filled in by `ClassPool::insert` when the method is nested in its class.
    #[serde(default)]
    pub declaring_class: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameter_types: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationInfo>,
}

impl MethodInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            declaring_class: String::new(),
            name: name.into(),
            parameter_types: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: AnnotationInfo) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a.name == name)
    }
}

/// Resolves classes by fully-qualified name.
pub trait ClassLoader {
    fn load_class(&self, name: &str) -> Result<Arc<ClassInfo>, ClassResolutionError>;
}

/// Queries over the scanned application classes.
///
/// Implementations own any caching; the build context delegates verbatim.
pub trait ClassIndex {
    fn find_annotated_classes(&self, annotation: &str) -> Vec<Arc<ClassInfo>>;

    fn find_annotated_methods(&self, annotation: &str) -> Vec<MethodInfo>;

    fn find_implementations(&self, base: &str) -> Vec<Arc<ClassInfo>>;
}

/// In-memory, name-ordered class index and loader.
#[derive(Debug, Clone, Default)]
pub struct ClassPool {
    classes: BTreeMap<String, Arc<ClassInfo>>,
}

impl ClassPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a class, returning the previous definition.
    pub fn insert(&mut self, mut class: ClassInfo) -> Option<Arc<ClassInfo>> {
        for method in &mut class.methods {
            if method.declaring_class.is_empty() {
                method.declaring_class = class.name.clone();
            }
        }
        self.classes.insert(class.name.clone(), Arc::new(class))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }
}

impl FromIterator<ClassInfo> for ClassPool {
    fn from_iter<T: IntoIterator<Item = ClassInfo>>(iter: T) -> Self {
        let mut pool = ClassPool::new();
        for class in iter {
            pool.insert(class);
        }
        pool
    }
}

impl ClassLoader for ClassPool {
    fn load_class(&self, name: &str) -> Result<Arc<ClassInfo>, ClassResolutionError> {
        self.classes
            .get(name)
            .cloned()
            .ok_or_else(|| ClassResolutionError::new(name))
    }
}

impl ClassIndex for ClassPool {
    fn find_annotated_classes(&self, annotation: &str) -> Vec<Arc<ClassInfo>> {
        self.classes
            .values()
            .filter(|c| c.has_annotation(annotation))
            .cloned()
            .collect()
    }

    fn find_annotated_methods(&self, annotation: &str) -> Vec<MethodInfo> {
        self.classes
            .values()
            .flat_map(|c| c.methods.iter())
            .filter(|m| m.has_annotation(annotation))
            .cloned()
            .collect()
    }

    fn find_implementations(&self, base: &str) -> Vec<Arc<ClassInfo>> {
        // A super type outside the pool (JDK or framework type) still counts
        // by name; it just can't be walked further.
        self.classes
            .values()
            .filter(|c| c.name != base)
            .filter(|c| {
                Hierarchy::new(Arc::clone(c), self)
                    .skip(1)
                    .any(|t| match t {
                        Ok(t) => t.name == base,
                        Err(e) => e.name == base,
                    })
            })
            .cloned()
            .collect()
    }
}
