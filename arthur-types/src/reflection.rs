use crate::is_false;
use serde::{Deserialize, Serialize};

/// Reflective access request for one class.
///
/// `name` is the identity: the build context keeps at most one entry per
/// name and a later registration replaces an earlier one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionEntry {
    pub name: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub all_declared_constructors: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub all_public_constructors: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub all_declared_methods: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub all_public_methods: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub all_declared_classes: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub all_public_classes: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub all_declared_fields: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub all_public_fields: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodReflection>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldReflection>,
}

impl ReflectionEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Turns on every `allDeclared*` flag.
    pub fn set_all(&mut self) {
        self.all_declared_constructors = true;
        self.all_declared_methods = true;
        self.all_declared_classes = true;
        self.all_declared_fields = true;
    }

    pub fn with_all(mut self) -> Self {
        self.set_all();
        self
    }

    /// Sets a flag by its annotation/JSON attribute name.
    ///
    /// Returns `false` when `flag` is not a known capability name. `all` is
    /// accepted and only ever enables flags.
    pub fn set_flag(&mut self, flag: &str, value: bool) -> bool {
        match flag {
            "all" => {
                if value {
                    self.set_all();
                }
            }
            "allDeclaredConstructors" => self.all_declared_constructors = value,
            "allPublicConstructors" => self.all_public_constructors = value,
            "allDeclaredMethods" => self.all_declared_methods = value,
            "allPublicMethods" => self.all_public_methods = value,
            "allDeclaredClasses" => self.all_declared_classes = value,
            "allPublicClasses" => self.all_public_classes = value,
            "allDeclaredFields" => self.all_declared_fields = value,
            "allPublicFields" => self.all_public_fields = value,
            _ => return false,
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodReflection {
    pub name: String,

    /// `None` matches every overload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_types: Option<Vec<String>>,
}

impl MethodReflection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameter_types: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReflection {
    pub name: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_write: bool,
}

impl FieldReflection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            allow_write: false,
        }
    }
}
