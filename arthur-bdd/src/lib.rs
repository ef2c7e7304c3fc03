//! BDD harness (cucumber-rs).
//!
//! This crate exists to keep scenario tests isolated from the production
//! crates. The helpers here build class index fixtures for the scenarios.

use anyhow::Context;
use arthur_domain::{AnnotationInfo, ClassInfo, MethodInfo};
use arthur_index::ClassIndexFile;

/// Accumulates classes for an `index.json` fixture.
#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    classes: Vec<ClassInfo>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn class_mut(&mut self, name: &str) -> &mut ClassInfo {
        let pos = match self.classes.iter().position(|c| c.name == name) {
            Some(pos) => pos,
            None => {
                self.classes.push(ClassInfo::new(name));
                self.classes.len() - 1
            }
        };
        &mut self.classes[pos]
    }

    pub fn class(&mut self, name: &str) -> &mut Self {
        self.class_mut(name);
        self
    }

    pub fn annotate_class(&mut self, name: &str, annotation: AnnotationInfo) -> &mut Self {
        self.class_mut(name).annotations.push(annotation);
        self
    }

    pub fn annotate_method(
        &mut self,
        class: &str,
        method: &str,
        annotation: AnnotationInfo,
    ) -> &mut Self {
        self.class_mut(class)
            .methods
            .push(MethodInfo::new(method).with_annotation(annotation));
        self
    }

    pub fn set_superclass(&mut self, class: &str, superclass: &str) -> &mut Self {
        self.class_mut(class).superclass = Some(superclass.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        let file = ClassIndexFile {
            classes: self.classes.clone(),
        };
        serde_json::to_string_pretty(&file).context("serialize class index")
    }
}
