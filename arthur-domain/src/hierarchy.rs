use crate::error::ClassResolutionError;
use crate::ports::{ClassInfo, ClassLoader, OBJECT_CLASS};
use std::collections::HashSet;
use std::sync::Arc;

/// Lazy, distinct walk over a type, its superclasses and every interface it
/// reaches, excluding `java.lang.Object`.
///
/// Order is depth-first pre-order: the type, its superclass chain, then each
/// interface subtree in declaration order. A type reachable through several
/// paths (interface diamonds) is yielded once and expanded once.
///
/// Super types are resolved through the loader as the walk reaches them. A
/// name that cannot be resolved is yielded as an `Err` and the walk carries
/// on with the remaining branches.
pub struct Hierarchy<'a> {
    loader: &'a dyn ClassLoader,
    start: Option<Arc<ClassInfo>>,
    pending: Vec<String>,
    visited: HashSet<String>,
}

impl<'a> Hierarchy<'a> {
    pub fn new(start: Arc<ClassInfo>, loader: &'a dyn ClassLoader) -> Self {
        Self {
            loader,
            start: Some(start),
            pending: Vec::new(),
            visited: HashSet::new(),
        }
    }

    fn expand(&mut self, class: &ClassInfo) {
        // Reverse so the superclass is popped first.
        for name in class.super_types().rev() {
            if name != OBJECT_CLASS && !self.visited.contains(name) {
                self.pending.push(name.to_string());
            }
        }
    }
}

impl Iterator for Hierarchy<'_> {
    type Item = Result<Arc<ClassInfo>, ClassResolutionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            if start.name == OBJECT_CLASS {
                return None;
            }
            self.visited.insert(start.name.clone());
            self.expand(&start);
            return Some(Ok(start));
        }

        while let Some(name) = self.pending.pop() {
            if !self.visited.insert(name.clone()) {
                continue;
            }
            return Some(match self.loader.load_class(&name) {
                Ok(class) => {
                    self.expand(&class);
                    Ok(class)
                }
                Err(e) => Err(e),
            });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ClassPool;

    fn names(pool: &ClassPool, start: &str) -> Vec<String> {
        let start = pool.load_class(start).unwrap();
        Hierarchy::new(start, pool)
            .map(|r| r.map(|c| c.name.clone()).unwrap_or_else(|e| format!("!{}", e.name)))
            .collect()
    }

    #[test]
    fn walks_superclass_chain_before_interfaces() {
        let pool: ClassPool = [
            ClassInfo::new("A").with_superclass("B").with_interface("I"),
            ClassInfo::new("B").with_superclass(OBJECT_CLASS),
            ClassInfo::new("I"),
        ]
        .into_iter()
        .collect();

        assert_eq!(names(&pool, "A"), vec!["A", "B", "I"]);
    }

    #[test]
    fn diamond_yields_shared_interface_once() {
        let pool: ClassPool = [
            ClassInfo::new("Impl").with_interface("Left").with_interface("Right"),
            ClassInfo::new("Left").with_interface("Top"),
            ClassInfo::new("Right").with_interface("Top"),
            ClassInfo::new("Top"),
        ]
        .into_iter()
        .collect();

        assert_eq!(names(&pool, "Impl"), vec!["Impl", "Left", "Top", "Right"]);
    }

    #[test]
    fn cyclic_edges_terminate() {
        let pool: ClassPool = [
            ClassInfo::new("X").with_interface("Y"),
            ClassInfo::new("Y").with_interface("X"),
        ]
        .into_iter()
        .collect();

        assert_eq!(names(&pool, "X"), vec!["X", "Y"]);
    }

    #[test]
    fn object_is_never_yielded() {
        let pool: ClassPool = [ClassInfo::new(OBJECT_CLASS), ClassInfo::new("A")]
            .into_iter()
            .collect();

        assert!(names(&pool, OBJECT_CLASS).is_empty());
        assert_eq!(names(&pool, "A"), vec!["A"]);
    }

    #[test]
    fn unresolvable_types_surface_as_errors() {
        let pool: ClassPool = [ClassInfo::new("A")
            .with_superclass("Missing")
            .with_interface("I")]
        .into_iter()
        .chain([ClassInfo::new("I")])
        .collect();

        assert_eq!(names(&pool, "A"), vec!["A", "!Missing", "I"]);
    }
}
