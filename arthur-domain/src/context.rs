use crate::error::{ClassResolutionError, ContextError};
use crate::hierarchy::Hierarchy;
use crate::ports::{ClassIndex, ClassInfo, ClassLoader, MethodInfo};
use crate::predicate::{IncludesExcludes, NamePredicate, PredicateType};
use arthur_types::{
    DynamicProxyModel, NativeImageConfiguration, ReflectionEntry, ResourceBundleEntry,
    ResourceEntry,
};
use camino::Utf8Path;
use std::any::{Any, TypeId};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

/// Property holding the absolute working directory of the run.
pub const WORKING_DIRECTORY_PROPERTY: &str = "workingDirectory";

/// Copies caller-supplied properties and sets `workingDirectory`.
///
/// The caller's map is left untouched.
pub fn seeded_properties(
    external: &HashMap<String, String>,
    working_directory: &Utf8Path,
) -> HashMap<String, String> {
    let mut properties = external.clone();
    properties.insert(
        WORKING_DIRECTORY_PROPERTY.to_string(),
        working_directory.to_string(),
    );
    properties
}

/// One finding an extension can register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Reflection(ReflectionEntry),
    Resource(ResourceEntry),
    Bundle(ResourceBundleEntry),
    Proxy(DynamicProxyModel),
}

impl From<ReflectionEntry> for Registration {
    fn from(value: ReflectionEntry) -> Self {
        Registration::Reflection(value)
    }
}

impl From<ResourceEntry> for Registration {
    fn from(value: ResourceEntry) -> Self {
        Registration::Resource(value)
    }
}

impl From<ResourceBundleEntry> for Registration {
    fn from(value: ResourceBundleEntry) -> Self {
        Registration::Bundle(value)
    }
}

impl From<DynamicProxyModel> for Registration {
    fn from(value: DynamicProxyModel) -> Self {
        Registration::Proxy(value)
    }
}

/// Shared, mutable state of one pipeline run.
///
/// Merge rules:
/// - reflection entries and bundles are keyed by name; a later registration
///   replaces the earlier one.
/// - resource patterns and proxy interface sets accumulate with set
///   semantics.
///
/// All collections are name-ordered so emitted artifacts are deterministic.
pub struct BuildContext {
    configuration: NativeImageConfiguration,
    index: Arc<dyn ClassIndex>,
    loader: Arc<dyn ClassLoader>,
    properties: HashMap<String, String>,
    reflections: BTreeMap<String, ReflectionEntry>,
    resources: BTreeSet<ResourceEntry>,
    bundles: BTreeMap<String, ResourceBundleEntry>,
    proxies: BTreeSet<DynamicProxyModel>,
    modified: bool,
}

impl fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildContext")
            .field("configuration", &self.configuration)
            .field("reflections", &self.reflections.len())
            .field("resources", &self.resources.len())
            .field("bundles", &self.bundles.len())
            .field("proxies", &self.proxies.len())
            .field("modified", &self.modified)
            .finish_non_exhaustive()
    }
}

impl BuildContext {
    pub fn new(
        configuration: NativeImageConfiguration,
        index: Arc<dyn ClassIndex>,
        loader: Arc<dyn ClassLoader>,
        properties: HashMap<String, String>,
    ) -> Self {
        Self {
            configuration,
            index,
            loader,
            properties,
            reflections: BTreeMap::new(),
            resources: BTreeSet::new(),
            bundles: BTreeMap::new(),
            proxies: BTreeSet::new(),
            modified: false,
        }
    }

    // ── registrations ────────────────────────────────────────────────────

    pub fn register(&mut self, registration: impl Into<Registration>) {
        match registration.into() {
            Registration::Reflection(entry) => {
                self.reflections.insert(entry.name.clone(), entry);
                self.modified = true;
            }
            Registration::Resource(entry) => {
                if self.resources.insert(entry) {
                    self.modified = true;
                }
            }
            Registration::Bundle(entry) => {
                self.bundles.insert(entry.name.clone(), entry);
                self.modified = true;
            }
            Registration::Proxy(model) => {
                if self.proxies.insert(model) {
                    self.modified = true;
                }
            }
        }
    }

    pub fn enable_all_security_services(&mut self) {
        self.configuration.enable_all_security_services = true;
    }

    pub fn enable_all_charsets(&mut self) {
        self.configuration.add_all_charsets = true;
    }

    pub fn initialize_at_build_time<I, S>(&mut self, classes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.configuration
            .initialize_at_build_time
            .extend(classes.into_iter().map(Into::into));
    }

    /// Appends a raw `native-image` option. Order is preserved.
    pub fn add_native_image_option(&mut self, option: impl Into<String>) {
        self.configuration.custom_options.push(option.into());
    }

    // ── properties ───────────────────────────────────────────────────────

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }

    // ── class model ──────────────────────────────────────────────────────

    pub fn load_class(&self, name: &str) -> Result<Arc<ClassInfo>, ClassResolutionError> {
        self.loader.load_class(name)
    }

    pub fn find_annotated_classes(&self, annotation: &str) -> Vec<Arc<ClassInfo>> {
        self.index.find_annotated_classes(annotation)
    }

    pub fn find_annotated_methods(&self, annotation: &str) -> Vec<MethodInfo> {
        self.index.find_annotated_methods(annotation)
    }

    pub fn find_implementations(&self, base: &str) -> Vec<Arc<ClassInfo>> {
        self.index.find_implementations(base)
    }

    pub fn find_hierarchy(&self, class: Arc<ClassInfo>) -> Hierarchy<'_> {
        Hierarchy::new(class, self.loader.as_ref())
    }

    // ── predicates ───────────────────────────────────────────────────────

    /// OR-matcher over the comma-separated value of `property`, or `None`
    /// when the property is absent or has no tokens.
    pub fn create_predicate(
        &self,
        property: &str,
        kind: PredicateType,
    ) -> Result<Option<NamePredicate>, ContextError> {
        match self.property(property) {
            Some(value) => NamePredicate::parse(property, value, kind),
            None => Ok(None),
        }
    }

    /// Filter from `<prefix>includes` and `<prefix>excludes`.
    pub fn create_includes_excludes(
        &self,
        prefix: &str,
        kind: PredicateType,
    ) -> Result<IncludesExcludes, ContextError> {
        let includes = self.create_predicate(&format!("{prefix}includes"), kind)?;
        let excludes = self.create_predicate(&format!("{prefix}excludes"), kind)?;
        Ok(IncludesExcludes::new(includes, excludes))
    }

    /// Lower-level access for extensions: `NativeImageConfiguration` or the
    /// context itself. Anything else is rejected.
    pub fn unwrap<T: Any>(&mut self) -> Result<&mut T, ContextError> {
        let target: &mut dyn Any = if TypeId::of::<T>() == TypeId::of::<NativeImageConfiguration>()
        {
            &mut self.configuration
        } else {
            self
        };
        target
            .downcast_mut::<T>()
            .ok_or(ContextError::UnsupportedUnwrap {
                requested: std::any::type_name::<T>(),
            })
    }

    // ── accessors for the pipeline and the emitter ───────────────────────

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn reset_modified(&mut self) {
        self.modified = false;
    }

    pub fn reflections(&self) -> impl ExactSizeIterator<Item = &ReflectionEntry> {
        self.reflections.values()
    }

    pub fn resources(&self) -> impl ExactSizeIterator<Item = &ResourceEntry> {
        self.resources.iter()
    }

    pub fn bundles(&self) -> impl ExactSizeIterator<Item = &ResourceBundleEntry> {
        self.bundles.values()
    }

    pub fn proxies(&self) -> impl ExactSizeIterator<Item = &DynamicProxyModel> {
        self.proxies.iter()
    }

    pub fn configuration(&self) -> &NativeImageConfiguration {
        &self.configuration
    }

    pub fn add_reflection_config_file(&mut self, path: impl Into<String>) {
        self.configuration
            .reflection_configuration_files
            .push(path.into());
    }

    pub fn add_resources_config_file(&mut self, path: impl Into<String>) {
        self.configuration
            .resources_configuration_files
            .push(path.into());
    }

    pub fn add_dynamic_proxies_config_file(&mut self, path: impl Into<String>) {
        self.configuration
            .dynamic_proxy_configuration_files
            .push(path.into());
    }

    pub fn into_configuration(self) -> NativeImageConfiguration {
        self.configuration
    }
}
