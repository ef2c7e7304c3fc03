use crate::context::BuildContext;
use crate::extensions::Extension;
use arthur_types::{
    DynamicProxyModel, FieldReflection, MethodReflection, ReflectionEntry, ResourceBundleEntry,
    ResourceEntry,
};
use serde::{Deserialize, Deserializer};
use tracing::debug;

/// Declarative registrations, usually the `[register]` table of `arthur.toml`.
///
/// Reflection entries use the GraalVM attribute names
/// (`allPublicMethods`, ...) plus `all`, which enables every `allDeclared*`
/// flag on top of the explicit ones. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StaticRegistrations {
    #[serde(deserialize_with = "reflection_entries")]
    pub reflection: Vec<ReflectionEntry>,
    pub resources: Vec<String>,
    pub bundles: Vec<String>,
    pub proxies: Vec<Vec<String>>,
    pub initialize_at_build_time: Vec<String>,
    pub native_image_options: Vec<String>,
    pub enable_all_security_services: bool,
    pub enable_all_charsets: bool,
}

impl StaticRegistrations {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// On-disk shape of one `[[register.reflection]]` table.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct StaticReflectionEntry {
    name: String,
    #[serde(default)]
    all: bool,
    #[serde(default)]
    all_declared_constructors: bool,
    #[serde(default)]
    all_public_constructors: bool,
    #[serde(default)]
    all_declared_methods: bool,
    #[serde(default)]
    all_public_methods: bool,
    #[serde(default)]
    all_declared_classes: bool,
    #[serde(default)]
    all_public_classes: bool,
    #[serde(default)]
    all_declared_fields: bool,
    #[serde(default)]
    all_public_fields: bool,
    #[serde(default)]
    methods: Vec<MethodReflection>,
    #[serde(default)]
    fields: Vec<FieldReflection>,
}

impl From<StaticReflectionEntry> for ReflectionEntry {
    fn from(raw: StaticReflectionEntry) -> Self {
        let mut entry = ReflectionEntry::new(raw.name);
        entry.all_declared_constructors = raw.all_declared_constructors;
        entry.all_public_constructors = raw.all_public_constructors;
        entry.all_declared_methods = raw.all_declared_methods;
        entry.all_public_methods = raw.all_public_methods;
        entry.all_declared_classes = raw.all_declared_classes;
        entry.all_public_classes = raw.all_public_classes;
        entry.all_declared_fields = raw.all_declared_fields;
        entry.all_public_fields = raw.all_public_fields;
        entry.methods = raw.methods;
        entry.fields = raw.fields;
        // Applied last so an explicit `false` can't undo it.
        if raw.all {
            entry.set_all();
        }
        entry
    }
}

fn reflection_entries<'de, D>(deserializer: D) -> Result<Vec<ReflectionEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<StaticReflectionEntry>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(ReflectionEntry::from).collect())
}

/// Registers a fixed list of findings.
#[derive(Debug, Clone, Default)]
pub struct StaticExtension {
    registrations: StaticRegistrations,
}

impl StaticExtension {
    pub const NAME: &'static str = "arthur.static";

    pub fn new(registrations: StaticRegistrations) -> Self {
        Self { registrations }
    }
}

impl Extension for StaticExtension {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn execute(&self, ctx: &mut BuildContext) -> anyhow::Result<()> {
        let r = &self.registrations;
        if r.is_empty() {
            debug!("no static registrations");
            return Ok(());
        }

        for entry in &r.reflection {
            if entry.name.trim().is_empty() {
                anyhow::bail!("static reflection entry without a class name");
            }
            ctx.register(entry.clone());
        }
        for pattern in &r.resources {
            ctx.register(ResourceEntry::new(pattern.as_str()));
        }
        for bundle in &r.bundles {
            ctx.register(ResourceBundleEntry::new(bundle.as_str()));
        }
        for classes in &r.proxies {
            if classes.is_empty() {
                anyhow::bail!("static proxy definition without interfaces");
            }
            ctx.register(DynamicProxyModel::new(classes.iter().map(String::as_str)));
        }

        if !r.initialize_at_build_time.is_empty() {
            ctx.initialize_at_build_time(r.initialize_at_build_time.iter().map(String::as_str));
        }
        for option in &r.native_image_options {
            ctx.add_native_image_option(option.as_str());
        }
        if r.enable_all_security_services {
            ctx.enable_all_security_services();
        }
        if r.enable_all_charsets {
            ctx.enable_all_charsets();
        }
        Ok(())
    }
}
