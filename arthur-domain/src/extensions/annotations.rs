use crate::context::BuildContext;
use crate::extensions::Extension;
use crate::ports::AnnotationInfo;
use crate::predicate::PredicateType;
use anyhow::{Context, bail};
use arthur_types::ReflectionEntry;
use std::collections::BTreeSet;
use tracing::debug;

/// Marker annotation requesting reflective access for the annotated class.
pub const REGISTER_CLASS: &str = "org.apache.geronimo.arthur.api.RegisterClass";

/// `<annotation>:<flag>=<bool>|<flag>=<bool>,<annotation>:...`
pub const CUSTOM_ANNOTATIONS_PROPERTY: &str = "annotation.custom.annotations.properties";

/// Prefix of the includes/excludes properties filtering candidate classes.
pub const CLASS_FILTER_PREFIX: &str = "annotation.classes.";

/// Registers reflection entries for `@RegisterClass` classes and for
/// classes/methods carrying user-configured annotations.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationExtension;

impl AnnotationExtension {
    pub const NAME: &'static str = "arthur.annotations";
}

impl Extension for AnnotationExtension {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn execute(&self, ctx: &mut BuildContext) -> anyhow::Result<()> {
        let filter = ctx.create_includes_excludes(CLASS_FILTER_PREFIX, PredicateType::StartsWith)?;

        for class in ctx.find_annotated_classes(REGISTER_CLASS) {
            if !filter.test(&class.name) {
                debug!(class = %class.name, "filtered out");
                continue;
            }
            let Some(annotation) = class.annotation(REGISTER_CLASS) else {
                continue;
            };
            let entry = entry_from_register_class(&class.name, annotation)?;
            ctx.register(entry);
        }

        let custom = match ctx.property(CUSTOM_ANNOTATIONS_PROPERTY) {
            Some(value) => parse_custom_annotations(value)
                .with_context(|| format!("parse {}", CUSTOM_ANNOTATIONS_PROPERTY))?,
            None => Vec::new(),
        };

        for annotation in custom {
            let mut targets: BTreeSet<String> = ctx
                .find_annotated_classes(&annotation.name)
                .iter()
                .map(|c| c.name.clone())
                .collect();
            targets.extend(
                ctx.find_annotated_methods(&annotation.name)
                    .into_iter()
                    .map(|m| m.declaring_class),
            );

            for name in targets.into_iter().filter(|n| filter.test(n)) {
                ctx.register(annotation.entry(name));
            }
        }

        Ok(())
    }
}

fn entry_from_register_class(
    class: &str,
    annotation: &AnnotationInfo,
) -> anyhow::Result<ReflectionEntry> {
    let mut entry = ReflectionEntry::new(class);
    // `all` is applied last so explicit `allDeclaredX = false` cannot undo it.
    let mut all = false;
    for (key, value) in &annotation.values {
        let Some(value) = value.as_bool() else {
            bail!("{class}: RegisterClass attribute '{key}' is not a boolean");
        };
        if key == "all" {
            all = value;
        } else if !entry.set_flag(key, value) {
            bail!("{class}: unknown RegisterClass attribute '{key}'");
        }
    }
    if all {
        entry.set_all();
    }
    Ok(entry)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CustomAnnotation {
    name: String,
    flags: Vec<(String, bool)>,
}

impl CustomAnnotation {
    /// Same precedence as `RegisterClass`: `all` wins over explicit flags.
    fn entry(&self, class: String) -> ReflectionEntry {
        let mut entry = ReflectionEntry::new(class);
        let mut all = false;
        for (flag, value) in &self.flags {
            if flag == "all" {
                all = *value;
            } else {
                entry.set_flag(flag, *value);
            }
        }
        if all {
            entry.set_all();
        }
        entry
    }
}

fn parse_custom_annotations(value: &str) -> anyhow::Result<Vec<CustomAnnotation>> {
    let mut out = Vec::new();
    for item in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (name, flags) = match item.split_once(':') {
            Some((name, flags)) => (name.trim(), flags),
            None => (item, "all=true"),
        };
        if name.is_empty() {
            bail!("missing annotation name in '{item}'");
        }

        let mut parsed = Vec::new();
        for flag in flags.split('|').map(str::trim).filter(|f| !f.is_empty()) {
            let (key, raw) = flag
                .split_once('=')
                .map(|(k, v)| (k.trim(), v.trim()))
                .unwrap_or((flag, "true"));
            let value: bool = raw
                .parse()
                .with_context(|| format!("flag '{key}' of {name}"))?;
            if !ReflectionEntry::default().set_flag(key, value) {
                bail!("unknown flag '{key}' for {name}");
            }
            parsed.push((key.to_string(), value));
        }

        out.push(CustomAnnotation {
            name: name.to_string(),
            flags: parsed,
        });
    }
    Ok(out)
}
