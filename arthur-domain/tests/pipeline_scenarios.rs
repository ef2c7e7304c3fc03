//! End-to-end pipeline scenarios over an in-memory class pool.

use arthur_domain::extensions::{StaticExtension, StaticRegistrations};
use arthur_domain::{
    AnnotationInfo, BuildContext, ClassInfo, ClassPool, Extension, ExtensionPipeline,
    PipelineError, builtin_extensions, extensions::REGISTER_CLASS,
};
use arthur_types::{DynamicProxyModel, NativeImageConfiguration, ReflectionEntry};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

fn context(pool: ClassPool) -> BuildContext {
    let pool = Arc::new(pool);
    BuildContext::new(
        NativeImageConfiguration::default(),
        pool.clone(),
        pool,
        HashMap::new(),
    )
}

struct Register(ReflectionEntry);

impl Extension for Register {
    fn execute(&self, ctx: &mut BuildContext) -> anyhow::Result<()> {
        ctx.register(self.0.clone());
        Ok(())
    }
}

#[test]
fn later_registration_replaces_instead_of_merging() {
    let mut fields = ReflectionEntry::new("com.X");
    fields.all_declared_fields = true;
    let mut methods = ReflectionEntry::new("com.X");
    methods.all_public_methods = true;

    let pipeline = ExtensionPipeline::new(vec![
        Box::new(Register(fields)),
        Box::new(Register(methods.clone())),
    ]);
    let mut ctx = context(ClassPool::new());
    pipeline.run(&mut ctx).unwrap();

    let entries: Vec<&ReflectionEntry> = ctx.reflections().collect();
    assert_eq!(entries, vec![&methods]);
    assert!(!entries[0].all_declared_fields);
}

#[test]
fn proxy_sets_collapse_across_extensions() {
    let pipeline = ExtensionPipeline::new(vec![
        Box::new(|ctx: &mut BuildContext| -> anyhow::Result<()> {
            ctx.register(DynamicProxyModel::new(["A", "B"]));
            Ok(())
        }),
        Box::new(|ctx: &mut BuildContext| -> anyhow::Result<()> {
            ctx.register(DynamicProxyModel::new(["B", "A"]));
            ctx.register(DynamicProxyModel::new(["A", "B"]));
            Ok(())
        }),
    ]);
    let mut ctx = context(ClassPool::new());
    pipeline.run(&mut ctx).unwrap();
    assert_eq!(ctx.proxies().len(), 1);
}

#[test]
fn annotations_refine_static_registrations() {
    let pool: ClassPool = [ClassInfo::new("com.acme.Model").with_annotation(
        AnnotationInfo::new(REGISTER_CLASS).with_value("allDeclaredFields", json!(true)),
    )]
    .into_iter()
    .collect();

    let mut coarse = ReflectionEntry::new("com.acme.Model");
    coarse.all_public_constructors = true;
    let registrations = StaticRegistrations {
        reflection: vec![coarse],
        ..Default::default()
    };

    let pipeline = ExtensionPipeline::new(builtin_extensions(registrations));
    let mut ctx = context(pool);
    pipeline.run(&mut ctx).unwrap();

    let mut expected = ReflectionEntry::new("com.acme.Model");
    expected.all_declared_fields = true;
    let entries: Vec<&ReflectionEntry> = ctx.reflections().collect();
    assert_eq!(entries, vec![&expected]);
}

#[test]
fn failing_extension_is_named_in_error() {
    let pipeline = ExtensionPipeline::new(vec![
        Box::new(StaticExtension::default()),
        Box::new(|ctx: &mut BuildContext| -> anyhow::Result<()> {
            ctx.load_class("com.DoesNotExist")?;
            Ok(())
        }),
    ]);
    let mut ctx = context(ClassPool::new());
    let err = pipeline.run(&mut ctx).unwrap_err();

    let PipelineError::Extension { extension, source } = err;
    assert!(extension.contains("pipeline_scenarios"), "{extension}");
    assert!(source.to_string().contains("com.DoesNotExist"));
}
