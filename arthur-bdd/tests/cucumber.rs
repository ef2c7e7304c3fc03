use arthur_bdd::IndexBuilder;
use arthur_domain::AnnotationInfo;
use arthur_domain::extensions::REGISTER_CLASS;
use assert_cmd::Command;
use camino::Utf8PathBuf;
use cucumber::gherkin::Step;
use cucumber::{World, given, then, when};
use fs_err as fs;
use std::process::Output;
use tempfile::TempDir;

const WORK_DIR: &str = "native";

#[derive(Debug, Default, World)]
pub struct ArthurWorld {
    temp: Option<TempDir>,
    root: Option<Utf8PathBuf>,
    index: IndexBuilder,
    properties: Vec<String>,
    output: Option<Output>,
}

fn root(world: &ArthurWorld) -> &Utf8PathBuf {
    world.root.as_ref().expect("root set")
}

fn output(world: &ArthurWorld) -> &Output {
    world.output.as_ref().expect("arthur was run")
}

fn artifact(world: &ArthurWorld, name: &str) -> Utf8PathBuf {
    root(world).join(WORK_DIR).join(name)
}

fn read_artifact(world: &ArthurWorld, name: &str) -> serde_json::Value {
    let raw = fs::read_to_string(artifact(world, name)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn reflection_entry(world: &ArthurWorld, class: &str) -> serde_json::Value {
    let entries = read_artifact(world, "reflection.arthur.json");
    entries
        .as_array()
        .expect("reflection array")
        .iter()
        .find(|e| e["name"] == class)
        .cloned()
        .unwrap_or_else(|| panic!("no reflection entry for {class}"))
}

#[given("an empty project")]
async fn empty_project(world: &mut ArthurWorld) {
    let td = tempfile::tempdir().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).unwrap();
    world.temp = Some(td);
    world.root = Some(root);
}

#[given(expr = "a class {string}")]
async fn plain_class(world: &mut ArthurWorld, name: String) {
    world.index.class(&name);
}

#[given(expr = "a class {string} annotated with RegisterClass and {string} enabled")]
async fn register_class(world: &mut ArthurWorld, name: String, flag: String) {
    world.index.annotate_class(
        &name,
        AnnotationInfo::new(REGISTER_CLASS).with_value(flag, serde_json::Value::Bool(true)),
    );
}

#[given(expr = "a class {string} with a method annotated with {string}")]
async fn annotated_method(world: &mut ArthurWorld, name: String, annotation: String) {
    world
        .index
        .annotate_method(&name, "init", AnnotationInfo::new(annotation));
}

#[given("the arthur.toml:")]
async fn arthur_toml(world: &mut ArthurWorld, step: &Step) {
    let contents = step.docstring.as_ref().expect("docstring");
    fs::write(root(world).join("arthur.toml"), contents).unwrap();
}

#[given(expr = "the property {string} set to {string}")]
async fn property(world: &mut ArthurWorld, key: String, value: String) {
    world.properties.push(format!("{key}={value}"));
}

#[when("I run arthur generate")]
async fn run_generate(world: &mut ArthurWorld) {
    let root = root(world).clone();
    fs::write(root.join("index.json"), world.index.to_json().unwrap()).unwrap();

    let mut cmd = Command::cargo_bin("arthur").expect("arthur binary");
    cmd.current_dir(root.as_str())
        .args(["generate", "--index", "index.json", "--work-dir", WORK_DIR]);
    for property in &world.properties {
        cmd.args(["--property", property.as_str()]);
    }
    world.output = Some(cmd.output().expect("run arthur"));
}

#[then("the command succeeds")]
async fn command_succeeds(world: &mut ArthurWorld) {
    let out = output(world);
    assert!(
        out.status.success(),
        "arthur failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
}

#[then("the command fails")]
async fn command_fails(world: &mut ArthurWorld) {
    assert_eq!(output(world).status.code(), Some(1));
}

#[then(expr = "stderr mentions {string}")]
async fn stderr_mentions(world: &mut ArthurWorld, needle: String) {
    let stderr = String::from_utf8_lossy(&output(world).stderr);
    assert!(stderr.contains(&needle), "stderr: {stderr}");
}

#[then(expr = "the reflection artifact lists {string}")]
async fn reflection_lists(world: &mut ArthurWorld, expected: String) {
    let entries = read_artifact(world, "reflection.arthur.json");
    let names: Vec<&str> = entries
        .as_array()
        .expect("reflection array")
        .iter()
        .filter_map(|e| e["name"].as_str())
        .collect();
    let expected: Vec<&str> = expected.split(',').map(str::trim).collect();
    assert_eq!(names, expected);
}

#[then(expr = "class {string} has {string} enabled")]
async fn flag_enabled(world: &mut ArthurWorld, class: String, flag: String) {
    assert_eq!(reflection_entry(world, &class)[&flag], true);
}

#[then(expr = "class {string} has {string} disabled")]
async fn flag_disabled(world: &mut ArthurWorld, class: String, flag: String) {
    assert!(reflection_entry(world, &class).get(&flag).is_none());
}

#[then(expr = "the proxy artifact contains {int} definition(s)")]
async fn proxy_count(world: &mut ArthurWorld, count: usize) {
    let proxies = read_artifact(world, "dynamicproxies.arthur.json");
    assert_eq!(proxies.as_array().expect("proxy array").len(), count);
}

#[then(expr = "the artifact {string} exists")]
async fn artifact_exists(world: &mut ArthurWorld, name: String) {
    assert!(artifact(world, &name).exists(), "{name} missing");
}

#[then(expr = "the artifact {string} does not exist")]
async fn artifact_missing(world: &mut ArthurWorld, name: String) {
    assert!(!artifact(world, &name).exists(), "{name} unexpectedly written");
}

#[then("the work directory does not exist")]
async fn work_dir_missing(world: &mut ArthurWorld) {
    assert!(!root(world).join(WORK_DIR).exists());
}

#[tokio::main]
async fn main() {
    let features_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("features");
    ArthurWorld::cucumber().run(features_path).await;
}
