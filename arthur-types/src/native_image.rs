use crate::is_false;
use serde::{Deserialize, Serialize};

/// The slice of the `native-image` invocation that extensions and the
/// emitter contribute to.
///
/// Lists keep insertion order: `custom_options` precedence downstream
/// depends on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeImageConfiguration {
    #[serde(default, skip_serializing_if = "is_false")]
    pub enable_all_security_services: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub add_all_charsets: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initialize_at_build_time: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_options: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reflection_configuration_files: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources_configuration_files: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dynamic_proxy_configuration_files: Vec<String>,
}

impl NativeImageConfiguration {
    /// Render as `native-image` arguments. Custom options come last, in
    /// registration order.
    pub fn native_image_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.enable_all_security_services {
            args.push("--enable-all-security-services".to_string());
        }
        if self.add_all_charsets {
            args.push("-H:+AddAllCharsets".to_string());
        }
        if !self.initialize_at_build_time.is_empty() {
            args.push(format!(
                "--initialize-at-build-time={}",
                self.initialize_at_build_time.join(",")
            ));
        }
        push_files(
            &mut args,
            "-H:ReflectionConfigurationFiles",
            &self.reflection_configuration_files,
        );
        push_files(
            &mut args,
            "-H:ResourceConfigurationFiles",
            &self.resources_configuration_files,
        );
        push_files(
            &mut args,
            "-H:DynamicProxyConfigurationFiles",
            &self.dynamic_proxy_configuration_files,
        );
        args.extend(self.custom_options.iter().cloned());
        args
    }
}

fn push_files(args: &mut Vec<String>, flag: &str, files: &[String]) {
    if !files.is_empty() {
        args.push(format!("{}={}", flag, files.join(",")));
    }
}
