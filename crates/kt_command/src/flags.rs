//! Flag values rendered into Terraform command lines.
//!
//! Each flag renders through [`std::fmt::Display`]. A disabled toggle renders
//! to an empty string so that [`crate::Command::arg`] leaves it out of the
//! final command line.

use std::collections::BTreeMap;
use std::fmt;

/// `-no-color` when colored output is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorFlag {
    enabled: bool,
}

impl ColorFlag {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Default for ColorFlag {
    fn default() -> Self {
        Self::new(true)
    }
}

impl fmt::Display for ColorFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.enabled {
            Ok(())
        } else {
            write!(f, "-no-color")
        }
    }
}

/// `-lock=true|false`. Always rendered with an explicit boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockFlag {
    enabled: bool,
}

impl LockFlag {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Default for LockFlag {
    fn default() -> Self {
        Self::new(true)
    }
}

impl fmt::Display for LockFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-lock={}", self.enabled)
    }
}

/// `-lock-timeout=<seconds>s`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockTimeoutFlag {
    seconds: u64,
}

impl LockTimeoutFlag {
    pub fn new(seconds: u64) -> Self {
        Self { seconds }
    }
}

impl fmt::Display for LockTimeoutFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-lock-timeout={}s", self.seconds)
    }
}

/// `-parallelism=<count>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelismFlag {
    count: u32,
}

impl ParallelismFlag {
    pub fn new(count: u32) -> Self {
        Self { count }
    }
}

impl Default for ParallelismFlag {
    fn default() -> Self {
        Self::new(10)
    }
}

impl fmt::Display for ParallelismFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-parallelism={}", self.count)
    }
}

/// `-upgrade` when module and provider upgrades are requested during init.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpgradeFlag {
    enabled: bool,
}

impl UpgradeFlag {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl fmt::Display for UpgradeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.enabled {
            write!(f, "-upgrade")
        } else {
            Ok(())
        }
    }
}

/// `-plugin-dir=<path>` when a plugin directory is configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginDirFlag {
    path: Option<String>,
}

impl PluginDirFlag {
    pub fn new(path: Option<String>) -> Self {
        Self { path }
    }
}

impl fmt::Display for PluginDirFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "-plugin-dir={}", quote_path(path)),
            None => Ok(()),
        }
    }
}

/// One `-var="<name>=<value>"` per variable, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariablesFlag {
    variables: BTreeMap<String, String>,
}

impl VariablesFlag {
    pub fn new(variables: BTreeMap<String, String>) -> Self {
        Self { variables }
    }
}

impl fmt::Display for VariablesFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pairs(f, "-var", &self.variables)
    }
}

/// One `-var-file=<path>` per file, in configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableFilesFlag {
    paths: Vec<String>,
}

impl VariableFilesFlag {
    pub fn new(paths: Vec<String>) -> Self {
        Self { paths }
    }
}

impl fmt::Display for VariableFilesFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .paths
            .iter()
            .map(|path| format!("-var-file={}", quote_path(path)))
            .collect();
        write!(f, "{}", rendered.join(" "))
    }
}

/// One `-backend-config="<key>=<value>"` per entry, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendConfigFlag {
    configurations: BTreeMap<String, String>,
}

impl BackendConfigFlag {
    pub fn new(configurations: BTreeMap<String, String>) -> Self {
        Self { configurations }
    }
}

impl fmt::Display for BackendConfigFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pairs(f, "-backend-config", &self.configurations)
    }
}

fn write_pairs(
    f: &mut fmt::Formatter<'_>,
    flag: &str,
    pairs: &BTreeMap<String, String>,
) -> fmt::Result {
    let rendered: Vec<String> = pairs
        .iter()
        .map(|(key, value)| format!("{}=\"{}={}\"", flag, key, value))
        .collect();
    write!(f, "{}", rendered.join(" "))
}

/// Shell-quote a path after re-splitting and re-joining it, so that a path
/// which was already escaped is not escaped twice.
pub(crate) fn quote_path(path: &str) -> String {
    let normalized = match shell_words::split(path) {
        Ok(words) if !words.is_empty() => words.join(" "),
        _ => path.to_string(),
    };
    shell_words::quote(&normalized).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_toggles_render_empty() {
        assert_eq!(ColorFlag::new(true).to_string(), "");
        assert_eq!(ColorFlag::new(false).to_string(), "-no-color");
        assert_eq!(UpgradeFlag::new(false).to_string(), "");
        assert_eq!(UpgradeFlag::new(true).to_string(), "-upgrade");
        assert_eq!(PluginDirFlag::new(None).to_string(), "");
    }

    #[test]
    fn test_lock_is_explicit_boolean() {
        assert_eq!(LockFlag::new(true).to_string(), "-lock=true");
        assert_eq!(LockFlag::new(false).to_string(), "-lock=false");
        assert_eq!(LockTimeoutFlag::new(15).to_string(), "-lock-timeout=15s");
    }

    #[test]
    fn test_variables_are_ordered_by_name() {
        let mut variables = BTreeMap::new();
        variables.insert("zone".to_string(), "b".to_string());
        variables.insert("region".to_string(), "us-east-1".to_string());

        assert_eq!(
            VariablesFlag::new(variables).to_string(),
            "-var=\"region=us-east-1\" -var=\"zone=b\""
        );
    }

    #[test]
    fn test_backend_configurations() {
        let mut configurations = BTreeMap::new();
        configurations.insert("bucket".to_string(), "state".to_string());

        assert_eq!(
            BackendConfigFlag::new(configurations).to_string(),
            "-backend-config=\"bucket=state\""
        );
    }

    #[test]
    fn test_paths_with_spaces_are_quoted() {
        assert_eq!(quote_path("/tmp/one.tfvars"), "/tmp/one.tfvars");
        assert_eq!(quote_path("/tmp/my vars/one.tfvars"), "'/tmp/my vars/one.tfvars'");
    }

    #[test]
    fn test_already_escaped_paths_are_not_escaped_twice() {
        assert_eq!(
            quote_path("/tmp/my\\ vars/one.tfvars"),
            quote_path("/tmp/my vars/one.tfvars")
        );
        assert_eq!(
            quote_path("'/tmp/my vars/one.tfvars'"),
            quote_path("/tmp/my vars/one.tfvars")
        );
    }

    #[test]
    fn test_variable_files_keep_configured_order() {
        let flag = VariableFilesFlag::new(vec![
            "/b.tfvars".to_string(),
            "/a.tfvars".to_string(),
        ]);

        assert_eq!(flag.to_string(), "-var-file=/b.tfvars -var-file=/a.tfvars");
    }
}
