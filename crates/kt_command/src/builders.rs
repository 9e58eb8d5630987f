//! Chainable flag sets for the commands that take configuration.
//!
//! Every setter consumes the flag set and returns an updated copy, so a flag
//! set can be shared and specialised without mutation.

use std::collections::BTreeMap;

use crate::command::Command;
use crate::flags::{
    BackendConfigFlag, ColorFlag, LockFlag, LockTimeoutFlag, ParallelismFlag, PluginDirFlag,
    UpgradeFlag, VariableFilesFlag, VariablesFlag,
};

/// Flags shared by `plan`, `apply` and `destroy`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunFlags {
    pub color: ColorFlag,
    pub lock: LockFlag,
    pub lock_timeout: LockTimeoutFlag,
    pub parallelism: ParallelismFlag,
    pub variables: VariablesFlag,
    pub variable_files: VariableFilesFlag,
}

impl RunFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(self, enabled: bool) -> Self {
        Self {
            color: ColorFlag::new(enabled),
            ..self
        }
    }

    pub fn lock(self, enabled: bool) -> Self {
        Self {
            lock: LockFlag::new(enabled),
            ..self
        }
    }

    pub fn lock_timeout(self, seconds: u64) -> Self {
        Self {
            lock_timeout: LockTimeoutFlag::new(seconds),
            ..self
        }
    }

    pub fn parallelism(self, count: u32) -> Self {
        Self {
            parallelism: ParallelismFlag::new(count),
            ..self
        }
    }

    pub fn variables(self, variables: BTreeMap<String, String>) -> Self {
        Self {
            variables: VariablesFlag::new(variables),
            ..self
        }
    }

    pub fn variable_files(self, paths: Vec<String>) -> Self {
        Self {
            variable_files: VariableFilesFlag::new(paths),
            ..self
        }
    }

    /// Append the flags in their fixed order.
    pub(crate) fn render_into(&self, command: Command) -> Command {
        command
            .arg("-input=false")
            .arg(self.lock)
            .arg(self.lock_timeout)
            .arg(self.color)
            .arg(self.parallelism)
            .arg("-refresh=true")
            .arg(&self.variables)
            .arg(&self.variable_files)
    }
}

/// Flags for `init`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitFlags {
    pub color: ColorFlag,
    pub lock: LockFlag,
    pub lock_timeout: LockTimeoutFlag,
    pub upgrade: UpgradeFlag,
    pub backend_config: BackendConfigFlag,
    pub plugin_dir: PluginDirFlag,
}

impl InitFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(self, enabled: bool) -> Self {
        Self {
            color: ColorFlag::new(enabled),
            ..self
        }
    }

    pub fn lock(self, enabled: bool) -> Self {
        Self {
            lock: LockFlag::new(enabled),
            ..self
        }
    }

    pub fn lock_timeout(self, seconds: u64) -> Self {
        Self {
            lock_timeout: LockTimeoutFlag::new(seconds),
            ..self
        }
    }

    pub fn upgrade(self, enabled: bool) -> Self {
        Self {
            upgrade: UpgradeFlag::new(enabled),
            ..self
        }
    }

    pub fn backend_configurations(self, configurations: BTreeMap<String, String>) -> Self {
        Self {
            backend_config: BackendConfigFlag::new(configurations),
            ..self
        }
    }

    pub fn plugin_directory(self, path: Option<String>) -> Self {
        Self {
            plugin_dir: PluginDirFlag::new(path),
            ..self
        }
    }
}

/// Flags for `validate`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateFlags {
    pub color: ColorFlag,
    pub variables: VariablesFlag,
    pub variable_files: VariableFilesFlag,
}

impl ValidateFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(self, enabled: bool) -> Self {
        Self {
            color: ColorFlag::new(enabled),
            ..self
        }
    }

    pub fn variables(self, variables: BTreeMap<String, String>) -> Self {
        Self {
            variables: VariablesFlag::new(variables),
            ..self
        }
    }

    pub fn variable_files(self, paths: Vec<String>) -> Self {
        Self {
            variable_files: VariableFilesFlag::new(paths),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_do_not_touch_the_original() {
        let base = RunFlags::new();
        let tuned = base.clone().lock(false).parallelism(2);

        assert_eq!(base, RunFlags::default());
        assert_eq!(tuned.lock, LockFlag::new(false));
        assert_eq!(tuned.parallelism, ParallelismFlag::new(2));
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let flags = RunFlags::new().color(false).lock_timeout(5);
        let first = Command::apply(&flags).to_string();
        let second = Command::apply(&flags).to_string();

        assert_eq!(first, second);
    }
}
