//! Terraform commands as immutable values.

use std::fmt;

use crate::builders::RunFlags;

/// Name of the workspace Terraform always provides.
pub const DEFAULT_WORKSPACE: &str = "default";

/// Terraform subcommands issued by the lifecycle actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Version,
    Init,
    Validate,
    Get,
    Plan,
    Apply,
    Destroy,
    Output,
    WorkspaceSelect,
    WorkspaceNew,
    WorkspaceDelete,
}

impl CommandKind {
    /// Get the subcommand text.
    pub fn subcommand(&self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::Init => "init",
            Self::Validate => "validate",
            Self::Get => "get",
            Self::Plan => "plan",
            Self::Apply => "apply",
            Self::Destroy => "destroy",
            Self::Output => "output",
            Self::WorkspaceSelect => "workspace select",
            Self::WorkspaceNew => "workspace new",
            Self::WorkspaceDelete => "workspace delete",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.subcommand())
    }
}

/// A subcommand plus its ordered arguments.
///
/// Rendering joins the subcommand and every argument with single spaces.
/// Arguments are only ever appended through [`Command::arg`], which consumes
/// the command and returns the extended one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    kind: CommandKind,
    args: Vec<String>,
}

impl Command {
    pub fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            args: Vec::new(),
        }
    }

    /// Append an argument. Arguments rendering to an empty string are skipped.
    pub fn arg(mut self, arg: impl fmt::Display) -> Self {
        let rendered = arg.to_string();
        if !rendered.is_empty() {
            self.args.push(rendered);
        }
        self
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// `version`
    pub fn version() -> Self {
        Self::new(CommandKind::Version)
    }

    /// `get -update`
    pub fn get_update() -> Self {
        Self::new(CommandKind::Get).arg("-update")
    }

    /// `output -json`
    pub fn output_json() -> Self {
        Self::new(CommandKind::Output).arg("-json")
    }

    /// `workspace select <name>`
    pub fn workspace_select(name: &str) -> Self {
        Self::new(CommandKind::WorkspaceSelect).arg(shell_words::quote(name))
    }

    /// `workspace new <name>`
    pub fn workspace_new(name: &str) -> Self {
        Self::new(CommandKind::WorkspaceNew).arg(shell_words::quote(name))
    }

    /// `workspace delete <name>`
    pub fn workspace_delete(name: &str) -> Self {
        Self::new(CommandKind::WorkspaceDelete).arg(shell_words::quote(name))
    }

    /// `apply -auto-approve ...`
    pub fn apply(flags: &RunFlags) -> Self {
        flags.render_into(Self::new(CommandKind::Apply).arg("-auto-approve"))
    }

    /// `destroy -auto-approve ...`
    pub fn destroy(flags: &RunFlags) -> Self {
        flags.render_into(Self::new(CommandKind::Destroy).arg("-auto-approve"))
    }

    /// `plan ...`
    pub fn plan(flags: &RunFlags) -> Self {
        flags.render_into(Self::new(CommandKind::Plan))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_args_are_skipped() {
        let command = Command::new(CommandKind::Validate).arg("").arg("-no-color").arg("");
        assert_eq!(command.args(), ["-no-color"]);
        assert_eq!(command.to_string(), "validate -no-color");
    }

    #[test]
    fn test_fixed_commands() {
        assert_eq!(Command::version().to_string(), "version");
        assert_eq!(Command::get_update().to_string(), "get -update");
        assert_eq!(Command::output_json().to_string(), "output -json");
    }

    #[test]
    fn test_workspace_commands() {
        assert_eq!(
            Command::workspace_select("kitchen-terraform-default").to_string(),
            "workspace select kitchen-terraform-default"
        );
        assert_eq!(Command::workspace_new("test").to_string(), "workspace new test");
        assert_eq!(Command::workspace_delete("test").to_string(), "workspace delete test");
        assert_eq!(
            Command::workspace_select(DEFAULT_WORKSPACE).kind(),
            CommandKind::WorkspaceSelect
        );
    }
}
