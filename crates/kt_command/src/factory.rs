//! Version-dependent command selection.
//!
//! Terraform 0.15.0 removed `-get-plugins` and `-verify-plugins` from `init`
//! and the variable flags from `validate`. The factory maps a client version
//! to the matching command variant so the lifecycle actions never branch on
//! versions themselves.

use crate::builders::{InitFlags, ValidateFlags};
use crate::command::{Command, CommandKind};
use crate::version::ClientVersion;

/// Command-construction strategy for a range of client versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandVariant {
    /// Clients older than 0.15.0.
    Legacy,
    /// Clients at 0.15.0 or newer.
    Current,
}

impl CommandVariant {
    pub fn for_version(version: &ClientVersion) -> Self {
        if *version < ClientVersion::new(0, 15, 0) {
            Self::Legacy
        } else {
            Self::Current
        }
    }
}

/// `init` in the shape expected by the client version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitCommand {
    Legacy(InitFlags),
    Current(InitFlags),
}

impl InitCommand {
    pub fn build(&self) -> Command {
        let flags = match self {
            Self::Legacy(flags) | Self::Current(flags) => flags,
        };

        let command = Command::new(CommandKind::Init)
            .arg("-input=false")
            .arg(flags.lock)
            .arg(flags.lock_timeout)
            .arg(flags.color)
            .arg(flags.upgrade)
            .arg("-force-copy")
            .arg("-backend=true")
            .arg(&flags.backend_config)
            .arg("-get=true");

        match self {
            Self::Legacy(_) => command
                .arg("-get-plugins=true")
                .arg(&flags.plugin_dir)
                .arg("-verify-plugins=true"),
            Self::Current(_) => command.arg(&flags.plugin_dir),
        }
    }
}

/// `validate` in the shape expected by the client version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidateCommand {
    Legacy(ValidateFlags),
    Current(ValidateFlags),
}

impl ValidateCommand {
    pub fn build(&self) -> Command {
        match self {
            Self::Legacy(flags) => Command::new(CommandKind::Validate)
                .arg(flags.color)
                .arg(&flags.variables)
                .arg(&flags.variable_files),
            Self::Current(flags) => Command::new(CommandKind::Validate).arg(flags.color),
        }
    }
}

/// Builds version-appropriate commands for one client version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFactory {
    variant: CommandVariant,
}

impl CommandFactory {
    pub fn new(version: &ClientVersion) -> Self {
        Self {
            variant: CommandVariant::for_version(version),
        }
    }

    pub fn variant(&self) -> CommandVariant {
        self.variant
    }

    pub fn init(&self, flags: InitFlags) -> InitCommand {
        match self.variant {
            CommandVariant::Legacy => InitCommand::Legacy(flags),
            CommandVariant::Current => InitCommand::Current(flags),
        }
    }

    pub fn validate(&self, flags: ValidateFlags) -> ValidateCommand {
        match self.variant {
            CommandVariant::Legacy => ValidateCommand::Legacy(flags),
            CommandVariant::Current => ValidateCommand::Current(flags),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_boundaries() {
        assert_eq!(
            CommandVariant::for_version(&ClientVersion::new(0, 11, 4)),
            CommandVariant::Legacy
        );
        assert_eq!(
            CommandVariant::for_version(&ClientVersion::new(0, 14, 11)),
            CommandVariant::Legacy
        );
        assert_eq!(
            CommandVariant::for_version(&ClientVersion::new(0, 15, 0)),
            CommandVariant::Current
        );
        assert_eq!(
            CommandVariant::for_version(&ClientVersion::new(0, 15, 1)),
            CommandVariant::Current
        );
    }

    #[test]
    fn test_factory_selects_init_variant() {
        let legacy = CommandFactory::new(&ClientVersion::new(0, 11, 4));
        let current = CommandFactory::new(&ClientVersion::new(0, 15, 1));

        assert!(matches!(legacy.init(InitFlags::new()), InitCommand::Legacy(_)));
        assert!(matches!(current.init(InitFlags::new()), InitCommand::Current(_)));
        assert!(matches!(
            legacy.validate(ValidateFlags::new()),
            ValidateCommand::Legacy(_)
        ));
        assert!(matches!(
            current.validate(ValidateFlags::new()),
            ValidateCommand::Current(_)
        ));
    }
}
