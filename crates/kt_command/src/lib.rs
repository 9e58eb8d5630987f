//! # kt_command
//!
//! Terraform command line construction for kitchen-terraform.
//!
//! Everything in this crate is a pure value: flags render to strings,
//! commands render to the exact argument text handed to the Terraform
//! client, and the [`CommandFactory`] picks the command variant that matches
//! the client version.
//!
//! ## Example
//!
//! ```rust
//! use kt_command::{ClientVersion, CommandFactory, InitFlags, RunFlags, Command};
//!
//! let version = ClientVersion::parse_banner("Terraform v1.2.3").unwrap();
//! let factory = CommandFactory::new(&version);
//!
//! let init = factory.init(InitFlags::new().lock_timeout(30)).build();
//! assert!(init.to_string().starts_with("init -input=false -lock=true -lock-timeout=30s"));
//!
//! let apply = Command::apply(&RunFlags::new().parallelism(4));
//! assert_eq!(
//!     apply.to_string(),
//!     "apply -auto-approve -input=false -lock=true -lock-timeout=0s -parallelism=4 -refresh=true"
//! );
//! ```

pub mod builders;
pub mod command;
pub mod error;
pub mod factory;
pub mod flags;
pub mod version;

pub use builders::{InitFlags, RunFlags, ValidateFlags};
pub use command::{Command, CommandKind, DEFAULT_WORKSPACE};
pub use error::{CommandError, CommandResult};
pub use factory::{CommandFactory, CommandVariant, InitCommand, ValidateCommand};
pub use flags::{
    BackendConfigFlag, ColorFlag, LockFlag, LockTimeoutFlag, ParallelismFlag, PluginDirFlag,
    UpgradeFlag, VariableFilesFlag, VariablesFlag,
};
pub use version::{ClientVersion, VersionRequirement};
