//! Lifecycle actions.
//!
//! Every action reads the client version, verifies it, and then issues its
//! commands strictly in sequence. A failed command aborts the action; the
//! only failures handled locally are the workspace fallbacks.

mod converge;
mod create;
mod destroy;
mod plan;

pub use converge::Converge;
pub use create::Create;
pub use destroy::Destroy;
pub use plan::Plan;

use kt_command::{ClientVersion, Command, CommandFactory, DEFAULT_WORKSPACE};
use kt_runner::RunnerError;
use regex::Regex;
use tracing::{info, warn};

use crate::config::DriverConfig;
use crate::connection::Connection;
use crate::error::{CoreError, CoreResult};
use crate::version_verifier::VersionVerifier;

const ALREADY_EXISTS_PATTERN: &str = r"(?i)already\s+exists";
const DOES_NOT_EXIST_PATTERN: &str = r"(?i)(doesn't|does\s+not)\s+exist";

/// Whether a failed `workspace new` reports an existing workspace.
pub fn workspace_already_exists(error: &RunnerError) -> bool {
    matches_pattern(ALREADY_EXISTS_PATTERN, &error.message())
}

/// Whether a failed `workspace select` reports a missing workspace.
pub fn workspace_does_not_exist(error: &RunnerError) -> bool {
    matches_pattern(DOES_NOT_EXIST_PATTERN, &error.message())
}

fn matches_pattern(pattern: &str, message: &str) -> bool {
    Regex::new(pattern)
        .map(|p| p.is_match(message))
        .unwrap_or(false)
}

/// Steps shared by the lifecycle actions.
pub(crate) struct Steps<'a> {
    config: &'a DriverConfig,
    connection: &'a dyn Connection,
    verifier: &'a VersionVerifier,
}

impl<'a> Steps<'a> {
    pub(crate) fn new(
        config: &'a DriverConfig,
        connection: &'a dyn Connection,
        verifier: &'a VersionVerifier,
    ) -> Self {
        Self {
            config,
            connection,
            verifier,
        }
    }

    /// Execute one command between start and finish log lines.
    async fn run(&self, description: &str, command: &Command) -> CoreResult<String> {
        info!("Started {}.", description);
        let output = self.connection.execute(command).await?;
        info!("Finished {}.", description);
        Ok(output)
    }

    /// Read and verify the client version, returning the command factory
    /// for it.
    pub(crate) async fn prepare(&self) -> CoreResult<CommandFactory> {
        let banner = self
            .run("reading the Terraform client version", &Command::version())
            .await?;
        let version = ClientVersion::parse_banner(&banner)?;
        info!("Terraform client version is v{}.", version);

        self.verifier.verify(&version)?;
        Ok(CommandFactory::new(&version))
    }

    pub(crate) async fn initialize_directory(&self, factory: &CommandFactory) -> CoreResult<()> {
        let command = factory.init(self.config.init_flags()).build();
        self.run("initializing the Terraform working directory", &command)
            .await?;
        Ok(())
    }

    pub(crate) async fn select_workspace(&self, name: &str) -> CoreResult<()> {
        self.run(
            &format!("selecting the {} Terraform workspace", name),
            &Command::workspace_select(name),
        )
        .await?;
        Ok(())
    }

    /// `workspace new`, falling back to `workspace select` only when the
    /// workspace already exists.
    pub(crate) async fn create_or_select_workspace(&self) -> CoreResult<()> {
        let name = &self.config.workspace_name;
        info!("Started creating the {} Terraform workspace.", name);

        match self.connection.execute(&Command::workspace_new(name)).await {
            Ok(_) => {
                info!("Finished creating the {} Terraform workspace.", name);
                Ok(())
            }
            Err(error) if workspace_already_exists(&error) => {
                warn!("The {} Terraform workspace already exists.", name);
                self.select_workspace(name).await
            }
            Err(error) => Err(CoreError::from(error)),
        }
    }

    /// `workspace select`, falling back to `workspace new` only when the
    /// workspace does not exist, so destroy always runs in the test workspace.
    pub(crate) async fn select_or_create_workspace(&self) -> CoreResult<()> {
        let name = &self.config.workspace_name;
        info!("Started selecting the {} Terraform workspace.", name);

        match self.connection.execute(&Command::workspace_select(name)).await {
            Ok(_) => {
                info!("Finished selecting the {} Terraform workspace.", name);
                Ok(())
            }
            Err(error) if workspace_does_not_exist(&error) => {
                warn!("The {} Terraform workspace does not exist.", name);
                self.run(
                    &format!("creating the {} Terraform workspace", name),
                    &Command::workspace_new(name),
                )
                .await?;
                Ok(())
            }
            Err(error) => Err(CoreError::from(error)),
        }
    }

    pub(crate) async fn select_default_workspace(&self) -> CoreResult<()> {
        self.select_workspace(DEFAULT_WORKSPACE).await
    }

    pub(crate) async fn delete_workspace(&self) -> CoreResult<()> {
        let name = &self.config.workspace_name;
        self.run(
            &format!("deleting the {} Terraform workspace", name),
            &Command::workspace_delete(name),
        )
        .await?;
        Ok(())
    }

    pub(crate) async fn download_modules(&self) -> CoreResult<()> {
        self.run("downloading the Terraform modules", &Command::get_update())
            .await?;
        Ok(())
    }

    pub(crate) async fn validate_files(&self, factory: &CommandFactory) -> CoreResult<()> {
        let command = factory.validate(self.config.validate_flags()).build();
        self.run("validating the Terraform configuration files", &command)
            .await?;
        Ok(())
    }

    pub(crate) async fn plan(&self) -> CoreResult<String> {
        let command = Command::plan(&self.config.run_flags());
        self.run("planning the Terraform execution", &command).await
    }

    pub(crate) async fn apply(&self) -> CoreResult<()> {
        let command = Command::apply(&self.config.run_flags());
        self.run("applying the Terraform execution plan", &command)
            .await?;
        Ok(())
    }

    pub(crate) async fn destroy(&self) -> CoreResult<()> {
        let command = Command::destroy(&self.config.run_flags());
        self.run("destroying the Terraform-managed infrastructure", &command)
            .await?;
        Ok(())
    }

    pub(crate) fn connection(&self) -> &dyn Connection {
        self.connection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(output: &str) -> RunnerError {
        RunnerError::NonZeroExit {
            command: "terraform workspace".to_string(),
            code: 1,
            output: output.to_string(),
        }
    }

    #[test]
    fn test_workspace_failure_signatures() {
        assert!(workspace_already_exists(&failure(
            "Workspace \"kitchen-terraform-default\" already exists"
        )));
        assert!(workspace_does_not_exist(&failure(
            "Workspace \"kitchen-terraform-default\" doesn't exist."
        )));
        assert!(workspace_does_not_exist(&failure("workspace does not exist")));

        assert!(!workspace_already_exists(&failure("Error: state locked")));
        assert!(!workspace_does_not_exist(&failure("Error: state locked")));
    }
}
