//! Test command - Run the whole lifecycle.

use anyhow::Result;
use clap::Args;
use tracing::{error, info};

use super::{converge, create, destroy, verify, Kitchen, KitchenArgs};

#[derive(Args)]
pub struct TestArgs {
    #[command(flatten)]
    kitchen: KitchenArgs,

    /// Keep the instance when a step fails
    #[arg(long)]
    no_destroy_on_failure: bool,
}

pub async fn execute(args: TestArgs) -> Result<()> {
    let kitchen = Kitchen::load(&args.kitchen)?;

    let result = run_steps(&kitchen).await;
    if result.is_err() && args.no_destroy_on_failure {
        info!("Keeping workspace {} for inspection", kitchen.driver.workspace_name);
        return result;
    }

    let destroyed = destroy::run(&kitchen).await;
    match (result, destroyed) {
        (Err(e), Err(destroy_error)) => {
            error!("Destroy after failure also failed: {:#}", destroy_error);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), destroyed) => destroyed,
    }
}

async fn run_steps(kitchen: &Kitchen) -> Result<()> {
    create::run(kitchen).await?;
    converge::run(kitchen).await?;
    verify::run(kitchen).await
}
