//! Create command - Prepare the test workspace.

use anyhow::Result;
use clap::Args;
use tracing::info;

use kt_core::Create;

use super::{Kitchen, KitchenArgs};

#[derive(Args)]
pub struct CreateArgs {
    #[command(flatten)]
    kitchen: KitchenArgs,
}

pub async fn execute(args: CreateArgs) -> Result<()> {
    let kitchen = Kitchen::load(&args.kitchen)?;
    run(&kitchen).await
}

pub(crate) async fn run(kitchen: &Kitchen) -> Result<()> {
    info!("Creating workspace {}", kitchen.driver.workspace_name);

    Create::new(kitchen.driver.clone(), kitchen.connection())?
        .call()
        .await?;

    println!("Workspace {} is ready", kitchen.driver.workspace_name);
    Ok(())
}
