//! Destroy command - Tear down the test instance.

use anyhow::Result;
use clap::Args;
use tracing::info;

use kt_core::Destroy;

use super::{Kitchen, KitchenArgs};

#[derive(Args)]
pub struct DestroyArgs {
    #[command(flatten)]
    kitchen: KitchenArgs,
}

pub async fn execute(args: DestroyArgs) -> Result<()> {
    let kitchen = Kitchen::load(&args.kitchen)?;
    run(&kitchen).await
}

pub(crate) async fn run(kitchen: &Kitchen) -> Result<()> {
    info!("Destroying workspace {}", kitchen.driver.workspace_name);

    Destroy::new(kitchen.driver.clone(), kitchen.connection())?
        .call()
        .await?;
    kitchen.store().delete()?;

    println!("Workspace {} destroyed", kitchen.driver.workspace_name);
    Ok(())
}
