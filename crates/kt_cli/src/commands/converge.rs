//! Converge command - Apply the root module.

use anyhow::Result;
use clap::Args;
use tracing::info;

use kt_core::Converge;

use super::{Kitchen, KitchenArgs};

#[derive(Args)]
pub struct ConvergeArgs {
    #[command(flatten)]
    kitchen: KitchenArgs,
}

pub async fn execute(args: ConvergeArgs) -> Result<()> {
    let kitchen = Kitchen::load(&args.kitchen)?;
    run(&kitchen).await
}

pub(crate) async fn run(kitchen: &Kitchen) -> Result<()> {
    info!("Converging workspace {}", kitchen.driver.workspace_name);

    let outputs = Converge::new(kitchen.driver.clone(), kitchen.connection(), kitchen.store())?
        .call()
        .await?;

    println!("Converged with {} outputs:", outputs.len());
    for (name, output) in &outputs {
        if output.sensitive {
            println!("  {} = <sensitive>", name);
        } else {
            println!("  {} = {}", name, output.value);
        }
    }
    println!("State saved to {}", kitchen.state_path.display());
    Ok(())
}
