//! Verify command - Run InSpec against the configured systems.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use tracing::info;

use kt_verify::{InspecCli, Verifier, VerifyError};

use super::{Kitchen, KitchenArgs};

#[derive(Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    kitchen: KitchenArgs,

    /// Verify every system even after a failure
    #[arg(long)]
    no_fail_fast: bool,
}

pub async fn execute(args: VerifyArgs) -> Result<()> {
    let mut kitchen = Kitchen::load(&args.kitchen)?;
    if args.no_fail_fast {
        kitchen.verifier = kitchen.verifier.map(|v| v.fail_fast(false));
    }
    run(&kitchen).await
}

pub(crate) async fn run(kitchen: &Kitchen) -> Result<()> {
    let config = kitchen
        .verifier
        .clone()
        .ok_or_else(|| VerifyError::Config("the verifier section is missing".to_string()))?;

    info!("Verifying {} systems", config.systems.len());
    let runner = Arc::new(InspecCli::new(&config));

    Verifier::new(config, runner, kitchen.store())?.call().await?;

    println!("All systems verified");
    Ok(())
}
