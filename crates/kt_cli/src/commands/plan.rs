//! Plan command - Show what converge would change.

use anyhow::Result;
use clap::Args;

use kt_core::Plan;

use super::{Kitchen, KitchenArgs};

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    kitchen: KitchenArgs,
}

pub async fn execute(args: PlanArgs) -> Result<()> {
    let kitchen = Kitchen::load(&args.kitchen)?;

    let plan = Plan::new(kitchen.driver.clone(), kitchen.connection())?
        .call()
        .await?;

    println!("{}", plan.trim_end());
    Ok(())
}
