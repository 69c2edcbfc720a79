//! status command - check the state of a submitted job

use crate::config::Config;
use crate::CommonArgs;
use anyhow::Result;
use clap::Args;
use console::style;
use zkverify_relayer_sdk::RelayerApi;

#[derive(Args)]
pub struct StatusArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Job id returned by submit-proof
    #[arg(long)]
    job_id: String,
}

pub async fn run(config: &Config, args: StatusArgs) -> Result<()> {
    if !config.quiet && !config.json_output {
        println!("{} Checking job status...", style("→").cyan().bold());
    }

    let client = config.relayer_client()?;
    let status = client.job_status(&args.job_id).await?;

    if config.json_output {
        println!("{}", serde_json::to_string(&status)?);
    } else if !config.quiet {
        println!();
        println!("  Job: {}", args.job_id);
        println!("  Status: {}", status.status);
        if let Some(id) = &status.aggregation_id {
            println!("  Aggregation id: {}", id);
        }
        if let Some(domain) = &status.domain_id {
            println!("  Domain id: {}", domain);
        }
    }

    Ok(())
}
