use clap::Parser;
use dop_preflight_lib::bootstrap::init_tracing_subscriber;
use dop_preflight_lib::cli::Cli;
use dop_preflight_lib::{resolve_config, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    init_tracing_subscriber(&config.log_level)?;

    let outcome = run(&cli, &config).await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
