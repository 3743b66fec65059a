use clap::Parser;
use cli::CliArgs;
use runner::Runner;
use runner_config::RunnerConfig;
use task_pool_core::config::{task_count_options, worker_count_options};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use view::TextView;

mod cli;
mod runner;
mod runner_config;
mod shutdown;
mod stepper;
mod view;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    if args.list_options {
        println!("workers: {}", worker_count_options().join(", "));
        println!("tasks:   {}", task_count_options().join(", "));
        return Ok(());
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = RunnerConfig::from_args(&args)?;

    let runner = Runner::new(config, TextView::new(std::io::stdout())).await;

    let (shutdown_reason, last) = runner.await_shutdown().await?;

    info!(
        "Shutting down due to: {:?} ({} of {} tasks completed)",
        shutdown_reason,
        last.completed.len(),
        last.conservation_total()
    );

    Ok(())
}
