use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod run;
mod scenario;

use cli::RootArgs;
use config::Config;
use run::LoggingRunner;

fn main() -> Result<()> {
    init_tracing();
    let args = RootArgs::parse();
    let scenario_args = args.command.scenario_args();
    let config = Config::resolve(
        args.command.action(),
        scenario_args.scenario_name.clone(),
        scenario_args.scenario_dir.clone(),
    )?;
    run::execute(&config, &mut LoggingRunner)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crucible=info".into()),
        )
        .init();
}
