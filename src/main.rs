mod agent;
mod cli;
mod client;
mod config;
mod logging;
mod pipeline;
mod structured;
mod tools;

use std::process::ExitCode;

use clap::Parser;
use colored::*;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose);

    match cli.run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "❌ Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
