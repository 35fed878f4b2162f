//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// jobforge - Compile CI job descriptions and keep a Jenkins server in sync
#[derive(Parser, Debug)]
#[command(name = "jobforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a job description file and report the jobs it declares
    Check(commands::check::CheckArgs),

    /// Compile the jobs into XML documents in an output directory
    Compile(commands::compile::CompileArgs),

    /// Reconcile a live server's job set with the compiled jobs
    Upload(commands::upload::UploadArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(&self.log_level),
        )
        .init();

        match self.command {
            Commands::Check(args) => commands::check::execute(args),
            Commands::Compile(args) => commands::compile::execute(args),
            Commands::Upload(args) => commands::upload::execute(args),
        }
    }
}
