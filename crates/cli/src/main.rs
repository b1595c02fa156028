mod commands;
mod config;
mod discover;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Maquette modeling language compiler.
#[derive(Parser)]
#[command(name = "maquette", version, about = "Maquette modeling language compiler")]
struct Cli {
    /// Output format for errors (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile every build setting in a project file
    Build {
        /// Path to the project configuration file
        #[arg(long, default_value = "maquette.toml")]
        config: PathBuf,
    },

    /// Tokenize and parse a single .mqt file
    Check {
        /// Path to the source file
        file: PathBuf,
    },

    /// Print a single file's projected context JSON
    Project {
        /// Path to the source file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Build { config } => commands::build::cmd_build(&config, cli.output, cli.quiet),
        Commands::Check { file } => commands::check::cmd_check(&file, cli.output, cli.quiet),
        Commands::Project { file } => commands::project::cmd_project(&file, cli.output),
    }
}
