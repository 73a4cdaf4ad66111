mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::rank::RankArgs;
use commands::stress::StressArgs;
use commands::template::TemplateArgs;

/// Stress-tested cash-on-cash analysis for residential property investment
#[derive(Parser)]
#[command(
    name = "scoc",
    version,
    about = "Stress-tested cash-on-cash (sCoC) property analysis",
    long_about = "Computes the stress-tested cash-on-cash return for residential \
                  investment properties with decimal precision: interest-rate shocks, \
                  vacancy periods, and maintenance cost spikes layered on top of \
                  baseline cash flow. Evaluates single properties or ranks a list."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one property under a stress scenario
    Stress(StressArgs),
    /// Rank a list of properties by stressed return
    Rank(RankArgs),
    /// Print the blank CSV input template accepted by `rank`
    Template(TemplateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Stress(args) => commands::stress::run_stress(args),
        Commands::Rank(args) => commands::rank::run_rank(args),
        Commands::Template(args) => {
            commands::template::print_template(args);
            return;
        }
        Commands::Version => {
            println!("scoc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
