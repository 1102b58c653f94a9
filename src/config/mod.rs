pub mod cli;
pub mod toml_config;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "mk-orcamento")]
#[command(about = "MK Construções budget sheet generator")]
pub struct CliConfig {
    /// Path to the budget TOML file
    #[arg(short, long, default_value = "orcamento.toml")]
    pub config: String,

    /// Override [output].path from the budget file
    #[arg(long)]
    pub output_path: Option<String>,

    /// Print the service catalog with default units and exit
    #[arg(long)]
    pub list_services: bool,

    /// Print the budget table without writing any file
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}
