use crate::commands::Commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "sp")]
#[command(about = "School portal client")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides [api] base_url)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Hostname the portal is served from, used to derive the tenant
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}
