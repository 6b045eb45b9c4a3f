use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod mcp;
mod things;
mod utils;

use cmd::{ExecArgs, ListArgs};

/// things-mcp - drive the Things to-do app through its URL scheme.
///
/// Command layout:
///   things-mcp [serve]                       MCP server over stdio (default)
///   things-mcp exec <COMMAND> [--param k=v ...] [--input JSON] [--dry-run] [--json]
///   things-mcp list [--json]                 registered MCP tools
///
/// Global flags / env:
///   -v / -vv              Increase verbosity (logs go to stderr)
///   -q / --quiet          Errors only
///   --activate            Bring Things to the foreground when opening URLs
///   THINGS_MCP_ACTIVATE   Environment fallback for --activate
///   RUST_LOG              Overrides the log filter
///
/// Examples:
///   things-mcp exec add --param "title=Buy milk" --param tags=Errand
///   things-mcp exec show --param id=today --activate
///   things-mcp exec json --input '{"data":[{"type":"to-do","attributes":{"title":"x"}}]}' --dry-run
#[derive(Parser, Debug)]
#[command(
    name = "things-mcp",
    version,
    author,
    about = "things-mcp - MCP server and CLI for the Things URL scheme",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Bring Things to the foreground when launching URLs
    #[arg(long, global = true)]
    activate: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the MCP server over stdio
    Serve,

    /// Run a single Things command
    Exec(ExecArgs),

    /// List the registered MCP tools
    List(ListArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    // CLI flag > THINGS_MCP_ACTIVATE env
    let activate = cli.activate || utils::env_flag("THINGS_MCP_ACTIVATE");

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => cmd::execute_serve(activate),
        Commands::Exec(args) => cmd::execute_exec(args, activate),
        Commands::List(args) => cmd::execute_list(args),
    }
}
