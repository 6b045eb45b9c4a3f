/*!
`serve.rs`

Implements the `serve` subcommand (also the default when no subcommand is
given): run the Things MCP server over stdio until the client disconnects
or Ctrl-C.
*/

use anyhow::{Context, Result};

use crate::mcp;
use crate::things::{Client, Config};

pub fn execute_serve(activate: bool) -> Result<()> {
    let client = Client::new(Config {
        activate,
        launcher: None,
    });
    tracing::debug!(activate, "configured open launcher");

    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    rt.block_on(mcp::serve_stdio(client))
}
