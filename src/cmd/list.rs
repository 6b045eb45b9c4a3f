/*!
`list.rs`

Implements the `list` subcommand: print the MCP tools this server registers.

JSON Output Shape:
{
  "status": "ok",
  "count": 8,
  "tools": [
    { "name": "things-add", "description": "...", "inputSchema": { ... } }
  ]
}
*/

use anyhow::Result;
use clap::Args;
use serde_json::Value;

use super::format::{Role, StyleOptions, box_header, color, emoji};
use crate::mcp::ThingsServer;

/// CLI arguments for `things-mcp list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

pub fn execute_list(args: ListArgs) -> Result<()> {
    let tools = ThingsServer::tools();

    if args.json {
        let tools_json = tools
            .iter()
            .map(|t| serde_json::to_value(t).unwrap_or(Value::Null))
            .collect::<Vec<_>>();
        let out = serde_json::json!({
            "status": "ok",
            "count": tools_json.len(),
            "tools": tools_json,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).unwrap_or_else(|_| out.to_string())
        );
        return Ok(());
    }

    let style = StyleOptions::detect();
    let title = format!("{} Tools ({})", emoji("tool", &style), tools.len());
    println!("{}", box_header(title, None, &style));

    let width = tools.iter().map(|t| t.name.len()).max().unwrap_or(0);
    for tool in &tools {
        let description = tool.description.as_deref().unwrap_or("");
        println!(
            "  {}  {}",
            color(Role::Primary, format!("{:<width$}", tool.name), &style),
            color(Role::Dim, description, &style)
        );
    }
    Ok(())
}
