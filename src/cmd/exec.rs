/*!
`exec.rs`

Implements the `exec` subcommand: run one Things command straight from the
terminal, without an MCP client.

Argument sources (merged in this order, later wins):
  --input '<JSON object>'          base object, camelCase keys as in the MCP tools
  --param-file params.(json|yaml)  merged over --input
  --param KEY=VALUE                (repeatable) coerced by the input schema

--dry-run records the URL instead of opening it.

JSON Success Output:
{
  "status": "ok",
  "command": "add",
  "tool": "things-add",
  "url": "things:///add?title=Buy%20milk",
  "dry_run": false,
  "elapsed_ms": 12,
  "arguments": { ... }
}

JSON Error Output:
{
  "status":"error",
  "error":"message"
}
*/

use anyhow::{Context, Result, bail};
use clap::Args;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use super::format::{Role, StyleOptions, box_header, color, emoji};
use super::kind::CommandKind;
use super::shared::{build_arguments_from_schema, load_param_file, parse_param_pairs};
use crate::things::{Client, Config, Launcher, RecordingLauncher};

/* -------------------------------------------------------------------------- */
/* Argument Struct                                                            */
/* -------------------------------------------------------------------------- */

#[derive(Args, Debug)]
pub struct ExecArgs {
    /// Things command to run
    #[arg(value_name = "COMMAND")]
    pub command: CommandKind,

    /// Input as a JSON object (same shape as the MCP tool input)
    #[arg(long, value_name = "JSON")]
    pub input: Option<String>,

    /// Provide parameter (KEY=VALUE), repeatable. Lists split on ',' (tags)
    /// or ';' (titles, checklistItems, toDos)
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Load parameters from file (JSON or YAML). CLI --param overrides file entries
    #[arg(long = "param-file", value_name = "PATH")]
    pub param_file: Option<String>,

    /// Print the URL without opening it
    #[arg(long)]
    pub dry_run: bool,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

/* -------------------------------------------------------------------------- */
/* Public Entry Point                                                         */
/* -------------------------------------------------------------------------- */

pub fn execute_exec(args: ExecArgs, activate: bool) -> Result<()> {
    let arguments = match collect_arguments(&args) {
        Ok(a) => a,
        Err(e) => return output_error(args.json, &format!("{e:#}")),
    };

    let recorder = args.dry_run.then(|| Arc::new(RecordingLauncher::new()));
    let launcher = recorder.clone().map(|r| r as Arc<dyn Launcher>);
    let client = Client::new(Config { activate, launcher });

    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    let started = Instant::now();
    let result = rt.block_on(async {
        let cancel = CancellationToken::new();
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                on_interrupt.cancel();
            }
        });
        args.command
            .invoke(&client, Value::Object(arguments.clone()), &cancel)
            .await
    });
    let elapsed_ms = started.elapsed().as_millis();

    let url = match result {
        Ok(url) => url,
        Err(e) => return output_error(args.json, &format!("{e:#}")),
    };
    tracing::debug!(%url, dry_run = args.dry_run, "exec finished");
    if let Some(recorder) = &recorder {
        tracing::debug!(recorded = ?recorder.calls(), "dry run kept the launch local");
    }

    if args.json {
        let out = serde_json::json!({
            "status": "ok",
            "command": args.command.command(),
            "tool": args.command.tool_name(),
            "url": url,
            "dry_run": args.dry_run,
            "elapsed_ms": elapsed_ms,
            "arguments": arguments,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).unwrap_or_else(|_| out.to_string())
        );
    } else {
        let style = StyleOptions::detect();
        let title = format!(
            "{} {} ({})",
            emoji("success", &style),
            if args.dry_run { "Dry Run" } else { "Dispatched" },
            args.command.command()
        );
        let subtitle = format!("{elapsed_ms} ms");
        println!("{}", box_header(title, Some(subtitle.as_str()), &style));
        println!(
            "{} {}",
            emoji("link", &style),
            color(Role::Success, &url, &style)
        );
    }
    Ok(())
}

/* -------------------------------------------------------------------------- */
/* Argument Collection                                                        */
/* -------------------------------------------------------------------------- */

fn collect_arguments(args: &ExecArgs) -> Result<Map<String, Value>> {
    let mut base = match &args.input {
        Some(raw) => match serde_json::from_str::<Value>(raw).context("failed to parse --input")? {
            Value::Object(obj) => obj,
            _ => bail!("--input must be a JSON object"),
        },
        None => Map::new(),
    };

    if let Some(path) = &args.param_file {
        base.extend(load_param_file(path)?);
    }

    let provided = parse_param_pairs(&args.params)?;
    build_arguments_from_schema(&args.command.input_schema(), base, &provided)
}

/* -------------------------------------------------------------------------- */
/* Output Helpers                                                              */
/* -------------------------------------------------------------------------- */

fn output_error(json: bool, msg: &str) -> Result<()> {
    if json {
        let err = serde_json::json!({"status":"error","error":msg});
        println!(
            "{}",
            serde_json::to_string_pretty(&err).unwrap_or_else(|_| err.to_string())
        );
    } else {
        let style = StyleOptions::detect();
        let title = format!("{} Exec Error", emoji("error", &style));
        let subtitle = color(Role::Error, msg, &style);
        println!("{}", box_header(title, Some(subtitle.as_str()), &style));
        println!(
            "{} {}",
            emoji("info", &style),
            color(
                Role::Dim,
                "Re-run with --json for machine-readable output or --dry-run to only build the URL.",
                &style
            )
        );
    }
    anyhow::bail!(msg.to_string())
}
