/*!
Subcommand dispatcher module.

Layout:
  src/cmd/
    mod.rs     (this file)
    kind.rs    (CommandKind enum + per-command schema / invoke)
    serve.rs   (execute_serve: MCP server over stdio)
    exec.rs    (ExecArgs + execute_exec: one command from the terminal)
    list.rs    (ListArgs + execute_list: registered tools)
    shared.rs  (param parsing + schema-driven coercion)
    format.rs  (human output styling)

Conventions:
  - Each subcommand module exposes exactly one public `execute_*` function
    that returns `anyhow::Result<()>`.
  - Argument structs derive `clap::Args` and are kept minimal.
*/

pub mod exec;
pub mod format;
pub mod kind;
pub mod list;
pub mod serve;
pub mod shared;

pub use exec::{ExecArgs, execute_exec};
pub use list::{ListArgs, execute_list};
pub use serve::execute_serve;
