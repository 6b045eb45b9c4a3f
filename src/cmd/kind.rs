/*!
CommandKind: the Things commands selectable from the CLI.

Each variant maps to one input type in `things::commands`, which provides:
  - command()       URL path segment (`add`, `update-project`, ...)
  - tool_name()     matching MCP tool name (`things-add`, ...)
  - input_schema()  JSON schema of the input (drives --param coercion)
  - invoke()        deserialize arguments into the input and dispatch
*/

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::things::{
    AddInput, AddProjectInput, Client, JsonInput, SearchInput, ShowInput, ThingsCommand,
    UpdateInput, UpdateProjectInput, VersionInput,
};

#[derive(clap::ValueEnum, Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CommandKind {
    /// Create to-dos
    Add,
    /// Create a project
    AddProject,
    /// Update a to-do (needs authToken + id)
    Update,
    /// Update a project (needs authToken + id)
    UpdateProject,
    /// Open a list, project, area or tag
    Show,
    /// Open the search UI
    Search,
    /// Show the Things and URL scheme version
    Version,
    /// Import through the Things JSON format
    Json,
}

impl CommandKind {
    pub fn command(&self) -> &'static str {
        match self {
            CommandKind::Add => AddInput::COMMAND,
            CommandKind::AddProject => AddProjectInput::COMMAND,
            CommandKind::Update => UpdateInput::COMMAND,
            CommandKind::UpdateProject => UpdateProjectInput::COMMAND,
            CommandKind::Show => ShowInput::COMMAND,
            CommandKind::Search => SearchInput::COMMAND,
            CommandKind::Version => VersionInput::COMMAND,
            CommandKind::Json => JsonInput::COMMAND,
        }
    }

    pub fn tool_name(&self) -> String {
        format!("things-{}", self.command())
    }

    pub fn input_schema(&self) -> Value {
        let schema = match self {
            CommandKind::Add => schemars::schema_for!(AddInput),
            CommandKind::AddProject => schemars::schema_for!(AddProjectInput),
            CommandKind::Update => schemars::schema_for!(UpdateInput),
            CommandKind::UpdateProject => schemars::schema_for!(UpdateProjectInput),
            CommandKind::Show => schemars::schema_for!(ShowInput),
            CommandKind::Search => schemars::schema_for!(SearchInput),
            CommandKind::Version => schemars::schema_for!(VersionInput),
            CommandKind::Json => schemars::schema_for!(JsonInput),
        };
        serde_json::to_value(schema).unwrap_or(Value::Null)
    }

    /// Deserialize `arguments` into this command's input and dispatch it.
    pub async fn invoke(
        self,
        client: &Client,
        arguments: Value,
        cancel: &CancellationToken,
    ) -> Result<String> {
        match self {
            CommandKind::Add => invoke_as::<AddInput>(client, arguments, cancel).await,
            CommandKind::AddProject => {
                invoke_as::<AddProjectInput>(client, arguments, cancel).await
            }
            CommandKind::Update => invoke_as::<UpdateInput>(client, arguments, cancel).await,
            CommandKind::UpdateProject => {
                invoke_as::<UpdateProjectInput>(client, arguments, cancel).await
            }
            CommandKind::Show => invoke_as::<ShowInput>(client, arguments, cancel).await,
            CommandKind::Search => invoke_as::<SearchInput>(client, arguments, cancel).await,
            CommandKind::Version => invoke_as::<VersionInput>(client, arguments, cancel).await,
            CommandKind::Json => invoke_as::<JsonInput>(client, arguments, cancel).await,
        }
    }
}

async fn invoke_as<C>(client: &Client, arguments: Value, cancel: &CancellationToken) -> Result<String>
where
    C: ThingsCommand + DeserializeOwned + Sync,
{
    let input: C = serde_json::from_value(arguments)
        .with_context(|| format!("invalid arguments for '{}'", C::COMMAND))?;
    Ok(client.invoke(&input, cancel).await?)
}
