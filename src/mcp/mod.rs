//! MCP server exposing the Things commands as tools over stdio.
//!
//! One tool per URL-scheme command (`things-add`, `things-update`, ...).
//! Each tool validates its input, dispatches the URL and answers with
//! `Dispatched <url>` plus a structured `{"url": ...}` payload. Validation
//! and launch failures come back as tool results flagged `isError`, so the
//! model sees the message instead of a protocol error.
//!
use anyhow::{Context, Result};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo, Tool};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler, ServiceExt, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::things::{
    AddInput, AddProjectInput, Client, JsonInput, SearchInput, ShowInput, ThingsCommand,
    ThingsError, UpdateInput, UpdateProjectInput, VersionInput,
};

const INSTRUCTIONS: &str = "Drives the Things to-do app through its URL scheme. \
Every tool builds a things:/// URL and opens it; Things does not send a reply, \
so a successful call only means the URL was handed off. \
Updates need the auth token from Things > Settings > General > Enable Things URLs.";

/// Structured result of a successful tool call.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Invocation {
    /// The things:/// URL handed to the launcher.
    pub url: String,
}

#[derive(Clone)]
pub struct ThingsServer {
    client: Client,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ThingsServer {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "things-add",
        description = "Create new to-dos in Things using the URL scheme"
    )]
    async fn add(
        &self,
        Parameters(input): Parameters<AddInput>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.run(&input, &context.ct).await
    }

    #[tool(name = "things-add-project", description = "Create new projects in Things")]
    async fn add_project(
        &self,
        Parameters(input): Parameters<AddProjectInput>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.run(&input, &context.ct).await
    }

    #[tool(name = "things-update", description = "Update existing to-dos in Things")]
    async fn update(
        &self,
        Parameters(input): Parameters<UpdateInput>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.run(&input, &context.ct).await
    }

    #[tool(
        name = "things-update-project",
        description = "Update existing projects in Things"
    )]
    async fn update_project(
        &self,
        Parameters(input): Parameters<UpdateProjectInput>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.run(&input, &context.ct).await
    }

    #[tool(name = "things-show", description = "Open Things lists, projects, or tags")]
    async fn show(
        &self,
        Parameters(input): Parameters<ShowInput>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.run(&input, &context.ct).await
    }

    #[tool(name = "things-search", description = "Open the Things search UI")]
    async fn search(
        &self,
        Parameters(input): Parameters<SearchInput>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.run(&input, &context.ct).await
    }

    #[tool(
        name = "things-version",
        description = "Reveal the Things app and URL scheme version dialog"
    )]
    async fn version(&self, context: RequestContext<RoleServer>) -> Result<CallToolResult, McpError> {
        self.run(&VersionInput {}, &context.ct).await
    }

    #[tool(
        name = "things-json",
        description = "Invoke the Things JSON command for complex imports"
    )]
    async fn json(
        &self,
        Parameters(input): Parameters<JsonInput>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.run(&input, &context.ct).await
    }
}

impl ThingsServer {
    async fn run<C>(&self, input: &C, cancel: &CancellationToken) -> Result<CallToolResult, McpError>
    where
        C: ThingsCommand + Sync,
    {
        match self.client.invoke(input, cancel).await {
            Ok(url) => {
                tracing::info!(command = C::COMMAND, %url, "dispatched");
                success(url)
            }
            Err(err) => {
                tracing::warn!(
                    command = C::COMMAND,
                    url = ?err.target(),
                    validation = err.is_validation(),
                    error = %err,
                    "tool call failed"
                );
                Ok(failure(&err))
            }
        }
    }

    /// Tool definitions (name, description, input schema) without a client.
    pub fn tools() -> Vec<Tool> {
        Self::tool_router().list_all()
    }

    /// Registered tool names, in router order.
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect()
    }
}

#[tool_handler]
impl ServerHandler for ThingsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(INSTRUCTIONS.into()),
            ..Default::default()
        }
    }
}

fn success(url: String) -> Result<CallToolResult, McpError> {
    let text = Content::text(format!("Dispatched {url}"));
    let structured = serde_json::to_value(Invocation { url })
        .map_err(|e| McpError::internal_error(format!("encode tool result: {e}"), None))?;
    let mut result = CallToolResult::success(vec![text]);
    result.structured_content = Some(structured);
    Ok(result)
}

fn failure(err: &ThingsError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(err.to_string())])
}

/// Serve `client` over stdin/stdout until the peer disconnects or Ctrl-C.
pub async fn serve_stdio(client: Client) -> Result<()> {
    let server = ThingsServer::new(client);
    tracing::info!(tools = server.tool_names().len(), "starting Things MCP server on stdio");

    let service = server
        .serve((tokio::io::stdin(), tokio::io::stdout()))
        .await
        .context("Failed to initialize MCP stdio transport")?;

    tokio::select! {
        quit = service.waiting() => {
            let reason = quit.context("MCP server task failed")?;
            tracing::info!(?reason, "MCP server stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupt received, shutting down");
        }
    }
    Ok(())
}
