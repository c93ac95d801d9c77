use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

mod cmd;
mod transport;
mod utils;

use cmd::{
    ContextArgs, DiscoveryArgs, InputError, PayloadArgs, QueryNodesArgs, SearchNodesArgs, ToolArgs,
};
use transport::{ApiRequest, EditorClient, TransportError};

const EXAMPLES: &str = "\
Examples:
  cocos-cli context
  cocos-cli search-nodes --name \"Player*\"
  cocos-cli create-nodes '{\"nodes\": [{\"type\": \"Empty\", \"name\": \"MyNode\"}]}'
  cocos-cli assets --file payload.yaml
  cocos-cli discovery assets-by-type '{\"assetType\": \"cc.Prefab\"}'
  cocos-cli tool query_nodes '{\"maxDepth\": 3}'
  cocos-cli -P health

Port:
  --port, else `port` from the nearest .cocos-mcp-config.json found walking up
  from the current directory (10 levels max), else 3000.";

/// Cocos CLI - control the Cocos Creator editor via its HTTP tool server
///
/// Each subcommand sends one JSON request to the editor extension and prints
/// the JSON response on stdout. Errors go to stderr with exit code 1.
#[derive(Parser, Debug)]
#[command(
    name = "cocos-cli",
    version,
    about = "Cocos CLI - control Cocos Creator via HTTP",
    after_help = EXAMPLES,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// HTTP server port (auto-detected from config if not specified)
    #[arg(short = 'p', long, global = true)]
    port: Option<u16>,

    /// HTTP server host
    #[arg(short = 'H', long, global = true, default_value = transport::DEFAULT_HOST)]
    host: String,

    /// Pretty print JSON output
    #[arg(short = 'P', long, global = true)]
    pretty: bool,

    /// Increase diagnostic logging on stderr (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all diagnostic logging
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Get editor context snapshot
    Context(ContextArgs),
    /// Search nodes by name/component/path
    SearchNodes(SearchNodesArgs),
    /// Query node hierarchy
    QueryNodes(QueryNodesArgs),
    /// Create nodes
    CreateNodes(PayloadArgs),
    /// Modify nodes
    ModifyNodes(PayloadArgs),
    /// Query components
    QueryComponents(PayloadArgs),
    /// Modify components
    ModifyComponents(PayloadArgs),
    /// Operate current scene
    CurrentScene(PayloadArgs),
    /// Operate assets
    Assets(PayloadArgs),
    /// Operate prefab assets
    PrefabAssets(PayloadArgs),
    /// Node-linked prefab operations
    NodePrefab(PayloadArgs),
    /// Discovery endpoints (components, assets, assets-by-type)
    Discovery(DiscoveryArgs),
    /// Operate project settings
    ProjectSettings(PayloadArgs),
    /// Operate scripts and text
    ScriptsText(PayloadArgs),
    /// Execute scene code
    ExecuteScene(PayloadArgs),
    /// Generic editor request
    EditorRequest(PayloadArgs),
    /// Apply gated action
    ApplyGatedAction(PayloadArgs),
    /// Generic tool call
    Tool(ToolArgs),
    /// Health check
    Health,
    /// List available tools
    Tools,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Map a command onto its endpoint and payload.
fn build_request(command: &Commands) -> Result<ApiRequest, InputError> {
    let request = match command {
        Commands::Context(args) => ApiRequest::post("/cocos/context", args.payload()),
        Commands::SearchNodes(args) => ApiRequest::post("/cocos/search-nodes", args.payload()),
        Commands::QueryNodes(args) => ApiRequest::post("/cocos/query-nodes", args.payload()),
        Commands::CreateNodes(p) => ApiRequest::post("/cocos/create-nodes", p.body()?),
        Commands::ModifyNodes(p) => ApiRequest::post("/cocos/modify-nodes", p.body()?),
        Commands::QueryComponents(p) => ApiRequest::post("/cocos/query-components", p.body()?),
        Commands::ModifyComponents(p) => ApiRequest::post("/cocos/modify-components", p.body()?),
        Commands::CurrentScene(p) => ApiRequest::post("/cocos/current-scene", p.body()?),
        Commands::Assets(p) => ApiRequest::post("/cocos/assets", p.body()?),
        Commands::PrefabAssets(p) => ApiRequest::post("/cocos/prefab-assets", p.body()?),
        Commands::NodePrefab(p) => ApiRequest::post("/cocos/node-prefab", p.body()?),
        Commands::Discovery(args) => args.request()?,
        Commands::ProjectSettings(p) => ApiRequest::post("/cocos/project-settings", p.body()?),
        Commands::ScriptsText(p) => ApiRequest::post("/cocos/scripts-text", p.body()?),
        Commands::ExecuteScene(p) => ApiRequest::post("/cocos/execute-scene", p.body()?),
        Commands::EditorRequest(p) => ApiRequest::post("/cocos/editor-request", p.body()?),
        Commands::ApplyGatedAction(p) => ApiRequest::post("/cocos/apply-gated-action", p.body()?),
        Commands::Tool(args) => ApiRequest::post(args.path()?, args.payload.body()?),
        Commands::Health => ApiRequest::get("/cocos/health"),
        Commands::Tools => ApiRequest::get("/cocos/tools"),
    };
    Ok(request)
}

/// Build the request, resolve the server and perform the single call.
fn execute(cli: &Cli, command: &Commands) -> Result<Option<Value>, CliError> {
    let request = build_request(command)?;

    let cwd = std::env::current_dir().unwrap_or_else(|e| {
        log_warn!("cannot read working directory ({e}); searching from '.'");
        PathBuf::from(".")
    });
    let resolved = transport::port::resolve_port(cli.port, &cwd);
    log_info!("port {} (from {})", resolved.port, resolved.source);

    let base_url = transport::base_url(&cli.host, resolved.port).map_err(|source| {
        InputError::InvalidHost {
            host: cli.host.clone(),
            source,
        }
    })?;
    let client = EditorClient::new(base_url)?;
    log_info!("editor endpoint {}", client.base_url());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(client.send(&request))?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    let Some(command) = cli.command.as_ref() else {
        Cli::command().print_help()?;
        std::process::exit(1);
    };

    match execute(&cli, command) {
        Ok(Some(value)) => println!("{}", cmd::render(&value, cli.pretty)),
        Ok(None) => {}
        Err(CliError::Input(e)) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Err(CliError::Transport(e)) => {
            eprintln!("{}", cmd::render_error(&e.to_string()));
            std::process::exit(1);
        }
        Err(e @ CliError::Runtime(_)) => return Err(e.into()),
    }
    Ok(())
}
