//! MCP Server for perspective analysis and structured debate
//!
//! # Usage
//!
//! ```bash
//! # Standard MCP mode
//! perspective-mcp
//!
//! # Preload perspectives and shorten summary excerpts
//! PERSPECTIVE_EXCERPT_CHARS=80 perspective-mcp --preset ./panel.toml
//! ```

use anyhow::Result;
use clap::Parser;
use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};

use perspective_mcp::{create_shared_state, PanelSession, PerspectiveServer, ServerConfig};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with perspectives to define at startup (overrides PERSPECTIVE_PRESET_PATH)
    #[arg(long)]
    preset: Option<std::path::PathBuf>,

    /// Characters kept per statement in debate summaries (overrides PERSPECTIVE_EXCERPT_CHARS)
    #[arg(long)]
    excerpt_chars: Option<usize>,

    /// Tracing directive, e.g. "perspective_mcp=debug"
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env();
    if let Some(path) = args.preset {
        config.preset_path = Some(path);
    }
    if let Some(n) = args.excerpt_chars.filter(|n| *n > 0) {
        config.excerpt_chars = n;
    }
    if let Some(filter) = args.log_filter {
        config.log_filter = filter;
    }

    // stdout carries the MCP transport; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                config
                    .log_filter
                    .parse()
                    .map_err(|e| anyhow::anyhow!("Invalid log filter '{}': {}", config.log_filter, e))?,
            ),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Perspective MCP Server");

    let mut session = PanelSession::new();
    if let Some(preset) = config.load_preset()? {
        let perspectives = preset.into_perspectives();
        tracing::info!(
            path = %config.preset_path.as_deref().map(|p| p.display().to_string()).unwrap_or_default(),
            count = perspectives.len(),
            "Applying perspective preset"
        );
        session.define_perspectives(perspectives)?;
    }

    tracing::info!(excerpt_chars = config.excerpt_chars, "Server config loaded");

    let server = PerspectiveServer::new(create_shared_state(session), config);

    let transport = (stdin(), stdout());
    let service = server.serve(transport).await?;

    service.waiting().await?;

    Ok(())
}
