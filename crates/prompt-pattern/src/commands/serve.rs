//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use clap::Args;
use prompt_pattern_core::config::Config;
use prompt_pattern_core::store::PromptStore;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::{info, instrument};

use crate::server::PatternServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Serve MCP requests on stdin/stdout until the client disconnects.
#[instrument(name = "cmd_serve", skip_all, fields(dir = %store.dir()))]
pub async fn cmd_serve(_args: ServeArgs, config: Config, store: PromptStore) -> anyhow::Result<()> {
    info!("starting MCP server on stdio");
    let service = PatternServer::new(config, store)
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;
    service
        .waiting()
        .await
        .context("MCP server stopped unexpectedly")?;
    info!("MCP server stopped");
    Ok(())
}
