//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes pattern detection to AI assistants over stdio. The server is a
//! presentation layer over `prompt-pattern-core`; each `#[tool]` method
//! delegates to the same functions the CLI commands use.

use std::collections::BTreeSet;

use chrono::{Duration, Utc};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use prompt_pattern_core::analysis::{analyze, analyze_window};
use prompt_pattern_core::config::Config;
use prompt_pattern_core::item::Item;
use prompt_pattern_core::similarity::SimilarityMode;
use prompt_pattern_core::store::PromptStore;

use crate::commands::analysis_config;

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `analyze_patterns` tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzePatternsParams {
    /// Days of history to analyze. Defaults to the configured window.
    pub days: Option<i64>,
    /// Similarity strategy: "partial" or "exact".
    pub mode: Option<SimilarityMode>,
    /// Minimum similarity for two prompts to group (0.0-1.0).
    pub threshold: Option<f64>,
    /// Minimum repetitions before a request counts as a pattern.
    pub min_count: Option<usize>,
}

/// Parameters for the `analyze_prompts` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzePromptsParams {
    /// Prompt texts, oldest first.
    pub prompts: Vec<String>,
    /// Minimum repetitions before a request counts as a pattern.
    pub min_count: Option<usize>,
}

/// Parameters for the `dismiss_pattern` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct DismissPatternParams {
    /// Pattern id, as returned by `analyze_patterns`.
    pub id: String,
}

/// MCP server exposing pattern detection to AI assistants.
#[derive(Clone)]
pub struct PatternServer {
    config: Config,
    store: PromptStore,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_router]
impl PatternServer {
    /// Create a server reading and writing the prompt log in `store`.
    pub fn new(config: Config, store: PromptStore) -> Self {
        Self {
            config,
            store,
            tool_router: Self::tool_router(),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let text = if params.format == "json" {
            to_json(&serde_json::json!({
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "description": env!("CARGO_PKG_DESCRIPTION"),
            }))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Analyze the user's prompt log.
    #[tool(
        description = "Find requests the user keeps repeating in their prompt log. Returns ranked patterns with counts, keywords, and a suggested shortcut name."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_patterns(
        &self,
        Parameters(params): Parameters<AnalyzePatternsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "analyze_patterns", ?params, "executing MCP tool");

        let analysis = analysis_config(&self.config, params.mode, params.threshold, params.min_count);
        let days = params.days.unwrap_or(self.config.days_to_analyze);
        let log = self.store.load();
        let report = analyze_window(&log.prompts, Utc::now(), days, &log.dismissed, &analysis);

        tracing::info!(
            tool = "analyze_patterns",
            patterns = report.stats.patterns_found,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(&report)?)]))
    }

    /// Analyze prompts passed in directly.
    #[tool(
        description = "Find repeated requests in a list of prompt texts (oldest first) without touching the stored log."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", prompts = params.prompts.len()))]
    fn analyze_prompts(
        &self,
        Parameters(params): Parameters<AnalyzePromptsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "analyze_prompts", "executing MCP tool");

        let now = Utc::now();
        let last = params.prompts.len();
        let items: Vec<Item> = params
            .prompts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let age = Duration::seconds((last - i) as i64);
                Item::capture(text, None, None, now - age)
            })
            .collect();

        let analysis = analysis_config(&self.config, None, None, params.min_count);
        let report = analyze(&items, &BTreeSet::new(), &analysis);

        tracing::info!(
            tool = "analyze_prompts",
            patterns = report.stats.patterns_found,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(&report)?)]))
    }

    /// Dismiss a pattern.
    #[tool(description = "Stop reporting a pattern. Takes the pattern id from analyze_patterns.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", id = %params.id))]
    fn dismiss_pattern(
        &self,
        Parameters(params): Parameters<DismissPatternParams>,
    ) -> Result<CallToolResult, McpError> {
        let id = params.id.trim();
        if id.is_empty() {
            return Err(McpError::invalid_params("pattern id must not be empty", None));
        }

        let mut log = self.store.load();
        let newly_dismissed = log.dismiss(id);
        if newly_dismissed {
            self.store
                .save(&log)
                .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        }

        tracing::info!(tool = "dismiss_pattern", newly_dismissed, "MCP tool completed");
        let json = to_json(&serde_json::json!({
            "id": id,
            "newly_dismissed": newly_dismissed,
        }))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for PatternServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use analyze_patterns to find requests the user repeats, \
                 and suggest the returned shortcut names.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
