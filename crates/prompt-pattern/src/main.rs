//! prompt-pattern CLI
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use prompt_pattern::{Cli, Commands, commands};
use prompt_pattern_core::config::ConfigLoader;
use prompt_pattern_core::store::PromptStore;
use tracing::debug;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // arg_required_else_help ensures we have --version-only or a subcommand
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = camino::Utf8PathBuf::try_from(cwd).map_err(|e| {
        anyhow::anyhow!(
            "current directory is not valid UTF-8: {}",
            e.into_path_buf().display()
        )
    })?;
    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(ref config_path) = cli.config {
        let config_path = camino::Utf8PathBuf::try_from(config_path.clone()).map_err(|e| {
            anyhow::anyhow!(
                "config path is not valid UTF-8: {}",
                e.into_path_buf().display()
            )
        })?;
        loader = loader.with_file(&config_path);
    }
    let (config, config_sources) = match loader.load() {
        Ok(loaded) => loaded,
        // Hooks run inside the host's turn and must not break it over a bad config.
        Err(err) if command.is_hook() => {
            eprintln!("prompt-pattern: ignoring configuration files: {err}");
            ConfigLoader::new()
                .with_user_config(false)
                .load()
                .unwrap_or_default()
        }
        Err(err) => return Err(err).context("failed to load configuration"),
    };

    let obs_config = observability::ObservabilityConfig::from_env_with_overrides(
        config
            .log_dir
            .as_ref()
            .map(|dir| dir.as_std_path().to_path_buf()),
    );
    let env_filter =
        || observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = match observability::init_observability(&obs_config, env_filter()) {
        Ok(guard) => guard,
        // Same rule as the config fallback: a bad log destination must not fail a hook.
        Err(err) if command.is_hook() => {
            eprintln!("prompt-pattern: file logging disabled: {err:#}");
            observability::init_observability(
                &observability::ObservabilityConfig::default(),
                env_filter(),
            )
            .ok()
            .flatten()
        }
        Err(err) => return Err(err).context("failed to initialize logging/tracing"),
    };

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        chdir = ?cli.chdir,
        "CLI initialized"
    );

    let store = || -> anyhow::Result<PromptStore> {
        let dir = config
            .resolve_data_dir()
            .context("failed to locate the prompt log")?;
        Ok(PromptStore::open(dir))
    };

    // Execute command
    let result = match command {
        Commands::Patterns(args) => {
            commands::patterns::cmd_patterns(args, cli.json, &config, &store()?)
        }
        Commands::Capture(args) => commands::capture::cmd_capture(args, &config, store().ok()),
        Commands::Suggest(args) => commands::suggest::cmd_suggest(args, &config, store().ok()),
        Commands::Dismiss(args) => commands::dismiss::cmd_dismiss(args, cli.json, &store()?),
        Commands::Info(args) => commands::info::cmd_info(args, cli.json, &config, &config_sources),
        #[cfg(feature = "mcp")]
        Commands::Serve(args) => {
            let store = store()?;
            let rt = tokio::runtime::Runtime::new()
                .context("failed to create async runtime for MCP server")?;
            rt.block_on(commands::serve::cmd_serve(args, config, store))
        }
    };
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}
