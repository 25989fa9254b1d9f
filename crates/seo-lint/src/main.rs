//! seo-lint CLI
#![deny(unsafe_code)]

use anyhow::{Context, anyhow};
use camino::Utf8PathBuf;
use clap::Parser;
use seo_lint::{Cli, Commands, commands};
use seo_lint_core::config::{Config, ConfigLoader, ConfigSources};
use tracing::debug;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // arg_required_else_help leaves either --version-only or a subcommand
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let (config, sources) = load_config(cli.config.as_deref())?;

    let log_settings = observability::ObservabilityConfig::from_env_with_overrides(
        config.log_dir.as_ref().map(|dir| dir.as_std_path().to_path_buf()),
    );
    let _guard = observability::init_observability(
        &log_settings,
        observability::env_filter(cli.quiet, cli.verbose),
        config.log_level.as_str(),
    )
    .context("failed to initialize logging")?;

    let max_input = config.input_limit();
    debug!(
        json = cli.json,
        color = ?cli.color,
        config_file = ?sources.primary_file(),
        max_input = ?max_input,
        "CLI initialized"
    );

    let thresholds = &config.thresholds;
    let result = match command {
        Commands::Analyze(args) => {
            commands::analyze::cmd_analyze(args, cli.json, thresholds, max_input)
        }
        Commands::Suggest(args) => {
            commands::suggest::cmd_suggest(args, cli.json, thresholds, max_input)
        }
        Commands::Density(args) => {
            commands::density::cmd_density(args, cli.json, thresholds, max_input)
        }
        Commands::Info(args) => commands::info::cmd_info(args, cli.json, &config, &sources),
        #[cfg(feature = "mcp")]
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .context("failed to create async runtime for MCP server")?
            .block_on(commands::serve::cmd_serve(args, max_input, config.clone())),
    };
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}

/// Discover project config from the working directory, plus an explicit `--config` file.
fn load_config(explicit: Option<&std::path::Path>) -> anyhow::Result<(Config, ConfigSources)> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = Utf8PathBuf::try_from(cwd)
        .map_err(|e| anyhow!("current directory is not valid UTF-8: {}", e.into_path_buf().display()))?;

    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(path) = explicit {
        let path = Utf8PathBuf::try_from(path.to_path_buf())
            .map_err(|e| anyhow!("config path is not valid UTF-8: {}", e.into_path_buf().display()))?;
        loader = loader.with_file(&path);
    }
    loader.load().context("failed to load configuration")
}
