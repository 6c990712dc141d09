//! kohaesion CLI
#![deny(unsafe_code)]

use anyhow::Context;
use kohaesion::{Cli, Commands, commands};
use kohaesion_core::config::ConfigLoader;
use clap::Parser;
use tracing::debug;

mod observability;

fn main() -> anyhow::Result<()> {
    let mut cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // arg_required_else_help ensures we have --version-only or a subcommand
    let Some(command) = cli.command.take() else {
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
    let (mut config, config_sources) = loader.load().context("failed to load configuration")?;
    cli.apply_overrides(&mut config);

    let obs_config = observability::ObservabilityConfig::from_env_with_overrides(
        config
            .log_dir
            .as_ref()
            .map(|dir| dir.as_std_path().to_path_buf()),
    );
    let env_filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs_config, env_filter, cli.quiet, cli.verbose)
        .context("failed to initialize logging/tracing")?;

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        chdir = ?cli.chdir,
        language = %config.language,
        tag_level = %config.tag_level,
        "CLI initialized"
    );

    let max_input = config.max_input();

    // Execute command
    let result = match command {
        Commands::Analyze(args) => {
            commands::analyze::cmd_analyze(args, cli.json, &config, max_input)
        }
        Commands::Readability(args) => {
            commands::readability::cmd_readability(args, cli.json, &config, max_input)
        }
        Commands::Space(args) => commands::space::cmd_space(args, cli.json, &config, max_input),
        Commands::Info(args) => commands::info::cmd_info(args, cli.json, &config, &config_sources),
    };
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}
