// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use console::style;

use crate::config::{
    sources, ConfigLoader, MediaKind, PartialSettings, ResolvedSettings, Settings, Template,
};
use crate::error::{ConfigError, Result, ResultExt, SettingsError};

use super::args::{Cli, Commands, InitArgs, LayerArgs, OutputFormat, ShapesArgs};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command.clone() {
        Commands::Resolve(args) => run_resolve(&args),
        Commands::Check(args) => run_check(&cli, &args),
        Commands::Init(args) => run_init(&args),
        Commands::Shapes(args) => run_shapes(&cli, &args),
        Commands::Version => run_version(),
    }
}

/// Collect the base and override layers named by the arguments.
fn collect_layers(args: &LayerArgs) -> Result<(Settings, Vec<PartialSettings>)> {
    let mut overrides = Vec::new();

    let base = match (&args.base, args.template) {
        (Some(path), _) => sources::load_settings_from(path)?,
        (None, Some(template)) => Template::from(template).settings(),
        (None, None) => {
            if let Some(found) = sources::find_settings_file() {
                tracing::debug!("Using discovered settings file {:?}", found);
                overrides.push(sources::load_overrides_from(&found)?);
            }
            Template::Frontend.settings()
        }
    };

    for path in &args.overrides {
        overrides.push(sources::load_overrides_from(path)?);
    }

    if args.env {
        overrides.push(sources::env_overrides()?);
    }

    Ok((base, overrides))
}

fn resolve(args: &LayerArgs) -> Result<ResolvedSettings> {
    let (base, overrides) = collect_layers(args)?;
    tracing::debug!("Resolving settings with {} override layer(s)", overrides.len());

    let loader = ConfigLoader::new().permissive(args.permissive);
    Ok(loader.load(base, overrides)?)
}

/// Run the resolve command.
fn run_resolve(args: &LayerArgs) -> Result<()> {
    tracing::debug!("Running resolve command with args: {:?}", args);

    let resolved = resolve(args)?;
    let json = serde_json::to_string_pretty(&resolved).context("serializing settings")?;
    println!("{}", json);
    Ok(())
}

/// Run the check command.
fn run_check(cli: &Cli, args: &LayerArgs) -> Result<()> {
    tracing::debug!("Running check command with args: {:?}", args);

    let outcome = resolve(args);

    match cli.format {
        Some(OutputFormat::Json) => {
            let report = serde_json::json!({
                "valid": outcome.is_ok(),
                "error": outcome.as_ref().err().map(|e| e.to_string()),
            });
            println!("{}", report);
        }
        _ => {
            // Failures are reported once, by main, on stderr.
            if outcome.is_ok() {
                println!("{} settings are valid", style("✓").green().bold());
            }
        }
    }

    outcome.map(|_| ())
}

/// Run the init command.
fn run_init(args: &InitArgs) -> Result<()> {
    tracing::debug!("Running init command with args: {:?}", args);

    if args.path.exists() && !args.force {
        return Err(SettingsError::Config(ConfigError::AlreadyExists {
            path: args.path.clone(),
        }));
    }

    let template = Template::from(args.template);
    std::fs::write(&args.path, template.json())?;

    println!(
        "{} Wrote {} template to {}",
        style("✓").green().bold(),
        template,
        args.path.display()
    );
    Ok(())
}

/// Run the shapes command.
fn run_shapes(cli: &Cli, args: &ShapesArgs) -> Result<()> {
    let loader = ConfigLoader::new();
    let kinds: Vec<MediaKind> = match args.kind {
        Some(kind) => vec![kind.into()],
        None => MediaKind::all().to_vec(),
    };

    match cli.format {
        Some(OutputFormat::Json) => {
            let listing: serde_json::Map<String, serde_json::Value> = kinds
                .iter()
                .map(|kind| {
                    let shapes = loader.vocabulary().shapes(*kind);
                    (kind.to_string(), serde_json::json!(shapes))
                })
                .collect();
            println!("{}", serde_json::Value::Object(listing));
        }
        _ => {
            for kind in kinds {
                println!("{}", style(kind).bold());
                for shape in loader.vocabulary().shapes(kind) {
                    println!("  {}", shape);
                }
            }
        }
    }

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("av-settings {}", crate::version::version_string());
    Ok(())
}
