// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// av-settings - Media frontend settings resolver
///
/// Merges settings layers, validates them and prints the result.
#[derive(Parser, Debug)]
#[command(name = "av-settings")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Resolve and validate media frontend settings", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Merge settings layers and print the resolved settings
    Resolve(LayerArgs),

    /// Validate settings layers without printing them
    Check(LayerArgs),

    /// Write a settings template file
    Init(InitArgs),

    /// List known shape tokens
    Shapes(ShapesArgs),

    /// Print version information
    Version,
}

/// Inputs shared by `resolve` and `check`.
#[derive(Args, Debug, Default, Clone)]
pub struct LayerArgs {
    /// Built-in template to use as the base
    #[arg(short, long, value_enum, conflicts_with = "base")]
    pub template: Option<TemplateArg>,

    /// Settings file to use as the base
    #[arg(short, long)]
    pub base: Option<PathBuf>,

    /// Override file, applied in the order given
    #[arg(short = 'o', long = "override", value_name = "FILE")]
    pub overrides: Vec<PathBuf>,

    /// Apply AV_* environment variables as the last layer
    #[arg(long)]
    pub env: bool,

    /// Warn about unknown shape tokens instead of failing
    #[arg(long)]
    pub permissive: bool,
}

/// Arguments for the init command.
#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Template to write
    #[arg(short, long, value_enum, default_value = "frontend")]
    pub template: TemplateArg,

    /// Destination file
    #[arg(short, long, default_value = "av-settings.json")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the shapes command.
#[derive(Args, Debug, Clone)]
pub struct ShapesArgs {
    /// Only list shapes for one media kind
    #[arg(short, long, value_enum)]
    pub kind: Option<KindArg>,
}

/// Template names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TemplateArg {
    /// Full frontend template
    Frontend,
    /// Asset-bundle template
    Assets,
}

impl From<TemplateArg> for crate::config::Template {
    fn from(arg: TemplateArg) -> Self {
        match arg {
            TemplateArg::Frontend => crate::config::Template::Frontend,
            TemplateArg::Assets => crate::config::Template::Assets,
        }
    }
}

/// Media kinds accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum KindArg {
    Video,
    Audio,
    Subtitle,
}

impl From<KindArg> for crate::config::MediaKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Video => crate::config::MediaKind::Video,
            KindArg::Audio => crate::config::MediaKind::Audio,
            KindArg::Subtitle => crate::config::MediaKind::Subtitle,
        }
    }
}
