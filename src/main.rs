use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use modver::config::{self, DEFAULT_LATEST_MAX, ModverConfig, SourceKind};
use modver::version::resolver::ModuleVersionResolver;
use modver::version::types::ModuleVersion;

#[derive(Parser)]
#[command(name = "modver")]
#[command(version, about = "Select published versions of a Go module")]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/modver/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Where to list versions from, overriding the config file
    #[arg(long, global = true, value_enum)]
    source: Option<SourceKind>,

    /// Print a JSON array instead of one module@version per line
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Versions satisfying a constraint such as ">= v1.1.0, < v2"
    Filter {
        module: String,
        constraints: String,
    },
    /// The newest version of each minor line, oldest first
    Latest {
        module: String,
        /// Number of minor lines to select
        #[arg(short = 'n', long, default_value_t = DEFAULT_LATEST_MAX)]
        max: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let mut config = ModverConfig::load(&config_path)?;
    if let Some(kind) = cli.source {
        config.source.kind = kind;
    }

    let _guard = modver::logging::init(&config.logging, &config::log_path())?;
    info!("Using {:?} source", config.source.kind);

    let resolver = ModuleVersionResolver::new(config.source.build());
    let versions = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async {
            match &cli.command {
                Command::Filter {
                    module,
                    constraints,
                } => resolver
                    .filter_version(module, constraints)
                    .await
                    .with_context(|| format!("cannot filter versions of {}", module)),
                Command::Latest { module, max } => resolver
                    .latest_version(module, *max)
                    .await
                    .with_context(|| format!("cannot select latest versions of {}", module)),
            }
        })?;

    print_versions(&versions, cli.json)
}

fn print_versions(versions: &[ModuleVersion], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(versions)?);
    } else {
        for version in versions {
            println!("{}", version);
        }
    }
    Ok(())
}
