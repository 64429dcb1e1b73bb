//! Polybuild CLI - inspect how a project's build files map onto syntax parsers

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use polybuild::config;
use polybuild::{Syntax, marker};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "polybuild")]
#[command(version = "0.1.0")]
#[command(about = "Syntax dispatch for multi-syntax build-definition files")]
#[command(long_about = r##"
Polybuild decides which parser backend handles each build file in a project:
an optional first-line marker ("# BUILD FILE SYNTAX: <NAME>") requests a
specific syntax, and files without one use the configured default.

Example usage:
  polybuild probe BUCK lib/BUCK
  polybuild check --root . --default-syntax SKYLARK
  polybuild syntaxes
"##)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ./polybuild.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report which syntax would handle each given build file
    Probe {
        /// Build files to probe
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Syntax for files without a marker (overrides the config file)
        #[arg(short, long)]
        default_syntax: Option<Syntax>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Walk a tree and verify every build file resolves to a known syntax
    Check {
        /// Root directory to walk
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Build-file name to look for (overrides the config file)
        #[arg(short, long)]
        build_file_name: Option<String>,

        /// Syntax for files without a marker (overrides the config file)
        #[arg(short, long)]
        default_syntax: Option<Syntax>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List the supported syntaxes
    Syntaxes,

    /// Write a starter polybuild.toml
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

/// Outcome of running syntax selection against one build file.
enum Probe {
    Selected {
        syntax: Syntax,
        marker: Option<String>,
    },
    Failed(polybuild::Error),
}

/// Runs the selection steps for one file: marker detection, then exact
/// name resolution, then the default.
fn probe_file(file: &Path, default_syntax: Syntax) -> Probe {
    match marker::requested_syntax_name(file) {
        Ok(None) => Probe::Selected {
            syntax: default_syntax,
            marker: None,
        },
        Ok(Some(name)) => match Syntax::from_marker_name(&name) {
            Some(syntax) => Probe::Selected {
                syntax,
                marker: Some(name),
            },
            None => Probe::Failed(polybuild::Error::UnrecognizedSyntax {
                build_file: file.to_path_buf(),
                name,
            }),
        },
        Err(error) => Probe::Failed(error),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Probe {
            files,
            default_syntax,
            format,
        } => {
            let config = config::load_config(cli.config.as_deref())?.unwrap_or_default();
            let default_syntax = default_syntax
                .or(config.default_syntax)
                .unwrap_or(config::DEFAULT_SYNTAX);
            tracing::debug!(
                "Probing {} files with default syntax {}",
                files.len(),
                default_syntax
            );

            let mut failed = 0usize;
            if format == "json" {
                let reports: Vec<serde_json::Value> = files
                    .iter()
                    .map(|file| match probe_file(file, default_syntax) {
                        Probe::Selected { syntax, marker } => json!({
                            "file": file.display().to_string(),
                            "syntax": syntax,
                            "origin": if marker.is_some() { "marker" } else { "default" },
                            "marker": marker,
                        }),
                        Probe::Failed(error) => {
                            failed += 1;
                            json!({
                                "file": file.display().to_string(),
                                "error": error.to_string(),
                            })
                        }
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for file in &files {
                    match probe_file(file, default_syntax) {
                        Probe::Selected { syntax, marker } => {
                            let origin = if marker.is_some() { "marker" } else { "default" };
                            println!(
                                "📄 {}  {} ({})",
                                file.display(),
                                syntax.to_string().bold(),
                                origin
                            );
                        }
                        Probe::Failed(error) => {
                            failed += 1;
                            println!("❌ {}  {}", file.display(), error.to_string().red());
                        }
                    }
                }
            }

            if failed > 0 {
                anyhow::bail!("{} of {} build files did not resolve", failed, files.len());
            }
        }

        Commands::Check {
            root,
            build_file_name,
            default_syntax,
            format,
        } => {
            let config = config::load_config(cli.config.as_deref())?.unwrap_or_default();
            let default_syntax = default_syntax
                .or(config.default_syntax)
                .unwrap_or(config::DEFAULT_SYNTAX);
            let build_file_name = build_file_name
                .or(config.build_file_name)
                .unwrap_or_else(|| config::DEFAULT_BUILD_FILE_NAME.to_string());

            tracing::info!(
                "Checking files named {} under {}",
                build_file_name,
                root.display()
            );

            let mut checked = 0usize;
            let mut failures: Vec<(PathBuf, polybuild::Error)> = Vec::new();
            for entry in WalkDir::new(&root)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                if entry.file_name().to_str() != Some(build_file_name.as_str()) {
                    continue;
                }
                checked += 1;
                if let Probe::Failed(error) = probe_file(entry.path(), default_syntax) {
                    failures.push((entry.path().to_path_buf(), error));
                }
            }

            if format == "json" {
                let report = json!({
                    "checked": checked,
                    "failures": failures
                        .iter()
                        .map(|(file, error)| json!({
                            "file": file.display().to_string(),
                            "error": error.to_string(),
                        }))
                        .collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if checked == 0 {
                println!(
                    "∅ No build files named {} under {}",
                    build_file_name,
                    root.display()
                );
            } else {
                for (file, error) in &failures {
                    println!("❌ {}  {}", file.display(), error.to_string().red());
                }
                if failures.is_empty() {
                    println!(
                        "✅ {} build files resolve to a known syntax",
                        checked.to_string().bold()
                    );
                }
            }

            if !failures.is_empty() {
                anyhow::bail!(
                    "{} of {} build files did not resolve",
                    failures.len(),
                    checked
                );
            }
        }

        Commands::Syntaxes => {
            println!("Supported build-file syntaxes:");
            for syntax in Syntax::all() {
                println!("  {}", syntax);
            }
            println!();
            println!(
                "Request one explicitly with a first line of: {}<NAME>",
                marker::SYNTAX_MARKER_START
            );
        }

        Commands::Init { force } => {
            let path = cli
                .config
                .clone()
                .unwrap_or_else(config::default_config_path);
            config::write_config(&path, &config::starter_config(), force)?;
            println!("✅ Wrote {}", path.display());
        }
    }

    Ok(())
}
