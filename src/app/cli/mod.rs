//! CLI Adapter.

mod pipeline;
mod storyboards;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::api::StudioOptions;
use crate::domain::{AppError, ParameterOverrides};

/// Log filter variable, e.g. `STORYFRAME_LOG=storyframe=debug`.
const LOG_ENV: &str = "STORYFRAME_LOG";

#[derive(Parser)]
#[command(name = "storyframe")]
#[command(version)]
#[command(about = "Turn screenplay text into storyboard frames", long_about = None)]
struct Cli {
    /// Config file (default: ./storyframe.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
struct OverrideArgs {
    /// Override a parameter, e.g. --set camera.fov=35 (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    set: Vec<String>,
    /// JSON file with parameter overrides
    #[arg(long, value_name = "FILE")]
    overrides: Option<PathBuf>,
}

impl OverrideArgs {
    /// File values first, then `--set` assignments on top.
    fn resolve(&self) -> Result<ParameterOverrides, AppError> {
        let from_file = match &self.overrides {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|err| {
                    AppError::config_error(format!(
                        "Failed to read overrides file {}: {}",
                        path.display(),
                        err
                    ))
                })?;
                let document: serde_json::Value = serde_json::from_str(&content)?;
                ParameterOverrides::from_json(&document)?
            }
            None => ParameterOverrides::new(),
        };
        Ok(from_file.merged_with(&ParameterOverrides::from_assignments(&self.set)?))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Split a script into scenes and show detected cues
    Scenes {
        /// Script file, or - for stdin
        script: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show translated parameters and prompts without generating images
    #[clap(visible_alias = "t")]
    Translate {
        /// Script file, or - for stdin
        script: PathBuf,
        #[command(flatten)]
        overrides: OverrideArgs,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Generate a storyboard from a script
    #[clap(visible_alias = "g")]
    Generate {
        /// Script file, or - for stdin
        script: PathBuf,
        /// Storyboard name (default: timestamped)
        #[arg(short, long)]
        name: Option<String>,
        #[command(flatten)]
        overrides: OverrideArgs,
        /// Use placeholder images instead of calling the image service
        #[arg(long)]
        mock: bool,
    },
    /// Regenerate one frame with adjusted parameters
    #[clap(visible_alias = "r")]
    Regenerate {
        /// Storyboard id
        id: String,
        /// Scene number of the frame to replace
        scene: u32,
        #[command(flatten)]
        overrides: OverrideArgs,
        /// Use placeholder images instead of calling the image service
        #[arg(long)]
        mock: bool,
    },
    /// Retry image generation for failed frames
    Retry {
        /// Storyboard id
        id: String,
        /// Use placeholder images instead of calling the image service
        #[arg(long)]
        mock: bool,
    },
    /// List saved storyboards
    #[clap(visible_alias = "ls")]
    List,
    /// Show a saved storyboard
    Show {
        /// Storyboard id (prompted when omitted)
        id: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Delete a saved storyboard and its images
    #[clap(visible_alias = "rm")]
    Delete {
        /// Storyboard id (prompted when omitted)
        id: Option<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Export a storyboard as a Markdown shot list
    Export {
        /// Storyboard id (prompted when omitted)
        id: Option<String>,
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Write a default storyframe.toml to the current directory
    Init,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = dispatch(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "storyframe=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn dispatch(cli: Cli) -> Result<(), AppError> {
    let base = StudioOptions { config_path: cli.config, ..StudioOptions::current()? };
    let with_mock = |mock: bool| StudioOptions { mock, ..base.clone() };

    match cli.command {
        Commands::Scenes { script, json } => pipeline::run_scenes(&read_script(&script)?, json),
        Commands::Translate { script, overrides, json } => {
            pipeline::run_translate(&base, &read_script(&script)?, &overrides.resolve()?, json)
        }
        Commands::Generate { script, name, overrides, mock } => pipeline::run_generate(
            &with_mock(mock),
            &read_script(&script)?,
            name,
            overrides.resolve()?,
        ),
        Commands::Regenerate { id, scene, overrides, mock } => {
            pipeline::run_regenerate(&with_mock(mock), &id, scene, &overrides.resolve()?)
        }
        Commands::Retry { id, mock } => pipeline::run_retry(&with_mock(mock), &id),
        Commands::List => storyboards::run_list(&base),
        Commands::Show { id, json } => storyboards::run_show(&base, id, json),
        Commands::Delete { id, yes } => storyboards::run_delete(&base, id, yes),
        Commands::Export { id, output } => storyboards::run_export(&base, id, output.as_deref()),
        Commands::Init => {
            let path = crate::app::api::init_at(&base.root)?;
            println!("✅ Created {}", path.display());
            Ok(())
        }
    }
}

/// Read a script file, or stdin when the path is `-`.
fn read_script(path: &Path) -> Result<Vec<u8>, AppError> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        return Ok(buffer);
    }
    fs::read(path).map_err(|err| {
        AppError::config_error(format!("Failed to read script {}: {}", path.display(), err))
    })
}
