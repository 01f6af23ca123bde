//! CLI tools for jenkins-views
//!
//! - `test`: Generate view XML from YAML definitions
//! - `columns`: List the column identifiers accepted by list views
//! - `completions`: Generate shell completions

pub mod completions;

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use jenkins_views::infrastructure::{Config, init_logging};
use jenkins_views::view::columns::COLUMNS;
use std::path::PathBuf;

/// CLI arguments for jenkins-views
#[derive(Parser, Debug)]
#[command(name = "jenkins-views")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (YAML)
    #[arg(long, global = true)]
    conf: Option<PathBuf>,

    /// Log level, overridden by RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate view XML without contacting a server
    Test {
        /// Definition files or directories, each possibly a path list joined
        /// with ':' (';' on Windows); stdin if none given
        paths: Vec<PathBuf>,
        /// Directory to write one XML file per view (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Look for YAML files recursively
        #[arg(short, long)]
        recursive: bool,
        /// Directories to exclude when searching recursively (glob); several
        /// may be joined with the path list separator
        #[arg(short = 'x', long)]
        exclude: Vec<String>,
        /// Only generate views whose name matches (glob)
        #[arg(short, long = "name")]
        names: Vec<String>,
    },

    /// List column identifiers for list views
    Columns {
        /// Only show these identifiers
        #[arg(value_parser = column_ids())]
        ids: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: ShellArg,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

impl From<ShellArg> for clap_complete::Shell {
    fn from(shell: ShellArg) -> Self {
        match shell {
            ShellArg::Bash => Self::Bash,
            ShellArg::Zsh => Self::Zsh,
            ShellArg::Fish => Self::Fish,
            ShellArg::PowerShell => Self::PowerShell,
        }
    }
}

fn column_ids() -> PossibleValuesParser {
    PossibleValuesParser::new(COLUMNS.iter().map(|(id, _)| *id))
}

/// Build the CLI command for completion generation
pub fn build_cli() -> clap::Command {
    Args::command()
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.conf {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(level) = &args.log_level {
        config.log_level.clone_from(level);
    }
    Ok(config)
}

/// Parse and execute CLI arguments
pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(&args)?;
    init_logging(&config.log_level);

    match args.command {
        Command::Test {
            paths,
            output,
            recursive,
            exclude,
            names,
        } => {
            config.recursive |= recursive;
            config.exclude.extend(exclude);

            let test_config = test::TestConfig {
                paths,
                output,
                names,
            };
            let views = test::generate_views(&test_config, &config)?;

            if let Some(dir) = &test_config.output {
                let written = test::save_views(&views, dir)?;
                tracing::info!(written, unchanged = views.len() - written, "saved views");
            } else {
                print!("{}", test::render_views(&views)?);
            }
        }
        Command::Columns { ids } => {
            for (id, element) in COLUMNS {
                if ids.is_empty() || ids.iter().any(|wanted| wanted == id) {
                    println!("{id:<15} {element}");
                }
            }
        }
        Command::Completions { shell, output } => {
            completions::completions(shell.into(), output.as_deref())?;
        }
    }

    Ok(())
}
