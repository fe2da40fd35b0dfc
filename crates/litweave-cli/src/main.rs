use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use litweave_config::{Config, ConfigError};
use litweave_engine::{EventLog, Generator, Language, Report, index_entries, io, transform_with};

#[derive(Parser)]
#[command(name = "litweave")]
#[command(
    version,
    about = "Generate Markdown, notebooks and slide decks from annotated source files",
    long_about = None
)]
#[command(after_help = "EXAMPLES:
    litweave                      Build every format listed in litweave.toml
    litweave --dry-run -v         Show what would be written
    litweave init                 Write a default litweave.toml
    litweave events 01-intro.jsh  Dump the block events of one source")]
struct Cli {
    /// Configuration file
    #[arg(short, long, value_name = "PATH", default_value = Config::FILE_NAME, global = true)]
    config: PathBuf,

    /// Render everything but write no files
    #[arg(long, global = true)]
    dry_run: bool,

    /// More logging (-v debug, -vv trace); RUST_LOG still wins
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate every configured format (the default)
    Build,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the block events of one source file as JSON
    Events {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let config = Config::load_from_path(&cli.config)
                .with_context(|| "Run `litweave init` to create a default configuration")?;
            let (_, index) = build(&config, cli.dry_run)?;
            for line in index {
                println!("{line}");
            }
        }
        Command::Init { force } => init(&cli.config, force)?,
        Command::Events { file } => {
            let language = language_for(&cli.config)?;
            println!("{}", events_json(&file, &language)?);
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Generate all configured formats and return the index lines, if any.
fn build(config: &Config, dry_run: bool) -> Result<(Report, Vec<String>)> {
    let targets = config.targets()?;
    let sources_dir = &config.sources.directory;
    let sources = io::gather_sources(sources_dir, &config.sources.extension)
        .with_context(|| format!("Failed to gather sources from {}", sources_dir.display()))?;

    if sources.is_empty() {
        log::warn!(
            "No `{}` files found in {}",
            config.sources.extension,
            sources_dir.display()
        );
    }

    let generator = Generator::new(targets, config.language.clone()).dry_run(dry_run);
    let report = generator.generate(&sources)?;

    let index = config
        .index_format()
        .map(|format| index_entries(&sources, &config.folder(format), format))
        .unwrap_or_default();

    Ok((report, index))
}

fn init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    Config::default().save_to_path(config_path)?;
    log::info!("Wrote {}", config_path.display());
    Ok(())
}

/// Language from the config file, or the default when there is none.
fn language_for(config_path: &Path) -> Result<Language> {
    match Config::load_from_path(config_path) {
        Ok(config) => Ok(config.language),
        Err(ConfigError::NotFound(_)) => Ok(Language::default()),
        Err(e) => Err(e.into()),
    }
}

fn events_json(file: &Path, language: &Language) -> Result<String> {
    let lines = io::read_lines(file)?;
    let mut log = EventLog::new();
    transform_with(&language.classifier(), &lines, &mut log);
    Ok(serde_json::to_string_pretty(log.events())?)
}
