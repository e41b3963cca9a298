mod console;
mod google;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use console::{ConsoleReporter, print_summary};
use google::{DEFAULT_ENDPOINT, GoogleTranslator};
use locale_sync_core::{FileConfig, LanguageRemap, RunConfig, SyncError, Synchronizer};

#[derive(Debug, Parser)]
#[command(name = "locale-sync", version)]
#[command(
    about = "Synchronize <lang>.json localization files with a canonical language, machine-translating only what is missing"
)]
struct Args {
    /// Directory containing the <lang>.json files
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Canonical language code whose file defines the key structure [default: en]
    source: Option<String>,

    /// TOML config file (defaults to <DIRECTORY>/locale-sync.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Send a language to the backend under another code (repeatable)
    #[arg(long = "remap", value_name = "FROM=TO")]
    remaps: Vec<String>,

    /// Token that stands in for {{placeholders}} while text is translated
    #[arg(long)]
    sentinel: Option<String>,

    /// Translate repeated strings again instead of reusing earlier results
    #[arg(long)]
    no_cache: bool,

    /// Translation endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Hide progress bars
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(err) = run(&args) {
        let message = err
            .downcast_ref::<SyncError>()
            .map_or_else(|| format!("{err:#}"), ToString::to_string);
        eprintln!("{} {message}", "ERROR:".red().bold());
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = build_config(args)?;
    announce_banner(&config);

    let backend = GoogleTranslator::new(args.endpoint.clone())
        .context("failed to create translation client")?;
    let mut reporter = ConsoleReporter::new(args.quiet)?;
    let summary = Synchronizer::new(config, backend).run(&mut reporter)?;

    print_summary(&summary);
    println!("{}", "Translation complete!".bright_green().bold());
    Ok(())
}

fn build_config(args: &Args) -> Result<RunConfig> {
    let source = args
        .source
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let mut config = RunConfig::new(
        args.directory.clone(),
        source.unwrap_or(locale_sync_core::config::DEFAULT_SOURCE_LANGUAGE),
    );

    let (config_path, required) = match &args.config {
        Some(path) => (path.clone(), true),
        None => (config.default_config_path(), false),
    };
    if let Some(file) = FileConfig::load(&config_path, required)? {
        config.apply_file(file, source.is_some());
    }

    for pair in &args.remaps {
        let (from, to) = LanguageRemap::parse_pair(pair)?;
        config.remap.insert(from, to);
    }
    if let Some(sentinel) = &args.sentinel {
        config.sentinel.clone_from(sentinel);
    }
    config.cache_translations = !args.no_cache;

    config.validate()?;
    Ok(config)
}

fn announce_banner(config: &RunConfig) {
    println!("{}", "🌐 locale-sync".bright_cyan().bold());
    println!(
        "Source: {} in {}",
        RunConfig::file_name(&config.source_language).bold(),
        config.directory.display()
    );
    for (from, to) in config.remap.iter() {
        log::debug!("remap {from} -> {to}");
    }
}
