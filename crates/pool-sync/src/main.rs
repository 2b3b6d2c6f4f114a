use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use pool_parts::ComponentClass;
use pool_sync::{HttpSource, SyncConfig, Syncer};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pool-sync")]
#[command(about = "Regenerate house resistor and capacitor parts in a pool", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Pool root; parts are written to <ROOT>/parts/<class>/
    #[arg(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Config file (defaults to <ROOT>/pool-sync.toml when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Search endpoint to query instead of the configured one
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Only sync these classes (resistor, capacitor)
    #[arg(long = "class", value_name = "CLASS")]
    classes: Vec<ComponentClass>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still wins over --debug
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::Builder::from_env(env).init();

    let mut config = SyncConfig::load(&cli.root, cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if !cli.classes.is_empty() {
        config.classes = cli.classes;
    }

    let source = HttpSource::new(&config)?;
    for report in Syncer::new(&source, &config, &cli.root).run()? {
        println!(
            "{} {}: {} written, {} skipped",
            "✓".green(),
            report.class,
            report.written,
            report.skipped
        );
    }
    Ok(())
}
