//! flipgen CLI entry point

use anyhow::{Context, Result};
use flipgen::config::cli::Cli;
use flipgen::config::{toml, validator, Config};
use flipgen::coordinator::run_generation;
use flipgen::output::{json, text, OutputFormat};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse CLI arguments (clap exits with a usage error on bad input)
    let cli = Cli::parse_args();
    cli.validate()?;

    setup_logging(cli.verbose);

    println!("flipgen v{}", env!("CARGO_PKG_VERSION"));
    println!("Bit-flip fault profile generator");
    println!();

    let config = toml::load_config(&cli)?;
    validator::validate_config(&config).context("Configuration validation failed")?;

    print_configuration(&config);

    if cli.dry_run {
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    println!();
    let summary = run_generation(&config)?;

    let output_path = config.output_path();
    text::print_summary(&summary, &output_path);

    if let Some(ref path) = config.output.summary_json {
        json::write_summary_json(path, &summary, true)?;
        info!(path = %path.display(), "summary written");
    }

    println!("finish!");
    Ok(())
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: a global tracing subscriber was already set");
    }
}

/// Print configuration summary
fn print_configuration(config: &Config) {
    let bounds = config.bounds();

    println!("Configuration:");
    println!("  Bit budget:   {}", config.total_bits);
    println!("  Records:      {}", config.generator.records);
    println!("  Max attempts: {} per record", config.generator.max_attempts);
    match config.generator.seed {
        Some(seed) => println!("  Seed:         {}", seed),
        None => println!("  Seed:         random"),
    }
    println!("  Bounds:");
    println!("    MBU2 (2-bit):   {} - {}", bounds.mbu2_min, bounds.mbu2_max);
    println!("    MBU3 (3-bit):   0 - {}", bounds.mbu3_max);
    println!("    MBUN (5-7 bit): 0 - {} occurrences", bounds.mbun_max);
    println!("  Output:");
    println!("    Path:   {}", config.output_path().display());
    println!(
        "    Format: {}",
        match config.output.format {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    );
    if let Some(ref path) = config.output.summary_json {
        println!("    Summary: {}", path.display());
    }
}
