use anyhow::{bail, Result};
use env_logger::Builder;
use log::{warn, LevelFilter};
use std::io::Write;
use std::path::PathBuf;
use timelock_monitor::config::MonitorConfig;
use timelock_monitor::monitor_timelock;
use timelock_monitor::report::{build_rows, filter_rows, save_report, ReportOptions, RowFilter};

fn print_usage(program: &str) {
    println!("Timelock Monitor v{}", timelock_monitor::VERSION);
    println!("\nUsage:");
    println!("  {} [OPTIONS]", program);
    println!("  {} --version", program);
    println!("\nOptions:");
    println!("  --config, -c PATH          Load configuration from a JSON file");
    println!("  --api-key KEY              Etherscan API key (default: $ETHERSCAN_API_KEY)");
    println!("  --output, -o PATH          Save the report to the specified file path");
    println!("  --filter-signature TEXT    Only show rows whose signature contains TEXT");
    println!("  --filter-kind TEXT         Only show rows whose transaction type contains TEXT");
    println!("  --raw-data                 Show call data as hex");
    println!("  --raw-target               Show target addresses instead of names");
    println!("  --limit, -l N              Number of recent transactions to fetch");
    println!("  --verbose                  Enable debug logging");
    println!("  --version, -v              Show version information");
    println!("  --help, -h                 Show this message");
}

fn value_of<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    match args.get(i + 1) {
        Some(value) => Ok(value.as_str()),
        None => bail!("Missing value for {}", flag),
    }
}

// Simple CLI without clap
#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && (args[1] == "--version" || args[1] == "-v") {
        println!("Timelock Monitor v{}", timelock_monitor::VERSION);
        return Ok(());
    }
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_usage(&args[0]);
        return Ok(());
    }

    let mut config_path = None;
    let mut api_key = None;
    let mut output_path = None;
    let mut filter = RowFilter::default();
    let mut options = ReportOptions::default();
    let mut limit = None;
    let mut verbose = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                config_path = Some(PathBuf::from(value_of(&args, i, "--config")?));
                i += 2;
            }
            "--api-key" => {
                api_key = Some(value_of(&args, i, "--api-key")?.to_string());
                i += 2;
            }
            "--output" | "-o" => {
                output_path = Some(PathBuf::from(value_of(&args, i, "--output")?));
                i += 2;
            }
            "--filter-signature" => {
                filter.signature = Some(value_of(&args, i, "--filter-signature")?.to_string());
                i += 2;
            }
            "--filter-kind" => {
                filter.kind = Some(value_of(&args, i, "--filter-kind")?.to_string());
                i += 2;
            }
            "--raw-data" => {
                options.raw_data = true;
                i += 1;
            }
            "--raw-target" => {
                options.raw_target = true;
                i += 1;
            }
            "--limit" | "-l" => {
                limit = Some(value_of(&args, i, "--limit")?.parse::<usize>()?);
                i += 2;
            }
            "--verbose" => {
                verbose = true;
                i += 1;
            }
            _ => {
                println!("Unknown argument: {}", args[i]);
                i += 1;
            }
        }
    }

    // Initialize logger
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Utc::now().timestamp(),
                record.level(),
                record.args()
            )
        })
        .filter(None, if verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .init();

    let mut config = match &config_path {
        Some(path) => MonitorConfig::load(path)?,
        None => MonitorConfig::default(),
    };
    if api_key.is_some() {
        config.api_key = api_key;
    }
    if let Some(limit) = limit {
        config.history_limit = limit;
    }
    let config = config.with_env();

    println!("Monitoring governance transactions of: {}", config.executor);

    let outcome = monitor_timelock(&config).await?;
    if !outcome.errors.is_empty() {
        warn!("{} transactions could not be decoded", outcome.errors.len());
    }

    let rows = build_rows(&outcome.history, &config.address_book(), &options);
    let rows = filter_rows(rows, &filter);

    match output_path {
        Some(path) => {
            save_report(&rows, &path)?;
            println!("Found {} governance transactions", rows.len());
            println!("Saved to: {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&rows)?),
    }

    Ok(())
}
