//! dnsblcheck - DNS blacklist checker
//!
//! Binary entry point for the dnsblcheck CLI application.

#![warn(clippy::all, warnings)]
#![warn(clippy::pedantic, clippy::nursery)]

use clap::CommandFactory;
use dnsblcheck::cli::{Cli, Commands, OutputFormat};
use dnsblcheck::config::{CheckerConfig, ConfigLoader};
use dnsblcheck::dnsbl::{BlacklistServer, CheckReport, Checker, Listing};
use dnsblcheck::error::Result;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Exit status when the IP is listed on at least one blacklist.
const EXIT_LISTED: i32 = 1;

/// Exit status when the check request was rejected.
const EXIT_REJECTED: i32 = 2;

/// Set up logging based on verbosity level.
///
/// # Arguments
///
/// * `verbose` - Enable debug-level logging
/// * `quiet` - Enable error-level only logging
fn setup_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .init();
}

/// Load blacklist servers from command-line hosts, a file or the defaults.
///
/// # Arguments
///
/// * `file` - Optional path to a blacklist JSON file
/// * `hosts` - Command-line blacklist specifications (HOST#Name)
/// * `max_tier` - Optional tier cut-off
fn load_servers(
    file: Option<PathBuf>,
    hosts: Vec<String>,
    max_tier: Option<i64>,
) -> Result<Vec<BlacklistServer>> {
    let list = if !hosts.is_empty() {
        ConfigLoader::from_args(hosts)?
    } else if let Some(path) = file {
        ConfigLoader::load_from_file(path)?
    } else {
        ConfigLoader::load_default()
    };

    let list = match max_tier {
        Some(tier) => ConfigLoader::filter_tier(list, tier),
        None => list,
    };
    Ok(list.servers)
}

/// Run a blacklist check and print the report.
///
/// Returns the process exit status.
async fn run_check(
    ip: &str,
    servers: Vec<BlacklistServer>,
    config: CheckerConfig,
    format: OutputFormat,
) -> Result<i32> {
    tracing::debug!("Checking {ip} against {} DNSBL servers", servers.len());

    let checker = Checker::from_config(servers, config)?;
    let report = checker.check(ip).await;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print_report_table(&report),
        OutputFormat::Csv | OutputFormat::Tsv => print_report_delimited(&report, format),
    }

    Ok(if !report.success {
        EXIT_REJECTED
    } else if report.is_listed() {
        EXIT_LISTED
    } else {
        0
    })
}

fn listing_label(listed: Listing) -> &'static str {
    match listed {
        Listing::Listed => "LISTED",
        Listing::NotListed => "clean",
        Listing::Unknown => "unknown",
    }
}

/// Print a report in table format.
fn print_report_table(report: &CheckReport) {
    if !report.success {
        eprintln!("Error: {}", report.message);
        return;
    }

    if let (Some(ip), Some(version)) = (&report.ip, report.ip_version) {
        println!("IP: {ip} ({version})\n");
    }

    println!(
        "{:<4} {:<34} {:<28} {:<8} {:>10}",
        "#", "Name", "Host", "Status", "Time"
    );
    println!("{}", "-".repeat(88));

    for (idx, o) in report.outcomes().iter().enumerate() {
        println!(
            "{:<4} {:<34} {:<28} {:<8} {:>7.2} ms",
            idx + 1,
            o.name,
            o.host,
            listing_label(o.listed),
            o.response_time_ms
        );
        if let Some(err) = &o.error_message {
            println!("     └ {err}");
        }
    }

    if let Some(stats) = &report.stats {
        println!("\n=== Summary ===");
        println!("Servers: {}", stats.total_servers);
        println!("Listed: {}", stats.listed_count);
        println!("Clean: {}", stats.clean_count);
        println!("Unknown: {}", stats.unknown_count);
        println!("Total time: {:.2} ms", stats.total_time_ms);
        println!("Average response: {:.2} ms", stats.avg_response_time_ms);
    }
    println!("\n{}", report.message);
}

/// Print a report in CSV or TSV format.
fn print_report_delimited(report: &CheckReport, format: OutputFormat) {
    if !report.success {
        eprintln!("Error: {}", report.message);
        return;
    }

    let sep = format.separator().unwrap_or(',').to_string();
    println!(
        "{}",
        ["#Idx", "Name", "Host", "Tier", "Priority", "Listed", "Time(ms)", "Error"].join(sep.as_str())
    );
    for (idx, o) in report.outcomes().iter().enumerate() {
        let fields = [
            (idx + 1).to_string(),
            o.name.clone(),
            o.host.clone(),
            o.tier.map(|t| t.to_string()).unwrap_or_default(),
            o.priority.clone().unwrap_or_default(),
            o.listed.to_string(),
            format!("{:.2}", o.response_time_ms),
            o.error_message.clone().unwrap_or_default(),
        ];
        println!("{}", fields.map(|f| escape_field(&f, &sep)).join(sep.as_str()));
    }
}

/// Quote a field if it contains the separator or a quote.
fn escape_field(field: &str, sep: &str) -> String {
    if field.contains(sep) || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// List blacklist servers.
fn run_list(file: Option<PathBuf>, max_tier: Option<i64>, format: OutputFormat) -> Result<()> {
    let servers = load_servers(file, Vec::new(), max_tier)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&servers)?);
        return Ok(());
    }

    println!("DNSBL servers ({} total):\n", servers.len());
    println!("{:<4} {:<34} {:<28} {:<6} {:<14}", "#", "Name", "Host", "Tier", "Priority");
    println!("{}", "-".repeat(88));

    for (idx, s) in servers.iter().enumerate() {
        println!(
            "{:<4} {:<34} {:<28} {:<6} {:<14}",
            idx + 1,
            s.name,
            s.host,
            s.tier.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string()),
            s.priority.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}

/// Main entry point for the dnsblcheck CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let (cli, verbose) = dnsblcheck::cli::parse_verbose();
    setup_logging(verbose, cli.quiet);

    tracing::debug!("dnsblcheck starting...");

    match cli.command {
        Commands::Check {
            ip,
            file,
            hosts,
            max_tier,
            timeout,
            no_ipv6,
            concurrency,
            nameservers,
        } => {
            let servers = load_servers(file, hosts, max_tier)?;
            let config = CheckerConfig::new()
                .with_timeout_secs(timeout)
                .with_ipv6(!no_ipv6)
                .with_max_concurrency(concurrency)
                .with_nameservers(nameservers);

            let code = run_check(&ip, servers, config, cli.format).await?;
            if code != 0 {
                std::process::exit(code);
            }
        }

        Commands::List { file, max_tier } => {
            run_list(file, max_tier, cli.format)?;
        }

        Commands::Export { output } => {
            let json = serde_json::to_string_pretty(&ConfigLoader::builtin())?;
            std::fs::write(&output, json)?;
            println!("Exported to: {}", output.display());
        }

        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "dnsblcheck",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}
