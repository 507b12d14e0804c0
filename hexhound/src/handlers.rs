use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::ArgMatches;
use colored::Colorize;
use hexhound_scanner::{ErrorPolicy, ProgressCallback, ScrapeReport, Walker};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs;
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Full scan output: the walker's report plus run metadata.
#[derive(Debug, Serialize)]
pub struct ScanSummary {
    pub seeds: Vec<String>,
    pub started_at: String,
    pub elapsed_secs: f64,
    #[serde(flatten)]
    pub report: ScrapeReport,
}

/// Build the starting listing URL for one target address.
pub fn seed_url(ip: &IpAddr, root: &str) -> String {
    match ip {
        IpAddr::V4(v4) => format!("http://{v4}{root}"),
        IpAddr::V6(v6) => format!("http://[{v6}]{root}"),
    }
}

/// Resolve targets from repeated --ip values or a targets file.
pub fn load_targets_from_source(
    ips: Vec<IpAddr>,
    targets_file: Option<&PathBuf>,
) -> Result<Vec<IpAddr>> {
    if let Some(path) = targets_file {
        load_targets_from_file(path)
    } else if !ips.is_empty() {
        Ok(ips)
    } else {
        bail!("either --ip or --targets-file must be provided");
    }
}

/// Load and validate target addresses from a file.
pub fn load_targets_from_file(path: &PathBuf) -> Result<Vec<IpAddr>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read targets file {}", path.display()))?;

    let targets: Vec<IpAddr> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(parse_target_line)
        .collect();

    if targets.is_empty() {
        bail!("no valid IP addresses found in {}", path.display());
    }

    Ok(targets)
}

/// Parse a single line as an IPv4/IPv6 address, warning on junk.
pub fn parse_target_line(line: &str) -> Option<IpAddr> {
    match line.parse::<IpAddr>() {
        Ok(ip) => Some(ip),
        Err(_) => {
            eprintln!("{} skipping invalid address '{line}'", "!".yellow().bold());
            None
        }
    }
}

/// Render the human-readable report.
pub fn render_text_report(summary: &ScanSummary) -> String {
    let mut report = String::new();
    report.push_str(&format!("{}\n\n", "━".repeat(52)));
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Seeds walked: {}\n", summary.seeds.len()));
    report.push_str(&format!(
        "  Directories visited: {}\n",
        summary.report.directories_visited
    ));
    report.push_str(&format!(
        "  Marker files found: {}\n",
        summary.report.markers_found
    ));
    report.push_str(&format!(
        "  Digest-like matches: {}\n",
        summary.report.matches.len()
    ));

    if !summary.report.matches.is_empty() {
        report.push_str("\n## Matches\n");
        for content in &summary.report.matches {
            report.push_str(&format!("  - {content}\n"));
        }
    }

    if !summary.report.failures.is_empty() {
        report.push_str("\n## Skipped branches\n");
        for failure in &summary.report.failures {
            report.push_str(&format!("  - {}: {}\n", failure.url, failure.error));
        }
    }

    report.push_str(&format!(
        "\nStarted: {}\nElapsed: {:.2}s\n",
        summary.started_at, summary.elapsed_secs
    ));

    report
}

pub async fn handle_scan(sub_matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let ips: Vec<IpAddr> = sub_matches
        .get_many::<IpAddr>("ip")
        .map(|values| values.copied().collect())
        .unwrap_or_default();
    let targets_file = sub_matches.get_one::<PathBuf>("targets-file");
    let root = sub_matches.get_one::<String>("root").unwrap();
    let marker = sub_matches.get_one::<String>("marker").unwrap();
    let timeout = *sub_matches.get_one::<u64>("timeout").unwrap_or(&10);
    let keep_going = sub_matches.get_flag("keep-going");
    let format = sub_matches.get_one::<String>("format").unwrap();
    let output = sub_matches.get_one::<PathBuf>("output");

    let targets = match load_targets_from_source(ips, targets_file) {
        Ok(targets) => targets,
        Err(e) => {
            eprintln!("{} {e:#}", "✗".red().bold());
            std::process::exit(1);
        }
    };

    let seeds: Vec<String> = targets.iter().map(|ip| seed_url(ip, root)).collect();
    let policy = if keep_going {
        ErrorPolicy::Isolate
    } else {
        ErrorPolicy::FailFast
    };

    println!("\n{} Scanning {} host(s)", "→".blue(), targets.len());
    println!("Root: {root}");
    println!("Marker: {marker}");
    println!(
        "Error policy: {}\n",
        if keep_going {
            "isolate (record and continue)"
        } else {
            "fail-fast"
        }
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Starting walk...");

    let spinner_clone = spinner.clone();
    let progress_callback: ProgressCallback = Arc::new(move |count, url| {
        spinner_clone.set_message(format!("{count} directories visited, at {url}"));
    });

    let walker = Walker::with_timeout(timeout)
        .with_marker(marker.clone())
        .with_error_policy(policy)
        .with_progress_callback(progress_callback);

    let started_at = Utc::now().to_rfc3339();
    let start = Instant::now();

    let report = match walker.walk(&seeds).await {
        Ok(report) => report,
        Err(e) => {
            spinner.finish_and_clear();
            eprintln!("{} Scan failed: {e}", "✗".red().bold());
            std::process::exit(1);
        }
    };

    spinner.finish_and_clear();
    println!("{} Scan complete!\n", "✓".green().bold());

    let summary = ScanSummary {
        seeds,
        started_at,
        elapsed_secs: start.elapsed().as_secs_f64(),
        report,
    };

    let rendered = match format.as_str() {
        "json" => {
            let mut body = serde_json::to_string_pretty(&summary).unwrap();
            body.push('\n');
            body
        }
        _ => render_text_report(&summary),
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, &rendered) {
                eprintln!(
                    "{} Failed to write report to {}: {e}",
                    "✗".red().bold(),
                    path.display()
                );
                std::process::exit(1);
            }
            println!("{} Report saved to {}", "✓".green().bold(), path.display());
        }
        None => print!("{rendered}"),
    }
}
