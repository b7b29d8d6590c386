// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Subdomain Scanner CLI
 * Run scans from the terminal or serve the streaming scan API
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use subfinder_scanner::config::AppConfig;
use subfinder_scanner::emitter::sse_frame;
use subfinder_scanner::engine::ScanEngine;
use subfinder_scanner::export::ResultCollector;
use subfinder_scanner::server;
use subfinder_scanner::types::{ScanEvent, ScanMethod};

/// SubFinder - Streaming Subdomain Discovery
#[derive(Parser)]
#[command(name = "subfinder")]
#[command(author = "Bountyy Oy <info@bountyy.fi>")]
#[command(version)]
#[command(about = "Discover live subdomains with HTTP and DNS probing", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Quiet mode - only show results
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a domain for live subdomains
    Scan {
        /// Target domain (scheme, www. and path are stripped)
        domain: String,

        /// Enumeration method
        #[arg(short, long, default_value = "dictionary")]
        method: MethodArg,

        /// Write active results as CSV to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// How events are printed
        #[arg(short, long, default_value = "text")]
        format: EventFormat,

        /// Probes per batch
        #[arg(long)]
        batch_size: Option<usize>,

        /// Pause between batches in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// HTTP reachability timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Serve the streaming scan API
    Serve {
        /// Listen address
        #[arg(long)]
        host: Option<String>,

        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum MethodArg {
    Dictionary,
    Bruteforce,
    All,
}

impl From<MethodArg> for ScanMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Dictionary => ScanMethod::Dictionary,
            MethodArg::Bruteforce => ScanMethod::Bruteforce,
            MethodArg::All => ScanMethod::All,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum EventFormat {
    /// Human-readable progress and results
    Text,
    /// One JSON event per line
    Json,
    /// Server-sent-event frames
    Sse,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };

    let log_level = if cli.debug {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        config
            .observability
            .log_level
            .parse()
            .unwrap_or(Level::INFO)
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .thread_name("subfinder-worker")
        .enable_all()
        .build()?;

    match cli.command {
        Commands::Scan {
            domain,
            method,
            output,
            format,
            batch_size,
            delay_ms,
            timeout,
        } => {
            if let Some(batch_size) = batch_size {
                config.scanner.batch_size = batch_size;
            }
            if let Some(delay_ms) = delay_ms {
                config.scanner.batch_delay_ms = delay_ms;
            }
            if let Some(timeout) = timeout {
                config.scanner.http_timeout_secs = timeout;
            }

            runtime.block_on(run_scan(&config, &domain, method.into(), output, format, cli.quiet))
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            runtime.block_on(async {
                let engine = ScanEngine::new(&config)?;
                server::serve(engine, &config.server).await
            })
        }
    }
}

async fn run_scan(
    config: &AppConfig,
    domain: &str,
    method: ScanMethod,
    output: Option<PathBuf>,
    format: EventFormat,
    quiet: bool,
) -> Result<()> {
    let engine = ScanEngine::new(config)?;
    let mut stream = engine.scan(domain, method)?;
    let mut collector = ResultCollector::new();

    let cancel = stream.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    while let Some(event) = stream.next_event().await {
        collector.record(&event);

        match format {
            EventFormat::Json => println!("{}", serde_json::to_string(&event)?),
            EventFormat::Sse => print!("{}", sse_frame(&event)?),
            EventFormat::Text => print_event(&event, &collector, quiet),
        }
    }

    if !collector.is_complete() {
        info!("Scan interrupted before completion");
    }

    info!(
        "Found {} active subdomains ({}/{} probed)",
        collector.active_count(),
        collector.progress().current,
        collector.progress().total
    );

    if let Some(path) = output {
        let csv = collector.to_csv()?;
        std::fs::write(&path, csv)
            .with_context(|| format!("Failed to write results to {:?}", path))?;
        info!("[SUCCESS] Results written to {:?}", path);
    }

    Ok(())
}

fn print_event(event: &ScanEvent, collector: &ResultCollector, quiet: bool) {
    match event {
        ScanEvent::Result { result } => {
            println!(
                "{:<40} {:<16} {}",
                result.subdomain,
                result.address.as_deref().unwrap_or("-"),
                result.method
            );
        }
        ScanEvent::Progress { progress } if !quiet => {
            if progress.current == progress.total || progress.current % 25 == 0 {
                eprintln!(
                    "[{}/{}] {:.0}%",
                    progress.current,
                    progress.total,
                    collector.percentage()
                );
            }
        }
        _ => {}
    }
}
