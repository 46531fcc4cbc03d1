//! CLI entry point for the vidgrab tool.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use url::Url;
use vidgrab_core::{
    DownloadConfig, DownloadEngine, DownloadTask, HttpClient, ProgressReporter,
    extract_video_links, fetch_page_source, render_gallery, select_videos,
};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    info!("Vidgrab starting");

    let base_url =
        Url::parse(&args.url).with_context(|| format!("invalid page URL: {}", args.url))?;

    let config = DownloadConfig {
        concurrency: usize::from(args.concurrency),
        chunk_size: args.chunk_size as usize,
        ..DownloadConfig::default()
    };
    let client = HttpClient::new(&config);

    // Step 1: fetch the page and save its source
    let html = fetch_page_source(client.inner(), base_url.as_str(), &args.page_file).await?;

    // Step 2: extract video links from the page
    let video_links = extract_video_links(&html, &base_url, args.max_videos);
    if video_links.is_empty() {
        info!("No video links found on the page");
        return Ok(());
    }
    info!(count = video_links.len(), "Extracted video links");

    // Step 3: render the extracted links into a browsable gallery page
    tokio::fs::write(&args.gallery_file, render_gallery(&video_links))
        .await
        .with_context(|| format!("failed to write gallery to {}", args.gallery_file.display()))?;
    info!(path = %args.gallery_file.display(), "Gallery saved");

    // Step 4: ask which videos to download
    let selected = if args.yes {
        video_links
    } else if io::stdin().is_terminal() {
        let stdin = io::stdin();
        select_videos(&video_links, stdin.lock(), io::stdout())?
    } else {
        info!("stdin is not a terminal; downloading all extracted videos");
        video_links
    };

    if selected.is_empty() {
        info!("No videos selected");
        return Ok(());
    }

    // Step 5: download the selection concurrently
    let tasks: Vec<DownloadTask> = selected
        .iter()
        .map(|url| DownloadTask::new(url.clone(), &args.output_dir))
        .collect();

    let engine = DownloadEngine::new(&config)?;
    let progress = ProgressReporter::new(!args.quiet && io::stderr().is_terminal());
    let report = engine.process_batch(&client, &tasks, &progress).await?;

    println!(
        "\nTotal videos downloaded: ({}/{})",
        report.summary.succeeded(),
        report.summary.total()
    );

    Ok(())
}
