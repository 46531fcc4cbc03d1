//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use vidgrab_core::{DEFAULT_CHUNK_SIZE, DEFAULT_CONCURRENCY};

/// Scan a web page for video links and batch-download a selection.
///
/// Vidgrab fetches the page, saves its source, extracts direct video links,
/// renders them into a browsable gallery page, asks which ones to download,
/// and streams the approved videos concurrently into the output directory.
#[derive(Parser, Debug)]
#[command(name = "vidgrab")]
#[command(author, version, about)]
pub struct Args {
    /// Page URL to scan for video links
    pub url: String,

    /// Directory downloaded videos are written into (created if absent)
    #[arg(short, long, default_value = "downloaded_videos")]
    pub output_dir: PathBuf,

    /// Maximum concurrent downloads (1-100)
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub concurrency: u8,

    /// Maximum number of video links to extract (0 = unlimited)
    #[arg(short = 'm', long, default_value_t = 0)]
    pub max_videos: usize,

    /// Streaming chunk size in bytes (64-1048576)
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE as u32, value_parser = clap::value_parser!(u32).range(64..=1_048_576))]
    pub chunk_size: u32,

    /// Download every extracted video without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Where to save the fetched page source
    #[arg(long, default_value = "index.html")]
    pub page_file: PathBuf,

    /// Where to save the rendered video gallery
    #[arg(long, default_value = "videos.html")]
    pub gallery_file: PathBuf,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["vidgrab", "http://example.com"]).unwrap();
        assert_eq!(args.url, "http://example.com");
        assert_eq!(args.output_dir, PathBuf::from("downloaded_videos"));
        assert_eq!(args.concurrency, 5); // DEFAULT_CONCURRENCY
        assert_eq!(args.max_videos, 0); // unlimited
        assert_eq!(args.chunk_size, 1024); // DEFAULT_CHUNK_SIZE
        assert!(!args.yes);
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_requires_url() {
        assert!(Args::try_parse_from(["vidgrab"]).is_err());
    }

    #[test]
    fn test_cli_rejects_out_of_range_concurrency() {
        assert!(Args::try_parse_from(["vidgrab", "http://example.com", "-c", "0"]).is_err());
        assert!(Args::try_parse_from(["vidgrab", "http://example.com", "-c", "101"]).is_err());
        let args = Args::try_parse_from(["vidgrab", "http://example.com", "-c", "100"]).unwrap();
        assert_eq!(args.concurrency, 100);
    }

    #[test]
    fn test_cli_rejects_out_of_range_chunk_size() {
        assert!(
            Args::try_parse_from(["vidgrab", "http://example.com", "--chunk-size", "1"]).is_err()
        );
        let args =
            Args::try_parse_from(["vidgrab", "http://example.com", "--chunk-size", "4096"])
                .unwrap();
        assert_eq!(args.chunk_size, 4096);
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["vidgrab", "http://example.com", "-v"]).unwrap();
        assert_eq!(args.verbose, 1);

        let args = Args::try_parse_from(["vidgrab", "http://example.com", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_yes_flag() {
        let args = Args::try_parse_from(["vidgrab", "http://example.com", "--yes"]).unwrap();
        assert!(args.yes);
    }
}
