//! Interactive per-video selection.
//!
//! The prompt accepts a bounded token set (`1` download, `2` skip) and
//! re-asks on anything else with an iterative loop, so pathological repeated
//! invalid input can never grow the call stack. Reader and writer are
//! injected to keep the loop testable without a terminal.

use std::io::{BufRead, Write};

use tracing::debug;

/// Asks the user, for each extracted link, whether to download it.
///
/// Returns the approved links in their original order. End of input stops
/// prompting and skips every remaining candidate.
///
/// # Errors
///
/// Returns any I/O error raised while reading input or writing prompts.
pub fn select_videos<R: BufRead, W: Write>(
    links: &[String],
    mut input: R,
    mut output: W,
) -> std::io::Result<Vec<String>> {
    let mut selected = Vec::new();

    'links: for link in links {
        loop {
            write!(output, "Download this video? {link} (1 = yes, 2 = no): ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                // End of input: skip this and all remaining candidates.
                writeln!(output)?;
                debug!("input closed; skipping remaining candidates");
                break 'links;
            }

            match line.trim() {
                "1" => {
                    selected.push(link.clone());
                    continue 'links;
                }
                "2" => {
                    writeln!(output, "Skipping video: {link}")?;
                    continue 'links;
                }
                other => {
                    writeln!(
                        output,
                        "Invalid input '{other}'. Please enter '1' for yes or '2' for no."
                    )?;
                }
            }
        }
    }

    debug!(
        selected = selected.len(),
        offered = links.len(),
        "selection complete"
    );
    Ok(selected)
}
