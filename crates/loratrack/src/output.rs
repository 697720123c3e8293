//! Terminal rendering for update results

use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use loratrack_update::{Release, UpdateCheck};

/// Marker placed in front of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Done,
    Failed,
    Attention,
    Note,
}

impl Mark {
    fn symbol(self) -> StyledObject<&'static str> {
        match self {
            Mark::Done => style("✓").green().bold(),
            Mark::Failed => style("✗").red().bold(),
            Mark::Attention => style("⚠").yellow().bold(),
            Mark::Note => style("ℹ").blue().bold(),
        }
    }
}

/// Print a status line; failures and warnings go to stderr
pub fn status(mark: Mark, msg: &str) {
    match mark {
        Mark::Done | Mark::Note => println!("{} {}", mark.symbol(), msg),
        Mark::Failed | Mark::Attention => eprintln!("{} {}", mark.symbol(), msg),
    }
}

/// Print a section header
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// Print an indented `key: value` line
pub fn field(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Summary line for an update check
pub fn check_summary(check: &UpdateCheck) -> (Mark, String) {
    if check.has_update {
        let label = if check.prerelease { " (prerelease)" } else { "" };
        (
            Mark::Note,
            format!("Update available: {}{}", check.latest_tag, label),
        )
    } else {
        (
            Mark::Done,
            format!("Already on the latest version ({})", check.latest_tag),
        )
    }
}

/// One line of the release listing, marking the running release
pub fn release_line(release: &Release, current_tag: &str) -> String {
    let date = release
        .published_at
        .as_deref()
        .and_then(|d| d.get(..10))
        .map(|d| format!(" - {}", d))
        .unwrap_or_default();
    let prerelease = if release.prerelease {
        " [prerelease]"
    } else {
        ""
    };
    let current = if !current_tag.is_empty() && release.tag_name == current_tag {
        " (current)"
    } else {
        ""
    };
    format!("{}{}{}{}", release.tag_name, date, prerelease, current)
}

/// Spinner shown while waiting on the release host
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
