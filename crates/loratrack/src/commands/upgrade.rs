//! Upgrade command

use anyhow::{anyhow, Context, Result};
use loratrack_update::{Deadline, UpdateError, Updater};
use std::time::Duration;
use tracing::debug;

use crate::cli::UpgradeArgs;
use crate::output::{self, Mark};
use crate::version::VersionInfo;

pub async fn run(args: UpgradeArgs) -> Result<()> {
    let updater = Updater::from_env()
        .context("Failed to load update configuration")?
        .with_progress(true);
    let deadline = args
        .timeout
        .map(|secs| Deadline::after(Duration::from_secs(secs)))
        .unwrap_or_default();
    let info = VersionInfo::for_config(updater.config());
    debug!(
        "Upgrade requested: current={}, repo={}, prerelease={}, timeout={:?}",
        info.version, info.release_repo, args.prerelease, args.timeout
    );

    if args.list {
        return list_versions(&updater, deadline, &info, args.prerelease).await;
    }

    if args.check {
        return check_for_updates(&updater, deadline, &info, args.prerelease).await;
    }

    do_upgrade(&updater, deadline, &info, args.prerelease).await
}

/// List available versions
async fn list_versions(
    updater: &Updater,
    deadline: Deadline,
    info: &VersionInfo,
    prerelease: bool,
) -> Result<()> {
    output::header(&format!("Available versions of {}", info.release_repo));

    let spinner = output::spinner("Fetching releases...");
    let releases = updater.list_releases(deadline, prerelease).await;
    spinner.finish_and_clear();

    let current_tag = info.release_tag();
    for release in releases? {
        println!("  {}", output::release_line(&release, &current_tag));
    }
    Ok(())
}

/// Check for updates only
async fn check_for_updates(
    updater: &Updater,
    deadline: Deadline,
    info: &VersionInfo,
    prerelease: bool,
) -> Result<()> {
    output::status(Mark::Note, &format!("Current version: {}", info.version));

    let spinner = output::spinner("Checking for updates...");
    let check = updater
        .check_for_update(deadline, &info.version, prerelease)
        .await;
    spinner.finish_and_clear();
    let check = check?;

    let (mark, summary) = output::check_summary(&check);
    output::status(mark, &summary);
    if check.has_update {
        output::status(Mark::Note, "Run 'loratrack upgrade' to install the update");
    }

    Ok(())
}

/// Perform the upgrade
async fn do_upgrade(
    updater: &Updater,
    deadline: Deadline,
    info: &VersionInfo,
    prerelease: bool,
) -> Result<()> {
    output::header("Upgrade");
    output::field("Current version", &info.version);
    output::field("Platform", &updater.platform().to_string());
    output::field("Release repo", &info.release_repo);
    println!();

    match updater
        .update_to_latest(deadline, &info.version, prerelease)
        .await
    {
        Ok(tag) => {
            output::status(Mark::Done, &format!("Upgraded to {}", tag));
            output::status(Mark::Note, "Restart loratrack to use the new version");
            Ok(())
        }
        Err(UpdateError::AlreadyUpToDate { latest, .. }) => {
            output::status(Mark::Done, &format!("Already at version {}", latest));
            Ok(())
        }
        Err(UpdateError::PendingReplace { path }) => {
            output::status(
                Mark::Attention,
                "The running executable cannot be replaced while it is in use",
            );
            output::status(
                Mark::Note,
                &format!(
                    "New binary saved to {}; exit loratrack and rename it over the current executable",
                    path.display()
                ),
            );
            Ok(())
        }
        Err(UpdateError::ManualReplaceRequired { path, reason }) => {
            output::status(
                Mark::Failed,
                &format!("Could not replace the executable: {}", reason),
            );
            output::status(
                Mark::Note,
                &format!(
                    "New binary saved to {}; move it over the current executable to finish",
                    path.display()
                ),
            );
            Err(anyhow!("Upgrade not completed"))
        }
        Err(e @ UpdateError::DeadlineExceeded) => {
            Err(anyhow!(e).context("Upgrade timed out; no changes were made"))
        }
        Err(e) => Err(anyhow!(e).context("Upgrade failed")),
    }
}
