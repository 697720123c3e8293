//! Version command

use anyhow::Result;
use loratrack_update::UpdateConfig;
use tracing::warn;

use crate::cli::VersionArgs;
use crate::output;
use crate::version::VersionInfo;

pub fn run(args: VersionArgs) -> Result<()> {
    let config = UpdateConfig::load().unwrap_or_else(|e| {
        warn!("Ignoring update configuration: {}", e);
        UpdateConfig::default()
    });
    let info = VersionInfo::for_config(&config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", info);
    if let Some(commit) = &info.commit {
        output::field("Commit", commit);
    }
    if let Some(built_at) = &info.built_at {
        output::field("Built", built_at);
    }
    if let Some(target) = &info.target {
        output::field("Target", target);
    }
    if let Some(artifact) = &info.artifact {
        output::field("Artifact", artifact);
    }
    output::field("Updates from", &info.release_repo);

    Ok(())
}
