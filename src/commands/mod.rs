//! Command implementations for the jobforge CLI

pub mod check;
pub mod compile;
pub mod upload;

use anyhow::Result;
use jobforge::compiler::CompiledJob;
use jobforge::repository::Repository;
use std::path::{Path, PathBuf};

/// How a command finds the job set it operates on.
///
/// The usual path is a repository checkout: identity from the `origin` remote
/// and current branch, description from `.jobforge.yaml` at its root. The
/// `--url`/`--branch` overrides skip git entirely, which keeps the commands
/// usable on bare exported trees.
pub fn resolve_jobs(
    dir: &Path,
    url: Option<&str>,
    branch: Option<&str>,
) -> Result<(Repository, Vec<CompiledJob>)> {
    use jobforge::actions;
    use jobforge::config::CONFIG_FILENAME;

    match (url, branch) {
        (Some(url), Some(branch)) => {
            let repository = Repository::new(url, branch);
            let config_path = dir.join(CONFIG_FILENAME);
            if !config_path.exists() {
                return Ok((repository, Vec::new()));
            }
            let contents = std::fs::read_to_string(&config_path)?;
            let jobs = actions::jobs_from_file(&repository, &contents)?;
            Ok((repository, jobs))
        }
        (None, None) => Ok(actions::jobs_from_directory(dir)?),
        _ => anyhow::bail!("--url and --branch must be given together"),
    }
}

/// The working directory a command operates on.
pub fn working_dir(dir: Option<PathBuf>) -> PathBuf {
    dir.unwrap_or_else(|| PathBuf::from("."))
}
