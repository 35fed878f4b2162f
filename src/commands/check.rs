//! Check command implementation
//!
//! Expands and compiles the job description without touching any server, so a
//! maintainer can see exactly which jobs a change to `.jobforge.yaml` will
//! declare before pushing it.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Repository checkout to read (defaults to the current directory)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Repository URL override (skips git discovery; requires --branch)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Branch override (requires --url)
    #[arg(long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the check command
pub fn execute(args: CheckArgs) -> Result<()> {
    let dir = super::working_dir(args.dir);
    let (repository, jobs) = super::resolve_jobs(&dir, args.url.as_deref(), args.branch.as_deref())?;

    if !args.quiet {
        println!(
            "{} job(s) declared by {}@{}",
            jobs.len(),
            repository.url,
            repository.branch
        );
        for job in &jobs {
            println!("  {}", job.name);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_check_with_overrides() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".jobforge.yaml"),
            "build_shell_commands:\n- make\n",
        )
        .unwrap();

        let args = CheckArgs {
            dir: Some(temp.path().to_path_buf()),
            url: Some("http://server/repo.git".to_string()),
            branch: Some("main".to_string()),
            quiet: true,
        };
        assert!(execute(args).is_ok());
    }

    #[test]
    fn test_check_missing_description_is_ok() {
        let temp = TempDir::new().unwrap();
        let args = CheckArgs {
            dir: Some(temp.path().to_path_buf()),
            url: Some("http://server/repo.git".to_string()),
            branch: Some("main".to_string()),
            quiet: true,
        };
        assert!(execute(args).is_ok());
    }

    #[test]
    fn test_check_rejects_lone_url_override() {
        let temp = TempDir::new().unwrap();
        let args = CheckArgs {
            dir: Some(temp.path().to_path_buf()),
            url: Some("http://server/repo.git".to_string()),
            branch: None,
            quiet: true,
        };
        assert!(execute(args).is_err());
    }

    #[test]
    fn test_check_invalid_description_fails() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".jobforge.yaml"), "nothing_recognized: 1\n").unwrap();

        let args = CheckArgs {
            dir: Some(temp.path().to_path_buf()),
            url: Some("http://server/repo.git".to_string()),
            branch: Some("main".to_string()),
            quiet: true,
        };
        assert!(execute(args).is_err());
    }
}
