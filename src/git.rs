//! Git helpers for locating the repository a checkout belongs to.
//!
//! This uses the system git command, which automatically handles SSH keys,
//! credential helpers and anything else configured in the user's environment.
//! Only read operations live here: the publisher needs to know the checkout's
//! `origin` URL and current branch, nothing more.

use crate::error::{Error, Result};
use crate::repository::Repository;
use std::path::Path;
use std::process::Command;

fn run_git(repo_path: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()?;

    if !output.status.success() {
        return Err(Error::GitCommand {
            command: format!("git {}", args.join(" ")),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// The URL of the checkout's `origin` remote.
pub fn remote_url(repo_path: &Path) -> Result<String> {
    run_git(repo_path, &["config", "--get", "remote.origin.url"])
}

/// The name of the currently checked-out branch.
pub fn current_branch(repo_path: &Path) -> Result<String> {
    run_git(repo_path, &["rev-parse", "--abbrev-ref", "HEAD"])
}

/// The [`Repository`] a local checkout is tied to.
pub fn repository_from_checkout(repo_path: &Path) -> Result<Repository> {
    Ok(Repository::new(
        remote_url(repo_path)?,
        current_branch(repo_path)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .status()
            .unwrap();
        assert!(status.success(), "git {:?} failed", args);
    }

    fn init_repo(dir: &Path, url: &str, branch: &str) {
        git(dir, &["init", "--quiet", "-b", branch]);
        git(dir, &["config", "user.email", "test@example.com"]);
        git(dir, &["config", "user.name", "test"]);
        git(dir, &["remote", "add", "origin", url]);
        git(dir, &["commit", "--quiet", "--allow-empty", "-m", "init"]);
    }

    #[test]
    fn test_repository_from_checkout() {
        let temp = TempDir::new().unwrap();
        init_repo(temp.path(), "http://server/space.git", "milky_way");

        let repository = repository_from_checkout(temp.path()).unwrap();
        assert_eq!(repository.url, "http://server/space.git");
        assert_eq!(repository.branch, "milky_way");
    }

    #[test]
    fn test_remote_url_fails_outside_a_repository() {
        let temp = TempDir::new().unwrap();
        let result = remote_url(temp.path());
        assert!(result.is_err());
    }
}
